//! Test doubles for the contracts the harvest workspace talks to but does
//! not own: a Compound-style lending market, a fixed-price swap router, a
//! keeper automation platform, and a minimal strategy for vault-only tests.
//!
//! None of these are meant for deployment. They panic with a message on
//! misuse, which is enough for the caller's invocation to fail.

#![no_std]

mod automation;
mod market;
mod router;
mod strategy;

pub use automation::{MockAutomation, MockAutomationClient, Task};
pub use market::{MockYieldMarket, MockYieldMarketClient, RATE_SCALE};
pub use router::{MockSwapRouter, MockSwapRouterClient, PRICE_SCALE};
pub use strategy::{MockStrategy, MockStrategyClient};
