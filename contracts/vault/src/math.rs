//! Share/asset conversion.
//!
//! Products are taken in 256-bit space so that `assets * total_supply` cannot
//! overflow for 18-decimal assets; results that do not fit back into `i128`
//! are reported as `ArithmeticError`.

use soroban_sdk::{Env, I256};

use crate::error::VaultError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rounding {
    Floor,
    Ceiling,
}

/// Computes `value * numerator / denominator` for non-negative inputs.
pub fn mul_div(
    env: &Env,
    value: i128,
    numerator: i128,
    denominator: i128,
    rounding: Rounding,
) -> Result<i128, VaultError> {
    if denominator == 0 {
        return Err(VaultError::DivisionByZero);
    }
    if value < 0 || numerator < 0 || denominator < 0 {
        return Err(VaultError::NegativeAmount);
    }

    let product = I256::from_i128(env, value).mul(&I256::from_i128(env, numerator));
    let denom = I256::from_i128(env, denominator);
    let mut quotient = product.div(&denom);

    if rounding == Rounding::Ceiling && product.rem_euclid(&denom) != I256::from_i32(env, 0) {
        quotient = quotient.add(&I256::from_i32(env, 1));
    }

    quotient.to_i128().ok_or(VaultError::ArithmeticError)
}

/// `assets * (total_supply + 1) / (total_assets + 1)`.
pub fn convert_to_shares(
    env: &Env,
    assets: i128,
    total_assets: i128,
    total_supply: i128,
    rounding: Rounding,
) -> Result<i128, VaultError> {
    mul_div(env, assets, offset(total_supply)?, offset(total_assets)?, rounding)
}

/// `shares * (total_assets + 1) / (total_supply + 1)`.
pub fn convert_to_assets(
    env: &Env,
    shares: i128,
    total_assets: i128,
    total_supply: i128,
    rounding: Rounding,
) -> Result<i128, VaultError> {
    mul_div(env, shares, offset(total_assets)?, offset(total_supply)?, rounding)
}

/// One virtual unit on each side of the exchange rate. Equal totals convert
/// 1:1 and neither side can be zero.
fn offset(total: i128) -> Result<i128, VaultError> {
    total.checked_add(1).ok_or(VaultError::ArithmeticError)
}

/// `amount * bps / 10_000`, rounded down.
pub fn apply_bps(amount: i128, bps: u32) -> Result<i128, VaultError> {
    amount
        .checked_mul(bps as i128)
        .map(|scaled| scaled / harvest_interfaces::MAX_BPS as i128)
        .ok_or(VaultError::ArithmeticError)
}
