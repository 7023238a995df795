//! # Harvest Strategy Contract
//!
//! Single-market lending strategy. It borrows the vault's asset ("want"),
//! supplies it to a Compound-style yield market, periodically claims the
//! market's reward token, swaps it back to want, and reports the result to
//! the vault.
//!
//! ## Harvest Cycle
//!
//! ```text
//! harvest ──► claim rewards ──► swap to want ──► prepare return ──► push funds ──► vault.report ──► adjust_position
//!    │                                                                                   │
//!    └── emergency exit: exit market and claim rewards first, skip adjust_position ◄───────┘
//! ```
//!
//! Profit and loss are measured against the debt the vault has on record
//! for this strategy: `estimated_total_assets - total_debt`. The strategy
//! transfers `profit + debt_payment` to the vault before it reports, and the
//! vault pushes any fresh credit back within the same `report` call.
//!
//! A strategy registered at debt ratio zero is credited the vault's
//! unallocated funds and holds them as idle want; it never supplies them.
//!
//! ## State Flags
//!
//! `paused` and `emergency_exit` are independent. `paused` blocks harvest
//! and can be lifted; `emergency_exit` can never be cleared and turns every
//! later harvest into a full exit of the market.
//!
//! ## Roles
//!
//! | Role         | Holder                          |
//! |--------------|---------------------------------|
//! | `Vault`      | the vault passed at init        |
//! | `Governance` | `vault.governance()`, read live |
//! | `Strategist` | tunes parameters                |
//! | `Keeper`     | triggers harvests, rate limited |

#![no_std]

mod access;
mod constants;
mod error;
mod events;
mod storage;

pub use access::Role;
pub use constants::{DEFAULT_MAX_SLIPPAGE, DEFAULT_REPORT_DELAY, SWAP_DEADLINE};
pub use error::StrategyError;
pub use events::*;

use access::require_role;
use harvest_interfaces::{
    HarvestReport, Liquidation, SwapRouterClient, VaultClient, YieldMarketClient, MAX_BPS,
};
use soroban_sdk::{
    auth::{ContractContext, InvokerContractAuthEntry, SubContractInvocation},
    contract, contractimpl, log, symbol_short, token, vec, Address, Env, IntoVal,
};

// ============================================================================
// CONTRACT
// ============================================================================

#[contract]
pub struct CompoundStrategy;

#[contractimpl]
impl CompoundStrategy {
    // ==========================================================================
    // INITIALIZATION
    // ==========================================================================

    /// Binds the strategy to its vault and market.
    ///
    /// `want` is taken from `vault.asset()` and the reward token from the
    /// market, so neither can be misconfigured.
    ///
    /// # Errors
    /// - `AlreadyInitialized` on a second call
    /// - `MarketMismatch` if the market's underlying is not the vault's asset
    pub fn initialize(
        env: Env,
        vault: Address,
        market: Address,
        router: Address,
        strategist: Address,
        keeper: Address,
    ) -> Result<(), StrategyError> {
        if storage::is_initialized(&env) {
            return Err(StrategyError::AlreadyInitialized);
        }

        let want = VaultClient::new(&env, &vault).asset();
        let market_client = YieldMarketClient::new(&env, &market);
        if market_client.underlying() != want {
            return Err(StrategyError::MarketMismatch);
        }

        storage::set_vault(&env, &vault);
        storage::set_want(&env, &want);
        storage::set_market(&env, &market);
        storage::set_router(&env, &router);
        storage::set_reward_token(&env, &market_client.reward_token());
        storage::set_strategist(&env, &strategist);
        storage::set_keeper(&env, &keeper);
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    // ==========================================================================
    // HARVEST
    // ==========================================================================

    /// Realises profit or loss, settles with the vault and reinvests.
    ///
    /// Governance and the strategist may harvest at any time. The keeper may
    /// only harvest once `report_delay` seconds have passed since the last
    /// report.
    ///
    /// # Errors
    /// - `Paused` while work is paused
    /// - `ReportDelayNotElapsed` on an early keeper call
    /// - `SwapFailed` / `SlippageExceeded` if the reward swap goes wrong
    ///
    /// # Events
    /// Emits the `HarvestReport` under `harvested`.
    pub fn harvest(env: Env, caller: Address) -> Result<HarvestReport, StrategyError> {
        let role = require_role(
            &env,
            &caller,
            &[Role::Governance, Role::Strategist, Role::Keeper],
        )?;
        storage::extend_instance_ttl(&env);
        if storage::is_paused(&env) {
            return Err(StrategyError::Paused);
        }

        let this = env.current_contract_address();
        let vault = Self::vault_client(&env)?;
        let params = vault.strategy_params(&this);
        if role == Role::Keeper {
            let due = params.last_report.saturating_add(storage::report_delay(&env));
            if env.ledger().timestamp() < due {
                return Err(StrategyError::ReportDelayNotElapsed);
            }
        }

        let debt_outstanding = vault.debt_outstanding(&this);
        let emergency = storage::emergency_exit(&env);
        if emergency {
            Self::exit_market(&env)?;
            Self::claim_rewards(&env)?;
        } else {
            Self::claim_rewards(&env)?;
            let rewards = Self::reward_balance(&env)?;
            if rewards > 0 && rewards >= storage::min_reward_to_sell(&env) {
                Self::swap_rewards(&env)?;
            }
        }

        let (profit, loss, debt_payment) =
            Self::prepare_return(&env, debt_outstanding, params.total_debt)?;
        let owed = profit
            .checked_add(debt_payment)
            .ok_or(StrategyError::ArithmeticError)?;
        if owed > 0 {
            Self::want_client(&env)?.transfer(&this, &vault.address, &owed);
        }
        let outcome = vault.report(&this, &profit, &loss, &debt_payment);

        if !emergency {
            Self::adjust(&env, outcome.debt_outstanding, params.debt_ratio)?;
        }

        let report = HarvestReport {
            profit,
            loss,
            debt_payment,
            debt_outstanding: outcome.debt_outstanding,
            total_debt: outcome.total_debt,
        };
        env.events()
            .publish((symbol_short!("harvested"),), report.clone());
        Ok(report)
    }

    /// Supplies idle want above what the vault wants back, or frees the
    /// difference when idle want falls short of it. A no-op when balanced.
    ///
    /// At a zero debt ratio the strategy keeps everything idle instead and pulls
    /// any market position back out. Does nothing after an emergency exit.
    ///
    /// # Errors
    /// - `Unauthorized` unless called by governance, the strategist or the keeper
    pub fn adjust_position(env: Env, caller: Address) -> Result<(), StrategyError> {
        require_role(
            &env,
            &caller,
            &[Role::Governance, Role::Strategist, Role::Keeper],
        )?;
        storage::extend_instance_ttl(&env);
        let this = env.current_contract_address();
        let vault = Self::vault_client(&env)?;
        let debt_ratio = vault.strategy_params(&this).debt_ratio;
        Self::adjust(&env, vault.debt_outstanding(&this), debt_ratio)
    }

    // ==========================================================================
    // LIQUIDATION
    // ==========================================================================

    /// Frees want until `amount_needed` sits idle in the strategy, or as
    /// close to it as the position and the market's cash allow.
    ///
    /// # Arguments
    /// * `caller` - The vault, governance or the strategist
    /// * `amount_needed` - Idle want wanted afterwards
    ///
    /// # Returns
    /// The amount now idle up to `amount_needed`, and the shortfall. Partial
    /// liquidity is reported as `shortfall`, never as an error.
    ///
    /// # Errors
    /// - `NegativeAmount` for a negative `amount_needed`
    pub fn liquidate_position(
        env: Env,
        caller: Address,
        amount_needed: i128,
    ) -> Result<Liquidation, StrategyError> {
        require_role(
            &env,
            &caller,
            &[Role::Vault, Role::Governance, Role::Strategist],
        )?;
        Self::liquidate(&env, amount_needed)
    }

    /// Exits the market entirely and returns the resulting idle want.
    ///
    /// # Security
    /// Governance or the strategist only. Leaves the funds in the strategy; the
    /// vault gets them back through `harvest` or `withdraw`.
    pub fn liquidate_all_positions(env: Env, caller: Address) -> Result<i128, StrategyError> {
        require_role(&env, &caller, &[Role::Governance, Role::Strategist])?;
        Self::exit_market(&env)
    }

    /// Vault-only. Liquidates up to `amount_needed` and sends what was freed
    /// to the vault.
    ///
    /// # Returns
    /// What was sent and what could not be freed.
    ///
    /// # Security
    /// `vault.require_auth()`; the vault books the received amount against this
    /// strategy's debt.
    pub fn withdraw(env: Env, amount_needed: i128) -> Result<Liquidation, StrategyError> {
        let vault = storage::vault(&env)?;
        vault.require_auth();
        storage::extend_instance_ttl(&env);

        let result = Self::liquidate(&env, amount_needed)?;
        if result.liquidated > 0 {
            Self::want_client(&env)?.transfer(
                &env.current_contract_address(),
                &vault,
                &result.liquidated,
            );
        }
        Ok(result)
    }

    /// Vault-only. Exits the market and hands every want and reward token
    /// held to `new_strategy`.
    pub fn migrate(env: Env, new_strategy: Address) -> Result<(), StrategyError> {
        storage::vault(&env)?.require_auth();
        let this = env.current_contract_address();

        let want = Self::exit_market(&env)?;
        if want > 0 {
            Self::want_client(&env)?.transfer(&this, &new_strategy, &want);
        }
        let rewards = Self::reward_balance(&env)?;
        if rewards > 0 {
            token::Client::new(&env, &storage::reward_token(&env)?).transfer(
                &this,
                &new_strategy,
                &rewards,
            );
        }
        Ok(())
    }

    // ==========================================================================
    // REWARDS
    // ==========================================================================

    /// Claims accrued market rewards into the strategy.
    ///
    /// # Returns
    /// The reward tokens claimed.
    pub fn get_rewards(env: Env, caller: Address) -> Result<i128, StrategyError> {
        require_role(
            &env,
            &caller,
            &[Role::Governance, Role::Strategist, Role::Keeper],
        )?;
        Self::claim_rewards(&env)
    }

    /// Sells the whole reward balance for want through the router.
    ///
    /// The minimum accepted output is the router's own quote less
    /// `max_slippage`, and the swap must settle within `SWAP_DEADLINE` seconds.
    ///
    /// # Returns
    /// The want received, or zero when there was nothing to sell.
    ///
    /// # Errors
    /// - `InvalidQuote` if the router quotes nothing
    /// - `SwapFailed` if the router rejects the swap
    /// - `SlippageExceeded` if less than the minimum arrived
    ///
    /// # Events
    /// Emits `RewardsSwappedEvent` under `swapped`.
    pub fn swap_rewards_to_want(env: Env, caller: Address) -> Result<i128, StrategyError> {
        require_role(
            &env,
            &caller,
            &[Role::Governance, Role::Strategist, Role::Keeper],
        )?;
        Self::swap_rewards(&env)
    }

    // ==========================================================================
    // STATE FLAGS
    // ==========================================================================

    /// Switches on emergency exit. There is no way back.
    ///
    /// The next harvest exits the market and claims rewards without selling them;
    /// later harvests never reinvest. The vault keeps lending to the strategy
    /// until governance also revokes it.
    ///
    /// # Events
    /// Emits `StateChangedEvent` under `emergency`.
    ///
    /// # Security
    /// Governance or the strategist only.
    pub fn set_emergency_exit(env: Env, caller: Address) -> Result<(), StrategyError> {
        require_role(&env, &caller, &[Role::Governance, Role::Strategist])?;
        storage::set_emergency_exit(&env);
        log!(&env, "emergency exit enabled");

        env.events()
            .publish((symbol_short!("emergency"),), StateChangedEvent { caller });
        Ok(())
    }

    /// Blocks `harvest` until `unpause_work`. Liquidations and vault
    /// withdrawals keep working.
    ///
    /// # Events
    /// Emits `StateChangedEvent` under `paused`.
    pub fn pause_work(env: Env, caller: Address) -> Result<(), StrategyError> {
        require_role(&env, &caller, &[Role::Governance, Role::Strategist])?;
        storage::set_paused(&env, true);

        env.events()
            .publish((symbol_short!("paused"),), StateChangedEvent { caller });
        Ok(())
    }

    /// Lifts a pause.
    ///
    /// # Events
    /// Emits `StateChangedEvent` under `unpaused`.
    pub fn unpause_work(env: Env, caller: Address) -> Result<(), StrategyError> {
        require_role(&env, &caller, &[Role::Governance, Role::Strategist])?;
        storage::set_paused(&env, false);

        env.events()
            .publish((symbol_short!("unpaused"),), StateChangedEvent { caller });
        Ok(())
    }

    // ==========================================================================
    // CONFIGURATION
    // ==========================================================================

    /// Hands the strategist role to `strategist`.
    ///
    /// # Events
    /// Emits `RoleChangedEvent` under `set_strat`.
    ///
    /// # Security
    /// Governance or the current strategist only.
    pub fn set_strategist(env: Env, caller: Address, strategist: Address) -> Result<(), StrategyError> {
        require_role(&env, &caller, &[Role::Governance, Role::Strategist])?;
        let old_holder = storage::strategist(&env)?;
        storage::set_strategist(&env, &strategist);

        env.events().publish(
            (symbol_short!("set_strat"),),
            RoleChangedEvent { old_holder, new_holder: strategist },
        );
        Ok(())
    }

    /// Replaces the keeper, the only role whose harvests wait out `report_delay`.
    ///
    /// # Events
    /// Emits `RoleChangedEvent` under `set_keep`.
    pub fn set_keeper(env: Env, caller: Address, keeper: Address) -> Result<(), StrategyError> {
        require_role(&env, &caller, &[Role::Governance, Role::Strategist])?;
        let old_holder = storage::keeper(&env)?;
        storage::set_keeper(&env, &keeper);

        env.events().publish(
            (symbol_short!("set_keep"),),
            RoleChangedEvent { old_holder, new_holder: keeper },
        );
        Ok(())
    }

    /// Minimum seconds between keeper harvests.
    ///
    /// # Events
    /// Emits `ConfigUpdatedEvent` under `config`.
    pub fn set_report_delay(env: Env, caller: Address, delay: u64) -> Result<(), StrategyError> {
        require_role(&env, &caller, &[Role::Governance, Role::Strategist])?;
        storage::set_report_delay(&env, delay);
        Self::publish_config(&env);
        Ok(())
    }

    /// Reward balance below which harvests keep the rewards instead of selling.
    ///
    /// # Errors
    /// - `NegativeAmount` for a negative `amount`
    ///
    /// # Events
    /// Emits `ConfigUpdatedEvent` under `config`.
    pub fn set_min_reward_to_sell(env: Env, caller: Address, amount: i128) -> Result<(), StrategyError> {
        require_role(&env, &caller, &[Role::Governance, Role::Strategist])?;
        if amount < 0 {
            return Err(StrategyError::NegativeAmount);
        }
        storage::set_min_reward_to_sell(&env, amount);
        Self::publish_config(&env);
        Ok(())
    }

    /// Largest shortfall against the router's quote a reward swap accepts, in bps.
    ///
    /// # Errors
    /// - `InvalidSlippage` above 10_000 bps
    ///
    /// # Events
    /// Emits `ConfigUpdatedEvent` under `config`.
    pub fn set_max_slippage(env: Env, caller: Address, bps: u32) -> Result<(), StrategyError> {
        require_role(&env, &caller, &[Role::Governance, Role::Strategist])?;
        if bps > MAX_BPS {
            return Err(StrategyError::InvalidSlippage);
        }
        storage::set_max_slippage(&env, bps);
        Self::publish_config(&env);
        Ok(())
    }

    // ==========================================================================
    // VIEWS
    // ==========================================================================

    /// The vault's asset.
    pub fn want(env: Env) -> Result<Address, StrategyError> {
        storage::want(&env)
    }

    /// The vault this strategy reports to.
    pub fn vault(env: Env) -> Result<Address, StrategyError> {
        storage::vault(&env)
    }

    /// The yield market the strategy supplies to.
    pub fn market(env: Env) -> Result<Address, StrategyError> {
        storage::market(&env)
    }

    /// Router used to sell rewards.
    pub fn router(env: Env) -> Result<Address, StrategyError> {
        storage::router(&env)
    }

    /// Token the market pays rewards in.
    pub fn reward_token(env: Env) -> Result<Address, StrategyError> {
        storage::reward_token(&env)
    }

    /// Current strategist.
    pub fn strategist(env: Env) -> Result<Address, StrategyError> {
        storage::strategist(&env)
    }

    /// Current keeper.
    pub fn keeper(env: Env) -> Result<Address, StrategyError> {
        storage::keeper(&env)
    }

    /// Seconds a keeper must wait after a report before harvesting again.
    pub fn report_delay(env: Env) -> u64 {
        storage::report_delay(&env)
    }

    /// Smallest reward balance a harvest will sell.
    pub fn min_reward_to_sell(env: Env) -> i128 {
        storage::min_reward_to_sell(&env)
    }

    /// Slippage bound for reward swaps, in bps.
    pub fn max_slippage(env: Env) -> u32 {
        storage::max_slippage(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    /// Whether emergency exit has been switched on.
    pub fn emergency_exit(env: Env) -> bool {
        storage::emergency_exit(&env)
    }

    /// Timestamp of this strategy's last report, as recorded by the vault.
    pub fn last_report(env: Env) -> Result<u64, StrategyError> {
        let params = Self::vault_client(&env)?.strategy_params(&env.current_contract_address());
        Ok(params.last_report)
    }

    /// Idle want plus the underlying value of the market position.
    pub fn estimated_total_assets(env: Env) -> Result<i128, StrategyError> {
        Self::total_assets(&env)
    }

    /// Idle want held by the strategy.
    pub fn want_balance(env: Env) -> Result<i128, StrategyError> {
        Self::want_balance_of(&env)
    }

    /// Market shares held by the strategy.
    pub fn market_balance(env: Env) -> Result<i128, StrategyError> {
        Ok(Self::market_client(&env)?.balance_of(&env.current_contract_address()))
    }

    /// Reward tokens accrued in the market and not yet claimed.
    pub fn unclaimed_rewards(env: Env) -> Result<i128, StrategyError> {
        Ok(Self::market_client(&env)?.rewards_accrued(&env.current_contract_address()))
    }

    // ==========================================================================
    // INTERNAL HELPERS
    // ==========================================================================

    /// Works out `(profit, loss, debt_payment)` against the vault's record,
    /// freeing enough want to pay them.
    fn prepare_return(
        env: &Env,
        debt_outstanding: i128,
        total_debt: i128,
    ) -> Result<(i128, i128, i128), StrategyError> {
        let total_assets = Self::total_assets(env)?;
        let (mut profit, loss) = if total_assets >= total_debt {
            (total_assets - total_debt, 0)
        } else {
            (0, total_debt - total_assets)
        };

        let to_free = profit
            .checked_add(debt_outstanding)
            .ok_or(StrategyError::ArithmeticError)?;
        if to_free > 0 {
            Self::liquidate(env, to_free)?;
        }
        let liquid = Self::want_balance_of(env)?;

        profit = profit.min(liquid);
        let debt_payment = (liquid - profit)
            .min(debt_outstanding)
            .min(total_debt - loss);
        Ok((profit, loss, debt_payment))
    }

    fn adjust(env: &Env, debt_outstanding: i128, debt_ratio: u32) -> Result<(), StrategyError> {
        if storage::emergency_exit(env) {
            return Ok(());
        }
        // a zero ratio holds the vault's unallocated funds uninvested
        if debt_ratio == 0 {
            Self::exit_market(env)?;
            return Ok(());
        }
        let idle = Self::want_balance_of(env)?;
        if idle > debt_outstanding {
            Self::supply(env, idle - debt_outstanding)?;
        } else if idle < debt_outstanding {
            Self::liquidate(env, debt_outstanding)?;
        }
        Ok(())
    }

    fn liquidate(env: &Env, amount_needed: i128) -> Result<Liquidation, StrategyError> {
        if amount_needed < 0 {
            return Err(StrategyError::NegativeAmount);
        }
        let this = env.current_contract_address();

        let idle = Self::want_balance_of(env)?;
        if idle < amount_needed {
            let market = Self::market_client(env)?;
            let position = market.balance_of_underlying(&this);
            let to_free = (amount_needed - idle).min(position).min(market.get_cash());
            if to_free > 0 && to_free == position {
                market.redeem(&this, &market.balance_of(&this));
            } else if to_free > 0 {
                market.redeem_underlying(&this, &to_free);
            }
        }

        let liquidated = amount_needed.min(Self::want_balance_of(env)?);
        let shortfall = amount_needed - liquidated;
        if shortfall > 0 {
            log!(env, "liquidation shortfall", shortfall);
        }
        Ok(Liquidation { liquidated, shortfall })
    }

    fn exit_market(env: &Env) -> Result<i128, StrategyError> {
        let this = env.current_contract_address();
        let market = Self::market_client(env)?;

        let shares = market.balance_of(&this);
        if shares > 0 {
            let position = market.balance_of_underlying(&this);
            let cash = market.get_cash();
            if position <= cash {
                market.redeem(&this, &shares);
            } else if cash > 0 {
                log!(env, "market exit capped by cash", position, cash);
                market.redeem_underlying(&this, &cash);
            }
        }
        Self::want_balance_of(env)
    }

    fn supply(env: &Env, amount: i128) -> Result<(), StrategyError> {
        let market = storage::market(env)?;
        Self::authorize_transfer(env, &storage::want(env)?, &market, amount);
        YieldMarketClient::new(env, &market).supply(&env.current_contract_address(), &amount);
        Ok(())
    }

    fn claim_rewards(env: &Env) -> Result<i128, StrategyError> {
        Ok(Self::market_client(env)?.claim_rewards(&env.current_contract_address()))
    }

    fn swap_rewards(env: &Env) -> Result<i128, StrategyError> {
        let amount_in = Self::reward_balance(env)?;
        if amount_in == 0 {
            return Ok(0);
        }
        let this = env.current_contract_address();
        let reward_token = storage::reward_token(env)?;
        let router_address = storage::router(env)?;
        let router = SwapRouterClient::new(env, &router_address);

        let path = vec![env, reward_token.clone(), storage::want(env)?];
        let quote = router
            .router_get_amounts_out(&amount_in, &path)
            .last()
            .unwrap_or(0);
        if quote <= 0 {
            return Err(StrategyError::InvalidQuote);
        }
        let amount_out_min = quote
            .checked_mul((MAX_BPS - storage::max_slippage(env)) as i128)
            .map(|scaled| scaled / MAX_BPS as i128)
            .ok_or(StrategyError::ArithmeticError)?;
        let deadline = env.ledger().timestamp().saturating_add(SWAP_DEADLINE);

        Self::authorize_transfer(env, &reward_token, &router_address, amount_in);
        let before = Self::want_balance_of(env)?;
        match router.try_swap_exact_tokens_for_tokens(
            &amount_in,
            &amount_out_min,
            &path,
            &this,
            &deadline,
        ) {
            Ok(Ok(_)) => {}
            _ => return Err(StrategyError::SwapFailed),
        }
        let amount_out = Self::want_balance_of(env)? - before;
        if amount_out < amount_out_min {
            return Err(StrategyError::SlippageExceeded);
        }

        env.events().publish(
            (symbol_short!("swapped"),),
            RewardsSwappedEvent { amount_in, amount_out },
        );
        Ok(amount_out)
    }

    /// Pre-authorizes `token.transfer(self, to, amount)` for a contract this
    /// strategy is about to call, which pulls the tokens itself.
    fn authorize_transfer(env: &Env, token: &Address, to: &Address, amount: i128) {
        env.authorize_as_current_contract(vec![
            env,
            InvokerContractAuthEntry::Contract(SubContractInvocation {
                context: ContractContext {
                    contract: token.clone(),
                    fn_name: symbol_short!("transfer"),
                    args: (env.current_contract_address(), to.clone(), amount).into_val(env),
                },
                sub_invocations: vec![env],
            }),
        ]);
    }

    fn publish_config(env: &Env) {
        env.events().publish(
            (symbol_short!("config"),),
            ConfigUpdatedEvent {
                report_delay: storage::report_delay(env),
                min_reward_to_sell: storage::min_reward_to_sell(env),
                max_slippage: storage::max_slippage(env),
            },
        );
    }

    fn total_assets(env: &Env) -> Result<i128, StrategyError> {
        let position = Self::market_client(env)?.balance_of_underlying(&env.current_contract_address());
        Self::want_balance_of(env)?
            .checked_add(position)
            .ok_or(StrategyError::ArithmeticError)
    }

    fn want_balance_of(env: &Env) -> Result<i128, StrategyError> {
        Ok(Self::want_client(env)?.balance(&env.current_contract_address()))
    }

    fn reward_balance(env: &Env) -> Result<i128, StrategyError> {
        Ok(token::Client::new(env, &storage::reward_token(env)?)
            .balance(&env.current_contract_address()))
    }

    fn want_client(env: &Env) -> Result<token::Client<'_>, StrategyError> {
        Ok(token::Client::new(env, &storage::want(env)?))
    }

    fn market_client(env: &Env) -> Result<YieldMarketClient<'_>, StrategyError> {
        Ok(YieldMarketClient::new(env, &storage::market(env)?))
    }

    fn vault_client(env: &Env) -> Result<VaultClient<'_>, StrategyError> {
        Ok(VaultClient::new(env, &storage::vault(env)?))
    }
}

#[cfg(test)]
mod test;
