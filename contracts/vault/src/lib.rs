//! # Harvest Vault Contract
//!
//! An ERC-4626 shaped yield vault. Depositors hand the vault one underlying
//! asset and receive vault shares; governance registers strategies that
//! borrow idle assets from the vault and report profit or loss back to it.
//!
//! ## Share Accounting Model
//!
//! ```text
//! total_assets = total_idle + Σ strategy.total_debt
//! shares       = assets * (total_supply + 1) / (total_assets + 1)
//! assets       = shares * (total_assets + 1) / (total_supply + 1)
//! ```
//!
//! The `+ 1` offsets keep both conversions defined when every asset has been
//! lost while shares are still outstanding; deposits then mint at a steep
//! rate instead of failing.
//!
//! `total_idle` is tracked rather than read from the token balance, so tokens
//! sent to the vault outside `deposit`/`mint`/`report` do not move the share
//! price. Every conversion rounds against the caller: `deposit` and `redeem`
//! round down, `mint` and `withdraw` round up.
//!
//! ## Strategy Lifecycle
//!
//! ```text
//! add_strategy ──► report (harvest) ──► migrate_strategy / revoke_strategy ──► remove_strategy
//!      │                 │
//!      ▼                 ▼
//! withdrawal_queue   credit pushed to strategy / debt repaid to vault
//! ```
//!
//! Each strategy has a `debt_ratio` target (bps of `total_assets`). The sum of
//! all ratios never exceeds 10_000. A strategy registered at ratio zero is
//! credited the unallocated remainder, `10_000 - Σ debt_ratio`, and keeps it
//! uninvested. `revoke_strategy` sets a strategy's limit to zero so its next
//! harvest repays everything. When a withdrawal needs more than the
//! idle balance, strategies are asked for funds in withdrawal-queue order and
//! a partial answer carries the remainder to the next entry.
//!
//! ## Storage Layout
//!
//! ### Instance Storage
//! - `Governance`, `Asset`, `PerformanceFee`
//! - `TotalSupply`, `TotalIdle`, `TotalDebt`, `DebtRatio`, `LastReport`
//! - `WithdrawalQueue`
//!
//! ### Persistent Storage
//! - `Balance(holder)`: share balance
//! - `Allowance(owner, spender)`: share allowance
//! - `Strategy(strategy)`: [`StrategyParams`]

#![no_std]

mod constants;
mod error;
mod events;
mod math;
mod storage;

pub use constants::{MAX_PERFORMANCE_FEE, MAX_STRATEGIES, UNLIMITED_ALLOWANCE};
pub use error::VaultError;
pub use events::*;

use harvest_interfaces::{ReportOutcome, StrategyClient, StrategyParams, MAX_BPS};
use soroban_sdk::{contract, contractimpl, log, symbol_short, token, Address, Env, Vec};

use math::{apply_bps, convert_to_assets, convert_to_shares, Rounding};

// ============================================================================
// CONTRACT
// ============================================================================

#[contract]
pub struct YieldVault;

#[contractimpl]
impl YieldVault {
    // ==========================================================================
    // INITIALIZATION
    // ==========================================================================

    /// Initializes the vault.
    ///
    /// # Arguments
    /// * `governance` - Admin address; also receives performance-fee shares
    /// * `asset` - The underlying token contract
    /// * `performance_fee` - Default fee for new strategies, in bps
    ///
    /// # Errors
    /// - `AlreadyInitialized` on a second call
    /// - `InvalidFee` if `performance_fee > MAX_PERFORMANCE_FEE`
    pub fn initialize(
        env: Env,
        governance: Address,
        asset: Address,
        performance_fee: u32,
    ) -> Result<(), VaultError> {
        if storage::is_initialized(&env) {
            return Err(VaultError::AlreadyInitialized);
        }
        if performance_fee > MAX_PERFORMANCE_FEE {
            return Err(VaultError::InvalidFee);
        }

        storage::set_governance(&env, &governance);
        storage::set_asset(&env, &asset);
        storage::set_performance_fee(&env, performance_fee);
        storage::set_total_supply(&env, 0);
        storage::set_total_idle(&env, 0);
        storage::set_total_debt(&env, 0);
        storage::set_debt_ratio(&env, 0);
        storage::set_withdrawal_queue(&env, &Vec::new(&env));
        storage::set_last_report(&env, env.ledger().timestamp());
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    // ==========================================================================
    // CORE LIFECYCLE - DEPOSIT / MINT
    // ==========================================================================

    /// Pulls `assets` from `caller` and mints the matching shares, rounded
    /// down, to `receiver`.
    ///
    /// # Errors
    /// - `ZeroAmount` / `NegativeAmount` for a non-positive `assets`
    /// - `ZeroShares` if `assets` is worth less than one share
    /// - `TransferFailed` if the asset pull fails
    ///
    /// # Events
    /// Emits `DepositEvent` under `deposit`.
    pub fn deposit(
        env: Env,
        caller: Address,
        assets: i128,
        receiver: Address,
    ) -> Result<i128, VaultError> {
        caller.require_auth();
        storage::extend_instance_ttl(&env);
        Self::require_positive(assets)?;

        let shares = Self::shares_for(&env, assets, Rounding::Floor)?;
        if shares == 0 {
            return Err(VaultError::ZeroShares);
        }

        Self::settle_deposit(&env, &caller, &receiver, assets, shares)?;
        Ok(shares)
    }

    /// Mints exactly `shares` to `receiver`, pulling their asset value,
    /// rounded up, from `caller`.
    ///
    /// # Arguments
    /// * `caller` - Pays the assets; must authorize
    /// * `shares` - Shares to mint
    /// * `receiver` - Receives the shares
    ///
    /// # Returns
    /// The assets pulled from `caller`.
    ///
    /// # Errors
    /// - `ZeroAmount` / `NegativeAmount` for a non-positive `shares`
    /// - `ZeroAssets` if the shares are worth nothing
    /// - `TransferFailed` if the asset pull fails
    ///
    /// # Events
    /// Emits `DepositEvent` under `deposit`.
    pub fn mint(
        env: Env,
        caller: Address,
        shares: i128,
        receiver: Address,
    ) -> Result<i128, VaultError> {
        caller.require_auth();
        storage::extend_instance_ttl(&env);
        Self::require_positive(shares)?;

        let assets = Self::assets_for(&env, shares, Rounding::Ceiling)?;
        if assets == 0 {
            return Err(VaultError::ZeroAssets);
        }

        Self::settle_deposit(&env, &caller, &receiver, assets, shares)?;
        Ok(assets)
    }

    // ==========================================================================
    // CORE LIFECYCLE - WITHDRAW / REDEEM
    // ==========================================================================

    /// Sends exactly `assets` to `receiver`, burning the matching shares,
    /// rounded up, from `owner`.
    ///
    /// When `caller != owner` the burned shares are spent from
    /// `allowance(owner, caller)`. If the vault's idle balance cannot cover
    /// `assets`, the remainder is pulled from strategies in withdrawal-queue
    /// order.
    ///
    /// # Errors
    /// - `ExceedsMaxWithdraw` above `max_withdraw(owner)`
    /// - `InsufficientAllowance` when a third party's allowance is too small
    /// - `InsufficientLiquidity` if idle plus every strategy cannot cover `assets`
    ///
    /// # Events
    /// Emits `WithdrawEvent` under `withdraw`.
    pub fn withdraw(
        env: Env,
        caller: Address,
        assets: i128,
        receiver: Address,
        owner: Address,
    ) -> Result<i128, VaultError> {
        caller.require_auth();
        storage::extend_instance_ttl(&env);
        Self::require_positive(assets)?;

        if assets > Self::max_withdraw(env.clone(), owner.clone())? {
            return Err(VaultError::ExceedsMaxWithdraw);
        }
        let shares = Self::shares_for(&env, assets, Rounding::Ceiling)?;

        Self::settle_withdrawal(&env, &caller, &receiver, &owner, assets, shares)?;
        Ok(shares)
    }

    /// Burns exactly `shares` from `owner` and sends their asset value,
    /// rounded down, to `receiver`.
    ///
    /// # Arguments
    /// * `caller` - Must authorize; spends `allowance(owner, caller)` when not `owner`
    /// * `shares` - Shares to burn
    /// * `receiver` - Receives the assets
    /// * `owner` - Holder of the shares
    ///
    /// # Returns
    /// The assets sent to `receiver`.
    ///
    /// # Errors
    /// - `ExceedsMaxRedeem` above `owner`'s share balance
    /// - `ZeroAssets` if the shares are worth nothing
    /// - `InsufficientAllowance` when a third party's allowance is too small
    /// - `InsufficientLiquidity` if idle plus every strategy cannot cover the assets
    ///
    /// # Events
    /// Emits `WithdrawEvent` under `withdraw`.
    ///
    /// # Security
    /// Shares and allowance are settled before any strategy is asked for funds.
    pub fn redeem(
        env: Env,
        caller: Address,
        shares: i128,
        receiver: Address,
        owner: Address,
    ) -> Result<i128, VaultError> {
        caller.require_auth();
        storage::extend_instance_ttl(&env);
        Self::require_positive(shares)?;

        if shares > storage::balance(&env, &owner) {
            return Err(VaultError::ExceedsMaxRedeem);
        }
        let assets = Self::assets_for(&env, shares, Rounding::Floor)?;
        if assets == 0 {
            return Err(VaultError::ZeroAssets);
        }

        Self::settle_withdrawal(&env, &caller, &receiver, &owner, assets, shares)?;
        Ok(assets)
    }

    // ==========================================================================
    // ERC-4626 VIEWS
    // ==========================================================================

    /// No issuance cap is enforced.
    pub fn max_deposit(_env: Env, _receiver: Address) -> i128 {
        i128::MAX
    }

    /// No issuance cap is enforced.
    pub fn max_mint(_env: Env, _receiver: Address) -> i128 {
        i128::MAX
    }

    /// Asset value of the owner's full share balance, rounded down.
    pub fn max_withdraw(env: Env, owner: Address) -> Result<i128, VaultError> {
        let shares = storage::balance(&env, &owner);
        Self::assets_for(&env, shares, Rounding::Floor)
    }

    /// The owner's full share balance.
    pub fn max_redeem(env: Env, owner: Address) -> i128 {
        storage::balance(&env, &owner)
    }

    /// Shares `assets` is worth at the current exchange rate, rounded down.
    ///
    /// # Errors
    /// - `NegativeAmount` for a negative `assets`
    /// - `ArithmeticError` if the result does not fit in `i128`
    pub fn convert_to_shares(env: Env, assets: i128) -> Result<i128, VaultError> {
        Self::shares_for(&env, assets, Rounding::Floor)
    }

    /// Assets `shares` is worth at the current exchange rate, rounded down.
    pub fn convert_to_assets(env: Env, shares: i128) -> Result<i128, VaultError> {
        Self::assets_for(&env, shares, Rounding::Floor)
    }

    /// Shares `deposit(assets)` would mint right now.
    pub fn preview_deposit(env: Env, assets: i128) -> Result<i128, VaultError> {
        Self::shares_for(&env, assets, Rounding::Floor)
    }

    /// Assets `mint(shares)` would pull right now.
    pub fn preview_mint(env: Env, shares: i128) -> Result<i128, VaultError> {
        Self::assets_for(&env, shares, Rounding::Ceiling)
    }

    /// Shares `withdraw(assets)` would burn right now.
    pub fn preview_withdraw(env: Env, assets: i128) -> Result<i128, VaultError> {
        Self::shares_for(&env, assets, Rounding::Ceiling)
    }

    /// Assets `redeem(shares)` would pay out right now.
    pub fn preview_redeem(env: Env, shares: i128) -> Result<i128, VaultError> {
        Self::assets_for(&env, shares, Rounding::Floor)
    }

    /// Idle assets plus the debt every strategy holds.
    ///
    /// Losses only show up here once a strategy reports them.
    pub fn total_assets(env: Env) -> Result<i128, VaultError> {
        Self::total_assets_of(&env)
    }

    /// Assets held by the vault itself.
    pub fn total_idle(env: Env) -> i128 {
        storage::total_idle(&env)
    }

    /// Assets lent out to strategies.
    pub fn total_debt(env: Env) -> i128 {
        storage::total_debt(&env)
    }

    /// Sum of the debt ratios of all registered strategies.
    pub fn debt_ratio(env: Env) -> u32 {
        storage::debt_ratio(&env)
    }

    /// The underlying token contract.
    pub fn asset(env: Env) -> Result<Address, VaultError> {
        storage::asset(&env)
    }

    /// Current governance address.
    pub fn governance(env: Env) -> Result<Address, VaultError> {
        storage::governance(&env)
    }

    /// Default fee, in bps, for strategies added from now on.
    pub fn performance_fee(env: Env) -> u32 {
        storage::performance_fee(&env)
    }

    /// Timestamp of the most recent report by any strategy.
    pub fn last_report(env: Env) -> u64 {
        storage::last_report(&env)
    }

    // ==========================================================================
    // SHARE LEDGER
    // ==========================================================================

    /// Share balance of `id`.
    pub fn balance(env: Env, id: Address) -> i128 {
        storage::balance(&env, &id)
    }

    /// Shares in existence, fee shares included.
    pub fn total_supply(env: Env) -> i128 {
        storage::total_supply(&env)
    }

    /// Shares `spender` may still move or redeem on behalf of `owner`.
    pub fn allowance(env: Env, owner: Address, spender: Address) -> i128 {
        storage::allowance(&env, &owner, &spender)
    }

    /// Sets the share allowance of `spender` over `owner`'s shares.
    /// `UNLIMITED_ALLOWANCE` is never decremented.
    ///
    /// # Errors
    /// - `NegativeAmount` for a negative `amount`
    ///
    /// # Events
    /// Emits `ApprovalEvent` under `approve`.
    pub fn approve(
        env: Env,
        owner: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), VaultError> {
        owner.require_auth();
        if amount < 0 {
            return Err(VaultError::NegativeAmount);
        }
        storage::extend_instance_ttl(&env);
        storage::set_allowance(&env, &owner, &spender, amount);

        env.events().publish(
            (symbol_short!("approve"),),
            ApprovalEvent { owner, spender, amount },
        );
        Ok(())
    }

    /// Moves `amount` shares from `from` to `to`.
    ///
    /// # Errors
    /// - `ZeroAmount` / `NegativeAmount` for a non-positive `amount`
    /// - `InsufficientBalance` if `from` holds fewer shares
    ///
    /// # Events
    /// Emits `TransferEvent` under `transfer`.
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), VaultError> {
        from.require_auth();
        Self::require_positive(amount)?;
        storage::extend_instance_ttl(&env);
        Self::move_shares(&env, &from, &to, amount)
    }

    /// Moves `amount` of `from`'s shares to `to`, spending `spender`'s allowance.
    ///
    /// # Errors
    /// - `InsufficientAllowance` if the allowance is too small
    /// - `InsufficientBalance` if `from` holds fewer shares
    ///
    /// # Events
    /// Emits `TransferEvent` under `transfer`.
    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), VaultError> {
        spender.require_auth();
        Self::require_positive(amount)?;
        storage::extend_instance_ttl(&env);
        Self::spend_allowance(&env, &from, &spender, amount)?;
        Self::move_shares(&env, &from, &to, amount)
    }

    // ==========================================================================
    // STRATEGY REGISTRY
    // ==========================================================================

    /// Registers `strategy` at the tail of the withdrawal queue.
    ///
    /// # Errors
    /// - `StrategyAlreadyActive` if it is already registered
    /// - `QueueFull` once `MAX_STRATEGIES` are registered
    /// - `DebtRatioLimit` if the summed debt ratio would exceed 10_000
    /// - `StrategyMismatch` if the strategy manages another asset or vault
    ///
    /// # Events
    /// Emits `StrategyConfigEvent` under `strat_add`.
    pub fn add_strategy(env: Env, strategy: Address, debt_ratio: u32) -> Result<(), VaultError> {
        Self::require_governance(&env)?;
        storage::extend_instance_ttl(&env);

        if storage::strategy(&env, &strategy).is_some() {
            return Err(VaultError::StrategyAlreadyActive);
        }
        let mut queue = storage::withdrawal_queue(&env);
        if queue.len() >= MAX_STRATEGIES {
            return Err(VaultError::QueueFull);
        }
        let total_ratio = storage::debt_ratio(&env) + debt_ratio;
        if total_ratio > MAX_BPS {
            return Err(VaultError::DebtRatioLimit);
        }
        Self::require_matching_strategy(&env, &strategy)?;

        let now = env.ledger().timestamp();
        let performance_fee = storage::performance_fee(&env);
        storage::set_strategy(
            &env,
            &strategy,
            &StrategyParams {
                performance_fee,
                activation: now,
                debt_ratio,
                revoked: false,
                total_debt: 0,
                total_gain: 0,
                total_loss: 0,
                last_report: now,
            },
        );
        queue.push_back(strategy.clone());
        storage::set_withdrawal_queue(&env, &queue);
        storage::set_debt_ratio(&env, total_ratio);

        env.events().publish(
            (symbol_short!("strat_add"),),
            StrategyConfigEvent { strategy, debt_ratio, performance_fee },
        );
        Ok(())
    }

    /// Changes the debt ratio of an active strategy and clears any revocation.
    ///
    /// Lowering the ratio leaves the excess as `debt_outstanding`, repaid on the
    /// strategy's next harvest. Setting it to zero makes the strategy the holder of
    /// the vault's unallocated remainder.
    ///
    /// # Errors
    /// - `StrategyNotActive` for an unregistered strategy
    /// - `DebtRatioLimit` if the summed ratio would exceed 10_000
    ///
    /// # Events
    /// Emits `StrategyConfigEvent` under `strat_upd`.
    ///
    /// # Security
    /// Governance only.
    pub fn update_strategy_debt_ratio(
        env: Env,
        strategy: Address,
        debt_ratio: u32,
    ) -> Result<(), VaultError> {
        Self::require_governance(&env)?;
        let mut params = Self::active_strategy(&env, &strategy)?;

        let total_ratio = storage::debt_ratio(&env) - params.debt_ratio + debt_ratio;
        if total_ratio > MAX_BPS {
            return Err(VaultError::DebtRatioLimit);
        }
        params.debt_ratio = debt_ratio;
        params.revoked = false;
        storage::set_strategy(&env, &strategy, &params);
        storage::set_debt_ratio(&env, total_ratio);

        env.events().publish(
            (symbol_short!("strat_upd"),),
            StrategyConfigEvent {
                strategy,
                debt_ratio,
                performance_fee: params.performance_fee,
            },
        );
        Ok(())
    }

    /// Changes the fee charged on the strategy's future gains.
    ///
    /// # Errors
    /// - `InvalidFee` above `MAX_PERFORMANCE_FEE`
    /// - `StrategyNotActive` for an unregistered strategy
    ///
    /// # Events
    /// Emits `StrategyConfigEvent` under `strat_upd`.
    pub fn update_strategy_performance_fee(
        env: Env,
        strategy: Address,
        performance_fee: u32,
    ) -> Result<(), VaultError> {
        Self::require_governance(&env)?;
        if performance_fee > MAX_PERFORMANCE_FEE {
            return Err(VaultError::InvalidFee);
        }
        let mut params = Self::active_strategy(&env, &strategy)?;
        params.performance_fee = performance_fee;
        storage::set_strategy(&env, &strategy, &params);

        env.events().publish(
            (symbol_short!("strat_upd"),),
            StrategyConfigEvent {
                strategy,
                debt_ratio: params.debt_ratio,
                performance_fee,
            },
        );
        Ok(())
    }

    /// Sets the strategy's debt limit to zero so its next harvest repays
    /// everything it holds.
    ///
    /// # Arguments
    /// * `caller` - Governance or the strategy itself; must authorize
    /// * `strategy` - The strategy to wind down
    ///
    /// # Errors
    /// - `Unauthorized` for any other caller
    /// - `StrategyNotActive` for an unregistered strategy
    ///
    /// # Events
    /// Emits `StrategyRemovedEvent` under `strat_rev`.
    pub fn revoke_strategy(env: Env, caller: Address, strategy: Address) -> Result<(), VaultError> {
        caller.require_auth();
        if caller != strategy && caller != storage::governance(&env)? {
            return Err(VaultError::Unauthorized);
        }
        let mut params = Self::active_strategy(&env, &strategy)?;

        storage::set_debt_ratio(&env, storage::debt_ratio(&env) - params.debt_ratio);
        params.debt_ratio = 0;
        params.revoked = true;
        storage::set_strategy(&env, &strategy, &params);

        env.events().publish(
            (symbol_short!("strat_rev"),),
            StrategyRemovedEvent { strategy },
        );
        Ok(())
    }

    /// Unregisters a strategy that no longer holds any debt and compacts the
    /// withdrawal queue.
    ///
    /// # Errors
    /// - `StrategyNotActive` for an unregistered strategy
    /// - `StrategyHasDebt` while `total_debt` is not zero
    ///
    /// # Events
    /// Emits `StrategyRemovedEvent` under `strat_rm`.
    pub fn remove_strategy(env: Env, strategy: Address) -> Result<(), VaultError> {
        Self::require_governance(&env)?;
        let params = Self::active_strategy(&env, &strategy)?;
        if params.total_debt != 0 {
            return Err(VaultError::StrategyHasDebt);
        }

        let mut compacted = Vec::new(&env);
        for entry in storage::withdrawal_queue(&env).iter() {
            if entry != strategy {
                compacted.push_back(entry);
            }
        }
        storage::set_withdrawal_queue(&env, &compacted);
        storage::set_debt_ratio(&env, storage::debt_ratio(&env) - params.debt_ratio);
        storage::remove_strategy(&env, &strategy);

        env.events().publish(
            (symbol_short!("strat_rm"),),
            StrategyRemovedEvent { strategy },
        );
        Ok(())
    }

    /// Replaces `old_strategy` with `new_strategy` in place.
    ///
    /// The new strategy inherits the debt ratio, fee, outstanding debt and
    /// last report time; the old strategy hands over its whole position
    /// through `migrate`.
    ///
    /// # Events
    /// Emits `StrategyMigratedEvent` under `migrated`.
    pub fn migrate_strategy(
        env: Env,
        old_strategy: Address,
        new_strategy: Address,
    ) -> Result<(), VaultError> {
        Self::require_governance(&env)?;
        storage::extend_instance_ttl(&env);

        let old = Self::active_strategy(&env, &old_strategy)?;
        if storage::strategy(&env, &new_strategy).is_some() {
            return Err(VaultError::StrategyAlreadyActive);
        }
        Self::require_matching_strategy(&env, &new_strategy)?;

        let mut queue = storage::withdrawal_queue(&env);
        let index = queue
            .first_index_of(&old_strategy)
            .ok_or(VaultError::StrategyNotActive)?;
        queue.set(index, new_strategy.clone());
        storage::set_withdrawal_queue(&env, &queue);

        storage::set_strategy(
            &env,
            &new_strategy,
            &StrategyParams {
                performance_fee: old.performance_fee,
                activation: old.last_report,
                debt_ratio: old.debt_ratio,
                revoked: old.revoked,
                total_debt: old.total_debt,
                total_gain: 0,
                total_loss: 0,
                last_report: old.last_report,
            },
        );
        storage::remove_strategy(&env, &old_strategy);

        StrategyClient::new(&env, &old_strategy).migrate(&new_strategy);

        env.events().publish(
            (symbol_short!("migrated"),),
            StrategyMigratedEvent {
                old_strategy,
                new_strategy,
                total_debt: old.total_debt,
            },
        );
        Ok(())
    }

    /// Accounting record of an active strategy.
    ///
    /// # Errors
    /// - `StrategyNotActive` for an unregistered strategy
    pub fn strategy_params(env: Env, strategy: Address) -> Result<StrategyParams, VaultError> {
        Self::active_strategy(&env, &strategy)
    }

    /// Strategy at position `index` of the withdrawal queue.
    ///
    /// # Errors
    /// - `IndexOutOfRange` past the end of the queue
    pub fn withdrawal_queue(env: Env, index: u32) -> Result<Address, VaultError> {
        storage::withdrawal_queue(&env)
            .get(index)
            .ok_or(VaultError::IndexOutOfRange)
    }

    /// Every registered strategy, in withdrawal order.
    pub fn get_withdrawal_queue(env: Env) -> Vec<Address> {
        storage::withdrawal_queue(&env)
    }

    // ==========================================================================
    // STRATEGY REPORTING
    // ==========================================================================

    /// Records a harvest of `strategy`.
    ///
    /// The strategy must already have transferred `gain + debt_payment` to
    /// the vault. The vault then realises `loss` against the strategy's debt,
    /// books `debt_payment` as repaid, mints the performance fee on `gain` to
    /// governance and pushes any fresh credit to the strategy.
    ///
    /// # Errors
    /// - `StrategyNotActive` for an unregistered caller
    /// - `ReportNotFunded` if the promised funds have not arrived
    /// - `LossExceedsDebt` / `DebtPaymentExceedsDebt` if the figures exceed the debt
    ///
    /// # Events
    /// Emits `StrategyReportedEvent` under `report`.
    pub fn report(
        env: Env,
        strategy: Address,
        gain: i128,
        loss: i128,
        debt_payment: i128,
    ) -> Result<ReportOutcome, VaultError> {
        strategy.require_auth();
        storage::extend_instance_ttl(&env);
        if gain < 0 || loss < 0 || debt_payment < 0 {
            return Err(VaultError::NegativeAmount);
        }
        let mut params = Self::active_strategy(&env, &strategy)?;

        let mut total_idle = storage::total_idle(&env);
        let mut total_debt = storage::total_debt(&env);

        let promised = total_idle
            .checked_add(gain)
            .and_then(|v| v.checked_add(debt_payment))
            .ok_or(VaultError::ArithmeticError)?;
        if Self::asset_balance(&env)? < promised {
            return Err(VaultError::ReportNotFunded);
        }

        if loss > params.total_debt {
            return Err(VaultError::LossExceedsDebt);
        }
        params.total_debt -= loss;
        params.total_loss += loss;
        total_debt -= loss;

        if debt_payment > params.total_debt {
            return Err(VaultError::DebtPaymentExceedsDebt);
        }
        params.total_debt -= debt_payment;
        total_debt -= debt_payment;
        params.total_gain += gain;
        total_idle = promised;

        storage::set_total_idle(&env, total_idle);
        storage::set_total_debt(&env, total_debt);

        // Fee shares are priced after the gain is booked and before they are minted.
        let fee_assets = apply_bps(gain, params.performance_fee)?;
        let fee_shares = if fee_assets > 0 {
            Self::shares_for(&env, fee_assets, Rounding::Floor)?
        } else {
            0
        };
        if fee_shares > 0 {
            Self::mint_shares(&env, &storage::governance(&env)?, fee_shares)?;
        }

        let credit = Self::credit_for(&env, &params)?;
        if credit > 0 {
            params.total_debt += credit;
            storage::set_total_debt(&env, total_debt + credit);
            storage::set_total_idle(&env, total_idle - credit);
        }

        let now = env.ledger().timestamp();
        params.last_report = now;
        storage::set_strategy(&env, &strategy, &params);
        storage::set_last_report(&env, now);

        if credit > 0 {
            Self::push_asset(&env, &strategy, credit)?;
        }

        let outcome = ReportOutcome {
            gain,
            loss,
            debt_payment,
            credit,
            debt_outstanding: Self::outstanding_for(&env, &params)?,
            total_debt: params.total_debt,
            fee_shares,
        };

        env.events().publish(
            (symbol_short!("report"),),
            StrategyReportedEvent {
                strategy,
                gain,
                loss,
                debt_payment,
                credit,
                total_debt: params.total_debt,
                fee_shares,
            },
        );
        Ok(outcome)
    }

    /// Idle assets `strategy` may still draw toward its debt limit.
    pub fn credit_available(env: Env, strategy: Address) -> Result<i128, VaultError> {
        let params = Self::active_strategy(&env, &strategy)?;
        Self::credit_for(&env, &params)
    }

    /// Debt `strategy` holds above its limit and should hand back.
    pub fn debt_outstanding(env: Env, strategy: Address) -> Result<i128, VaultError> {
        let params = Self::active_strategy(&env, &strategy)?;
        Self::outstanding_for(&env, &params)
    }

    // ==========================================================================
    // ADMINISTRATIVE
    // ==========================================================================

    /// Hands governance to `new_governance`. Future fee shares go to the new holder.
    ///
    /// # Events
    /// Emits `GovernanceEvent` under `gov_set`.
    ///
    /// # Security
    /// Current governance only. Takes effect immediately.
    pub fn set_governance(env: Env, new_governance: Address) -> Result<(), VaultError> {
        let old_governance = Self::require_governance(&env)?;
        storage::set_governance(&env, &new_governance);

        env.events().publish(
            (symbol_short!("gov_set"),),
            GovernanceEvent { old_governance, new_governance },
        );
        Ok(())
    }

    /// Default fee applied to strategies added from now on.
    ///
    /// # Errors
    /// - `InvalidFee` above `MAX_PERFORMANCE_FEE`
    pub fn set_performance_fee(env: Env, performance_fee: u32) -> Result<(), VaultError> {
        Self::require_governance(&env)?;
        if performance_fee > MAX_PERFORMANCE_FEE {
            return Err(VaultError::InvalidFee);
        }
        storage::set_performance_fee(&env, performance_fee);
        Ok(())
    }

    // ==========================================================================
    // INTERNAL HELPERS
    // ==========================================================================

    fn settle_deposit(
        env: &Env,
        caller: &Address,
        receiver: &Address,
        assets: i128,
        shares: i128,
    ) -> Result<(), VaultError> {
        Self::mint_shares(env, receiver, shares)?;
        let total_idle = storage::total_idle(env)
            .checked_add(assets)
            .ok_or(VaultError::ArithmeticError)?;
        storage::set_total_idle(env, total_idle);

        Self::pull_asset(env, caller, assets)?;

        env.events().publish(
            (symbol_short!("deposit"),),
            DepositEvent {
                caller: caller.clone(),
                receiver: receiver.clone(),
                assets,
                shares,
            },
        );
        Ok(())
    }

    fn settle_withdrawal(
        env: &Env,
        caller: &Address,
        receiver: &Address,
        owner: &Address,
        assets: i128,
        shares: i128,
    ) -> Result<(), VaultError> {
        if caller != owner {
            Self::spend_allowance(env, owner, caller, shares)?;
        }
        Self::burn_shares(env, owner, shares)?;

        let idle = storage::total_idle(env);
        if assets > idle {
            Self::pull_from_strategies(env, assets - idle)?;
        }
        let idle = storage::total_idle(env);
        if idle < assets {
            return Err(VaultError::InsufficientLiquidity);
        }
        storage::set_total_idle(env, idle - assets);

        Self::push_asset(env, receiver, assets)?;

        env.events().publish(
            (symbol_short!("withdraw"),),
            WithdrawEvent {
                caller: caller.clone(),
                receiver: receiver.clone(),
                owner: owner.clone(),
                assets,
                shares,
            },
        );
        Ok(())
    }

    /// Asks strategies, in queue order, for up to `amount` in total. Each is
    /// asked for no more than its debt; what it fails to deliver is asked of
    /// the next one.
    fn pull_from_strategies(env: &Env, amount: i128) -> Result<(), VaultError> {
        let mut remaining = amount;

        for strategy in storage::withdrawal_queue(env).iter() {
            if remaining == 0 {
                break;
            }
            let mut params = Self::active_strategy(env, &strategy)?;
            let request = remaining.min(params.total_debt);
            if request == 0 {
                continue;
            }

            let before = Self::asset_balance(env)?;
            let result = StrategyClient::new(env, &strategy).withdraw(&request);
            let received = Self::asset_balance(env)? - before;
            if result.shortfall > 0 {
                log!(env, "strategy shortfall", strategy, result.shortfall);
            }

            let repaid = received.min(params.total_debt);
            params.total_debt -= repaid;
            storage::set_strategy(env, &strategy, &params);
            storage::set_total_debt(env, storage::total_debt(env) - repaid);
            storage::set_total_idle(env, storage::total_idle(env) + received);

            remaining = (remaining - received).max(0);
        }
        Ok(())
    }

    /// Most a strategy may hold. A revoked strategy may hold nothing; one at
    /// ratio zero may hold the share of `total_assets` no ratio claims.
    fn debt_limit(env: &Env, params: &StrategyParams) -> Result<i128, VaultError> {
        if params.revoked {
            return Ok(0);
        }
        let ratio = match params.debt_ratio {
            0 => MAX_BPS.saturating_sub(storage::debt_ratio(env)),
            ratio => ratio,
        };
        apply_bps(Self::total_assets_of(env)?, ratio)
    }

    fn credit_for(env: &Env, params: &StrategyParams) -> Result<i128, VaultError> {
        let limit = Self::debt_limit(env, params)?;
        if limit <= params.total_debt {
            return Ok(0);
        }
        Ok((limit - params.total_debt).min(storage::total_idle(env)))
    }

    fn outstanding_for(env: &Env, params: &StrategyParams) -> Result<i128, VaultError> {
        let limit = Self::debt_limit(env, params)?;
        Ok((params.total_debt - limit).max(0))
    }

    fn total_assets_of(env: &Env) -> Result<i128, VaultError> {
        storage::total_idle(env)
            .checked_add(storage::total_debt(env))
            .ok_or(VaultError::ArithmeticError)
    }

    fn shares_for(env: &Env, assets: i128, rounding: Rounding) -> Result<i128, VaultError> {
        convert_to_shares(
            env,
            assets,
            Self::total_assets_of(env)?,
            storage::total_supply(env),
            rounding,
        )
    }

    fn assets_for(env: &Env, shares: i128, rounding: Rounding) -> Result<i128, VaultError> {
        convert_to_assets(
            env,
            shares,
            Self::total_assets_of(env)?,
            storage::total_supply(env),
            rounding,
        )
    }

    fn mint_shares(env: &Env, to: &Address, shares: i128) -> Result<(), VaultError> {
        let balance = storage::balance(env, to)
            .checked_add(shares)
            .ok_or(VaultError::ArithmeticError)?;
        let supply = storage::total_supply(env)
            .checked_add(shares)
            .ok_or(VaultError::ArithmeticError)?;
        storage::set_balance(env, to, balance);
        storage::set_total_supply(env, supply);
        Ok(())
    }

    fn burn_shares(env: &Env, from: &Address, shares: i128) -> Result<(), VaultError> {
        let balance = storage::balance(env, from);
        if balance < shares {
            return Err(VaultError::InsufficientBalance);
        }
        storage::set_balance(env, from, balance - shares);
        storage::set_total_supply(env, storage::total_supply(env) - shares);
        Ok(())
    }

    fn move_shares(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), VaultError> {
        let from_balance = storage::balance(env, from);
        if from_balance < amount {
            return Err(VaultError::InsufficientBalance);
        }
        storage::set_balance(env, from, from_balance - amount);
        storage::set_balance(env, to, storage::balance(env, to) + amount);

        env.events().publish(
            (symbol_short!("transfer"),),
            TransferEvent {
                from: from.clone(),
                to: to.clone(),
                amount,
            },
        );
        Ok(())
    }

    fn spend_allowance(
        env: &Env,
        owner: &Address,
        spender: &Address,
        amount: i128,
    ) -> Result<(), VaultError> {
        let allowance = storage::allowance(env, owner, spender);
        if allowance == UNLIMITED_ALLOWANCE {
            return Ok(());
        }
        if allowance < amount {
            return Err(VaultError::InsufficientAllowance);
        }
        storage::set_allowance(env, owner, spender, allowance - amount);
        Ok(())
    }

    fn asset_balance(env: &Env) -> Result<i128, VaultError> {
        let asset = storage::asset(env)?;
        Ok(token::Client::new(env, &asset).balance(&env.current_contract_address()))
    }

    fn pull_asset(env: &Env, from: &Address, amount: i128) -> Result<(), VaultError> {
        let asset = storage::asset(env)?;
        match token::Client::new(env, &asset).try_transfer(
            from,
            &env.current_contract_address(),
            &amount,
        ) {
            Ok(Ok(())) => Ok(()),
            _ => Err(VaultError::TransferFailed),
        }
    }

    fn push_asset(env: &Env, to: &Address, amount: i128) -> Result<(), VaultError> {
        let asset = storage::asset(env)?;
        match token::Client::new(env, &asset).try_transfer(
            &env.current_contract_address(),
            to,
            &amount,
        ) {
            Ok(Ok(())) => Ok(()),
            _ => Err(VaultError::TransferFailed),
        }
    }

    fn require_matching_strategy(env: &Env, strategy: &Address) -> Result<(), VaultError> {
        let client = StrategyClient::new(env, strategy);
        if client.want() != storage::asset(env)? || client.vault() != env.current_contract_address() {
            return Err(VaultError::StrategyMismatch);
        }
        Ok(())
    }

    fn active_strategy(env: &Env, strategy: &Address) -> Result<StrategyParams, VaultError> {
        storage::strategy(env, strategy).ok_or(VaultError::StrategyNotActive)
    }

    /// Requires governance authorization and returns the governance address.
    #[inline]
    fn require_governance(env: &Env) -> Result<Address, VaultError> {
        let governance = storage::governance(env)?;
        governance.require_auth();
        Ok(governance)
    }

    #[inline]
    fn require_positive(amount: i128) -> Result<(), VaultError> {
        match amount {
            a if a < 0 => Err(VaultError::NegativeAmount),
            0 => Err(VaultError::ZeroAmount),
            _ => Ok(()),
        }
    }
}
