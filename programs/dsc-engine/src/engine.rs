//! Position facade
//!
//! `DscEngine` owns the collateral registry, the position ledger and the debt
//! token. Every mutating call runs inside `atomic`: ledger writes are
//! journaled, health is re-checked against fresh prices and the token
//! movements are settled last. Any failure rolls the whole call back.

use solana_program::{clock::Clock, msg, pubkey::Pubkey};

use crate::{
    error::DscEngineError,
    events::{CollateralDeposited, CollateralRedeemed, DscBurned, DscMinted, Event},
    health,
    interfaces::{DebtToken, FungibleAsset, PriceFeed},
    math::{checked_add, mul_div},
    oracle::PriceOracle,
    reentrancy_guard::ReentrancyGuard,
    settlement::{Inbound, Outbound, SettlementPlan},
    state::{AssetRegistry, EngineConfig, PositionLedger},
};

/// Debt and collateral value of one account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountInformation {
    pub total_dsc_minted: u128,
    pub collateral_value_in_usd: u128,
}

pub struct DscEngine<T, A, F> {
    engine_id: Pubkey,
    config: EngineConfig,
    oracle: PriceOracle,
    pub(crate) registry: AssetRegistry<A, F>,
    pub(crate) debt_token: T,
    pub(crate) ledger: PositionLedger,
    guard: ReentrancyGuard,
}

impl<T, A, F> DscEngine<T, A, F>
where
    T: DebtToken,
    A: FungibleAsset,
    F: PriceFeed,
{
    /// Build an engine over a fixed set of collateral assets
    ///
    /// `tokens` and `price_feeds` are matched by position. `engine_id` is the
    /// identity the engine uses towards the token services, so the debt token
    /// must be bound to it as its minter.
    pub fn new(
        engine_id: Pubkey,
        tokens: Vec<(Pubkey, A)>,
        price_feeds: Vec<F>,
        debt_token: T,
        config: EngineConfig,
    ) -> Result<Self, DscEngineError> {
        config.validate()?;
        let registry = AssetRegistry::new(tokens, price_feeds)?;

        msg!(
            "DSC engine {} initialized with {} collateral assets",
            engine_id,
            registry.len()
        );

        Ok(Self {
            engine_id,
            config,
            oracle: PriceOracle::new(config.stale_price_timeout),
            registry,
            debt_token,
            ledger: PositionLedger::new(),
            guard: ReentrancyGuard::new(),
        })
    }

    pub fn deposit_collateral(
        &mut self,
        caller: &Pubkey,
        asset: &Pubkey,
        amount: u128,
        clock: &Clock,
    ) -> Result<(), DscEngineError> {
        msg!("Depositing {} of {} for {}", amount, asset, caller);

        self.atomic(|engine| {
            let mut plan = SettlementPlan::new();
            engine.stage_deposit(caller, asset, amount, &mut plan)?;
            engine.ensure_account_healthy(caller, clock)?;
            engine.settle(plan)?;

            CollateralDeposited {
                user: *caller,
                asset: *asset,
                amount,
            }
            .emit();
            Ok(())
        })
    }

    pub fn mint_dsc(
        &mut self,
        caller: &Pubkey,
        amount: u128,
        clock: &Clock,
    ) -> Result<(), DscEngineError> {
        msg!("Minting {} DSC for {}", amount, caller);

        self.atomic(|engine| {
            let mut plan = SettlementPlan::new();
            let total_debt = engine.stage_mint(caller, amount, &mut plan)?;
            engine.ensure_account_healthy(caller, clock)?;
            engine.settle(plan)?;

            DscMinted {
                user: *caller,
                amount,
                total_debt,
            }
            .emit();
            Ok(())
        })
    }

    /// Deposit then mint as one operation
    pub fn deposit_collateral_and_mint_dsc(
        &mut self,
        caller: &Pubkey,
        asset: &Pubkey,
        collateral_amount: u128,
        dsc_amount: u128,
        clock: &Clock,
    ) -> Result<(), DscEngineError> {
        msg!(
            "Depositing {} of {} and minting {} DSC for {}",
            collateral_amount,
            asset,
            dsc_amount,
            caller
        );

        self.atomic(|engine| {
            let mut plan = SettlementPlan::new();
            engine.stage_deposit(caller, asset, collateral_amount, &mut plan)?;
            let total_debt = engine.stage_mint(caller, dsc_amount, &mut plan)?;
            engine.ensure_account_healthy(caller, clock)?;
            engine.settle(plan)?;

            CollateralDeposited {
                user: *caller,
                asset: *asset,
                amount: collateral_amount,
            }
            .emit();
            DscMinted {
                user: *caller,
                amount: dsc_amount,
                total_debt,
            }
            .emit();
            Ok(())
        })
    }

    pub fn redeem_collateral(
        &mut self,
        caller: &Pubkey,
        asset: &Pubkey,
        amount: u128,
        clock: &Clock,
    ) -> Result<(), DscEngineError> {
        msg!("Redeeming {} of {} for {}", amount, asset, caller);

        self.atomic(|engine| {
            let mut plan = SettlementPlan::new();
            engine.stage_withdraw(caller, asset, amount, caller, &mut plan)?;
            engine.ensure_account_healthy(caller, clock)?;
            engine.settle(plan)?;

            CollateralRedeemed {
                from: *caller,
                to: *caller,
                asset: *asset,
                amount,
            }
            .emit();
            Ok(())
        })
    }

    pub fn burn_dsc(
        &mut self,
        caller: &Pubkey,
        amount: u128,
        clock: &Clock,
    ) -> Result<(), DscEngineError> {
        msg!("Burning {} DSC for {}", amount, caller);

        self.atomic(|engine| {
            let mut plan = SettlementPlan::new();
            let total_debt = engine.stage_burn(caller, caller, amount, &mut plan)?;
            engine.ensure_account_healthy(caller, clock)?;
            engine.settle(plan)?;

            DscBurned {
                on_behalf_of: *caller,
                payer: *caller,
                amount,
                total_debt,
            }
            .emit();
            Ok(())
        })
    }

    /// Burn then redeem as one operation, so the health check sees the reduced debt
    pub fn redeem_collateral_for_dsc(
        &mut self,
        caller: &Pubkey,
        asset: &Pubkey,
        collateral_amount: u128,
        dsc_amount: u128,
        clock: &Clock,
    ) -> Result<(), DscEngineError> {
        msg!(
            "Burning {} DSC and redeeming {} of {} for {}",
            dsc_amount,
            collateral_amount,
            asset,
            caller
        );

        self.atomic(|engine| {
            let mut plan = SettlementPlan::new();
            let total_debt = engine.stage_burn(caller, caller, dsc_amount, &mut plan)?;
            engine.stage_withdraw(caller, asset, collateral_amount, caller, &mut plan)?;
            engine.ensure_account_healthy(caller, clock)?;
            engine.settle(plan)?;

            DscBurned {
                on_behalf_of: *caller,
                payer: *caller,
                amount: dsc_amount,
                total_debt,
            }
            .emit();
            CollateralRedeemed {
                from: *caller,
                to: *caller,
                asset: *asset,
                amount: collateral_amount,
            }
            .emit();
            Ok(())
        })
    }

    /// Run `op` under the reentrancy guard with the ledger journaled
    pub(crate) fn atomic<R>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<R, DscEngineError>,
    ) -> Result<R, DscEngineError> {
        self.guard.enter()?;
        self.ledger.begin();

        let result = op(self);
        match &result {
            Ok(_) => self.ledger.commit(),
            Err(err) => {
                msg!("Operation reverted: {}", err);
                self.ledger.rollback();
            }
        }

        self.guard.exit()?;
        result
    }

    fn stage_deposit(
        &mut self,
        account: &Pubkey,
        asset: &Pubkey,
        amount: u128,
        plan: &mut SettlementPlan,
    ) -> Result<(), DscEngineError> {
        if amount == 0 {
            return Err(DscEngineError::InvalidAmount);
        }
        if !self.registry.is_supported(asset) {
            msg!("Collateral asset {} not supported", asset);
            return Err(DscEngineError::UnsupportedAsset);
        }

        self.ledger.add_collateral(account, asset, amount)?;
        plan.pull(Inbound::Collateral {
            asset: *asset,
            from: *account,
            amount,
        });
        Ok(())
    }

    fn stage_mint(
        &mut self,
        account: &Pubkey,
        amount: u128,
        plan: &mut SettlementPlan,
    ) -> Result<u128, DscEngineError> {
        if amount == 0 {
            return Err(DscEngineError::InvalidAmount);
        }

        let total_debt = self.ledger.add_debt(account, amount)?;
        plan.push(Outbound::Mint {
            to: *account,
            amount,
        })?;
        Ok(total_debt)
    }

    /// Ledger side of moving collateral out of `from`; callers re-check health
    pub(crate) fn stage_withdraw(
        &mut self,
        from: &Pubkey,
        asset: &Pubkey,
        amount: u128,
        to: &Pubkey,
        plan: &mut SettlementPlan,
    ) -> Result<(), DscEngineError> {
        if amount == 0 {
            return Err(DscEngineError::InvalidAmount);
        }
        if !self.registry.is_supported(asset) {
            msg!("Collateral asset {} not supported", asset);
            return Err(DscEngineError::UnsupportedAsset);
        }

        self.ledger.remove_collateral(from, asset, amount)?;
        plan.push(Outbound::Collateral {
            asset: *asset,
            to: *to,
            amount,
        })?;
        Ok(())
    }

    /// Reduce `on_behalf_of`'s debt, paid with `payer`'s debt tokens
    pub(crate) fn stage_burn(
        &mut self,
        on_behalf_of: &Pubkey,
        payer: &Pubkey,
        amount: u128,
        plan: &mut SettlementPlan,
    ) -> Result<u128, DscEngineError> {
        if amount == 0 {
            return Err(DscEngineError::InvalidAmount);
        }

        let total_debt = self.ledger.remove_debt(on_behalf_of, amount)?;
        plan.pull(Inbound::Debt {
            from: *payer,
            amount,
        });
        plan.pull(Inbound::Burn { amount });
        Ok(total_debt)
    }

    /// Fail with `HealthFactorBroken` when `account` is below the minimum
    ///
    /// Debt-free accounts pass without a price read.
    pub(crate) fn ensure_account_healthy(
        &self,
        account: &Pubkey,
        clock: &Clock,
    ) -> Result<(), DscEngineError> {
        if self.ledger.debt_of(account) == 0 {
            return Ok(());
        }
        let health_factor = self.health_factor(account, clock)?;
        health::ensure_healthy(&self.config, health_factor)
    }

    pub fn account_information(
        &self,
        account: &Pubkey,
        clock: &Clock,
    ) -> Result<AccountInformation, DscEngineError> {
        Ok(AccountInformation {
            total_dsc_minted: self.ledger.debt_of(account),
            collateral_value_in_usd: self.account_collateral_value(account, clock)?,
        })
    }

    pub fn health_factor(&self, account: &Pubkey, clock: &Clock) -> Result<u128, DscEngineError> {
        let info = self.account_information(account, clock)?;
        Ok(self.calculate_health_factor(info.total_dsc_minted, info.collateral_value_in_usd))
    }

    pub fn calculate_health_factor(&self, total_dsc_minted: u128, collateral_value_in_usd: u128) -> u128 {
        health::calculate_health_factor(&self.config, total_dsc_minted, collateral_value_in_usd)
    }

    /// DSC `account` can still mint without dropping below the minimum health factor
    pub fn max_mintable_dsc(&self, account: &Pubkey, clock: &Clock) -> Result<u128, DscEngineError> {
        let info = self.account_information(account, clock)?;
        let max_debt = health::max_debt_for_collateral(&self.config, info.collateral_value_in_usd)?;
        Ok(max_debt.saturating_sub(info.total_dsc_minted))
    }

    /// USD value of every deposit of `account`, summed in registration order
    pub fn account_collateral_value(
        &self,
        account: &Pubkey,
        clock: &Clock,
    ) -> Result<u128, DscEngineError> {
        let mut total = 0u128;
        for asset in self.registry.iter() {
            let amount = self.ledger.collateral_of(account, &asset.mint);
            let price = self.oracle.price_of(&asset.price_feed, clock)?;
            total = checked_add(total, mul_div(price.price, amount, self.config.precision)?)?;
        }
        Ok(total)
    }

    pub fn collateral_balance_of(&self, account: &Pubkey, asset: &Pubkey) -> u128 {
        self.ledger.collateral_of(account, asset)
    }

    pub fn dsc_minted(&self, account: &Pubkey) -> u128 {
        self.ledger.debt_of(account)
    }

    /// USD value of `amount` base units of `asset`
    pub fn usd_value(&self, asset: &Pubkey, amount: u128, clock: &Clock) -> Result<u128, DscEngineError> {
        let feed = &self.registry.get(asset)?.price_feed;
        let price = self.oracle.price_of(feed, clock)?;
        mul_div(price.price, amount, self.config.precision)
    }

    /// Base units of `asset` worth `usd_amount`, rounded down
    pub fn token_amount_from_usd(
        &self,
        asset: &Pubkey,
        usd_amount: u128,
        clock: &Clock,
    ) -> Result<u128, DscEngineError> {
        let feed = &self.registry.get(asset)?.price_feed;
        let price = self.oracle.price_of(feed, clock)?;
        mul_div(usd_amount, self.config.precision, price.price)
    }

    pub fn collateral_assets(&self) -> Vec<Pubkey> {
        self.registry.mints()
    }

    pub fn collateral_price_feed(&self, asset: &Pubkey) -> Result<&F, DscEngineError> {
        Ok(&self.registry.get(asset)?.price_feed)
    }

    pub fn collateral_token(&self, asset: &Pubkey) -> Result<&A, DscEngineError> {
        Ok(&self.registry.get(asset)?.token)
    }

    pub fn liquidation_threshold(&self) -> u128 {
        self.config.liquidation_threshold
    }

    pub fn liquidation_bonus(&self) -> u128 {
        self.config.liquidation_bonus
    }

    pub fn liquidation_precision(&self) -> u128 {
        self.config.liquidation_precision
    }

    pub fn precision(&self) -> u128 {
        self.config.precision
    }

    pub fn min_health_factor(&self) -> u128 {
        self.config.min_health_factor
    }

    pub fn stale_price_timeout(&self) -> i64 {
        self.oracle.stale_price_timeout()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn engine_id(&self) -> &Pubkey {
        &self.engine_id
    }

    pub fn debt_token(&self) -> &T {
        &self.debt_token
    }

    pub fn ledger(&self) -> &PositionLedger {
        &self.ledger
    }

    /// Host access to the debt token, e.g. for approvals
    pub fn debt_token_mut(&mut self) -> &mut T {
        &mut self.debt_token
    }

    /// Host access to a collateral token, e.g. for approvals
    pub fn collateral_token_mut(&mut self, asset: &Pubkey) -> Result<&mut A, DscEngineError> {
        Ok(&mut self.registry.get_mut(asset)?.token)
    }

    /// Host access to a price feed, e.g. to push new rounds
    pub fn collateral_price_feed_mut(&mut self, asset: &Pubkey) -> Result<&mut F, DscEngineError> {
        Ok(&mut self.registry.get_mut(asset)?.price_feed)
    }
}
