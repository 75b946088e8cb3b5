//! Liquidation of unsafe positions
//!
//! A liquidator repays part of an unsafe account's debt with their own DSC
//! and receives the equivalent collateral plus a bonus. The liquidation must
//! leave the target strictly healthier and the liquidator safe.

use solana_program::{clock::Clock, msg, pubkey::Pubkey};

use crate::{
    engine::DscEngine,
    error::DscEngineError,
    events::{Event, PositionLiquidated},
    health,
    interfaces::{DebtToken, FungibleAsset, PriceFeed},
    math::{checked_add, mul_div},
    settlement::SettlementPlan,
};

/// Collateral paid out for covering a given amount of debt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidationQuote {
    /// Collateral worth exactly the covered debt
    pub token_amount: u128,
    pub bonus: u128,
    pub total_seized: u128,
}

impl<T, A, F> DscEngine<T, A, F>
where
    T: DebtToken,
    A: FungibleAsset,
    F: PriceFeed,
{
    /// Price a liquidation without touching any position
    pub fn liquidation_quote(
        &self,
        asset: &Pubkey,
        debt_to_cover: u128,
        clock: &Clock,
    ) -> Result<LiquidationQuote, DscEngineError> {
        let token_amount = self.token_amount_from_usd(asset, debt_to_cover, clock)?;
        let bonus = mul_div(
            token_amount,
            self.liquidation_bonus(),
            self.liquidation_precision(),
        )?;

        Ok(LiquidationQuote {
            token_amount,
            bonus,
            total_seized: checked_add(token_amount, bonus)?,
        })
    }

    /// Cover `debt_to_cover` of `user`'s debt and seize `asset` collateral
    ///
    /// Partial liquidation is allowed. The seizure is never capped: if `user`
    /// holds less than the quoted collateral the call fails with
    /// `InsufficientCollateral`.
    pub fn liquidate(
        &mut self,
        caller: &Pubkey,
        asset: &Pubkey,
        user: &Pubkey,
        debt_to_cover: u128,
        clock: &Clock,
    ) -> Result<(), DscEngineError> {
        msg!(
            "Liquidating {}: covering {} DSC against {} by {}",
            user,
            debt_to_cover,
            asset,
            caller
        );

        if debt_to_cover == 0 {
            return Err(DscEngineError::InvalidAmount);
        }
        if !self.registry.is_supported(asset) {
            msg!("Collateral asset {} not supported", asset);
            return Err(DscEngineError::UnsupportedAsset);
        }

        self.atomic(|engine| {
            let starting_health_factor = engine.health_factor(user, clock)?;
            if health::is_healthy(engine.config(), starting_health_factor) {
                msg!("Health factor {} of {} is ok", starting_health_factor, user);
                return Err(DscEngineError::HealthFactorOk);
            }

            let quote = engine.liquidation_quote(asset, debt_to_cover, clock)?;
            msg!(
                "Seizing {} ({} + {} bonus)",
                quote.total_seized,
                quote.token_amount,
                quote.bonus
            );

            let mut plan = SettlementPlan::new();
            if quote.total_seized > 0 {
                engine.stage_withdraw(user, asset, quote.total_seized, caller, &mut plan)?;
            }
            engine.stage_burn(user, caller, debt_to_cover, &mut plan)?;

            let ending_health_factor = engine.health_factor(user, clock)?;
            if ending_health_factor <= starting_health_factor {
                msg!(
                    "Health factor of {} went from {} to {}",
                    user,
                    starting_health_factor,
                    ending_health_factor
                );
                return Err(DscEngineError::HealthFactorNotImproved);
            }

            engine.ensure_account_healthy(caller, clock)?;
            engine.settle(plan)?;

            PositionLiquidated {
                liquidator: *caller,
                user: *user,
                asset: *asset,
                debt_covered: debt_to_cover,
                collateral_seized: quote.total_seized,
                bonus_collateral: quote.bonus,
                starting_health_factor,
                ending_health_factor,
            }
            .emit();
            Ok(())
        })
    }
}
