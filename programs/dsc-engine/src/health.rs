//! Solvency checks
//!
//! Health factor = (collateral value * threshold / liquidation precision) * PRECISION / debt
//!
//! An account is safe while its health factor is at least `min_health_factor`
//! (1.0). Accounts without debt are maximally safe.

use solana_program::msg;

use crate::{
    error::DscEngineError,
    math::{mul_div, mul_div_saturating},
    state::EngineConfig,
};

/// Health factor of an account with `total_debt` against `collateral_value_usd`
///
/// Never fails: a debt-free account and any quotient beyond `u128::MAX`
/// both report `u128::MAX`.
pub fn calculate_health_factor(
    config: &EngineConfig,
    total_debt: u128,
    collateral_value_usd: u128,
) -> u128 {
    if total_debt == 0 {
        return u128::MAX;
    }

    // threshold <= liquidation precision, so the adjusted value never exceeds the input
    let collateral_adjusted = mul_div(
        collateral_value_usd,
        config.liquidation_threshold,
        config.liquidation_precision,
    )
    .unwrap_or(collateral_value_usd);

    mul_div_saturating(collateral_adjusted, config.precision, total_debt)
}

pub fn is_healthy(config: &EngineConfig, health_factor: u128) -> bool {
    health_factor >= config.min_health_factor
}

/// Fail with `HealthFactorBroken` below the minimum
pub fn ensure_healthy(config: &EngineConfig, health_factor: u128) -> Result<(), DscEngineError> {
    if !is_healthy(config, health_factor) {
        msg!(
            "Health factor {} below minimum {}",
            health_factor,
            config.min_health_factor
        );
        return Err(DscEngineError::HealthFactorBroken(health_factor));
    }
    Ok(())
}

/// Largest debt that keeps `collateral_value_usd` at the minimum health factor
pub fn max_debt_for_collateral(
    config: &EngineConfig,
    collateral_value_usd: u128,
) -> Result<u128, DscEngineError> {
    let collateral_adjusted = mul_div(
        collateral_value_usd,
        config.liquidation_threshold,
        config.liquidation_precision,
    )?;
    mul_div(collateral_adjusted, config.precision, config.min_health_factor)
}
