use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::msg;

use crate::{constants::*, error::DscEngineError};

/// System constants, fixed when the engine is constructed
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Share of collateral value usable as debt ceiling (default: 50)
    /// Out of `liquidation_precision`
    pub liquidation_threshold: u128,

    /// Liquidator bonus on seized collateral (default: 10)
    /// Out of `liquidation_precision`
    pub liquidation_bonus: u128,

    /// Denominator for threshold and bonus (default: 100)
    pub liquidation_precision: u128,

    /// Health factor below which an account is liquidatable (default: 1e18)
    pub min_health_factor: u128,

    /// Fixed point scale (default: 1e18)
    pub precision: u128,

    /// Maximum accepted price age in seconds
    pub stale_price_timeout: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            liquidation_threshold: LIQUIDATION_THRESHOLD,
            liquidation_bonus: LIQUIDATION_BONUS,
            liquidation_precision: LIQUIDATION_PRECISION,
            min_health_factor: MIN_HEALTH_FACTOR,
            precision: PRECISION,
            stale_price_timeout: DEFAULT_STALE_PRICE_TIMEOUT,
        }
    }
}

impl EngineConfig {
    pub fn with_stale_price_timeout(mut self, seconds: i64) -> Self {
        self.stale_price_timeout = seconds;
        self
    }

    pub fn validate(&self) -> Result<(), DscEngineError> {
        if self.precision == 0 || self.liquidation_precision == 0 {
            msg!("Precision must be non-zero");
            return Err(DscEngineError::InvalidConfig);
        }

        if self.liquidation_threshold == 0
            || self.liquidation_threshold > self.liquidation_precision
        {
            msg!("Invalid liquidation threshold: {}", self.liquidation_threshold);
            return Err(DscEngineError::InvalidConfig);
        }

        if self.liquidation_bonus >= self.liquidation_precision {
            msg!("Invalid liquidation bonus: {}", self.liquidation_bonus);
            return Err(DscEngineError::InvalidConfig);
        }

        if self.min_health_factor == 0 {
            msg!("Minimum health factor must be non-zero");
            return Err(DscEngineError::InvalidConfig);
        }

        if self.stale_price_timeout <= 0 {
            msg!("Invalid stale price timeout: {}", self.stale_price_timeout);
            return Err(DscEngineError::InvalidConfig);
        }

        Ok(())
    }
}
