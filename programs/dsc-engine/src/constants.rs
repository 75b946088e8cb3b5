//! Protocol constants
//!
//! Canonical values for the engine configuration. Monetary amounts are
//! integers scaled by `PRECISION` (18 decimals).

/// Fixed point scale shared by USD values, debt and health factors
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Share of collateral value usable as a debt ceiling (out of `LIQUIDATION_PRECISION`)
pub const LIQUIDATION_THRESHOLD: u128 = 50;

/// Collateral bonus paid to liquidators (out of `LIQUIDATION_PRECISION`)
pub const LIQUIDATION_BONUS: u128 = 10;

pub const LIQUIDATION_PRECISION: u128 = 100;

/// Health factor of 1.0
pub const MIN_HEALTH_FACTOR: u128 = PRECISION;

/// Decimals of the internal fixed point representation
pub const PRECISION_DECIMALS: u8 = 18;

/// Default price staleness bound in seconds (3 hours)
pub const DEFAULT_STALE_PRICE_TIMEOUT: i64 = 3 * 60 * 60;

/// Ledger snapshot discriminator
pub const POSITION_LEDGER_DISCRIMINATOR: [u8; 8] = [68, 83, 67, 76, 69, 68, 71, 82]; // "DSCLEDGR"

/// Event log marker
pub const EVENT_LOG_MARKER: &str = "DSC_ENGINE_EVENT";
