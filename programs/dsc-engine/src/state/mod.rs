pub mod engine_config;
pub mod asset_registry;
pub mod position_ledger;

pub use engine_config::*;
pub use asset_registry::*;
pub use position_ledger::*;
