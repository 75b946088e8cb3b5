// Decentralized stablecoin engine
// Overcollateralized DSC positions with oracle-priced liquidation

pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod health;
pub mod instruction;
pub mod interfaces;
pub mod liquidation;
pub mod math;
pub mod oracle;
pub mod processor;
pub mod reentrancy_guard;
pub mod settlement;
pub mod state;
pub mod token;

pub use engine::{AccountInformation, DscEngine};
pub use error::DscEngineError;
pub use interfaces::{DebtToken, FungibleAsset, PriceFeed, RoundData};
pub use liquidation::LiquidationQuote;
pub use state::EngineConfig;
