use solana_program::program_error::ProgramError;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum DscEngineError {
    #[error("Amount must be more than zero")]
    InvalidAmount,

    #[error("Collateral asset not supported")]
    UnsupportedAsset,

    #[error("Token transfer failed")]
    TransferFailed,

    #[error("Debt token mint failed")]
    MintFailed,

    #[error("Debt token burn failed")]
    BurnFailed,

    #[error("Health factor broken: {0}")]
    HealthFactorBroken(u128),

    #[error("Health factor ok")]
    HealthFactorOk,

    #[error("Health factor not improved")]
    HealthFactorNotImproved,

    #[error("Insufficient collateral")]
    InsufficientCollateral,

    #[error("Insufficient debt")]
    InsufficientDebt,

    #[error("Asset and price feed lists differ in length")]
    ConstructionMismatch,

    #[error("Duplicate collateral asset")]
    DuplicateAsset,

    #[error("Invalid engine configuration")]
    InvalidConfig,

    #[error("Price data stale")]
    StalePrice,

    #[error("Invalid price")]
    InvalidPrice,

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    #[error("Reentrant call")]
    Reentrancy,

    #[error("Invalid instruction")]
    InvalidInstruction,
}

impl DscEngineError {
    /// Stable numeric code reported through `ProgramError::Custom`
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidAmount => 0,
            Self::UnsupportedAsset => 1,
            Self::TransferFailed => 2,
            Self::MintFailed => 3,
            Self::BurnFailed => 4,
            Self::HealthFactorBroken(_) => 5,
            Self::HealthFactorOk => 6,
            Self::HealthFactorNotImproved => 7,
            Self::InsufficientCollateral => 8,
            Self::InsufficientDebt => 9,
            Self::ConstructionMismatch => 10,
            Self::DuplicateAsset => 11,
            Self::InvalidConfig => 12,
            Self::StalePrice => 13,
            Self::InvalidPrice => 14,
            Self::ArithmeticOverflow => 15,
            Self::Reentrancy => 16,
            Self::InvalidInstruction => 17,
        }
    }
}

impl From<DscEngineError> for ProgramError {
    fn from(e: DscEngineError) -> Self {
        ProgramError::Custom(e.code())
    }
}
