use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

/// Mutating engine operations. The signer is always the acting account.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum EngineInstruction {
    /// Lock collateral
    DepositCollateral { asset: Pubkey, amount: u128 },

    /// Mint DSC against locked collateral
    MintDsc { amount: u128 },

    DepositCollateralAndMintDsc {
        asset: Pubkey,
        collateral_amount: u128,
        dsc_amount: u128,
    },

    /// Withdraw collateral back to the signer
    RedeemCollateral { asset: Pubkey, amount: u128 },

    /// Repay DSC from the signer's balance
    BurnDsc { amount: u128 },

    RedeemCollateralForDsc {
        asset: Pubkey,
        collateral_amount: u128,
        dsc_amount: u128,
    },

    /// Cover part of an unsafe account's debt for its collateral plus bonus
    Liquidate {
        asset: Pubkey,
        user: Pubkey,
        debt_to_cover: u128,
    },
}

impl EngineInstruction {
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        Self::try_from_slice(input).map_err(|_| ProgramError::InvalidInstructionData)
    }

    pub fn pack(&self) -> Result<Vec<u8>, ProgramError> {
        self.try_to_vec()
            .map_err(|_| ProgramError::InvalidInstructionData)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::DepositCollateral { .. } => "DepositCollateral",
            Self::MintDsc { .. } => "MintDsc",
            Self::DepositCollateralAndMintDsc { .. } => "DepositCollateralAndMintDsc",
            Self::RedeemCollateral { .. } => "RedeemCollateral",
            Self::BurnDsc { .. } => "BurnDsc",
            Self::RedeemCollateralForDsc { .. } => "RedeemCollateralForDsc",
            Self::Liquidate { .. } => "Liquidate",
        }
    }
}
