use solana_program::{clock::Clock, entrypoint::ProgramResult, msg, pubkey::Pubkey};

use crate::{
    engine::DscEngine,
    instruction::EngineInstruction,
    interfaces::{DebtToken, FungibleAsset, PriceFeed},
};

pub struct Processor;

impl Processor {
    /// Decode `instruction_data` and run it against `engine` as `caller`
    pub fn process<T, A, F>(
        engine: &mut DscEngine<T, A, F>,
        caller: &Pubkey,
        clock: &Clock,
        instruction_data: &[u8],
    ) -> ProgramResult
    where
        T: DebtToken,
        A: FungibleAsset,
        F: PriceFeed,
    {
        let instruction = EngineInstruction::unpack(instruction_data)?;
        msg!("Instruction: {}", instruction.name());

        match instruction {
            EngineInstruction::DepositCollateral { asset, amount } => {
                engine.deposit_collateral(caller, &asset, amount, clock)?
            }
            EngineInstruction::MintDsc { amount } => engine.mint_dsc(caller, amount, clock)?,
            EngineInstruction::DepositCollateralAndMintDsc {
                asset,
                collateral_amount,
                dsc_amount,
            } => engine.deposit_collateral_and_mint_dsc(
                caller,
                &asset,
                collateral_amount,
                dsc_amount,
                clock,
            )?,
            EngineInstruction::RedeemCollateral { asset, amount } => {
                engine.redeem_collateral(caller, &asset, amount, clock)?
            }
            EngineInstruction::BurnDsc { amount } => engine.burn_dsc(caller, amount, clock)?,
            EngineInstruction::RedeemCollateralForDsc {
                asset,
                collateral_amount,
                dsc_amount,
            } => engine.redeem_collateral_for_dsc(
                caller,
                &asset,
                collateral_amount,
                dsc_amount,
                clock,
            )?,
            EngineInstruction::Liquidate {
                asset,
                user,
                debt_to_cover,
            } => engine.liquidate(caller, &asset, &user, debt_to_cover, clock)?,
        }

        Ok(())
    }
}
