//! Token movement settlement
//!
//! Ledger writes are journaled, but the token services are external and keep
//! whatever they did. A `SettlementPlan` therefore runs every movement into
//! the engine first and the single movement out of the engine last. When a
//! step fails, the inbound steps already done are reversed newest first.

use solana_program::{msg, pubkey::Pubkey};

use crate::{
    engine::DscEngine,
    error::DscEngineError,
    interfaces::{DebtToken, FungibleAsset, PriceFeed},
};

/// Movement into the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inbound {
    /// Pull collateral from `from` into the engine
    Collateral {
        asset: Pubkey,
        from: Pubkey,
        amount: u128,
    },
    /// Pull debt tokens from `from` into the engine
    Debt { from: Pubkey, amount: u128 },
    /// Burn debt tokens held by the engine
    Burn { amount: u128 },
}

/// Movement out of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outbound {
    /// Send collateral held by the engine to `to`
    Collateral {
        asset: Pubkey,
        to: Pubkey,
        amount: u128,
    },
    /// Mint fresh debt tokens to `to`
    Mint { to: Pubkey, amount: u128 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettlementPlan {
    inbound: Vec<Inbound>,
    outbound: Option<Outbound>,
}

impl SettlementPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pull(&mut self, step: Inbound) {
        self.inbound.push(step);
    }

    /// Set the outbound movement; a plan carries at most one
    pub fn push(&mut self, step: Outbound) -> Result<(), DscEngineError> {
        if let Some(existing) = self.outbound {
            msg!("Settlement already sends {:?}, cannot add {:?}", existing, step);
            return Err(DscEngineError::InvalidInstruction);
        }
        self.outbound = Some(step);
        Ok(())
    }

    pub fn inbound(&self) -> &[Inbound] {
        &self.inbound
    }

    pub fn outbound(&self) -> Option<&Outbound> {
        self.outbound.as_ref()
    }
}

impl<T, A, F> DscEngine<T, A, F>
where
    T: DebtToken,
    A: FungibleAsset,
    F: PriceFeed,
{
    /// Execute `plan` against the token services
    ///
    /// On failure the completed inbound steps are reversed and the error of
    /// the failing step is returned. Reversal is best effort: it runs through
    /// the host's token services, and a step they decline to reverse is
    /// logged and left in place. The ledger is still rolled back by the
    /// caller, so such a residue only shows up in the token balances.
    pub(crate) fn settle(&mut self, plan: SettlementPlan) -> Result<(), DscEngineError> {
        let mut completed = Vec::with_capacity(plan.inbound.len());

        for step in plan.inbound {
            if let Err(err) = self.run_inbound(&step) {
                self.compensate(&completed);
                return Err(err);
            }
            completed.push(step);
        }

        if let Some(step) = plan.outbound {
            if let Err(err) = self.run_outbound(&step) {
                self.compensate(&completed);
                return Err(err);
            }
        }

        Ok(())
    }

    fn run_inbound(&mut self, step: &Inbound) -> Result<(), DscEngineError> {
        let engine_id = *self.engine_id();
        match *step {
            Inbound::Collateral { asset, from, amount } => {
                let token = &mut self.registry.get_mut(&asset)?.token;
                if !token.transfer_from(&engine_id, &from, &engine_id, amount) {
                    msg!("Collateral transfer of {} {} from {} declined", amount, asset, from);
                    return Err(DscEngineError::TransferFailed);
                }
            }
            Inbound::Debt { from, amount } => {
                if !self.debt_token.transfer_from(&engine_id, &from, &engine_id, amount) {
                    msg!("DSC transfer of {} from {} declined", amount, from);
                    return Err(DscEngineError::TransferFailed);
                }
            }
            Inbound::Burn { amount } => {
                if !self.debt_token.burn(&engine_id, amount) {
                    msg!("DSC burn of {} declined", amount);
                    return Err(DscEngineError::BurnFailed);
                }
            }
        }
        Ok(())
    }

    fn run_outbound(&mut self, step: &Outbound) -> Result<(), DscEngineError> {
        let engine_id = *self.engine_id();
        match *step {
            Outbound::Collateral { asset, to, amount } => {
                let token = &mut self.registry.get_mut(&asset)?.token;
                if !token.transfer(&engine_id, &to, amount) {
                    msg!("Collateral transfer of {} {} to {} declined", amount, asset, to);
                    return Err(DscEngineError::TransferFailed);
                }
            }
            Outbound::Mint { to, amount } => {
                if !self.debt_token.mint(&engine_id, &to, amount) {
                    msg!("DSC mint of {} to {} declined", amount, to);
                    return Err(DscEngineError::MintFailed);
                }
            }
        }
        Ok(())
    }

    /// Reverse completed inbound steps, newest first. Returns how many
    /// steps could not be reversed.
    fn compensate(&mut self, completed: &[Inbound]) -> usize {
        let engine_id = *self.engine_id();
        let mut unreversed = 0;
        for step in completed.iter().rev() {
            let restored = match *step {
                Inbound::Collateral { asset, from, amount } => match self.registry.get_mut(&asset) {
                    Ok(collateral) => collateral.token.transfer(&engine_id, &from, amount),
                    Err(_) => false,
                },
                Inbound::Debt { from, amount } => self.debt_token.transfer(&engine_id, &from, amount),
                Inbound::Burn { amount } => self.debt_token.mint(&engine_id, &engine_id, amount),
            };
            if !restored {
                msg!("Failed to reverse settlement step {:?}", step);
                unreversed += 1;
            }
        }
        if unreversed > 0 {
            msg!("{} of {} settlement steps left unreversed", unreversed, completed.len());
        }
        unreversed
    }
}
