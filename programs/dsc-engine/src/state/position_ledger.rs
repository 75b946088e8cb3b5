use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{msg, program_error::ProgramError, pubkey::Pubkey};

use crate::{constants::POSITION_LEDGER_DISCRIMINATOR, error::DscEngineError};

/// Previous value of a ledger slot, recorded before it is overwritten
#[derive(Debug, Clone, PartialEq, Eq)]
enum LedgerWrite {
    Collateral {
        account: Pubkey,
        asset: Pubkey,
        previous: Option<u128>,
    },
    Debt {
        account: Pubkey,
        previous: Option<u128>,
    },
}

/// Collateral and debt positions of every account
///
/// Entries are created on first use and never removed, only driven back to
/// zero. Writes made while a journal is open can be undone with `rollback`.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionLedger {
    /// Account discriminator
    pub discriminator: [u8; 8],

    /// (account, asset) -> deposited amount
    collateral: BTreeMap<(Pubkey, Pubkey), u128>,

    /// account -> outstanding debt
    debt: BTreeMap<Pubkey, u128>,

    #[borsh_skip]
    journal: Option<Vec<LedgerWrite>>,
}

impl PositionLedger {
    pub fn new() -> Self {
        Self {
            discriminator: POSITION_LEDGER_DISCRIMINATOR,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ProgramError> {
        if self.discriminator != POSITION_LEDGER_DISCRIMINATOR {
            return Err(ProgramError::InvalidAccountData);
        }
        Ok(())
    }

    /// Start recording writes
    pub fn begin(&mut self) {
        self.journal = Some(Vec::new());
    }

    /// Keep every write since `begin`
    pub fn commit(&mut self) {
        self.journal = None;
    }

    /// Undo every write since `begin`, newest first
    pub fn rollback(&mut self) {
        let Some(journal) = self.journal.take() else {
            return;
        };

        for write in journal.into_iter().rev() {
            match write {
                LedgerWrite::Collateral {
                    account,
                    asset,
                    previous,
                } => match previous {
                    Some(amount) => {
                        self.collateral.insert((account, asset), amount);
                    }
                    None => {
                        self.collateral.remove(&(account, asset));
                    }
                },
                LedgerWrite::Debt { account, previous } => match previous {
                    Some(amount) => {
                        self.debt.insert(account, amount);
                    }
                    None => {
                        self.debt.remove(&account);
                    }
                },
            }
        }
    }

    pub fn collateral_of(&self, account: &Pubkey, asset: &Pubkey) -> u128 {
        self.collateral
            .get(&(*account, *asset))
            .copied()
            .unwrap_or_default()
    }

    pub fn debt_of(&self, account: &Pubkey) -> u128 {
        self.debt.get(account).copied().unwrap_or_default()
    }

    pub fn add_collateral(
        &mut self,
        account: &Pubkey,
        asset: &Pubkey,
        amount: u128,
    ) -> Result<u128, DscEngineError> {
        let balance = self
            .collateral_of(account, asset)
            .checked_add(amount)
            .ok_or(DscEngineError::ArithmeticOverflow)?;
        self.write_collateral(account, asset, balance);
        Ok(balance)
    }

    pub fn remove_collateral(
        &mut self,
        account: &Pubkey,
        asset: &Pubkey,
        amount: u128,
    ) -> Result<u128, DscEngineError> {
        let current = self.collateral_of(account, asset);
        let balance = current.checked_sub(amount).ok_or_else(|| {
            msg!("Collateral of {} is {}, cannot remove {}", account, current, amount);
            DscEngineError::InsufficientCollateral
        })?;
        self.write_collateral(account, asset, balance);
        Ok(balance)
    }

    pub fn add_debt(&mut self, account: &Pubkey, amount: u128) -> Result<u128, DscEngineError> {
        let debt = self
            .debt_of(account)
            .checked_add(amount)
            .ok_or(DscEngineError::ArithmeticOverflow)?;
        self.write_debt(account, debt);
        Ok(debt)
    }

    pub fn remove_debt(&mut self, account: &Pubkey, amount: u128) -> Result<u128, DscEngineError> {
        let current = self.debt_of(account);
        let debt = current.checked_sub(amount).ok_or_else(|| {
            msg!("Debt of {} is {}, cannot remove {}", account, current, amount);
            DscEngineError::InsufficientDebt
        })?;
        self.write_debt(account, debt);
        Ok(debt)
    }

    pub fn total_debt(&self) -> Result<u128, DscEngineError> {
        self.debt.values().try_fold(0u128, |total, debt| {
            total
                .checked_add(*debt)
                .ok_or(DscEngineError::ArithmeticOverflow)
        })
    }

    pub fn total_collateral(&self, asset: &Pubkey) -> Result<u128, DscEngineError> {
        self.collateral
            .iter()
            .filter(|((_, a), _)| a == asset)
            .try_fold(0u128, |total, (_, amount)| {
                total
                    .checked_add(*amount)
                    .ok_or(DscEngineError::ArithmeticOverflow)
            })
    }

    fn write_collateral(&mut self, account: &Pubkey, asset: &Pubkey, amount: u128) {
        let previous = self.collateral.insert((*account, *asset), amount);
        if let Some(journal) = self.journal.as_mut() {
            journal.push(LedgerWrite::Collateral {
                account: *account,
                asset: *asset,
                previous,
            });
        }
    }

    fn write_debt(&mut self, account: &Pubkey, amount: u128) {
        let previous = self.debt.insert(*account, amount);
        if let Some(journal) = self.journal.as_mut() {
            journal.push(LedgerWrite::Debt {
                account: *account,
                previous,
            });
        }
    }
}
