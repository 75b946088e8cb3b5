//! In-memory token ledgers
//!
//! Reference implementations of `FungibleAsset` and `DebtToken` used by
//! hosts without a token program of their own, and by the test suites.

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{msg, pubkey::Pubkey};

use crate::interfaces::{DebtToken, FungibleAsset};

/// Balances and allowances of one fungible token
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenLedger {
    balances: BTreeMap<Pubkey, u128>,
    allowances: BTreeMap<(Pubkey, Pubkey), u128>,
    total_supply: u128,
    /// Frozen ledgers decline every transfer
    frozen: bool,
}

impl TokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit new tokens to `account`
    pub fn mint_to(&mut self, account: &Pubkey, amount: u128) -> bool {
        let Some(total_supply) = self.total_supply.checked_add(amount) else {
            return false;
        };
        let balance = self.balances.entry(*account).or_default();
        let Some(new_balance) = balance.checked_add(amount) else {
            return false;
        };
        *balance = new_balance;
        self.total_supply = total_supply;
        true
    }

    /// Destroy tokens held by `account`
    pub fn burn_from_balance(&mut self, account: &Pubkey, amount: u128) -> bool {
        let balance = self.balances.entry(*account).or_default();
        if *balance < amount {
            return false;
        }
        *balance -= amount;
        self.total_supply -= amount;
        true
    }

    pub fn approve(&mut self, owner: &Pubkey, spender: &Pubkey, amount: u128) {
        self.allowances.insert((*owner, *spender), amount);
    }

    pub fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> u128 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    fn move_balance(&mut self, from: &Pubkey, to: &Pubkey, amount: u128) -> bool {
        if self.frozen {
            msg!("Token ledger frozen");
            return false;
        }

        let from_balance = self.balances.get(from).copied().unwrap_or_default();
        if from_balance < amount {
            msg!("Insufficient balance: {} < {}", from_balance, amount);
            return false;
        }

        if from != to {
            let to_balance = self.balances.get(to).copied().unwrap_or_default();
            let Some(new_to_balance) = to_balance.checked_add(amount) else {
                return false;
            };
            self.balances.insert(*from, from_balance - amount);
            self.balances.insert(*to, new_to_balance);
        }

        true
    }
}

impl FungibleAsset for TokenLedger {
    fn transfer(&mut self, caller: &Pubkey, to: &Pubkey, amount: u128) -> bool {
        self.move_balance(caller, to, amount)
    }

    fn transfer_from(&mut self, spender: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u128) -> bool {
        let allowance = self.allowance(from, spender);
        if allowance < amount {
            msg!("Insufficient allowance: {} < {}", allowance, amount);
            return false;
        }

        if !self.move_balance(from, to, amount) {
            return false;
        }

        self.allowances.insert((*from, *spender), allowance - amount);
        true
    }

    fn balance_of(&self, account: &Pubkey) -> u128 {
        self.balances.get(account).copied().unwrap_or_default()
    }
}

/// Debt unit ledger whose mint and burn are bound to a single minter
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct DebtTokenLedger {
    minter: Pubkey,
    ledger: TokenLedger,
}

impl DebtTokenLedger {
    pub fn new(minter: Pubkey) -> Self {
        Self {
            minter,
            ledger: TokenLedger::new(),
        }
    }

    pub fn approve(&mut self, owner: &Pubkey, spender: &Pubkey, amount: u128) {
        self.ledger.approve(owner, spender, amount);
    }

    pub fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> u128 {
        self.ledger.allowance(owner, spender)
    }

    fn is_minter(&self, caller: &Pubkey) -> bool {
        if *caller != self.minter {
            msg!("{} is not the debt token minter", caller);
            return false;
        }
        true
    }
}

impl DebtToken for DebtTokenLedger {
    fn mint(&mut self, caller: &Pubkey, to: &Pubkey, amount: u128) -> bool {
        if !self.is_minter(caller) {
            return false;
        }
        if *to == Pubkey::default() || amount == 0 {
            msg!("Refusing mint of {} to {}", amount, to);
            return false;
        }
        self.ledger.mint_to(to, amount)
    }

    fn burn(&mut self, caller: &Pubkey, amount: u128) -> bool {
        if !self.is_minter(caller) {
            return false;
        }
        if amount == 0 {
            return false;
        }
        self.ledger.burn_from_balance(caller, amount)
    }

    fn transfer(&mut self, caller: &Pubkey, to: &Pubkey, amount: u128) -> bool {
        FungibleAsset::transfer(&mut self.ledger, caller, to, amount)
    }

    fn transfer_from(&mut self, spender: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u128) -> bool {
        FungibleAsset::transfer_from(&mut self.ledger, spender, from, to, amount)
    }

    fn balance_of(&self, account: &Pubkey) -> u128 {
        FungibleAsset::balance_of(&self.ledger, account)
    }

    fn total_supply(&self) -> u128 {
        self.ledger.total_supply()
    }
}
