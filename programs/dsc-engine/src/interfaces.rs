//! External collaborators
//!
//! The engine never moves tokens or produces prices itself. It drives these
//! services and treats a `false` return as a declined movement.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{clock::UnixTimestamp, pubkey::Pubkey};

/// Ledger of the minted debt unit
pub trait DebtToken {
    /// Only the authorized minter may mint
    fn mint(&mut self, caller: &Pubkey, to: &Pubkey, amount: u128) -> bool;

    /// Burns from the caller's own balance; only the authorized minter may burn
    fn burn(&mut self, caller: &Pubkey, amount: u128) -> bool;

    fn transfer(&mut self, caller: &Pubkey, to: &Pubkey, amount: u128) -> bool;

    fn transfer_from(&mut self, spender: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u128) -> bool;

    fn balance_of(&self, account: &Pubkey) -> u128;

    fn total_supply(&self) -> u128;
}

/// Transfer surface of one collateral asset
pub trait FungibleAsset {
    fn transfer(&mut self, caller: &Pubkey, to: &Pubkey, amount: u128) -> bool;

    fn transfer_from(&mut self, spender: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u128) -> bool;

    fn balance_of(&self, account: &Pubkey) -> u128;
}

/// Raw price source read contract
pub trait PriceFeed {
    /// Decimals of `RoundData::answer`
    fn decimals(&self) -> u8;

    fn latest_round_data(&self) -> RoundData;
}

/// Latest round reported by a price feed
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundData {
    pub round_id: u128,
    /// Signed price scaled by the feed's decimals
    pub answer: i128,
    pub started_at: UnixTimestamp,
    pub updated_at: UnixTimestamp,
    pub answered_in_round: u128,
}
