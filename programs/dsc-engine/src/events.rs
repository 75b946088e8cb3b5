//! Event logging
//!
//! Committed operations log a marker line, the event type and the
//! bs58-encoded borsh payload so indexers can rebuild positions from logs.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{msg, pubkey::Pubkey};

use crate::constants::EVENT_LOG_MARKER;

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    CollateralDeposited = 1,
    CollateralRedeemed = 2,
    DscMinted = 3,
    DscBurned = 4,
    PositionLiquidated = 5,
}

pub trait Event: BorshSerialize {
    fn event_type() -> EventType;

    fn emit(&self) {
        msg!(EVENT_LOG_MARKER);
        msg!("TYPE:{:?}", Self::event_type());

        if let Ok(data) = self.try_to_vec() {
            msg!("DATA:{}", bs58::encode(&data).into_string());
        }
    }
}

/// Decode the payload logged after `DATA:`
pub fn decode_event<T: BorshDeserialize>(encoded: &str) -> Option<T> {
    let data = bs58::decode(encoded).into_vec().ok()?;
    T::try_from_slice(&data).ok()
}

macro_rules! define_event {
    ($name:ident, $event_type:expr, { $($field:ident: $type:ty),* $(,)? }) => {
        #[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            $(pub $field: $type,)*
        }

        impl Event for $name {
            fn event_type() -> EventType {
                $event_type
            }
        }
    };
}

define_event!(CollateralDeposited, EventType::CollateralDeposited, {
    user: Pubkey,
    asset: Pubkey,
    amount: u128,
});

define_event!(CollateralRedeemed, EventType::CollateralRedeemed, {
    from: Pubkey,
    to: Pubkey,
    asset: Pubkey,
    amount: u128,
});

define_event!(DscMinted, EventType::DscMinted, {
    user: Pubkey,
    amount: u128,
    total_debt: u128,
});

define_event!(DscBurned, EventType::DscBurned, {
    on_behalf_of: Pubkey,
    payer: Pubkey,
    amount: u128,
    total_debt: u128,
});

define_event!(PositionLiquidated, EventType::PositionLiquidated, {
    liquidator: Pubkey,
    user: Pubkey,
    asset: Pubkey,
    debt_covered: u128,
    collateral_seized: u128,
    bonus_collateral: u128,
    starting_health_factor: u128,
    ending_health_factor: u128,
});
