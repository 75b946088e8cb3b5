//! Price oracle adapter
//!
//! Wraps a raw `PriceFeed`, rejects stale or nonsensical rounds and rescales
//! the answer to the engine's 18 decimal fixed point. There is no fallback
//! price and no cache: a bad read fails the whole operation.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    clock::{Clock, UnixTimestamp},
    msg,
};

use crate::{
    constants::PRECISION_DECIMALS,
    error::DscEngineError,
    interfaces::{PriceFeed, RoundData},
    math::pow10,
};

/// Price normalized to 18 decimals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OraclePrice {
    pub price: u128,
    pub updated_at: UnixTimestamp,
}

/// Staleness-checked price reads
#[derive(Debug, Clone, Copy)]
pub struct PriceOracle {
    stale_price_timeout: i64,
}

impl PriceOracle {
    pub fn new(stale_price_timeout: i64) -> Self {
        Self { stale_price_timeout }
    }

    pub fn stale_price_timeout(&self) -> i64 {
        self.stale_price_timeout
    }

    /// Latest round, failing closed on anything unusable
    pub fn stale_checked_round_data<F: PriceFeed>(
        &self,
        feed: &F,
        clock: &Clock,
    ) -> Result<RoundData, DscEngineError> {
        let round = feed.latest_round_data();

        if round.updated_at == 0 || round.answered_in_round < round.round_id {
            msg!("Incomplete price round {}", round.round_id);
            return Err(DscEngineError::StalePrice);
        }

        let age = clock.unix_timestamp.saturating_sub(round.updated_at);
        if age < 0 {
            msg!("Price round {} updated at {} is ahead of the clock", round.round_id, round.updated_at);
            return Err(DscEngineError::StalePrice);
        }

        if age > self.stale_price_timeout {
            msg!("Price data stale: {}s old", age);
            return Err(DscEngineError::StalePrice);
        }

        Ok(round)
    }

    /// Current price of one whole unit of the asset, in 18 decimal USD
    pub fn price_of<F: PriceFeed>(
        &self,
        feed: &F,
        clock: &Clock,
    ) -> Result<OraclePrice, DscEngineError> {
        let round = self.stale_checked_round_data(feed, clock)?;

        if round.answer <= 0 {
            msg!("Invalid price answer: {}", round.answer);
            return Err(DscEngineError::InvalidPrice);
        }

        let price = normalize(round.answer as u128, feed.decimals())?;

        Ok(OraclePrice {
            price,
            updated_at: round.updated_at,
        })
    }
}

/// Rescale a raw answer with `decimals` decimals to 18 decimals
pub fn normalize(raw: u128, decimals: u8) -> Result<u128, DscEngineError> {
    if decimals <= PRECISION_DECIMALS {
        let scale = pow10((PRECISION_DECIMALS - decimals) as u32)?;
        raw.checked_mul(scale).ok_or(DscEngineError::ArithmeticOverflow)
    } else {
        let scale = pow10((decimals - PRECISION_DECIMALS) as u32)?;
        Ok(raw / scale)
    }
}

/// Manually driven price feed
///
/// Every update opens and answers a new round at the given timestamp.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct ManualPriceFeed {
    decimals: u8,
    round: RoundData,
}

impl ManualPriceFeed {
    pub fn new(decimals: u8, answer: i128, updated_at: UnixTimestamp) -> Self {
        Self {
            decimals,
            round: RoundData {
                round_id: 1,
                answer,
                started_at: updated_at,
                updated_at,
                answered_in_round: 1,
            },
        }
    }

    pub fn update_answer(&mut self, answer: i128, updated_at: UnixTimestamp) {
        let round_id = self.round.round_id + 1;
        self.round = RoundData {
            round_id,
            answer,
            started_at: updated_at,
            updated_at,
            answered_in_round: round_id,
        };
    }

    pub fn update_round_data(&mut self, round: RoundData) {
        self.round = round;
    }
}

impl PriceFeed for ManualPriceFeed {
    fn decimals(&self) -> u8 {
        self.decimals
    }

    fn latest_round_data(&self) -> RoundData {
        self.round
    }
}
