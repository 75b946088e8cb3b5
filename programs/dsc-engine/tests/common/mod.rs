#![allow(dead_code)]

use dsc_engine::{
    constants::PRECISION,
    oracle::ManualPriceFeed,
    token::{DebtTokenLedger, TokenLedger},
    DscEngine, EngineConfig,
};
use solana_program::{clock::Clock, pubkey::Pubkey};

pub type TestEngine = DscEngine<DebtTokenLedger, TokenLedger, ManualPriceFeed>;

pub const NOW: i64 = 1_700_000_000;

/// $2000 with 8 feed decimals
pub const ETH_USD_PRICE: i128 = 2_000_0000_0000;
/// $30000 with 8 feed decimals
pub const BTC_USD_PRICE: i128 = 30_000_0000_0000;

pub const STARTING_BALANCE: u128 = 1_000 * PRECISION;

pub fn clock_at(unix_timestamp: i64) -> Clock {
    Clock {
        unix_timestamp,
        ..Clock::default()
    }
}

/// Feed answer for a whole-dollar price
pub fn usd_answer(dollars: i128) -> i128 {
    dollars * 100_000_000
}

pub struct Harness {
    pub engine: TestEngine,
    pub engine_id: Pubkey,
    pub weth: Pubkey,
    pub wbtc: Pubkey,
    pub clock: Clock,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let engine_id = Pubkey::new_unique();
        Self::build(engine_id, DebtTokenLedger::new(engine_id), config)
    }

    /// Engine whose debt token answers to a different minter
    pub fn with_foreign_debt_token() -> Self {
        Self::build(
            Pubkey::new_unique(),
            DebtTokenLedger::new(Pubkey::new_unique()),
            EngineConfig::default(),
        )
    }

    fn build(engine_id: Pubkey, debt_token: DebtTokenLedger, config: EngineConfig) -> Self {
        let weth = Pubkey::new_unique();
        let wbtc = Pubkey::new_unique();

        let engine = DscEngine::new(
            engine_id,
            vec![(weth, TokenLedger::new()), (wbtc, TokenLedger::new())],
            vec![
                ManualPriceFeed::new(8, ETH_USD_PRICE, NOW),
                ManualPriceFeed::new(8, BTC_USD_PRICE, NOW),
            ],
            debt_token,
            config,
        )
        .unwrap();

        Self {
            engine,
            engine_id,
            weth,
            wbtc,
            clock: clock_at(NOW),
        }
    }

    /// New account holding `STARTING_BALANCE` of both collaterals, with the
    /// engine approved to pull collateral and DSC
    pub fn funded_account(&mut self) -> Pubkey {
        let account = Pubkey::new_unique();
        for asset in [self.weth, self.wbtc] {
            let token = self.engine.collateral_token_mut(&asset).unwrap();
            assert!(token.mint_to(&account, STARTING_BALANCE));
            token.approve(&account, &self.engine_id, u128::MAX);
        }
        self.engine
            .debt_token_mut()
            .approve(&account, &self.engine_id, u128::MAX);
        account
    }

    /// Publish a new round for `asset` at the current clock
    pub fn set_price(&mut self, asset: &Pubkey, answer: i128) {
        let now = self.clock.unix_timestamp;
        self.engine
            .collateral_price_feed_mut(asset)
            .unwrap()
            .update_answer(answer, now);
    }

    pub fn advance(&mut self, seconds: i64) {
        self.clock.unix_timestamp += seconds;
    }

    pub fn collateral_wallet(&self, account: &Pubkey, asset: &Pubkey) -> u128 {
        use dsc_engine::FungibleAsset;
        self.engine.collateral_token(asset).unwrap().balance_of(account)
    }

    pub fn dsc_wallet(&self, account: &Pubkey) -> u128 {
        use dsc_engine::DebtToken;
        self.engine.debt_token().balance_of(account)
    }

    pub fn dsc_supply(&self) -> u128 {
        use dsc_engine::DebtToken;
        self.engine.debt_token().total_supply()
    }
}
