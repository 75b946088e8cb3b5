mod common;

use common::*;
use dsc_engine::{
    constants::{MIN_HEALTH_FACTOR, PRECISION},
    error::DscEngineError,
    instruction::EngineInstruction,
    processor::Processor,
    LiquidationQuote,
};
use solana_program::pubkey::Pubkey;

const COLLATERAL: u128 = 10 * PRECISION;
const DEBT: u128 = 100 * PRECISION;

/// User with 10 ETH backing $100 and a liquidator holding $100 of DSC
/// against `liquidator_collateral` ETH
fn underwater_setup(liquidator_collateral: u128) -> (Harness, Pubkey, Pubkey) {
    let mut harness = Harness::new();
    let user = harness.funded_account();
    let liquidator = harness.funded_account();
    let weth = harness.weth;

    harness
        .engine
        .deposit_collateral_and_mint_dsc(&user, &weth, COLLATERAL, DEBT, &harness.clock)
        .unwrap();
    harness
        .engine
        .deposit_collateral_and_mint_dsc(&liquidator, &weth, liquidator_collateral, DEBT, &harness.clock)
        .unwrap();

    (harness, user, liquidator)
}

#[test]
fn test_liquidation_seizes_collateral_with_bonus() {
    let (mut harness, user, liquidator) = underwater_setup(20 * PRECISION);
    let weth = harness.weth;

    // $18/ETH: $180 backing $100
    harness.set_price(&weth, usd_answer(18));
    let starting = harness.engine.health_factor(&user, &harness.clock).unwrap();
    assert_eq!(starting, PRECISION * 9 / 10);

    let quote = harness
        .engine
        .liquidation_quote(&weth, DEBT, &harness.clock)
        .unwrap();
    let token_amount = DEBT * PRECISION / (18 * PRECISION);
    assert_eq!(
        quote,
        LiquidationQuote {
            token_amount,
            bonus: token_amount / 10,
            total_seized: token_amount + token_amount / 10,
        }
    );

    harness
        .engine
        .liquidate(&liquidator, &weth, &user, DEBT, &harness.clock)
        .unwrap();

    assert_eq!(harness.engine.dsc_minted(&user), 0);
    assert_eq!(
        harness.engine.collateral_balance_of(&user, &weth),
        COLLATERAL - quote.total_seized
    );
    assert!(harness.engine.health_factor(&user, &harness.clock).unwrap() > starting);

    // Liquidator paid with their own DSC, keeps their own debt
    assert_eq!(
        harness.collateral_wallet(&liquidator, &weth),
        STARTING_BALANCE - 20 * PRECISION + quote.total_seized
    );
    assert_eq!(harness.dsc_wallet(&liquidator), 0);
    assert_eq!(harness.engine.dsc_minted(&liquidator), DEBT);
    assert_eq!(harness.dsc_supply(), DEBT);
    assert_eq!(harness.dsc_wallet(&user), DEBT);
}

#[test]
fn test_partial_liquidation_improves_health() {
    let (mut harness, user, liquidator) = underwater_setup(20 * PRECISION);
    let weth = harness.weth;
    harness.set_price(&weth, usd_answer(18));

    let mut previous = harness.engine.health_factor(&user, &harness.clock).unwrap();
    for _ in 0..3 {
        harness
            .engine
            .liquidate(&liquidator, &weth, &user, 10 * PRECISION, &harness.clock)
            .unwrap();
        let current = harness.engine.health_factor(&user, &harness.clock).unwrap();
        assert!(current > previous);
        previous = current;
    }

    // 8.17 ETH at $18 backs $70 again
    assert_eq!(harness.engine.dsc_minted(&user), 70 * PRECISION);
    assert!(previous >= MIN_HEALTH_FACTOR);
    assert_eq!(harness.dsc_wallet(&liquidator), 70 * PRECISION);

    assert_eq!(
        harness
            .engine
            .liquidate(&liquidator, &weth, &user, 10 * PRECISION, &harness.clock),
        Err(DscEngineError::HealthFactorOk)
    );
}

#[test]
fn test_cannot_liquidate_healthy_account() {
    let (mut harness, user, liquidator) = underwater_setup(20 * PRECISION);
    let weth = harness.weth;

    assert_eq!(
        harness
            .engine
            .liquidate(&liquidator, &weth, &user, 10 * PRECISION, &harness.clock),
        Err(DscEngineError::HealthFactorOk)
    );

    // Debt-free account
    assert_eq!(
        harness
            .engine
            .liquidate(&liquidator, &weth, &Pubkey::new_unique(), 10 * PRECISION, &harness.clock),
        Err(DscEngineError::HealthFactorOk)
    );
}

#[test]
fn test_liquidation_input_validation() {
    let (mut harness, user, liquidator) = underwater_setup(20 * PRECISION);
    let weth = harness.weth;
    harness.set_price(&weth, usd_answer(18));

    assert_eq!(
        harness.engine.liquidate(&liquidator, &weth, &user, 0, &harness.clock),
        Err(DscEngineError::InvalidAmount)
    );
    assert_eq!(
        harness
            .engine
            .liquidate(&liquidator, &Pubkey::new_unique(), &user, DEBT, &harness.clock),
        Err(DscEngineError::UnsupportedAsset)
    );
}

#[test]
fn test_liquidation_must_improve_health() {
    let (mut harness, user, liquidator) = underwater_setup(20 * PRECISION);
    let weth = harness.weth;

    // $105 backing $100: seizing 110% of the covered debt makes things worse
    harness.set_price(&weth, 10_5000_0000);
    let ledger_before = harness.engine.ledger().clone();

    assert_eq!(
        harness
            .engine
            .liquidate(&liquidator, &weth, &user, 10 * PRECISION, &harness.clock),
        Err(DscEngineError::HealthFactorNotImproved)
    );
    assert_eq!(harness.engine.ledger(), &ledger_before);
    assert_eq!(harness.dsc_wallet(&liquidator), DEBT);
}

#[test]
fn test_liquidator_must_stay_safe() {
    // Liquidator backs $100 with 11 ETH
    let (mut harness, user, liquidator) = underwater_setup(11 * PRECISION);
    let weth = harness.weth;

    // $18/ETH: liquidator at $198 -> 0.99
    harness.set_price(&weth, usd_answer(18));
    let liquidator_health = harness.engine.health_factor(&liquidator, &harness.clock).unwrap();
    assert_eq!(liquidator_health, PRECISION * 99 / 100);

    assert_eq!(
        harness
            .engine
            .liquidate(&liquidator, &weth, &user, DEBT, &harness.clock),
        Err(DscEngineError::HealthFactorBroken(liquidator_health))
    );
    assert_eq!(harness.engine.dsc_minted(&user), DEBT);
    assert_eq!(harness.engine.collateral_balance_of(&user, &weth), COLLATERAL);
}

#[test]
fn test_liquidator_without_allowance_reverts() {
    let (mut harness, user, liquidator) = underwater_setup(20 * PRECISION);
    let weth = harness.weth;
    let engine_id = harness.engine_id;
    harness.set_price(&weth, usd_answer(18));
    harness.engine.debt_token_mut().approve(&liquidator, &engine_id, 0);

    assert_eq!(
        harness
            .engine
            .liquidate(&liquidator, &weth, &user, DEBT, &harness.clock),
        Err(DscEngineError::TransferFailed)
    );
    assert_eq!(harness.engine.dsc_minted(&user), DEBT);
    assert_eq!(harness.engine.collateral_balance_of(&user, &weth), COLLATERAL);
    assert_eq!(harness.dsc_wallet(&liquidator), DEBT);
    assert_eq!(harness.collateral_wallet(&liquidator, &weth), STARTING_BALANCE - 20 * PRECISION);
}

#[test]
fn test_collapsed_collateral_cannot_be_seized() {
    let (mut harness, user, liquidator) = underwater_setup(20 * PRECISION);
    let weth = harness.weth;

    // $5/ETH: 10 ETH is worth $50 but covering $100 would seize 22 ETH
    harness.set_price(&weth, usd_answer(5));
    let ledger_before = harness.engine.ledger().clone();
    let engine_weth_before = harness.collateral_wallet(&harness.engine_id, &weth);

    assert_eq!(
        harness
            .engine
            .liquidate(&liquidator, &weth, &user, DEBT, &harness.clock),
        Err(DscEngineError::InsufficientCollateral)
    );

    assert_eq!(harness.engine.ledger(), &ledger_before);
    assert_eq!(harness.collateral_wallet(&harness.engine_id, &weth), engine_weth_before);
    assert_eq!(harness.dsc_wallet(&liquidator), DEBT);
    assert_eq!(harness.dsc_supply(), 2 * DEBT);
}

#[test]
fn test_protocol_can_become_undercollateralized() {
    let (mut harness, user, liquidator) = underwater_setup(20 * PRECISION);
    let weth = harness.weth;

    harness.set_price(&weth, usd_answer(5));

    // 30 ETH at $5 backs 200 DSC
    let total_collateral = harness.engine.ledger().total_collateral(&weth).unwrap();
    let collateral_value = harness
        .engine
        .usd_value(&weth, total_collateral, &harness.clock)
        .unwrap();
    assert_eq!(collateral_value, 150 * PRECISION);
    assert!(collateral_value < harness.dsc_supply());
    assert_eq!(harness.engine.ledger().total_debt().unwrap(), harness.dsc_supply());

    // Liquidators cannot restore it: full cover over-seizes, partial cover worsens health
    assert_eq!(
        harness
            .engine
            .liquidate(&liquidator, &weth, &user, DEBT, &harness.clock),
        Err(DscEngineError::InsufficientCollateral)
    );
    assert_eq!(
        harness
            .engine
            .liquidate(&liquidator, &weth, &user, 40 * PRECISION, &harness.clock),
        Err(DscEngineError::HealthFactorNotImproved)
    );
}

#[test]
fn test_liquidate_through_processor() {
    let (mut harness, user, liquidator) = underwater_setup(20 * PRECISION);
    let weth = harness.weth;
    harness.set_price(&weth, usd_answer(18));

    let data = EngineInstruction::Liquidate {
        asset: weth,
        user,
        debt_to_cover: DEBT,
    }
    .pack()
    .unwrap();
    Processor::process(&mut harness.engine, &liquidator, &harness.clock, &data).unwrap();

    assert_eq!(harness.engine.dsc_minted(&user), 0);
}
