//! Fixed point helpers
//!
//! Every formula multiplies before it divides. Intermediate products are
//! widened to 256 bits so `a * b / d` only fails when the quotient itself
//! does not fit in a `u128`.

use primitive_types::U256;

use crate::error::DscEngineError;

/// `a * b / denominator`, rounded down
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Result<u128, DscEngineError> {
    if denominator == 0 {
        return Err(DscEngineError::ArithmeticOverflow);
    }

    let product = U256::from(a)
        .checked_mul(U256::from(b))
        .ok_or(DscEngineError::ArithmeticOverflow)?;
    let quotient = product / U256::from(denominator);

    narrow(quotient)
}

/// Same as `mul_div` but clamps a quotient above `u128::MAX` instead of failing
pub fn mul_div_saturating(a: u128, b: u128, denominator: u128) -> u128 {
    if denominator == 0 {
        return u128::MAX;
    }

    // a * b of two u128 values always fits in 256 bits
    let product = U256::from(a).saturating_mul(U256::from(b));
    narrow(product / U256::from(denominator)).unwrap_or(u128::MAX)
}

/// `10^exp` as u128
pub fn pow10(exp: u32) -> Result<u128, DscEngineError> {
    10u128
        .checked_pow(exp)
        .ok_or(DscEngineError::ArithmeticOverflow)
}

pub fn checked_add(a: u128, b: u128) -> Result<u128, DscEngineError> {
    a.checked_add(b).ok_or(DscEngineError::ArithmeticOverflow)
}

fn narrow(value: U256) -> Result<u128, DscEngineError> {
    if value > U256::from(u128::MAX) {
        Err(DscEngineError::ArithmeticOverflow)
    } else {
        Ok(value.low_u128())
    }
}
