//! Fixed-point helpers backed by a 256-bit intermediate.

use crate::error::ErrorCode;
use anchor_lang::prelude::*;

/// No prelude in scope here: the macro expands to two-argument `Result`.
mod wide {
    #![allow(clippy::assign_op_pattern)]
    #![allow(clippy::ptr_offset_with_cast)]
    #![allow(clippy::manual_range_contains)]

    use uint::construct_uint;

    construct_uint! {
        pub struct U256(4);
    }
}

pub use wide::U256;

/// Largest power of ten representable in a `U256`.
const MAX_POW10: u32 = 77;

pub fn pow10(exp: u32) -> Result<U256> {
    require!(exp <= MAX_POW10, ErrorCode::MathOverflow);
    Ok(U256::exp10(exp as usize))
}

pub fn to_u128(value: U256) -> Result<u128> {
    require!(value.bits() <= 128, ErrorCode::MathOverflow);
    Ok(value.low_u128())
}

pub fn to_u64(value: U256) -> Result<u64> {
    require!(value.bits() <= 64, ErrorCode::MathOverflow);
    Ok(value.low_u64())
}

/// Applies `1 + rate / RATE_DENOMINATOR` to `amount`.
pub fn apply_bonus(amount: u64, rate: u64) -> Result<u64> {
    let denominator = U256::from(crate::RATE_DENOMINATOR);
    let multiplier = denominator
        .checked_add(U256::from(rate))
        .ok_or(ErrorCode::MathOverflow)?;
    let scaled = U256::from(amount)
        .checked_mul(multiplier)
        .ok_or(ErrorCode::MathOverflow)?;
    to_u64(scaled / denominator)
}
