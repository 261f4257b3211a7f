//! Concentrated-liquidity pool fallback.
//!
//! Only the fixed header of the pool state is read: the two mints, their
//! decimals and the current `sqrt_price_x64` (Q64.64 square root of
//! `token_1 / token_0` in raw units). The quote side is assumed USD-pegged.

use super::Quote;
use crate::error::ErrorCode;
use crate::utils::{pow10, to_u128, U256};
use crate::USD_DECIMALS;
use anchor_lang::prelude::*;
use arrayref::{array_ref, array_refs};

/// Discriminator through `sqrt_price_x64` of the pool state.
pub const CLMM_POOL_HEADER_LEN: usize = 269;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClmmObservation {
    pub sqrt_price_x64: u128,
    pub asset_is_token_0: bool,
    pub decimals_0: u8,
    pub decimals_1: u8,
}

impl ClmmObservation {
    pub fn load(info: &AccountInfo, asset_mint: &Pubkey) -> Result<Self> {
        let data = info.try_borrow_data()?;
        Self::decode(&data, asset_mint)
    }

    pub fn decode(data: &[u8], asset_mint: &Pubkey) -> Result<Self> {
        require!(
            data.len() >= CLMM_POOL_HEADER_LEN,
            ErrorCode::InvalidPriceSource
        );
        let header = array_ref![data, 0, CLMM_POOL_HEADER_LEN];
        #[rustfmt::skip]
        let (
            _discriminator, _bump, _amm_config, _owner,
            mint_0, mint_1, _vault_0, _vault_1, _observation,
            decimals_0, decimals_1, _tick_spacing, _liquidity, sqrt_price_x64,
        ) = array_refs![header, 8, 1, 32, 32, 32, 32, 32, 32, 32, 1, 1, 2, 16, 16];

        let asset_is_token_0 = if mint_0 == &asset_mint.to_bytes() {
            true
        } else if mint_1 == &asset_mint.to_bytes() {
            false
        } else {
            return err!(ErrorCode::InvalidPriceSource);
        };

        Ok(Self {
            sqrt_price_x64: u128::from_le_bytes(*sqrt_price_x64),
            asset_is_token_0,
            decimals_0: decimals_0[0],
            decimals_1: decimals_1[0],
        })
    }

    /// Price of one whole asset unit in the other token, 18 decimals.
    pub fn quote(&self) -> Result<Quote> {
        require!(self.sqrt_price_x64 > 0, ErrorCode::InvalidPriceSource);
        let sqrt = U256::from(self.sqrt_price_x64);
        let price_x128 = sqrt.checked_mul(sqrt).ok_or(ErrorCode::MathOverflow)?;

        let price = if self.asset_is_token_0 {
            // price_x128 * 10^18 * 10^d0 / (2^128 * 10^d1), shifted in two
            // steps so the intermediate stays inside 256 bits.
            let scaled = price_x128
                .checked_mul(pow10(u32::from(USD_DECIMALS))?)
                .ok_or(ErrorCode::MathOverflow)?
                >> 64;
            let scaled = scaled
                .checked_mul(pow10(u32::from(self.decimals_0))?)
                .ok_or(ErrorCode::MathOverflow)?
                >> 64;
            scaled / pow10(u32::from(self.decimals_1))?
        } else {
            let numerator = (U256::one() << 128)
                .checked_mul(pow10(u32::from(USD_DECIMALS) + u32::from(self.decimals_1))?)
                .ok_or(ErrorCode::MathOverflow)?;
            let denominator = price_x128
                .checked_mul(pow10(u32::from(self.decimals_0))?)
                .ok_or(ErrorCode::MathOverflow)?;
            numerator / denominator
        };

        let price = to_u128(price)?;
        require_gt!(price, 0, ErrorCode::InvalidPriceSource);
        Ok(Quote {
            price,
            decimals: USD_DECIMALS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_USD: u128 = 1_000_000_000_000_000_000;

    fn pool_header(mint_0: Pubkey, mint_1: Pubkey, d0: u8, d1: u8, sqrt_price_x64: u128) -> Vec<u8> {
        let mut data = vec![0u8; CLMM_POOL_HEADER_LEN + 64];
        data[73..105].copy_from_slice(mint_0.as_ref());
        data[105..137].copy_from_slice(mint_1.as_ref());
        data[233] = d0;
        data[234] = d1;
        data[253..269].copy_from_slice(&sqrt_price_x64.to_le_bytes());
        data
    }

    #[test]
    fn decodes_header_fields() {
        let asset = Pubkey::new_unique();
        let usdc = Pubkey::new_unique();
        let data = pool_header(usdc, asset, 6, 9, 7u128 << 64);
        let observation = ClmmObservation::decode(&data, &asset).unwrap();
        assert_eq!(
            observation,
            ClmmObservation {
                sqrt_price_x64: 7u128 << 64,
                asset_is_token_0: false,
                decimals_0: 6,
                decimals_1: 9,
            }
        );
    }

    #[test]
    fn rejects_foreign_pool_and_short_data() {
        let data = pool_header(Pubkey::new_unique(), Pubkey::new_unique(), 6, 6, 1u128 << 64);
        assert!(ClmmObservation::decode(&data, &Pubkey::new_unique()).is_err());
        assert!(ClmmObservation::decode(&data[..200], &Pubkey::new_unique()).is_err());
    }

    #[test]
    fn asset_as_token_0() {
        // one raw token_0 buys one raw token_1; 9 vs 6 decimals => 1000 per whole token_0
        let observation = ClmmObservation {
            sqrt_price_x64: 1u128 << 64,
            asset_is_token_0: true,
            decimals_0: 9,
            decimals_1: 6,
        };
        assert_eq!(observation.quote().unwrap().price, 1_000 * ONE_USD);
    }

    #[test]
    fn asset_as_token_1_inverts() {
        let observation = ClmmObservation {
            sqrt_price_x64: 1u128 << 64,
            asset_is_token_0: false,
            decimals_0: 9,
            decimals_1: 6,
        };
        assert_eq!(observation.quote().unwrap().price, ONE_USD / 1_000);
    }

    #[test]
    fn squared_price_of_two() {
        // sqrt(4) = 2 => token_1 / token_0 = 4 with equal decimals
        let observation = ClmmObservation {
            sqrt_price_x64: 2u128 << 64,
            asset_is_token_0: true,
            decimals_0: 6,
            decimals_1: 6,
        };
        assert_eq!(observation.quote().unwrap().price, 4 * ONE_USD);
    }
}
