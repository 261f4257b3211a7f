//! Constant-product pool fallback.
//!
//! The spot price of the asset is the ratio of the pool reserves
//! (`x * y = k` marginal price), quoted in the pool's USD-pegged side.

use super::Quote;
use crate::error::ErrorCode;
use crate::states::PoolV2Ref;
use crate::utils::{pow10, read_token_account, to_u128, U256};
use crate::USD_DECIMALS;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReserveObservation {
    pub base_reserve: u64,
    pub quote_reserve: u64,
    pub base_decimals: u8,
    pub quote_decimals: u8,
}

impl ReserveObservation {
    /// Reads both pool vaults and checks the asset side holds `asset_mint`.
    pub fn load(
        base_vault: &AccountInfo,
        quote_vault: &AccountInfo,
        pool: &PoolV2Ref,
        asset_mint: &Pubkey,
        asset_decimals: u8,
    ) -> Result<Self> {
        let base = read_vault(base_vault)?;
        let quote = read_vault(quote_vault)?;
        require_keys_eq!(base.mint, *asset_mint, ErrorCode::InvalidPriceSource);
        require_keys_eq!(quote.mint, pool.quote_mint, ErrorCode::InvalidPriceSource);
        Ok(Self {
            base_reserve: base.amount,
            quote_reserve: quote.amount,
            base_decimals: asset_decimals,
            quote_decimals: pool.quote_decimals,
        })
    }

    /// `quote_reserve / base_reserve` per whole asset unit, 18 decimals.
    pub fn quote(&self) -> Result<Quote> {
        require!(
            self.base_reserve > 0 && self.quote_reserve > 0,
            ErrorCode::InvalidPriceSource
        );
        let numerator = U256::from(self.quote_reserve)
            .checked_mul(pow10(u32::from(self.base_decimals) + u32::from(USD_DECIMALS))?)
            .ok_or(ErrorCode::MathOverflow)?;
        let denominator = U256::from(self.base_reserve)
            .checked_mul(pow10(u32::from(self.quote_decimals))?)
            .ok_or(ErrorCode::MathOverflow)?;
        let price = to_u128(numerator / denominator)?;
        require_gt!(price, 0, ErrorCode::InvalidPriceSource);
        Ok(Quote {
            price,
            decimals: USD_DECIMALS,
        })
    }
}

fn read_vault(info: &AccountInfo) -> Result<TokenAccount> {
    read_token_account(info).map_err(|_| error!(ErrorCode::InvalidPriceSource))
}
