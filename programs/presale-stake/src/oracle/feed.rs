use super::Quote;
use crate::error::ErrorCode;
use crate::utils::{pow10, to_u128, U256};
use anchor_lang::prelude::*;
use pyth_solana_receiver_sdk::price_update::{PriceUpdateV2, VerificationLevel};

/// Largest exponent magnitude a `u128` price scale can carry.
const MAX_FEED_DECIMALS: i32 = 38;

/// Latest answer of a primary price feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedObservation {
    pub price: i64,
    pub exponent: i32,
    pub publish_time: i64,
}

impl FeedObservation {
    /// Reads a fully verified Pyth `PriceUpdateV2` account for `feed_id`.
    ///
    /// Freshness is left to [`FeedObservation::quote`], the only age check.
    pub fn load(info: &AccountInfo, feed_id: &[u8; 32]) -> Result<Self> {
        require_keys_eq!(*info.owner, PriceUpdateV2::owner(), ErrorCode::InvalidPriceSource);
        let data = info.try_borrow_data()?;
        let update = PriceUpdateV2::try_deserialize(&mut &data[..])?;
        require!(
            update.verification_level.gte(VerificationLevel::Full),
            ErrorCode::InvalidPriceSource
        );
        let price = update.get_price_unchecked(feed_id)?;
        Ok(Self {
            price: price.price,
            exponent: price.exponent,
            publish_time: price.publish_time,
        })
    }

    /// Rejects a non-positive price or one published more than `max_age`
    /// seconds before `now`.
    pub fn quote(&self, now: i64, max_age: u64) -> Result<Quote> {
        require_gt!(self.price, 0, ErrorCode::InvalidPriceSource);
        let age = now.saturating_sub(self.publish_time);
        require!(
            age <= i64::try_from(max_age).unwrap_or(i64::MAX),
            ErrorCode::InvalidPriceSource
        );
        require!(
            self.exponent.abs() <= MAX_FEED_DECIMALS,
            ErrorCode::InvalidPriceSource
        );

        let price = self.price as u128;
        if self.exponent <= 0 {
            Ok(Quote {
                price,
                decimals: (-self.exponent) as u8,
            })
        } else {
            let scaled = U256::from(price)
                .checked_mul(pow10(self.exponent as u32)?)
                .ok_or(ErrorCode::MathOverflow)?;
            Ok(Quote {
                price: to_u128(scaled)?,
                decimals: 0,
            })
        }
    }
}
