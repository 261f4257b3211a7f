//! USD valuation of payment assets.
//!
//! A payment is valued from the first source that answers, in the fixed
//! order primary feed, constant-product pool, concentrated-liquidity pool.
//! Each source is decoded into an observation up front so the valuation
//! itself is pure and runs before any ledger mutation.

pub mod feed;
pub use feed::*;

pub mod pool_v2;
pub use pool_v2::*;

pub mod pool_v3;
pub use pool_v3::*;

use crate::error::ErrorCode;
use crate::states::AcceptedAsset;
use crate::utils::{find_account, pow10, to_u128, U256};
use crate::USD_DECIMALS;
use anchor_lang::prelude::*;

/// Price of one whole asset unit in USD, scaled by `10^decimals`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quote {
    pub price: u128,
    pub decimals: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    Feed,
    PoolV2,
    PoolV3,
}

/// One price source for an asset, already decoded from its account(s).
#[derive(Clone, Debug, PartialEq)]
pub enum PriceSource {
    Feed(FeedObservation),
    PoolV2(ReserveObservation),
    PoolV3(ClmmObservation),
    /// Configured but its account was missing or failed to decode.
    Unavailable(SourceKind),
}

impl PriceSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            PriceSource::Feed(_) => SourceKind::Feed,
            PriceSource::PoolV2(_) => SourceKind::PoolV2,
            PriceSource::PoolV3(_) => SourceKind::PoolV3,
            PriceSource::Unavailable(kind) => *kind,
        }
    }

    pub fn quote(&self, now: i64, max_age: u64) -> Result<Quote> {
        match self {
            PriceSource::Feed(observation) => observation.quote(now, max_age),
            PriceSource::PoolV2(observation) => observation.quote(),
            PriceSource::PoolV3(observation) => observation.quote(),
            PriceSource::Unavailable(_) => err!(ErrorCode::InvalidPriceSource),
        }
    }
}

/// Decodes every configured source of `asset` from the instruction's
/// remaining accounts, in priority order. A missing or unreadable account
/// yields `Unavailable` so valuation can fall through to the next source.
pub fn load_sources(
    asset: &AcceptedAsset,
    asset_decimals: u8,
    accounts: &[AccountInfo],
) -> Vec<PriceSource> {
    let mut sources = Vec::with_capacity(3);

    let feed = find_account(accounts, &asset.feed_account)
        .map(|info| FeedObservation::load(info, &asset.feed_id));
    sources.push(match feed {
        Some(Ok(observation)) => PriceSource::Feed(observation),
        _ => PriceSource::Unavailable(SourceKind::Feed),
    });

    if let Some(pool) = asset.pool_v2 {
        let vaults = find_account(accounts, &pool.base_vault)
            .zip(find_account(accounts, &pool.quote_vault));
        let observation = vaults.map(|(base, quote)| {
            ReserveObservation::load(base, quote, &pool, &asset.mint, asset_decimals)
        });
        sources.push(match observation {
            Some(Ok(observation)) => PriceSource::PoolV2(observation),
            _ => PriceSource::Unavailable(SourceKind::PoolV2),
        });
    }

    if let Some(pool) = asset.pool_v3 {
        let observation =
            find_account(accounts, &pool).map(|info| ClmmObservation::load(info, &asset.mint));
        sources.push(match observation {
            Some(Ok(observation)) => PriceSource::PoolV3(observation),
            _ => PriceSource::Unavailable(SourceKind::PoolV3),
        });
    }

    sources
}

/// Returns the quote of the first source that answers.
pub fn first_quote(sources: &[PriceSource], now: i64, max_age: u64) -> Result<(SourceKind, Quote)> {
    for source in sources {
        match source.quote(now, max_age) {
            Ok(quote) => return Ok((source.kind(), quote)),
            Err(_) => msg!("{:?} price source failed, falling back", source.kind()),
        }
    }
    err!(ErrorCode::PriceUnavailable)
}

/// `amount` (in `asset_decimals`) valued in 18-decimal USD.
///
/// `amount * price * 10^18 / 10^(asset_decimals + quote.decimals)`, with a
/// single division at the end.
pub fn usd_value(amount: u64, asset_decimals: u8, quote: &Quote) -> Result<u128> {
    let numerator = U256::from(amount)
        .checked_mul(U256::from(quote.price))
        .and_then(|v| v.checked_mul(U256::exp10(USD_DECIMALS as usize)))
        .ok_or(ErrorCode::MathOverflow)?;
    let denominator = pow10(u32::from(asset_decimals) + u32::from(quote.decimals))?;
    to_u128(numerator / denominator)
}
