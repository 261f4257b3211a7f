use crate::error::ErrorCode;
use anchor_lang::prelude::*;

/// Purchases worth at least `min_usd_value` earn `bonus_rate / RATE_DENOMINATOR` extra tokens.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BonusTier {
    pub min_usd_value: u128,
    pub bonus_rate: u64,
}

impl BonusTier {
    pub const LEN: usize = 16 + 8;
}

/// Bonus of the highest tier whose threshold does not exceed `usd_value`.
///
/// `tiers` must be strictly ascending by threshold.
pub fn bonus_for(tiers: &[BonusTier], usd_value: u128) -> u64 {
    let reached = tiers.partition_point(|tier| tier.min_usd_value <= usd_value);
    match reached {
        0 => 0,
        n => tiers[n - 1].bonus_rate,
    }
}

pub fn validate_bonus_tiers(tiers: &[BonusTier]) -> Result<()> {
    require!(
        tiers.len() <= crate::states::MAX_BONUS_TIERS,
        ErrorCode::InvalidBonusSchedule
    );
    require!(
        tiers
            .windows(2)
            .all(|pair| pair[0].min_usd_value < pair[1].min_usd_value),
        ErrorCode::InvalidBonusSchedule
    );
    Ok(())
}
