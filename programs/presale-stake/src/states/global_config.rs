use crate::error::ErrorCode;
use crate::states::BonusTier;
use anchor_lang::prelude::*;
use anchor_spl::token::spl_token;

//
// ──────────────────────────────────────────────────────────────────────────────
// Global Configuration Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive the global configuration account.
pub const GLOBAL_CONFIG_SEED: &str = "global_config";

pub const MAX_ACCEPTED_ASSETS: usize = 8;
pub const MAX_BONUS_TIERS: usize = 16;

/// Decimals of the native coin (lamports).
pub const NATIVE_DECIMALS: u8 = 9;

/// Marker used in place of a mint for payments in the native coin.
pub fn native_asset() -> Pubkey {
    spl_token::native_mint::id()
}

/// Constant-product pool used as the first fallback price source.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolV2Ref {
    /// Pool vault holding the payment asset.
    pub base_vault: Pubkey,
    /// Pool vault holding the USD-pegged side.
    pub quote_vault: Pubkey,
    pub quote_mint: Pubkey,
    pub quote_decimals: u8,
}

impl PoolV2Ref {
    pub const LEN: usize = 32 * 3 + 1;
}

/// A payment asset and the sources used to value it.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AcceptedAsset {
    /// SPL mint, or `native_asset()` for the native coin.
    pub mint: Pubkey,
    /// Pyth price update account of the primary feed.
    pub feed_account: Pubkey,
    pub feed_id: [u8; 32],
    pub pool_v2: Option<PoolV2Ref>,
    /// Concentrated-liquidity pool state account.
    pub pool_v3: Option<Pubkey>,
}

impl AcceptedAsset {
    pub const LEN: usize = 32 + 32 + 32 + (1 + PoolV2Ref::LEN) + (1 + 32);

    pub fn is_native(&self) -> bool {
        self.mint == native_asset()
    }
}

/// How a repeated purchase moves the lock end.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LockExtension {
    /// `max(lock_end, now) + duration`: every purchase adds a full duration.
    #[default]
    Stack,
    /// `max(lock_end, now + duration)`: the lock restarts from the latest purchase.
    Refresh,
}

impl LockExtension {
    pub fn from_u64(value: u64) -> Result<Self> {
        match value {
            0 => Ok(LockExtension::Stack),
            1 => Ok(LockExtension::Refresh),
            _ => err!(ErrorCode::InvalidParam),
        }
    }
}

/// Protocol-wide parameters, accepted assets and the bonus schedule.
#[account]
#[derive(Default, Debug)]
pub struct GlobalConfig {
    /// PDA bump for this account (for seed derivation).
    pub bump: u8,

    /// Current admin of the presale (authorized to update config).
    pub admin: Pubkey,

    /// Mint of the token being sold; never accepted as payment.
    pub project_mint: Pubkey,

    /// Program-owned vault holding project tokens paid out on withdraw.
    pub token_vault: Pubkey,

    /// Wallet receiving every payment.
    pub treasury: Pubkey,

    /// UNIX timestamp the presale opens; also anchors the first round.
    pub start_time: i64,

    /// Default lock applied per purchase, in seconds.
    pub lock_duration: i64,

    pub lock_extension: LockExtension,

    /// Maximum age in seconds of a primary feed update.
    pub max_price_age: u64,

    /// Extra bonus rate granted when a referrer other than the buyer is given.
    pub referral_bonus_rate: u64,

    /// Global switch: if `false`, purchasing is disabled.
    pub purchase_enabled: bool,

    pub accepted_assets: Vec<AcceptedAsset>,

    pub bonus_tiers: Vec<BonusTier>,
}

impl GlobalConfig {
    /// Fixed serialized size of the account (for allocation at initialization).
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 1: bump
    /// - 32 * 4: four Pubkeys
    /// - 8 * 4: two i64 and two u64 fields
    /// - 1 + 1: lock extension, purchase switch
    /// - 4 + n * size: two capped vectors
    pub const LEN: usize = 8
        + 1
        + 32 * 4
        + 8 * 4
        + 1
        + 1
        + (4 + MAX_ACCEPTED_ASSETS * AcceptedAsset::LEN)
        + (4 + MAX_BONUS_TIERS * BonusTier::LEN);

    /// Looks up a payment asset. The project token is always rejected.
    pub fn accepted_asset(&self, mint: &Pubkey) -> Result<&AcceptedAsset> {
        require_keys_neq!(*mint, self.project_mint, ErrorCode::UnsupportedAsset);
        self.accepted_assets
            .iter()
            .find(|asset| asset.mint == *mint)
            .ok_or(error!(ErrorCode::UnsupportedAsset))
    }

    pub fn validate_assets(assets: &[AcceptedAsset], project_mint: &Pubkey) -> Result<()> {
        require!(
            !assets.is_empty() && assets.len() <= MAX_ACCEPTED_ASSETS,
            ErrorCode::InvalidAssetConfig
        );
        for (i, asset) in assets.iter().enumerate() {
            require_keys_neq!(asset.mint, *project_mint, ErrorCode::InvalidAssetConfig);
            require!(
                assets[..i].iter().all(|other| other.mint != asset.mint),
                ErrorCode::InvalidAssetConfig
            );
        }
        Ok(())
    }

    /// Joins each accepted asset with the user's holdings of it.
    pub fn supported_tokens_info<F>(&self, mut holding_of: F) -> Vec<SupportedTokenInfo>
    where
        F: FnMut(&AcceptedAsset) -> Holding,
    {
        self.accepted_assets
            .iter()
            .map(|asset| {
                let holding = holding_of(asset);
                SupportedTokenInfo {
                    asset: *asset,
                    balance: holding.balance,
                    allowance: holding.allowance,
                }
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Holding {
    pub balance: u64,
    /// Amount the presale authority may pull; equals the balance for the native coin.
    pub allowance: u64,
}

impl Holding {
    /// Holding of a token account; only a delegation to `authority` counts as allowance.
    pub fn delegated(
        balance: u64,
        delegate: Option<Pubkey>,
        delegated_amount: u64,
        authority: &Pubkey,
    ) -> Self {
        let allowance = match delegate {
            Some(delegate) if delegate == *authority => delegated_amount,
            _ => 0,
        };
        Holding { balance, allowance }
    }

    pub fn native(lamports: u64) -> Self {
        Holding {
            balance: lamports,
            allowance: lamports,
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct SupportedTokenInfo {
    pub asset: AcceptedAsset,
    pub balance: u64,
    pub allowance: u64,
}
