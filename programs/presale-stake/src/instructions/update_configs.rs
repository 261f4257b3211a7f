use crate::error::ErrorCode;
use crate::states::{GlobalConfig, LockExtension, GLOBAL_CONFIG_SEED};
use anchor_lang::prelude::*;

/// Accounts context for the `update_config` instruction.
///
/// Only the current `admin` in `global_config` or the program-level admin
/// (`crate::admin::id()`) may update the configuration.
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    /// Authorized signer: must be the stored admin or the hardcoded program admin.
    #[account(
        constraint = (owner.key() == global_config.admin || owner.key() == crate::admin::id()) @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    /// Global configuration account to be updated.
    #[account(
        mut,
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    /// System program (not directly used in updates but required for Anchor context).
    pub system_program: Program<'info, System>,
}

/// Updates selected fields of the global configuration.
///
/// # Param Mapping
/// - `0`: **admin** → new admin Pubkey passed via `remaining_accounts[0]`.
/// - `1`: **treasury** → new treasury Pubkey passed via `remaining_accounts[0]`.
/// - `2`: **lock_duration** → default lock in seconds (must be positive).
/// - `3`: **purchase_enabled** → toggles purchasing (nonzero = enabled).
/// - `4`: **max_price_age** → primary feed staleness bound in seconds.
/// - `5`: **referral_bonus_rate** → rate over `RATE_DENOMINATOR`.
/// - `6`: **lock_extension** → `0` stack, `1` refresh.
///
/// Any other `param` value returns `ErrorCode::InvalidParam`.
///
/// # Example
/// ```ignore
/// // Pause purchases
/// update_config(ctx, 3, 0)?;
/// ```
pub fn update_config(ctx: Context<UpdateConfig>, param: u8, value: u64) -> Result<()> {
    let global_config = &mut ctx.accounts.global_config;
    match param {
        0 => {
            let new_admin = remaining_key(ctx.remaining_accounts)?;
            require_keys_neq!(new_admin, Pubkey::default());
            global_config.admin = new_admin;
        }
        1 => {
            let new_treasury = remaining_key(ctx.remaining_accounts)?;
            require_keys_neq!(new_treasury, Pubkey::default(), ErrorCode::InvalidTreasury);
            global_config.treasury = new_treasury;
        }
        2 => {
            let lock_duration = i64::try_from(value).map_err(|_| error!(ErrorCode::InvalidParam))?;
            require_gt!(lock_duration, 0, ErrorCode::InvalidParam);
            global_config.lock_duration = lock_duration;
        }
        3 => {
            global_config.purchase_enabled = value != 0;
        }
        4 => {
            global_config.max_price_age = value;
        }
        5 => {
            global_config.referral_bonus_rate = value;
        }
        6 => {
            global_config.lock_extension = LockExtension::from_u64(value)?;
        }
        _ => return Err(error!(ErrorCode::InvalidParam)),
    }

    msg!("Config param {} updated to {}", param, value);
    Ok(())
}

fn remaining_key(accounts: &[AccountInfo]) -> Result<Pubkey> {
    Ok(*accounts
        .first()
        .ok_or(error!(ErrorCode::MissingRemainingAccount))?
        .key)
}
