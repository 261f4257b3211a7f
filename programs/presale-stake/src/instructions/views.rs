//! Read-only entry points. Each returns its value through the transaction's
//! return data and mutates nothing.

use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::read_token_account;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct SupportedTokens<'info> {
    /// CHECK: Only the key and lamport balance are read.
    pub user: UncheckedAccount<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    /// CHECK: PDA derivation enforced by seeds; compared against token delegates.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct ReadRounds<'info> {
    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        seeds = [ROUND_LEDGER_SEED.as_bytes()],
        bump,
    )]
    pub round_ledger: Box<Account<'info, RoundLedger>>,
}

#[derive(Accounts)]
pub struct ReadPosition<'info> {
    /// CHECK: Only the key is used.
    pub user: UncheckedAccount<'info>,

    /// May not exist yet; an uncreated position reads as empty.
    ///
    /// CHECK: PDA derivation enforced by seeds; deserialized in `position`.
    #[account(
        seeds = [
            USER_STAKE_INFO_SEED.as_bytes(),
            user.key().as_ref()
        ],
        bump,
    )]
    pub user_stake_info: UncheckedAccount<'info>,
}

impl ReadPosition<'_> {
    fn position(&self) -> Result<UserStakeInfo> {
        let info = self.user_stake_info.to_account_info();
        if info.data_is_empty() {
            return Ok(UserStakeInfo::default());
        }
        require_keys_eq!(*info.owner, crate::ID, ErrorCode::InvalidOwner);
        let data = info.try_borrow_data()?;
        UserStakeInfo::try_deserialize(&mut &data[..])
    }
}

/// Accepted assets joined with the user's balance and allowance.
///
/// The user's token accounts are passed as remaining accounts; an asset with
/// no matching account reports zero. For the native coin the allowance equals
/// the lamport balance.
pub fn get_supported_tokens_info<'info>(
    ctx: Context<'_, '_, 'info, 'info, SupportedTokens<'info>>,
) -> Result<Vec<SupportedTokenInfo>> {
    let user = ctx.accounts.user.key();
    let authority = ctx.accounts.authority.key();
    let lamports = ctx.accounts.user.lamports();
    let token_accounts: Vec<_> = ctx
        .remaining_accounts
        .iter()
        .filter_map(|info| read_token_account(info).ok())
        .filter(|account| account.owner == user)
        .collect();

    Ok(ctx.accounts.global_config.supported_tokens_info(|asset| {
        if asset.is_native() {
            return Holding::native(lamports);
        }
        token_accounts
            .iter()
            .find(|account| account.mint == asset.mint)
            .map(|account| {
                Holding::delegated(
                    account.amount,
                    account.delegate.into(),
                    account.delegated_amount,
                    &authority,
                )
            })
            .unwrap_or_default()
    }))
}

/// Current round as of now, including rounds elapsed since the last sale.
pub fn get_current_round(ctx: Context<ReadRounds>) -> Result<PricingRound> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.round_ledger.current_round(now)
}

pub fn get_round(ctx: Context<ReadRounds>, index: u32) -> Result<PricingRound> {
    ctx.accounts.round_ledger.round(index)
}

pub fn totals_sold(ctx: Context<ReadRounds>) -> Result<u128> {
    Ok(ctx.accounts.round_ledger.totals_sold)
}

pub fn start(ctx: Context<ReadRounds>) -> Result<i64> {
    Ok(ctx.accounts.global_config.start_time)
}

pub fn get_user_total_paid(ctx: Context<ReadPosition>) -> Result<u128> {
    Ok(ctx.accounts.position()?.total_paid_usd)
}

pub fn balance_of(ctx: Context<ReadPosition>) -> Result<u64> {
    Ok(ctx.accounts.position()?.token_balance)
}

pub fn end_staking_time(ctx: Context<ReadPosition>) -> Result<i64> {
    Ok(ctx.accounts.position()?.lock_end_time)
}

pub fn can_withdraw(ctx: Context<ReadPosition>) -> Result<bool> {
    let now = Clock::get()?.unix_timestamp;
    Ok(ctx.accounts.position()?.can_withdraw(now))
}
