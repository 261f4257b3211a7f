use crate::states::{GlobalConfig, UserStakeInfo, GLOBAL_CONFIG_SEED, USER_STAKE_INFO_SEED};
use crate::utils::transfer_with_authority;
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

/// Pays out a position whose lock has elapsed.
///
/// Funds movement: the full `token_balance` moves from `token_vault` to the
/// owner's ATA. Partial withdrawals are not supported.
#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// Position owner (payer for ATA creation if needed).
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        mut,
        seeds = [
            USER_STAKE_INFO_SEED.as_bytes(),
            owner.key().as_ref()
        ],
        bump = user_stake_info.bump,
    )]
    pub user_stake_info: Account<'info, UserStakeInfo>,

    /// Program authority PDA (token authority of the vault).
    ///
    /// CHECK: PDA derivation enforced by seeds; used only as a signer.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(mut, address = global_config.token_vault)]
    pub token_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(address = global_config.project_mint)]
    pub project_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Owner's ATA for the project token; created on demand.
    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = project_mint,
        associated_token::authority = owner,
        associated_token::token_program = token_program,
    )]
    pub owner_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,
}

/// Transfers the whole balance to the owner, then leaves the position empty
/// (`token_balance` and `lock_end_time` zeroed).
///
/// # Fails
/// - `NothingToWithdraw` if the balance is zero.
/// - `LockNotElapsed` while `now < lock_end_time`.
/// - `InsufficientVault` if the vault cannot cover the balance.
pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let vault_balance = ctx.accounts.token_vault.amount;
    let amount = ctx.accounts.user_stake_info.withdraw(now, vault_balance)?;

    transfer_with_authority(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.token_vault.to_account_info(),
        ctx.accounts.owner_token_account.to_account_info(),
        ctx.accounts.project_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.project_mint.decimals,
        &[&[crate::AUTH_SEED.as_bytes(), &[ctx.bumps.authority]]],
    )?;

    msg!("Withdraw: {} received {} tokens", ctx.accounts.owner.key(), amount);
    Ok(())
}
