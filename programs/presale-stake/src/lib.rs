use anchor_lang::prelude::*;

declare_id!("5pKwZq8tS3ZcjbV9f3hCuYV1s4xR6Pq2yNcRrN7bUe4M");

pub mod admin {
    use anchor_lang::prelude::declare_id;
    declare_id!("9sWmZ6F2hVqJcT3rNbK8yXpD4uGa7LeQ1fHwRzMtYkPj");
}

pub const AUTH_SEED: &str = "presale_authority";
pub const TOKEN_VAULT_SEED: &str = "token_vault";

/// Scale of every USD amount and unit price (18 decimals).
pub const USD_DECIMALS: u8 = 18;
/// Denominator shared by bonus, progression and referral rates.
pub const RATE_DENOMINATOR: u64 = 1_000_000;
pub const SECONDS_PER_DAY: i64 = 86_400;

pub mod error;
pub mod instructions;
pub mod oracle;
pub mod purchase;
pub mod states;
pub mod utils;

use instructions::*;
use states::*;

#[program]
pub mod presale_stake {

    use super::*;

    pub fn initialise_configs(ctx: Context<InitialiseConfigs>, params: InitParams) -> Result<()> {
        instructions::initialise_configs(ctx, params)
    }

    pub fn update_config(ctx: Context<UpdateConfig>, param: u8, value: u64) -> Result<()> {
        instructions::update_config(ctx, param, value)
    }

    pub fn buy_and_stake<'info>(
        ctx: Context<'_, '_, 'info, 'info, BuyAndStake<'info>>,
        amount: u64,
        asset: Pubkey,
        referrer: Pubkey,
    ) -> Result<()> {
        instructions::buy_and_stake(ctx, amount, asset, referrer)
    }

    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        instructions::withdraw(ctx)
    }

    pub fn get_supported_tokens_info<'info>(
        ctx: Context<'_, '_, 'info, 'info, SupportedTokens<'info>>,
    ) -> Result<Vec<SupportedTokenInfo>> {
        instructions::get_supported_tokens_info(ctx)
    }

    pub fn get_current_round(ctx: Context<ReadRounds>) -> Result<PricingRound> {
        instructions::get_current_round(ctx)
    }

    pub fn get_round(ctx: Context<ReadRounds>, index: u32) -> Result<PricingRound> {
        instructions::get_round(ctx, index)
    }

    pub fn totals_sold(ctx: Context<ReadRounds>) -> Result<u128> {
        instructions::totals_sold(ctx)
    }

    pub fn start(ctx: Context<ReadRounds>) -> Result<i64> {
        instructions::start(ctx)
    }

    pub fn get_user_total_paid(ctx: Context<ReadPosition>) -> Result<u128> {
        instructions::get_user_total_paid(ctx)
    }

    pub fn balance_of(ctx: Context<ReadPosition>) -> Result<u64> {
        instructions::balance_of(ctx)
    }

    pub fn end_staking_time(ctx: Context<ReadPosition>) -> Result<i64> {
        instructions::end_staking_time(ctx)
    }

    pub fn can_withdraw(ctx: Context<ReadPosition>) -> Result<bool> {
        instructions::can_withdraw(ctx)
    }
}
