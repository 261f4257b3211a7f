use crate::error::ErrorCode;
use crate::{states::*, TOKEN_VAULT_SEED};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Everything the presale needs to open.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitParams {
    /// Admin allowed to update the config besides the program admin.
    pub admin: Pubkey,
    /// Wallet receiving payments (lamports directly, tokens via accounts it owns).
    pub treasury: Pubkey,
    /// Opening timestamp; 0 opens the presale immediately.
    pub start_time: i64,
    pub lock_duration: i64,
    pub lock_extension: LockExtension,
    pub max_price_age: u64,
    pub referral_bonus_rate: u64,
    pub purchase_enabled: bool,
    /// Seconds a round stays current before time moves the sale on; 0 disables it.
    pub round_duration: i64,
    /// Planned rounds, configured plus synthesized.
    pub max_rounds: u32,
    pub progression: PriceProgression,
    pub rounds: Vec<RoundParams>,
    pub accepted_assets: Vec<AcceptedAsset>,
    pub bonus_tiers: Vec<BonusTier>,
}

/// Accounts context for `initialise_configs`.
///
/// This handler:
/// - Initializes global presale configuration.
/// - Initializes the round ledger with round 0 current.
/// - Creates the project token vault owned by the program authority PDA.
#[derive(Accounts)]
pub struct InitialiseConfigs<'info> {
    /// Admin signer (must match the program-level admin id).
    #[account(
        mut,
        address = crate::admin::id() @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    /// Program authority PDA, set as the vault's token authority.
    ///
    /// CHECK: PDA derivation enforced via seeds. Not read as an account; used as Pubkey.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(
        init,
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump,
        payer = owner,
        space = GlobalConfig::LEN
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        init,
        seeds = [ROUND_LEDGER_SEED.as_bytes()],
        bump,
        payer = owner,
        space = RoundLedger::LEN
    )]
    pub round_ledger: Box<Account<'info, RoundLedger>>,

    /// Mint of the token being sold.
    pub project_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Program-owned vault the allocations are paid out from on withdraw.
    #[account(
        init,
        seeds = [TOKEN_VAULT_SEED.as_bytes()],
        bump,
        payer = owner,
        token::mint = project_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub token_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program interface (required for vault creation).
    pub token_program: Interface<'info, TokenInterface>,

    /// Solana System Program.
    pub system_program: Program<'info, System>,
}

/// Validates `params` and writes the config and the round ledger.
///
/// # Fails
/// - `InvalidAssetConfig`: empty or duplicate asset list, or the project mint listed.
/// - `InvalidBonusSchedule`: tiers not strictly ascending or too many.
/// - `InvalidRoundConfig`: see `RoundLedger::new`.
/// - `InvalidTreasury`: default treasury key.
/// - `InvalidParam`: non-positive lock duration.
pub fn initialise_configs(ctx: Context<InitialiseConfigs>, params: InitParams) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let start_time = if params.start_time == 0 {
        now
    } else {
        params.start_time
    };

    GlobalConfig::validate_assets(&params.accepted_assets, &ctx.accounts.project_mint.key())?;
    validate_bonus_tiers(&params.bonus_tiers)?;
    require_keys_neq!(params.treasury, Pubkey::default(), ErrorCode::InvalidTreasury);
    require_gt!(params.lock_duration, 0, ErrorCode::InvalidParam);

    // ---------------------------
    // 1) Round ledger
    // ---------------------------
    let mut round_ledger = RoundLedger::new(
        &params.rounds,
        start_time,
        params.round_duration,
        params.max_rounds,
        params.progression,
    )?;
    round_ledger.bump = ctx.bumps.round_ledger;
    let ledger_account: &mut RoundLedger = &mut ctx.accounts.round_ledger;
    *ledger_account = round_ledger;
    msg!(
        "Round ledger initialized: {} configured of {} planned rounds",
        params.rounds.len(),
        params.max_rounds
    );

    // ---------------------------
    // 2) Global config
    // ---------------------------
    let global_config: &mut GlobalConfig = &mut ctx.accounts.global_config;
    global_config.bump = ctx.bumps.global_config;
    global_config.admin = params.admin;
    global_config.project_mint = ctx.accounts.project_mint.key();
    global_config.token_vault = ctx.accounts.token_vault.key();
    global_config.treasury = params.treasury;
    global_config.start_time = start_time;
    global_config.lock_duration = params.lock_duration;
    global_config.lock_extension = params.lock_extension;
    global_config.max_price_age = params.max_price_age;
    global_config.referral_bonus_rate = params.referral_bonus_rate;
    global_config.purchase_enabled = params.purchase_enabled;
    global_config.accepted_assets = params.accepted_assets;
    global_config.bonus_tiers = params.bonus_tiers;
    msg!("Global Config initialized, presale opens at {}", start_time);

    Ok(())
}
