use crate::error::ErrorCode;
use crate::oracle::load_sources;
use crate::purchase::PurchaseRequest;
use crate::states::*;
use crate::utils::{transfer_lamports, transfer_with_authority};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Accounts required to buy an allocation and lock it.
///
/// Flow summary:
/// 1) Resolve the payment asset and the payer's balance/allowance.
/// 2) Value the payment from the asset's price sources (passed as remaining accounts).
/// 3) Book the sale on the round ledger and credit the buyer's position.
/// 4) Forward the payment to the treasury.
///
/// Native payments use `treasury` directly and leave the token accounts out.
/// Token payments need all four optional accounts; the payer must have
/// approved the authority PDA as delegate for at least `amount`.
#[derive(Accounts)]
pub struct BuyAndStake<'info> {
    /// Buyer paying for the allocation.
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        mut,
        seeds = [ROUND_LEDGER_SEED.as_bytes()],
        bump,
    )]
    pub round_ledger: Box<Account<'info, RoundLedger>>,

    /// Per-user position (created lazily).
    #[account(
        init_if_needed,
        seeds = [
            USER_STAKE_INFO_SEED.as_bytes(),
            owner.key().as_ref()
        ],
        bump,
        payer = owner,
        space = UserStakeInfo::LEN
    )]
    pub user_stake_info: Box<Account<'info, UserStakeInfo>>,

    /// Program authority PDA; delegate of the payer's token account.
    ///
    /// CHECK: PDA derivation is enforced by seeds; used as a signing PDA.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    /// Treasury wallet; receives native payments.
    ///
    /// CHECK: Address pinned to `global_config.treasury`.
    #[account(
        mut,
        address = global_config.treasury @ ErrorCode::InvalidTreasury
    )]
    pub treasury: UncheckedAccount<'info>,

    /// Mint of the token being sold (for allocation decimals).
    #[account(address = global_config.project_mint)]
    pub project_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Mint of the payment token.
    pub asset_mint: Option<Box<InterfaceAccount<'info, Mint>>>,

    /// Payer's token account the payment is pulled from.
    #[account(mut)]
    pub payer_token_account: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    /// Treasury-owned token account receiving the payment.
    #[account(mut)]
    pub treasury_token_account: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    pub token_program: Option<Interface<'info, TokenInterface>>,

    /// System Program (for native payments and position creation).
    pub system_program: Program<'info, System>,
}

impl<'info> BuyAndStake<'info> {
    /// Checks the token payment accounts belong to `mint`, the buyer and the
    /// treasury, and returns the payer's holding.
    fn token_payment_holding(&self, mint: &Pubkey) -> Result<(u8, Holding)> {
        let (asset_mint, payer, treasury) = match (
            &self.asset_mint,
            &self.payer_token_account,
            &self.treasury_token_account,
        ) {
            (Some(asset_mint), Some(payer), Some(treasury)) => (asset_mint, payer, treasury),
            _ => return err!(ErrorCode::MissingPaymentAccount),
        };
        require!(self.token_program.is_some(), ErrorCode::MissingPaymentAccount);
        require_keys_eq!(asset_mint.key(), *mint, ErrorCode::UnsupportedAsset);
        require_keys_eq!(payer.mint, *mint, ErrorCode::UnsupportedAsset);
        require_keys_eq!(payer.owner, self.owner.key(), ErrorCode::InvalidOwner);
        require_keys_eq!(treasury.mint, *mint, ErrorCode::InvalidTreasury);
        require_keys_eq!(treasury.owner, self.global_config.treasury, ErrorCode::InvalidTreasury);

        let holding = Holding::delegated(
            payer.amount,
            payer.delegate.into(),
            payer.delegated_amount,
            &self.authority.key(),
        );
        Ok((asset_mint.decimals, holding))
    }
}

/// Buys an allocation with `amount` of `asset` and locks it in the buyer's position.
///
/// # Parameters
/// - `amount`: payment in the asset's base units (lamports for the native coin).
/// - `asset`: payment mint, or the native mint for the native coin.
/// - `referrer`: attribution key; the default key means none.
///
/// # Ordering
/// Price sources are only read, the ledger and the position are updated from
/// committed copies, and the payment moves last.
///
/// # Fails
/// - `PurchaseDisabled`, `PresaleNotStarted`, `UnsupportedAsset`, `ZeroAmount`.
/// - `PriceUnavailable` if no price source answers.
/// - `InsufficientAllowance` / `InsufficientBalance` if the payer cannot cover `amount`.
/// - `RoundsExhausted` once the final planned round sold out.
pub fn buy_and_stake<'info>(
    ctx: Context<'_, '_, 'info, 'info, BuyAndStake<'info>>,
    amount: u64,
    asset: Pubkey,
    referrer: Pubkey,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accepted = *ctx.accounts.global_config.accepted_asset(&asset)?;

    // --- 1) Paying side ---
    let (asset_decimals, holding) = if accepted.is_native() {
        (NATIVE_DECIMALS, Holding::native(ctx.accounts.owner.lamports()))
    } else {
        ctx.accounts.token_payment_holding(&accepted.mint)?
    };

    // --- 2) Valuation (read-only) ---
    let global_config = &ctx.accounts.global_config;
    let sources = load_sources(&accepted, asset_decimals, ctx.remaining_accounts);
    let quoted = PurchaseRequest {
        owner: ctx.accounts.owner.key(),
        asset,
        amount,
        referrer,
        now,
    }
    .quote(global_config, asset_decimals, &sources)?;
    quoted.payment().check_funds(holding)?;

    // --- 3) Ledger and position updates ---
    let user_stake_info = &mut ctx.accounts.user_stake_info;
    if user_stake_info.owner == Pubkey::default() {
        user_stake_info.owner = ctx.accounts.owner.key();
        user_stake_info.bump = ctx.bumps.user_stake_info;
    }
    let committed = quoted.commit(
        global_config,
        &ctx.accounts.round_ledger,
        user_stake_info,
        ctx.accounts.project_mint.decimals,
    )?;
    let (allocation, payment) =
        committed.apply(&mut ctx.accounts.round_ledger, &mut ctx.accounts.user_stake_info);

    msg!(
        "Purchase: {} paid {} of {} (${} via {:?}), round {} at {}, {} tokens locked until {}",
        ctx.accounts.owner.key(),
        payment.amount,
        payment.mint,
        quoted.usd_value,
        quoted.source,
        allocation.round_index,
        allocation.unit_price,
        allocation.tokens,
        ctx.accounts.user_stake_info.lock_end_time
    );

    // --- 4) Forward payment to treasury ---
    if payment.native {
        transfer_lamports(
            ctx.accounts.owner.to_account_info(),
            ctx.accounts.treasury.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
            payment.amount,
        )
    } else {
        let (Some(asset_mint), Some(payer), Some(treasury), Some(token_program)) = (
            &ctx.accounts.asset_mint,
            &ctx.accounts.payer_token_account,
            &ctx.accounts.treasury_token_account,
            &ctx.accounts.token_program,
        ) else {
            return err!(ErrorCode::MissingPaymentAccount);
        };
        transfer_with_authority(
            ctx.accounts.authority.to_account_info(),
            payer.to_account_info(),
            treasury.to_account_info(),
            asset_mint.to_account_info(),
            token_program.to_account_info(),
            payment.amount,
            asset_mint.decimals,
            &[&[crate::AUTH_SEED.as_bytes(), &[ctx.bumps.authority]]],
        )
    }
}
