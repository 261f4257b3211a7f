use crate::error::ErrorCode;
use anchor_lang::{
    prelude::*,
    system_program::{self, Transfer},
};
use anchor_spl::token_interface::{self, TokenAccount, TransferChecked};

/// Token transfer signed by the presale authority PDA.
///
/// Used both for vault payouts (the PDA owns the vault) and for pulling a
/// payment the user delegated to the PDA with an SPL `approve`.
pub fn transfer_with_authority<'a>(
    authority: AccountInfo<'a>,
    from: AccountInfo<'a>,
    to: AccountInfo<'a>,
    mint: AccountInfo<'a>,
    token_program: AccountInfo<'a>,
    amount: u64,
    mint_decimals: u8,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            token_program,
            TransferChecked {
                from,
                to,
                authority,
                mint,
            },
            signer_seeds,
        ),
        amount,
        mint_decimals,
    )
}

pub fn transfer_lamports<'a>(
    from: AccountInfo<'a>,
    to: AccountInfo<'a>,
    system_program: AccountInfo<'a>,
    amount: u64,
) -> Result<()> {
    system_program::transfer(CpiContext::new(system_program, Transfer { from, to }), amount)
}

/// Deserializes an SPL Token or Token-2022 account.
pub fn read_token_account(info: &AccountInfo) -> Result<TokenAccount> {
    require!(
        *info.owner == anchor_spl::token::ID || *info.owner == anchor_spl::token_2022::ID,
        ErrorCode::InvalidOwner
    );
    let data = info.try_borrow_data()?;
    TokenAccount::try_deserialize(&mut &data[..])
}
