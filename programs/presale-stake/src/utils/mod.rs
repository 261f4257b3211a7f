pub mod math;
pub use math::*;

pub mod token;
pub use token::*;

use anchor_lang::prelude::*;

/// Finds the account whose key matches `key` among the instruction's remaining accounts.
pub fn find_account<'a, 'info>(
    accounts: &'a [AccountInfo<'info>],
    key: &Pubkey,
) -> Option<&'a AccountInfo<'info>> {
    accounts.iter().find(|info| info.key == key)
}
