use crate::error::ErrorCode;
use crate::states::LockExtension;
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// UserStakeInfo Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive each user's stake info account.
pub const USER_STAKE_INFO_SEED: &str = "user_stake_info";

/// A buyer's locked allocation.
///
/// Each buyer has one `UserStakeInfo` account, derived from:
/// `USER_STAKE_INFO_SEED + user_pubkey`, created on the first purchase.
///
/// The position is `Locked` while `now < lock_end_time`, `Withdrawable` once
/// the lock has passed, and empty again after a withdrawal.
#[account]
#[derive(Default, Debug)]
pub struct UserStakeInfo {
    /// PDA bump for this account.
    pub bump: u8,

    /// Owner (user) to whom this record belongs.
    pub owner: Pubkey,

    /// Allocated project tokens not yet withdrawn (base units).
    pub token_balance: u64,

    /// UNIX timestamp before which the balance cannot be withdrawn.
    pub lock_end_time: i64,

    /// Lifetime USD paid, 18 decimals. Not reset by withdrawals.
    pub total_paid_usd: u128,

    pub last_referrer: Pubkey,

    pub purchase_count: u64,
}

impl UserStakeInfo {
    /// Fixed serialized size of the account (for allocation at initialization).
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 1: bump
    /// - 32 * 2: owner and last referrer
    /// - 8 * 3: balance, lock end, purchase count
    /// - 16: one `u128` field
    pub const LEN: usize = 8 + 1 + 32 * 2 + 8 * 3 + 16;

    /// Adds a purchase to the position and pushes the lock out.
    pub fn credit(
        &mut self,
        tokens: u64,
        usd_value: u128,
        lock_duration: i64,
        policy: LockExtension,
        now: i64,
    ) -> Result<()> {
        let lock_end_time = match policy {
            LockExtension::Stack => self.lock_end_time.max(now).checked_add(lock_duration),
            LockExtension::Refresh => now
                .checked_add(lock_duration)
                .map(|end| end.max(self.lock_end_time)),
        }
        .ok_or(ErrorCode::MathOverflow)?;

        self.token_balance = self
            .token_balance
            .checked_add(tokens)
            .ok_or(ErrorCode::MathOverflow)?;
        self.total_paid_usd = self
            .total_paid_usd
            .checked_add(usd_value)
            .ok_or(ErrorCode::MathOverflow)?;
        self.purchase_count = self
            .purchase_count
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;
        self.lock_end_time = lock_end_time;
        Ok(())
    }

    pub fn can_withdraw(&self, now: i64) -> bool {
        self.token_balance > 0 && now >= self.lock_end_time
    }

    /// Empties the position and returns the amount to pay out of a vault
    /// holding `vault_balance`.
    ///
    /// Checked in order: `NothingToWithdraw`, `LockNotElapsed`, `InsufficientVault`.
    pub fn withdraw(&mut self, now: i64, vault_balance: u64) -> Result<u64> {
        require_gt!(self.token_balance, 0, ErrorCode::NothingToWithdraw);
        require_gte!(now, self.lock_end_time, ErrorCode::LockNotElapsed);
        require_gte!(vault_balance, self.token_balance, ErrorCode::InsufficientVault);
        let amount = self.token_balance;
        self.token_balance = 0;
        self.lock_end_time = 0;
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;
    use quickcheck::quickcheck;

    const DAY: i64 = crate::SECONDS_PER_DAY;
    const NOW: i64 = 1_700_000_000;
    const VAULT: u64 = u64::MAX;

    #[test]
    fn first_credit_locks_from_now() {
        let mut position = UserStakeInfo::default();
        assert!(!position.can_withdraw(NOW));
        position
            .credit(1_000, 10, 100 * DAY, LockExtension::Stack, NOW)
            .unwrap();
        assert_eq!(position.token_balance, 1_000);
        assert_eq!(position.lock_end_time, NOW + 100 * DAY);
        assert_eq!(position.purchase_count, 1);
        assert!(!position.can_withdraw(NOW + 100 * DAY - 1));
        assert!(position.can_withdraw(NOW + 100 * DAY));
    }

    #[test]
    fn stacking_adds_a_full_duration() {
        let mut position = UserStakeInfo::default();
        position.credit(1, 1, 100 * DAY, LockExtension::Stack, NOW).unwrap();
        let first = position.lock_end_time;
        position.credit(1, 1, 100 * DAY, LockExtension::Stack, NOW + 60).unwrap();
        assert_eq!(position.lock_end_time, first + 100 * DAY);
        assert_eq!(position.total_paid_usd, 2);
    }

    #[test]
    fn refresh_restarts_from_latest_purchase() {
        let mut position = UserStakeInfo::default();
        position.credit(1, 1, 100 * DAY, LockExtension::Refresh, NOW).unwrap();
        let first = position.lock_end_time;
        position.credit(1, 1, 100 * DAY, LockExtension::Refresh, NOW + 60).unwrap();
        assert_eq!(position.lock_end_time, first + 60);
        // a shorter lock never pulls the end back in
        position.credit(1, 1, DAY, LockExtension::Refresh, NOW + 120).unwrap();
        assert_eq!(position.lock_end_time, first + 60);
    }

    #[test]
    fn withdraw_requires_balance_then_elapsed_lock() {
        let mut position = UserStakeInfo::default();
        assert_eq!(
            position.withdraw(NOW, VAULT).unwrap_err(),
            Error::from(ErrorCode::NothingToWithdraw)
        );
        position.credit(500, 5, 10 * DAY, LockExtension::Stack, NOW).unwrap();
        assert_eq!(
            position.withdraw(NOW + DAY, VAULT).unwrap_err(),
            Error::from(ErrorCode::LockNotElapsed)
        );
        assert_eq!(position.token_balance, 500);

        assert_eq!(position.withdraw(NOW + 10 * DAY, VAULT).unwrap(), 500);
        assert_eq!(position.token_balance, 0);
        assert_eq!(position.lock_end_time, 0);
        assert_eq!(position.total_paid_usd, 5);
        assert_eq!(
            position.withdraw(NOW + 11 * DAY, VAULT).unwrap_err(),
            Error::from(ErrorCode::NothingToWithdraw)
        );
    }

    #[test]
    fn vault_shortfall_is_reported_only_once_unlocked() {
        let mut position = UserStakeInfo::default();
        position.credit(500, 5, 10 * DAY, LockExtension::Stack, NOW).unwrap();
        assert_eq!(
            position.withdraw(NOW + DAY, 0).unwrap_err(),
            Error::from(ErrorCode::LockNotElapsed)
        );
        assert_eq!(
            position.withdraw(NOW + 10 * DAY, 499).unwrap_err(),
            Error::from(ErrorCode::InsufficientVault)
        );
        assert_eq!(position.token_balance, 500);
        assert_eq!(position.lock_end_time, NOW + 10 * DAY);

        assert_eq!(position.withdraw(NOW + 10 * DAY, 500).unwrap(), 500);
        assert_eq!(
            position.withdraw(NOW + 10 * DAY, 0).unwrap_err(),
            Error::from(ErrorCode::NothingToWithdraw)
        );
    }

    #[test]
    fn purchase_after_withdraw_locks_again() {
        let mut position = UserStakeInfo::default();
        position.credit(500, 5, DAY, LockExtension::Stack, NOW).unwrap();
        position.withdraw(NOW + DAY, VAULT).unwrap();
        position.credit(7, 1, DAY, LockExtension::Stack, NOW + 2 * DAY).unwrap();
        assert_eq!(position.lock_end_time, NOW + 3 * DAY);
        assert!(!position.can_withdraw(NOW + 2 * DAY));
    }

    quickcheck! {
        fn lock_end_strictly_grows(offsets: Vec<u16>, refresh: bool) -> bool {
            let policy = if refresh { LockExtension::Refresh } else { LockExtension::Stack };
            let mut position = UserStakeInfo::default();
            let mut now = NOW;
            let mut last_end = 0;
            for offset in offsets {
                now += i64::from(offset);
                position.credit(1, 1, 100 * DAY, policy, now).unwrap();
                if position.lock_end_time < last_end
                    || position.lock_end_time < now + 100 * DAY
                {
                    return false;
                }
                if policy == LockExtension::Stack && position.lock_end_time <= last_end {
                    return false;
                }
                last_end = position.lock_end_time;
            }
            true
        }
    }
}
