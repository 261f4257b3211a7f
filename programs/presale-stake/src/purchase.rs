//! Purchase pipeline.
//!
//! A purchase moves through three stages, each a separate type so the
//! ordering is enforced at compile time:
//!
//! 1. [`PurchaseRequest`] is checked and valued ([`PurchaseRequest::quote`]).
//!    Only price sources are read here.
//! 2. [`QuotedPurchase`] is booked against copies of the round ledger and the
//!    buyer's position ([`QuotedPurchase::commit`]). A failure leaves the
//!    originals untouched.
//! 3. [`CommittedPurchase`] writes the copies back and hands out the
//!    [`Payment`] to forward. Token movements happen only after this.

use crate::error::ErrorCode;
use crate::oracle::{first_quote, usd_value, PriceSource, SourceKind};
use crate::states::*;
use crate::utils::{apply_bonus, pow10, to_u64, U256};
use anchor_lang::prelude::*;

/// Payment that must reach the treasury once the purchase is committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payment {
    pub mint: Pubkey,
    pub amount: u64,
    pub native: bool,
}

impl Payment {
    /// Checks the payer can cover the payment. Native payments need no
    /// approval, so only the balance is checked for them.
    pub fn check_funds(&self, holding: Holding) -> Result<()> {
        if !self.native {
            require_gte!(holding.allowance, self.amount, ErrorCode::InsufficientAllowance);
        }
        require_gte!(holding.balance, self.amount, ErrorCode::InsufficientBalance);
        Ok(())
    }
}

/// How the credited tokens were computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Allocation {
    pub round_index: u32,
    pub unit_price: u128,
    pub base_tokens: u64,
    pub bonus_rate: u64,
    pub tokens: u64,
}

#[derive(Clone, Copy, Debug)]
pub struct PurchaseRequest {
    pub owner: Pubkey,
    pub asset: Pubkey,
    pub amount: u64,
    pub referrer: Pubkey,
    pub now: i64,
}

impl PurchaseRequest {
    /// Validates the request against the config and values it in USD.
    pub fn quote(
        self,
        config: &GlobalConfig,
        asset_decimals: u8,
        sources: &[PriceSource],
    ) -> Result<QuotedPurchase> {
        require!(config.purchase_enabled, ErrorCode::PurchaseDisabled);
        require_gte!(self.now, config.start_time, ErrorCode::PresaleNotStarted);
        let asset = config.accepted_asset(&self.asset)?;
        require_gt!(self.amount, 0, ErrorCode::ZeroAmount);

        let (source, quote) = first_quote(sources, self.now, config.max_price_age)?;
        let usd_value = usd_value(self.amount, asset_decimals, &quote)?;
        require_gt!(usd_value, 0, ErrorCode::ZeroAmount);

        Ok(QuotedPurchase {
            payment: Payment {
                mint: asset.mint,
                amount: self.amount,
                native: asset.is_native(),
            },
            request: self,
            usd_value,
            source,
        })
    }
}

#[derive(Clone, Copy, Debug)]
pub struct QuotedPurchase {
    request: PurchaseRequest,
    payment: Payment,
    pub usd_value: u128,
    pub source: SourceKind,
}

impl QuotedPurchase {
    pub fn payment(&self) -> &Payment {
        &self.payment
    }

    /// Books the sale and credits the buyer on copies of the given state.
    pub fn commit(
        self,
        config: &GlobalConfig,
        ledger: &RoundLedger,
        position: &UserStakeInfo,
        project_decimals: u8,
    ) -> Result<CommittedPurchase> {
        let PurchaseRequest {
            owner,
            referrer,
            now,
            ..
        } = self.request;
        let mut ledger = ledger.clone();
        let mut position = position.clone();

        let receipt = ledger.record_sale(self.usd_value, now)?;

        let base_tokens = to_u64(
            U256::from(self.usd_value)
                .checked_mul(pow10(u32::from(project_decimals))?)
                .ok_or(ErrorCode::MathOverflow)?
                / U256::from(receipt.price),
        )?;

        let referred = referrer != Pubkey::default() && referrer != owner;
        let bonus_rate = bonus_for(&config.bonus_tiers, self.usd_value)
            .checked_add(receipt.staking_bonus_rate)
            .and_then(|rate| rate.checked_add(if referred { config.referral_bonus_rate } else { 0 }))
            .ok_or(ErrorCode::MathOverflow)?;
        let tokens = apply_bonus(base_tokens, bonus_rate)?;
        require_gt!(tokens, 0, ErrorCode::ZeroAmount);

        let lock_duration = if receipt.staking_duration > 0 {
            receipt.staking_duration
        } else {
            config.lock_duration
        };
        position.credit(
            tokens,
            self.usd_value,
            lock_duration,
            config.lock_extension,
            now,
        )?;
        if referred {
            position.last_referrer = referrer;
        }

        Ok(CommittedPurchase {
            ledger,
            position,
            payment: self.payment,
            allocation: Allocation {
                round_index: receipt.round_index,
                unit_price: receipt.price,
                base_tokens,
                bonus_rate,
                tokens,
            },
        })
    }
}

pub struct CommittedPurchase {
    ledger: RoundLedger,
    position: UserStakeInfo,
    payment: Payment,
    pub allocation: Allocation,
}

impl CommittedPurchase {
    /// Writes the booked state back and releases the payment to forward.
    pub fn apply(self, ledger: &mut RoundLedger, position: &mut UserStakeInfo) -> (Allocation, Payment) {
        *ledger = self.ledger;
        *position = self.position;
        (self.allocation, self.payment)
    }
}
