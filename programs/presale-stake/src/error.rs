use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Asset is not accepted as payment")]
    UnsupportedAsset,

    #[msg("No price source returned a usable price")]
    PriceUnavailable,

    #[msg("Payment allowance granted to the presale authority is too small")]
    InsufficientAllowance,

    #[msg("Payer balance does not cover the payment")]
    InsufficientBalance,

    #[msg("All planned pricing rounds are exhausted")]
    RoundsExhausted,

    #[msg("Staking lock has not elapsed yet")]
    LockNotElapsed,

    #[msg("Nothing to withdraw")]
    NothingToWithdraw,

    #[msg("Input account owner is not the program admin")]
    InvalidOwner,

    #[msg("Invalid parameter provided")]
    InvalidParam,

    #[msg("Missing remaining account")]
    MissingRemainingAccount,

    #[msg("Math operation overflowed or underflowed")]
    MathOverflow,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Purchase functionality is currently disabled")]
    PurchaseDisabled,

    #[msg("Presale has not started yet")]
    PresaleNotStarted,

    #[msg("Pricing rounds are misconfigured")]
    InvalidRoundConfig,

    #[msg("Bonus tiers must be strictly ascending")]
    InvalidBonusSchedule,

    #[msg("Accepted asset list is misconfigured")]
    InvalidAssetConfig,

    #[msg("Price source account is missing, stale or malformed")]
    InvalidPriceSource,

    #[msg("Treasury account does not match the configured treasury")]
    InvalidTreasury,

    #[msg("Token vault balance is too low for the payout")]
    InsufficientVault,

    #[msg("Round index has not been created")]
    RoundNotFound,

    #[msg("Token payment accounts were not provided")]
    MissingPaymentAccount,
}
