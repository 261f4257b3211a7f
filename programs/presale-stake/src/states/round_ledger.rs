use crate::error::ErrorCode;
use crate::utils::{to_u128, U256};
use crate::RATE_DENOMINATOR;
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Round Ledger Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive the round ledger account.
pub const ROUND_LEDGER_SEED: &str = "round_ledger";

/// Upper bound on planned rounds (configured plus synthesized).
pub const MAX_ROUNDS: usize = 32;

/// Reference round length: 15 days.
pub const DEFAULT_ROUND_DURATION: i64 = 15 * crate::SECONDS_PER_DAY;

/// A configured round as supplied at initialization.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundParams {
    /// USD per whole project token, 18 decimals.
    pub price: u128,
    /// USD sales ceiling, 18 decimals.
    pub usd_cap: u128,
    /// Lock applied to purchases in this round; 0 uses the config default.
    pub staking_duration: i64,
    /// Extra bonus rate for purchases in this round.
    pub staking_bonus_rate: u64,
}

impl RoundParams {
    pub const LEN: usize = 16 + 16 + 8 + 8;
}

/// A round that has been activated at some point.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PricingRound {
    pub index: u32,
    pub price: u128,
    pub usd_cap: u128,
    pub total_sold: u128,
    /// Activation timestamp; 0 for the first round until something activates it.
    pub ts: i64,
    pub stopped: bool,
    pub staking_duration: i64,
    pub staking_bonus_rate: u64,
}

impl PricingRound {
    pub const LEN: usize = 4 + 16 * 3 + 8 + 1 + 8 + 8;
}

/// Price rule for rounds past the configured table.
///
/// `k` below is the distance from the last configured round. Synthesized
/// prices never fall below the previous round's; with `period > 1` a
/// geometric rule holds each price for `period` rounds.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceProgression {
    /// `last * (1 + k * step_rate / RATE_DENOMINATOR)`
    Arithmetic { step_rate: u64 },
    /// `last * (multiplier_rate / RATE_DENOMINATOR) ^ floor(k / period)`
    Geometric { multiplier_rate: u64, period: u32 },
}

impl Default for PriceProgression {
    /// Each synthesized round adds the last configured price once more.
    fn default() -> Self {
        PriceProgression::Arithmetic {
            step_rate: RATE_DENOMINATOR,
        }
    }
}

impl PriceProgression {
    pub const LEN: usize = 1 + 8 + 4;

    pub fn validate(&self) -> Result<()> {
        match *self {
            PriceProgression::Arithmetic { step_rate } => {
                require_gt!(step_rate, 0, ErrorCode::InvalidRoundConfig);
            }
            PriceProgression::Geometric {
                multiplier_rate,
                period,
            } => {
                require_gt!(multiplier_rate, RATE_DENOMINATOR, ErrorCode::InvalidRoundConfig);
                require_gt!(period, 0, ErrorCode::InvalidRoundConfig);
            }
        }
        Ok(())
    }

    pub fn price_at(&self, last_price: u128, k: u32) -> Result<u128> {
        let denominator = U256::from(RATE_DENOMINATOR);
        match *self {
            PriceProgression::Arithmetic { step_rate } => {
                let multiplier = U256::from(step_rate)
                    .checked_mul(U256::from(k))
                    .and_then(|v| v.checked_add(denominator))
                    .ok_or(ErrorCode::MathOverflow)?;
                let price = U256::from(last_price)
                    .checked_mul(multiplier)
                    .ok_or(ErrorCode::MathOverflow)?;
                to_u128(price / denominator)
            }
            PriceProgression::Geometric {
                multiplier_rate,
                period,
            } => {
                let mut price = U256::from(last_price);
                for _ in 0..k / period {
                    price = price
                        .checked_mul(U256::from(multiplier_rate))
                        .ok_or(ErrorCode::MathOverflow)?
                        / denominator;
                }
                to_u128(price)
            }
        }
    }
}

/// What a sale was priced at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaleReceipt {
    pub round_index: u32,
    pub price: u128,
    pub staking_duration: i64,
    pub staking_bonus_rate: u64,
}

/// Round table and sales totals.
///
/// `schedule` is the configured plan; `rounds` holds every round activated so
/// far, in index order. All of them except the last are stopped, and the last
/// one is the current round unless the ledger is exhausted.
#[account]
#[derive(Default, Debug)]
pub struct RoundLedger {
    pub bump: u8,
    pub current_index: u32,
    /// Sum of `total_sold` over all rounds.
    pub totals_sold: u128,
    /// Anchor of the first round's duration.
    pub start_time: i64,
    /// Seconds a round stays current before time moves the sale on; 0 disables it.
    pub round_duration: i64,
    /// Planned rounds, configured plus synthesized.
    pub max_rounds: u32,
    pub progression: PriceProgression,
    /// Set once the last planned round hits its cap.
    pub exhausted: bool,
    pub schedule: Vec<RoundParams>,
    pub rounds: Vec<PricingRound>,
}

impl RoundLedger {
    pub const LEN: usize = 8
        + 1
        + 4
        + 16
        + 8
        + 8
        + 4
        + PriceProgression::LEN
        + 1
        + (4 + MAX_ROUNDS * RoundParams::LEN)
        + (4 + MAX_ROUNDS * PricingRound::LEN);

    /// Validates the plan and activates round 0 (with `ts = 0`).
    pub fn new(
        schedule: &[RoundParams],
        start_time: i64,
        round_duration: i64,
        max_rounds: u32,
        progression: PriceProgression,
    ) -> Result<Self> {
        require!(!schedule.is_empty(), ErrorCode::InvalidRoundConfig);
        require!(
            schedule.len() <= max_rounds as usize && max_rounds as usize <= MAX_ROUNDS,
            ErrorCode::InvalidRoundConfig
        );
        require_gte!(round_duration, 0, ErrorCode::InvalidRoundConfig);
        require!(
            schedule.iter().all(|round| round.price > 0
                && round.usd_cap > 0
                && round.staking_duration >= 0),
            ErrorCode::InvalidRoundConfig
        );
        require!(
            schedule.windows(2).all(|pair| pair[0].price < pair[1].price),
            ErrorCode::InvalidRoundConfig
        );
        progression.validate()?;

        let mut ledger = RoundLedger {
            start_time,
            round_duration,
            max_rounds,
            progression,
            schedule: schedule.to_vec(),
            ..Default::default()
        };
        let first = ledger.planned_round(0)?;
        ledger.rounds.push(first);
        Ok(ledger)
    }

    /// Round `index` as planned: from the schedule, or synthesized past it.
    fn planned_round(&self, index: u32) -> Result<PricingRound> {
        let last_configured = self
            .schedule
            .len()
            .checked_sub(1)
            .ok_or(error!(ErrorCode::InvalidRoundConfig))? as u32;
        let params = self.schedule[index.min(last_configured) as usize];
        let price = if index <= last_configured {
            params.price
        } else {
            self.progression
                .price_at(params.price, index - last_configured)?
        };
        Ok(PricingRound {
            index,
            price,
            usd_cap: params.usd_cap,
            staking_duration: params.staking_duration,
            staking_bonus_rate: params.staking_bonus_rate,
            ..Default::default()
        })
    }

    /// Appends planned rounds until `index` exists.
    fn activate_through(&mut self, index: u32) -> Result<()> {
        require_gt!(self.max_rounds, index, ErrorCode::RoundsExhausted);
        while self.rounds.len() <= index as usize {
            let next = self.planned_round(self.rounds.len() as u32)?;
            self.rounds.push(next);
        }
        Ok(())
    }

    fn current(&self) -> Result<&PricingRound> {
        self.rounds
            .get(self.current_index as usize)
            .ok_or(error!(ErrorCode::RoundNotFound))
    }

    /// Rounds the clock has moved past since the current round began, clamped
    /// to the last planned round, with the time they are counted from.
    fn elapsed_rounds(&self, now: i64) -> Result<(u32, i64)> {
        let current = self.current()?;
        let anchor = if current.ts == 0 {
            self.start_time
        } else {
            current.ts
        };
        let last = self.max_rounds.saturating_sub(1);
        if self.exhausted || self.round_duration <= 0 || self.current_index >= last || now <= anchor {
            return Ok((0, anchor));
        }
        let elapsed = (now - anchor) / self.round_duration;
        let skipped = elapsed.min(i64::from(last - self.current_index)) as u32;
        Ok((skipped, anchor))
    }

    fn skip_activation(&self, anchor: i64, skipped: u32) -> Result<i64> {
        self.round_duration
            .checked_mul(i64::from(skipped))
            .and_then(|offset| anchor.checked_add(offset))
            .ok_or(error!(ErrorCode::MathOverflow))
    }

    /// Current round as of `now`, including rounds the clock has skipped.
    pub fn current_round(&self, now: i64) -> Result<PricingRound> {
        let (skipped, anchor) = self.elapsed_rounds(now)?;
        if skipped == 0 {
            return self.current().copied();
        }
        let index = self.current_index + skipped;
        let mut round = match self.rounds.get(index as usize) {
            Some(round) => *round,
            None => self.planned_round(index)?,
        };
        round.ts = self.skip_activation(anchor, skipped)?;
        round.stopped = false;
        Ok(round)
    }

    /// An activated round.
    pub fn round(&self, index: u32) -> Result<PricingRound> {
        self.rounds
            .get(index as usize)
            .copied()
            .ok_or(error!(ErrorCode::RoundNotFound))
    }

    fn advance_by_time(&mut self, now: i64) -> Result<()> {
        let (skipped, anchor) = self.elapsed_rounds(now)?;
        if skipped == 0 {
            return Ok(());
        }
        let from = self.current_index;
        self.activate_through(from + skipped)?;
        for step in 1..=skipped {
            let ts = self.skip_activation(anchor, step)?;
            self.rounds[(from + step - 1) as usize].stopped = true;
            self.rounds[(from + step) as usize].ts = ts;
        }
        self.current_index = from + skipped;
        msg!("Round {} expired by time; round {} is current", from, self.current_index);
        Ok(())
    }

    fn advance_by_cap(&mut self, now: i64) -> Result<()> {
        let next = self.current_index + 1;
        if next >= self.max_rounds {
            self.exhausted = true;
            msg!("Final round {} sold out", self.current_index);
            return Ok(());
        }
        self.activate_through(next)?;
        let round = &mut self.rounds[next as usize];
        round.ts = now;
        round.stopped = false;
        self.current_index = next;
        msg!("Round {} sold out; round {} is current", next - 1, next);
        Ok(())
    }

    /// Books `usd_value` against the current round.
    ///
    /// The sale is priced at the round current when it starts (after any time
    /// skip). The whole value is booked there even when it overshoots the cap;
    /// reaching the cap only moves the next sale to the following round.
    pub fn record_sale(&mut self, usd_value: u128, now: i64) -> Result<SaleReceipt> {
        require_gt!(usd_value, 0, ErrorCode::ZeroAmount);
        require!(!self.exhausted, ErrorCode::RoundsExhausted);
        self.advance_by_time(now)?;

        let index = self.current_index;
        let round = self
            .rounds
            .get_mut(index as usize)
            .ok_or(error!(ErrorCode::RoundNotFound))?;
        let receipt = SaleReceipt {
            round_index: index,
            price: round.price,
            staking_duration: round.staking_duration,
            staking_bonus_rate: round.staking_bonus_rate,
        };
        round.total_sold = round
            .total_sold
            .checked_add(usd_value)
            .ok_or(ErrorCode::MathOverflow)?;
        let capped = round.total_sold >= round.usd_cap;
        if capped {
            round.stopped = true;
        }
        self.totals_sold = self
            .totals_sold
            .checked_add(usd_value)
            .ok_or(ErrorCode::MathOverflow)?;

        if capped {
            self.advance_by_cap(now)?;
        }
        Ok(receipt)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anchor_lang::error::Error;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    pub const ONE_USD: u128 = 1_000_000_000_000_000_000;
    pub const CENT: u128 = ONE_USD / 100;
    pub const DAY: i64 = crate::SECONDS_PER_DAY;
    pub const START: i64 = 1_700_000_000;

    pub fn reference_schedule() -> Vec<RoundParams> {
        vec![
            RoundParams {
                price: CENT,
                usd_cap: 300_000 * ONE_USD,
                ..Default::default()
            },
            RoundParams {
                price: 3 * CENT,
                usd_cap: 300_000 * ONE_USD,
                ..Default::default()
            },
        ]
    }

    pub fn reference_ledger() -> RoundLedger {
        RoundLedger::new(
            &reference_schedule(),
            START,
            DEFAULT_ROUND_DURATION,
            MAX_ROUNDS as u32,
            PriceProgression::default(),
        )
        .unwrap()
    }

    fn sold_sum(ledger: &RoundLedger) -> u128 {
        ledger.rounds.iter().map(|round| round.total_sold).sum()
    }

    #[test]
    fn first_round_starts_unactivated() {
        let ledger = reference_ledger();
        let round = ledger.current_round(START + 600).unwrap();
        assert_eq!(round.index, 0);
        assert_eq!(round.price, CENT);
        assert_eq!(round.ts, 0);
        assert!(!round.stopped);
        assert_eq!(ledger.round(1).unwrap_err(), Error::from(ErrorCode::RoundNotFound));
    }

    #[test]
    fn cap_crossing_sale_is_priced_at_the_old_round() {
        let mut ledger = reference_ledger();
        let t = START + 600;

        let receipt = ledger.record_sale(239_000 * ONE_USD, t).unwrap();
        assert_eq!((receipt.round_index, receipt.price), (0, CENT));
        assert_eq!(ledger.current_index, 0);

        let receipt = ledger.record_sale(100_000 * ONE_USD, t + 10).unwrap();
        assert_eq!((receipt.round_index, receipt.price), (0, CENT));
        let round_0 = ledger.round(0).unwrap();
        assert!(round_0.stopped);
        assert_eq!(round_0.total_sold, 339_000 * ONE_USD);

        let current = ledger.current_round(t + 10).unwrap();
        assert_eq!((current.index, current.price), (1, 3 * CENT));
        assert!(!current.stopped);
        assert_eq!(current.ts, t + 10);

        let receipt = ledger.record_sale(240_000 * ONE_USD, t + 20).unwrap();
        assert_eq!((receipt.round_index, receipt.price), (1, 3 * CENT));
        assert_eq!(ledger.current_index, 1);

        let receipt = ledger.record_sale(100_000 * ONE_USD, t + 30).unwrap();
        assert_eq!((receipt.round_index, receipt.price), (1, 3 * CENT));
        assert!(ledger.round(1).unwrap().stopped);

        let current = ledger.current_round(t + 30).unwrap();
        assert_eq!((current.index, current.price), (2, 6 * CENT));
        assert_eq!(current.ts, t + 30);
        assert_eq!(current.usd_cap, 300_000 * ONE_USD);

        assert_eq!(ledger.totals_sold, 679_000 * ONE_USD);
        assert_eq!(sold_sum(&ledger), ledger.totals_sold);
    }

    #[test]
    fn idle_rounds_are_skipped_by_time() {
        let mut ledger = reference_ledger();
        let t = START + 600;
        ledger.record_sale(5_000 * ONE_USD, t).unwrap();

        let later = t + 50 * DAY;
        let projected = ledger.current_round(later).unwrap();
        assert_eq!((projected.index, projected.price), (3, 9 * CENT));
        assert_eq!(projected.ts, START + 3 * 15 * DAY);
        // projection alone does not move the ledger
        assert_eq!(ledger.current_index, 0);

        let receipt = ledger.record_sale(1_000 * ONE_USD, later).unwrap();
        assert_eq!((receipt.round_index, receipt.price), (3, 9 * CENT));

        let current = ledger.current_round(later).unwrap();
        assert_eq!((current.index, current.price), (3, 9 * CENT));
        assert!(!current.stopped);
        assert_eq!(current.ts, START + 45 * DAY);

        for (index, ts) in [(1, START + 15 * DAY), (2, START + 30 * DAY)] {
            let round = ledger.round(index).unwrap();
            assert!(round.stopped);
            assert_eq!(round.ts, ts);
            assert_eq!(round.total_sold, 0);
        }
        assert!(ledger.round(0).unwrap().stopped);
        assert_eq!(ledger.round(3).unwrap().total_sold, 1_000 * ONE_USD);
        assert_eq!(ledger.totals_sold, 6_000 * ONE_USD);
    }

    #[test]
    fn time_skip_counts_from_cap_activation() {
        let mut ledger = reference_ledger();
        let t = START + 5 * DAY;
        ledger.record_sale(300_000 * ONE_USD, t).unwrap();
        assert_eq!(ledger.current_index, 1);
        // 14 days after round 1 opened it is still current
        assert_eq!(ledger.current_round(t + 14 * DAY).unwrap().index, 1);
        let skipped = ledger.current_round(t + 16 * DAY).unwrap();
        assert_eq!(skipped.index, 2);
        assert_eq!(skipped.ts, t + 15 * DAY);
    }

    #[test]
    fn time_skip_stops_at_last_planned_round() {
        let mut ledger = RoundLedger::new(
            &reference_schedule(),
            START,
            DEFAULT_ROUND_DURATION,
            3,
            PriceProgression::default(),
        )
        .unwrap();
        let far = START + 400 * DAY;
        let projected = ledger.current_round(far).unwrap();
        assert_eq!((projected.index, projected.price), (2, 6 * CENT));
        assert_eq!(projected.ts, START + 30 * DAY);

        ledger.record_sale(ONE_USD, far).unwrap();
        assert_eq!(ledger.current_index, 2);
        assert_eq!(ledger.current_round(far + 400 * DAY).unwrap().index, 2);
    }

    #[test]
    fn sale_past_the_final_round_is_rejected() {
        let mut ledger = RoundLedger::new(
            &reference_schedule(),
            START,
            0,
            2,
            PriceProgression::default(),
        )
        .unwrap();
        ledger.record_sale(300_000 * ONE_USD, START).unwrap();
        let receipt = ledger.record_sale(400_000 * ONE_USD, START).unwrap();
        assert_eq!(receipt.price, 3 * CENT);
        assert!(ledger.exhausted);

        let before = ledger.totals_sold;
        assert_eq!(
            ledger.record_sale(ONE_USD, START + 1).unwrap_err(),
            Error::from(ErrorCode::RoundsExhausted)
        );
        assert_eq!(ledger.totals_sold, before);

        let last = ledger.current_round(START + 1).unwrap();
        assert_eq!(last.index, 1);
        assert!(last.stopped);
    }

    #[test]
    fn zero_duration_disables_time_skip() {
        let mut ledger = RoundLedger::new(
            &reference_schedule(),
            START,
            0,
            MAX_ROUNDS as u32,
            PriceProgression::default(),
        )
        .unwrap();
        ledger.record_sale(ONE_USD, START + 1_000 * DAY).unwrap();
        assert_eq!(ledger.current_index, 0);
    }

    #[test]
    fn zero_sale_is_rejected() {
        let mut ledger = reference_ledger();
        assert_eq!(
            ledger.record_sale(0, START).unwrap_err(),
            Error::from(ErrorCode::ZeroAmount)
        );
    }

    #[test]
    fn arithmetic_progression_matches_reference_prices() {
        let progression = PriceProgression::default();
        assert_eq!(progression.price_at(3 * CENT, 1).unwrap(), 6 * CENT);
        assert_eq!(progression.price_at(3 * CENT, 2).unwrap(), 9 * CENT);
        let half_step = PriceProgression::Arithmetic {
            step_rate: RATE_DENOMINATOR / 2,
        };
        assert_eq!(half_step.price_at(2 * CENT, 3).unwrap(), 5 * CENT);
    }

    #[test]
    fn geometric_progression_triples_every_two_rounds() {
        let progression = PriceProgression::Geometric {
            multiplier_rate: 3 * RATE_DENOMINATOR,
            period: 2,
        };
        let prices: Vec<u128> = (1..=5)
            .map(|k| progression.price_at(3 * CENT, k).unwrap())
            .collect();
        assert_eq!(prices, vec![3 * CENT, 9 * CENT, 9 * CENT, 27 * CENT, 27 * CENT]);

        let mut ledger = RoundLedger::new(
            &reference_schedule(),
            START,
            DEFAULT_ROUND_DURATION,
            MAX_ROUNDS as u32,
            progression,
        )
        .unwrap();
        let receipt = ledger.record_sale(ONE_USD, START + 46 * DAY).unwrap();
        assert_eq!((receipt.round_index, receipt.price), (3, 9 * CENT));
    }

    #[test]
    fn geometric_rounds_reached_by_cap_form_a_staircase() {
        let mut ledger = RoundLedger::new(
            &reference_schedule(),
            START,
            DEFAULT_ROUND_DURATION,
            MAX_ROUNDS as u32,
            PriceProgression::Geometric {
                multiplier_rate: 3 * RATE_DENOMINATOR,
                period: 2,
            },
        )
        .unwrap();
        let t = START + 600;
        let mut prices = Vec::new();
        for i in 0..6 {
            let receipt = ledger.record_sale(300_000 * ONE_USD, t + i).unwrap();
            assert_eq!(receipt.round_index, i as u32);
            prices.push(receipt.price);
        }
        assert_eq!(
            prices,
            vec![CENT, 3 * CENT, 3 * CENT, 9 * CENT, 9 * CENT, 27 * CENT]
        );
        // configured rounds rise strictly, synthesized ones step up once per period
        assert!(prices[0] < prices[1]);
        for pair in prices.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        for pair in prices[1..].chunks_exact(2) {
            assert_eq!(pair[0], pair[1]);
        }
    }

    #[test]
    fn rejects_bad_plans() {
        let plan = reference_schedule();
        let new = |schedule: &[RoundParams], max: u32, progression: PriceProgression| {
            RoundLedger::new(schedule, START, DEFAULT_ROUND_DURATION, max, progression)
        };
        assert!(new(&[], 4, PriceProgression::default()).is_err());
        assert!(new(&plan, 1, PriceProgression::default()).is_err());
        assert!(new(&plan, MAX_ROUNDS as u32 + 1, PriceProgression::default()).is_err());
        assert!(new(&[plan[1], plan[0]], 4, PriceProgression::default()).is_err());
        let zero_cap = RoundParams {
            usd_cap: 0,
            ..plan[0]
        };
        assert!(new(&[zero_cap], 4, PriceProgression::default()).is_err());
        assert!(new(&plan, 4, PriceProgression::Arithmetic { step_rate: 0 }).is_err());
        let flat = PriceProgression::Geometric {
            multiplier_rate: RATE_DENOMINATOR,
            period: 1,
        };
        assert!(new(&plan, 4, flat).is_err());
        assert!(RoundLedger::new(&plan, START, -1, 4, PriceProgression::default()).is_err());
    }

    #[test]
    fn random_sales_keep_ledger_invariants() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut ledger = reference_ledger();
        let mut now = START;
        let mut last_index = 0;
        for _ in 0..500 {
            now += rng.random_range(0..3 * DAY);
            let usd = rng.random_range(1..=60_000u128) * ONE_USD;
            match ledger.record_sale(usd, now) {
                Ok(receipt) => assert!(receipt.round_index >= last_index),
                Err(err) => {
                    assert_eq!(err, Error::from(ErrorCode::RoundsExhausted));
                    break;
                }
            }
            let current = ledger.current_round(now).unwrap();
            assert!(current.index >= last_index);
            last_index = current.index;
            assert_eq!(sold_sum(&ledger), ledger.totals_sold);
            assert_eq!(
                ledger.rounds.iter().filter(|round| !round.stopped).count(),
                usize::from(!ledger.exhausted)
            );
        }
    }

    proptest! {
        #[test]
        fn prices_never_decrease_with_index(
            sales in proptest::collection::vec((1u128..400_000u128, 0i64..40), 1..60)
        ) {
            let mut ledger = reference_ledger();
            let mut now = START;
            for (usd, days) in sales {
                now += days * DAY;
                if ledger.record_sale(usd * ONE_USD, now).is_err() {
                    break;
                }
            }
            for pair in ledger.rounds.windows(2) {
                prop_assert!(pair[0].price <= pair[1].price);
                prop_assert_eq!(pair[0].index + 1, pair[1].index);
                prop_assert!(pair[0].stopped);
                prop_assert!(pair[0].ts <= pair[1].ts || pair[0].ts == 0);
            }
        }
    }
}
