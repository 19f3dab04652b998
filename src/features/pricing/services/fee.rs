use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::features::pricing::models::PriceRule;

/// Sessions up to this length are charged half the initial rate.
const HALF_HOUR_MINUTES: i64 = 30;

/// Sessions up to this length are charged the full initial rate.
const FIRST_HOUR_MINUTES: i64 = 60;

/// Allowance past the first hour before additional-hour billing begins.
const GRACE_MINUTES: i64 = 10;

/// Outcome of a fee computation for one parking session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fee {
    pub elapsed_minutes: i64,
    pub amount: Decimal,
}

/// Computes the fee for a session under the tiered rule:
///
/// - up to 30 minutes: half the initial rate
/// - 31 to 60 minutes: the initial rate
/// - past the first hour: the initial rate plus one additional-hour rate per
///   started hour, after a 10-minute grace period
///
/// Elapsed time is rounded up to whole minutes; a negative duration (exit
/// before entry) counts as zero. The amount is rounded half away from zero
/// to two decimal places at the end, all intermediate arithmetic is exact.
pub fn compute_fee(entered_at: NaiveDateTime, exited_at: NaiveDateTime, rule: &PriceRule) -> Fee {
    let elapsed_seconds = (exited_at - entered_at).num_seconds().max(0);
    let elapsed_minutes = elapsed_seconds.div_ceil(60);

    let amount = if elapsed_minutes <= HALF_HOUR_MINUTES {
        rule.initial_rate / Decimal::from(2)
    } else if elapsed_minutes <= FIRST_HOUR_MINUTES {
        rule.initial_rate
    } else {
        let remaining = elapsed_minutes - FIRST_HOUR_MINUTES;
        let billable = (remaining - GRACE_MINUTES).max(0);
        let additional_units = billable.div_ceil(60);
        rule.initial_rate + Decimal::from(additional_units) * rule.additional_rate
    };

    let mut amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // Already rounded, so this only pads to two fractional digits.
    amount.rescale(2);

    Fee {
        elapsed_minutes,
        amount,
    }
}
