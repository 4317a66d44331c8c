use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::SmbMetricsError;
use crate::types::{Money, Months, Percent, Rate};
use crate::SmbResult;

pub(crate) const HUNDRED: Decimal = dec!(100);

/// Convert a 0–100 percentage into a decimal rate.
pub fn percent_to_rate(pct: Percent) -> Rate {
    pct / HUNDRED
}

/// Revenue after `months` periods of compounding at a decimal monthly `rate`,
/// or `None` when the result does not fit in a `Decimal`.
///
/// Used by the metrics calculator for its fixed 3/6/12 month horizons.
#[cfg_attr(not(feature = "business"), allow(dead_code))]
pub(crate) fn compound(revenue: Money, rate: Rate, months: u64) -> Option<Money> {
    (Decimal::ONE + rate)
        .checked_powu(months)
        .and_then(|factor| revenue.checked_mul(factor))
}

/// Projected revenue after `months` of compound growth:
/// `current_revenue × (1 + growth_rate/100)^months`.
///
/// No guards: zero months returns the current revenue and a negative growth
/// rate models decline. Only results the `Decimal` range cannot hold are
/// rejected.
pub fn projected_revenue(
    current_revenue: Money,
    growth_rate: Percent,
    months: Months,
) -> SmbResult<Money> {
    let base = Decimal::ONE + percent_to_rate(growth_rate);

    if base.is_zero() && months < Decimal::ZERO {
        return Err(SmbMetricsError::InvalidInput {
            field: "months".into(),
            reason: "A -100% growth rate cannot be projected backwards in time".into(),
        });
    }
    if base < Decimal::ZERO && !months.fract().is_zero() {
        return Err(SmbMetricsError::InvalidInput {
            field: "months".into(),
            reason: "Growth below -100% requires a whole number of months".into(),
        });
    }

    // Decay past the smallest representable value comes back as None from
    // the ln/exp path; it is zero, not an overflow.
    let decays = base > Decimal::ZERO
        && ((base < Decimal::ONE && months > Decimal::ZERO)
            || (base > Decimal::ONE && months < Decimal::ZERO));
    let factor = match base.checked_powd(months) {
        None if decays => Some(Decimal::ZERO),
        factor => factor,
    };

    factor
        .and_then(|factor| current_revenue.checked_mul(factor))
        .ok_or_else(|| SmbMetricsError::InvalidInput {
            field: "growth_rate".into(),
            reason: format!(
                "Projection of {current_revenue} at {growth_rate}% over {months} months overflows"
            ),
        })
}

/// Monthly growth rate, as a percentage, that turns `current_revenue` into
/// `target_revenue` after `months` of compounding. Inverse of
/// [`projected_revenue`].
///
/// Returns zero when any input is zero or negative.
pub fn required_growth_rate(
    current_revenue: Money,
    target_revenue: Money,
    months: Months,
) -> SmbResult<Percent> {
    if current_revenue <= Decimal::ZERO
        || target_revenue <= Decimal::ZERO
        || months <= Decimal::ZERO
    {
        return Ok(Decimal::ZERO);
    }

    let overflow = || SmbMetricsError::InvalidInput {
        field: "months".into(),
        reason: format!(
            "Growth from {current_revenue} to {target_revenue} over {months} months is out of range"
        ),
    };

    let ratio = target_revenue.checked_div(current_revenue).ok_or_else(overflow)?;
    let exponent = Decimal::ONE.checked_div(months).ok_or_else(overflow)?;
    let factor = ratio.checked_powd(exponent).ok_or_else(overflow)?;

    Ok((factor - Decimal::ONE) * HUNDRED)
}
