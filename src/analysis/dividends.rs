//! Dividend history evaluation
//!
//! Both evaluators are left-to-right folds over a [`DividendSeries`]. They
//! assume the series is ordered by payment date, which
//! [`build_series`] preserves from the provider.

use chrono::{Datelike, NaiveDate};

use crate::error::{Result, ScreenerError};
use crate::models::{DividendEvent, DividendSeries, DividendStreaks};
use crate::utils::{days_between, round_to};

/// Payments at or below this amount are provider noise
pub const NOISE_THRESHOLD: f64 = 0.01;

/// A repeat of the same payment this many days after the last raise
/// resets the increase streak
pub const STALE_INCREASE_DAYS: i64 = 400;

/// Minimum gap between two payments compared as one raise cycle
pub const RAISE_CYCLE_DAYS: i64 = 400;

/// Payments up to and including this year are ignored for growth
pub const GROWTH_BASE_YEAR: i32 = 2005;

/// Build a dividend series from the provider's raw payment list.
///
/// Keeps only payments strictly above [`NOISE_THRESHOLD`]; relative order
/// is preserved.
pub fn build_series<I>(raw: I) -> DividendSeries
where
    I: IntoIterator<Item = DividendEvent>,
{
    DividendSeries::from_events(
        raw.into_iter()
            .filter(|event| event.value > NOISE_THRESHOLD)
            .collect(),
    )
}

struct StreakState {
    streaks: DividendStreaks,
    last_increase: NaiveDate,
    last_value: f64,
}

/// Find the start dates of the current stable and increasing dividend runs.
///
/// A cut restarts both runs. A repeated payment more than
/// [`STALE_INCREASE_DAYS`] after the last raise restarts only the increase
/// run. Raises themselves never move either date.
pub fn evaluate_streaks(series: &DividendSeries) -> Result<DividendStreaks> {
    let (first, rest) = series
        .events()
        .split_first()
        .ok_or_else(|| ScreenerError::insufficient("dividend series is empty"))?;

    let seed = StreakState {
        streaks: DividendStreaks {
            stable_since: first.timestamp,
            increase_since: first.timestamp,
        },
        last_increase: first.timestamp,
        last_value: first.value,
    };

    let state = rest.iter().fold(seed, |mut state, event| {
        if event.value < state.last_value {
            state.streaks.stable_since = event.timestamp;
            state.streaks.increase_since = event.timestamp;
        } else if event.value == state.last_value {
            if days_between(state.last_increase, event.timestamp) > STALE_INCREASE_DAYS {
                state.streaks.increase_since = event.timestamp;
            }
        } else {
            state.last_increase = event.timestamp;
        }
        state.last_value = event.value;
        state
    });

    Ok(state.streaks)
}

/// Average per-cycle dividend growth in percent, rounded to 2 decimals.
///
/// Starts at the first payment after [`GROWTH_BASE_YEAR`]. Each payment more
/// than [`RAISE_CYCLE_DAYS`] after the current anchor contributes the ratio
/// `payment / anchor` and becomes the new anchor.
pub fn average_dividend_growth(series: &DividendSeries) -> Result<f64> {
    let events = series.events();
    let start = events
        .iter()
        .position(|event| event.timestamp.year() > GROWTH_BASE_YEAR)
        .ok_or_else(|| {
            ScreenerError::insufficient(format!(
                "no dividend paid after {GROWTH_BASE_YEAR} to anchor growth"
            ))
        })?;

    let (_, ratio_sum, cycles) = events[start..].iter().fold(
        (events[start], 0.0_f64, 0_u32),
        |(anchor, ratio_sum, cycles), current| {
            if days_between(anchor.timestamp, current.timestamp) > RAISE_CYCLE_DAYS {
                (*current, ratio_sum + current.value / anchor.value, cycles + 1)
            } else {
                (anchor, ratio_sum, cycles)
            }
        },
    );

    if cycles == 0 {
        return Err(ScreenerError::insufficient(format!(
            "no dividend raise cycle longer than {RAISE_CYCLE_DAYS} days"
        )));
    }

    Ok(round_to((ratio_sum / f64::from(cycles) - 1.0) * 100.0, 2))
}
