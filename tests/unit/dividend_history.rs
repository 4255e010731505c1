//! Dividend series, streak and growth behaviour through the public API

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use test_log::test;

use dividend_screener::analysis::dividends::{
    average_dividend_growth, build_series, evaluate_streaks,
};
use dividend_screener::models::DividendEvent;

use crate::common::fixtures::{aristocrat_dividends, date};

fn events(points: &[(NaiveDate, f64)]) -> Vec<DividendEvent> {
    points
        .iter()
        .map(|&(timestamp, value)| DividendEvent::new(timestamp, value))
        .collect()
}

#[test]
fn test_reaffirmed_then_raised_history() {
    let series = build_series(events(&[
        (date(2005, 1, 1), 1.0),
        (date(2006, 3, 1), 1.0),
        (date(2007, 6, 1), 1.2),
    ]));

    let streaks = evaluate_streaks(&series).unwrap();
    assert_eq!(streaks.stable_since, date(2005, 1, 1));
    // same payment 424 days after the first one resets the increase run
    assert_eq!(streaks.increase_since, date(2006, 3, 1));

    assert_eq!(average_dividend_growth(&series).unwrap(), 20.0);
}

#[test]
fn test_cut_from_two_to_one_and_a_half() {
    let series = build_series(events(&[
        (date(2008, 5, 1), 2.0),
        (date(2009, 5, 1), 2.0),
        (date(2010, 5, 1), 1.5),
    ]));

    let streaks = evaluate_streaks(&series).unwrap();
    assert_eq!(streaks.stable_since, date(2010, 5, 1));
    assert_eq!(streaks.increase_since, date(2010, 5, 1));
}

#[test]
fn test_single_cut_position_for_every_k() {
    let base: Vec<(NaiveDate, f64)> = (0..8)
        .map(|i| (date(2010 + i, 2, 1), 1.0 + f64::from(i as u8) * 0.1))
        .collect();

    for k in 1..base.len() {
        let mut points = base.clone();
        // drop every value from k on below its predecessor exactly once
        for point in points.iter_mut().skip(k) {
            point.1 -= 0.5;
        }
        let streaks = evaluate_streaks(&build_series(events(&points))).unwrap();
        assert_eq!(streaks.stable_since, points[k].0, "cut at {k}");
        assert_eq!(streaks.increase_since, points[k].0, "cut at {k}");
    }
}

#[test]
fn test_strictly_increasing_history_keeps_first_date() {
    let series = build_series(events(&[
        (date(1999, 6, 1), 0.2),
        (date(2002, 6, 1), 0.3),
        (date(2009, 6, 1), 0.4),
        (date(2020, 6, 1), 0.9),
    ]));

    let streaks = evaluate_streaks(&series).unwrap();
    assert_eq!(streaks.stable_since, date(1999, 6, 1));
    assert_eq!(streaks.increase_since, date(1999, 6, 1));
}

#[test]
fn test_builder_drops_noise_in_realistic_history() {
    let mut raw = aristocrat_dividends();
    raw.insert(5, DividendEvent::new(date(2005, 7, 1), 0.004));
    raw.push(DividendEvent::new(date(2015, 1, 2), 0.01));

    let series = build_series(raw.clone());
    assert_eq!(series.len(), raw.len() - 2);
    assert!(series.events().iter().all(|e| e.value > 0.01));
    assert!(series
        .events()
        .windows(2)
        .all(|pair| pair[0].timestamp < pair[1].timestamp));
}

#[test]
fn test_growth_of_quarterly_payer() {
    // 400-day cycles land 15 months apart, so one cycle spans two raises
    let growth = average_dividend_growth(&build_series(aristocrat_dividends())).unwrap();
    assert_eq!(growth, 9.19);
}
