//! Sprint chart math: burndown, burnup, and velocity.
//!
//! These are pure functions over a sprint's date window and its tasks'
//! point/completion samples. They never consult a clock: the series covers
//! the whole window, and days past the last completion stay flat at the last
//! actual value.

use jiff::{civil::Date, tz::TimeZone, Timestamp};
use serde::{Deserialize, Serialize};

/// One day of a sprint chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// The day this point describes
    pub date: Date,
    /// Where the team would be on a perfectly linear sprint
    pub ideal: f64,
    /// Where the team actually is, from task completion timestamps
    pub actual: f64,
}

/// A sprint's point/completion sample: the task's estimate and when it was
/// completed, if it was.
pub type PointSample = (Option<f64>, Option<Timestamp>);

/// The UTC calendar day a timestamp falls on.
fn completion_date(ts: Timestamp) -> Date {
    ts.to_zoned(TimeZone::UTC).date()
}

/// Total estimated points across the samples; unestimated tasks count 0.
fn total_points(samples: &[PointSample]) -> f64 {
    samples.iter().map(|(points, _)| points.unwrap_or(0.0)).sum()
}

/// Points completed on or before the given day.
fn completed_by(samples: &[PointSample], date: Date) -> f64 {
    samples
        .iter()
        .filter(|(_, completed)| matches!(completed, Some(ts) if completion_date(*ts) <= date))
        .map(|(points, _)| points.unwrap_or(0.0))
        .sum()
}

/// Inclusive list of days from `start` through `end`.
fn window(start: Date, end: Date) -> Vec<Date> {
    let mut days = Vec::new();
    let mut day = start;
    while day <= end {
        days.push(day);
        match day.tomorrow() {
            Ok(next) => day = next,
            Err(_) => break,
        }
    }
    days
}

/// Burndown series: remaining points per day against a linear ideal.
///
/// The ideal starts at the total and reaches 0 on the last day; a single-day
/// sprint's ideal is 0. Empty when the window is inverted.
pub fn burndown(start: Date, end: Date, samples: &[PointSample]) -> Vec<ChartPoint> {
    if end < start {
        return Vec::new();
    }

    let days = window(start, end);
    let total = total_points(samples);
    let n = days.len();

    days.into_iter()
        .enumerate()
        .map(|(i, date)| {
            let ideal = if n == 1 {
                0.0
            } else {
                total - total * i as f64 / (n - 1) as f64
            };
            ChartPoint {
                date,
                ideal,
                actual: total - completed_by(samples, date),
            }
        })
        .collect()
}

/// Burnup series: cumulative completed points per day against a linear ideal.
///
/// The ideal starts at 0 and reaches the total on the last day; a single-day
/// sprint's ideal is the total. Empty when the window is inverted.
pub fn burnup(start: Date, end: Date, samples: &[PointSample]) -> Vec<ChartPoint> {
    if end < start {
        return Vec::new();
    }

    let days = window(start, end);
    let total = total_points(samples);
    let n = days.len();

    days.into_iter()
        .enumerate()
        .map(|(i, date)| {
            let ideal = if n == 1 {
                total
            } else {
                total * i as f64 / (n - 1) as f64
            };
            ChartPoint {
                date,
                ideal,
                actual: completed_by(samples, date),
            }
        })
        .collect()
}

/// Mean completed points across recently completed sprints; 0.0 when there
/// are none.
pub fn velocity(completed_points: &[f64]) -> f64 {
    if completed_points.is_empty() {
        return 0.0;
    }
    completed_points.iter().sum::<f64>() / completed_points.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn burndown_linear_ideal_over_window() {
        let samples = vec![(Some(6.0), None), (Some(4.0), None)];
        let series = burndown(date("2026-03-02"), date("2026-03-06"), &samples);

        assert_eq!(series.len(), 5);
        assert_eq!(series[0].ideal, 10.0);
        assert_eq!(series[2].ideal, 5.0);
        assert_eq!(series[4].ideal, 0.0);
        // Nothing completed, so the actual line stays at the total.
        assert!(series.iter().all(|p| p.actual == 10.0));
    }

    #[test]
    fn burndown_actual_drops_on_completion_day() {
        let samples = vec![
            (Some(3.0), Some(ts("2026-03-03T15:00:00Z"))),
            (Some(5.0), None),
            (None, Some(ts("2026-03-04T09:00:00Z"))),
        ];
        let series = burndown(date("2026-03-02"), date("2026-03-05"), &samples);

        assert_eq!(series[0].actual, 8.0);
        assert_eq!(series[1].actual, 5.0);
        // The unestimated completion does not move the line.
        assert_eq!(series[2].actual, 5.0);
        assert_eq!(series[3].actual, 5.0);
    }

    #[test]
    fn burndown_single_day_sprint() {
        let samples = vec![(Some(2.0), None)];
        let series = burndown(date("2026-03-02"), date("2026-03-02"), &samples);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].ideal, 0.0);
        assert_eq!(series[0].actual, 2.0);
    }

    #[test]
    fn burndown_everything_done_on_day_one() {
        let samples = vec![
            (Some(3.0), Some(ts("2026-03-02T09:00:00Z"))),
            (Some(2.0), Some(ts("2026-03-02T17:00:00Z"))),
        ];
        let series = burndown(date("2026-03-02"), date("2026-03-04"), &samples);
        assert!(series.iter().all(|p| p.actual == 0.0));
    }

    #[test]
    fn burndown_inverted_window_is_empty() {
        assert!(burndown(date("2026-03-06"), date("2026-03-02"), &[]).is_empty());
    }

    #[test]
    fn burnup_climbs_to_total() {
        let samples = vec![
            (Some(4.0), Some(ts("2026-03-02T10:00:00Z"))),
            (Some(6.0), Some(ts("2026-03-04T10:00:00Z"))),
        ];
        let series = burnup(date("2026-03-02"), date("2026-03-04"), &samples);

        assert_eq!(series[0].ideal, 0.0);
        assert_eq!(series[2].ideal, 10.0);
        assert_eq!(series[0].actual, 4.0);
        assert_eq!(series[1].actual, 4.0);
        assert_eq!(series[2].actual, 10.0);
    }

    #[test]
    fn burnup_single_day_ideal_is_total() {
        let samples = vec![(Some(7.0), None)];
        let series = burnup(date("2026-03-02"), date("2026-03-02"), &samples);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].ideal, 7.0);
        assert_eq!(series[0].actual, 0.0);
    }

    #[test]
    fn completions_outside_window_still_count_before_their_day() {
        // A completion stamped before the window keeps the actual line below
        // the total from day one.
        let samples = vec![
            (Some(3.0), Some(ts("2026-03-01T10:00:00Z"))),
            (Some(7.0), None),
        ];
        let series = burndown(date("2026-03-02"), date("2026-03-03"), &samples);
        assert_eq!(series[0].actual, 7.0);
    }

    #[test]
    fn velocity_is_mean_of_completed_points() {
        assert_eq!(velocity(&[10.0, 14.0, 12.0]), 12.0);
    }

    #[test]
    fn velocity_of_no_sprints_is_zero() {
        assert_eq!(velocity(&[]), 0.0);
    }
}
