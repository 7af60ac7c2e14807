// =============================================================================
// Crossover Detector — Golden / Death cross event scan
// =============================================================================
//
// Scans two aligned series (conventionally MA50 as fast and MA200 as slow)
// for sign transitions of `fast - slow`:
//
//   Golden: fast[i] >  slow[i]  after  fast[i-1] <= slow[i-1]
//   Death:  fast[i] <  slow[i]  after  fast[i-1] >= slow[i-1]
//
// A pair of indices with any undefined value is skipped silently; no event,
// no error. Between two same-kind events there is always an opposite-kind
// event unless an undefined gap interrupts continuity.
// =============================================================================

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::EngineError;
use crate::series::{NumericSeries, TimeSeries};

/// The direction of a moving-average crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CrossoverKind {
    Golden,
    Death,
}

impl std::fmt::Display for CrossoverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Golden => write!(f, "Golden cross"),
            Self::Death => write!(f, "Death cross"),
        }
    }
}

/// A detected crossing, stamped with the bar it fired on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrossoverEvent {
    pub index: usize,
    pub date: NaiveDate,
    pub price: f64,
    pub kind: CrossoverKind,
}

/// Scan `fast` against `slow` along the date axis of `series`.
///
/// Both input series must be aligned 1:1 with the bar series; a length
/// mismatch is a `DataError`. Events are returned in date order.
pub fn detect_crossovers(
    series: &TimeSeries,
    fast: &NumericSeries,
    slow: &NumericSeries,
) -> Result<Vec<CrossoverEvent>, EngineError> {
    if fast.len() != series.len() || slow.len() != series.len() {
        return Err(EngineError::data(
            series.symbol(),
            format!(
                "crossover inputs not aligned: {} bars, fast {}, slow {}",
                series.len(),
                fast.len(),
                slow.len()
            ),
        ));
    }

    let bars = series.bars();
    let mut events = Vec::new();

    for i in 1..series.len() {
        let (Some(f_prev), Some(f_cur), Some(s_prev), Some(s_cur)) =
            (fast.get(i - 1), fast.get(i), slow.get(i - 1), slow.get(i))
        else {
            continue;
        };

        let kind = if f_cur > s_cur && f_prev <= s_prev {
            CrossoverKind::Golden
        } else if f_cur < s_cur && f_prev >= s_prev {
            CrossoverKind::Death
        } else {
            continue;
        };

        events.push(CrossoverEvent {
            index: i,
            date: bars[i].date,
            price: bars[i].close,
            kind,
        });
    }

    Ok(events)
}

/// The most recent event of `kind`, for the summary card.
pub fn last_of_kind(events: &[CrossoverEvent], kind: CrossoverKind) -> Option<CrossoverEvent> {
    events.iter().rev().find(|e| e.kind == kind).copied()
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Bar;

    fn series_of(closes: &[f64]) -> TimeSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let date = NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .checked_add_days(chrono::Days::new(i as u64))
                    .unwrap();
                Bar::new(date, c, 1_000.0, c + 1.0, c - 1.0)
            })
            .collect();
        TimeSeries::new("TEST", bars).unwrap()
    }

    fn opt(values: &[Option<f64>]) -> NumericSeries {
        NumericSeries::from_options(values.to_vec())
    }

    #[test]
    fn golden_then_death_reference_case() {
        let series = series_of(&[1.0, 1.0, 3.0, 3.0, 1.0]);
        let fast = NumericSeries::from_values(vec![1.0, 1.0, 3.0, 3.0, 1.0]);
        let slow = NumericSeries::from_values(vec![2.0; 5]);

        let events = detect_crossovers(&series, &fast, &slow).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, CrossoverKind::Golden);
        assert_eq!(events[0].index, 2);
        assert_eq!(events[1].kind, CrossoverKind::Death);
        assert_eq!(events[1].index, 4);
        assert_eq!(events[1].price, 1.0);
    }

    #[test]
    fn touch_without_crossing_fires_on_separation() {
        // Equal values count as "<=" / ">=", so separation after a touch
        // fires the event.
        let series = series_of(&[1.0, 2.0, 3.0]);
        let fast = NumericSeries::from_values(vec![1.0, 2.0, 3.0]);
        let slow = NumericSeries::from_values(vec![2.0, 2.0, 2.0]);
        let events = detect_crossovers(&series, &fast, &slow).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, CrossoverKind::Golden);
        assert_eq!(events[0].index, 2);
    }

    #[test]
    fn undefined_neighbor_is_skipped() {
        let series = series_of(&[1.0, 3.0, 3.0]);
        // Crossing happens across the gap; no event may fire.
        let fast = opt(&[Some(1.0), None, Some(3.0)]);
        let slow = NumericSeries::from_values(vec![2.0; 3]);
        let events = detect_crossovers(&series, &fast, &slow).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn length_mismatch_is_data_error() {
        let series = series_of(&[1.0, 2.0]);
        let fast = NumericSeries::from_values(vec![1.0]);
        let slow = NumericSeries::from_values(vec![1.0, 2.0]);
        assert!(detect_crossovers(&series, &fast, &slow).is_err());
    }

    #[test]
    fn events_alternate_over_continuous_series() {
        let closes = [1.0, 3.0, 1.0, 3.0, 1.0, 3.0];
        let series = series_of(&closes);
        let fast = NumericSeries::from_values(closes.to_vec());
        let slow = NumericSeries::from_values(vec![2.0; closes.len()]);
        let events = detect_crossovers(&series, &fast, &slow).unwrap();
        for pair in events.windows(2) {
            assert_ne!(pair[0].kind, pair[1].kind);
        }
    }

    #[test]
    fn last_of_kind_picks_most_recent() {
        let closes = [1.0, 3.0, 1.0, 3.0];
        let series = series_of(&closes);
        let fast = NumericSeries::from_values(closes.to_vec());
        let slow = NumericSeries::from_values(vec![2.0; 4]);
        let events = detect_crossovers(&series, &fast, &slow).unwrap();

        let golden = last_of_kind(&events, CrossoverKind::Golden).unwrap();
        assert_eq!(golden.index, 3);
        let death = last_of_kind(&events, CrossoverKind::Death).unwrap();
        assert_eq!(death.index, 2);
    }
}
