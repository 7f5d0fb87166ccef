//! Partition transformations.
//!
//! Every function takes a partition by reference and returns a new one; the
//! caller decides when the result replaces the stored partition.

use crate::reading::{NewReading, Reading};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// Decimal places kept on the derived monthly mean.
pub const MEAN_DECIMALS: i32 = 3;

/// Round a mean to [`MEAN_DECIMALS`] places, ties to even.
pub fn round_mean(value: f64) -> f64 {
    let scale = 10f64.powi(MEAN_DECIMALS);
    (value * scale).round_ties_even() / scale
}

/// Append a reading and recompute the monthly mean over the whole partition.
///
/// Duplicate dates are kept: appending the same day twice yields two rows.
pub fn append_reading(partition: &[Reading], reading: NewReading) -> Vec<Reading> {
    let mut rows = partition.to_vec();
    rows.push(reading.into());
    recompute_monthly_mean(&rows)
}

/// Set every row's monthly mean pH to the rounded mean over its (year, month)
/// group.
///
/// Rows without a year or month belong to no group and get no mean. Rows
/// without a pH stay in their group but do not contribute to it.
pub fn recompute_monthly_mean(partition: &[Reading]) -> Vec<Reading> {
    let mut sums: HashMap<(i32, u32), (f64, u32)> = HashMap::new();
    for row in partition {
        let ph = row.ph.filter(|v| v.is_finite());
        if let (Some(key), Some(ph)) = (row.month_key(), ph) {
            let entry = sums.entry(key).or_insert((0.0, 0));
            entry.0 += ph;
            entry.1 += 1;
        }
    }
    partition
        .iter()
        .map(|row| {
            let mean = row
                .month_key()
                .and_then(|key| sums.get(&key))
                .map(|(sum, count)| round_mean(sum / f64::from(*count)));
            Reading {
                monthly_mean_ph: mean,
                ..row.clone()
            }
        })
        .collect()
}

/// Remove every row recorded on `target`.
///
/// Means are left as they were; run [`recompute_monthly_mean`] on the result
/// to refresh them.
pub fn delete_by_date(partition: &[Reading], target: NaiveDate) -> Vec<Reading> {
    partition
        .iter()
        .filter(|row| !row.is_on(&target))
        .cloned()
        .collect()
}

/// Rows ordered by (year, month, day); rows missing a component sort last
/// within their level. The stored order is not changed.
pub fn sorted_for_display(partition: &[Reading]) -> Vec<Reading> {
    let mut rows = partition.to_vec();
    rows.sort_by_key(|r| {
        (
            r.year.is_none(),
            r.year,
            r.month.is_none(),
            r.month,
            r.day.is_none(),
            r.day,
        )
    });
    rows
}

/// Distinct valid calendar dates present in the partition, ascending.
pub fn unique_dates(partition: &[Reading]) -> Vec<NaiveDate> {
    partition
        .iter()
        .filter_map(Reading::date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reading(day: u32, month: u32, year: i32, ph: f64) -> Reading {
        Reading {
            day: Some(day),
            month: Some(month),
            year: Some(year),
            ph: Some(ph),
            flow: Some(1.0),
            monthly_mean_ph: None,
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn drain_a() -> Vec<Reading> {
        vec![reading(1, 6, 2024, 7.0), reading(15, 6, 2024, 7.4)]
    }

    #[test]
    fn test_monthly_mean_of_two() {
        let rows = recompute_monthly_mean(&drain_a());
        assert_eq!(rows[0].monthly_mean_ph, Some(7.2));
        assert_eq!(rows[1].monthly_mean_ph, Some(7.2));
    }

    #[test]
    fn test_append_recomputes_and_rounds() {
        let rows = recompute_monthly_mean(&drain_a());
        let rows = append_reading(&rows, NewReading::clamped(date(2024, 6, 20), 7.0, 2.0));
        assert_eq!(rows.len(), 3);
        for row in &rows {
            assert_eq!(row.monthly_mean_ph, Some(7.133));
        }
    }

    #[test]
    fn test_single_row_group_mean_is_own_ph() {
        let rows = recompute_monthly_mean(&[reading(3, 1, 2024, 6.85)]);
        assert_eq!(rows[0].monthly_mean_ph, Some(6.85));
    }

    #[test]
    fn test_groups_are_per_year_and_month() {
        let rows = recompute_monthly_mean(&[
            reading(1, 6, 2024, 7.0),
            reading(1, 7, 2024, 8.0),
            reading(1, 6, 2023, 6.0),
            reading(2, 6, 2024, 7.5),
        ]);
        let means: Vec<Option<f64>> = rows.iter().map(|r| r.monthly_mean_ph).collect();
        assert_eq!(means, vec![Some(7.25), Some(8.0), Some(6.0), Some(7.25)]);
    }

    #[test]
    fn test_missing_month_or_year_gets_no_mean() {
        let mut no_month = reading(1, 6, 2024, 9.0);
        no_month.month = None;
        no_month.monthly_mean_ph = Some(1.0);
        let mut no_year = reading(1, 6, 2024, 9.0);
        no_year.year = None;
        let rows = recompute_monthly_mean(&[reading(2, 6, 2024, 7.0), no_month, no_year]);
        assert_eq!(rows[0].monthly_mean_ph, Some(7.0));
        assert_eq!(rows[1].monthly_mean_ph, None);
        assert_eq!(rows[2].monthly_mean_ph, None);
    }

    #[test]
    fn test_missing_ph_does_not_contribute() {
        let mut blank = reading(2, 6, 2024, 0.0);
        blank.ph = None;
        let rows = recompute_monthly_mean(&[reading(1, 6, 2024, 7.0), blank.clone()]);
        assert_eq!(rows[0].monthly_mean_ph, Some(7.0));
        assert_eq!(rows[1].monthly_mean_ph, Some(7.0));

        let rows = recompute_monthly_mean(&[blank]);
        assert_eq!(rows[0].monthly_mean_ph, None);
    }

    #[test]
    fn test_append_keeps_duplicates() {
        let input = NewReading::clamped(date(2024, 6, 1), 7.0, 0.0);
        let rows = append_reading(&drain_a(), input);
        assert_eq!(rows.iter().filter(|r| r.is_on(&date(2024, 6, 1))).count(), 2);
    }

    #[test]
    fn test_delete_leaves_stale_mean() {
        let rows = recompute_monthly_mean(&drain_a());
        let rows = append_reading(&rows, NewReading::clamped(date(2024, 6, 20), 7.0, 0.0));
        let remaining = delete_by_date(&rows, date(2024, 6, 15));
        assert_eq!(remaining.len(), 2);
        assert!(remaining.iter().all(|r| !r.is_on(&date(2024, 6, 15))));
        assert!(remaining.iter().all(|r| r.monthly_mean_ph == Some(7.133)));

        let refreshed = recompute_monthly_mean(&remaining);
        assert!(refreshed.iter().all(|r| r.monthly_mean_ph == Some(7.0)));
    }

    #[test]
    fn test_delete_removes_every_match() {
        let mut rows = drain_a();
        rows.push(reading(15, 6, 2024, 7.9));
        let remaining = delete_by_date(&rows, date(2024, 6, 15));
        assert_eq!(remaining, vec![reading(1, 6, 2024, 7.0)]);
    }

    #[test]
    fn test_sorted_for_display() {
        let mut undated = reading(1, 1, 2020, 7.0);
        undated.year = None;
        let rows = vec![
            reading(20, 6, 2024, 7.0),
            undated.clone(),
            reading(1, 6, 2024, 7.1),
            reading(30, 5, 2024, 7.2),
            reading(31, 12, 2023, 7.3),
        ];
        let sorted = sorted_for_display(&rows);
        let days: Vec<Option<u32>> = sorted.iter().map(|r| r.day).collect();
        assert_eq!(days, vec![Some(31), Some(30), Some(1), Some(20), Some(1)]);
        assert_eq!(sorted.last(), Some(&undated));
        // Stored order untouched
        assert_eq!(rows[0].day, Some(20));
    }

    #[test]
    fn test_unique_dates() {
        let mut invalid = reading(31, 2, 2024, 7.0);
        invalid.ph = None;
        let rows = vec![
            reading(15, 6, 2024, 7.0),
            reading(1, 6, 2024, 7.0),
            reading(15, 6, 2024, 7.2),
            invalid,
        ];
        assert_eq!(unique_dates(&rows), vec![date(2024, 6, 1), date(2024, 6, 15)]);
    }

    #[test]
    fn test_round_mean() {
        assert_eq!(round_mean(7.1333333), 7.133);
        assert_eq!(round_mean(7.0), 7.0);
        assert_eq!(round_mean(6.9996), 7.0);
        // Exact ties go to the even digit
        assert_eq!(round_mean(7.0625), 7.062);
        assert_eq!(round_mean(2.1875), 2.188);
    }

    #[test]
    fn test_mean_on_a_tie_rounds_to_even() {
        let rows = recompute_monthly_mean(&[reading(1, 6, 2024, 7.0), reading(2, 6, 2024, 7.125)]);
        assert_eq!(rows[0].monthly_mean_ph, Some(7.062));
        assert_eq!(rows[1].monthly_mean_ph, Some(7.062));
    }

    fn any_reading() -> impl Strategy<Value = Reading> {
        (
            proptest::option::of(2023i32..=2024),
            proptest::option::of(1u32..=3),
            1u32..=28,
            proptest::option::of(0.0f64..14.0),
            0.0f64..50.0,
        )
            .prop_map(|(year, month, day, ph, flow)| Reading {
                day: Some(day),
                month,
                year,
                ph,
                flow: Some(flow),
                monthly_mean_ph: None,
            })
    }

    fn any_new_reading() -> impl Strategy<Value = NewReading> {
        (2023i32..=2024, 1u32..=3, 1u32..=28, 0.0f64..14.0, 0.0f64..50.0).prop_map(
            |(year, month, day, ph, flow)| NewReading {
                date: date(year, month, day),
                ph,
                flow,
            },
        )
    }

    proptest! {
        #[test]
        fn append_adds_exactly_one_row(rows in proptest::collection::vec(any_reading(), 0..20), new in any_new_reading()) {
            let appended = append_reading(&rows, new);
            prop_assert_eq!(appended.len(), rows.len() + 1);
            let last = appended.last().unwrap();
            prop_assert!(last.is_on(&new.date));
            prop_assert_eq!(last.ph, Some(new.ph));
            prop_assert_eq!(last.flow, Some(new.flow));
        }

        #[test]
        fn month_groups_share_the_rounded_mean(rows in proptest::collection::vec(any_reading(), 0..30)) {
            let computed = recompute_monthly_mean(&rows);
            for row in &computed {
                match row.month_key() {
                    None => prop_assert_eq!(row.monthly_mean_ph, None),
                    Some(key) => {
                        let values: Vec<f64> = rows
                            .iter()
                            .filter(|r| r.month_key() == Some(key))
                            .filter_map(|r| r.ph)
                            .collect();
                        let expected = if values.is_empty() {
                            None
                        } else {
                            Some(round_mean(values.iter().sum::<f64>() / values.len() as f64))
                        };
                        prop_assert_eq!(row.monthly_mean_ph, expected);
                    }
                }
            }
        }

        #[test]
        fn delete_by_date_is_idempotent(rows in proptest::collection::vec(any_reading(), 0..30), day in 1u32..=28, month in 1u32..=3) {
            let target = date(2024, month, day);
            let once = delete_by_date(&rows, target);
            let twice = delete_by_date(&once, target);
            prop_assert_eq!(once, twice);
        }
    }
}
