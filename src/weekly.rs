use crate::models::{WeekBucket, WeightSample};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::collections::BTreeMap;

/// First day of the week containing `date`.
///
/// Weeks cut off by the start of the calendar begin at `NaiveDate::MIN`.
pub fn week_start(date: NaiveDate, first_day: Weekday) -> NaiveDate {
    let offset =
        (date.weekday().num_days_from_sunday() + 7 - first_day.num_days_from_sunday()) % 7;
    date
        .checked_sub_days(Days::new(u64::from(offset)))
        .unwrap_or(NaiveDate::MIN)
}

/// Last day of the week beginning at `start`, clamped to `NaiveDate::MAX`.
pub fn week_end(start: NaiveDate) -> NaiveDate {
    start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX)
}

/// Groups samples by calendar week and averages each group.
///
/// Buckets come back sorted by `week_start`. Weeks without samples are
/// omitted rather than reported as zero.
pub fn aggregate_weekly(samples: &[WeightSample], first_day: Weekday) -> Vec<WeekBucket> {
    let mut weeks: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for sample in samples {
        let entry = weeks
            .entry(week_start(sample.date, first_day))
            .or_insert((0.0, 0));
        entry.0 += sample.weight;
        entry.1 += 1;
    }

    weeks
        .into_iter()
        .map(|(start, (sum, count))| WeekBucket {
            week_start: start,
            week_end: week_end(start),
            average: round_one_decimal(sum / count as f64),
            sample_count: count,
        })
        .collect()
}

/// The bucket for the week containing `date`, if that week has any samples.
pub fn bucket_for_date(
    samples: &[WeightSample],
    date: NaiveDate,
    first_day: Weekday,
) -> Option<WeekBucket> {
    let start = week_start(date, first_day);
    let in_week: Vec<WeightSample> = samples
        .iter()
        .filter(|sample| week_start(sample.date, first_day) == start)
        .cloned()
        .collect();
    aggregate_weekly(&in_week, first_day).into_iter().next()
}

pub fn buckets_in_year(buckets: &[WeekBucket], year: i32) -> Vec<WeekBucket> {
    buckets
        .iter()
        .filter(|bucket| bucket.week_start.year() == year)
        .cloned()
        .collect()
}

/// Buckets lying entirely inside `[start, end]`.
pub fn buckets_between(
    buckets: &[WeekBucket],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<WeekBucket> {
    buckets
        .iter()
        .filter(|bucket| bucket.week_start >= start && bucket.week_end <= end)
        .cloned()
        .collect()
}

// Half-up for the positive weights this module sees.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample(id: u64, date: NaiveDate, weight: f64) -> WeightSample {
        WeightSample {
            id,
            date,
            weight,
            notes: None,
        }
    }

    #[test]
    fn week_start_is_previous_sunday() {
        // 2025-07-01 is a Tuesday.
        assert_eq!(week_start(date(2025, 7, 1), Weekday::Sun), date(2025, 6, 29));
        assert_eq!(week_start(date(2025, 6, 29), Weekday::Sun), date(2025, 6, 29));
        assert_eq!(week_start(date(2025, 7, 5), Weekday::Sun), date(2025, 6, 29));
        assert_eq!(week_start(date(2025, 7, 6), Weekday::Sun), date(2025, 7, 6));
    }

    #[test]
    fn week_start_honours_configured_first_day() {
        assert_eq!(week_start(date(2025, 7, 1), Weekday::Mon), date(2025, 6, 30));
        assert_eq!(week_start(date(2025, 6, 29), Weekday::Mon), date(2025, 6, 23));
    }

    #[test]
    fn same_week_samples_average_to_one_bucket() {
        let samples = vec![
            sample(1, date(2025, 7, 1), 70.5),
            sample(2, date(2025, 7, 2), 70.3),
            sample(3, date(2025, 7, 3), 70.2),
        ];
        let buckets = aggregate_weekly(&samples, Weekday::Sun);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].week_start, date(2025, 6, 29));
        assert_eq!(buckets[0].week_end, date(2025, 7, 5));
        assert_eq!(buckets[0].average, 70.3);
        assert_eq!(buckets[0].sample_count, 3);
    }

    #[test]
    fn calendar_edges_do_not_overflow() {
        // Weeks at the ends of the calendar clamp instead of overflowing.
        assert_eq!(week_start(NaiveDate::MIN, Weekday::Sun), NaiveDate::MIN);
        assert_eq!(week_end(NaiveDate::MAX), NaiveDate::MAX);

        let samples = vec![
            sample(1, NaiveDate::MIN, 70.0),
            sample(2, NaiveDate::MAX, 71.0),
        ];
        let buckets = aggregate_weekly(&samples, Weekday::Sun);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].week_start, NaiveDate::MIN);
        assert_eq!(buckets[1].week_end, NaiveDate::MAX);
        assert!(bucket_for_date(&samples, NaiveDate::MIN, Weekday::Sun).is_some());
    }

    #[test]
    fn empty_input_yields_no_buckets() {
        assert!(aggregate_weekly(&[], Weekday::Sun).is_empty());
    }

    #[test]
    fn single_sample_bucket_keeps_its_weight() {
        let buckets = aggregate_weekly(&[sample(1, date(2025, 7, 4), 70.0)], Weekday::Sun);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].average, 70.0);
    }

    #[test]
    fn buckets_are_sorted_and_skip_empty_weeks() {
        let samples = vec![
            sample(1, date(2025, 7, 28), 68.9),
            sample(2, date(2025, 7, 1), 70.5),
            sample(3, date(2025, 7, 7), 69.5),
        ];
        let buckets = aggregate_weekly(&samples, Weekday::Sun);
        let starts: Vec<_> = buckets.iter().map(|b| b.week_start).collect();
        assert_eq!(
            starts,
            vec![date(2025, 6, 29), date(2025, 7, 6), date(2025, 7, 27)]
        );
        assert!(buckets.len() <= samples.len());
    }

    #[test]
    fn average_rounds_half_up() {
        let samples = vec![
            sample(1, date(2025, 7, 1), 70.0),
            sample(2, date(2025, 7, 2), 70.5),
        ];
        assert_eq!(aggregate_weekly(&samples, Weekday::Sun)[0].average, 70.3);
    }

    #[test]
    fn bucket_for_date_finds_the_containing_week() {
        let samples = vec![
            sample(1, date(2025, 7, 1), 70.5),
            sample(2, date(2025, 7, 2), 70.3),
            sample(3, date(2025, 7, 7), 69.5),
        ];
        let bucket = bucket_for_date(&samples, date(2025, 7, 5), Weekday::Sun).unwrap();
        assert_eq!(bucket.week_start, date(2025, 6, 29));
        assert_eq!(bucket.average, 70.4);
        assert!(bucket_for_date(&samples, date(2025, 7, 20), Weekday::Sun).is_none());
    }

    #[test]
    fn year_and_range_selection() {
        let samples = vec![
            sample(1, date(2024, 12, 31), 72.0),
            sample(2, date(2025, 7, 1), 70.5),
            sample(3, date(2025, 7, 8), 70.0),
        ];
        let buckets = aggregate_weekly(&samples, Weekday::Sun);

        // 2024-12-31 falls in the week starting 2024-12-29.
        assert_eq!(buckets_in_year(&buckets, 2024).len(), 1);
        assert_eq!(buckets_in_year(&buckets, 2025).len(), 2);

        let inside = buckets_between(&buckets, date(2025, 6, 29), date(2025, 7, 12));
        assert_eq!(inside.len(), 2);
        let partial = buckets_between(&buckets, date(2025, 6, 30), date(2025, 7, 12));
        assert_eq!(partial.len(), 1);
        assert_eq!(partial[0].week_start, date(2025, 7, 6));
    }
}
