use crate::models::{ChartPoint, WeekBucket, WeightSample};
use crate::weekly::aggregate_weekly;
use crate::window::{filter_by_window, TimeWindow};
use chrono::{NaiveDate, Weekday};

/// A record that can be drawn as one point of a line chart.
pub trait ChartRecord {
    fn label(&self) -> String;
    fn value(&self) -> f64;
}

impl ChartRecord for WeightSample {
    fn label(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    fn value(&self) -> f64 {
        self.weight
    }
}

impl ChartRecord for WeekBucket {
    fn label(&self) -> String {
        format!(
            "{} - {}",
            self.week_start.format("%Y-%m-%d"),
            self.week_end.format("%Y-%m-%d")
        )
    }

    fn value(&self) -> f64 {
        self.average
    }
}

/// One point per record, in input order.
pub fn build_series<T: ChartRecord>(records: &[T]) -> Vec<ChartPoint> {
    records
        .iter()
        .map(|record| ChartPoint {
            label: record.label(),
            value: record.value(),
        })
        .collect()
}

pub fn daily_series(
    samples: &[WeightSample],
    window: TimeWindow,
    today: NaiveDate,
) -> Vec<ChartPoint> {
    let mut sorted = samples.to_vec();
    sorted.sort_by_key(|sample| sample.date);
    build_series(&filter_by_window(&sorted, window, today))
}

pub fn weekly_series(
    samples: &[WeightSample],
    window: TimeWindow,
    today: NaiveDate,
    first_day: Weekday,
) -> Vec<ChartPoint> {
    let buckets = aggregate_weekly(samples, first_day);
    build_series(&filter_by_window(&buckets, window, today))
}
