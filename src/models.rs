use crate::errors::StoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSample {
    pub id: u64,
    pub date: NaiveDate,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Mean weight of every sample that falls in one calendar week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekBucket {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub average: f64,
    pub sample_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default)]
    pub next_id: u64,
    #[serde(default)]
    pub samples: Vec<WeightSample>,
}

/// Fields of a stored sample that an edit may replace. `None` leaves the field
/// as is; blank notes clear them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SampleUpdate {
    pub date: Option<NaiveDate>,
    pub weight: Option<f64>,
    pub notes: Option<String>,
}

impl AppData {
    /// Records a weight for `date`. A second entry on the same date replaces
    /// the weight of the first rather than adding a duplicate.
    pub fn create(&mut self, date: NaiveDate, weight: f64, notes: Option<String>) -> WeightSample {
        if let Some(existing) = self.samples.iter_mut().find(|sample| sample.date == date) {
            existing.weight = weight;
            if notes.is_some() {
                existing.notes = notes;
            }
            return existing.clone();
        }

        self.next_id = self.next_id.saturating_add(1);
        let sample = WeightSample {
            id: self.next_id,
            date,
            weight,
            notes,
        };
        self.samples.push(sample.clone());
        sample
    }

    pub fn update(&mut self, id: u64, changes: SampleUpdate) -> Result<WeightSample, StoreError> {
        let index = self
            .samples
            .iter()
            .position(|sample| sample.id == id)
            .ok_or(StoreError::NotFound(id))?;

        if let Some(date) = changes.date {
            if self
                .samples
                .iter()
                .any(|sample| sample.date == date && sample.id != id)
            {
                return Err(StoreError::DateTaken(date));
            }
        }

        let sample = &mut self.samples[index];
        if let Some(date) = changes.date {
            sample.date = date;
        }
        if let Some(weight) = changes.weight {
            sample.weight = weight;
        }
        if let Some(notes) = changes.notes {
            sample.notes = (!notes.trim().is_empty()).then_some(notes);
        }
        Ok(sample.clone())
    }

    pub fn get(&self, id: u64) -> Option<&WeightSample> {
        self.samples.iter().find(|sample| sample.id == id)
    }

    pub fn delete(&mut self, id: u64) -> Option<WeightSample> {
        let index = self.samples.iter().position(|sample| sample.id == id)?;
        Some(self.samples.remove(index))
    }

    /// Every sample, oldest first.
    pub fn all(&self) -> Vec<WeightSample> {
        let mut samples = self.samples.clone();
        samples.sort_by_key(|sample| sample.date);
        samples
    }

    /// Samples dated within `[start, end]`, oldest first.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Vec<WeightSample> {
        self.all()
            .into_iter()
            .filter(|sample| sample.date >= start && sample.date <= end)
            .collect()
    }

    /// The newest `limit` samples, newest first.
    pub fn recent(&self, limit: usize) -> Vec<WeightSample> {
        let mut samples = self.all();
        samples.reverse();
        samples.truncate(limit);
        samples
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateWeightRequest {
    pub date: Option<NaiveDate>,
    pub weight: Option<f64>,
    pub notes: Option<String>,
}

/// Entry form posted by the index page. Every field arrives as raw text.
#[derive(Debug, Deserialize)]
pub struct WeightForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    pub window: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartResponse {
    pub window: String,
    pub points: Vec<ChartPoint>,
}
