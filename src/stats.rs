//! The statistics document produced by the WR collector and the chart series
//! derived from it.

use chrono::Weekday;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::FetchError;

/// Weekday index (0 = Monday) to count
pub type WeekdayHistogram = BTreeMap<u32, u32>;
/// Hour of day (0-23) to count
pub type HourHistogram = BTreeMap<u32, u32>;
/// Username to count, in document order
pub type CcHistogram = IndexMap<String, u32>;

pub const DAYS_PER_WEEK: u32 = 7;
pub const HOURS_PER_DAY: u32 = 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsDocument {
    // Share of WRs that got a reply, in [0, 1]
    #[serde(deserialize_with = "nullable_f64")]
    pub ratio_replied_wrs: f64,
    // Number of WRs written
    pub num_wrs: u64,
    // Number of weeks without a WR, holidays excluded
    pub num_skipped_wrs: u64,
    // Average days between a WR and its reply
    #[serde(deserialize_with = "nullable_f64")]
    pub avg_reply_delay: f64,
    pub weekday_wr_histogram: WeekdayHistogram,
    pub hour_reply_histogram: HourHistogram,
    pub cc_histogram: CcHistogram,

    // Also emitted by the collector but not drawn on the dashboard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_replied_wrs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_wr_delay: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday_reply_histogram: Option<WeekdayHistogram>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour_wr_histogram: Option<HourHistogram>,
}

// The collector divides by the number of WRs, so an empty year serializes
// its ratios as `null` (NaN). Those read as zero.
fn nullable_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0.0),
        Value::Number(num) => num
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("Invalid number")),
        _ => Err(serde::de::Error::custom("Expected a number or null")),
    }
}

impl StatsDocument {
    /// Parse and validate a document from its JSON text
    pub fn from_json(text: &str) -> Result<Self, FetchError> {
        let document: StatsDocument = serde_json::from_str(text)?;
        document.validate()?;
        Ok(document)
    }

    /// Check the value ranges serde cannot express
    pub fn validate(&self) -> Result<(), FetchError> {
        if !self.ratio_replied_wrs.is_finite() || !(0.0..=1.0).contains(&self.ratio_replied_wrs)
        {
            return Err(FetchError::ParseFailure(format!(
                "ratio_replied_wrs out of range: {}",
                self.ratio_replied_wrs
            )));
        }
        if !self.avg_reply_delay.is_finite() || self.avg_reply_delay < 0.0 {
            return Err(FetchError::ParseFailure(format!(
                "avg_reply_delay must be a non-negative number: {}",
                self.avg_reply_delay
            )));
        }
        check_keys("weekday_wr_histogram", &self.weekday_wr_histogram, DAYS_PER_WEEK)?;
        check_keys("hour_reply_histogram", &self.hour_reply_histogram, HOURS_PER_DAY)?;
        if let Some(hist) = &self.weekday_reply_histogram {
            check_keys("weekday_reply_histogram", hist, DAYS_PER_WEEK)?;
        }
        if let Some(hist) = &self.hour_wr_histogram {
            check_keys("hour_wr_histogram", hist, HOURS_PER_DAY)?;
        }
        Ok(())
    }
}

fn check_keys(field: &str, hist: &BTreeMap<u32, u32>, bound: u32) -> Result<(), FetchError> {
    match hist.keys().find(|key| **key >= bound) {
        Some(key) => Err(FetchError::ParseFailure(format!(
            "{} has bucket {} outside 0..{}",
            field, key, bound
        ))),
        None => Ok(()),
    }
}

/// One bar of the weekday chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCount {
    /// Display position, 0 is leftmost
    pub slot: usize,
    pub label: &'static str,
    pub count: u32,
}

/// One point of the time-of-day chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourCount {
    pub hour: u32,
    pub count: u32,
}

/// Weekday for a collector index, where 0 is Monday
pub fn weekday_from_index(index: u32) -> Weekday {
    let mut day = Weekday::Mon;
    for _ in 0..(index % DAYS_PER_WEEK) {
        day = day.succ();
    }
    day
}

pub fn get_weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Display slot of a weekday index under the given week start offset
pub fn weekday_slot(index: u32, offset: u32) -> usize {
    ((index + offset) % DAYS_PER_WEEK) as usize
}

/// Slot labels, left to right
pub fn slot_labels(offset: u32) -> [&'static str; 7] {
    let mut labels = [""; 7];
    for index in 0..DAYS_PER_WEEK {
        labels[weekday_slot(index, offset)] = get_weekday_name(weekday_from_index(index));
    }
    labels
}

/// Project the weekday histogram onto display slots, missing days count zero
pub fn weekday_series(hist: &WeekdayHistogram, offset: u32) -> Vec<DayCount> {
    let mut series: Vec<DayCount> = slot_labels(offset)
        .into_iter()
        .enumerate()
        .map(|(slot, label)| DayCount {
            slot,
            label,
            count: 0,
        })
        .collect();

    for (&index, &count) in hist {
        if let Some(day) = series.get_mut(weekday_slot(index, offset)) {
            day.count += count;
        }
    }
    series
}

/// Hours 0-23 in order, missing hours count zero
pub fn hour_series(hist: &HourHistogram) -> Vec<HourCount> {
    (0..HOURS_PER_DAY)
        .map(|hour| HourCount {
            hour,
            count: hist.get(&hour).copied().unwrap_or(0),
        })
        .collect()
}
