use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Default slider position for the 1–10 metrics.
pub const DEFAULT_SLIDER_VALUE: u32 = 5;
/// Default slider position for hours slept.
pub const DEFAULT_HOURS_SLEPT: u32 = 7;

/// A self-reported metric as captured from a slider.
///
/// Stored as text, the way sliders report it. Older files may carry bare JSON
/// numbers, so both shapes are accepted on read; writes always use strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawMetric", into = "String")]
pub struct MetricValue(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMetric {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<RawMetric> for MetricValue {
    fn from(raw: RawMetric) -> Self {
        match raw {
            RawMetric::Text(s) => MetricValue(s),
            RawMetric::Integer(n) => MetricValue(n.to_string()),
            RawMetric::Float(f) => MetricValue(f.to_string()),
        }
    }
}

impl From<MetricValue> for String {
    fn from(value: MetricValue) -> Self {
        value.0
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        MetricValue(s.to_string())
    }
}

impl From<u32> for MetricValue {
    fn from(n: u32) -> Self {
        MetricValue(n.to_string())
    }
}

impl MetricValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn default_slider() -> MetricValue {
    MetricValue::from(DEFAULT_SLIDER_VALUE)
}

pub fn default_hours_slept() -> MetricValue {
    MetricValue::from(DEFAULT_HOURS_SLEPT)
}

/// The five slider readings stored with a journal entry. All five are
/// required on read; an entry missing one is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub stress_quality: MetricValue,
    pub sleep_quality: MetricValue,
    pub productive: MetricValue,
    pub mood_level: MetricValue,
    pub hours_slept: MetricValue,
}

/// The sliders' resting positions.
impl Default for Metrics {
    fn default() -> Self {
        Self {
            stress_quality: default_slider(),
            sleep_quality: default_slider(),
            productive: default_slider(),
            mood_level: default_slider(),
            hours_slept: default_hours_slept(),
        }
    }
}

/// One saved submission. Never edited once it is in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub date: String,
    pub text: String,
    pub mood_score: f64,
    #[serde(flatten)]
    pub metrics: Metrics,
}

/// Formats the display timestamp of a new entry, e.g. `3/4/2026 3:05:09 PM`.
pub fn entry_timestamp<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    now.format("%-m/%-d/%Y %-I:%M:%S %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_entry_serializes_with_camel_case_keys() {
        let entry = JournalEntry {
            date: "3/4/2026 3:05:09 PM".to_string(),
            text: "Had a good day".to_string(),
            mood_score: 6.0,
            metrics: Metrics {
                stress_quality: "3".into(),
                sleep_quality: "8".into(),
                productive: "7".into(),
                mood_level: "8".into(),
                hours_slept: "7".into(),
            },
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({
                "date": "3/4/2026 3:05:09 PM",
                "text": "Had a good day",
                "moodScore": 6.0,
                "stressQuality": "3",
                "sleepQuality": "8",
                "productive": "7",
                "moodLevel": "8",
                "hoursSlept": "7"
            })
        );
    }

    #[test]
    fn test_entry_accepts_numeric_metrics() {
        let entry: JournalEntry = serde_json::from_value(json!({
            "date": "1/1/2026 9:00:00 AM",
            "text": "ok",
            "moodScore": -2.5,
            "stressQuality": 4,
            "sleepQuality": "6",
            "productive": 5,
            "moodLevel": 3,
            "hoursSlept": 6.5
        }))
        .unwrap();
        assert_eq!(entry.metrics.stress_quality.as_str(), "4");
        assert_eq!(entry.metrics.sleep_quality.as_str(), "6");
        assert_eq!(entry.metrics.hours_slept.as_str(), "6.5");
        assert_eq!(entry.mood_score, -2.5);
    }

    #[test]
    fn test_entry_missing_metric_is_rejected() {
        let result = serde_json::from_value::<JournalEntry>(json!({
            "date": "1/1/2026 9:00:00 AM",
            "text": "ok",
            "moodScore": 1.0,
            "stressQuality": "4",
            "sleepQuality": "6",
            "productive": "5",
            "moodLevel": "3"
        }));
        assert!(result.is_err());

        let bare = serde_json::from_str::<JournalEntry>(r#"{"date":"d","text":"t","moodScore":1.0}"#);
        assert!(bare.is_err());
    }

    #[test]
    fn test_metrics_default_is_slider_rest_positions() {
        let metrics = Metrics::default();
        assert_eq!(metrics.productive.as_str(), "5");
        assert_eq!(metrics.hours_slept.as_str(), "7");
    }

    #[test]
    fn test_entry_timestamp_format() {
        let afternoon = Utc.with_ymd_and_hms(2026, 3, 4, 15, 5, 9).unwrap();
        assert_eq!(entry_timestamp(&afternoon), "3/4/2026 3:05:09 PM");

        let morning = Utc.with_ymd_and_hms(2026, 12, 25, 0, 30, 0).unwrap();
        assert_eq!(entry_timestamp(&morning), "12/25/2026 12:30:00 AM");
    }
}
