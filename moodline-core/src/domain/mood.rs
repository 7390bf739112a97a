//! Mood entry domain model and normalization tables

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One daily mood record
///
/// Persisted inside the `"moodData"` blob (camelCase). Timestamps are UTC
/// instants; day comparisons use the device-local calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub created_at: DateTime<Utc>,
    /// Normalized mood level, one of -2, -1, 0, 1, 2
    pub mood: i32,
    pub feelings: Vec<String>,
    pub journal_entry: String,
    /// Normalized sleep duration in hours
    pub sleep_hours: f64,
}

impl MoodEntry {
    /// The device-local calendar day this entry belongs to
    pub fn local_date(&self) -> NaiveDate {
        self.created_at.with_timezone(&Local).date_naive()
    }
}

/// Raw ledger submission before normalization
///
/// Mood and sleep arrive as categorical labels; unrecognized labels degrade
/// to the neutral/zero default instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodForm {
    pub mood: String,
    #[serde(default)]
    pub feelings: Vec<String>,
    #[serde(default)]
    pub day_description: String,
    pub sleep_hours: String,
}

/// Convert a mood label to its numeric level, defaulting to 0
pub fn normalize_mood(label: &str) -> i32 {
    match label {
        "very-sad" => -2,
        "sad" => -1,
        "neutral" => 0,
        "happy" => 1,
        "very-happy" => 2,
        _ => 0,
    }
}

/// Convert a sleep-range label to hours, defaulting to 0
pub fn normalize_sleep(label: &str) -> f64 {
    match label {
        "0-2" => 1.0,
        "3-4" => 3.5,
        "5-6" => 5.5,
        "7-8" => 7.5,
        "9-plus" => 9.0,
        _ => 0.0,
    }
}

/// Display name for a mood level
pub fn mood_label(value: i32) -> &'static str {
    match value {
        -2 => "Very Sad",
        -1 => "Sad",
        1 => "Happy",
        2 => "Very Happy",
        _ => "Neutral",
    }
}

/// A classified mood average: level, display label, and UI color
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodSummary {
    pub value: i32,
    pub label: &'static str,
    pub color: &'static str,
}

/// A classified sleep average: display label and UI color
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepSummary {
    pub label: &'static str,
    pub color: &'static str,
}

/// Classify a mean mood value by descending thresholds
pub fn classify_mood(avg: f64) -> MoodSummary {
    if avg >= 1.5 {
        MoodSummary { value: 2, label: "Very Happy", color: "#FFC97C" }
    } else if avg >= 0.5 {
        MoodSummary { value: 1, label: "Happy", color: "#89E780" }
    } else if avg >= -0.5 {
        MoodSummary { value: 0, label: "Neutral", color: "#89CAFF" }
    } else if avg >= -1.5 {
        MoodSummary { value: -1, label: "Sad", color: "#B8B1FF" }
    } else {
        MoodSummary { value: -2, label: "Very Sad", color: "#FF9B99" }
    }
}

/// Classify a mean sleep duration by descending thresholds
pub fn classify_sleep(avg: f64) -> SleepSummary {
    if avg >= 8.5 {
        SleepSummary { label: "9+ hours", color: "#FFC97C" }
    } else if avg >= 6.5 {
        SleepSummary { label: "7-8 hours", color: "#89E780" }
    } else if avg >= 4.5 {
        SleepSummary { label: "5-6 hours", color: "#89CAFF" }
    } else if avg >= 2.5 {
        SleepSummary { label: "3-4 hours", color: "#B8B1FF" }
    } else {
        SleepSummary { label: "0-2 hours", color: "#FF9B99" }
    }
}
