//! Mood ledger service - one entry per day, rolling analytics, and quotes

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Local, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::domain::mood::{self, MoodSummary, SleepSummary};
use crate::domain::quotes::{self, MoodQuoteTable};
use crate::domain::result::Result;
use crate::domain::{MoodEntry, MoodForm};
use crate::ports::store::{self, MOOD_DATA_KEY};
use crate::ports::KvStore;

/// Persisted shape of the `moodData` key. The quote table is written for
/// resilience but never read back; entries are the only state restored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoodData {
    mood_entries: Vec<MoodEntry>,
    #[serde(default)]
    mood_quotes: MoodQuoteTable,
}

struct LedgerState {
    entries: Vec<MoodEntry>,
    rng: StdRng,
}

/// Keeps the daily mood entries and derives the analytics the dashboard
/// shows: rolling five-entry averages, today's quote, today's label.
pub struct MoodLedger {
    store: Arc<dyn KvStore>,
    quotes: MoodQuoteTable,
    state: Mutex<LedgerState>,
}

impl MoodLedger {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    /// Like `new` but with a caller-supplied RNG, making quote selection
    /// deterministic in tests.
    pub fn with_rng(store: Arc<dyn KvStore>, rng: StdRng) -> Self {
        Self {
            store,
            quotes: quotes::seed_quote_table(),
            state: Mutex::new(LedgerState {
                entries: Vec::new(),
                rng,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn persist(&self, entries: &[MoodEntry]) -> Result<()> {
        let data = MoodData {
            mood_entries: entries.to_vec(),
            mood_quotes: self.quotes.clone(),
        };
        store::write_json(self.store.as_ref(), MOOD_DATA_KEY, &data)
    }

    /// Restores entries from the persisted blob when present and parsable.
    /// Quotes always come from the built-in table. Called once when the
    /// context is built.
    pub fn load_mood_data(&self) {
        if let Some(data) = store::read_json::<MoodData>(self.store.as_ref(), MOOD_DATA_KEY) {
            self.state().entries = data.mood_entries;
        }
    }

    /// Records today's mood. Categorical labels are normalized (unknown
    /// labels default to neutral mood and zero sleep), and any earlier entry
    /// from the same local calendar day is replaced.
    pub fn add_entry(&self, form: &MoodForm) -> Result<()> {
        let entry = MoodEntry {
            created_at: Utc::now(),
            mood: mood::normalize_mood(&form.mood),
            feelings: form.feelings.clone(),
            journal_entry: form.day_description.clone(),
            sleep_hours: mood::normalize_sleep(&form.sleep_hours),
        };

        let today = Local::now().date_naive();
        let snapshot = {
            let mut state = self.state();
            state.entries.retain(|e| e.local_date() != today);
            state.entries.push(entry);
            state.entries.clone()
        };
        self.persist(&snapshot)
    }

    pub fn entries(&self) -> Vec<MoodEntry> {
        self.state().entries.clone()
    }

    pub fn today_entry(&self) -> Option<MoodEntry> {
        let today = Local::now().date_naive();
        self.state()
            .entries
            .iter()
            .find(|e| e.local_date() == today)
            .cloned()
    }

    pub fn has_logged_today(&self) -> bool {
        self.today_entry().is_some()
    }

    /// The five most recent entries, newest first. A count window: gaps in
    /// the calendar do not shrink it.
    pub fn last_5_entries(&self) -> Vec<MoodEntry> {
        let mut entries = self.state().entries.clone();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries.truncate(5);
        entries
    }

    pub fn has_enough_data_for_averages(&self) -> bool {
        self.last_5_entries().len() >= 5
    }

    /// Mean mood over the last five entries, banded into a label and color.
    /// Absent until five entries exist.
    pub fn average_mood(&self) -> Option<MoodSummary> {
        let window = self.last_5_entries();
        if window.len() < 5 {
            return None;
        }
        let mean = window.iter().map(|e| e.mood as f64).sum::<f64>() / window.len() as f64;
        Some(mood::classify_mood(mean))
    }

    /// Mean sleep over the last five entries, banded into a label and color.
    /// Absent until five entries exist.
    pub fn average_sleep(&self) -> Option<SleepSummary> {
        let window = self.last_5_entries();
        if window.len() < 5 {
            return None;
        }
        let mean = window.iter().map(|e| e.sleep_hours).sum::<f64>() / window.len() as f64;
        Some(mood::classify_sleep(mean))
    }

    /// An affirmation matching today's mood, re-rolled on every read.
    /// Absent until today's entry is logged.
    pub fn current_mood_quote(&self) -> Option<String> {
        let entry = self.today_entry()?;
        let row = self.quotes.get(&entry.mood)?;
        if row.is_empty() {
            return None;
        }
        let mut state = self.state();
        let pick = state.rng.gen_range(0..row.len());
        Some(row[pick].clone())
    }

    /// Display name for today's mood level. Absent until today's entry is
    /// logged.
    pub fn current_mood_label(&self) -> Option<&'static str> {
        self.today_entry().map(|e| mood::mood_label(e.mood))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use chrono::Duration;

    fn ledger() -> (Arc<MemoryStore>, MoodLedger) {
        let store = Arc::new(MemoryStore::new());
        let ledger = MoodLedger::with_rng(store.clone(), StdRng::seed_from_u64(7));
        (store, ledger)
    }

    fn form(mood: &str, sleep: &str) -> MoodForm {
        MoodForm {
            mood: mood.to_string(),
            feelings: vec!["calm".to_string()],
            day_description: "fine".to_string(),
            sleep_hours: sleep.to_string(),
        }
    }

    fn entry_days_ago(days: i64, mood: i32, sleep_hours: f64) -> MoodEntry {
        MoodEntry {
            created_at: Utc::now() - Duration::days(days),
            mood,
            feelings: Vec::new(),
            journal_entry: String::new(),
            sleep_hours,
        }
    }

    fn seed(store: &MemoryStore, entries: Vec<MoodEntry>) {
        let data = MoodData {
            mood_entries: entries,
            mood_quotes: MoodQuoteTable::new(),
        };
        store
            .write(MOOD_DATA_KEY, serde_json::to_value(&data).unwrap())
            .unwrap();
    }

    // ============================================================
    // Entries
    // ============================================================

    #[test]
    fn test_add_entry_normalizes_labels() {
        let (_, ledger) = ledger();
        ledger.add_entry(&form("very-happy", "7-8")).unwrap();

        let today = ledger.today_entry().unwrap();
        assert_eq!(today.mood, 2);
        assert_eq!(today.sleep_hours, 7.5);
        assert_eq!(today.feelings, vec!["calm".to_string()]);
        assert_eq!(today.journal_entry, "fine");
    }

    #[test]
    fn test_unknown_labels_default_to_neutral() {
        let (_, ledger) = ledger();
        ledger.add_entry(&form("ecstatic", "lots")).unwrap();

        let today = ledger.today_entry().unwrap();
        assert_eq!(today.mood, 0);
        assert_eq!(today.sleep_hours, 0.0);
    }

    #[test]
    fn test_same_day_entry_is_replaced() {
        let (store, ledger) = ledger();
        ledger.add_entry(&form("sad", "0-2")).unwrap();
        ledger.add_entry(&form("happy", "9-plus")).unwrap();

        assert_eq!(ledger.entries().len(), 1);
        assert_eq!(ledger.today_entry().unwrap().mood, 1);

        // The replacement is durably visible to a fresh ledger.
        let reloaded = MoodLedger::new(store);
        reloaded.load_mood_data();
        assert_eq!(reloaded.entries().len(), 1);
        assert_eq!(reloaded.today_entry().unwrap().mood, 1);
    }

    #[test]
    fn test_earlier_days_survive_todays_entry() {
        let (store, ledger) = ledger();
        seed(&store, vec![entry_days_ago(1, -1, 5.5)]);
        ledger.load_mood_data();

        ledger.add_entry(&form("happy", "7-8")).unwrap();
        assert_eq!(ledger.entries().len(), 2);
        assert!(ledger.has_logged_today());
    }

    // ============================================================
    // Analytics window
    // ============================================================

    #[test]
    fn test_last_5_is_newest_first_and_capped() {
        let (store, ledger) = ledger();
        let entries = (0..7).map(|d| entry_days_ago(d, 0, 5.5)).collect();
        seed(&store, entries);
        ledger.load_mood_data();

        let window = ledger.last_5_entries();
        assert_eq!(window.len(), 5);
        for pair in window.windows(2) {
            assert!(pair[0].created_at > pair[1].created_at);
        }
    }

    #[test]
    fn test_averages_need_a_full_window() {
        let (store, ledger) = ledger();
        seed(&store, (1..=4).map(|d| entry_days_ago(d, 2, 9.0)).collect());
        ledger.load_mood_data();

        assert!(!ledger.has_enough_data_for_averages());
        assert!(ledger.average_mood().is_none());
        assert!(ledger.average_sleep().is_none());

        ledger.add_entry(&form("very-happy", "9-plus")).unwrap();
        assert!(ledger.has_enough_data_for_averages());
        assert!(ledger.average_mood().is_some());
    }

    #[test]
    fn test_average_mood_banding() {
        let (store, ledger) = ledger();
        let moods = [2, 2, 1, 1, 2];
        let entries = moods
            .iter()
            .enumerate()
            .map(|(d, &m)| entry_days_ago(d as i64, m, 7.5))
            .collect();
        seed(&store, entries);
        ledger.load_mood_data();

        // Mean 1.6 lands in the top band
        let summary = ledger.average_mood().unwrap();
        assert_eq!(summary.label, "Very Happy");
        assert_eq!(summary.color, "#FFC97C");
        assert_eq!(summary.value, 2);
    }

    #[test]
    fn test_average_sleep_banding() {
        let (store, ledger) = ledger();
        let hours = [7.5, 7.5, 7.5, 5.5, 9.0];
        let entries = hours
            .iter()
            .enumerate()
            .map(|(d, &h)| entry_days_ago(d as i64, 0, h))
            .collect();
        seed(&store, entries);
        ledger.load_mood_data();

        let summary = ledger.average_sleep().unwrap();
        assert_eq!(summary.label, "7-8 hours");
        assert_eq!(summary.color, "#89E780");
    }

    // ============================================================
    // Quotes
    // ============================================================

    #[test]
    fn test_quote_absent_without_todays_entry() {
        let (store, ledger) = ledger();
        seed(&store, vec![entry_days_ago(1, 2, 9.0)]);
        ledger.load_mood_data();

        assert!(ledger.current_mood_quote().is_none());
        assert!(ledger.current_mood_label().is_none());
    }

    #[test]
    fn test_quote_matches_todays_mood_level() {
        let (_, ledger) = ledger();
        ledger.add_entry(&form("very-happy", "7-8")).unwrap();

        let table = quotes::seed_quote_table();
        let row = table.get(&2).unwrap();
        for _ in 0..20 {
            let quote = ledger.current_mood_quote().unwrap();
            assert!(row.contains(&quote));
        }
        assert_eq!(ledger.current_mood_label(), Some("Very Happy"));
    }

    #[test]
    fn test_seeded_rng_makes_quotes_deterministic() {
        let picks: Vec<Vec<String>> = (0..2)
            .map(|_| {
                let store = Arc::new(MemoryStore::new());
                let ledger = MoodLedger::with_rng(store, StdRng::seed_from_u64(42));
                ledger.add_entry(&form("neutral", "5-6")).unwrap();
                (0..5).filter_map(|_| ledger.current_mood_quote()).collect()
            })
            .collect();
        assert_eq!(picks[0], picks[1]);
        assert_eq!(picks[0].len(), 5);
    }

    #[test]
    fn test_persisted_quotes_are_ignored_on_load() {
        let (store, ledger) = ledger();
        let mut bogus = MoodQuoteTable::new();
        bogus.insert(0, vec!["stale persisted quote".to_string()]);
        let data = MoodData {
            mood_entries: vec![entry_days_ago(0, 0, 5.5)],
            mood_quotes: bogus,
        };
        store
            .write(MOOD_DATA_KEY, serde_json::to_value(&data).unwrap())
            .unwrap();
        ledger.load_mood_data();

        let quote = ledger.current_mood_quote().unwrap();
        assert_ne!(quote, "stale persisted quote");
        assert!(quotes::seed_quote_table().get(&0).unwrap().contains(&quote));
    }
}
