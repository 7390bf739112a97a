//! Demo service - manage demo mode
//!
//! Demo mode provides sample data for trying the app without touching the
//! real journal. It lives in its own store file, so switching back loses
//! nothing.

use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};

use crate::adapters::JsonFileStore;
use crate::config::Config;
use crate::domain::quotes;
use crate::domain::result::Result;
use crate::domain::{Account, MoodEntry, SessionSnapshot};
use crate::ports::store::{self, AUTH_STATE_KEY, MOOD_DATA_KEY, USERS_KEY};
use crate::ports::KvStore;

/// Sample account the demo journal is signed in as.
fn generate_demo_account() -> Account {
    let mut account = Account::new("demo@moodline.app".to_string(), "demo".to_string());
    account.name = Some("Demo".to_string());
    account.avatar = Some("🌙".to_string());
    account
}

/// Two weeks of sample entries ending today. Mood follows a smooth weekly
/// wave and sleep tracks the mood, so every dashboard derivation has data
/// to show.
fn generate_demo_entries() -> Vec<MoodEntry> {
    let sleep_for_mood = [1.0, 3.5, 5.5, 7.5, 9.0];
    let feelings_for_mood: [&[&str]; 5] = [
        &["drained", "overwhelmed"],
        &["tired", "worried"],
        &["calm"],
        &["content", "hopeful"],
        &["grateful", "energized"],
    ];
    let note_for_mood = [
        "Rough day, hard to get going.",
        "A bit low today.",
        "An ordinary day, nothing special.",
        "A good steady day.",
        "Felt great today, everything clicked.",
    ];

    (0..14)
        .map(|day| {
            let days_ago = 13 - day;
            let wave = (day as f64 * std::f64::consts::TAU / 7.0).sin();
            let mood = (wave * 2.0).round() as i32;
            let level = (mood + 2) as usize;

            MoodEntry {
                created_at: Utc::now() - Duration::days(days_ago),
                mood,
                feelings: feelings_for_mood[level].iter().map(|f| f.to_string()).collect(),
                journal_entry: note_for_mood[level].to_string(),
                sleep_hours: sleep_for_mood[level],
            }
        })
        .collect()
}

/// Demo service for managing demo mode
pub struct DemoService {
    moodline_dir: PathBuf,
}

impl DemoService {
    pub fn new(moodline_dir: &Path) -> Self {
        Self {
            moodline_dir: moodline_dir.to_path_buf(),
        }
    }

    /// Check if demo mode is currently enabled
    pub fn is_enabled(&self) -> Result<bool> {
        let config = Config::load(&self.moodline_dir)?;
        Ok(config.demo_mode)
    }

    /// Enable demo mode
    ///
    /// This will:
    /// 1. Delete any existing demo journal (fresh start)
    /// 2. Enable demo mode in config
    /// 3. Create the demo journal with sample data
    pub fn enable(&self) -> Result<()> {
        // Delete the existing demo journal and its sidecars for a fresh start
        for name in ["demo.json", "demo.json.lock", "demo.json.corrupt"] {
            let path = self.moodline_dir.join(name);
            if path.exists() {
                std::fs::remove_file(&path)?;
            }
        }

        // Enable demo mode in config
        let mut config = Config::load(&self.moodline_dir).unwrap_or_default();
        config.enable_demo_mode();
        config.save(&self.moodline_dir)?;

        // Create the demo journal and populate it with sample data
        let journal = JsonFileStore::open(&self.moodline_dir.join("demo.json"))?;

        let account = generate_demo_account();
        store::write_json(&journal, USERS_KEY, &vec![account.clone()])?;

        let session = SessionSnapshot::authenticated(account, true);
        store::write_json(&journal, AUTH_STATE_KEY, &session)?;

        let data = serde_json::json!({
            "moodEntries": generate_demo_entries(),
            "moodQuotes": quotes::seed_quote_table(),
        });
        journal.write(MOOD_DATA_KEY, data)?;

        Ok(())
    }

    /// Disable demo mode
    ///
    /// This will:
    /// 1. Disable demo mode in config
    /// 2. Optionally delete the demo journal (if clean = true)
    pub fn disable(&self, clean: bool) -> Result<()> {
        // Disable demo mode in config
        let mut config = Config::load(&self.moodline_dir).unwrap_or_default();
        config.disable_demo_mode();
        config.save(&self.moodline_dir)?;

        // Optionally clean up the demo journal
        if clean {
            for name in ["demo.json", "demo.json.lock", "demo.json.corrupt"] {
                let path = self.moodline_dir.join(name);
                if path.exists() {
                    std::fs::remove_file(&path)?;
                }
            }
        }

        Ok(())
    }
}
