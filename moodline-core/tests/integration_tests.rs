//! Integration tests for moodline-core services
//!
//! These tests drive whole sign-up/onboarding/journaling flows through a
//! real context. The simulated auth latency runs under tokio's paused
//! clock, so nothing here actually waits.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use std::sync::Arc;

use chrono::{Duration, Utc};
use tempfile::TempDir;

use moodline_core::adapters::MemoryStore;
use moodline_core::config::Config;
use moodline_core::ports::store::AUTH_STATE_KEY;
use moodline_core::ports::KvStore;
use moodline_core::services::{decide_path, DemoService, Verdict};
use moodline_core::{MoodEntry, MoodForm, MoodlineContext, OperationResult};

// ============================================================================
// Test Helpers
// ============================================================================

/// Context over a fresh in-memory store; also returns the store so tests
/// can inspect or pre-seed raw keys.
fn memory_context() -> (Arc<MemoryStore>, MoodlineContext) {
    let store = Arc::new(MemoryStore::new());
    let ctx = MoodlineContext::with_store(Config::default(), store.clone()).unwrap();
    (store, ctx)
}

fn mood_form(mood: &str, sleep: &str, description: &str) -> MoodForm {
    MoodForm {
        mood: mood.to_string(),
        feelings: vec!["calm".to_string()],
        day_description: description.to_string(),
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

/// Pre-seed the persisted mood blob before a context is built over the store.
fn seed_mood_data(store: &MemoryStore, entries: &[MoodEntry]) {
    store
        .write("moodData", serde_json::json!({ "moodEntries": entries }))
        .unwrap();
}

// ============================================================================
// Sign-up and Login Flows
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_sign_up_creates_account_and_session() {
    let (store, ctx) = memory_context();

    ctx.session.sign_up("mira@example.com", "secret").await.unwrap();

    let account = ctx.registry.find_by_email("mira@example.com").unwrap();
    assert_eq!(account.email, "mira@example.com");
    assert!(!account.has_profile());

    let snapshot = ctx.session.snapshot();
    assert!(snapshot.is_authenticated);
    assert!(!snapshot.has_completed_onboarding);
    assert_eq!(ctx.session.user_email(), "mira@example.com");

    // The session is persisted immediately
    let persisted = store.read(AUTH_STATE_KEY).unwrap().unwrap();
    assert_eq!(persisted["user"]["email"], "mira@example.com");
    assert_eq!(persisted["isAuthenticated"], true);
}

#[tokio::test(start_paused = true)]
async fn test_duplicate_sign_up_is_rejected() {
    let (_, ctx) = memory_context();

    ctx.session.sign_up("mira@example.com", "secret").await.unwrap();
    let err = ctx
        .session
        .sign_up("mira@example.com", "other")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "User already exists");
    assert_eq!(ctx.registry.accounts().len(), 1);

    // The first session survives the failed attempt
    assert!(ctx.session.is_authenticated());
    assert_eq!(ctx.session.user_email(), "mira@example.com");
}

#[tokio::test(start_paused = true)]
async fn test_failed_sign_up_reports_through_envelope() {
    let (_, ctx) = memory_context();
    ctx.session.sign_up("mira@example.com", "secret").await.unwrap();

    let result = ctx.session.sign_up("mira@example.com", "secret").await;
    let envelope = OperationResult::from(result);
    assert!(!envelope.success);
    assert_eq!(envelope.error.as_deref(), Some("User already exists"));
}

#[tokio::test(start_paused = true)]
async fn test_wrong_password_leaves_session_untouched() {
    let (_, ctx) = memory_context();

    ctx.session.sign_up("mira@example.com", "secret").await.unwrap();
    ctx.session.logout().unwrap();

    let err = ctx
        .session
        .login("mira@example.com", "wrong")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid email or password");

    let snapshot = ctx.session.snapshot();
    assert!(!snapshot.is_authenticated);
    assert!(snapshot.current_user.is_none());

    // Unknown emails fail with the same message
    let err = ctx.session.login("nobody@example.com", "secret").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid email or password");
}

#[tokio::test(start_paused = true)]
async fn test_login_derives_onboarding_from_profile() {
    let (_, ctx) = memory_context();

    ctx.session.sign_up("mira@example.com", "secret").await.unwrap();

    // Before onboarding, a fresh login is still unonboarded
    ctx.session.logout().unwrap();
    ctx.session.login("mira@example.com", "secret").await.unwrap();
    assert!(!ctx.session.has_completed_onboarding());

    ctx.session
        .complete_onboarding("Mira", Some("🌻".to_string()))
        .unwrap();
    ctx.session.logout().unwrap();
    ctx.session.login("mira@example.com", "secret").await.unwrap();

    assert!(ctx.session.has_completed_onboarding());
    assert_eq!(ctx.session.user_name(), "Mira");
    assert_eq!(ctx.session.user_avatar(), "🌻");
}

// ============================================================================
// Onboarding and Profile Updates
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_onboarding_is_a_noop_when_signed_out() {
    let (_, ctx) = memory_context();

    ctx.session.complete_onboarding("Ghost", None).unwrap();
    ctx.session.update_profile("Ghost", None).unwrap();

    assert!(!ctx.session.is_authenticated());
    assert!(ctx.registry.accounts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_onboarding_overwrites_avatar_but_profile_update_keeps_it() {
    let (_, ctx) = memory_context();
    ctx.session.sign_up("mira@example.com", "secret").await.unwrap();

    ctx.session
        .complete_onboarding("Mira", Some("🌻".to_string()))
        .unwrap();
    assert_eq!(ctx.session.user_avatar(), "🌻");

    // Profile updates without a new picture keep the old one
    ctx.session.update_profile("Mira Q", None).unwrap();
    assert_eq!(ctx.session.user_name(), "Mira Q");
    assert_eq!(ctx.session.user_avatar(), "🌻");

    ctx.session
        .update_profile("Mira Q", Some("🌙".to_string()))
        .unwrap();
    assert_eq!(ctx.session.user_avatar(), "🌙");

    // Re-running onboarding replaces the avatar even with none given
    ctx.session.complete_onboarding("Mira", None).unwrap();
    assert_eq!(ctx.session.user_avatar(), "");

    // The registry record tracked every change
    let account = ctx.registry.find_by_email("mira@example.com").unwrap();
    assert_eq!(account.name.as_deref(), Some("Mira"));
    assert!(account.avatar.is_none());
}

// ============================================================================
// Persistence Across Restarts
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_session_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let ctx = MoodlineContext::new(dir.path()).unwrap();
        ctx.session.sign_up("mira@example.com", "secret").await.unwrap();
        ctx.session
            .complete_onboarding("Mira", Some("🌻".to_string()))
            .unwrap();
    }

    let ctx = MoodlineContext::new(dir.path()).unwrap();
    assert!(ctx.session.is_authenticated());
    assert!(ctx.session.has_completed_onboarding());
    assert_eq!(ctx.session.user_email(), "mira@example.com");
}

#[tokio::test(start_paused = true)]
async fn test_logout_then_restart_is_signed_out() {
    let dir = TempDir::new().unwrap();

    {
        let ctx = MoodlineContext::new(dir.path()).unwrap();
        ctx.session.sign_up("mira@example.com", "secret").await.unwrap();
        ctx.session.logout().unwrap();

        // Logout removes the key rather than writing a signed-out record
        assert!(ctx.store.read(AUTH_STATE_KEY).unwrap().is_none());
    }

    let ctx = MoodlineContext::new(dir.path()).unwrap();
    let snapshot = ctx.session.snapshot();
    assert!(!snapshot.is_authenticated);
    assert!(!snapshot.has_completed_onboarding);
    assert!(snapshot.current_user.is_none());

    // The account itself is still registered
    assert!(ctx.registry.find_by_email("mira@example.com").is_some());
}

#[test]
fn test_mood_entries_survive_restart_with_one_per_day() {
    let dir = TempDir::new().unwrap();

    {
        let ctx = MoodlineContext::new(dir.path()).unwrap();
        ctx.ledger
            .add_entry(&mood_form("sad", "0-2", "first try"))
            .unwrap();
        ctx.ledger
            .add_entry(&mood_form("happy", "7-8", "second thoughts"))
            .unwrap();
    }

    let ctx = MoodlineContext::new(dir.path()).unwrap();
    let entries = ctx.ledger.entries();
    assert_eq!(entries.len(), 1, "same-day entry should be replaced");
    assert_eq!(entries[0].mood, 1);
    assert_eq!(entries[0].sleep_hours, 7.5);
    assert_eq!(entries[0].journal_entry, "second thoughts");
    assert!(ctx.ledger.has_logged_today());
}

// ============================================================================
// Dashboard Derivations
// ============================================================================

#[test]
fn test_averages_unlock_at_five_entries() {
    let store = Arc::new(MemoryStore::new());
    seed_mood_data(
        &store,
        &[
            entry_days_ago(4, 2, 9.0),
            entry_days_ago(3, 2, 7.5),
            entry_days_ago(2, 1, 7.5),
            entry_days_ago(1, 1, 7.5),
        ],
    );
    let ctx = MoodlineContext::with_store(Config::default(), store).unwrap();

    assert!(!ctx.ledger.has_enough_data_for_averages());
    assert!(ctx.ledger.average_mood().is_none());
    assert!(ctx.ledger.average_sleep().is_none());

    ctx.ledger
        .add_entry(&mood_form("very-happy", "5-6", "made it five"))
        .unwrap();

    assert!(ctx.ledger.has_enough_data_for_averages());
    let mood = ctx.ledger.average_mood().unwrap();
    assert_eq!(mood.label, "Very Happy");
    let sleep = ctx.ledger.average_sleep().unwrap();
    assert_eq!(sleep.label, "7-8 hours");
}

#[tokio::test(start_paused = true)]
async fn test_guard_redirects_follow_session_state() {
    let (_, ctx) = memory_context();

    // Signed out: the home screen is off limits
    assert_eq!(
        decide_path("/", &ctx.session.snapshot()),
        Verdict::RedirectTo("/signin")
    );

    // Signed in but not onboarded: home redirects to onboarding
    ctx.session.sign_up("mira@example.com", "secret").await.unwrap();
    assert_eq!(
        decide_path("/", &ctx.session.snapshot()),
        Verdict::RedirectTo("/onboarding")
    );

    // Onboarded: home opens, guest screens bounce back home
    ctx.session.complete_onboarding("Mira", None).unwrap();
    assert_eq!(decide_path("/", &ctx.session.snapshot()), Verdict::Allow);
    assert_eq!(
        decide_path("/signin", &ctx.session.snapshot()),
        Verdict::RedirectTo("/")
    );
}

// ============================================================================
// Demo Mode
// ============================================================================

#[test]
fn test_demo_mode_seeds_a_full_dashboard() {
    let dir = TempDir::new().unwrap();
    let demo = DemoService::new(dir.path());

    assert!(!demo.is_enabled().unwrap());
    demo.enable().unwrap();
    assert!(demo.is_enabled().unwrap());

    {
        let ctx = MoodlineContext::new(dir.path()).unwrap();
        assert!(ctx.config.demo_mode);
        assert!(ctx.session.is_authenticated());
        assert!(ctx.session.has_completed_onboarding());
        assert_eq!(ctx.session.user_email(), "demo@moodline.app");

        assert_eq!(ctx.ledger.entries().len(), 14);
        assert!(ctx.ledger.has_logged_today());
        assert!(ctx.ledger.has_enough_data_for_averages());
        assert!(ctx.ledger.average_mood().is_some());
        assert!(ctx.ledger.average_sleep().is_some());
        assert!(ctx.ledger.current_mood_quote().is_some());
    }

    // Disabling with clean removes the demo journal entirely
    demo.disable(true).unwrap();
    assert!(!demo.is_enabled().unwrap());
    assert!(!dir.path().join("demo.json").exists());

    let ctx = MoodlineContext::new(dir.path()).unwrap();
    assert!(!ctx.config.demo_mode);
    assert!(!ctx.session.is_authenticated());
    assert!(ctx.ledger.entries().is_empty());
}

#[test]
fn test_demo_enable_rebuilds_from_scratch() {
    let dir = TempDir::new().unwrap();
    let demo = DemoService::new(dir.path());

    demo.enable().unwrap();
    {
        let ctx = MoodlineContext::new(dir.path()).unwrap();
        ctx.ledger
            .add_entry(&mood_form("very-sad", "0-2", "scribbled over the demo"))
            .unwrap();
        ctx.session.logout().unwrap();
    }

    demo.enable().unwrap();
    let ctx = MoodlineContext::new(dir.path()).unwrap();
    assert!(ctx.session.is_authenticated(), "reseeded session is signed in");
    assert_eq!(ctx.ledger.entries().len(), 14, "entries are reseeded");
    assert!(
        !ctx.ledger.today_entry().unwrap().journal_entry.contains("scribbled"),
        "the edited entry is gone after reseeding"
    );
}
