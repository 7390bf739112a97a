//! CLI command implementations

pub mod auth;
pub mod demo;
pub mod log;
pub mod logs;
pub mod profile;
pub mod quote;
pub mod route;
pub mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};
use moodline_core::domain::route::{ONBOARDING, SIGN_IN};
use moodline_core::services::decide_path;
use moodline_core::{EntryPoint, EventLog, LogEvent, MoodlineContext, Verdict};

/// Get the event log for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<EventLog> {
    let moodline_dir = get_moodline_dir();
    // Ensure directory exists
    std::fs::create_dir_all(&moodline_dir).ok()?;
    EventLog::new(&moodline_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<EventLog>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the moodline directory from environment or default
pub fn get_moodline_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MOODLINE_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".moodline")
    }
}

/// Get or create moodline context
pub fn get_context() -> Result<MoodlineContext> {
    let moodline_dir = get_moodline_dir();

    // Create directory if it doesn't exist
    std::fs::create_dir_all(&moodline_dir)
        .with_context(|| format!("Failed to create moodline directory: {:?}", moodline_dir))?;

    MoodlineContext::new(&moodline_dir).context("Failed to open moodline store")
}

/// Single-threaded runtime for driving the async auth operations
pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start async runtime")
}

/// Run the navigation guard before a screen-like command
///
/// On redirect, print where the guard sends the user instead of running the
/// screen, and return true so the caller stops.
pub fn guard_redirects(ctx: &MoodlineContext, path: &str, json: bool) -> Result<bool> {
    let verdict = decide_path(path, &ctx.session.snapshot());
    match verdict {
        Verdict::Allow => Ok(false),
        Verdict::RedirectTo(target) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&verdict)?);
            } else {
                crate::output::info(redirect_hint(target));
            }
            Ok(true)
        }
    }
}

/// The hint shown when the guard redirects a screen command
fn redirect_hint(target: &str) -> &'static str {
    match target {
        SIGN_IN => "Not signed in. Run 'ml login' or 'ml signup' first.",
        ONBOARDING => "Onboarding is not finished. Run 'ml onboard' first.",
        _ => "Already signed in. Run 'ml logout' to switch accounts.",
    }
}
