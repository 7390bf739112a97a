//! Status command - the dashboard: today's entry, recent moods, averages

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::{get_context, get_logger, guard_redirects, log_event};
use crate::output;
use moodline_core::domain::mood::{classify_mood, classify_sleep, MoodSummary, SleepSummary};
use moodline_core::domain::route;
use moodline_core::{LogEvent, MoodEntry, SessionSnapshot};

/// JSON output structure for the dashboard
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusOutput {
    user: SessionSnapshot,
    has_logged_today: bool,
    today_entry: Option<MoodEntry>,
    recent_entries: Vec<MoodEntry>,
    average_mood: Option<MoodSummary>,
    average_sleep: Option<SleepSummary>,
    quote: Option<String>,
    demo_mode: bool,
}

pub fn run(json: bool) -> Result<()> {
    let logger = get_logger();
    log_event(
        &logger,
        LogEvent::new("screen_opened")
            .with_screen(route::HOME)
            .with_command("status"),
    );

    let ctx = get_context()?;
    if guard_redirects(&ctx, route::HOME, json)? {
        return Ok(());
    }

    if json {
        let output = StatusOutput {
            user: ctx.session.snapshot(),
            has_logged_today: ctx.ledger.has_logged_today(),
            today_entry: ctx.ledger.today_entry(),
            recent_entries: ctx.ledger.last_5_entries(),
            average_mood: ctx.ledger.average_mood(),
            average_sleep: ctx.ledger.average_sleep(),
            quote: ctx.ledger.current_mood_quote(),
            demo_mode: ctx.config.demo_mode,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if ctx.config.demo_mode {
        output::warning("Demo mode is on. Run 'ml demo off' to return to your journal.");
        println!();
    }

    let name = ctx.session.user_name();
    let avatar = ctx.session.user_avatar();
    if avatar.is_empty() {
        println!("{}", format!("Hello, {}!", name).bold());
    } else {
        println!("{} {}", avatar, format!("Hello, {}!", name).bold());
    }
    println!();

    match ctx.ledger.today_entry() {
        Some(entry) => {
            let summary = classify_mood(entry.mood as f64);
            println!("Today: {}", output::paint_hex(summary.label, summary.color));
            if let Some(quote) = ctx.ledger.current_mood_quote() {
                println!("\"{}\"", quote);
            }
        }
        None => {
            println!("You haven't logged your mood today. Run 'ml log'.");
        }
    }
    println!();

    let recent = ctx.ledger.last_5_entries();
    if !recent.is_empty() {
        println!("{}", "Recent days".bold());
        let mut table = output::create_table();
        table.set_header(vec!["Date", "Mood", "Sleep", "Feelings"]);
        for entry in &recent {
            let summary = classify_mood(entry.mood as f64);
            table.add_row(vec![
                entry.local_date().to_string(),
                output::paint_hex(summary.label, summary.color).to_string(),
                classify_sleep(entry.sleep_hours).label.to_string(),
                entry.feelings.join(", "),
            ]);
        }
        println!("{}", table);
        println!();
    }

    if ctx.ledger.has_enough_data_for_averages() {
        if let (Some(mood_avg), Some(sleep_avg)) =
            (ctx.ledger.average_mood(), ctx.ledger.average_sleep())
        {
            println!(
                "Average mood:  {}",
                output::paint_hex(mood_avg.label, mood_avg.color)
            );
            println!(
                "Average sleep: {}",
                output::paint_hex(sleep_avg.label, sleep_avg.color)
            );
        }
    } else {
        let missing = 5usize.saturating_sub(ctx.ledger.entries().len());
        println!("Log {} more days to unlock your averages.", missing);
    }

    Ok(())
}
