//! Quote command - show the quote for today's mood

use anyhow::Result;

use super::{get_context, get_logger, guard_redirects, log_event};
use crate::output;
use moodline_core::domain::mood::classify_mood;
use moodline_core::domain::route;
use moodline_core::LogEvent;

pub fn run(json: bool) -> Result<()> {
    let logger = get_logger();
    log_event(&logger, LogEvent::new("quote_viewed").with_command("quote"));

    let ctx = get_context()?;
    if guard_redirects(&ctx, route::HOME, json)? {
        return Ok(());
    }

    if json {
        let payload = serde_json::json!({
            "mood": ctx.ledger.current_mood_label(),
            "quote": ctx.ledger.current_mood_quote(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    match ctx.ledger.today_entry() {
        Some(entry) => {
            let summary = classify_mood(entry.mood as f64);
            if let Some(quote) = ctx.ledger.current_mood_quote() {
                println!("\"{}\"", quote);
            }
            println!(
                "Today's mood: {}",
                output::paint_hex(summary.label, summary.color)
            );
        }
        None => {
            println!("No mood logged today. Run 'ml log' to get your quote.");
        }
    }

    Ok(())
}
