//! Log command - record today's mood entry

use std::io::{self, Read};

use anyhow::Result;
use dialoguer::{Input, Select};

use super::{get_context, get_logger, guard_redirects, log_event};
use crate::output;
use moodline_core::domain::mood::{classify_mood, normalize_mood};
use moodline_core::domain::route;
use moodline_core::{LogEvent, MoodForm, OperationResult};

const MOOD_CHOICES: &[(&str, &str)] = &[
    ("very-happy", "Very Happy"),
    ("happy", "Happy"),
    ("neutral", "Neutral"),
    ("sad", "Sad"),
    ("very-sad", "Very Sad"),
];

const SLEEP_CHOICES: &[(&str, &str)] = &[
    ("9-plus", "9+ hours"),
    ("7-8", "7-8 hours"),
    ("5-6", "5-6 hours"),
    ("3-4", "3-4 hours"),
    ("0-2", "0-2 hours"),
];

pub fn run(
    mood: Option<String>,
    sleep: Option<String>,
    feelings: Vec<String>,
    note: Option<String>,
    json: bool,
) -> Result<()> {
    let logger = get_logger();
    log_event(&logger, LogEvent::new("mood_log_started").with_command("log"));

    let ctx = get_context()?;
    if guard_redirects(&ctx, route::HOME, json)? {
        return Ok(());
    }

    if ctx.ledger.has_logged_today() && !json {
        output::warning("You already logged today. This replaces the earlier entry.");
    }

    let mood = resolve_choice(mood, MOOD_CHOICES, "How are you feeling today?")?;
    let sleep = resolve_choice(sleep, SLEEP_CHOICES, "How much sleep did you get?")?;

    // Note from flag, piped stdin, or prompt
    let note = match note {
        Some(n) => n,
        None if atty::isnt(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer.trim().to_string()
        }
        None => Input::new()
            .with_prompt("Journal note")
            .allow_empty(true)
            .interact_text()?,
    };

    let form = MoodForm {
        mood: mood.to_string(),
        feelings,
        day_description: note,
        sleep_hours: sleep.to_string(),
    };

    ctx.ledger.add_entry(&form)?;
    log_event(&logger, LogEvent::new("mood_log_completed").with_command("log"));

    if json {
        if let Some(entry) = ctx.ledger.today_entry() {
            println!("{}", serde_json::to_string_pretty(&OperationResult::ok(entry))?);
        }
        return Ok(());
    }

    let summary = classify_mood(normalize_mood(mood) as f64);
    println!(
        "Logged today's mood: {}",
        output::paint_hex(summary.label, summary.color)
    );
    if let Some(quote) = ctx.ledger.current_mood_quote() {
        println!("\"{}\"", quote);
    }

    Ok(())
}

/// Take a categorical value from a flag or an interactive pick list
fn resolve_choice(
    value: Option<String>,
    choices: &[(&'static str, &'static str)],
    prompt: &str,
) -> Result<&'static str> {
    match value {
        Some(v) => choices
            .iter()
            .find(|(key, _)| *key == v)
            .map(|(key, _)| *key)
            .ok_or_else(|| {
                let keys: Vec<&str> = choices.iter().map(|(key, _)| *key).collect();
                anyhow::anyhow!("Unknown value '{}'. Expected one of: {}", v, keys.join(", "))
            }),
        None => {
            let labels: Vec<&str> = choices.iter().map(|(_, label)| *label).collect();
            let picked = Select::new()
                .with_prompt(prompt)
                .items(&labels)
                .default(0)
                .interact()?;
            Ok(choices[picked].0)
        }
    }
}
