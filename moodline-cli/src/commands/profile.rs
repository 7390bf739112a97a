//! Profile commands - onboarding and profile updates

use anyhow::Result;
use colored::Colorize;
use dialoguer::Input;

use super::{get_context, get_logger, guard_redirects, log_event};
use crate::output;
use moodline_core::domain::route;
use moodline_core::{LogEvent, OperationResult};

pub fn run_onboard(name: Option<String>, avatar: Option<String>, json: bool) -> Result<()> {
    let logger = get_logger();
    log_event(&logger, LogEvent::new("onboarding_started").with_command("onboard"));

    let ctx = get_context()?;
    if guard_redirects(&ctx, route::ONBOARDING, json)? {
        return Ok(());
    }

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Your name").interact_text()?,
    };

    ctx.session.complete_onboarding(&name, avatar)?;
    log_event(&logger, LogEvent::new("onboarding_completed").with_command("onboard"));

    if json {
        let envelope = OperationResult::ok(ctx.session.snapshot());
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    output::success(&format!("Welcome, {}", name));
    println!("Run 'ml log' to record your first mood.");
    Ok(())
}

pub fn run_update(name: Option<String>, avatar: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    if guard_redirects(&ctx, route::HOME, json)? {
        return Ok(());
    }

    // No changes requested, show the current profile
    if name.is_none() && avatar.is_none() {
        if json {
            let envelope = OperationResult::ok(ctx.session.snapshot());
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            return Ok(());
        }

        let display_name = ctx.session.user_name();
        let display_avatar = ctx.session.user_avatar();
        if display_avatar.is_empty() {
            println!("{}", display_name.bold());
        } else {
            println!("{} {}", display_avatar, display_name.bold());
        }
        println!("Email: {}", ctx.session.user_email());
        return Ok(());
    }

    let logger = get_logger();
    log_event(&logger, LogEvent::new("profile_update_started").with_command("profile"));

    // The profile form always submits a name, so an omitted --name keeps
    // the current one
    let name = match name {
        Some(n) => n,
        None => ctx.session.user_name(),
    };

    ctx.session.update_profile(&name, avatar)?;
    log_event(&logger, LogEvent::new("profile_update_completed").with_command("profile"));

    if json {
        let envelope = OperationResult::ok(ctx.session.snapshot());
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    output::success("Profile updated");
    Ok(())
}
