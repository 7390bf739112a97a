//! Auth commands - sign up, log in, log out

use std::time::Duration;

use anyhow::Result;
use dialoguer::{Input, Password};
use indicatif::ProgressBar;

use super::{get_context, get_logger, log_event, runtime};
use crate::output;
use moodline_core::{Error, EventLog, LogEvent, OperationResult, SessionSnapshot};

pub fn run_signup(email: Option<String>, password: Option<String>, json: bool) -> Result<()> {
    let logger = get_logger();
    log_event(&logger, LogEvent::new("signup_started").with_command("signup"));

    let ctx = get_context()?;

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None => {
            let p1 = Password::new().with_prompt("Password").interact()?;
            let p2 = Password::new().with_prompt("Confirm password").interact()?;
            if p1 != p2 {
                anyhow::bail!("Passwords do not match");
            }
            p1
        }
    };

    let spinner = (!json).then(|| auth_spinner("Creating your account..."));
    let result = runtime()?.block_on(ctx.session.sign_up(&email, &password));
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    log_outcome(&logger, "signup", &result);

    if json {
        let envelope: OperationResult<SessionSnapshot> =
            result.map(|()| ctx.session.snapshot()).into();
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    match result {
        Ok(()) => {
            output::success(&format!("Account created for {}", email));
            println!("Run 'ml onboard' to finish setting up your profile.");
            Ok(())
        }
        Err(e @ (Error::AccountExists | Error::InvalidCredentials)) => {
            output::error(&e.to_string());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn run_login(email: Option<String>, password: Option<String>, json: bool) -> Result<()> {
    let logger = get_logger();
    log_event(&logger, LogEvent::new("login_started").with_command("login"));

    let ctx = get_context()?;

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let spinner = (!json).then(|| auth_spinner("Signing you in..."));
    let result = runtime()?.block_on(ctx.session.login(&email, &password));
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    log_outcome(&logger, "login", &result);

    if json {
        let envelope: OperationResult<SessionSnapshot> =
            result.map(|()| ctx.session.snapshot()).into();
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    match result {
        Ok(()) => {
            let name = ctx.session.user_name();
            if name.is_empty() {
                output::success("Signed in");
                println!("Run 'ml onboard' to finish setting up your profile.");
            } else {
                output::success(&format!("Welcome back, {}", name));
            }
            Ok(())
        }
        Err(e @ (Error::AccountExists | Error::InvalidCredentials)) => {
            output::error(&e.to_string());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn run_logout(json: bool) -> Result<()> {
    let logger = get_logger();
    log_event(&logger, LogEvent::new("logout_started").with_command("logout"));

    let ctx = get_context()?;
    ctx.session.logout()?;

    log_event(&logger, LogEvent::new("logout_completed").with_command("logout"));

    if json {
        let envelope = OperationResult::ok(ctx.session.snapshot());
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    output::success("Signed out");
    Ok(())
}

fn log_outcome(logger: &Option<EventLog>, command: &str, result: &moodline_core::Result<()>) {
    match result {
        Ok(()) => log_event(
            logger,
            LogEvent::new(format!("{}_completed", command)).with_command(command),
        ),
        Err(e) => log_event(
            logger,
            LogEvent::new(format!("{}_failed", command))
                .with_command(command)
                .with_error(e.to_string()),
        ),
    }
}

fn auth_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
