//! Route command - check the navigation guard for a path

use anyhow::Result;
use colored::Colorize;

use super::get_context;
use moodline_core::services::decide_path;
use moodline_core::Verdict;

pub fn run(path: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let verdict = decide_path(path, &ctx.session.snapshot());

    if json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
        return Ok(());
    }

    match verdict {
        Verdict::Allow => println!("{} {}", path, "allowed".green()),
        Verdict::RedirectTo(target) => {
            println!("{} {} {}", path, "redirects to".yellow(), target)
        }
    }

    Ok(())
}
