//! Moodline CLI - Mood journaling in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{auth, demo, log, logs, profile, quote, route, status};

/// Moodline - mood journaling in your terminal
#[derive(Parser)]
#[command(name = "ml", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and sign in
    Signup {
        /// Email address
        email: Option<String>,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign in to an existing account
    Login {
        /// Email address
        email: Option<String>,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign out and clear the stored session
    Logout {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Finish onboarding with a display name and avatar
    Onboard {
        /// Display name
        name: Option<String>,
        /// Avatar emoji
        #[arg(long)]
        avatar: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update profile name and avatar
    Profile {
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New avatar emoji
        #[arg(long)]
        avatar: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log today's mood
    Log {
        /// Mood label (very-sad, sad, neutral, happy, very-happy)
        #[arg(long)]
        mood: Option<String>,
        /// Sleep range (0-2, 3-4, 5-6, 7-8, 9-plus)
        #[arg(long)]
        sleep: Option<String>,
        /// Comma-separated feelings
        #[arg(long, value_delimiter = ',')]
        feelings: Vec<String>,
        /// Journal note (read from stdin when piped)
        #[arg(long)]
        note: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show today's entry, recent moods, and averages
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the quote for today's mood
    Quote {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check where the navigation guard sends a path
    Route {
        /// Route path, e.g. / or /signin
        path: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage demo mode
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },

    /// View and manage application logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Signup { email, password, json } => auth::run_signup(email, password, json),
        Commands::Login { email, password, json } => auth::run_login(email, password, json),
        Commands::Logout { json } => auth::run_logout(json),
        Commands::Onboard { name, avatar, json } => profile::run_onboard(name, avatar, json),
        Commands::Profile { name, avatar, json } => profile::run_update(name, avatar, json),
        Commands::Log { mood, sleep, feelings, note, json } => {
            log::run(mood, sleep, feelings, note, json)
        }
        Commands::Status { json } => status::run(json),
        Commands::Quote { json } => quote::run(json),
        Commands::Route { path, json } => route::run(&path, json),
        Commands::Demo { command } => demo::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
