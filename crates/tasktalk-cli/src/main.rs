mod display;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use tasktalk_ai::{AssistantRequest, CommandPolicy, ResponseInterpreter, build_prompt};
use tasktalk_core::resolve_date;

#[derive(Parser)]
#[command(name = "tasktalk", version, about = "Interpret task-assistant model replies")]
struct Cli {
    /// Reference time for relative dates (RFC 3339 or naive ISO 8601). Defaults to the local clock.
    #[arg(long, global = true, env = "TASKTALK_NOW")]
    now: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a model reply and print the result as JSON
    Parse {
        /// Reply text; read from stdin when omitted or `-`
        text: Option<String>,

        /// JSON file overriding the default action/function policy
        #[arg(long, env = "TASKTALK_POLICY")]
        policy: Option<PathBuf>,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Resolve a relative date phrase such as "in 3 days"
    ResolveDate {
        phrase: String,
    },
    /// Print the full prompt that would be sent to the model
    Prompt {
        #[arg(long)]
        prompt: String,

        #[arg(long)]
        context: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let now = match cli.now.as_deref() {
        Some(s) => parse_reference_time(s)
            .with_context(|| format!("invalid --now value {s:?}"))?,
        None => Local::now().naive_local(),
    };

    match cli.command {
        Command::Parse {
            text,
            policy,
            compact,
        } => {
            let interpreter = match policy {
                Some(path) => ResponseInterpreter::with_policy(load_policy(&path)?),
                None => ResponseInterpreter::new(),
            };
            let raw = match text.as_deref() {
                None | Some("-") => read_stdin()?,
                Some(s) => s.to_string(),
            };

            let outcome = interpreter.interpret(&raw, now);
            tracing::info!(
                summary = %display::summary(&outcome.result),
                diagnostic = ?outcome.diagnostic,
                "interpreted reply"
            );
            println!("{}", display::render_json(&outcome.result, compact)?);
        }
        Command::ResolveDate { phrase } => {
            println!("{}", resolve_date(&phrase, now));
        }
        Command::Prompt { prompt, context } => {
            println!("{}", build_prompt(&AssistantRequest { prompt, context }));
        }
    }

    Ok(())
}

fn load_policy(path: &Path) -> anyhow::Result<CommandPolicy> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading policy file {}", path.display()))?;
    let policy = CommandPolicy::from_json(&json)
        .with_context(|| format!("parsing policy file {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        default_action = %policy.default_action,
        default_function = %policy.default_function,
        "loaded command policy"
    );
    Ok(policy)
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("reading reply from stdin")?;
    Ok(buf)
}

/// Accepts `2025-03-14T09:30:00+01:00`, `2025-03-14T09:30:00`, or `2025-03-14`.
fn parse_reference_time(s: &str) -> anyhow::Result<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, tasktalk_core::dates::ISO_FORMAT) {
        return Ok(dt);
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")?;
    Ok(date.and_time(chrono::NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_time_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(parse_reference_time("2025-03-14T09:30:00").unwrap(), expected);
        assert_eq!(
            parse_reference_time("2025-03-14T09:30:00+01:00").unwrap(),
            expected
        );
        assert_eq!(
            parse_reference_time("2025-03-14").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 14)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn reference_time_rejects_garbage() {
        assert!(parse_reference_time("tomorrow").is_err());
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["tasktalk", "--now", "2025-03-14", "resolve-date", "in 2 days"])
            .unwrap();
        assert_eq!(cli.now.as_deref(), Some("2025-03-14"));
        assert!(matches!(cli.command, Command::ResolveDate { ref phrase } if phrase == "in 2 days"));
    }
}
