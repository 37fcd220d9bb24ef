mod cli;
mod commands;

use anyhow::Result;
use chrono::NaiveDateTime;
use clap::Parser;

use opsfloor_core::{config, Clock, Config, FixedClock, FloorError, SystemClock};

use crate::cli::CliArgs;

const AT_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Wall clock for this run: the real one, or a pinned `--at` time.
fn clock_for(at: Option<&str>) -> Result<Box<dyn Clock>, FloorError> {
    let Some(raw) = at else {
        return Ok(Box::new(SystemClock));
    };
    AT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw.trim(), fmt).ok())
        .map(|at| Box::new(FixedClock::new(at)) as Box<dyn Clock>)
        .ok_or_else(|| FloorError::InvalidArgument(format!("--at '{raw}' is not YYYY-MM-DD HH:MM")))
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries command output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    config::load_dotenv();
    let args = CliArgs::parse();

    let config = match args.profile.as_deref() {
        Some(profile) => Config::for_profile(profile),
        None => Config::from_env(),
    };
    config.log_summary();

    let clock = clock_for(args.at.as_deref())?;
    commands::run(args.command, &config, clock.as_ref()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_accepts_space_or_t_separator() {
        let a = clock_for(Some("2026-02-26 06:30")).unwrap().now();
        let b = clock_for(Some("2026-02-26T06:30")).unwrap().now();
        assert_eq!(a, b);
    }

    #[test]
    fn bad_at_is_invalid_argument() {
        let err = clock_for(Some("yesterday")).err().unwrap();
        assert!(matches!(err, FloorError::InvalidArgument(_)));
    }
}
