//! Subcommand handlers. Each prints its result to stdout as pretty JSON.

mod catalog;
mod production;
mod rotation;
mod time;
mod timer;

use anyhow::Result;
use serde::Serialize;

use opsfloor_core::{Clock, Config, FloorError};
use opsfloor_rotation::order::dedupe_ids;
use opsfloor_rotation::Availability;
use opsfloor_timers::Phase;

use crate::cli::{ActiveArgs, Command};

pub async fn run(command: Command, config: &Config, clock: &dyn Clock) -> Result<()> {
    match command {
        Command::Rotation(cmd) => rotation::run(cmd, config),
        Command::Timer(cmd) => timer::run(cmd, config, clock).await,
        Command::Time(cmd) => time::run(cmd, clock),
        Command::Production(cmd) => production::run(cmd, config, clock),
        Command::Catalog(cmd) => catalog::run(cmd, config),
        Command::Sample(args) => catalog::take_sample(args, config, clock),
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

impl ActiveArgs {
    /// Active ids (deduplicated, blanks dropped) and the availability map
    /// they imply. Every unavailable id must be active.
    pub(crate) fn resolve(&self) -> Result<(Vec<String>, Availability), FloorError> {
        let cleaned: Vec<String> = self
            .active
            .iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        let active = dedupe_ids(&cleaned);

        if let Some(stray) = self.unavailable.iter().find(|id| !active.contains(id)) {
            return Err(FloorError::InvalidArgument(format!(
                "unavailable id '{stray}' is not in --active"
            )));
        }

        let mut availability = Availability::unavailable(self.unavailable.iter().cloned());
        availability.reconcile(&active);
        Ok((active, availability))
    }
}

pub(crate) fn parse_phase(raw: &str) -> Result<Phase, FloorError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "am" | "a" => Ok(Phase::Am),
        "pm" | "p" => Ok(Phase::Pm),
        other => Err(FloorError::InvalidArgument(format!("phase must be AM or PM, got '{other}'"))),
    }
}
