use anyhow::Result;
use serde_json::json;
use tracing::info;

use opsfloor_core::{Config, FloorError};
use opsfloor_rotation::order::move_item;
use opsfloor_rotation::{JsonFileRotationStore, RotationScheduler};

use super::print_json;
use crate::cli::RotationCommand;

pub(crate) fn scheduler(config: &Config) -> RotationScheduler<JsonFileRotationStore> {
    RotationScheduler::new(JsonFileRotationStore::new(config.storage.rotation_path()))
}

pub fn run(cmd: RotationCommand, config: &Config) -> Result<()> {
    let scheduler = scheduler(config);

    match cmd {
        RotationCommand::Pick(list) => {
            let (active, availability) = list.resolve()?;
            print_json(&scheduler.pick_next_extra(&active, Some(&availability)))
        }
        RotationCommand::Preview(list) => {
            let (active, availability) = list.resolve()?;
            print_json(&scheduler.preview_next_extra(&active, Some(&availability)))
        }
        RotationCommand::Sync(list) => {
            let (active, availability) = list.resolve()?;
            print_json(&scheduler.sync_to_active_order(&active, Some(&availability)))
        }
        RotationCommand::Move {
            list,
            dragged,
            target,
        } => {
            let (active, availability) = list.resolve()?;
            for id in [&dragged, &target] {
                if !active.contains(id) {
                    return Err(FloorError::InvalidArgument(format!("'{id}' is not in --active")).into());
                }
            }
            let order = move_item(&active, &dragged, &target);
            info!(dragged = %dragged, target = %target, "active order changed");
            let state = scheduler.sync_to_active_order(&order, Some(&availability));
            print_json(&json!({ "active": order, "state": state }))
        }
        RotationCommand::Restore(list) => {
            let (active, availability) = list.resolve()?;
            let extra = scheduler.restore_extra(&active, Some(&availability));
            print_json(&json!({ "extra": extra }))
        }
        RotationCommand::Show => print_json(&scheduler.load_state()),
        RotationCommand::Reset => print_json(&scheduler.reset()),
    }
}
