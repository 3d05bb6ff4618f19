use crate::commands::{CmdMessage, CmdResult};
use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = CatalogConfig::load(config_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {}
        ConfigAction::ShowKey(key) => {
            let value = config
                .get(&key)
                .ok_or_else(|| CatalogError::Api(format!("Unknown config key: {}", key)))?;
            result.add_message(CmdMessage::info(format!("{}={}", key, value)));
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(config_dir)?;
            result.add_message(CmdMessage::success(format!("{} set to {}", key, value)));
            result.add_message(CmdMessage::info(
                "Changes apply to the next session.".to_string(),
            ));
        }
    }

    Ok(result.with_config(config))
}
