use crate::commands::{ClassdeskPaths, CmdMessage, CmdResult};
use crate::config::ClassdeskConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &ClassdeskPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    match action {
        ConfigAction::ShowAll => {
            let config = ClassdeskConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = ClassdeskConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = ClassdeskConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e));
                return Ok(res);
            }
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or_else(|| value.clone());
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(temp: &TempDir) -> ClassdeskPaths {
        ClassdeskPaths {
            data_dir: temp.path().to_path_buf(),
        }
    }

    #[test]
    fn set_persists_and_show_key_reads_back() {
        let temp = TempDir::new().unwrap();
        let set = run(
            &paths(&temp),
            ConfigAction::Set("line-width".into(), "100".into()),
        )
        .unwrap();
        assert_eq!(set.messages[0].content, "line-width set to 100");

        let shown = run(&paths(&temp), ConfigAction::ShowKey("line-width".into())).unwrap();
        assert_eq!(shown.messages[0].content, "100");
    }

    #[test]
    fn invalid_set_is_an_error_message() {
        let temp = TempDir::new().unwrap();
        let result = run(
            &paths(&temp),
            ConfigAction::Set("confirm-delete".into(), "maybe".into()),
        )
        .unwrap();
        assert!(result.has_errors());
        assert!(result.config.is_none());
    }

    #[test]
    fn show_all_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let result = run(&paths(&temp), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(ClassdeskConfig::default()));
    }
}
