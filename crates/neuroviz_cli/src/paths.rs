//! Cross-platform application paths

use std::path::PathBuf;

use crate::error::CliError;

#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
}

impl AppPaths {
    pub fn new() -> Result<Self, CliError> {
        let base = dirs::config_dir().ok_or(CliError::NoConfigDir)?;
        Ok(Self::at(base.join("neuroviz")))
    }

    pub fn at(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_lives_in_config_dir() {
        let p = AppPaths::at(PathBuf::from("/tmp/nv"));
        assert_eq!(p.config_file(), PathBuf::from("/tmp/nv/config.json"));
    }
}
