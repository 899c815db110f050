// FILE: src/cli/config.rs
//
// Option files are turned into extra command-line arguments that are placed
// before the real ones, so the command line always has the last word.

use crate::error::{Result, TemplateError};
use crate::types::GLOBAL_OPTIONS_FILE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Structured option file (`.json` or `.toml`)
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub esc_char: Option<String>,
    #[serde(default)]
    pub map_ext: Vec<String>,
    #[serde(default)]
    pub search_dir: Vec<String>,
    #[serde(default)]
    pub user_var: Vec<String>,
    pub vars_json: Option<String>,
    pub force: Option<bool>,
}

impl ConfigFile {
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(esc) = &self.esc_char {
            args.push("--esc-char".to_string());
            args.push(esc.clone());
        }
        for (flag, values) in [
            ("--map-ext", &self.map_ext),
            ("--search-dir", &self.search_dir),
            ("--user-var", &self.user_var),
        ] {
            for value in values {
                args.push(flag.to_string());
                args.push(value.clone());
            }
        }
        if let Some(vars_json) = &self.vars_json {
            args.push("--vars-json".to_string());
            args.push(vars_json.clone());
        }
        if self.force == Some(true) {
            args.push("--force".to_string());
        }
        args
    }
}

/// Load an option file and return the arguments it contributes
pub fn load(config_path: &Path) -> Result<Vec<String>> {
    let config_content = fs::read_to_string(config_path).map_err(|e| TemplateError::FileNotFound {
        path: format!("Config file {}: {}", config_path.display(), e),
    })?;
    log::info!("Loaded configuration from {}", config_path.display());

    match config_path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => {
            let config: ConfigFile = serde_json::from_str(&config_content).map_err(|e| {
                TemplateError::invalid_format(format!("Invalid JSON config: {}", e))
            })?;
            Ok(config.to_args())
        }
        Some("toml") => {
            let config: ConfigFile = toml::from_str(&config_content).map_err(|e| {
                TemplateError::invalid_format(format!("Invalid TOML config: {}", e))
            })?;
            Ok(config.to_args())
        }
        _ => Ok(parse_option_lines(&config_content)),
    }
}

/// Parse the plain option-file format.
///
/// One option per line, `#` starts a comment line. The first space splits
/// option and value. A missing leading dash is added: `f` becomes `-f`,
/// `search-dir ~/templates` becomes `--search-dir ~/templates`.
pub fn parse_option_lines(content: &str) -> Vec<String> {
    let mut args = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (option, value) = match line.split_once(' ') {
            Some((option, value)) => (option.trim(), Some(value.trim())),
            None => (line, None),
        };

        let option = if option.starts_with('-') {
            option.to_string()
        } else if option.chars().count() == 1 {
            format!("-{}", option)
        } else {
            format!("--{}", option)
        };

        args.push(option);
        if let Some(value) = value {
            args.push(value.to_string());
        }
    }
    args
}

/// `~/.codetemplrc`, if a home directory is known
pub fn global_options_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(GLOBAL_OPTIONS_FILE))
}
