use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use vnsh::engine::ConsoleOptions;

pub const CONFIG_FILE: &str = "vnsh.toml";

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct VnshConfig {
    pub console: ConsoleConfig,
    pub transcript: TranscriptConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub prompt: String,
    /// Name of the read-only variable holding the previous result.
    pub last_result: String,
    pub use_last_result: bool,
    pub color: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: "PS> ".to_string(),
            last_result: "last".to_string(),
            use_last_result: true,
            color: true,
        }
    }
}

impl ConsoleConfig {
    pub fn options(&self) -> ConsoleOptions {
        ConsoleOptions {
            use_last_result: self.use_last_result,
            last_result_name: self.last_result.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TranscriptStrategy {
    Always,
    ErrorOnly,
    #[default]
    None,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    pub strategy: TranscriptStrategy,
    pub dir: PathBuf,
    /// Strip ANSI colors before writing.
    pub plain: bool,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            strategy: TranscriptStrategy::None,
            dir: Path::new(".vnsh").join("transcripts"),
            plain: true,
        }
    }
}

/// Loads `path`, or `vnsh.toml` from the current directory when no path is
/// given. Only the implicit file may be absent.
pub fn load_config(path: Option<&Path>) -> Result<VnshConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                bail!("❌ Config file {:?} not found.", p);
            }
            p.to_path_buf()
        }
        None => {
            let default = PathBuf::from(CONFIG_FILE);
            if !default.exists() {
                return Ok(VnshConfig::default());
            }
            default
        }
    };

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    parse_config(&content).with_context(|| format!("Failed to parse {}", config_path.display()))
}

fn parse_config(content: &str) -> Result<VnshConfig> {
    let config: VnshConfig = toml::from_str(content)?;
    if config.console.use_last_result && config.console.last_result.trim().is_empty() {
        bail!("[console] last_result must not be empty while use_last_result is on");
    }
    Ok(config)
}
