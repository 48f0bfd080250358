use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::classify::{ParseMode, ScanMode};
use crate::error::{Error, Result};
use crate::models::CategoryCaps;
use crate::search::DEFAULT_BASE_URL;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub keys_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub scan_mode: ScanMode,
    pub parse_mode: ParseMode,
    pub caps: CategoryCaps,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from any variable source. `from_env` is the process-environment case.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("NOVELCRAWLER_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if base_url.trim().is_empty() {
            return Err(Error::Config("NOVELCRAWLER_BASE_URL is empty".to_string()));
        }

        let keys_path = lookup("NOVELCRAWLER_KEYS_FILE").map(PathBuf::from);

        let output_dir = lookup("NOVELCRAWLER_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let request_timeout_secs = match lookup("NOVELCRAWLER_TIMEOUT_SECS") {
            Some(v) => v.parse().map_err(|_| {
                Error::Config(format!("NOVELCRAWLER_TIMEOUT_SECS is not a number: {}", v))
            })?,
            None => 30,
        };
        if request_timeout_secs == 0 {
            return Err(Error::Config(
                "NOVELCRAWLER_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        let scan_mode = match lookup("NOVELCRAWLER_SCAN_MODE") {
            Some(v) => v.parse()?,
            None => ScanMode::default(),
        };

        let parse_mode = lookup("NOVELCRAWLER_STRICT")
            .map(|v| {
                if v.to_lowercase() == "true" {
                    ParseMode::Strict
                } else {
                    ParseMode::BestEffort
                }
            })
            .unwrap_or_default();

        let defaults = CategoryCaps::default();
        let caps = CategoryCaps {
            content: parse_cap(&lookup, "NOVELCRAWLER_CONTENT_CAP", defaults.content)?,
            directory: parse_cap(&lookup, "NOVELCRAWLER_DIRECTORY_CAP", defaults.directory)?,
            image_novel: parse_cap(&lookup, "NOVELCRAWLER_IMAGE_NOVEL_CAP", defaults.image_novel)?,
        };

        Ok(Self {
            base_url,
            keys_path,
            output_dir,
            request_timeout_secs,
            scan_mode,
            parse_mode,
            caps,
        })
    }

    /// Applies command-line values on top of this config. Absent values keep the current ones.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(keys_path) = overrides.keys_path {
            self.keys_path = Some(keys_path);
        }
        if let Some(output_dir) = overrides.output_dir {
            self.output_dir = output_dir;
        }
        if let Some(base_url) = overrides.base_url {
            self.base_url = base_url;
        }
        if let Some(secs) = overrides.request_timeout_secs {
            if secs == 0 {
                return Err(Error::Config(
                    "--timeout-secs must be greater than zero".to_string(),
                ));
            }
            self.request_timeout_secs = secs;
        }
        if let Some(mode) = overrides.scan_mode {
            self.scan_mode = mode.parse()?;
        }
        if overrides.strict {
            self.parse_mode = ParseMode::Strict;
        }
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub keys_path: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub scan_mode: Option<String>,
    pub strict: bool,
}

fn parse_cap<F>(lookup: &F, name: &str, default: usize) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(v) => v
            .parse()
            .map_err(|_| Error::Config(format!("{} is not a number: {}", name, v))),
        None => Ok(default),
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub scan_mode: ScanMode,
    pub parse_mode: ParseMode,
    pub caps: CategoryCaps,
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scan_mode: ScanMode::default(),
            parse_mode: ParseMode::default(),
            caps: CategoryCaps::default(),
            show_progress: false,
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            scan_mode: config.scan_mode,
            parse_mode: config.parse_mode,
            caps: config.caps,
            show_progress: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.scan_mode, ScanMode::EarlyExit);
        assert_eq!(config.parse_mode, ParseMode::BestEffort);
        assert_eq!(config.caps, CategoryCaps::default());
        assert!(config.keys_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("NOVELCRAWLER_BASE_URL", "http://localhost:8080/api.php"),
            ("NOVELCRAWLER_KEYS_FILE", "sites.conf"),
            ("NOVELCRAWLER_SCAN_MODE", "full"),
            ("NOVELCRAWLER_STRICT", "TRUE"),
            ("NOVELCRAWLER_CONTENT_CAP", "5"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:8080/api.php");
        assert_eq!(config.keys_path, Some(PathBuf::from("sites.conf")));
        assert_eq!(config.scan_mode, ScanMode::Full);
        assert_eq!(config.parse_mode, ParseMode::Strict);
        assert_eq!(config.caps.content, 5);
        assert_eq!(config.caps.directory, 1);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let err = Config::from_lookup(lookup_from(&[("NOVELCRAWLER_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = Config::from_lookup(lookup_from(&[("NOVELCRAWLER_TIMEOUT_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = Config::from_lookup(lookup_from(&[("NOVELCRAWLER_SCAN_MODE", "sometimes")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_overrides_take_precedence_over_env() {
        let env = Config::from_lookup(lookup_from(&[
            ("NOVELCRAWLER_BASE_URL", "http://env.local/api.php"),
            ("NOVELCRAWLER_KEYS_FILE", "env.conf"),
            ("NOVELCRAWLER_OUTPUT_DIR", "env-out"),
            ("NOVELCRAWLER_TIMEOUT_SECS", "10"),
        ]))
        .unwrap();

        let config = env
            .with_overrides(ConfigOverrides {
                keys_path: Some(PathBuf::from("cli.conf")),
                request_timeout_secs: Some(5),
                scan_mode: Some("full".to_string()),
                strict: true,
                ..ConfigOverrides::default()
            })
            .unwrap();

        assert_eq!(config.keys_path, Some(PathBuf::from("cli.conf")));
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.scan_mode, ScanMode::Full);
        assert_eq!(config.parse_mode, ParseMode::Strict);
        // Not given on the command line, so the env values stay.
        assert_eq!(config.base_url, "http://env.local/api.php");
        assert_eq!(config.output_dir, PathBuf::from("env-out"));
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let env = Config::from_lookup(lookup_from(&[("NOVELCRAWLER_STRICT", "true")])).unwrap();
        let config = env.with_overrides(ConfigOverrides::default()).unwrap();
        assert_eq!(config.parse_mode, ParseMode::Strict);
        assert_eq!(config.scan_mode, ScanMode::EarlyExit);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_invalid_overrides_are_config_errors() {
        let base = Config::from_lookup(lookup_from(&[])).unwrap();

        let err = base
            .clone()
            .with_overrides(ConfigOverrides {
                request_timeout_secs: Some(0),
                ..ConfigOverrides::default()
            })
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = base
            .with_overrides(ConfigOverrides {
                scan_mode: Some("sometimes".to_string()),
                ..ConfigOverrides::default()
            })
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
