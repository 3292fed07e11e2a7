//! Runtime configuration.
//!
//! Layered: ~/.banamatix/config.json, then environment, then command line.

use crate::constants::{DEFAULT_API_BASE, DEFAULT_REQUEST_TIMEOUT_SECS, TIME_LIMIT_SECONDS};
use crate::economy::RewardPolicy;
use crate::session::SessionConfig;
use crate::utils::persistence::load_json_or_default;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the profile store
    pub api_base: String,
    /// Logged-in user; `None` plays the anonymous trial
    pub user: Option<String>,
    /// Sent as the `Authorization` header
    pub auth_token: Option<String>,
    pub reward_policy: RewardPolicy,
    pub timed: bool,
    pub time_limit_secs: u32,
    /// Keep profiles in memory instead of talking to the store
    pub offline: bool,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            user: None,
            auth_token: None,
            reward_policy: RewardPolicy::default(),
            timed: true,
            time_limit_secs: TIME_LIMIT_SECONDS,
            offline: false,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Unknown argument: {0}")]
    UnknownArgument(String),
    #[error("Missing value for {0}")]
    MissingValue(&'static str),
    #[error("Invalid value for {flag}: {value}")]
    InvalidValue { flag: &'static str, value: String },
}

/// What the command line asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliCommand {
    Play,
    Version,
    Help,
}

impl Config {
    /// Load the config file and apply environment overrides.
    pub fn load() -> Self {
        let mut config: Config = load_json_or_default(CONFIG_FILE);
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(api) = lookup("BANAMATIX_API").filter(|v| !v.trim().is_empty()) {
            self.api_base = api;
        }
        if let Some(token) = lookup("BANAMATIX_TOKEN").filter(|v| !v.trim().is_empty()) {
            self.auth_token = Some(token);
        }
        if let Some(user) = lookup("BANAMATIX_USER").filter(|v| !v.trim().is_empty()) {
            self.user = Some(user);
        }
    }

    /// Apply command-line flags (without the program name).
    pub fn apply_args(&mut self, args: &[String]) -> Result<CliCommand, ConfigError> {
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--version" | "-v" => return Ok(CliCommand::Version),
                "--help" | "-h" => return Ok(CliCommand::Help),
                "--user" | "-u" => {
                    let user = iter.next().ok_or(ConfigError::MissingValue("--user"))?;
                    self.user = Some(user.clone());
                }
                "--trial" => self.user = None,
                "--offline" => self.offline = true,
                "--untimed" => self.timed = false,
                "--policy" => {
                    let value = iter.next().ok_or(ConfigError::MissingValue("--policy"))?;
                    self.reward_policy = match value.as_str() {
                        "milestone" => RewardPolicy::Milestone,
                        "end_of_session" | "end-of-session" => RewardPolicy::EndOfSession,
                        other => {
                            return Err(ConfigError::InvalidValue {
                                flag: "--policy",
                                value: other.to_string(),
                            })
                        }
                    };
                }
                "--api" => {
                    let value = iter.next().ok_or(ConfigError::MissingValue("--api"))?;
                    self.api_base = value.clone();
                }
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
        }
        Ok(CliCommand::Play)
    }

    /// Session parameters implied by this config.
    pub fn session_config(&self) -> SessionConfig {
        match self.user {
            Some(_) => SessionConfig {
                time_limit: self.timed.then_some(self.time_limit_secs.max(1)),
                ..SessionConfig::player(self.timed)
            },
            None => SessionConfig::trial(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionMode;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.reward_policy, RewardPolicy::Milestone);
        assert!(config.timed);
        assert!(config.user.is_none());
    }

    #[test]
    fn test_json_partial_config() {
        let config: Config =
            serde_json::from_str(r#"{"user":"kiwi","reward_policy":"end_of_session"}"#).unwrap();
        assert_eq!(config.user.as_deref(), Some("kiwi"));
        assert_eq!(config.reward_policy, RewardPolicy::EndOfSession);
        assert_eq!(config.time_limit_secs, 60);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env(|key| match key {
            "BANAMATIX_API" => Some("http://example.test".to_string()),
            "BANAMATIX_TOKEN" => Some("abc".to_string()),
            "BANAMATIX_USER" => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.api_base, "http://example.test");
        assert_eq!(config.auth_token.as_deref(), Some("abc"));
        assert!(config.user.is_none());
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        let command = config
            .apply_args(&args(&["--user", "kiwi", "--offline", "--untimed", "--policy", "end_of_session"]))
            .unwrap();
        assert_eq!(command, CliCommand::Play);
        assert_eq!(config.user.as_deref(), Some("kiwi"));
        assert!(config.offline);
        assert!(!config.timed);
        assert_eq!(config.reward_policy, RewardPolicy::EndOfSession);
    }

    #[test]
    fn test_apply_args_errors() {
        let mut config = Config::default();
        assert_eq!(
            config.apply_args(&args(&["--user"])),
            Err(ConfigError::MissingValue("--user"))
        );
        assert_eq!(
            config.apply_args(&args(&["--bogus"])),
            Err(ConfigError::UnknownArgument("--bogus".to_string()))
        );
        assert!(matches!(
            config.apply_args(&args(&["--policy", "weekly"])),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_version_and_help() {
        let mut config = Config::default();
        assert_eq!(config.apply_args(&args(&["-v"])), Ok(CliCommand::Version));
        assert_eq!(config.apply_args(&args(&["--help"])), Ok(CliCommand::Help));
    }

    #[test]
    fn test_session_config_by_mode() {
        let mut config = Config::default();
        assert_eq!(config.session_config().mode, SessionMode::Trial);

        config.user = Some("kiwi".to_string());
        config.time_limit_secs = 30;
        let session = config.session_config();
        assert_eq!(session.mode, SessionMode::Player);
        assert_eq!(session.time_limit, Some(30));

        config.timed = false;
        assert_eq!(config.session_config().time_limit, None);
    }
}
