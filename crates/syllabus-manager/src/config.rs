use std::time::Duration;

use syllabus_api::ConfigError;

const DEFAULT_MUTATION_NOTICE_MS: u64 = 4000;
const DEFAULT_REMOVAL_NOTICE_MS: u64 = 3000;

/// How long status messages stay on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerConfig {
    /// Load, create and update outcomes.
    pub mutation_notice: Duration,
    /// Delete outcomes.
    pub removal_notice: Duration,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            mutation_notice: Duration::from_millis(DEFAULT_MUTATION_NOTICE_MS),
            removal_notice: Duration::from_millis(DEFAULT_REMOVAL_NOTICE_MS),
        }
    }
}

impl ManagerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mutation_notice = parse_millis(
            &lookup,
            "SYLLABUS_MUTATION_NOTICE_MS",
            DEFAULT_MUTATION_NOTICE_MS,
        )?;
        let removal_notice = parse_millis(
            &lookup,
            "SYLLABUS_REMOVAL_NOTICE_MS",
            DEFAULT_REMOVAL_NOTICE_MS,
        )?;

        Ok(ManagerConfig {
            mutation_notice,
            removal_notice,
        })
    }
}

fn parse_millis<F>(lookup: &F, var: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let millis = match lookup(var) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid(var, "must be a number of milliseconds"))?,
        None => default,
    };
    Ok(Duration::from_millis(millis))
}
