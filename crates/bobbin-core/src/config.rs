//! Runtime configuration loaded from environment variables.
//!
//! | 変数 | default |
//! |---|---|
//! | `BOBBIN_ADDR` | `0.0.0.0:8080` |
//! | `BOBBIN_WORKERS` | `2` |
//! | `BOBBIN_QUEUE_CAPACITY` | `100` |
//! | `BOBBIN_MONITOR_INTERVAL_SECS` | `5` |
//! | `BOBBIN_WORK_DURATION_MS` | `2000` |
//! | `BOBBIN_SHUTDOWN_TIMEOUT_SECS` | `10` |

use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::BobbinError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub workers: usize,
    pub queue_capacity: usize,
    pub monitor_interval: Duration,
    /// How long the simulated work unit sleeps.
    pub work_duration: Duration,
    /// Upper bound on waiting for the worker pool during shutdown.
    pub shutdown_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            workers: 2,
            queue_capacity: 100,
            monitor_interval: Duration::from_secs(5),
            work_duration: Duration::from_millis(2_000),
            shutdown_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, BobbinError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BobbinError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let config = Config {
            addr: parse(&lookup, "BOBBIN_ADDR", defaults.addr)?,
            workers: parse(&lookup, "BOBBIN_WORKERS", defaults.workers)?,
            queue_capacity: parse(&lookup, "BOBBIN_QUEUE_CAPACITY", defaults.queue_capacity)?,
            monitor_interval: Duration::from_secs(parse(
                &lookup,
                "BOBBIN_MONITOR_INTERVAL_SECS",
                defaults.monitor_interval.as_secs(),
            )?),
            work_duration: Duration::from_millis(parse(
                &lookup,
                "BOBBIN_WORK_DURATION_MS",
                defaults.work_duration.as_millis() as u64,
            )?),
            shutdown_timeout: Duration::from_secs(parse(
                &lookup,
                "BOBBIN_SHUTDOWN_TIMEOUT_SECS",
                defaults.shutdown_timeout.as_secs(),
            )?),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), BobbinError> {
        if self.workers == 0 {
            return Err(BobbinError::Config("BOBBIN_WORKERS must be at least 1".into()));
        }
        if self.queue_capacity == 0 {
            return Err(BobbinError::Config(
                "BOBBIN_QUEUE_CAPACITY must be at least 1".into(),
            ));
        }
        if self.monitor_interval.is_zero() {
            return Err(BobbinError::Config(
                "BOBBIN_MONITOR_INTERVAL_SECS must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn parse<T, F>(lookup: &F, key: &str, default: T) -> Result<T, BobbinError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| BobbinError::Config(format!("{key}={raw:?}: {e}"))),
        _ => Ok(default),
    }
}
