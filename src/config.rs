//! Board engine configuration.
//!
//! DESIGN
//! ======
//! Read once from the environment with typed parse-or-default helpers. A
//! value that is missing or fails to parse falls back to its default rather
//! than failing startup. `from_lookup` takes the variable source as a
//! function so tests never have to touch the process environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use crate::consts::{DEFAULT_ID_PREFIX, DEFAULT_ID_SUFFIX_LEN, DEFAULT_WIP_WARNING_PERCENT};
use crate::ids::ClockIdSource;

pub const ENV_ID_PREFIX: &str = "TASKBOARD_ID_PREFIX";
pub const ENV_ID_SUFFIX_LEN: &str = "TASKBOARD_ID_SUFFIX_LEN";
pub const ENV_WIP_WARNING_PERCENT: &str = "TASKBOARD_WIP_WARNING_PERCENT";

#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// Prefix of generated task ids.
    pub id_prefix: String,
    /// Length of the random base-36 suffix of generated task ids.
    pub id_suffix_len: usize,
    /// Fill percentage at which a limited column reports `WipLevel::Warning`.
    pub wip_warning_percent: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            id_prefix: DEFAULT_ID_PREFIX.to_owned(),
            id_suffix_len: DEFAULT_ID_SUFFIX_LEN,
            wip_warning_percent: DEFAULT_WIP_WARNING_PERCENT,
        }
    }
}

impl BoardConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let id_prefix = lookup(ENV_ID_PREFIX)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ID_PREFIX.to_owned());
        let wip_warning_percent = lookup_parse(&lookup, ENV_WIP_WARNING_PERCENT, DEFAULT_WIP_WARNING_PERCENT);

        Self {
            id_prefix,
            id_suffix_len: lookup_parse(&lookup, ENV_ID_SUFFIX_LEN, DEFAULT_ID_SUFFIX_LEN),
            wip_warning_percent: if wip_warning_percent.is_finite() && wip_warning_percent >= 0.0 {
                wip_warning_percent
            } else {
                DEFAULT_WIP_WARNING_PERCENT
            },
        }
    }

    /// Id source stamping tasks with this config's id format.
    #[must_use]
    pub fn id_source(&self) -> ClockIdSource {
        ClockIdSource::new(self.id_prefix.clone(), self.id_suffix_len)
    }
}

fn lookup_parse<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy,
{
    lookup(key).and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}
