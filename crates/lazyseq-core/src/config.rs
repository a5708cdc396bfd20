//! Query configuration that downstream crates can serialize/deserialize.
//!
//! Buffers, hash sets and lookups created inside operators size themselves from
//! [`QueryConfig::global`]; callers that want different growth policies can build
//! their own containers with an explicit config.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// First allocation size of a growable buffer.
    pub buffer_starting_capacity: usize,

    /// The large-array builder resizes its first chunk until this many items,
    /// then switches to a list of geometrically growing chunks.
    pub buffer_resize_limit: usize,

    /// Upper bound on items a buffer may hold. Exceeding it is a caller bug.
    pub buffer_max_capacity: usize,

    /// Bucket count of a freshly created hash set or lookup.
    pub hash_initial_buckets: usize,

    /// Initial element capacity of a lookup grouping; doubles on demand.
    pub group_initial_capacity: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            buffer_starting_capacity: 4,
            buffer_resize_limit: 8,
            buffer_max_capacity: isize::MAX as usize,
            hash_initial_buckets: 7,
            group_initial_capacity: 1,
        }
    }
}

static GLOBAL: OnceCell<QueryConfig> = OnceCell::new();

impl QueryConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `LAZYSEQ_BUFFER_STARTING_CAPACITY`
    /// - `LAZYSEQ_BUFFER_RESIZE_LIMIT`
    /// - `LAZYSEQ_BUFFER_MAX_CAPACITY`
    /// - `LAZYSEQ_HASH_INITIAL_BUCKETS`
    /// - `LAZYSEQ_GROUP_INITIAL_CAPACITY`
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Some(v) = env_usize("LAZYSEQ_BUFFER_STARTING_CAPACITY") {
            cfg.buffer_starting_capacity = v;
        }

        if let Some(v) = env_usize("LAZYSEQ_BUFFER_RESIZE_LIMIT") {
            cfg.buffer_resize_limit = v;
        }

        if let Some(v) = env_usize("LAZYSEQ_BUFFER_MAX_CAPACITY") {
            cfg.buffer_max_capacity = v;
        }

        if let Some(v) = env_usize("LAZYSEQ_HASH_INITIAL_BUCKETS") {
            cfg.hash_initial_buckets = v;
        }

        if let Some(v) = env_usize("LAZYSEQ_GROUP_INITIAL_CAPACITY") {
            cfg.group_initial_capacity = v;
        }

        cfg
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: QueryConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.buffer_starting_capacity == 0 {
            return Err(Error::Config("buffer_starting_capacity must be > 0".into()));
        }
        if self.buffer_resize_limit < self.buffer_starting_capacity {
            return Err(Error::Config(format!(
                "buffer_resize_limit ({}) must be >= buffer_starting_capacity ({})",
                self.buffer_resize_limit, self.buffer_starting_capacity
            )));
        }
        if self.buffer_max_capacity <= self.buffer_resize_limit {
            return Err(Error::Config(
                "buffer_max_capacity must exceed buffer_resize_limit".into(),
            ));
        }
        if self.hash_initial_buckets == 0 {
            return Err(Error::Config("hash_initial_buckets must be > 0".into()));
        }
        if self.group_initial_capacity == 0 {
            return Err(Error::Config("group_initial_capacity must be > 0".into()));
        }
        Ok(())
    }

    /// Process-wide config, read from the environment on first use.
    /// An invalid environment falls back to the defaults.
    pub fn global() -> &'static QueryConfig {
        GLOBAL.get_or_init(|| {
            let cfg = Self::from_env();
            match cfg.validate() {
                Ok(()) => cfg,
                Err(_) => Self::default(),
            }
        })
    }

    /// Install the process-wide config. Fails if it was already initialised
    /// (explicitly or by first use) or if `cfg` does not validate.
    pub fn install_global(cfg: QueryConfig) -> Result<()> {
        cfg.validate()?;
        GLOBAL
            .set(cfg)
            .map_err(|_| Error::Config("global config already initialised".into()))
    }
}

fn env_usize(name: &str) -> Option<usize> {
    std::env::var(name).ok()?.trim().parse::<usize>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        QueryConfig::default().validate().expect("defaults are valid");
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let cfg = QueryConfig::from_json(r#"{ "hash_initial_buckets": 11 }"#).unwrap();
        assert_eq!(cfg.hash_initial_buckets, 11);
        assert_eq!(cfg.buffer_starting_capacity, 4);
    }

    #[test]
    fn rejects_resize_limit_below_start() {
        let cfg = QueryConfig {
            buffer_starting_capacity: 16,
            buffer_resize_limit: 8,
            ..QueryConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));
    }
}
