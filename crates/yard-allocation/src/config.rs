//! Engine configuration.
//!
//! Defaults match a single-node deployment. Every field can be overridden
//! from the environment with [`AllocationConfig::from_env`].

use crate::domain::{
    AttributeError, ContainerAttributes, ContainerHeight, ContainerSize, ContainerType,
    HEIGHT_TOLERANCE,
};
use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },

    #[error("Invalid default container attributes: {0}")]
    InvalidAttributes(#[from] AttributeError),

    #[error("Cache TTLs must satisfy plans >= occupancy >= suggestions (got {plans}s, {occupancy}s, {suggestions}s)")]
    TtlOrdering {
        plans: u64,
        occupancy: u64,
        suggestions: u64,
    },

    #[error("Cache capacity must be at least 1")]
    ZeroCapacity,
}

/// Read-through cache settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// When false the engine always reads the topology store.
    pub enabled: bool,
    /// Expiry of cached yard plan listings.
    pub plans_ttl: Duration,
    /// Expiry of cached block occupancy snapshots.
    pub occupancy_ttl: Duration,
    /// Expiry of cached suggestion results.
    pub suggestions_ttl: Duration,
    /// Entry limit of the in-memory cache adapter.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            plans_ttl: Duration::from_secs(300),
            occupancy_ttl: Duration::from_secs(120),
            suggestions_ttl: Duration::from_secs(60),
            capacity: 1024,
        }
    }
}

/// Configuration of the allocation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationConfig {
    pub cache: CacheConfig,

    /// Attributes given to a container placed without attributes and
    /// without a prior record.
    pub default_attributes: ContainerAttributes,

    /// Absolute tolerance when matching container heights against plans.
    pub height_tolerance: f64,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            default_attributes: ContainerAttributes::default(),
            height_tolerance: HEIGHT_TOLERANCE,
        }
    }
}

impl AllocationConfig {
    /// Configuration with the cache turned off.
    pub fn without_cache() -> Self {
        let mut config = Self::default();
        config.cache.enabled = false;
        config
    }

    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `YARD_CACHE_ENABLED` (default: true)
    /// - `YARD_CACHE_PLANS_TTL_SECS` (default: 300)
    /// - `YARD_CACHE_OCCUPANCY_TTL_SECS` (default: 120)
    /// - `YARD_CACHE_SUGGESTIONS_TTL_SECS` (default: 60)
    /// - `YARD_CACHE_CAPACITY` (default: 1024)
    /// - `YARD_DEFAULT_CONTAINER_SIZE` (default: 20)
    /// - `YARD_DEFAULT_CONTAINER_HEIGHT` (default: 8.6)
    /// - `YARD_DEFAULT_CONTAINER_TYPE` (default: DRY)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let cache = CacheConfig {
            enabled: match lookup("YARD_CACHE_ENABLED") {
                Some(value) => parse_flag("YARD_CACHE_ENABLED", &value)?,
                None => defaults.cache.enabled,
            },
            plans_ttl: secs(&lookup, "YARD_CACHE_PLANS_TTL_SECS", defaults.cache.plans_ttl)?,
            occupancy_ttl: secs(
                &lookup,
                "YARD_CACHE_OCCUPANCY_TTL_SECS",
                defaults.cache.occupancy_ttl,
            )?,
            suggestions_ttl: secs(
                &lookup,
                "YARD_CACHE_SUGGESTIONS_TTL_SECS",
                defaults.cache.suggestions_ttl,
            )?,
            capacity: match lookup("YARD_CACHE_CAPACITY") {
                Some(value) => parse_num("YARD_CACHE_CAPACITY", &value)?,
                None => defaults.cache.capacity,
            },
        };

        let size = match lookup("YARD_DEFAULT_CONTAINER_SIZE") {
            Some(value) => ContainerSize::try_from(parse_num::<u32>(
                "YARD_DEFAULT_CONTAINER_SIZE",
                &value,
            )?)?,
            None => defaults.default_attributes.size,
        };
        let height = match lookup("YARD_DEFAULT_CONTAINER_HEIGHT") {
            Some(value) => {
                ContainerHeight::standard(parse_num("YARD_DEFAULT_CONTAINER_HEIGHT", &value)?)?
            }
            None => defaults.default_attributes.height,
        };
        let container_type = match lookup("YARD_DEFAULT_CONTAINER_TYPE") {
            Some(value) => value.trim().parse::<ContainerType>()?,
            None => defaults.default_attributes.container_type,
        };

        let config = Self {
            cache,
            default_attributes: ContainerAttributes::new(size, height, container_type),
            height_tolerance: defaults.height_tolerance,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let cache = &self.cache;
        if cache.plans_ttl < cache.occupancy_ttl || cache.occupancy_ttl < cache.suggestions_ttl {
            return Err(ConfigError::TtlOrdering {
                plans: cache.plans_ttl.as_secs(),
                occupancy: cache.occupancy_ttl.as_secs(),
                suggestions: cache.suggestions_ttl.as_secs(),
            });
        }
        if cache.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

fn secs<F>(lookup: &F, var: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(value) => parse_num(var, &value).map(Duration::from_secs),
        None => Ok(default),
    }
}

fn parse_num<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
    })
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
        }),
    }
}
