//! Configuration types shared across crates.
//!
//! Layering, later layers winning and merging recursively for nested
//! tables:
//! 1. `defaults.toml`
//! 2. `<profile>.toml` (development / test / production)
//! 3. `overrides.toml`
//! 4. `BANDSTAND_`-prefixed environment variables, `__` separating nesting

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "BANDSTAND_";

/// Backing content-store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store project identifier.
    pub project: String,
    /// Dataset / environment name within the project.
    #[serde(default = "default_dataset")]
    pub dataset: String,
    /// API access token.
    /// WARNING: Prefer the BANDSTAND_STORE__TOKEN env var over config files.
    pub token: String,
    /// Base URL override (self-hosted stores and tests). When unset the
    /// endpoint is derived from the project id.
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Token-signing secret source.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SecretSource {
    /// Secret stored in a file.
    File {
        /// Path to the secret file.
        path: PathBuf,
    },
    /// Secret stored in an environment variable.
    Env {
        /// Environment variable name.
        var: String,
    },
    /// Secret provided directly as a value (NOT recommended for production).
    Value {
        /// The raw secret.
        secret: String,
    },
    /// Generate a fresh secret (for development only: tokens stop verifying
    /// across restarts).
    Generate,
}

/// Capability token signing configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SigningConfig {
    /// Where the process-wide signing secret comes from.
    pub secret: SecretSource,
}

/// Cache configuration for identity and project-view caches.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live in seconds, measured from insertion (default: 7 days).
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
    /// Populate the project-view cache on successful reads (default: false).
    /// The write-back path is opt-in per deployment; identity lookups are
    /// always cached.
    #[serde(default)]
    pub populate_project_reads: bool,
}

fn default_dataset() -> String {
    "production".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    60 * 60 * 24 * 7 // 7 days
}

fn default_instruments() -> Vec<String> {
    [
        "flute", "clarinet", "saxophone", "cornet", "trumpet", "flugelhorn", "horn", "trombone",
        "baritone", "euphonium", "tuba", "percussion", "drums",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl_secs(),
            populate_project_reads: false,
        }
    }
}

impl CacheConfig {
    /// Get the TTL as a Duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backing store configuration.
    pub store: StoreConfig,
    /// Capability token signing configuration.
    pub signing: SigningConfig,
    /// Cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Canonical instrument names used to normalize part labels.
    #[serde(default = "default_instruments")]
    pub instruments: Vec<String>,
}

impl AppConfig {
    /// Load configuration for a profile from the given directory, applying
    /// the documented layer order.
    pub fn load(profile: &str, config_dir: impl AsRef<Path>) -> crate::Result<Self> {
        let dir = config_dir.as_ref();
        Figment::new()
            .merge(Toml::file(dir.join("defaults.toml")))
            .merge(Toml::file(dir.join(format!("{profile}.toml"))))
            .merge(Toml::file(dir.join("overrides.toml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Create a test configuration with sensible defaults.
    ///
    /// **For testing only.** Points the store at localhost and signs with an
    /// inline secret.
    pub fn for_testing() -> Self {
        Self {
            store: StoreConfig {
                project: "test".to_string(),
                dataset: "test".to_string(),
                token: "test-store-token".to_string(),
                endpoint: Some("http://127.0.0.1:3999".to_string()),
            },
            signing: SigningConfig {
                secret: SecretSource::Value {
                    secret: "test-signing-secret".to_string(),
                },
            },
            cache: CacheConfig::default(),
            instruments: default_instruments(),
        }
    }
}
