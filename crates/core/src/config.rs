use std::env;

use serde::{Deserialize, Serialize};

use crate::error::OffloadError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u16(profile: &str, key: &str, default: u16) -> u16 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_i64(profile: &str, key: &str, default: i64) -> i64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub pool: PoolConfig,
    pub compute: ComputeConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `OFFLOAD_PROFILE`. When set (e.g. `PROD`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("OFFLOAD_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_env_profiled(p),
            pool: PoolConfig::from_env_profiled(p),
            compute: ComputeConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  server:   host={}, port={}, cors={}", self.server.host, self.server.port, self.server.cors_origin);
        tracing::info!("  pool:     workers={}", self.pool.resolved_workers());
        tracing::info!("  compute:  factorial_max_input={}", self.compute.factorial_max_input);
    }

    /// Reject values the server cannot start with.
    pub fn validate(&self) -> Result<(), OffloadError> {
        if self.server.host.trim().is_empty() {
            return Err(OffloadError::Config("HOST must not be empty".into()));
        }
        if self.compute.factorial_max_input < 0 {
            return Err(OffloadError::Config(format!(
                "FACTORIAL_MAX_INPUT must be >= 0, got {}",
                self.compute.factorial_max_input
            )));
        }
        Ok(())
    }

    /// Pretty-printed JSON of [`Config::redacted_summary`].
    pub fn to_json_pretty(&self) -> Result<String, OffloadError> {
        Ok(serde_json::to_string_pretty(&self.redacted_summary())?)
    }

    /// Return a view safe for API responses and the `config` subcommand.
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "server": {
                "host": self.server.host,
                "port": self.server.port,
                "cors_origin": self.server.cors_origin,
            },
            "pool": {
                "workers": self.pool.workers,
                "resolved_workers": self.pool.resolved_workers(),
            },
            "compute": { "factorial_max_input": self.compute.factorial_max_input },
        })
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

impl ServerConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            host: profiled_env_or(p, "HOST", "0.0.0.0"),
            port: profiled_env_u16(p, "PORT", 3000),
            cors_origin: profiled_env_or(p, "CORS_ORIGIN", "*"),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ── Worker pool ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Number of worker threads. 0 = available parallelism.
    pub workers: usize,
}

impl PoolConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            workers: profiled_env_usize(p, "WORKER_POOL_SIZE", 4),
        }
    }

    /// Resolve worker count (0 means use available parallelism).
    pub fn resolved_workers(&self) -> usize {
        if self.workers == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        } else {
            self.workers
        }
    }
}

// ── Computation ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeConfig {
    /// Largest factorial input accepted by a worker. 0 disables the cap.
    pub factorial_max_input: i64,
}

impl ComputeConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            factorial_max_input: profiled_env_i64(p, "FACTORIAL_MAX_INPUT", 20_000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiled_key_overrides_plain_key() {
        env::set_var("CFGTEST_ALPHA_WORKER_POOL_SIZE", "7");
        let config = Config::for_profile("cfgtest_alpha");
        assert_eq!(config.profile, "CFGTEST_ALPHA");
        assert_eq!(config.pool.workers, 7);
        assert_eq!(config.pool.resolved_workers(), 7);
    }

    #[test]
    fn unparsable_values_fall_back_to_defaults() {
        env::set_var("CFGTEST_BETA_PORT", "not-a-port");
        env::set_var("CFGTEST_BETA_FACTORIAL_MAX_INPUT", "lots");
        let p = "CFGTEST_BETA";
        // The prefixed key wins even when it does not parse.
        assert_eq!(ServerConfig::from_env_profiled(p).port, 3000);
        assert_eq!(ComputeConfig::from_env_profiled(p).factorial_max_input, 20_000);
    }

    #[test]
    fn validate_rejects_negative_cap() {
        let mut config = Config::for_profile("");
        config.server.host = "127.0.0.1".into();
        config.compute.factorial_max_input = -1;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, OffloadError::Config(_)));

        config.compute.factorial_max_input = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_workers_resolves_to_parallelism() {
        let pool = PoolConfig { workers: 0 };
        assert!(pool.resolved_workers() > 0);
    }

    #[test]
    fn default_profile_label() {
        let config = Config::for_profile("");
        assert_eq!(config.profile_label(), "default");
        let summary = config.redacted_summary();
        assert_eq!(summary["profile"], "default");
        assert!(summary["pool"]["resolved_workers"].as_u64().unwrap() > 0);
    }
}
