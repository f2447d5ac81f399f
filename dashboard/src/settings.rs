//! Dashboard configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::query_cache::QueryCacheOptions;
use crate::outbound::{MissingRecordPolicy, ParseMissingRecordPolicyError, StoreLatency};

const DEFAULT_SEED: u64 = 42;
const DEFAULT_CUSTOMER_COUNT: usize = 5;

/// Configuration values for the dashboard session and its mock store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DASHBOARD")]
pub struct DashboardSettings {
    /// Simulated `get_all` latency in milliseconds.
    pub read_latency_ms: Option<u64>,
    /// Simulated mutation latency in milliseconds.
    pub write_latency_ms: Option<u64>,
    /// How updates of unknown identifiers are treated: `ignore` or `reject`.
    pub missing_record_policy: Option<String>,
    /// Seed the store with generated example customers.
    #[ortho_config(default = false)]
    pub seed_enabled: bool,
    /// Seed for the example customer generator.
    pub seed: Option<u64>,
    /// Number of example customers to generate.
    pub customer_count: Option<usize>,
    /// Rows per table page.
    pub page_size: Option<usize>,
    /// Age in milliseconds after which cached data is refetched.
    pub stale_time_ms: Option<u64>,
}

impl DashboardSettings {
    /// Store latency, falling back to the defaults.
    pub fn latency(&self) -> StoreLatency {
        StoreLatency {
            read: self
                .read_latency_ms
                .map_or(StoreLatency::DEFAULT_READ, Duration::from_millis),
            write: self
                .write_latency_ms
                .map_or(StoreLatency::DEFAULT_WRITE, Duration::from_millis),
        }
    }

    /// Parsed missing-record policy; unset means [`MissingRecordPolicy::Ignore`].
    pub fn missing_record_policy(
        &self,
    ) -> Result<MissingRecordPolicy, ParseMissingRecordPolicyError> {
        self.missing_record_policy
            .as_deref()
            .map_or(Ok(MissingRecordPolicy::default()), str::parse)
    }

    /// Example data seed, falling back to the default.
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Example customer count, falling back to the default.
    pub fn customer_count(&self) -> usize {
        self.customer_count.unwrap_or(DEFAULT_CUSTOMER_COUNT)
    }

    /// Page size, falling back to the default.
    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(pagination::DEFAULT_PAGE_SIZE)
    }

    /// Cache options derived from `stale_time_ms`.
    pub fn cache_options(&self) -> QueryCacheOptions {
        QueryCacheOptions {
            stale_time: self.stale_time_ms.map(Duration::from_millis),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for dashboard configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 8] = [
        "DASHBOARD_READ_LATENCY_MS",
        "DASHBOARD_WRITE_LATENCY_MS",
        "DASHBOARD_MISSING_RECORD_POLICY",
        "DASHBOARD_SEED_ENABLED",
        "DASHBOARD_SEED",
        "DASHBOARD_CUSTOMER_COUNT",
        "DASHBOARD_PAGE_SIZE",
        "DASHBOARD_STALE_TIME_MS",
    ];

    fn load_from_empty_args() -> DashboardSettings {
        DashboardSettings::load_from_iter([OsString::from("dashboard")])
            .expect("config should load")
    }

    fn cleared_env() -> [(&'static str, Option<String>); 8] {
        VARS.map(|name| (name, None))
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(cleared_env());

        let settings = load_from_empty_args();
        assert_eq!(settings.latency(), StoreLatency::default());
        assert_eq!(
            settings.missing_record_policy(),
            Ok(MissingRecordPolicy::Ignore)
        );
        assert!(!settings.seed_enabled);
        assert_eq!(settings.seed(), DEFAULT_SEED);
        assert_eq!(settings.customer_count(), DEFAULT_CUSTOMER_COUNT);
        assert_eq!(settings.page_size(), 10);
        assert_eq!(settings.cache_options().stale_time, None);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let mut env = cleared_env();
        for (slot, value) in env.iter_mut().zip([
            "0", "25", "reject", "true", "7", "12", "20", "30000",
        ]) {
            slot.1 = Some(value.to_owned());
        }
        let _guard = lock_env(env);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.latency(),
            StoreLatency {
                read: Duration::ZERO,
                write: Duration::from_millis(25),
            }
        );
        assert_eq!(
            settings.missing_record_policy(),
            Ok(MissingRecordPolicy::Reject)
        );
        assert!(settings.seed_enabled);
        assert_eq!(settings.seed(), 7);
        assert_eq!(settings.customer_count(), 12);
        assert_eq!(settings.page_size(), 20);
        assert_eq!(
            settings.cache_options().stale_time,
            Some(Duration::from_secs(30))
        );
    }

    #[rstest]
    fn unknown_policy_is_an_error() {
        let mut env = cleared_env();
        env[2].1 = Some("upsert".to_owned());
        let _guard = lock_env(env);

        let settings = load_from_empty_args();
        assert!(settings.missing_record_policy().is_err());
    }
}
