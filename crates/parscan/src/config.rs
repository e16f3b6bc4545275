//! Scan configuration, loadable from TOML.
//!
//! ```toml
//! workers = 8
//! backend = "pool"     # or "scoped"
//! pool_threads = 8     # optional, defaults to the hardware thread count
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ScanError;
use crate::exec::{available_workers, Backend, ScopedThreads, WorkerPool};

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Fresh scoped threads for every phase.
    Scoped,
    /// Reusable bounded worker pool.
    #[default]
    Pool,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Requested worker count; normalized per call against the input length.
    pub workers: i32,
    pub backend: BackendKind,
    pub pool_threads: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: i32::try_from(available_workers()).unwrap_or(i32::MAX),
            backend: BackendKind::default(),
            pool_threads: None,
        }
    }
}

impl ScanConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ScanError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScanError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScanError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Build the executor this config selects.
    pub fn executor(&self) -> Result<Backend, ScanError> {
        Ok(match self.backend {
            BackendKind::Scoped => Backend::Scoped(ScopedThreads),
            BackendKind::Pool => Backend::Pool(WorkerPool::new(self.pool_threads)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::from_toml_str("").unwrap();
        assert_eq!(config, ScanConfig::default());
        assert_eq!(config.backend, BackendKind::Pool);
        assert!(config.workers >= 1);
    }

    #[test]
    fn test_parse_full() {
        let config = ScanConfig::from_toml_str(
            r#"
workers = 16
backend = "scoped"
pool_threads = 4
"#,
        )
        .unwrap();
        assert_eq!(
            config,
            ScanConfig {
                workers: 16,
                backend: BackendKind::Scoped,
                pool_threads: Some(4),
            }
        );
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let err = ScanConfig::from_toml_str("threads = 4").unwrap_err();
        assert!(matches!(err, ScanError::ConfigParse(_)));

        let err = ScanConfig::from_toml_str(r#"backend = "gpu""#).unwrap_err();
        assert!(matches!(err, ScanError::ConfigParse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ScanConfig::load(Path::new("/nonexistent/parscan.toml")).unwrap_err();
        assert!(matches!(err, ScanError::ConfigRead { .. }));
    }

    #[test]
    fn test_executor_selection() {
        let scoped = ScanConfig {
            backend: BackendKind::Scoped,
            ..ScanConfig::default()
        };
        assert!(matches!(scoped.executor().unwrap(), Backend::Scoped(_)));

        let pool = ScanConfig {
            backend: BackendKind::Pool,
            pool_threads: Some(2),
            ..ScanConfig::default()
        };
        match pool.executor().unwrap() {
            Backend::Pool(pool) => assert_eq!(pool.threads(), 2),
            other => panic!("expected pool backend, got {other:?}"),
        }
    }
}
