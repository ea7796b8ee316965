use anyhow::{Context, Result};
use overspend_core::{AnalyzerConfig, TxnLabels};
use overspend_http::{DEFAULT_ENDPOINT, HttpConfig};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpSection,
    pub labels: TxnLabels,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSection {
    pub endpoint: String,
    /// Per-request timeout; unset means wait indefinitely.
    pub timeout_secs: Option<u64>,
    pub no_proxy: bool,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
            no_proxy: false,
        }
    }
}

impl Config {
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            endpoint: self.http.endpoint.clone(),
            timeout: self.http.timeout_secs.map(Duration::from_secs),
            no_proxy: self.http.no_proxy,
        }
    }

    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            labels: self.labels.clone(),
        }
    }
}

/// Load a TOML config file, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(p) = path else {
        return Ok(Config::default());
    };
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.http.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.http.timeout_secs, None);
        assert_eq!(cfg.labels, TxnLabels::default());
    }

    #[test]
    fn test_partial_sections() {
        let cfg = parse_config(
            r#"
[http]
endpoint = "http://localhost:9000/search"
timeout_secs = 5

[labels]
debit = "DR"
"#,
        )
        .unwrap();

        assert_eq!(cfg.http.endpoint, "http://localhost:9000/search");
        assert!(!cfg.http.no_proxy);
        assert_eq!(cfg.labels.debit, "DR");
        assert_eq!(cfg.labels.credit, "credit");

        let http = cfg.http_config();
        assert_eq!(http.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_bad_toml_is_error() {
        assert!(parse_config("[http\nendpoint=").is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = load_config(Some(Path::new("/nonexistent/overspend.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/overspend.toml"));
    }
}
