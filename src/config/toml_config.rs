use crate::config::ValidationOptions;
use crate::utils::error::{CheckError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// 驗證器的 TOML 設定檔，所有區段都是選填
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub reachability: Option<ReachabilityConfig>,
    pub links: Option<LinksConfig>,
    pub contributors: Option<ContributorsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReachabilityConfig {
    pub enabled: Option<bool>,
    pub timeout_seconds: Option<u64>,
    pub concurrency: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinksConfig {
    pub unstable_domains: Option<Vec<String>>,
    pub fail_on_unstable: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContributorsConfig {
    pub warn_unknown_fields: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CheckError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${PROBE_TIMEOUT})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    /// 把檔案中有設定的值蓋到 options 上
    pub fn apply_to(&self, options: &mut ValidationOptions) {
        if let Some(reachability) = &self.reachability {
            if let Some(enabled) = reachability.enabled {
                options.skip_reachability = !enabled;
            }
            if let Some(timeout) = reachability.timeout_seconds {
                options.probe_timeout = Duration::from_secs(timeout);
            }
            if let Some(concurrency) = reachability.concurrency {
                options.concurrency = concurrency;
            }
        }

        if let Some(links) = &self.links {
            if let Some(domains) = &links.unstable_domains {
                options.unstable_domains = domains.clone();
            }
            if let Some(fail) = links.fail_on_unstable {
                options.fail_on_unstable = fail;
            }
        }

        if let Some(warn) = self
            .contributors
            .as_ref()
            .and_then(|c| c.warn_unknown_fields)
        {
            options.skip_unknown_field_warnings = !warn;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[reachability]
enabled = true
timeout_seconds = 8
concurrency = 4

[links]
unstable_domains = ["beta.example.com"]
fail_on_unstable = true

[contributors]
warn_unknown_fields = false
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let mut options = ValidationOptions::default();
        config.apply_to(&mut options);

        assert_eq!(options.probe_timeout, Duration::from_secs(8));
        assert_eq!(options.concurrency, 4);
        assert_eq!(options.unstable_domains, vec!["beta.example.com".to_string()]);
        assert!(options.fail_on_unstable);
        assert!(options.skip_unknown_field_warnings);
        assert!(!options.skip_reachability);
    }

    #[test]
    fn test_empty_config_keeps_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        let mut options = ValidationOptions::default();
        config.apply_to(&mut options);
        assert_eq!(options, ValidationOptions::default());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("CATALOG_CHECK_TEST_TIMEOUT", "12");
        let config =
            TomlConfig::from_toml_str("[reachability]\ntimeout_seconds = ${CATALOG_CHECK_TEST_TIMEOUT}\n")
                .unwrap();
        assert_eq!(config.reachability.unwrap().timeout_seconds, Some(12));
    }

    #[test]
    fn test_from_file_and_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[reachability]\nenabled = false").unwrap();
        let config = TomlConfig::from_file(file.path()).unwrap();
        let mut options = ValidationOptions::default();
        config.apply_to(&mut options);
        assert!(options.skip_reachability);

        assert!(matches!(
            TomlConfig::from_toml_str("[reachability"),
            Err(CheckError::TomlError(_))
        ));
    }
}
