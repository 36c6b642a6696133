#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use std::time::Duration;

pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_CONCURRENCY: usize = 10;
pub const MAX_CONCURRENCY: usize = 64;
pub const MAX_PROBE_TIMEOUT_SECS: u64 = 60;

/// 實驗性或 beta 服務，隨時可能下線
pub const DEFAULT_UNSTABLE_DOMAINS: [&str; 3] = [
    "jules.google.com",
    "labs.google/flow",
    "gemini.google.com/gem",
];

/// 兩個驗證器共用的單一路徑設定，quick 模式關掉網路、未知欄位與不穩定網域檢查
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    pub skip_reachability: bool,
    pub skip_unknown_field_warnings: bool,
    pub flag_unstable_domains: bool,
    pub probe_timeout: Duration,
    pub concurrency: usize,
    pub unstable_domains: Vec<String>,
    pub fail_on_unstable: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            skip_reachability: false,
            skip_unknown_field_warnings: false,
            flag_unstable_domains: true,
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
            concurrency: DEFAULT_CONCURRENCY,
            unstable_domains: DEFAULT_UNSTABLE_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            fail_on_unstable: false,
        }
    }
}

impl ValidationOptions {
    /// 只做離線的結構、重複與格式檢查，適合 pre-commit
    pub fn quick() -> Self {
        let mut options = Self::default();
        options.apply_quick();
        options
    }

    pub fn apply_quick(&mut self) {
        self.skip_reachability = true;
        self.skip_unknown_field_warnings = true;
        self.flag_unstable_domains = false;
    }

    pub fn is_unstable(&self, url: &str) -> bool {
        self.unstable_domains
            .iter()
            .any(|domain| url.contains(domain.as_str()))
    }
}

impl Validate for ValidationOptions {
    fn validate(&self) -> Result<()> {
        validate_range("reachability.concurrency", self.concurrency, 1, MAX_CONCURRENCY)?;
        validate_range(
            "reachability.timeout_seconds",
            self.probe_timeout.as_secs(),
            1,
            MAX_PROBE_TIMEOUT_SECS,
        )?;
        for domain in &self.unstable_domains {
            validate_non_empty_string("links.unstable_domains", domain)?;
        }
        Ok(())
    }
}
