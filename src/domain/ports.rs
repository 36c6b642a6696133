use crate::domain::report::ValidationReport;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// 單次探測的完整結果，不會以錯誤形式往外拋
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeOutcome {
    Reachable { status: u16 },
    Timeout,
    Error { reason: String },
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeOutcome::Reachable { .. })
    }

    pub fn describe(&self) -> String {
        match self {
            ProbeOutcome::Reachable { status } => format!("HTTP {}", status),
            ProbeOutcome::Timeout => "timed out".to_string(),
            ProbeOutcome::Error { reason } => reason.clone(),
        }
    }
}

#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, url: &str, timeout: Duration) -> ProbeOutcome;
}

/// 要探測的 URL 以及它在報告中的標籤
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    pub url: String,
    pub label: String,
}

impl ProbeTarget {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
        }
    }
}

pub trait Validator: Send + Sync {
    fn name(&self) -> &'static str;

    /// 結構與重複檢查：接收累加器並傳回
    fn check_structure(&self, report: ValidationReport) -> ValidationReport;

    /// 第二階段要探測的 URL，依文件順序
    fn reachability_targets(&self) -> Vec<ProbeTarget>;
}
