use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// 驗證結果的兩層分類：Fatal 會讓整體失敗，Warning 只回報
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Fatal,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    // links
    InvalidCategory,
    MissingField,
    DuplicateTitle,
    DuplicateUrl,
    UnstableDomain,
    // contributors
    UnknownField,
    DuplicateName,
    NameTooShort,
    NameTooLong,
    DuplicateGithub,
    GithubFormat,
    DuplicateAvatar,
    InvalidAvatarUrl,
    LinkedinFullUrl,
    LinkedinFormat,
    LinkedinLength,
    InvalidWebsiteUrl,
    TaglineLength,
    ContributionsNotArray,
    ContributionInvalid,
    NoContributions,
    // shared
    WrongType,
    Unreachable,
}

impl FindingKind {
    pub fn label(&self) -> &'static str {
        match self {
            FindingKind::InvalidCategory => "invalid category",
            FindingKind::MissingField => "missing field",
            FindingKind::DuplicateTitle => "duplicate title",
            FindingKind::DuplicateUrl => "duplicate url",
            FindingKind::UnstableDomain => "unstable domain",
            FindingKind::UnknownField => "unknown field",
            FindingKind::DuplicateName => "duplicate name",
            FindingKind::NameTooShort => "name too short",
            FindingKind::NameTooLong => "name very long",
            FindingKind::DuplicateGithub => "duplicate github",
            FindingKind::GithubFormat => "github format",
            FindingKind::DuplicateAvatar => "duplicate avatar",
            FindingKind::InvalidAvatarUrl => "invalid avatar url",
            FindingKind::LinkedinFullUrl => "linkedin full url",
            FindingKind::LinkedinFormat => "linkedin format",
            FindingKind::LinkedinLength => "linkedin length",
            FindingKind::InvalidWebsiteUrl => "invalid website url",
            FindingKind::TaglineLength => "tagline length",
            FindingKind::ContributionsNotArray => "contributions not array",
            FindingKind::ContributionInvalid => "contribution invalid",
            FindingKind::NoContributions => "no contributions",
            FindingKind::WrongType => "wrong type",
            FindingKind::Unreachable => "unreachable",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub kind: FindingKind,
    /// 發生位置，例如 `category "AI Chat"` 或 `contributor #3 (Jane)`
    pub location: String,
    pub message: String,
}

impl Finding {
    pub fn fatal(kind: FindingKind, location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Fatal,
            kind,
            location: location.into(),
            message: message.into(),
        }
    }

    pub fn warning(
        kind: FindingKind,
        location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            location: location.into(),
            message: message.into(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

/// 單次驗證的累加結果，由每個驗證步驟傳入並傳回
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub validator: String,
    pub findings: Vec<Finding>,
    pub counters: BTreeMap<String, usize>,
}

impl ValidationReport {
    pub fn new(validator: impl Into<String>) -> Self {
        Self {
            validator: validator.into(),
            findings: Vec::new(),
            counters: BTreeMap::new(),
        }
    }

    pub fn push(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Fatal => tracing::debug!("fatal [{}] {}", finding.kind, finding.message),
            Severity::Warning => tracing::debug!("warning [{}] {}", finding.kind, finding.message),
        }
        self.findings.push(finding);
    }

    pub fn set_counter(&mut self, name: &str, value: usize) {
        self.counters.insert(name.to_string(), value);
    }

    pub fn counter(&self, name: &str) -> usize {
        self.counters.get(name).copied().unwrap_or(0)
    }

    pub fn fatals(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_fatal())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| !f.is_fatal())
    }

    pub fn fatal_count(&self) -> usize {
        self.fatals().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn count_of(&self, kind: FindingKind) -> usize {
        self.findings.iter().filter(|f| f.kind == kind).count()
    }

    /// 各種 warning 的數量，依種類排序
    pub fn warning_breakdown(&self) -> BTreeMap<FindingKind, usize> {
        let mut breakdown = BTreeMap::new();
        for finding in self.warnings() {
            *breakdown.entry(finding.kind).or_insert(0) += 1;
        }
        breakdown
    }

    pub fn is_ok(&self) -> bool {
        self.fatal_count() == 0
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_ok() {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_do_not_fail_report() {
        let mut report = ValidationReport::new("links");
        report.push(Finding::warning(
            FindingKind::UnstableDomain,
            "category \"A\"",
            "unstable",
        ));
        report.push(Finding::warning(FindingKind::Unreachable, "X", "down"));

        assert!(report.is_ok());
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.warning_count(), 2);
        assert_eq!(report.warning_breakdown().get(&FindingKind::Unreachable), Some(&1));
    }

    #[test]
    fn test_single_fatal_fails_report() {
        let mut report = ValidationReport::new("contributors");
        report.push(Finding::fatal(FindingKind::DuplicateName, "#2", "dup"));

        assert!(!report.is_ok());
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.fatal_count(), 1);
        assert_eq!(report.count_of(FindingKind::DuplicateName), 1);
    }

    #[test]
    fn test_counters_default_to_zero() {
        let mut report = ValidationReport::new("links");
        report.set_counter("categories", 3);
        assert_eq!(report.counter("categories"), 3);
        assert_eq!(report.counter("unknown"), 0);
    }
}
