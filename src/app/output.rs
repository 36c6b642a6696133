use crate::domain::report::{Finding, Severity, ValidationReport};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn render(report: &ValidationReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => render_json(report, Utc::now()),
    }
}

/// 人類可讀的逐行報告
pub fn render_text(report: &ValidationReport) -> String {
    let rule = "=".repeat(50);
    let mut lines = vec![
        format!("🔍 {} validation", report.validator),
        rule.clone(),
        "📊 OVERVIEW:".to_string(),
    ];

    for (name, value) in &report.counters {
        lines.push(format!("   {}: {}", name.replace('_', " "), value));
    }

    if !report.findings.is_empty() {
        lines.push(String::new());
        lines.push("📋 FINDINGS:".to_string());
        lines.push("-".repeat(30));
        lines.extend(report.findings.iter().map(finding_line));
    }

    lines.push(String::new());
    lines.push(rule);

    let warnings = report.warning_count();
    if warnings > 0 {
        lines.push(format!("⚠️  WARNINGS ({} total):", warnings));
        for (kind, count) in report.warning_breakdown() {
            lines.push(format!("   • {} {}", count, kind));
        }
    }

    if !report.is_ok() {
        lines.push(format!(
            "❌ VALIDATION FAILED! {} critical error(s) must be fixed.",
            report.fatal_count()
        ));
    } else if warnings > 0 {
        lines.push(format!(
            "✅ VALIDATION PASSED WITH WARNINGS ({} to review)",
            warnings
        ));
    } else {
        lines.push("🎉 VALIDATION PASSED! No errors or warnings found.".to_string());
    }

    lines.join("\n")
}

fn finding_line(finding: &Finding) -> String {
    let marker = match finding.severity {
        Severity::Fatal => "❌",
        Severity::Warning => "⚠️ ",
    };
    format!("{} [{}] {}", marker, finding.location, finding.message)
}

#[derive(Serialize)]
struct JsonReport<'a> {
    validator: &'a str,
    generated_at: DateTime<Utc>,
    ok: bool,
    fatal_count: usize,
    warning_count: usize,
    counters: &'a BTreeMap<String, usize>,
    findings: &'a [Finding],
}

pub fn render_json(report: &ValidationReport, generated_at: DateTime<Utc>) -> Result<String> {
    let json = JsonReport {
        validator: &report.validator,
        generated_at,
        ok: report.is_ok(),
        fatal_count: report.fatal_count(),
        warning_count: report.warning_count(),
        counters: &report.counters,
        findings: &report.findings,
    };
    Ok(serde_json::to_string_pretty(&json)?)
}
