use crate::config::ValidationOptions;
use crate::domain::model::{Contributor, ContributorRoster};
use crate::domain::ports::{ProbeTarget, Validator};
use crate::domain::report::{Finding, FindingKind, ValidationReport};
use crate::utils::validation::check_https_url;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

static GITHUB_USERNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9-])*[a-zA-Z0-9]$").expect("github pattern is valid")
});
static LINKEDIN_USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9-]+$").expect("linkedin pattern is valid"));

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;
const LINKEDIN_MIN: usize = 3;
const LINKEDIN_MAX: usize = 100;
const TAGLINE_MIN: usize = 3;
const TAGLINE_MAX: usize = 100;
const CONTRIBUTION_MIN: usize = 10;

/// 每次執行時已見過的唯一鍵，只存在於單次驗證內
#[derive(Default)]
struct SeenKeys<'a> {
    names: HashSet<String>,
    github: HashSet<String>,
    avatars: HashSet<&'a str>,
}

/// 檢查 contributors.json 的欄位、格式與唯一性
pub struct ContributorValidator {
    roster: ContributorRoster,
    options: ValidationOptions,
}

impl ContributorValidator {
    pub fn new(roster: ContributorRoster, options: ValidationOptions) -> Self {
        Self { roster, options }
    }

    fn check_contributor<'a>(
        &self,
        contributor: Contributor<'a>,
        location: &str,
        seen: &mut SeenKeys<'a>,
        report: &mut ValidationReport,
    ) {
        if !contributor.is_object() {
            report.push(Finding::fatal(
                FindingKind::WrongType,
                location,
                "Contributor entry should be an object",
            ));
            return;
        }

        for field in contributor.missing_required_fields() {
            report.push(Finding::fatal(
                FindingKind::MissingField,
                location,
                format!("Missing required field: {}", field),
            ));
        }

        for field in contributor.mistyped_fields() {
            let message = format!("Field {} should be a string", field);
            // tagline 只有軟性規則
            if field == "tagline" {
                report.push(Finding::warning(FindingKind::WrongType, location, message));
            } else {
                report.push(Finding::fatal(FindingKind::WrongType, location, message));
            }
        }

        if !self.options.skip_unknown_field_warnings {
            for field in contributor.unknown_fields() {
                report.push(Finding::warning(
                    FindingKind::UnknownField,
                    location,
                    format!("Unknown field: {}", field),
                ));
            }
        }

        if let Some(name) = contributor.name() {
            if !seen.names.insert(name.to_lowercase()) {
                report.push(Finding::fatal(
                    FindingKind::DuplicateName,
                    location,
                    format!("Duplicate contributor name: {}", name),
                ));
            }

            let length = name.chars().count();
            if length < NAME_MIN {
                report.push(Finding::fatal(
                    FindingKind::NameTooShort,
                    location,
                    format!("Name too short: {}", name),
                ));
            }
            if length > NAME_MAX {
                report.push(Finding::warning(
                    FindingKind::NameTooLong,
                    location,
                    format!("Name very long: {}", name),
                ));
            }
        }

        if let Some(github) = contributor.github() {
            if !seen.github.insert(github.to_lowercase()) {
                report.push(Finding::fatal(
                    FindingKind::DuplicateGithub,
                    location,
                    format!("Duplicate GitHub username: {}", github),
                ));
            }

            if github.chars().count() > 1 && !GITHUB_USERNAME.is_match(github) {
                report.push(Finding::warning(
                    FindingKind::GithubFormat,
                    location,
                    format!("GitHub username format may be invalid: {}", github),
                ));
            }
        }

        if let Some(avatar) = contributor.avatar() {
            if !seen.avatars.insert(avatar) {
                report.push(Finding::warning(
                    FindingKind::DuplicateAvatar,
                    location,
                    format!("Duplicate avatar URL: {}", avatar),
                ));
            }

            if let Err(reason) = check_https_url(avatar) {
                report.push(Finding::fatal(
                    FindingKind::InvalidAvatarUrl,
                    location,
                    format!("Invalid avatar URL: {} ({})", reason, avatar),
                ));
            }
        }

        if let Some(linkedin) = contributor.linkedin() {
            check_linkedin(linkedin, location, report);
        }

        if let Some(website) = contributor.website() {
            if let Err(reason) = check_https_url(website) {
                report.push(Finding::fatal(
                    FindingKind::InvalidWebsiteUrl,
                    location,
                    format!("Invalid website URL: {} ({})", reason, website),
                ));
            }
        }

        if let Some(tagline) = contributor.tagline() {
            let length = tagline.chars().count();
            if length > TAGLINE_MAX {
                report.push(Finding::warning(
                    FindingKind::TaglineLength,
                    location,
                    format!("Tagline very long ({} chars): {}", length, tagline),
                ));
            }
            if length < TAGLINE_MIN {
                report.push(Finding::warning(
                    FindingKind::TaglineLength,
                    location,
                    format!("Tagline very short: {}", tagline),
                ));
            }
        }

        match contributor.contributions() {
            None => {}
            Some(Value::Array(items)) => check_contributions(items, location, report),
            Some(_) => report.push(Finding::fatal(
                FindingKind::ContributionsNotArray,
                location,
                "Contributions should be an array",
            )),
        }
    }
}

fn check_linkedin(linkedin: &str, location: &str, report: &mut ValidationReport) {
    if linkedin.contains("linkedin.com") || linkedin.contains("://") {
        report.push(Finding::fatal(
            FindingKind::LinkedinFullUrl,
            location,
            format!(
                "LinkedIn should be username only, not full URL: {} (expected e.g. \"john-doe\")",
                linkedin
            ),
        ));
        return;
    }

    if !LINKEDIN_USERNAME.is_match(linkedin) {
        report.push(Finding::fatal(
            FindingKind::LinkedinFormat,
            location,
            format!(
                "LinkedIn username format invalid: {} (only letters, numbers and hyphens)",
                linkedin
            ),
        ));
    }

    let length = linkedin.chars().count();
    if length < LINKEDIN_MIN {
        report.push(Finding::fatal(
            FindingKind::LinkedinLength,
            location,
            format!("LinkedIn username too short: {}", linkedin),
        ));
    }
    if length > LINKEDIN_MAX {
        report.push(Finding::fatal(
            FindingKind::LinkedinLength,
            location,
            format!("LinkedIn username too long: {}", linkedin),
        ));
    }
}

fn check_contributions(items: &[Value], location: &str, report: &mut ValidationReport) {
    if items.is_empty() {
        report.push(Finding::warning(
            FindingKind::NoContributions,
            location,
            "No contributions listed",
        ));
    }

    for (index, item) in items.iter().enumerate() {
        match item.as_str() {
            None => report.push(Finding::warning(
                FindingKind::ContributionInvalid,
                location,
                format!("Contribution {} should be a string", index + 1),
            )),
            Some(text) if text.chars().count() < CONTRIBUTION_MIN => {
                report.push(Finding::warning(
                    FindingKind::ContributionInvalid,
                    location,
                    format!("Contribution {} very short: {}", index + 1, text),
                ))
            }
            Some(_) => {}
        }
    }
}

impl Validator for ContributorValidator {
    fn name(&self) -> &'static str {
        "contributors"
    }

    fn check_structure(&self, mut report: ValidationReport) -> ValidationReport {
        let mut seen = SeenKeys::default();

        for (index, contributor) in self.roster.contributors().enumerate() {
            let location = format!("contributor #{} ({})", index + 1, contributor.display_name());
            tracing::debug!("🔍 Validating {}", location);
            self.check_contributor(contributor, &location, &mut seen, &mut report);
        }

        report.set_counter("contributors", self.roster.contributors.len());
        report.set_counter("unique_names", seen.names.len());
        report.set_counter("unique_github", seen.github.len());
        report
    }

    fn reachability_targets(&self) -> Vec<ProbeTarget> {
        let mut targets = Vec::new();
        for contributor in self.roster.contributors() {
            let name = contributor.display_name();
            let urls = [("avatar", contributor.avatar()), ("website", contributor.website())];
            for (kind, url) in urls {
                if let Some(url) = url.filter(|u| Url::parse(u).is_ok()) {
                    targets.push(ProbeTarget::new(url, format!("{} {}", name, kind)));
                }
            }
        }
        targets
    }
}
