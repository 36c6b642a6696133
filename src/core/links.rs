use crate::config::ValidationOptions;
use crate::domain::model::{Link, LinkCatalog};
use crate::domain::ports::{ProbeTarget, Validator};
use crate::domain::report::{Finding, FindingKind, ValidationReport};
use std::collections::{HashMap, HashSet};

/// 檢查 links.json：標題與 URL 必須全域唯一，並標出不穩定的網域
pub struct LinkValidator {
    catalog: LinkCatalog,
    options: ValidationOptions,
}

impl LinkValidator {
    pub fn new(catalog: LinkCatalog, options: ValidationOptions) -> Self {
        Self { catalog, options }
    }

    /// 依文件順序列出結構完整的 (分類名稱, title, url)
    fn indexable_links(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.catalog
            .categories()
            .filter_map(|category| {
                let name = category.name()?;
                let links = category.links()?;
                Some(links.iter().map(move |link| (name, Link::new(link))))
            })
            .flatten()
            .filter_map(|(name, link)| {
                let (title, url) = link_keys(&link)?;
                Some((name, title, url))
            })
    }
}

fn link_keys<'a>(link: &Link<'a>) -> Option<(&'a str, &'a str)> {
    Some((link.title()?, link.url()?))
}

impl Validator for LinkValidator {
    fn name(&self) -> &'static str {
        "links"
    }

    fn check_structure(&self, mut report: ValidationReport) -> ValidationReport {
        // title -> 第一次出現的分類, url -> 第一次出現的標題
        let mut title_index: HashMap<&str, &str> = HashMap::new();
        let mut url_index: HashMap<&str, &str> = HashMap::new();
        let mut unstable = 0;

        for (position, category) in self.catalog.categories().enumerate() {
            let (name, links) = match (category.name(), category.links()) {
                (Some(name), Some(links)) => (name, links),
                (name, _) => {
                    let detail = if category.links_are_mistyped() {
                        "links must be an array"
                    } else {
                        "name and links are required"
                    };
                    report.push(Finding::fatal(
                        FindingKind::InvalidCategory,
                        format!("category #{}", position + 1),
                        format!(
                            "Invalid category structure: {} ({})",
                            name.unwrap_or("unnamed category"),
                            detail
                        ),
                    ));
                    continue;
                }
            };

            tracing::debug!("📁 Checking category: {} ({} links)", name, links.len());

            for (index, raw) in links.iter().enumerate() {
                let location = format!("category \"{}\" link #{}", name, index + 1);
                let link = Link::new(raw);

                if link.is_mistyped() {
                    report.push(Finding::fatal(
                        FindingKind::WrongType,
                        location,
                        format!("Link title and URL should be strings: {}", raw),
                    ));
                    continue;
                }

                let Some((title, url)) = link_keys(&link) else {
                    report.push(Finding::fatal(
                        FindingKind::MissingField,
                        location,
                        format!("Missing title or URL in link: {}", raw),
                    ));
                    continue;
                };

                match title_index.get(title) {
                    Some(first_category) => report.push(Finding::fatal(
                        FindingKind::DuplicateTitle,
                        location.clone(),
                        format!(
                            "Duplicate title \"{}\": first found in \"{}\", duplicate in \"{}\"",
                            title, first_category, name
                        ),
                    )),
                    None => {
                        title_index.insert(title, name);
                    }
                }

                match url_index.get(url) {
                    Some(first_title) => report.push(Finding::fatal(
                        FindingKind::DuplicateUrl,
                        location.clone(),
                        format!(
                            "Duplicate URL {}: first used by \"{}\", duplicate in \"{}\"",
                            url, first_title, title
                        ),
                    )),
                    None => {
                        url_index.insert(url, title);
                    }
                }

                if self.options.flag_unstable_domains && self.options.is_unstable(url) {
                    unstable += 1;
                    let message = format!(
                        "Unstable domain for \"{}\": {} (experimental/beta service, may become unavailable)",
                        title, url
                    );
                    if self.options.fail_on_unstable {
                        report.push(Finding::fatal(FindingKind::UnstableDomain, location, message));
                    } else {
                        report.push(Finding::warning(FindingKind::UnstableDomain, location, message));
                    }
                }
            }
        }

        report.set_counter("categories", self.catalog.categories.len());
        report.set_counter("total_links", self.catalog.total_links());
        report.set_counter("unique_titles", title_index.len());
        report.set_counter("unique_urls", url_index.len());
        report.set_counter("unstable", unstable);
        report
    }

    fn reachability_targets(&self) -> Vec<ProbeTarget> {
        let mut seen = HashSet::new();
        self.indexable_links()
            .filter(|(_, _, url)| seen.insert(*url))
            .map(|(_, title, url)| ProbeTarget::new(url, title))
            .collect()
    }
}
