use serde::{Deserialize, Serialize};
use serde_json::Value;

/// links.json 的頂層結構；每個分類保留原始 JSON，型別錯誤交給驗證器回報
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkCatalog {
    pub categories: Vec<Value>,
}

impl LinkCatalog {
    pub fn categories(&self) -> impl Iterator<Item = Category<'_>> {
        self.categories.iter().map(Category)
    }

    pub fn total_links(&self) -> usize {
        self.categories()
            .filter_map(|c| c.links())
            .map(<[Value]>::len)
            .sum()
    }
}

/// 單一分類的唯讀視圖
#[derive(Debug, Clone, Copy)]
pub struct Category<'a>(&'a Value);

impl<'a> Category<'a> {
    pub fn name(&self) -> Option<&'a str> {
        text(self.0.get("name"))
    }

    /// `links` 不是陣列時視同缺少
    pub fn links(&self) -> Option<&'a [Value]> {
        self.0.get("links")?.as_array().map(Vec::as_slice)
    }

    pub fn links_are_mistyped(&self) -> bool {
        is_mistyped(self.0.get("links"))
    }

    /// 有名稱且有 links 陣列才算結構完整
    pub fn is_well_formed(&self) -> bool {
        self.name().is_some() && self.links().is_some()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Link<'a>(&'a Value);

impl<'a> Link<'a> {
    pub fn new(raw: &'a Value) -> Self {
        Self(raw)
    }

    pub fn title(&self) -> Option<&'a str> {
        text(self.0.get("title"))
    }

    pub fn url(&self) -> Option<&'a str> {
        text(self.0.get("url"))
    }

    /// title 或 url 存在但不是字串，或整筆連結不是物件
    pub fn is_mistyped(&self) -> bool {
        !self.0.is_object() || is_mistyped(self.0.get("title")) || is_mistyped(self.0.get("url"))
    }

    pub fn raw(&self) -> &'a Value {
        self.0
    }
}

/// contributors.json 的頂層結構
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributorRoster {
    pub contributors: Vec<Value>,
}

impl ContributorRoster {
    pub fn contributors(&self) -> impl Iterator<Item = Contributor<'_>> {
        self.contributors.iter().map(Contributor)
    }
}

pub const REQUIRED_CONTRIBUTOR_FIELDS: [&str; 5] =
    ["name", "github", "avatar", "contributions", "role"];

/// 值必須是字串的欄位
pub const STRING_CONTRIBUTOR_FIELDS: [&str; 7] =
    ["name", "github", "avatar", "role", "linkedin", "website", "tagline"];

const KNOWN_CONTRIBUTOR_FIELDS: [&str; 8] = [
    "name",
    "github",
    "avatar",
    "role",
    "contributions",
    "linkedin",
    "website",
    "tagline",
];

/// 單一貢獻者的唯讀視圖
#[derive(Debug, Clone, Copy)]
pub struct Contributor<'a>(&'a Value);

impl<'a> Contributor<'a> {
    pub fn new(raw: &'a Value) -> Self {
        Self(raw)
    }

    pub fn is_object(&self) -> bool {
        self.0.is_object()
    }

    pub fn name(&self) -> Option<&'a str> {
        text(self.0.get("name"))
    }

    pub fn github(&self) -> Option<&'a str> {
        text(self.0.get("github"))
    }

    pub fn avatar(&self) -> Option<&'a str> {
        text(self.0.get("avatar"))
    }

    pub fn linkedin(&self) -> Option<&'a str> {
        text(self.0.get("linkedin"))
    }

    pub fn website(&self) -> Option<&'a str> {
        text(self.0.get("website"))
    }

    pub fn tagline(&self) -> Option<&'a str> {
        text(self.0.get("tagline"))
    }

    /// 保留原始 JSON，null 視同缺少
    pub fn contributions(&self) -> Option<&'a Value> {
        self.0.get("contributions").filter(|v| !v.is_null())
    }

    /// 回傳缺少或為空的必填欄位；型別錯誤的欄位不算缺少
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        REQUIRED_CONTRIBUTOR_FIELDS
            .iter()
            .copied()
            .filter(|field| match self.0.get(*field) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.is_empty(),
                Some(_) => false,
            })
            .collect()
    }

    /// 存在但不是字串的欄位
    pub fn mistyped_fields(&self) -> Vec<&'static str> {
        STRING_CONTRIBUTOR_FIELDS
            .iter()
            .copied()
            .filter(|field| is_mistyped(self.0.get(*field)))
            .collect()
    }

    /// 不在已知欄位清單中的欄位名稱
    pub fn unknown_fields(&self) -> impl Iterator<Item = &'a str> {
        self.0
            .as_object()
            .into_iter()
            .flat_map(|fields| fields.keys())
            .map(String::as_str)
            .filter(|key| !KNOWN_CONTRIBUTOR_FIELDS.contains(key))
    }

    pub fn display_name(&self) -> &'a str {
        self.name().unwrap_or("unnamed")
    }
}

fn text(value: Option<&Value>) -> Option<&str> {
    value?.as_str().filter(|v| !v.is_empty())
}

fn is_mistyped(value: Option<&Value>) -> bool {
    matches!(value, Some(v) if !v.is_null() && !v.is_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_fields_are_captured() {
        let raw = json!({
            "name": "Jane Doe",
            "github": "janedoe",
            "twitter": "@jane",
            "location": "Taipei"
        });

        let unknown: Vec<&str> = Contributor::new(&raw).unknown_fields().collect();
        assert_eq!(unknown, vec!["location", "twitter"]);
    }

    #[test]
    fn test_missing_required_fields() {
        let raw = json!({
            "name": "Jane Doe",
            "github": "",
            "contributions": []
        });

        assert_eq!(
            Contributor::new(&raw).missing_required_fields(),
            vec!["github", "avatar", "role"]
        );
    }

    #[test]
    fn test_wrongly_typed_fields_are_not_missing() {
        let raw = json!({
            "name": 7,
            "github": "janedoe",
            "avatar": "https://a.com/a.png",
            "role": ["Maintainer"],
            "contributions": [],
            "tagline": 42,
            "linkedin": null
        });
        let contributor = Contributor::new(&raw);

        assert!(contributor.missing_required_fields().is_empty());
        assert_eq!(contributor.mistyped_fields(), vec!["name", "role", "tagline"]);
        assert_eq!(contributor.name(), None);
        assert_eq!(contributor.display_name(), "unnamed");
    }

    #[test]
    fn test_catalog_counts_links_of_malformed_categories_as_zero() {
        let catalog: LinkCatalog = serde_json::from_value(json!({
            "categories": [
                {"name": "A", "links": [{"title": "X", "url": "https://a.com"}]},
                {"name": "B"},
                {"name": "C", "links": "oops"},
                "not a category"
            ]
        }))
        .unwrap();

        let categories: Vec<Category> = catalog.categories().collect();
        assert_eq!(catalog.total_links(), 1);
        assert!(categories[0].is_well_formed());
        assert!(!categories[1].is_well_formed());
        assert!(!categories[2].is_well_formed());
        assert!(categories[2].links_are_mistyped());
        assert!(!categories[3].is_well_formed());
    }

    #[test]
    fn test_link_with_numeric_title_is_mistyped() {
        let raw = json!({"title": 5, "url": "https://a.com"});
        let link = Link::new(&raw);

        assert_eq!(link.title(), None);
        assert!(link.is_mistyped());
        assert!(Link::new(&json!("https://a.com")).is_mistyped());
        assert!(!Link::new(&json!({"url": "https://a.com"})).is_mistyped());
    }
}
