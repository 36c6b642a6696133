use crate::domain::model::{ContributorRoster, LinkCatalog};
use crate::domain::ports::Storage;
use crate::utils::error::{CheckError, Result};
use serde::de::DeserializeOwned;

/// 解析 JSON 文件；語法錯誤或缺少頂層鍵都視為無法驗證
pub fn parse_document<T: DeserializeOwned>(path: &str, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| CheckError::InvalidDocument {
        path: path.to_string(),
        message: e.to_string(),
    })
}

pub async fn load_document<S: Storage, T: DeserializeOwned>(storage: &S, path: &str) -> Result<T> {
    let bytes = storage.read_file(path).await?;
    tracing::debug!("Loaded {} ({} bytes)", path, bytes.len());
    parse_document(path, &bytes)
}

pub async fn load_catalog<S: Storage>(storage: &S, path: &str) -> Result<LinkCatalog> {
    let catalog: LinkCatalog = load_document(storage, path).await?;
    tracing::info!(
        "📊 Found {} categories, {} links",
        catalog.categories.len(),
        catalog.total_links()
    );
    Ok(catalog)
}

pub async fn load_roster<S: Storage>(storage: &S, path: &str) -> Result<ContributorRoster> {
    let roster: ContributorRoster = load_document(storage, path).await?;
    tracing::info!("👥 Found {} contributors", roster.contributors.len());
    Ok(roster)
}
