pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, ContributorsArgs, LinksArgs};

pub use adapters::{http::HttpProbe, storage::LocalStorage};
pub use config::ValidationOptions;
pub use crate::core::{
    contributors::ContributorValidator, engine::ValidationEngine, links::LinkValidator,
};
pub use domain::report::{Finding, FindingKind, Severity, ValidationReport};
pub use utils::error::{CheckError, Result};
