use crate::adapters::http::HttpProbe;
use crate::adapters::storage::LocalStorage;
use crate::app::output::{render, OutputFormat};
use crate::config::cli::{Command, ContributorsArgs, LinksArgs};
use crate::config::ValidationOptions;
use crate::core::contributors::ContributorValidator;
use crate::core::engine::ValidationEngine;
use crate::core::links::LinkValidator;
use crate::core::loader::{load_catalog, load_roster};
use crate::domain::ports::Validator;
use crate::domain::report::ValidationReport;
use crate::utils::error::{CheckError, Result};
use crate::utils::validation::validate_path;

/// 讀檔或設定失敗時的退出碼
pub const INPUT_FAILURE_EXIT_CODE: i32 = 2;

async fn execute<V: Validator>(
    validator: V,
    options: ValidationOptions,
    format: OutputFormat,
) -> Result<ValidationReport> {
    let engine = ValidationEngine::new(validator, HttpProbe::new()?, options);
    let report = engine.run().await;
    println!("{}", render(&report, format)?);
    Ok(report)
}

pub async fn run_links(args: &LinksArgs) -> Result<i32> {
    validate_path("file", &args.file)?;
    let options = args.common.to_options()?;
    tracing::debug!("Link validation options: {:?}", options);

    let catalog = load_catalog(&LocalStorage::default(), &args.file).await?;
    let validator = LinkValidator::new(catalog, options.clone());
    let report = execute(validator, options, args.common.format).await?;
    Ok(report.exit_code())
}

pub async fn run_contributors(args: &ContributorsArgs) -> Result<i32> {
    validate_path("file", &args.file)?;
    let options = args.common.to_options()?;
    tracing::debug!("Contributor validation options: {:?}", options);

    let roster = load_roster(&LocalStorage::default(), &args.file).await?;
    let validator = ContributorValidator::new(roster, options.clone());
    let report = execute(validator, options, args.common.format).await?;
    Ok(report.exit_code())
}

pub async fn run_command(command: &Command) -> Result<i32> {
    match command {
        Command::Links(args) => run_links(args).await,
        Command::Contributors(args) => run_contributors(args).await,
    }
}

/// 把執行結果轉成退出碼；輸入或設定錯誤在驗證開始前就回報
pub fn exit_code(result: Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            report_error(&e);
            INPUT_FAILURE_EXIT_CODE
        }
    }
}

fn report_error(e: &CheckError) {
    tracing::error!("❌ {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::CommonArgs;
    use tempfile::TempDir;

    fn quick_links_args(file: String) -> LinksArgs {
        LinksArgs {
            file,
            common: CommonArgs {
                quick: true,
                ..CommonArgs::default()
            },
        }
    }

    #[tokio::test]
    async fn test_duplicate_catalog_exits_with_one() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("links.json");
        std::fs::write(
            &path,
            r#"{"categories": [
                {"name": "A", "links": [{"title": "X", "url": "https://a.com"}]},
                {"name": "B", "links": [{"title": "X", "url": "https://b.com"}]}
            ]}"#,
        )
        .unwrap();

        let args = quick_links_args(path.to_str().unwrap().to_string());
        assert_eq!(exit_code(run_links(&args).await), 1);
    }

    #[tokio::test]
    async fn test_unstable_domain_does_not_change_exit_code() {
        let temp_dir = TempDir::new().unwrap();
        let links = temp_dir.path().join("links.json");
        std::fs::write(
            &links,
            r#"{"categories": [
                {"name": "Agents", "links": [{"title": "Jules", "url": "https://jules.google.com"}]}
            ]}"#,
        )
        .unwrap();
        let config = temp_dir.path().join("validator.toml");
        std::fs::write(&config, "[reachability]\nenabled = false\n").unwrap();

        let mut args = LinksArgs {
            file: links.to_str().unwrap().to_string(),
            common: CommonArgs {
                config: Some(config.to_str().unwrap().to_string()),
                ..CommonArgs::default()
            },
        };
        assert_eq!(exit_code(run_links(&args).await), 0);

        args.common.fail_on_unstable = true;
        assert_eq!(exit_code(run_links(&args).await), 1);
    }

    #[tokio::test]
    async fn test_missing_file_exits_with_input_failure() {
        let args = quick_links_args("/nonexistent/links.json".to_string());
        assert_eq!(exit_code(run_links(&args).await), INPUT_FAILURE_EXIT_CODE);
    }

    #[tokio::test]
    async fn test_missing_top_level_key_is_input_failure() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contributors.json");
        std::fs::write(&path, r#"{"people": []}"#).unwrap();

        let args = ContributorsArgs {
            file: path.to_str().unwrap().to_string(),
            common: CommonArgs {
                quick: true,
                ..CommonArgs::default()
            },
        };
        let result = run_contributors(&args).await;
        assert!(matches!(result, Err(CheckError::InvalidDocument { .. })));
    }
}
