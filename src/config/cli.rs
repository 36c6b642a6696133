use crate::app::output::OutputFormat;
use crate::config::toml_config::TomlConfig;
use crate::config::ValidationOptions;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::{Args, Parser, Subcommand};
use std::time::Duration;

/// 兩個驗證器共用的旗標
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Offline checks only: skip network reachability, unstable-domain flags and unknown-field warnings
    #[arg(long, alias = "duplicates-only")]
    pub quick: bool,

    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Per-URL probe timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Maximum number of probes in flight
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Treat unstable domains as fatal
    #[arg(long)]
    pub fail_on_unstable: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// 預設值 <- 設定檔 <- 命令列
    pub fn to_options(&self) -> Result<ValidationOptions> {
        let mut options = ValidationOptions::default();

        if let Some(path) = &self.config {
            validate_path("config", path)?;
            TomlConfig::from_file(path)?.apply_to(&mut options);
        }

        if let Some(timeout) = self.timeout {
            options.probe_timeout = Duration::from_secs(timeout);
        }
        if let Some(concurrency) = self.concurrency {
            options.concurrency = concurrency;
        }
        if self.fail_on_unstable {
            options.fail_on_unstable = true;
        }
        if self.quick {
            options.apply_quick();
        }

        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(about = "Validate links.json for duplicates, unstable domains and dead URLs")]
pub struct LinksArgs {
    /// Path to the links document
    #[arg(short, long, default_value = "links.json")]
    pub file: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Clone, Parser)]
#[command(about = "Validate contributors.json structure and data")]
pub struct ContributorsArgs {
    /// Path to the contributors document
    #[arg(short, long, default_value = "contributors.json")]
    pub file: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "catalog-check")]
#[command(about = "Validate the AI tools directory data files")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Validate the link catalog
    Links(LinksArgs),
    /// Validate the contributor roster
    Contributors(ContributorsArgs),
}

impl Command {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Command::Links(args) => &args.common,
            Command::Contributors(args) => &args.common,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_only_alias_enables_quick_mode() {
        let args = LinksArgs::parse_from(["validate-links", "--duplicates-only"]);
        assert!(args.common.quick);
        assert_eq!(args.file, "links.json");

        let options = args.common.to_options().unwrap();
        assert!(options.skip_reachability);
        assert!(options.skip_unknown_field_warnings);
        assert!(!options.flag_unstable_domains);
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = ContributorsArgs::parse_from([
            "validate-contributors",
            "--file",
            "data/contributors.json",
            "--timeout",
            "3",
            "--concurrency",
            "2",
            "--format",
            "json",
        ]);
        let options = args.common.to_options().unwrap();

        assert_eq!(args.file, "data/contributors.json");
        assert_eq!(args.common.format, OutputFormat::Json);
        assert_eq!(options.probe_timeout, Duration::from_secs(3));
        assert_eq!(options.concurrency, 2);
        assert!(!options.skip_reachability);
    }

    #[test]
    fn test_out_of_range_concurrency_is_rejected() {
        let args = LinksArgs::parse_from(["validate-links", "--concurrency", "0"]);
        assert!(args.common.to_options().is_err());
    }

    #[test]
    fn test_subcommands() {
        let cli = CliConfig::parse_from(["catalog-check", "contributors", "--quick"]);
        assert!(matches!(cli.command, Command::Contributors(_)));
        assert!(cli.command.common().quick);
    }
}
