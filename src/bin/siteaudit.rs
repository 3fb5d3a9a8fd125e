use clap::Parser;
use siteaudit::audit::{AuditControl, run_report};
use siteaudit::config::{CliConfig, Config};
use siteaudit::core::constants::output_formats;
use siteaudit::reporting::AuditReport;
use siteaudit::reporting::logging;
use siteaudit::ui::output;
use siteaudit::ui::{Cli, ProgressReporter, cli_to_config, cli_to_request};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run_siteaudit_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Main audit logic extracted from main() for testing
pub async fn run_siteaudit_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);
    let config = load_and_merge_config(&cli_config)?;

    let output_settings = setup_output_settings(&cli_config, &config);
    logging::init_logger(output_settings.verbose, output_settings.quiet);
    logging::log_config_info(&config);

    let control = AuditControl::new();
    cancel_on_ctrl_c(control.clone());

    let request = cli_to_request(cli);
    let mut progress = create_progress_reporter(&output_settings);

    let report = run_report(&request, &config, control, progress.as_mut()).await?;
    finalize_progress_reporter(progress);

    output::display_report(&report, &output_settings.output_format);
    Ok(determine_exit_code(&report))
}

/// Load configuration from file or standard locations, then overlay the
/// environment and CLI arguments (CLI takes precedence)
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    config.apply_env();
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// Settings for output formatting and display
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub output_format: String,
    pub show_progress: bool,
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    let quiet = cli_config.quiet;
    let output_format = config
        .output_format
        .as_deref()
        .unwrap_or(output_formats::DEFAULT)
        .to_string();

    OutputSettings {
        quiet,
        verbose: config.verbose.unwrap_or(false),
        show_progress: !quiet && !cli_config.no_progress && output_format == output_formats::TEXT,
        output_format,
    }
}

/// Cancel the run on the first Ctrl-C; the partial report is still printed
fn cancel_on_ctrl_c(control: AuditControl) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("Cancelling audit...");
            control.cancel();
        }
    });
}

/// Create progress reporter if needed
pub fn create_progress_reporter(output_settings: &OutputSettings) -> Option<ProgressReporter> {
    output_settings
        .show_progress
        .then(|| ProgressReporter::new(true))
}

/// Finalize progress reporting
pub fn finalize_progress_reporter(progress: Option<ProgressReporter>) {
    if let Some(ref progress) = progress {
        progress.finish_and_clear();
    }
}

/// 1 when the report has rows, 0 otherwise
pub fn determine_exit_code(report: &AuditReport) -> i32 {
    if report.has_matches() { 1 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteaudit::reporting::{ReportKind, ReportRow, TextMatchRow};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_and_merge_config_no_config_flag() {
        let cli_config = CliConfig {
            no_config: true,
            timeout: Some(7),
            ..Default::default()
        };

        let config = load_and_merge_config(&cli_config).unwrap();

        assert_eq!(config.timeout, Some(7));
    }

    #[test]
    fn test_load_and_merge_config_with_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("siteaudit.toml");
        fs::write(&config_path, "page_timeout = 45\nconcurrency = 6\n").unwrap();

        let cli_config = CliConfig {
            config_file: Some(config_path.to_string_lossy().to_string()),
            concurrency: Some(2),
            ..Default::default()
        };

        let config = load_and_merge_config(&cli_config).unwrap();
        assert_eq!(config.page_timeout, Some(45));
        assert_eq!(config.concurrency, Some(2));
    }

    #[test]
    fn test_load_and_merge_config_invalid_file() {
        let cli_config = CliConfig {
            config_file: Some("/nonexistent/config.toml".to_string()),
            ..Default::default()
        };

        assert!(load_and_merge_config(&cli_config).is_err());
    }

    #[test]
    fn test_load_and_merge_config_rejects_invalid_cli_values() {
        let cli_config = CliConfig {
            no_config: true,
            concurrency: Some(0),
            ..Default::default()
        };

        assert!(load_and_merge_config(&cli_config).is_err());
    }

    #[test]
    fn test_setup_output_settings() {
        let config = Config::default();

        let settings = setup_output_settings(&CliConfig::default(), &config);
        assert!(settings.show_progress);
        assert_eq!(settings.output_format, output_formats::TEXT);

        let quiet = CliConfig {
            quiet: true,
            ..Default::default()
        };
        assert!(!setup_output_settings(&quiet, &config).show_progress);

        let json = Config {
            output_format: Some(output_formats::JSON.to_string()),
            ..Default::default()
        };
        assert!(!setup_output_settings(&CliConfig::default(), &json).show_progress);
    }

    #[test]
    fn test_determine_exit_code() {
        let empty = AuditReport::without_rows(ReportKind::FindText, "nothing");
        assert_eq!(determine_exit_code(&empty), 0);

        let mut found = empty.clone();
        found.rows.push(ReportRow::TextMatch(TextMatchRow {
            url: "https://example.com".to_string(),
        }));
        assert_eq!(determine_exit_code(&found), 1);
    }
}
