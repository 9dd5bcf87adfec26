use serde::Serialize;

use bugform_core::FormConfig;

use crate::cli::ConfigCommands;
use crate::config::ResolvedConfig;
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct ConfigReport<'a> {
    pub path: Option<String>,
    #[serde(flatten)]
    pub config: &'a FormConfig,
}

pub fn run_config(command: ConfigCommands, resolved: &ResolvedConfig) -> Result<(), CliError> {
    match command {
        ConfigCommands::Show { json } => {
            if json {
                println!("{}", render_config_json(resolved)?);
            } else {
                for line in format_config_lines(resolved) {
                    println!("{line}");
                }
            }
            Ok(())
        }
    }
}

pub fn render_config_json(resolved: &ResolvedConfig) -> Result<String, CliError> {
    let report = ConfigReport {
        path: resolved.path.as_ref().map(|path| path.display().to_string()),
        config: &resolved.config,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn format_config_lines(resolved: &ResolvedConfig) -> Vec<String> {
    let config = &resolved.config;
    let path = resolved
        .path
        .as_ref()
        .map_or_else(|| "(none)".to_string(), |path| path.display().to_string());
    let timeout = config
        .request_timeout_secs
        .map_or_else(|| "none".to_string(), |secs| format!("{secs}s"));

    vec![
        format!("Config file:      {path}"),
        format!("App name:         {}", config.app_name),
        format!("Endpoint:         {}", config.endpoint),
        format!("Attachment limit: {}", config.attachment_limit),
        format!("Page URL:         {}", config.page_url),
        format!("Request timeout:  {timeout}"),
    ]
}
