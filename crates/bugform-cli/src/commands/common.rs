use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use bugform_core::util::normalize_text_option;
use bugform_core::{AttachmentFile, FormConfig, LaunchContext};

use crate::cli::LaunchArgs;
use crate::error::CliError;

/// Launch context from `--launch-url`, or from the configured page URL plus
/// the individual launch flags.
pub fn resolve_launch(config: &FormConfig, args: &LaunchArgs) -> Result<LaunchContext, CliError> {
    if let Some(url) = normalize_text_option(args.launch_url.clone()) {
        return Ok(LaunchContext::parse(&url)?);
    }

    Ok(LaunchContext::from_parts(
        &config.page_url,
        args.app_name.as_deref(),
        args.app_version.as_deref(),
        args.browser.as_deref(),
    )?)
}

/// Read every file up front so a bad path fails before anything is staged.
pub fn read_attachment_files(paths: &[PathBuf]) -> Result<Vec<AttachmentFile>, CliError> {
    paths
        .iter()
        .map(|path| {
            AttachmentFile::from_path(path).map_err(|error| {
                CliError::Config(format!(
                    "Failed to read attachment {}: {error}",
                    path.display()
                ))
            })
        })
        .collect()
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_text_option(Some(buffer)))
}
