use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bugform")]
#[command(about = "File bug reports from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to the form config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the form-processing endpoint
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a bug report in one step
    Submit {
        #[command(flatten)]
        launch: LaunchArgs,
        /// Short summary of the problem
        #[arg(short, long, default_value = "")]
        title: String,
        /// What happened and how to reproduce it (read from stdin when piped)
        #[arg(short, long)]
        description: Option<String>,
        /// Contact email (optional)
        #[arg(short, long, value_name = "EMAIL")]
        email: Option<String>,
        /// Files to attach; files past the attachment limit are left out
        #[arg(short, long = "attach", value_name = "PATH")]
        attachments: Vec<PathBuf>,
        /// Output the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fill in a bug report step by step
    #[command(alias = "form")]
    Interactive {
        #[command(flatten)]
        launch: LaunchArgs,
    },
    /// Inspect form configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Parameters the form is launched with.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchArgs {
    /// Full launch URL; its query may carry appName, version and browser
    #[arg(long, value_name = "URL", conflicts_with_all = ["app_name", "app_version", "browser"])]
    pub launch_url: Option<String>,
    /// Brand name shown on the form and in the subject line
    #[arg(long, value_name = "NAME")]
    pub app_name: Option<String>,
    /// Version of the application being reported
    #[arg(long, value_name = "VERSION")]
    pub app_version: Option<String>,
    /// Browser or runtime the problem occurred in
    #[arg(long, value_name = "BROWSER")]
    pub browser: Option<String>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the resolved configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
