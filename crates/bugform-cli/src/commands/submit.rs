use std::path::PathBuf;

use serde::Serialize;

use bugform_core::workflow::NETWORK_ERROR_MESSAGE;
use bugform_core::{
    Field, FormConfig, LaunchContext, ReportTransport, SubmissionOutcome, SubmissionWorkflow,
    Surface, WorkflowBuilder,
};

use crate::commands::common::read_attachment_files;
use crate::error::CliError;

/// Field values and files for a one-step submission.
#[derive(Debug, Clone, Default)]
pub struct SubmitRequest {
    pub title: String,
    pub description: String,
    pub email: Option<String>,
    pub attachments: Vec<PathBuf>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SubmitReport {
    pub status: &'static str,
    pub subject: String,
    pub attachments: Vec<String>,
    /// Files left out because the attachment limit was reached.
    pub dropped: usize,
}

impl SubmitReport {
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Bug report sent: {}", self.subject)];
        if !self.attachments.is_empty() {
            lines.push(format!("Attached: {}", self.attachments.join(", ")));
        }
        if self.dropped > 0 {
            lines.push(format!(
                "{} file(s) were not attached (attachment limit reached)",
                self.dropped
            ));
        }
        lines
    }
}

pub async fn run_submit<T, S>(
    config: FormConfig,
    launch: LaunchContext,
    transport: T,
    surface: S,
    request: SubmitRequest,
) -> Result<SubmitReport, CliError>
where
    T: ReportTransport,
    S: Surface,
{
    let files = read_attachment_files(&request.attachments)?;
    let mut workflow = WorkflowBuilder::new(config)
        .launch(launch)
        .transport(transport)
        .surface(surface)
        .build()?;

    workflow.set_field(Field::Title, request.title);
    workflow.set_field(Field::Description, request.description);
    if let Some(email) = request.email {
        workflow.set_field(Field::Email, email);
    }
    let added = workflow.add_attachments(files);

    let subject = workflow
        .state()
        .brand
        .subject_for(workflow.fields().title.trim());
    let attachments = workflow
        .attachments()
        .iter()
        .map(|entry| entry.file.name.clone())
        .collect();

    match workflow.submit().await {
        SubmissionOutcome::Accepted => Ok(SubmitReport {
            status: "submitted",
            subject,
            attachments,
            dropped: added.dropped,
        }),
        SubmissionOutcome::Invalid => Err(CliError::Invalid(describe_field_errors(&workflow))),
        SubmissionOutcome::Rejected { message } => Err(CliError::Rejected(message)),
        SubmissionOutcome::TransportFailed { .. } => {
            Err(CliError::Network(NETWORK_ERROR_MESSAGE.to_string()))
        }
        SubmissionOutcome::Suppressed => Err(CliError::Rejected(
            "a submission is already in progress".to_string(),
        )),
    }
}

fn describe_field_errors<T: ReportTransport, S: Surface>(
    workflow: &SubmissionWorkflow<T, S>,
) -> String {
    workflow
        .state()
        .errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn print_submit_report(report: &SubmitReport, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        for line in report.summary_lines() {
            println!("{line}");
        }
    }
    Ok(())
}
