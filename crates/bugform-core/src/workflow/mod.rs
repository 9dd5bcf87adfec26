//! Submission workflow.
//!
//! Owns the form state and runs the idle → validating → submitting cycle.
//! Every public operation that touches the state ends by pushing a freshly
//! rendered [`FormView`] to the host's [`Surface`], so the surface never
//! observes a half-applied change.
//!
//! Submission is split into [`SubmissionWorkflow::begin_submit`] and
//! [`SubmissionWorkflow::finish_submit`] around the single transport call;
//! [`SubmissionWorkflow::submit`] joins them. While a submission is in
//! flight `begin_submit` refuses to start another one.

mod view;

use crate::attachments::{AddOutcome, AttachmentStore};
use crate::config::{Brand, FormConfig, LaunchContext};
use crate::error::{Error, Result};
use crate::models::{AttachmentFile, AttachmentId, Field, FieldErrors, FormFields};
use crate::payload::ReportPayload;
use crate::transport::{EndpointReply, ReportTransport, TransportError};
use crate::validation::validate_fields;

pub use view::{render, AttachmentRow, FormView};

pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error while submitting the bug report. Please try again.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to submit the bug report. Please try again.";

/// Rendering target supplied by the host.
pub trait Surface {
    fn render(&mut self, view: &FormView);
}

/// Optional host action behind the "close" button.
pub trait CloseHandler {
    fn close(&mut self);
}

impl<F: FnMut()> CloseHandler for F {
    fn close(&mut self) {
        self();
    }
}

/// Top-level error message shown above the submit control.
///
/// Success is acknowledged separately through `success_visible`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
}

impl Feedback {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// How a call to `begin_submit` went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    /// A submission is already in flight; nothing changed.
    Suppressed,
    /// Validation failed; field errors are set.
    Invalid,
    /// The form is now submitting; send this payload exactly once.
    Started(ReportPayload),
}

/// Final result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Suppressed,
    Invalid,
    Accepted,
    Rejected { message: String },
    TransportFailed { detail: String },
}

impl SubmissionOutcome {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Classify a transport result. Only a failed status or an explicit
    /// `success: false` counts as a rejection.
    pub fn from_reply(result: std::result::Result<EndpointReply, TransportError>) -> Self {
        match result {
            Ok(reply) if reply.is_accepted() => Self::Accepted,
            Ok(reply) => Self::Rejected {
                message: reply
                    .message
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            },
            Err(error) => Self::TransportFailed {
                detail: error.to_string(),
            },
        }
    }
}

/// The model every view is rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub brand: Brand,
    pub fields: FormFields,
    pub errors: FieldErrors,
    pub attachments: AttachmentStore,
    pub is_submitting: bool,
    pub feedback: Option<Feedback>,
    pub success_visible: bool,
}

impl FormState {
    pub fn new(brand: Brand, fields: FormFields, attachments: AttachmentStore) -> Self {
        Self {
            brand,
            fields,
            errors: FieldErrors::new(),
            attachments,
            is_submitting: false,
            feedback: None,
            success_visible: false,
        }
    }

    fn reset_after_success(&mut self) {
        self.fields.clear_report();
        self.attachments.reset();
        self.errors.clear_all();
        self.feedback = None;
    }
}

/// A bug report form session bound to its host capabilities.
pub struct SubmissionWorkflow<T, S> {
    state: FormState,
    page_url: String,
    transport: T,
    surface: S,
    close_handler: Option<Box<dyn CloseHandler + Send>>,
}

impl<T: ReportTransport, S: Surface> SubmissionWorkflow<T, S> {
    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    #[must_use]
    pub const fn fields(&self) -> &FormFields {
        &self.state.fields
    }

    #[must_use]
    pub const fn attachments(&self) -> &AttachmentStore {
        &self.state.attachments
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.state.is_submitting
    }

    #[must_use]
    pub fn page_url(&self) -> &str {
        &self.page_url
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// The view as it would be rendered now.
    #[must_use]
    pub fn view(&self) -> FormView {
        render(&self.state, self.close_handler.is_some())
    }

    /// Store a field edit. Only that field's error annotation is cleared.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.state.fields.set(field, value);
        self.state.errors.clear(field);
        self.render();
    }

    /// Stage selected files. Files beyond the remaining capacity are dropped
    /// without error; the view is re-rendered even when nothing was added.
    pub fn add_attachments(&mut self, files: Vec<AttachmentFile>) -> AddOutcome {
        let outcome = if self.state.is_submitting {
            tracing::debug!(
                count = files.len(),
                "Ignoring attachments while a submission is in flight"
            );
            AddOutcome {
                added: Vec::new(),
                dropped: files.len(),
            }
        } else {
            self.state.attachments.add(files)
        };

        if outcome.dropped > 0 {
            tracing::debug!(
                added = outcome.added.len(),
                dropped = outcome.dropped,
                limit = self.state.attachments.limit(),
                "Attachment batch truncated"
            );
        }
        self.render();
        outcome
    }

    /// Remove a staged attachment. Unknown ids are ignored.
    pub fn remove_attachment(&mut self, id: AttachmentId) -> bool {
        let removed = self.state.attachments.remove(id);
        if !removed {
            tracing::debug!(%id, "No attachment to remove");
        }
        self.render();
        removed
    }

    /// Run field validation and show the resulting annotations.
    pub fn validate(&mut self) -> bool {
        let valid = validate_fields(&self.state.fields, &mut self.state.errors);
        self.render();
        valid
    }

    /// First half of a submission: gate, validate, lock the form and
    /// serialize it.
    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.state.is_submitting {
            tracing::debug!("Submission already in flight; ignoring submit");
            return SubmitStart::Suppressed;
        }

        self.state.feedback = None;
        if !validate_fields(&self.state.fields, &mut self.state.errors) {
            tracing::debug!("Bug report failed validation");
            self.render();
            return SubmitStart::Invalid;
        }

        self.state.is_submitting = true;
        self.render();

        SubmitStart::Started(ReportPayload::build(
            &self.state.brand,
            &self.state.fields,
            &self.state.attachments,
            &self.page_url,
        ))
    }

    /// Second half of a submission: apply the transport result and unlock
    /// the form. Failures keep every field and attachment as they were.
    pub fn finish_submit(
        &mut self,
        result: std::result::Result<EndpointReply, TransportError>,
    ) -> SubmissionOutcome {
        let outcome = SubmissionOutcome::from_reply(result);

        match &outcome {
            SubmissionOutcome::Accepted => {
                tracing::info!("Bug report submitted");
                self.state.reset_after_success();
                self.state.success_visible = true;
            }
            SubmissionOutcome::Rejected { message } => {
                tracing::warn!("Bug report rejected by endpoint: {message}");
                self.state.feedback = Some(Feedback::error(message.clone()));
            }
            SubmissionOutcome::TransportFailed { detail } => {
                tracing::error!("Bug report submission failed: {detail}");
                self.state.feedback = Some(Feedback::error(NETWORK_ERROR_MESSAGE));
            }
            SubmissionOutcome::Suppressed | SubmissionOutcome::Invalid => {}
        }

        self.state.is_submitting = false;
        self.render();
        outcome
    }

    /// Validate, send once, and apply the result.
    pub async fn submit(&mut self) -> SubmissionOutcome {
        let payload = match self.begin_submit() {
            SubmitStart::Suppressed => return SubmissionOutcome::Suppressed,
            SubmitStart::Invalid => return SubmissionOutcome::Invalid,
            SubmitStart::Started(payload) => payload,
        };

        let result = self.transport.send(&payload).await;
        self.finish_submit(result)
    }

    /// Dismiss the success acknowledgment and return to an empty form.
    pub fn submit_another(&mut self) {
        self.state.success_visible = false;
        self.render();
    }

    /// Invoke the host's close action. Returns `false` when the host has none.
    pub fn close(&mut self) -> bool {
        match self.close_handler.as_mut() {
            Some(handler) => {
                handler.close();
                true
            }
            None => false,
        }
    }

    fn render(&mut self) {
        let view = render(&self.state, self.close_handler.is_some());
        self.surface.render(&view);
    }
}

/// Resolves the host capabilities and the launch context into a workflow.
pub struct WorkflowBuilder<T, S> {
    config: FormConfig,
    launch: Option<LaunchContext>,
    transport: Option<T>,
    surface: Option<S>,
    close_handler: Option<Box<dyn CloseHandler + Send>>,
}

impl<T: ReportTransport, S: Surface> WorkflowBuilder<T, S> {
    pub fn new(config: FormConfig) -> Self {
        Self {
            config,
            launch: None,
            transport: None,
            surface: None,
            close_handler: None,
        }
    }

    /// Launch URL the form was opened with. Defaults to the configured page URL.
    #[must_use]
    pub fn launch(mut self, launch: LaunchContext) -> Self {
        self.launch = Some(launch);
        self
    }

    #[must_use]
    pub fn transport(mut self, transport: T) -> Self {
        self.transport = Some(transport);
        self
    }

    #[must_use]
    pub fn surface(mut self, surface: S) -> Self {
        self.surface = Some(surface);
        self
    }

    #[must_use]
    pub fn close_handler(mut self, handler: impl CloseHandler + Send + 'static) -> Self {
        self.close_handler = Some(Box::new(handler));
        self
    }

    /// Fails when a required capability is missing or the config is invalid.
    /// The initial view is rendered before returning.
    pub fn build(self) -> Result<SubmissionWorkflow<T, S>> {
        self.config.validate()?;
        let transport = self.transport.ok_or(Error::MissingCapability("transport"))?;
        let surface = self.surface.ok_or(Error::MissingCapability("surface"))?;
        let launch = match self.launch {
            Some(launch) => launch,
            None => LaunchContext::parse(&self.config.page_url)?,
        };

        let brand = launch.brand(&self.config.app_name);
        tracing::debug!(brand = brand.name(), page_url = launch.page_url(), "Bug report form ready");

        let mut workflow = SubmissionWorkflow {
            state: FormState::new(
                brand,
                launch.initial_fields(),
                AttachmentStore::new(self.config.attachment_limit),
            ),
            page_url: launch.page_url().to_string(),
            transport,
            surface,
            close_handler: self.close_handler,
        };
        workflow.render();
        Ok(workflow)
    }
}
