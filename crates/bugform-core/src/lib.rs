//! bugform-core - Core library for bugform
//!
//! This crate contains the attachment store, field validation, payload
//! serialization, and the submission workflow shared by every bugform host.
//! Hosts supply a transport and a rendering surface; the workflow pushes a
//! freshly derived [`FormView`] to the surface after every state change.

pub mod attachments;
pub mod config;
pub mod error;
pub mod models;
pub mod payload;
pub mod transport;
pub mod util;
pub mod validation;
pub mod workflow;

pub use attachments::{AddOutcome, AttachmentStore};
pub use config::{Brand, FormConfig, LaunchContext};
pub use error::{Error, Result};
pub use models::{Attachment, AttachmentFile, AttachmentId, Field, FieldErrors, FormFields};
pub use payload::ReportPayload;
pub use transport::{EndpointReply, HttpTransport, ReportTransport, TransportError};
pub use workflow::{
    CloseHandler, Feedback, FormView, SubmissionOutcome, SubmissionWorkflow, SubmitStart, Surface,
    WorkflowBuilder,
};
