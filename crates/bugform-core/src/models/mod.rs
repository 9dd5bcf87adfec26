//! Data models for bugform

mod attachment;
mod fields;

pub use attachment::{format_file_size, infer_mime_type, Attachment, AttachmentFile, AttachmentId};
pub use fields::{Field, FieldErrors, FormFields, UNKNOWN_ENVIRONMENT};
