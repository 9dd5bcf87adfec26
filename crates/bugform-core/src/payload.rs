//! Outbound submission payload.
//!
//! The payload is a plain, ordered list of text fields followed by file
//! parts. It is built synchronously from the form state and only turned into
//! a `reqwest` multipart form by the HTTP transport.

use reqwest::multipart::{Form, Part};

use crate::attachments::AttachmentStore;
use crate::config::Brand;
use crate::models::FormFields;

pub const FIELD_SUBJECT: &str = "_subject";
pub const FIELD_TITLE: &str = "title";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_VERSION: &str = "version";
pub const FIELD_BROWSER: &str = "browser";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PAGE_URL: &str = "page_url";
pub const FIELD_FILES: &str = "files[]";

/// One file part of the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Everything sent in one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPayload {
    fields: Vec<(&'static str, String)>,
    files: Vec<PayloadFile>,
}

impl ReportPayload {
    /// Serialize the form. Text values are trimmed; `email` is omitted when
    /// empty; files follow store order.
    pub fn build(
        brand: &Brand,
        fields: &FormFields,
        attachments: &AttachmentStore,
        page_url: &str,
    ) -> Self {
        let title = fields.title.trim();
        let mut text = vec![
            (FIELD_SUBJECT, brand.subject_for(title)),
            (FIELD_TITLE, title.to_string()),
            (FIELD_DESCRIPTION, fields.description.trim().to_string()),
            (FIELD_VERSION, fields.version.trim().to_string()),
            (FIELD_BROWSER, fields.browser.trim().to_string()),
        ];

        let email = fields.email.trim();
        if !email.is_empty() {
            text.push((FIELD_EMAIL, email.to_string()));
        }
        text.push((FIELD_PAGE_URL, page_url.to_string()));

        let files = attachments
            .iter()
            .map(|entry| PayloadFile {
                file_name: entry.file.name.clone(),
                content_type: entry.file.content_type(),
                bytes: entry.file.bytes.clone(),
            })
            .collect();

        Self {
            fields: text,
            files,
        }
    }

    /// Text fields in send order.
    #[must_use]
    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    /// First value of a text field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn files(&self) -> &[PayloadFile] {
        &self.files
    }

    /// Build the multipart body. Fails only on an unparseable content type.
    pub fn to_multipart(&self) -> reqwest::Result<Form> {
        let mut form = Form::new();
        for (name, value) in &self.fields {
            form = form.text(*name, value.clone());
        }
        for file in &self.files {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(&file.content_type)?;
            form = form.part(FIELD_FILES, part);
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::AttachmentFile;

    fn report_fields(email: &str) -> FormFields {
        let mut fields = FormFields::with_environment(Some("3.2.0".to_string()), None);
        fields.title = "  Crash on save ".to_string();
        fields.description = "App crashes when saving\n".to_string();
        fields.email = email.to_string();
        fields
    }

    #[test]
    fn payload_fields_follow_send_order() {
        let payload = ReportPayload::build(
            &Brand::resolve("Wiremesh", None),
            &report_fields(" qa@example.com "),
            &AttachmentStore::default(),
            "https://localhost/bug-report",
        );

        let names: Vec<&str> = payload.fields().iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "_subject",
                "title",
                "description",
                "version",
                "browser",
                "email",
                "page_url"
            ]
        );
        assert_eq!(
            payload.field(FIELD_SUBJECT),
            Some("[Wiremesh] Bug report: Crash on save")
        );
        assert_eq!(payload.field(FIELD_TITLE), Some("Crash on save"));
        assert_eq!(
            payload.field(FIELD_DESCRIPTION),
            Some("App crashes when saving")
        );
        assert_eq!(payload.field(FIELD_EMAIL), Some("qa@example.com"));
        assert_eq!(payload.field(FIELD_VERSION), Some("3.2.0"));
        assert_eq!(payload.field(FIELD_BROWSER), Some("Unknown"));
    }

    #[test]
    fn empty_email_is_omitted() {
        let payload = ReportPayload::build(
            &Brand::resolve("Wiremesh", None),
            &report_fields("   "),
            &AttachmentStore::default(),
            "https://localhost/bug-report",
        );
        assert_eq!(payload.field(FIELD_EMAIL), None);
        assert!(payload.files().is_empty());
    }

    #[test]
    fn files_follow_store_order() {
        let mut store = AttachmentStore::default();
        store.add([
            AttachmentFile::new("b.png", vec![2]),
            AttachmentFile::new("a.txt", vec![1]),
            AttachmentFile::new("b.png", vec![3]),
        ]);
        store.remove("attachment-0".parse().unwrap());

        let payload = ReportPayload::build(
            &Brand::resolve("Wiremesh", None),
            &report_fields(""),
            &store,
            "https://localhost/bug-report",
        );

        let files: Vec<(&str, &str, &[u8])> = payload
            .files()
            .iter()
            .map(|file| {
                (
                    file.file_name.as_str(),
                    file.content_type.as_str(),
                    file.bytes.as_slice(),
                )
            })
            .collect();
        assert_eq!(
            files,
            vec![
                ("a.txt", "text/plain", &[1u8][..]),
                ("b.png", "image/png", &[3u8][..])
            ]
        );
        assert!(payload.to_multipart().is_ok());
    }
}
