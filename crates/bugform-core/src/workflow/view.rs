//! Pure derivation of the visible form from the workflow state.

use crate::models::{format_file_size, AttachmentId, FieldErrors, FormFields};

use super::{Feedback, FormState};

/// One row of the rendered attachment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRow {
    /// Id the row's remove action is wired to.
    pub id: AttachmentId,
    pub name: String,
    pub size_label: String,
    pub remove_label: String,
}

/// Everything a surface needs to draw the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub document_title: String,
    pub brand_text: String,
    pub attachment_hint: String,
    pub fields: FormFields,
    pub field_errors: FieldErrors,
    pub attachments: Vec<AttachmentRow>,
    pub add_enabled: bool,
    pub submit_enabled: bool,
    pub feedback: Option<Feedback>,
    pub success_visible: bool,
    pub close_available: bool,
}

/// Recompute the whole view from `state`. Never reads anything else.
pub fn render(state: &FormState, close_available: bool) -> FormView {
    let attachments = state
        .attachments
        .iter()
        .map(|entry| AttachmentRow {
            id: entry.id,
            name: entry.file.name.clone(),
            size_label: format_file_size(entry.file.size()),
            remove_label: format!("Remove attachment {}", entry.file.name),
        })
        .collect();

    FormView {
        document_title: state.brand.document_title(),
        brand_text: state.brand.name().to_string(),
        attachment_hint: format!(
            "Optional – attach up to {} files.",
            state.attachments.limit()
        ),
        fields: state.fields.clone(),
        field_errors: state.errors.clone(),
        attachments,
        add_enabled: !state.attachments.is_at_capacity() && !state.is_submitting,
        submit_enabled: !state.is_submitting,
        feedback: state.feedback.clone(),
        success_visible: state.success_visible,
        close_available,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::attachments::AttachmentStore;
    use crate::config::Brand;
    use crate::models::AttachmentFile;

    fn state(limit: usize) -> FormState {
        FormState::new(
            Brand::resolve("Wiremesh", Some("Acme")),
            FormFields::default(),
            AttachmentStore::new(limit),
        )
    }

    #[test]
    fn rows_mirror_store() {
        let mut state = state(6);
        state.attachments.add([
            AttachmentFile::new("screenshot.png", vec![0; 2048]),
            AttachmentFile::new("trace.log", vec![0; 12]),
        ]);

        let view = render(&state, false);

        assert_eq!(view.document_title, "Acme · Bug Report");
        assert_eq!(view.brand_text, "Acme");
        assert_eq!(view.attachment_hint, "Optional – attach up to 6 files.");
        assert_eq!(
            view.attachments,
            vec![
                AttachmentRow {
                    id: AttachmentId::from_sequence(0),
                    name: "screenshot.png".to_string(),
                    size_label: "2.0 KB".to_string(),
                    remove_label: "Remove attachment screenshot.png".to_string(),
                },
                AttachmentRow {
                    id: AttachmentId::from_sequence(1),
                    name: "trace.log".to_string(),
                    size_label: "12 B".to_string(),
                    remove_label: "Remove attachment trace.log".to_string(),
                },
            ]
        );
        assert!(view.add_enabled);
        assert!(view.submit_enabled);
    }

    #[test]
    fn add_disabled_at_capacity() {
        let mut state = state(1);
        state.attachments.add([AttachmentFile::new("a", vec![1])]);
        let view = render(&state, false);
        assert!(!view.add_enabled);
        assert!(view.submit_enabled);
    }

    #[test]
    fn submitting_disables_add_and_submit() {
        let mut state = state(6);
        state.is_submitting = true;
        let view = render(&state, true);
        assert!(!view.add_enabled);
        assert!(!view.submit_enabled);
        assert!(view.close_available);
    }

    #[test]
    fn render_is_idempotent() {
        let mut state = state(6);
        state.attachments.add([AttachmentFile::new("a", vec![1])]);
        assert_eq!(render(&state, false), render(&state, false));
    }
}
