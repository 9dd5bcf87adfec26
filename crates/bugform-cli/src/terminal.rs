//! Text rendering of the bug report form.

use std::io::Write;

use bugform_core::{Field, FormView, Surface};

const FIELDS: [(Field, &str); 5] = [
    (Field::Title, "Title"),
    (Field::Description, "Description"),
    (Field::Email, "Email"),
    (Field::Version, "Version"),
    (Field::Browser, "Browser"),
];

pub const SUCCESS_MESSAGE: &str = "Thanks! Your bug report was sent.";

/// Lines describing `view`, top to bottom.
pub fn format_view(view: &FormView) -> Vec<String> {
    let mut lines = vec![format!("== {} ==", view.document_title)];

    if view.success_visible {
        lines.push(SUCCESS_MESSAGE.to_string());
        lines.push(if view.close_available {
            "Type `another` to file a new report or `close` to exit.".to_string()
        } else {
            "Type `another` to file a new report.".to_string()
        });
        return lines;
    }

    for (field, label) in FIELDS {
        let value = view.fields.get(field);
        let shown = if value.is_empty() {
            "(empty)".to_string()
        } else {
            value.replace('\n', "\n    ")
        };
        lines.push(format!("{label:<12} {shown}"));
        if let Some(error) = view.field_errors.get(field) {
            lines.push(format!("  ! {error}"));
        }
    }

    lines.push(format!(
        "Attachments ({}): {}",
        view.attachments.len(),
        view.attachment_hint
    ));
    for row in &view.attachments {
        lines.push(format!("  [{}] {} ({})", row.id, row.name, row.size_label));
    }
    if !view.add_enabled {
        lines.push("  (no more attachments can be added)".to_string());
    }

    if !view.submit_enabled {
        lines.push("Submitting...".to_string());
    }
    if let Some(feedback) = &view.feedback {
        lines.push(format!("Error: {}", feedback.message));
    }

    lines
}

/// Prints each distinct view to a writer.
pub struct TerminalSurface<W> {
    out: W,
    last: Option<FormView>,
}

impl<W: Write> TerminalSurface<W> {
    pub const fn new(out: W) -> Self {
        Self { out, last: None }
    }

    pub const fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn render(&mut self, view: &FormView) {
        if self.last.as_ref() == Some(view) {
            return;
        }
        for line in format_view(view) {
            if let Err(error) = writeln!(self.out, "{line}") {
                tracing::warn!("Failed to draw form: {error}");
                return;
            }
        }
        self.last = Some(view.clone());
    }
}

/// Surface for non-interactive runs; views only reach the debug log.
#[derive(Debug, Default)]
pub struct LogSurface;

impl Surface for LogSurface {
    fn render(&mut self, view: &FormView) {
        tracing::debug!(
            attachments = view.attachments.len(),
            submitting = !view.submit_enabled,
            errors = view.field_errors.iter().count(),
            success = view.success_visible,
            "Form updated"
        );
    }
}
