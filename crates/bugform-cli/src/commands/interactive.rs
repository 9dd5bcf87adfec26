use std::io::{BufRead, Write};
use std::path::PathBuf;

use bugform_core::{AttachmentId, Field, ReportTransport, SubmissionOutcome, SubmissionWorkflow};

use crate::commands::common::read_attachment_files;
use crate::error::CliError;
use crate::terminal::TerminalSurface;

pub const HELP_LINES: [&str; 12] = [
    "title <text>         Set the title",
    "description <text>   Set the description",
    "email <address>      Set the contact email (optional)",
    "version <text>       Set the application version",
    "browser <text>       Set the browser",
    "attach <path>...     Attach files; quote paths with spaces",
    "remove <id>          Remove an attachment, e.g. `remove attachment-0`",
    "show                 Show the form",
    "submit               Send the bug report",
    "another              Start a new report after a successful one",
    "close                Close the form",
    "help                 Show this help",
];

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    Set(Field, String),
    Attach(Vec<PathBuf>),
    Remove(AttachmentId),
    Show,
    Submit,
    Another,
    Close,
    Help,
}

/// Parse a line. Blank lines yield `Ok(None)`.
pub fn parse_form_command(line: &str) -> Result<Option<FormCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let command = match word.to_ascii_lowercase().as_str() {
        "title" => FormCommand::Set(Field::Title, rest.to_string()),
        "description" | "desc" => FormCommand::Set(Field::Description, rest.to_string()),
        "email" => FormCommand::Set(Field::Email, rest.to_string()),
        "version" => FormCommand::Set(Field::Version, rest.to_string()),
        "browser" => FormCommand::Set(Field::Browser, rest.to_string()),
        "attach" => {
            let paths = split_paths(rest)?;
            if paths.is_empty() {
                return Err("attach needs at least one file path".to_string());
            }
            FormCommand::Attach(paths)
        }
        "remove" | "rm" => {
            let id = rest
                .parse::<AttachmentId>()
                .map_err(|_| format!("`{rest}` is not an attachment id"))?;
            FormCommand::Remove(id)
        }
        "show" => FormCommand::Show,
        "submit" | "send" => FormCommand::Submit,
        "another" | "new" => FormCommand::Another,
        "close" | "quit" | "exit" => FormCommand::Close,
        "help" | "?" => FormCommand::Help,
        other => return Err(format!("Unknown command `{other}`; type `help`")),
    };
    Ok(Some(command))
}

/// Split `attach` arguments on whitespace. Single or double quotes keep a
/// path with spaces together.
pub fn split_paths(input: &str) -> Result<Vec<PathBuf>, String> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_token = false;

    for ch in input.chars() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    paths.push(PathBuf::from(std::mem::take(&mut current)));
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }

    if let Some(open) = quote {
        return Err(format!("Unclosed {open} in attach paths"));
    }
    if in_token {
        paths.push(PathBuf::from(current));
    }
    Ok(paths)
}

/// Feed `input` lines into the workflow until `close` or end of input.
/// Command errors and help go to `notes`; the form itself is drawn by the
/// surface.
pub async fn drive_session<T, W, R, N>(
    workflow: &mut SubmissionWorkflow<T, TerminalSurface<W>>,
    input: R,
    notes: &mut N,
) -> Result<(), CliError>
where
    T: ReportTransport,
    W: Write,
    R: BufRead,
    N: Write,
{
    for line in input.lines() {
        let line = line?;
        let command = match parse_form_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(notes, "{message}")?;
                continue;
            }
        };

        match command {
            FormCommand::Set(field, value) => workflow.set_field(field, value),
            FormCommand::Attach(paths) => match read_attachment_files(&paths) {
                Ok(files) => {
                    let outcome = workflow.add_attachments(files);
                    if outcome.dropped > 0 {
                        tracing::debug!(dropped = outcome.dropped, "Attachment limit reached");
                    }
                }
                Err(error) => writeln!(notes, "{error}")?,
            },
            FormCommand::Remove(id) => {
                if !workflow.remove_attachment(id) {
                    writeln!(notes, "No attachment {id}")?;
                }
            }
            FormCommand::Show => {
                for line in crate::terminal::format_view(&workflow.view()) {
                    writeln!(notes, "{line}")?;
                }
            }
            FormCommand::Submit => {
                if matches!(workflow.submit().await, SubmissionOutcome::Suppressed) {
                    writeln!(notes, "A submission is already in progress")?;
                }
            }
            FormCommand::Another => workflow.submit_another(),
            FormCommand::Close => {
                if workflow.close() {
                    return Ok(());
                }
                writeln!(notes, "Closing is not available here")?;
            }
            FormCommand::Help => {
                for line in HELP_LINES {
                    writeln!(notes, "{line}")?;
                }
            }
        }
    }

    Ok(())
}
