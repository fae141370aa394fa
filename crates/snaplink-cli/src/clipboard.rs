use std::io::Write;

use tracing::debug;

use crate::cli::Deps;
use crate::color::{color_func, DIM, ERROR, SUCCESS};

pub const COPY_FAILED: &str = "Failed to copy text to clipboard.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// A short, fire-and-forget message for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: Option<String>,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn info(title: &str, description: Option<&str>) -> Self {
        Notice {
            title: title.to_string(),
            description: description.map(str::to_string),
            variant: NoticeVariant::Default,
        }
    }

    pub fn destructive(title: &str, description: &str) -> Self {
        Notice {
            title: title.to_string(),
            description: Some(description.to_string()),
            variant: NoticeVariant::Destructive,
        }
    }
}

/// Render a notice on stderr.
pub fn show_notice(w: &mut dyn Write, is_tty: bool, notice: &Notice) {
    let c = color_func(is_tty);
    let (mark, code) = match notice.variant {
        NoticeVariant::Default => ("\u{2713}", SUCCESS),
        NoticeVariant::Destructive => ("\u{2717}", ERROR),
    };
    let _ = match (&notice.description, is_tty) {
        (Some(d), true) => writeln!(w, "{} {}  {}", c(code, mark), notice.title, c(DIM, d)),
        (Some(d), false) => writeln!(w, "{}: {}", notice.title, d),
        (None, true) => writeln!(w, "{} {}", c(code, mark), notice.title),
        (None, false) => writeln!(w, "{}", notice.title),
    };
}

/// Copy `text` to the system clipboard.
///
/// Never fails the caller: a clipboard error turns into a destructive
/// notice. `confirmation` is shown on success when given.
pub fn copy_to_clipboard(deps: &mut Deps, text: &str, confirmation: Option<Notice>) {
    let is_tty = (deps.is_tty)();
    match (deps.copy_to_clipboard)(text) {
        Ok(()) => {
            if let Some(notice) = confirmation {
                show_notice(&mut deps.stderr, is_tty, &notice);
            }
        }
        Err(e) => {
            debug!(error = %e, "clipboard write failed");
            show_notice(
                &mut deps.stderr,
                is_tty,
                &Notice::destructive("Error", COPY_FAILED),
            );
        }
    }
}
