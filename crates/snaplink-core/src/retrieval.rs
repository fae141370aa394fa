//! Secret retrieval state machine.
//!
//! The machine is a pure function:
//!
//! ```text
//! RetrievalState × Event → (RetrievalState, Option<FetchRequest>)
//! ```
//!
//! It never performs I/O. When a transition needs the network it returns a
//! `FetchRequest`; the host runs it and feeds the classified outcome back as
//! `Event::Fetched`.

use crate::outcome::FetchOutcome;
use crate::password::Password;

pub const NO_CODE_MESSAGE: &str = "No secret code provided.";
pub const EMPTY_SECRET_MESSAGE: &str = "The secret is empty.";

/// Discrete phase of the retrieval view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Revealed,
    AwaitingPassword,
    Failed,
}

/// Phase together with the data that phase carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    Idle,
    Loading,
    Revealed { secret: String },
    AwaitingPassword { prompt: String },
    Failed { message: String },
}

/// State of one retrieval view, bound to a single code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetrievalState {
    code: Option<String>,
    view: View,
    password_protected: bool,
}

/// Inputs to the state machine.
#[derive(Clone, Debug)]
pub enum Event {
    /// The view was mounted for its code.
    Mounted,
    /// A fetch issued earlier has completed.
    Fetched(FetchOutcome),
    /// The user submitted the password form.
    PasswordSubmitted(Password),
}

/// A fetch the host must perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub code: String,
    pub password: Option<Password>,
}

impl RetrievalState {
    /// Fresh `Idle` state. A blank code counts as absent.
    pub fn new(code: Option<String>) -> Self {
        let code = code.filter(|c| !c.trim().is_empty());
        RetrievalState {
            code,
            view: View::Idle,
            password_protected: false,
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn phase(&self) -> Phase {
        match self.view {
            View::Idle => Phase::Idle,
            View::Loading => Phase::Loading,
            View::Revealed { .. } => Phase::Revealed,
            View::AwaitingPassword { .. } => Phase::AwaitingPassword,
            View::Failed { .. } => Phase::Failed,
        }
    }

    pub fn secret_text(&self) -> Option<&str> {
        match &self.view {
            View::Revealed { secret } => Some(secret),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.view {
            View::AwaitingPassword { prompt } => Some(prompt),
            View::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == Phase::Loading
    }

    /// Whether the server has asked for a password for this code.
    pub fn password_protected(&self) -> bool {
        self.password_protected
    }

    /// Whether the password form should be offered right now.
    ///
    /// After a password retry fails for a non-password reason the form
    /// stays available, so another attempt can follow.
    pub fn accepts_password(&self) -> bool {
        match self.view {
            View::AwaitingPassword { .. } => true,
            View::Failed { .. } => self.password_protected,
            _ => false,
        }
    }

    fn with_view(self, view: View) -> Self {
        RetrievalState { view, ..self }
    }
}

/// Apply one event. Events that make no sense in the current phase leave
/// the state untouched and request nothing.
pub fn transition(state: RetrievalState, event: Event) -> (RetrievalState, Option<FetchRequest>) {
    match event {
        Event::Mounted => {
            if state.phase() != Phase::Idle {
                return (state, None);
            }
            match state.code.clone() {
                Some(code) => (
                    state.with_view(View::Loading),
                    Some(FetchRequest {
                        code,
                        password: None,
                    }),
                ),
                None => (
                    state.with_view(View::Failed {
                        message: NO_CODE_MESSAGE.to_string(),
                    }),
                    None,
                ),
            }
        }
        Event::Fetched(outcome) => {
            if state.phase() != Phase::Loading {
                return (state, None);
            }
            let next = match outcome {
                FetchOutcome::Success(secret) if secret.is_empty() => {
                    state.with_view(View::Failed {
                        message: EMPTY_SECRET_MESSAGE.to_string(),
                    })
                }
                FetchOutcome::Success(secret) => state.with_view(View::Revealed { secret }),
                FetchOutcome::NeedsPassword(prompt) => RetrievalState {
                    password_protected: true,
                    ..state.with_view(View::AwaitingPassword { prompt })
                },
                FetchOutcome::Error(message) => state.with_view(View::Failed { message }),
            };
            (next, None)
        }
        Event::PasswordSubmitted(password) => {
            if !state.accepts_password() {
                return (state, None);
            }
            let Some(code) = state.code.clone() else {
                return (state, None);
            };
            (
                state.with_view(View::Loading),
                Some(FetchRequest {
                    code,
                    password: Some(password),
                }),
            )
        }
    }
}
