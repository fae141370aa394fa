use tracing::debug;

use crate::outcome::FetchOutcome;
use crate::password::Password;
use crate::retrieval::{transition, Event, FetchRequest, RetrievalState};

/// A fetch issued by a session, stamped with the generation that issued it.
///
/// Hosts run the request and hand the ticket back with the outcome. A
/// ticket from an older generation (the session navigated or unmounted in
/// the meantime) is discarded.
#[derive(Debug)]
pub struct FetchTicket {
    generation: u64,
    request: FetchRequest,
}

impl FetchTicket {
    pub fn code(&self) -> &str {
        &self.request.code
    }

    pub fn password(&self) -> Option<&Password> {
        self.request.password.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Discarded,
}

/// Owner of one mounted retrieval view.
///
/// All mutation goes through here so that late responses can be matched
/// against the generation that requested them.
#[derive(Debug)]
pub struct RetrievalSession {
    state: RetrievalState,
    generation: u64,
    mounted: bool,
}

impl RetrievalSession {
    /// Mount a view for `code` and run the initial transition.
    pub fn mount(code: Option<String>) -> (Self, Option<FetchTicket>) {
        let mut session = RetrievalSession {
            state: RetrievalState::new(code),
            generation: 0,
            mounted: true,
        };
        let ticket = session.dispatch(Event::Mounted);
        (session, ticket)
    }

    pub fn state(&self) -> &RetrievalState {
        &self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Submit the password form. Returns `None` when the current phase does
    /// not accept a password (including while a fetch is in flight).
    pub fn submit_password(&mut self, password: Password) -> Option<FetchTicket> {
        if !self.mounted {
            return None;
        }
        self.dispatch(Event::PasswordSubmitted(password))
    }

    /// Feed a completed fetch back into the machine.
    pub fn resolve(&mut self, ticket: FetchTicket, outcome: FetchOutcome) -> Resolution {
        if !self.mounted || ticket.generation != self.generation {
            debug!(
                code = %ticket.request.code,
                ticket_generation = ticket.generation,
                generation = self.generation,
                outcome = outcome.label(),
                "discarding stale fetch result"
            );
            return Resolution::Discarded;
        }
        if let Some(extra) = self.dispatch(Event::Fetched(outcome)) {
            // Fetched never requests another fetch.
            debug!(code = %extra.request.code, "unexpected follow-up fetch dropped");
        }
        Resolution::Applied
    }

    /// Navigate to another code: a fresh state replaces the old one and any
    /// outstanding ticket becomes stale.
    pub fn navigate(&mut self, code: Option<String>) -> Option<FetchTicket> {
        self.generation += 1;
        self.mounted = true;
        self.state = RetrievalState::new(code);
        self.dispatch(Event::Mounted)
    }

    /// Tear the view down. Outstanding tickets become stale.
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.mounted = false;
    }

    fn dispatch(&mut self, event: Event) -> Option<FetchTicket> {
        let current = std::mem::replace(&mut self.state, RetrievalState::new(None));
        let before = current.phase();
        let (next, fetch) = transition(current, event);
        debug!(from = ?before, to = ?next.phase(), "retrieval transition");
        self.state = next;
        fetch.map(|request| FetchTicket {
            generation: self.generation,
            request,
        })
    }
}
