pub mod api;
pub mod link;
pub mod outcome;
pub mod password;
pub mod retrieval;
pub mod session;
pub mod ttl;

pub use api::{CreateSecretRequest, CreateSecretResponse, SnaplinkApi};
pub use link::{parse_secret_code, validate_target_url, LinkError};
pub use outcome::FetchOutcome;
pub use password::{Password, PasswordError};
pub use retrieval::{transition, Event, FetchRequest, Phase, RetrievalState, View};
pub use session::{FetchTicket, Resolution, RetrievalSession};
pub use ttl::{parse_hit_limit, parse_ttl, HitLimitError, TtlError};
