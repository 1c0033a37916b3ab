// Per-session state: the last generated letter, the selected output format and
// the user's API key. In-process only; nothing survives a restart.

pub mod handlers;
pub mod store;

pub use store::{Session, SessionStore};
