pub mod guards;
pub mod store;
pub mod validator;

pub use guards::{Navigator, Notifier, SessionGuard};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
pub use validator::{check_token, decode_expiry, TokenStatus};
