mod session;

pub use session::{RevocationReason, Session, SessionId};
