pub mod session;

pub use session::{LockfileParseError, Session};
