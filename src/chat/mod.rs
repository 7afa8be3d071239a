mod message;
mod session;
mod store;

pub use message::{ChatRecord, Sender};
pub use session::{Completion, Dispatch, PendingCall, Phase, Session};
