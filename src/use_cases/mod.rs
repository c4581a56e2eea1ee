// Use cases layer: the session workflow built on the domain rules.

pub mod backdrop;
pub mod session;
pub mod types;

pub use session::{GameSession, SessionDeps, SessionTiming, session_task};
pub use types::{FrameSnapshot, PlayerSlot, SessionCommand, SessionNotice};
