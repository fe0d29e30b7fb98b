pub mod headless;
pub mod play;
pub mod session;
pub mod setup;

pub use headless::{GameReport, HeadlessRunner};
pub use play::PlayMode;
pub use session::{Session, SessionError, SessionState};
pub use setup::run_setup;
