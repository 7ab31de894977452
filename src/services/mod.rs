pub mod batch;
pub mod error;
pub mod game_session;
pub mod ownership;
pub mod progress;
pub mod scoring;
pub mod validation;
pub mod word_selector;

pub use batch::BatchRecorder;
pub use error::EngineError;
pub use game_session::{CreateSessionInput, SessionBuilder};
pub use progress::ProgressRecorder;
pub use word_selector::WordSelector;
