pub mod event;
pub mod issue;
pub mod lenient;
pub mod state;

// Re-export commonly used types
pub use event::Event;
pub use issue::{Issue, NO_NUMBER};
pub use state::State;
