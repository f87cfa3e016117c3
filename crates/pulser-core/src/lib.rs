// Pulse generator core modules
pub mod prelude;
pub mod pulser;

// Re-exports
pub use pulser::Pulser;

pub use pulser::{ConfigError, PulserConfig};
pub use pulser::trigger::TriggerKind;
