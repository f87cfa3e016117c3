//! Convenient imports for consumers of pulser-core
//!
//! Pull in everything commonly needed in one line:
//! ```rust
//! use pulser_core::prelude::*;
//! ```

// Main pulse generator API
pub use crate::pulser::{DEFAULT_HOLDOFF_MARGIN, ConfigError, Pulser, PulserConfig};

// Individual timing elements
pub use crate::pulser::chain::PulseChain;
pub use crate::pulser::step::PulseStep;
pub use crate::pulser::trigger::{Trigger, TriggerKind};

// Frequency synthesis helpers
pub use crate::pulser::pll::{PllCoefficients, PllError};

// Macros
pub use crate::trace_dump;
