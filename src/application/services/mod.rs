//! Application Services - window bookkeeping, activation and rebinding
//!
//! These services drive the ports and hold the little shared state the
//! core needs (the registry cache, the current switch, rebind history).

pub mod activation_engine;
pub mod rebind_manager;
pub mod switch_coordinator;
pub mod window_registry;

pub use activation_engine::{ActivationEngine, WindowActivator};
pub use rebind_manager::{RebindManager, RebindOutcome, ValidationReport};
pub use switch_coordinator::SwitchCoordinator;
pub use window_registry::{WindowRegistry, WindowSummary};
