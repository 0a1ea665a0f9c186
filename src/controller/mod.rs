// src/controller/mod.rs

//! Lifecycle hook controller.
//!
//! [`HookedConnector`] wraps a delegate [`NodeConnector`](crate::connector::NodeConnector)
//! and runs the configured start/stop hooks around its connect/disconnect
//! boundary without altering the semantics of the delegated operations
//! themselves. The pure phase machine lives in [`state`]; the async
//! controller in [`lifecycle`].

pub mod lifecycle;
pub mod state;

pub use lifecycle::HookedConnector;
pub use state::{LifecycleEvent, SessionPhase};
