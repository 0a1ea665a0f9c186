// src/connector/mod.rs

//! Node connector capability and session identity.
//!
//! A connector is the mechanism that establishes and tears down a working
//! session with a node. The lifecycle hook controller wraps exactly one
//! connector and delegates all connection mechanics to it.

pub mod command;
pub mod noop;

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::sink::SharedSink;

pub use command::CommandConnector;
pub use noop::NoopConnector;

/// Identity and descriptive metadata for one node's management session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSession {
    pub name: String,
    pub description: String,
    pub labels: Vec<String>,
    pub executors: u32,
}

impl NodeSession {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            labels: Vec::new(),
            executors: 1,
        }
    }
}

/// Establishes and tears down a working session with a node.
///
/// `disconnect` is infallible at the type level: connectors handle their
/// own teardown errors (log and continue), since the node is already
/// being removed from service.
pub trait NodeConnector: Send + Sync {
    /// Bring the node online.
    fn connect<'a>(
        &'a self,
        session: &'a NodeSession,
        sink: SharedSink,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

    /// Tear the session down.
    fn disconnect<'a>(
        &'a self,
        session: &'a NodeSession,
        sink: SharedSink,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

    /// Whether this connector can be used at all in the current
    /// environment.
    fn is_supported(&self) -> bool {
        true
    }
}
