// src/connector/noop.rs

//! Connector for nodes whose session is established out of band.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::sink::SharedSink;

use super::{NodeConnector, NodeSession};

/// Logs and succeeds. Useful when the node dials in on its own once the
/// start hook has provisioned it, and for inventories where only the
/// hooks matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopConnector;

impl NodeConnector for NoopConnector {
    fn connect<'a>(
        &'a self,
        session: &'a NodeSession,
        sink: SharedSink,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            sink.line(&format!(
                "Node '{}' is managed externally; nothing to connect.",
                session.name
            ));
            Ok(())
        })
    }

    fn disconnect<'a>(
        &'a self,
        session: &'a NodeSession,
        sink: SharedSink,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            sink.line(&format!(
                "Node '{}' is managed externally; nothing to disconnect.",
                session.name
            ));
        })
    }
}
