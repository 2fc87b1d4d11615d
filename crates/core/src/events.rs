//! Diagnostic event boundary
//!
//! Caching components report what they do (cache enabled or disabled,
//! codec chosen, persistence failures) to an injected [`EventListener`].
//! Messages are human-readable and carry no contract; they never affect
//! control flow.

use std::fmt::Debug;

/// Receiver of diagnostic notifications
pub trait EventListener: Send + Sync + Debug {
    /// An informational notification from `source`
    fn on_event(&self, source: &str, message: &str);

    /// A recovered failure from `source`
    fn on_error(&self, source: &str, message: &str, error: &dyn std::error::Error);
}

/// Forwards notifications to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl EventListener for TracingListener {
    fn on_event(&self, source: &str, message: &str) {
        tracing::debug!(source = %source, "{message}");
    }

    fn on_error(&self, source: &str, message: &str, error: &dyn std::error::Error) {
        tracing::warn!(source = %source, error = %error, "{message}");
    }
}

/// Discards every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl EventListener for NoopListener {
    fn on_event(&self, _source: &str, _message: &str) {}

    fn on_error(&self, _source: &str, _message: &str, _error: &dyn std::error::Error) {}
}
