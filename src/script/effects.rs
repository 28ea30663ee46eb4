//! Collaborator traits for the two external capabilities the interpreter
//! consumes: the outbound messaging transport and the user-state store.
//!
//! Both are constructor-injected so embedders can substitute test doubles.
//! The interpreter treats every call as fire-and-forget: failures propagate
//! to the caller, who owns retry policy.

use super::value::{ProfileFields, Scalar};

/// Outbound messaging transport.
pub trait Messenger: Send + Sync {
    /// Send a text message.
    fn send_message(&self, text: &str) -> anyhow::Result<()>;

    /// Send a file attachment by name.
    fn send_attachment(&self, name: &str) -> anyhow::Result<()>;
}

/// User-state store.
pub trait UserStore: Send + Sync {
    /// Persist a new status value for the user.
    fn set_user_status(&self, user_id: &str, status: &Scalar) -> anyhow::Result<()>;

    /// Persist profile fields for the user.
    fn set_user_profile(&self, user_id: &str, fields: &ProfileFields) -> anyhow::Result<()>;
}

/// Messenger that only logs each effect. Useful as a default in demos and
/// smoke tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMessenger;

impl Messenger for TracingMessenger {
    fn send_message(&self, text: &str) -> anyhow::Result<()> {
        tracing::info!("sending message: {}", text);
        Ok(())
    }

    fn send_attachment(&self, name: &str) -> anyhow::Result<()> {
        tracing::info!("sending attachment: {}", name);
        Ok(())
    }
}

/// User store that only logs each effect.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingUserStore;

impl UserStore for TracingUserStore {
    fn set_user_status(&self, user_id: &str, status: &Scalar) -> anyhow::Result<()> {
        tracing::info!("user {} status -> {}", user_id, status);
        Ok(())
    }

    fn set_user_profile(&self, user_id: &str, fields: &ProfileFields) -> anyhow::Result<()> {
        tracing::info!("user {} profile -> {} field(s)", user_id, fields.len());
        Ok(())
    }
}
