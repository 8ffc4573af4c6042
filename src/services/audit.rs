//! Best-effort audit recording.
//!
//! The sink is injected into handlers as a notification channel: a failed
//! write is logged and swallowed, never surfaced to the caller of the
//! primary operation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::infra::{AuditEntry, UnitOfWork};

impl AuditEntry {
    pub fn new(user_id: uuid::Uuid, screen: &str, action: &str) -> Self {
        Self {
            user_id,
            screen: screen.to_string(),
            action: action.to_string(),
            details: None,
            ip_address: None,
            user_agent: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_client(mut self, ip_address: Option<String>, user_agent: Option<String>) -> Self {
        self.ip_address = ip_address;
        self.user_agent = user_agent;
        self
    }
}

/// Fire-and-forget audit sink.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, entry: AuditEntry);
}

/// Sink implementation that appends to the audit log table.
pub struct AuditRecorder<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AuditRecorder<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuditSink for AuditRecorder<U> {
    async fn record(&self, entry: AuditEntry) {
        let screen = entry.screen.clone();
        let action = entry.action.clone();

        if let Err(e) = self.uow.audit_logs().insert(entry).await {
            tracing::warn!(screen = %screen, action = %action, "Failed to write audit log: {}", e);
        }
    }
}
