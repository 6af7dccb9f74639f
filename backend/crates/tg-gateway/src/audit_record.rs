use chrono::{SecondsFormat, Utc};
use log::{debug, info};
use serde::Serialize;

/// Log target audit lines are written under
pub const AUDIT_TARGET: &str = "audit";

/// Placeholder for a tenant or actor that is not known
pub const UNKNOWN_FIELD: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStage {
    Request,
    Response,
}

/// One structured audit line. Built at request start, completed with the
/// response, then handed to the logger and dropped.
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    pub ts: String,
    pub rid: String,
    pub tenant: String,
    pub actor: String,
    pub method: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub stage: AuditStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl AuditRecord {
    pub fn request(
        request_id: &str,
        tenant: Option<&str>,
        method: &str,
        path: &str,
        query: Option<&str>,
    ) -> Self {
        Self {
            ts: now(),
            rid: request_id.to_string(),
            tenant: tenant.unwrap_or(UNKNOWN_FIELD).to_string(),
            actor: UNKNOWN_FIELD.to_string(),
            method: method.to_string(),
            path: path.to_string(),
            query: query.filter(|q| !q.is_empty()).map(str::to_string),
            stage: AuditStage::Request,
            status: None,
            duration_ms: None,
        }
    }

    /// The matching response line; the query string is not repeated
    pub fn response(&self, actor: Option<&str>, status: u16, duration_ms: u64) -> Self {
        Self {
            ts: now(),
            actor: actor.unwrap_or(UNKNOWN_FIELD).to_string(),
            query: None,
            stage: AuditStage::Response,
            status: Some(status),
            duration_ms: Some(duration_ms),
            ..self.clone()
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Best effort: a record that cannot be serialized is dropped
    pub fn emit(&self) {
        match self.to_json() {
            Ok(line) => info!(target: AUDIT_TARGET, "{line}"),
            Err(e) => debug!("[req={}] audit record dropped: {e}", self.rid),
        }
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
