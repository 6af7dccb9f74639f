pub mod admission;
pub mod audit;
pub mod audit_record;
pub mod auth_gateway;
pub mod auth_requirement;
pub mod client_identity;
pub mod error;
pub mod gate_context;
pub mod gate_layer;
pub mod gate_request;
pub mod gate_stage;
pub mod gateway_metrics;
pub mod gateway_state;
pub mod in_memory_tenant_directory;
pub mod rejection;
pub mod request_id;
pub mod route_policy;
pub mod sqlite_tenant_directory;
pub mod tenant_directory;
pub mod tenant_record;
pub mod tenant_requirement;
pub mod tenant_status;

pub use admission::Admission;
pub use audit::{AuditActor, audit};
pub use audit_record::{AUDIT_TARGET, AuditRecord, AuditStage, UNKNOWN_FIELD};
pub use auth_gateway::AuthGateway;
pub use auth_requirement::AuthRequirement;
pub use client_identity::{UNKNOWN_CLIENT, X_FORWARDED_FOR, client_identity};
pub use error::{GatewayError, Result};
pub use gate_context::GateContext;
pub use gate_layer::{GateLayer, GateMiddleware};
pub use gate_request::GateRequest;
pub use gate_stage::GateStage;
pub use gateway_metrics::GatewayMetrics;
pub use gateway_state::GatewayState;
pub use in_memory_tenant_directory::InMemoryTenantDirectory;
pub use rejection::{Rejection, RejectionBody};
pub use request_id::{RequestId, X_REQUEST_ID};
pub use route_policy::RoutePolicy;
pub use sqlite_tenant_directory::SqliteTenantDirectory;
pub use tenant_directory::TenantDirectory;
pub use tenant_record::TenantRecord;
pub use tenant_requirement::TenantRequirement;
pub use tenant_status::TenantStatus;

#[cfg(test)]
mod tests;
