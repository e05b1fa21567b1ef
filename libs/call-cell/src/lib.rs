// =====================================================================================
// CALL CELL - POST-CALL PROCESSING & CALL LOGS
// =====================================================================================
//
// Ingests finished calls from the voice platform, runs them through the
// sentiment/crisis analyzer and persists the call with its crisis flags.
// Also serves the call log, per-call summaries and the dashboard counters.
//
// =====================================================================================

pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{AnalysisSummary, CallError, DashboardStats, PostCallRequest, PostCallResponse};
pub use router::create_call_router;
pub use services::{CallService, PostCallService};
