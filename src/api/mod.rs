//! Admin analytics HTTP API.
//!
//! Exposes the read-only aggregates as JSON endpoints under
//! `/api/admin/`, protected by an auth → audit middleware stack.
//! `admin_api_router()` returns a `Router` that can be mounted on any
//! axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::admin_api_router;
pub use server::{start_api_server_on, ApiServer, ApiSession, ServerError};
pub use types::ApiContext;
