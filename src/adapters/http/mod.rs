//! HTTP adapters - REST API implementations.
//!
//! Each area has its own dto/handlers/routes module; `router` stitches
//! them together behind the shared middleware stack.

pub mod accounts;
pub mod error;
pub mod export;
pub mod middleware;
pub mod plans;
mod router;

pub use accounts::{account_routes, AccountHandlers};
pub use error::ErrorResponse;
pub use export::{export_routes, plan_export_routes, ExportHandlers};
pub use plans::{plan_routes, PlanHandlers};
pub use router::{app_router, ApiHandlers};
