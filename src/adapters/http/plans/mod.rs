//! HTTP adapter for lesson plan endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    GeneratePlanRequest, PlanListResponse, PlanResponse, SavePlanRequest, StudyMaterialsResponse,
};
pub use handlers::PlanHandlers;
pub(crate) use handlers::parse_plan_id;
pub use routes::plan_routes;
