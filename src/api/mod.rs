//! HTTP API module for the scheduling engine.
//!
//! This module provides the REST API endpoints for computing week
//! summaries and assembling publish, unpublish, and clone-week plans.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CloneWeekRequest, OvertimeOverride, PublishRequest, SummaryRequest, UnpublishRequest,
};
pub use response::ApiError;
pub use state::AppState;
