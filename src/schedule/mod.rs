//! Schedule lifecycle orchestration.
//!
//! This module coordinates the week-level operations: publishing or
//! unpublishing an entire week as one atomic batch, and cloning a week's
//! shifts into another week. Every operation receives its context
//! explicitly and returns a server batch paired with the matching local
//! state for the caller to apply speculatively.

mod clone_week;
mod context;
mod publish;

pub use clone_week::{ClonePlan, EMPLOYEE_QUERY_CHUNK, chunk_employee_ids, clone_week};
pub use context::{NotificationScope, ScheduleContext, notification_recipients};
pub use publish::{PublishPlan, UnpublishPlan, publish, unpublish};
