//! Core data models for the scheduling engine.
//!
//! This module contains all the domain models used throughout the engine.

mod batch;
mod employee_shifts;
mod shift;
mod week;
mod week_summary;

pub use batch::{DocumentRef, FieldOp, WriteBatch};
pub use employee_shifts::EmployeeShifts;
pub use shift::{Shift, ShiftPatch, ShiftStatus, ShiftTask, shift_time};
pub use week::{WeekId, iso_weekday};
pub use week_summary::{DaySummary, EmployeeWageSummary, WageTotals, WeekSummary};
