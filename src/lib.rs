//! Shift-scheduling engine for weekly workforce rosters.
//!
//! This crate models a week of work shifts per employee per location,
//! computes wages (including weekly- and daily-cap overtime), tracks the
//! draft/published/pending-deletion lifecycle of each shift, aggregates
//! week-level wage statistics, detects scheduling conflicts, and assembles
//! the atomic publish/unpublish/clone batches that an external document
//! store commits.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod schedule;
