//! Cash-shift reconciliation and verification engine.
//!
//! Staff record revenue, transfers, counted cash and expenses for each
//! shift. This crate derives the financial figures for those records,
//! enforces who may see and change them, moves them through verification,
//! and aggregates them for reporting.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod directory;
pub mod error;
pub mod models;
pub mod repository;
pub mod workflow;
