//! On-call rotation report.
//!
//! This crate turns an on-call schedule timeline into per-person totals of
//! assigned time and of "valid" night-shift time (19:00 to 07:00 local, with
//! weekends and holidays counting in full).

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod source;
