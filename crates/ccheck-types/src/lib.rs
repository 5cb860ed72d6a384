//! Stable DTOs and IDs used across the ccheck workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted JSON report
//! - stable string IDs for error kinds
//! - the message class shared by the classifier and the report

#![forbid(unsafe_code)]

pub mod ids;
pub mod receipt;

pub use receipt::{
    CheckReport, ErrorEntry, FileReport, FileStatus, MessageClass, MessageEntry, ReportCounts,
    ReportSettings, RunMeta, ToolMeta, Verdict, SCHEMA_REPORT_V1,
};
