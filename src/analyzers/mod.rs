//! Delay statistics over normalized flight records.
//!
//! [`bucket`] classifies delays and turns record sets into reconciled
//! percentages, [`aggregate`] slices one direction's records along the
//! dashboard dimensions, and [`report`] assembles both directions into the
//! final payload. None of these do I/O; [`analyzer`] wires them to files.

pub mod aggregate;
pub mod analyzer;
pub mod bucket;
pub mod report;
pub mod types;
pub mod utility;
