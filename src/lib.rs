//! DDT: Drivetrain Design Toolkit
//!
//! A batch toolkit for selecting viable two-stage gear reductions from
//! off-the-shelf gear catalogs: per-gear eligibility, exhaustive tuple
//! enumeration with structural pruning, torque-based width optimization,
//! and system-level filtering.

pub mod catalog;
pub mod cli;
pub mod core;
pub mod report;
