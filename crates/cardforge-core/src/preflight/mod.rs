//! Preflight checks - verify the environment before processing any row
//!
//! A failed preflight aborts the whole run; partial runs with missing
//! preconditions are not supported.

pub mod checks;
pub mod engine;

pub use engine::{
    Check, CheckContext, CheckResult, CheckStatus, PreflightCheck, PreflightEngine, PreflightReport,
};
