//! Test support shared by the workspace crates: idempotent test logging and
//! Problem Details assertions.

pub mod logging;
pub mod problem_details;
