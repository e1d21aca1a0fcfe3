//! Step definitions for recurrence expansion scenarios.

mod given;
mod then;
mod when;
pub mod world;
