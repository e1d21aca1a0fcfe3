//! Step definitions for board movement scenarios.

mod given;
mod then;
mod when;
pub mod world;
