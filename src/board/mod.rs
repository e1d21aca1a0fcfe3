//! Personal board organizer core.
//!
//! A board holds workflow columns, blocks (named task groupings with their
//! own tasks, column expansion state, and weekly schedule map), and
//! recurring task templates that expand into dated occurrences on demand.
//! The module follows hexagonal architecture:
//!
//! - Domain types and pure algorithms in [`domain`]
//! - Port contracts for persistence and ingestion in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
