//! Unit tests for the board module.
//!
//! Tests are organised by component: column registry, recurrence
//! expansion, movement, the board store, listings, snapshots, ingestion
//! routing, and the persisting service.

mod support;
