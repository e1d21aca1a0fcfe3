//! Blockboard: the core of a personal task board organizer.
//!
//! Tasks live in blocks and move through workflow columns. Recurring
//! templates expand into per-day occurrences without being stored, and
//! free-text ingestion turns loosely typed drafts into board entries.
//!
//! # Architecture
//!
//! Blockboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board state and algorithms with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for persistence and ingestion
//! - **Adapters**: Concrete implementations of ports (memory, JSON files)
//!
//! # Modules
//!
//! - [`board`]: Columns, blocks, tasks, recurrence, and their services

pub mod board;
