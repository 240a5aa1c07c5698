//! Note store abstractions and the in-memory implementation.
//!
//! # Responsibility
//! - Define the keyed note storage contract used by services.
//! - Keep id allocation and map mutation behind one boundary.
//!
//! # Invariants
//! - Store APIs return semantic errors (`NotFound`) instead of panicking.
//! - State is process-local and starts empty on every launch.

pub mod note_store;
