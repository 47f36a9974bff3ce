//! Thread-safe versions of the containers in this crate.
//!
//! Each type owns one unsynchronized container behind a [`parking_lot::RwLock`]. Read-only
//! operations take the shared lock, mutating operations take the exclusive lock, and no lock is
//! held between calls. Range queries return owned copies, since a slice into the container could
//! be invalidated by the next writer as soon as the lock is released.
pub mod map;
pub mod projected;
pub mod set;
