//! Deterministic, pure logic for the gate.
//!
//! Core modules must be free of I/O side effects.

pub mod verdict;
