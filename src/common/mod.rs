//! Common types shared across the simulator.
//!
//! This module provides the closed error taxonomy and the register file
//! used throughout the pipeline core.

/// Error types and the closed error taxonomy.
pub mod error;

/// The 32-entry integer register file.
pub mod reg;

pub use error::{DecodeError, ExecError, MemError, SimError};
pub use reg::RegisterFile;
