//! The pipeline core: ALU and branch comparator, control-word decoding,
//! forwarding/hazard logic, stage-boundary latches, data memory, the five
//! pipeline stages, and the [`cpu::Cpu`] that ties them together.

/// Integer ALU and branch comparator (Execute).
pub mod alu;

/// Control-word generation from an instruction's opcode fields.
pub mod control;

/// The CPU: register file, memories, latches, and the per-cycle tick.
pub mod cpu;

/// Data memory for the Memory stage.
pub mod dmem;

/// Operand forwarding and load-use stall detection.
pub mod hazard;

/// Stage-boundary latches (pipeline flip-flops).
pub mod latches;

/// The five pipeline stage functions.
pub mod stages;

pub use cpu::Cpu;
