//! Closed error taxonomy for the simulator.
//!
//! Every failure surface in the core — decode, execute, memory, and the
//! signal graph evaluator — reports one of a small, closed set of error
//! kinds rather than panicking or unwinding. All four sub-enums fold into
//! [`SimError`], the single failure surface the driver contract observes.

use thiserror::Error;

use crate::signal::EvalError;

/// Errors raised while decoding an instruction word.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Opcode's low two bits were not `11`: not a base RV32I encoding.
    #[error("opcode {0:#04x} is not a 32-bit base RV32I encoding")]
    NotBase(u32),
    /// Opcode family recognized but explicitly out of scope (LUI, AUIPC,
    /// JAL, JALR, FENCE/FENCE.I, ECALL/EBREAK, CSR).
    #[error("opcode family {0:#04x} is recognized but not implemented")]
    Unsupported(u32),
}

/// Errors raised while executing a decoded instruction.
///
/// These indicate a control-word field outside its documented range, which
/// can only happen if the decoder produced a bad control word — i.e. a
/// decoder bug, not a property of the input program.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExecError {
    /// `ALUOP` field held a value with no defined ALU function.
    #[error("control word ALUOP {0} has no defined ALU function")]
    BadALUOP(u8),
    /// `ALUOP` field held a value with no defined branch comparator.
    #[error("control word ALUOP {0} has no defined branch comparator")]
    BadCMPOP(u8),
    /// `SRC2` field held a value with no defined operand source.
    #[error("control word SRC2 {0} has no defined operand source")]
    BadSRC2(u8),
}

/// Errors raised by instruction or data memory access.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MemError {
    /// Fetch reached an address past the loaded instruction image.
    #[error("instruction fetch at word index {0} is out of range")]
    InstructionFetchOutOfRange(usize),
    /// A memory access width code was not one of {1, 2, 4} bytes.
    #[error("data memory access width {0} is not 1, 2, or 4 bytes")]
    DataBadWidth(u32),
}

/// The simulator's single failure surface: every sub-taxonomy folds in via
/// `#[from]`, so callers can propagate with `?` regardless of which
/// subsystem raised the error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// Failure during instruction decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// Failure during instruction execution.
    #[error(transparent)]
    Exec(#[from] ExecError),
    /// Failure during a memory access.
    #[error(transparent)]
    Mem(#[from] MemError),
    /// Failure in the signal graph evaluator.
    #[error(transparent)]
    Eval(#[from] EvalError),
}
