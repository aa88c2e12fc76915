//! Control word generation: maps an instruction's `command`/`funct3` fields
//! to the small set of control signals the rest of the pipeline consumes.
//!
//! The control word is produced once, in Decode, and rides the ID/EX latch
//! to Execute, Memory, and Writeback rather than being re-derived at each
//! stage — matching how the named wires `REG_WEN`, `MEM_WEN`, `MEM2REG`, and
//! `BRN_COND` are described as single decode-stage outputs in the signal
//! graph.

use crate::common::error::{DecodeError, ExecError};
use crate::isa::{alu_funct, command_bits};

/// Selects the second ALU operand. Mirrors the full operand-source space —
/// `rs2`, or one of the five immediate formats — even though this
/// instruction subset only ever produces `Reg`, `ImmI`, or `ImmS`: `ImmU`
/// and `ImmJ` exist for instruction families (LUI/AUIPC, JAL) this
/// simulator doesn't implement. Whichever `Imm*` variant is selected,
/// Execute reads the immediate decode.rs already extracted in the matching
/// format, rather than re-deriving it here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Src2 {
    Reg,
    ImmI,
    ImmS,
    ImmB,
    ImmU,
    ImmJ,
}

impl Src2 {
    /// Resolves the operand source for a recognized opcode family. Every
    /// caller here already matched `command` against a known family, so
    /// this only fails if a new command value is threaded through without
    /// a corresponding arm — kept as its own checked step rather than
    /// assumed correct by construction.
    pub fn from_command(command: u32) -> Result<Self, ExecError> {
        match command {
            command_bits::OP | command_bits::BRANCH => Ok(Src2::Reg),
            command_bits::OP_IMM | command_bits::LOAD => Ok(Src2::ImmI),
            command_bits::STORE => Ok(Src2::ImmS),
            other => Err(ExecError::BadSRC2(other as u8)),
        }
    }
}

/// The decode-stage control signals threaded through the back half of the
/// pipeline. `aluop` mirrors `funct3` directly (see [`crate::core::alu`]);
/// `alt` is the folded `funct7` alternate-function bit (ADD/SUB, SRL/SRA).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlWord {
    pub aluop: u8,
    pub alt: bool,
    pub src2: Src2,
    pub reg_wen: bool,
    pub mem_wen: bool,
    pub mem2reg: bool,
    pub branch: bool,
    pub load: bool,
    /// Load/store width+sign code (the instruction's `funct3`), carried
    /// separately from `aluop` since address generation always uses plain
    /// ADD regardless of access width.
    pub width: u32,
}

impl ControlWord {
    /// A control word for an instruction decode never reaches (squashed
    /// bubble, or startup). Every write-enable is off.
    pub fn bubble() -> Self {
        Self {
            aluop: 0,
            alt: false,
            src2: Src2::Reg,
            reg_wen: false,
            mem_wen: false,
            mem2reg: false,
            branch: false,
            load: false,
            width: 0,
        }
    }
}

/// Builds the control word for an instruction given its `command` field
/// (`opcode[6:2]`), `funct3`, and `funct7`. This is the single point where
/// the opcode space is classified; every other stage consumes the resulting
/// [`ControlWord`] rather than re-inspecting the instruction word.
pub fn decode_control(command: u32, funct3: u32, funct7: u32) -> Result<ControlWord, DecodeError> {
    let alt = funct7 == alu_funct::ALT_FUNCT7;
    let src2 = Src2::from_command(command).map_err(|_| DecodeError::Unsupported(command))?;
    match command {
        command_bits::OP => Ok(ControlWord {
            aluop: funct3 as u8,
            alt,
            src2,
            reg_wen: true,
            mem_wen: false,
            mem2reg: false,
            branch: false,
            load: false,
            width: 0,
        }),
        command_bits::OP_IMM => Ok(ControlWord {
            aluop: funct3 as u8,
            alt: funct3 == alu_funct::SRL_SRA && alt,
            src2,
            reg_wen: true,
            mem_wen: false,
            mem2reg: false,
            branch: false,
            load: false,
            width: 0,
        }),
        command_bits::LOAD => Ok(ControlWord {
            aluop: 0,
            alt: false,
            src2,
            reg_wen: true,
            mem_wen: false,
            mem2reg: true,
            branch: false,
            load: true,
            width: funct3,
        }),
        command_bits::STORE => Ok(ControlWord {
            aluop: 0,
            alt: false,
            src2,
            reg_wen: false,
            mem_wen: true,
            mem2reg: false,
            branch: false,
            load: false,
            width: funct3,
        }),
        command_bits::BRANCH => Ok(ControlWord {
            aluop: funct3 as u8,
            alt: false,
            src2,
            reg_wen: false,
            mem_wen: false,
            mem2reg: false,
            branch: true,
            load: false,
            width: 0,
        }),
        other => Err(DecodeError::Unsupported(other)),
    }
}

/// The `{sign, size}` decomposition of a load/store's width and signedness,
/// derived from the `funct3` value stashed in the control word's `width`
/// field at decode time — resolved as its own explicit step rather than
/// manual bit masking at the memory stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemAccess {
    pub size: u32,
    pub signed: bool,
}

impl MemAccess {
    /// `funct3` here is the load/store width code; loads and stores share
    /// the same width encoding for the widths they hold in common.
    pub fn from_funct3(funct3: u32) -> Result<Self, DecodeError> {
        let (size, signed) = match funct3 {
            0x0 => (1, true),
            0x1 => (2, true),
            0x2 => (4, true),
            0x4 => (1, false),
            0x5 => (2, false),
            other => return Err(DecodeError::Unsupported(other)),
        };
        Ok(Self { size, signed })
    }
}
