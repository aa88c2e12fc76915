//! Instruction encoders for the supported RV32I subset.
//!
//! Builds exact RV32I-encoded instruction words (ADD, ADDI, SUB, BEQ, BNE
//! and the rest of the supported subset) for use as test fixtures.
//! Patterned on `original_source/ISA.h`'s `MakeADDI`/`MakeADD`/`MakeSUB`/
//! `MakeBEQ`/`MakeBNE` C++ constructors, reworked as plain functions
//! returning a `u32` instruction word instead of a bitfield union.

use crate::isa::{alu_funct, branch_funct3, command_bits, load_funct3, store_funct3};

fn r_type(opcode: u32, rd: usize, funct3: u32, rs1: usize, rs2: usize, funct7: u32) -> u32 {
    opcode
        | ((rd as u32) << 7)
        | (funct3 << 12)
        | ((rs1 as u32) << 15)
        | ((rs2 as u32) << 20)
        | (funct7 << 25)
}

fn i_type(opcode: u32, rd: usize, funct3: u32, rs1: usize, imm: i32) -> u32 {
    opcode | ((rd as u32) << 7) | (funct3 << 12) | ((rs1 as u32) << 15) | ((imm as u32) << 20)
}

fn s_type(opcode: u32, funct3: u32, rs1: usize, rs2: usize, imm: i32) -> u32 {
    let imm = imm as u32;
    opcode
        | ((imm & 0x1f) << 7)
        | (funct3 << 12)
        | ((rs1 as u32) << 15)
        | ((rs2 as u32) << 20)
        | (((imm >> 5) & 0x7f) << 25)
}

fn b_type(opcode: u32, funct3: u32, rs1: usize, rs2: usize, imm: i32) -> u32 {
    let imm = imm as u32;
    let imm11 = (imm >> 11) & 0x1;
    let imm4_1 = (imm >> 1) & 0xf;
    let imm10_5 = (imm >> 5) & 0x3f;
    let imm12 = (imm >> 12) & 0x1;
    opcode
        | (imm11 << 7)
        | (imm4_1 << 8)
        | (funct3 << 12)
        | ((rs1 as u32) << 15)
        | ((rs2 as u32) << 20)
        | (imm10_5 << 25)
        | (imm12 << 31)
}

const OPCODE_OP_IMM: u32 = (command_bits::OP_IMM << 2) | 0x3;
const OPCODE_OP: u32 = (command_bits::OP << 2) | 0x3;
const OPCODE_LOAD: u32 = (command_bits::LOAD << 2) | 0x3;
const OPCODE_STORE: u32 = (command_bits::STORE << 2) | 0x3;
const OPCODE_BRANCH: u32 = (command_bits::BRANCH << 2) | 0x3;

/// `ADDI rd, rs1, imm` — `imm` must fit in 12 signed bits (`[-2048, 2047]`).
pub fn make_addi(rd: usize, rs1: usize, imm: i32) -> u32 {
    debug_assert!((-2048..2048).contains(&imm));
    i_type(OPCODE_OP_IMM, rd, alu_funct::ADD_SUB, rs1, imm)
}

/// `ANDI rd, rs1, imm`.
pub fn make_andi(rd: usize, rs1: usize, imm: i32) -> u32 {
    i_type(OPCODE_OP_IMM, rd, 0x7, rs1, imm)
}

/// `ORI rd, rs1, imm`.
pub fn make_ori(rd: usize, rs1: usize, imm: i32) -> u32 {
    i_type(OPCODE_OP_IMM, rd, 0x6, rs1, imm)
}

/// `XORI rd, rs1, imm`.
pub fn make_xori(rd: usize, rs1: usize, imm: i32) -> u32 {
    i_type(OPCODE_OP_IMM, rd, 0x4, rs1, imm)
}

/// `SLTI rd, rs1, imm`.
pub fn make_slti(rd: usize, rs1: usize, imm: i32) -> u32 {
    i_type(OPCODE_OP_IMM, rd, 0x2, rs1, imm)
}

/// `SLTIU rd, rs1, imm`.
pub fn make_sltiu(rd: usize, rs1: usize, imm: i32) -> u32 {
    i_type(OPCODE_OP_IMM, rd, 0x3, rs1, imm)
}

/// `SLLI rd, rs1, shamt` — `shamt` in `[0, 31]`.
pub fn make_slli(rd: usize, rs1: usize, shamt: u32) -> u32 {
    i_type(OPCODE_OP_IMM, rd, 0x1, rs1, (shamt & 0x1f) as i32)
}

/// `SRLI rd, rs1, shamt` — `shamt` in `[0, 31]`.
pub fn make_srli(rd: usize, rs1: usize, shamt: u32) -> u32 {
    i_type(OPCODE_OP_IMM, rd, alu_funct::SRL_SRA, rs1, (shamt & 0x1f) as i32)
}

/// `SRAI rd, rs1, shamt` — `shamt` in `[0, 31]`.
pub fn make_srai(rd: usize, rs1: usize, shamt: u32) -> u32 {
    let imm = ((alu_funct::ALT_FUNCT7 as i32) << 5) | (shamt & 0x1f) as i32;
    i_type(OPCODE_OP_IMM, rd, alu_funct::SRL_SRA, rs1, imm)
}

/// `ADD rd, rs1, rs2`.
pub fn make_add(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(OPCODE_OP, rd, alu_funct::ADD_SUB, rs1, rs2, 0)
}

/// `SUB rd, rs1, rs2`.
pub fn make_sub(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(OPCODE_OP, rd, alu_funct::ADD_SUB, rs1, rs2, alu_funct::ALT_FUNCT7)
}

/// `AND rd, rs1, rs2`.
pub fn make_and(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(OPCODE_OP, rd, 0x7, rs1, rs2, 0)
}

/// `OR rd, rs1, rs2`.
pub fn make_or(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(OPCODE_OP, rd, 0x6, rs1, rs2, 0)
}

/// `XOR rd, rs1, rs2`.
pub fn make_xor(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(OPCODE_OP, rd, 0x4, rs1, rs2, 0)
}

/// `SLL rd, rs1, rs2`.
pub fn make_sll(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(OPCODE_OP, rd, 0x1, rs1, rs2, 0)
}

/// `SRL rd, rs1, rs2`.
pub fn make_srl(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(OPCODE_OP, rd, alu_funct::SRL_SRA, rs1, rs2, 0)
}

/// `SRA rd, rs1, rs2`.
pub fn make_sra(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(OPCODE_OP, rd, alu_funct::SRL_SRA, rs1, rs2, alu_funct::ALT_FUNCT7)
}

/// `SLT rd, rs1, rs2`.
pub fn make_slt(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(OPCODE_OP, rd, 0x2, rs1, rs2, 0)
}

/// `SLTU rd, rs1, rs2`.
pub fn make_sltu(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(OPCODE_OP, rd, 0x3, rs1, rs2, 0)
}

/// `LB rd, offset(rs1)`.
pub fn make_lb(rd: usize, rs1: usize, offset: i32) -> u32 {
    i_type(OPCODE_LOAD, rd, load_funct3::LB, rs1, offset)
}

/// `LH rd, offset(rs1)`.
pub fn make_lh(rd: usize, rs1: usize, offset: i32) -> u32 {
    i_type(OPCODE_LOAD, rd, load_funct3::LH, rs1, offset)
}

/// `LW rd, offset(rs1)`.
pub fn make_lw(rd: usize, rs1: usize, offset: i32) -> u32 {
    i_type(OPCODE_LOAD, rd, load_funct3::LW, rs1, offset)
}

/// `LBU rd, offset(rs1)`.
pub fn make_lbu(rd: usize, rs1: usize, offset: i32) -> u32 {
    i_type(OPCODE_LOAD, rd, load_funct3::LBU, rs1, offset)
}

/// `LHU rd, offset(rs1)`.
pub fn make_lhu(rd: usize, rs1: usize, offset: i32) -> u32 {
    i_type(OPCODE_LOAD, rd, load_funct3::LHU, rs1, offset)
}

/// `SB rs2, offset(rs1)`.
pub fn make_sb(rs1: usize, rs2: usize, offset: i32) -> u32 {
    s_type(OPCODE_STORE, store_funct3::SB, rs1, rs2, offset)
}

/// `SH rs2, offset(rs1)`.
pub fn make_sh(rs1: usize, rs2: usize, offset: i32) -> u32 {
    s_type(OPCODE_STORE, store_funct3::SH, rs1, rs2, offset)
}

/// `SW rs2, offset(rs1)`.
pub fn make_sw(rs1: usize, rs2: usize, offset: i32) -> u32 {
    s_type(OPCODE_STORE, store_funct3::SW, rs1, rs2, offset)
}

/// `BEQ rs1, rs2, delta` — `delta` must fit in 13 signed bits with LSB 0.
pub fn make_beq(rs1: usize, rs2: usize, delta: i32) -> u32 {
    debug_assert!((-4096..4096).contains(&delta) && delta % 2 == 0);
    b_type(OPCODE_BRANCH, branch_funct3::BEQ, rs1, rs2, delta)
}

/// `BNE rs1, rs2, delta`.
pub fn make_bne(rs1: usize, rs2: usize, delta: i32) -> u32 {
    debug_assert!((-4096..4096).contains(&delta) && delta % 2 == 0);
    b_type(OPCODE_BRANCH, branch_funct3::BNE, rs1, rs2, delta)
}

/// `BLT rs1, rs2, delta`.
pub fn make_blt(rs1: usize, rs2: usize, delta: i32) -> u32 {
    b_type(OPCODE_BRANCH, branch_funct3::BLT, rs1, rs2, delta)
}

/// `BGE rs1, rs2, delta`.
pub fn make_bge(rs1: usize, rs2: usize, delta: i32) -> u32 {
    b_type(OPCODE_BRANCH, branch_funct3::BGE, rs1, rs2, delta)
}

/// `BLTU rs1, rs2, delta`.
pub fn make_bltu(rs1: usize, rs2: usize, delta: i32) -> u32 {
    b_type(OPCODE_BRANCH, branch_funct3::BLTU, rs1, rs2, delta)
}

/// `BGEU rs1, rs2, delta`.
pub fn make_bgeu(rs1: usize, rs2: usize, delta: i32) -> u32 {
    b_type(OPCODE_BRANCH, branch_funct3::BGEU, rs1, rs2, delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa;

    #[test]
    fn add_decodes_to_op_command_with_zero_funct7() {
        let word = make_add(1, 2, 3);
        assert_eq!(isa::command(word), command_bits::OP);
        assert_eq!(isa::rd(word), 1);
        assert_eq!(isa::rs1(word), 2);
        assert_eq!(isa::rs2(word), 3);
        assert_eq!(isa::funct3(word), alu_funct::ADD_SUB);
        assert_eq!(isa::funct7(word), 0);
    }

    #[test]
    fn sub_sets_the_alt_funct7_bit() {
        let word = make_sub(1, 2, 3);
        assert_eq!(isa::funct7(word), alu_funct::ALT_FUNCT7);
    }

    #[test]
    fn addi_round_trips_its_immediate() {
        let word = make_addi(5, 0, -17);
        assert_eq!(isa::i_imm(word), -17);
        assert_eq!(isa::rd(word), 5);
    }

    #[test]
    fn beq_and_bne_share_layout_but_differ_in_funct3() {
        let beq = make_beq(1, 2, 16);
        let bne = make_bne(1, 2, 16);
        assert_eq!(isa::funct3(beq), branch_funct3::BEQ);
        assert_eq!(isa::funct3(bne), branch_funct3::BNE);
        assert_eq!(isa::b_imm(beq), 16);
        assert_eq!(isa::b_imm(bne), 16);
    }

    #[test]
    fn store_word_round_trips_offset_and_operands() {
        let word = make_sw(8, 9, -4);
        assert_eq!(isa::s_imm(word), -4);
        assert_eq!(isa::rs1(word), 8);
        assert_eq!(isa::rs2(word), 9);
    }
}
