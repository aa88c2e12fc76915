//! Arithmetic Logic Unit and branch comparator for the Execute stage.
//!
//! `ALUOP` mirrors `funct3` directly for every supported instruction class,
//! so there is no separate opcode enum here: callers pass the raw 3-bit
//! field straight through from the control word.

use crate::common::error::ExecError;

/// Performs the ALU operation named by `aluop` on `a` and `b`.
///
/// `aluop` follows the funct3-mirrored encoding: `0=ADD/SUB, 1=SLL, 2=SLT,
/// 3=SLTU, 4=XOR, 5=SRL/SRA, 6=OR, 7=AND`. ADD/SUB and SRL/SRA share a code;
/// the caller folds the `funct7` alternate-function bit into the `sub`/`arith`
/// flag before calling.
pub struct Alu;

impl Alu {
    /// Executes the ALU op. `alt` selects SUB over ADD at `aluop == 0`, and
    /// SRA over SRL at `aluop == 5`; it is ignored for every other code.
    pub fn execute(aluop: u8, a: u32, b: u32, alt: bool) -> Result<u32, ExecError> {
        const SHAMT_MASK: u32 = 0x1f;
        let result = match aluop {
            0 if alt => a.wrapping_sub(b),
            0 => a.wrapping_add(b),
            1 => a.wrapping_shl(b & SHAMT_MASK),
            2 => ((a as i32) < (b as i32)) as u32,
            3 => (a < b) as u32,
            4 => a ^ b,
            5 if alt => ((a as i32).wrapping_shr(b & SHAMT_MASK)) as u32,
            5 => a.wrapping_shr(b & SHAMT_MASK),
            6 => a | b,
            7 => a & b,
            other => return Err(ExecError::BadALUOP(other)),
        };
        Ok(result)
    }
}

/// Resolves a branch comparator. `aluop` here reuses the branch `funct3`
/// values (`0=BEQ, 1=BNE, 4=BLT, 5=BGE, 6=BLTU, 7=BGEU`), matching the
/// observation that both tables already key off the same 3-bit field.
pub struct Comparator;

impl Comparator {
    pub fn resolve(aluop: u8, a: u32, b: u32) -> Result<bool, ExecError> {
        let taken = match aluop {
            0 => a == b,
            1 => a != b,
            4 => (a as i32) < (b as i32),
            5 => (a as i32) >= (b as i32),
            6 => a < b,
            7 => a >= b,
            other => return Err(ExecError::BadCMPOP(other)),
        };
        Ok(taken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_sub_share_the_zero_code() {
        assert_eq!(Alu::execute(0, 5, 3, false).unwrap(), 8);
        assert_eq!(Alu::execute(0, 5, 3, true).unwrap(), 2);
    }

    #[test]
    fn srl_and_sra_share_code_five_and_differ_on_sign() {
        let a = 0x8000_0000u32;
        assert_eq!(Alu::execute(5, a, 4, false).unwrap(), a >> 4);
        assert_eq!(Alu::execute(5, a, 4, true).unwrap(), (a as i32 >> 4) as u32);
    }

    #[test]
    fn slt_is_signed_sltu_is_unsigned() {
        let neg_one = u32::MAX;
        assert_eq!(Alu::execute(2, neg_one, 1, false).unwrap(), 1);
        assert_eq!(Alu::execute(3, neg_one, 1, false).unwrap(), 0);
    }

    #[test]
    fn unknown_aluop_is_an_error() {
        assert_eq!(Alu::execute(6 + 2, 0, 0, false), Err(ExecError::BadALUOP(8)));
    }

    #[test]
    fn branch_comparators_match_table() {
        assert!(Comparator::resolve(0, 5, 5).unwrap());
        assert!(!Comparator::resolve(1, 5, 5).unwrap());
        assert!(Comparator::resolve(4, u32::MAX, 0).unwrap());
        assert!(!Comparator::resolve(6, u32::MAX, 0).unwrap());
    }

    #[test]
    fn unknown_cmpop_is_an_error() {
        assert_eq!(Comparator::resolve(2, 0, 0), Err(ExecError::BadCMPOP(2)));
    }
}
