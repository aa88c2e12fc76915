//! Instruction Decode.
//!
//! Reads the currently-latched fetch result, builds the control word, reads
//! the register file, resolves the decoded immediate for the instruction's
//! format, and checks for a load-use hazard against the instruction now in
//! Execute. Runs after Execute (so it already knows this cycle's branch
//! outcome) and before Fetch (so Fetch can see the stall decision).

use crate::core::cpu::Cpu;
use crate::core::latches::IdExLatch;
use crate::core::{control, hazard};
use crate::isa;
use crate::isa::command_bits;
use crate::SimError;

pub fn run(cpu: &mut Cpu) -> Result<(), SimError> {
    let if_id = cpu.if_id;

    if !if_id.valid {
        cpu.stall = false;
        cpu.next_id_ex = IdExLatch::default();
        return Ok(());
    }

    let inst = if_id.instruction;
    if !isa::is_base_encoding(inst) {
        return Err(crate::common::error::DecodeError::NotBase(inst).into());
    }

    let command = isa::command(inst);
    let rs1 = isa::rs1(inst);
    let rs2 = isa::rs2(inst);
    let rd = isa::rd(inst);
    let cw = control::decode_control(command, isa::funct3(inst), isa::funct7(inst))?;

    let imm = match command {
        command_bits::STORE => isa::s_imm(inst),
        command_bits::BRANCH => isa::b_imm(inst),
        _ => isa::i_imm(inst),
    };

    cpu.stall = hazard::need_stall_load_use(cpu.id_ex.control.load, cpu.id_ex.rd, rs1, rs2);

    if cpu.trace {
        eprintln!(
            "ID  pc={:#x} inst={:#010x} rs1=x{rs1} rs2=x{rs2} rd=x{rd} imm={imm} stall={}",
            if_id.pc_de, cpu.stall
        );
    }

    if cpu.stall || cpu.branch_taken {
        cpu.next_id_ex = IdExLatch::default();
        return Ok(());
    }

    cpu.next_id_ex = IdExLatch {
        control: cw,
        rs1_val: cpu.regs.read(rs1),
        rs2_val: cpu.regs.read(rs2),
        rs1,
        rs2,
        rd,
        imm,
        pc: if_id.pc_de,
        valid: true,
    };
    Ok(())
}
