//! Execute.
//!
//! Resolves operand forwarding from the instructions now sitting in
//! EX/MEM and MEM/WB, runs the ALU (or the branch comparator), and — for
//! branches — decides whether to squash the instructions behind it. Runs
//! before Decode and Fetch so both can observe this cycle's branch outcome,
//! and after Memory so forwarding sees last cycle's EX/MEM and MEM/WB
//! contents rather than stale ones.

use crate::core::alu::{Alu, Comparator};
use crate::core::cpu::Cpu;
use crate::core::hazard::{self, Forward, ForwardSource};
use crate::core::latches::ExMemLatch;
use crate::core::control::Src2;
use crate::SimError;

pub fn run(cpu: &mut Cpu) -> Result<(), SimError> {
    let id_ex = cpu.id_ex;

    if !id_ex.valid {
        cpu.branch_taken = false;
        cpu.next_ex_mem = ExMemLatch::default();
        return Ok(());
    }

    let ex_mem_src = ForwardSource {
        rd: cpu.ex_mem.rd,
        value: cpu.ex_mem.alu_result,
        reg_wen: cpu.ex_mem.reg_wen && !cpu.ex_mem.mem2reg,
    };
    let mem_wb_src = ForwardSource {
        rd: cpu.mem_wb.rd,
        value: cpu.mem_wb.write_value,
        reg_wen: cpu.mem_wb.reg_wen,
    };

    let rs1_val = match hazard::resolve(id_ex.rs1, &ex_mem_src, &mem_wb_src) {
        Forward::FromMem => ex_mem_src.value,
        Forward::FromWb => mem_wb_src.value,
        Forward::None => id_ex.rs1_val,
    };
    let rs2_val = match hazard::resolve(id_ex.rs2, &ex_mem_src, &mem_wb_src) {
        Forward::FromMem => ex_mem_src.value,
        Forward::FromWb => mem_wb_src.value,
        Forward::None => id_ex.rs2_val,
    };

    let cw = id_ex.control;
    let operand_b = match cw.src2 {
        Src2::Reg => rs2_val,
        Src2::ImmI | Src2::ImmS | Src2::ImmB | Src2::ImmU | Src2::ImmJ => id_ex.imm as u32,
    };

    if cw.branch {
        let taken = Comparator::resolve(cw.aluop, rs1_val, rs2_val)?;
        cpu.branch_taken = taken;
        cpu.branch_target = id_ex.pc.wrapping_add(id_ex.imm as u32);
        cpu.next_ex_mem = ExMemLatch::default();
        if cpu.trace {
            eprintln!("EX  pc={:#x} branch taken={taken} target={:#x}", id_ex.pc, cpu.branch_target);
        }
        return Ok(());
    }

    cpu.branch_taken = false;
    let alu_result = Alu::execute(cw.aluop, rs1_val, operand_b, cw.alt)?;

    if cpu.trace {
        eprintln!("EX  pc={:#x} alu={:#x}", id_ex.pc, alu_result);
    }

    cpu.next_ex_mem = ExMemLatch {
        alu_result,
        store_value: rs2_val,
        rd: id_ex.rd,
        reg_wen: cw.reg_wen,
        mem_wen: cw.mem_wen,
        mem2reg: cw.mem2reg,
        width: cw.width,
        valid: true,
    };
    Ok(())
}
