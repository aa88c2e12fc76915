//! Writeback.
//!
//! Commits the value latched in MEM/WB to the register file. Runs first in
//! the per-cycle order (conceptually the tail of the pipeline), so every
//! later stage this cycle sees the committed register state rather than a
//! half-written one — though Execute never actually needs to, since
//! forwarding covers every hazard writeback could otherwise cause.

use crate::core::cpu::Cpu;
use crate::SimError;

pub fn run(cpu: &mut Cpu) -> Result<(), SimError> {
    let mem_wb = cpu.mem_wb;
    if mem_wb.valid && mem_wb.reg_wen {
        cpu.regs.write(mem_wb.rd, mem_wb.write_value);
        if cpu.trace {
            eprintln!("WB  rd=x{} v={:#x}", mem_wb.rd, mem_wb.write_value);
        }
    }
    if mem_wb.valid {
        cpu.retired += 1;
    }
    Ok(())
}
