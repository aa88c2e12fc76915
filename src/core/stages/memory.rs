//! Memory.
//!
//! Performs the data memory access for loads and stores, decoding the
//! access width and sign from the control word's width code, and selects
//! what rides forward to Writeback: the loaded word for `MEM2REG`
//! instructions, the ALU result otherwise.

use crate::core::control::MemAccess;
use crate::core::cpu::Cpu;
use crate::core::latches::MemWbLatch;
use crate::SimError;

pub fn run(cpu: &mut Cpu) -> Result<(), SimError> {
    let ex_mem = cpu.ex_mem;

    if !ex_mem.valid {
        cpu.next_mem_wb = MemWbLatch::default();
        return Ok(());
    }

    let write_value = if ex_mem.mem2reg {
        let access = MemAccess::from_funct3(ex_mem.width)?;
        let loaded = cpu.dmem.read(ex_mem.alu_result, access.size, access.signed)?;
        if cpu.trace {
            eprintln!("MEM addr={:#x} load={:#x}", ex_mem.alu_result, loaded);
        }
        loaded
    } else {
        if ex_mem.mem_wen {
            let access = MemAccess::from_funct3(ex_mem.width)?;
            cpu.dmem.write(ex_mem.alu_result, access.size, ex_mem.store_value)?;
            if cpu.trace {
                eprintln!("MEM addr={:#x} store={:#x}", ex_mem.alu_result, ex_mem.store_value);
            }
        }
        ex_mem.alu_result
    };

    cpu.next_mem_wb = MemWbLatch {
        write_value,
        rd: ex_mem.rd,
        reg_wen: ex_mem.reg_wen,
        valid: true,
    };
    Ok(())
}
