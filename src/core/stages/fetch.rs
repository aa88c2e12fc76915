//! Instruction Fetch.
//!
//! Runs last in the per-cycle evaluation order, after Execute has resolved
//! any branch and Decode has determined whether a load-use stall is in
//! effect — both of which Fetch needs in order to decide what to fetch
//! next.

use crate::core::cpu::Cpu;
use crate::core::latches::IfIdLatch;
use crate::SimError;

pub fn run(cpu: &mut Cpu) -> Result<(), SimError> {
    if cpu.stall {
        // Hold the currently-latched instruction in place so Decode sees
        // it again next cycle, once the load it's waiting on clears MEM.
        cpu.next_if_id = cpu.if_id;
        return Ok(());
    }

    let pc = if cpu.branch_taken { cpu.branch_target } else { cpu.pc };
    let index = (pc / 4) as usize;

    match cpu.imem.get(index).copied() {
        Some(instruction) => {
            if cpu.trace {
                eprintln!("IF  pc={:#x} inst={:#010x}", pc, instruction);
            }
            cpu.next_if_id = IfIdLatch { instruction, pc_de: pc, valid: true };
        }
        None => {
            // Fetch walked off the end of the loaded image: a normal halt
            // condition, not a hard failure.
            cpu.halted = true;
            cpu.next_if_id = IfIdLatch::default();
        }
    }
    cpu.pc = pc.wrapping_add(4);
    Ok(())
}
