//! Operand forwarding and load-use stall detection.
//!
//! Forwarding compares the EX-stage source registers against the
//! destination registers latched in EX/MEM and MEM/WB, preferring the
//! fresher (EX/MEM) value when both match. Register 0 never forwards: it is
//! wired to zero everywhere, so a destination of 0 can never be a hazard
//! source regardless of what the write-enable bit says.

/// Which stage, if any, a source operand should be forwarded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forward {
    None,
    FromMem,
    FromWb,
}

/// One latched instruction's forwarding-relevant fields: its destination
/// register, the value it would write, and whether it writes at all.
#[derive(Debug, Clone, Copy)]
pub struct ForwardSource {
    pub rd: usize,
    pub value: u32,
    pub reg_wen: bool,
}

fn forwards(src: &ForwardSource, needed: usize) -> bool {
    src.reg_wen && src.rd != 0 && src.rd == needed
}

/// Resolves which stage (if either) should forward into a source register
/// read in Execute. MEM/WB is checked first so a simultaneous EX/MEM match
/// overrides it: the EX/MEM value is newer.
pub fn resolve(needed: usize, ex_mem: &ForwardSource, mem_wb: &ForwardSource) -> Forward {
    if forwards(ex_mem, needed) {
        Forward::FromMem
    } else if forwards(mem_wb, needed) {
        Forward::FromWb
    } else {
        Forward::None
    }
}

/// True when the instruction now in ID/EX is a load whose destination
/// register is read by the instruction now in IF/ID — the one hazard
/// forwarding cannot cover, since the loaded word isn't available until
/// Memory completes, one cycle after Execute would need it.
pub fn need_stall_load_use(ex_load: bool, ex_rd: usize, id_rs1: usize, id_rs2: usize) -> bool {
    ex_load && ex_rd != 0 && (ex_rd == id_rs1 || ex_rd == id_rs2)
}
