//! The CPU: architectural state, stage-boundary latches, and the per-cycle
//! evaluation driving the five pipeline stages.

use crate::common::error::SimError;
use crate::common::reg::RegisterFile;
use crate::core::dmem::DataMemory;
use crate::core::latches::{ExMemLatch, IdExLatch, IfIdLatch, MemWbLatch};
use crate::core::stages::{decode, execute, fetch, memory, writeback};
use crate::signal::{SignalGraph, WireId};

/// Named wires mirroring the cross-cutting control signals the signal
/// graph makes externally observable. Bulk per-instruction data
/// rides the typed latches instead; these are the handful of signals whose
/// last-cycle view actually matters to another block or to a caller
/// inspecting the simulator from outside.
struct Wires {
    pc: WireId,
    pc_next: WireId,
    pc_r: WireId,
    pc_disp: WireId,
    v_de: WireId,
    v_ex: WireId,
}

/// The five-stage pipeline core.
pub struct Cpu {
    pub regs: RegisterFile,
    pub(crate) imem: Vec<u32>,
    pub(crate) dmem: DataMemory,

    pub(crate) pc: u32,
    pub(crate) branch_taken: bool,
    pub(crate) branch_target: u32,
    pub(crate) stall: bool,

    pub(crate) if_id: IfIdLatch,
    pub(crate) id_ex: IdExLatch,
    pub(crate) ex_mem: ExMemLatch,
    pub(crate) mem_wb: MemWbLatch,

    pub(crate) next_if_id: IfIdLatch,
    pub(crate) next_id_ex: IdExLatch,
    pub(crate) next_ex_mem: ExMemLatch,
    pub(crate) next_mem_wb: MemWbLatch,

    pub(crate) trace: bool,
    pub(crate) halted: bool,
    pub(crate) retired: u64,

    graph: SignalGraph,
    wires: Wires,
}

impl Cpu {
    /// Builds a CPU with the given instruction image and data memory size
    /// (in 32-bit words), starting at PC 0 with every latch a bubble.
    pub fn new(imem: Vec<u32>, data_words: usize, trace: bool) -> Self {
        let mut graph = SignalGraph::new();
        let wires = Wires {
            pc: graph.alloc("PC"),
            pc_next: graph.alloc("PC_NEXT"),
            pc_r: graph.alloc("PC_R"),
            pc_disp: graph.alloc("PC_DISP"),
            v_de: graph.alloc("V_DE"),
            v_ex: graph.alloc("V_EX"),
        };

        Self {
            regs: RegisterFile::new(),
            imem,
            dmem: DataMemory::new(data_words),
            pc: 0,
            branch_taken: false,
            branch_target: 0,
            stall: false,
            if_id: IfIdLatch::default(),
            id_ex: IdExLatch::default(),
            ex_mem: ExMemLatch::default(),
            mem_wb: MemWbLatch::default(),
            next_if_id: IfIdLatch::default(),
            next_id_ex: IdExLatch::default(),
            next_ex_mem: ExMemLatch::default(),
            next_mem_wb: MemWbLatch::default(),
            trace,
            halted: false,
            retired: 0,
            graph,
            wires,
        }
    }

    /// True once Fetch has walked off the end of the instruction image and
    /// every in-flight instruction has drained through the pipeline.
    pub fn halted(&self) -> bool {
        self.halted && !self.if_id.valid && !self.id_ex.valid && !self.ex_mem.valid && !self.mem_wb.valid
    }

    pub fn cycle(&self) -> u64 {
        self.graph.cycle()
    }

    /// Whether a load-use stall was in effect as of the last completed
    /// cycle (for statistics).
    pub fn stall_active(&self) -> bool {
        self.stall
    }

    /// Whether a branch squash was in effect as of the last completed
    /// cycle (for statistics).
    pub fn branch_active(&self) -> bool {
        self.branch_taken
    }

    pub fn instructions_retired(&self) -> u64 {
        self.retired
    }

    /// Returns `(index, value)` for all 32 integer registers.
    pub fn registers(&self) -> Vec<(u8, u32)> {
        self.regs.entries()
    }

    /// Reads a named control wire's `(value, old_value)` pair, for
    /// observability and tests. Valid names: `PC`, `PC_NEXT`, `PC_R`,
    /// `PC_DISP`, `V_DE`, `V_EX`.
    pub fn wire(&self, name: &str) -> Option<(u32, u32)> {
        self.graph.get_by_name(name).ok()
    }

    /// Runs one clock cycle: evaluates Memory, Execute, Decode, and Fetch
    /// in that fixed tail-to-head order (each reads only last cycle's
    /// latch contents), commits Writeback's register write, then commits
    /// every latch and advances the signal graph's cycle.
    pub fn tick(&mut self) -> Result<(), SimError> {
        writeback::run(self)?;
        memory::run(self)?;
        execute::run(self)?;
        decode::run(self)?;
        fetch::run(self)?;

        self.if_id = self.next_if_id;
        self.id_ex = self.next_id_ex;
        self.ex_mem = self.next_ex_mem;
        self.mem_wb = self.next_mem_wb;

        let pc_next = self.pc.wrapping_add(4);
        let pc_disp = if self.id_ex.control.branch { self.id_ex.imm as u32 } else { 0 };
        self.graph.set(self.wires.pc, self.pc)?;
        self.graph.set(self.wires.pc_next, pc_next)?;
        self.graph.set(self.wires.pc_r, self.branch_taken as u32)?;
        self.graph.set(self.wires.pc_disp, pc_disp)?;
        self.graph.set(self.wires.v_de, self.if_id.valid as u32)?;
        self.graph.set(self.wires.v_ex, self.id_ex.valid as u32)?;
        self.graph.tick();
        Ok(())
    }
}
