//! Simulation statistics collection and reporting.

use std::time::Instant;

/// Cycle and instruction-retired counters, plus wall-clock elapsed time for
/// a rough instructions/second figure.
pub struct SimStats {
    start_time: Instant,
    pub cycles: u64,
    pub instructions_retired: u64,
    pub load_use_stalls: u64,
    pub branches_squashed: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            load_use_stalls: 0,
            branches_squashed: 0,
        }
    }
}

impl SimStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    pub fn print(&self) {
        let elapsed = self.start_time.elapsed();
        println!("Simulation Statistics");
        println!("----------------------");
        println!("  Cycles:              {}", self.cycles);
        println!("  Instructions retired: {}", self.instructions_retired);
        println!("  IPC:                 {:.3}", self.ipc());
        println!("  Load-use stalls:     {}", self.load_use_stalls);
        println!("  Branches squashed:   {}", self.branches_squashed);
        println!("  Wall time:           {:.3}s", elapsed.as_secs_f64());
    }
}
