//! RV32I pipeline simulator CLI.
//!
//! Loads a flat binary instruction image (or, with no `--file`, assembles a
//! small built-in countdown-loop demo), drives the pipeline to completion,
//! and prints the final register file and run statistics.

use clap::Parser;
use std::path::PathBuf;
use std::process;

use rv32i_pipe_sim::config::Config;
use rv32i_pipe_sim::isa::encode::*;
use rv32i_pipe_sim::sim::{loader, Driver};

/// Command-line arguments for the pipeline simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "Cycle-accurate RV32I pipeline simulator")]
struct Args {
    /// Path to a TOML configuration file. Missing fields fall back to
    /// documented defaults; the file itself is optional.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to a flat binary instruction image. Without this, a small
    /// built-in demo program runs instead.
    #[arg(short, long)]
    file: Option<PathBuf>,
}

/// A demo program: count a register down from 5 to 0, storing each value,
/// then load the final stored word back — exercising decode, the ALU,
/// branch resolution and squash, and the store/load path in one run.
fn demo_program() -> Vec<u32> {
    vec![
        make_addi(1, 0, 5),  // x1 = 5
        make_addi(2, 0, 0),  // x2 = 0 (base address)
        make_addi(3, 0, -1), // x3 = -1
        // loop:
        make_sw(2, 1, 0),       // [x2] = x1
        make_add(1, 1, 3),      // x1 += x3  (x1 -= 1)
        make_bne(1, 0, -8), // branch back to `loop` while x1 != 0
        make_lw(4, 2, 0),       // x4 = [x2]  (loads the final stored value)
    ]
}

fn main() {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path).unwrap_or_else(|e| {
            eprintln!("[!] FATAL: {e}");
            process::exit(1);
        }),
        None => Config::default(),
    };

    let image = match &args.file {
        Some(path) => loader::from_file(path).unwrap_or_else(|e| {
            eprintln!("[!] FATAL: could not read '{}': {e}", path.display());
            process::exit(1);
        }),
        None => loader::from_words(demo_program()),
    };

    println!("Configuration");
    println!("-------------");
    println!("  trace:       {}", config.general.trace);
    println!("  max_cycles:  {}", config.general.max_cycles);
    println!("  data_words:  {}", config.memory.data_words);
    println!("-------------");

    let mut driver = Driver::new(image, &config);
    if let Err(e) = driver.run_to_halt(config.general.max_cycles) {
        eprintln!("\n[!] FATAL: {e}");
        driver.stats.print();
        process::exit(1);
    }

    println!("\nFinal register file:");
    for (idx, value) in driver.cpu.registers() {
        println!("  x{idx:<2} = {value:#010x}");
    }
    println!();
    driver.stats.print();
}
