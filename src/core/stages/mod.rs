//! The five pipeline stages.
//!
//! Each stage is a free function over `&mut Cpu`. [`crate::core::cpu::Cpu::tick`]
//! calls them in the fixed evaluation order (Memory, Execute, Decode,
//! Fetch) that lets every stage read last cycle's latch contents without
//! needing a dynamic dependency graph: a full pass in this order yields the
//! same result a lazy re-evaluation would, since no stage in this pipeline
//! reads a same-cycle output of a stage that runs after it.

pub mod decode;
pub mod execute;
pub mod fetch;
pub mod memory;
pub mod writeback;
