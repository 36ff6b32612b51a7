#![allow(dead_code)]

//! A toy host: a register file, a straight-line micro-op program and the dispatch loop that
//! drives the helpers the way translated code would.

use srp::bridge::Connector;
use srp::cpu::{CpuExit, CpuState, Helpers};

pub const NUM_REGS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Mov { dst: usize, imm: u32 },
    Add { dst: usize, src: usize },
    Sub { dst: usize, src: usize },
    Cmp { a: usize, b: usize },
    And { dst: usize, src: usize },
    Rol { reg: usize },
    Rcl { reg: usize },
    Load { dst: usize, addr: u32 },
    Store { src: usize, addr: u32 },
    /// Faults with `code` when CF is set (`jb` to a trap stub).
    TrapIfBelow { code: u32 },
}

#[derive(Debug, Default)]
pub struct Guest {
    pub cpu: CpuState,
    pub regs: [u32; NUM_REGS],
    pub retired: usize,
}

/// How the host finished running a program.
#[derive(Debug)]
pub enum HostExit {
    Completed,
    Faulted(u32),
    Shutdown { status: i32, reason: String },
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn step<C: Connector>(
    helpers: &mut Helpers<C>,
    guest: &mut Guest,
    op: Op,
) -> Result<(), CpuExit> {
    let cpu = &mut guest.cpu;
    let r = &mut guest.regs;
    match op {
        Op::Mov { dst, imm } => r[dst] = imm,
        Op::Add { dst, src } => r[dst] = helpers.add_cc(cpu, r[dst], r[src]),
        Op::Sub { dst, src } => r[dst] = helpers.sub_cc(cpu, r[dst], r[src]),
        Op::Cmp { a, b } => {
            helpers.sub_cc(cpu, r[a], r[b]);
        }
        Op::And { dst, src } => {
            r[dst] &= r[src];
            helpers.logic_cc(cpu, r[dst]);
        }
        Op::Rol { reg } => r[reg] = helpers.rol_cc(cpu, r[reg]),
        Op::Rcl { reg } => r[reg] = helpers.rcl_cc(cpu, r[reg]),
        Op::Load { dst, addr } => r[dst] = helpers.socket_read(addr)?,
        Op::Store { src, addr } => helpers.socket_write(addr, r[src])?,
        Op::TrapIfBelow { code } => {
            if cpu.flags.cf() {
                return Err(helpers.exception(cpu, code));
            }
        }
    }
    Ok(())
}

/// Runs `program` to completion or to the first exit a helper reports.
///
/// Guest faults stop the program and leave the code in `cpu.exception_index`; bus failures are
/// turned into an orderly shutdown with the exit's status instead of killing the process.
pub fn run<C: Connector>(helpers: &mut Helpers<C>, guest: &mut Guest, program: &[Op]) -> HostExit {
    for &op in program {
        match step(helpers, guest, op) {
            Ok(()) => guest.retired += 1,
            Err(CpuExit::Exception(code)) => return HostExit::Faulted(code),
            Err(exit) => {
                tracing::warn!("host: shutting down after fatal exit: {exit}");
                return HostExit::Shutdown {
                    status: exit.exit_code().unwrap_or(1),
                    reason: exit.to_string(),
                };
            }
        }
    }
    HostExit::Completed
}
