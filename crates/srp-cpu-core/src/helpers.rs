//! Entry points called from translated guest code.
//!
//! One method per helper the translator emits. ALU helpers update `cpu.flags` and return the
//! result word; the bus helpers forward to the bridge; anything that must leave the block comes
//! back as a [`CpuExit`].

use srp_bus_bridge::{BusBridgeClient, Connector};

use crate::fault::{raise, CpuExit};
use crate::interp::alu::{self, RotateCarry};
use crate::state::CpuState;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HelperConfig {
    pub rotate_carry: RotateCarry,
}

#[derive(Debug)]
pub struct Helpers<C> {
    config: HelperConfig,
    bus: BusBridgeClient<C>,
}

impl<C: Connector> Helpers<C> {
    pub fn new(config: HelperConfig, connector: C) -> Self {
        Self {
            config,
            bus: BusBridgeClient::new(connector),
        }
    }

    pub fn config(&self) -> HelperConfig {
        self.config
    }

    pub fn bus(&self) -> &BusBridgeClient<C> {
        &self.bus
    }

    pub fn add_cc(&self, cpu: &mut CpuState, a: u32, b: u32) -> u32 {
        alu::add_with_flags(&mut cpu.flags, a, b)
    }

    pub fn sub_cc(&self, cpu: &mut CpuState, a: u32, b: u32) -> u32 {
        alu::sub_with_flags(&mut cpu.flags, a, b)
    }

    pub fn rol_cc(&self, cpu: &mut CpuState, x: u32) -> u32 {
        self.config.rotate_carry.rotate_left(&mut cpu.flags, x)
    }

    pub fn ror_cc(&self, cpu: &mut CpuState, x: u32) -> u32 {
        self.config.rotate_carry.rotate_right(&mut cpu.flags, x)
    }

    pub fn rcl_cc(&self, cpu: &mut CpuState, x: u32) -> u32 {
        alu::rotate_left_through_carry(&mut cpu.flags, x)
    }

    pub fn rcr_cc(&self, cpu: &mut CpuState, x: u32) -> u32 {
        alu::rotate_right_through_carry(&mut cpu.flags, x)
    }

    pub fn logic_cc(&self, cpu: &mut CpuState, x: u32) {
        alu::logic_flags(&mut cpu.flags, x);
    }

    pub fn logic_zf(&self, cpu: &mut CpuState, x: u32) {
        alu::zero_flag_only(&mut cpu.flags, x);
    }

    #[must_use]
    pub fn exception(&self, cpu: &mut CpuState, code: u32) -> CpuExit {
        raise(cpu, code)
    }

    pub fn socket_read(&mut self, addr: u32) -> Result<u32, CpuExit> {
        self.bus.read(addr).map_err(|err| {
            tracing::error!("bus read at {addr:#010x} failed: {err}");
            CpuExit::Bus(err)
        })
    }

    pub fn socket_write(&mut self, addr: u32, data: u32) -> Result<(), CpuExit> {
        self.bus.write(addr, data).map_err(|err| {
            tracing::error!("bus write at {addr:#010x} failed: {err}");
            CpuExit::Bus(err)
        })
    }
}
