#![forbid(unsafe_code)]

//! Bus access message codec shared by the CPU-side bridge and the bus simulator.
//!
//! Every transaction is a single fixed-size record. There is no length prefix, version field or
//! framing beyond the record size, so both endpoints must agree on the layout exactly.
//!
//! Wire format (all fields little-endian, no padding):
//!
//! ```text
//! 0               4               8               12
//! +---------------+---------------+---------------+
//! | command (u32) | address (u32) |  data (u32)   |
//! +---------------+---------------+---------------+
//! ```
//!
//! A READ request carries `data = 0`; the peer answers with a record of the same size whose `data`
//! field holds the value read. A WRITE request is never answered.

use thiserror::Error;

pub const BUS_ACCESS_MESSAGE_LEN: usize = 12;

pub const BUS_COMMAND_READ: u32 = 1;
pub const BUS_COMMAND_WRITE: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("bus access message must be exactly {BUS_ACCESS_MESSAGE_LEN} bytes (got {len})")]
    WrongLength { len: usize },

    #[error("unknown bus command {command:#x}")]
    UnknownCommand { command: u32 },
}

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusCommand {
    Read = BUS_COMMAND_READ,
    Write = BUS_COMMAND_WRITE,
}

impl BusCommand {
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for BusCommand {
    type Error = Error;

    fn try_from(command: u32) -> Result<Self, Self::Error> {
        match command {
            BUS_COMMAND_READ => Ok(Self::Read),
            BUS_COMMAND_WRITE => Ok(Self::Write),
            _ => Err(Error::UnknownCommand { command }),
        }
    }
}

/// One bus transaction record.
///
/// `command` holds the raw wire word rather than a [`BusCommand`] so that a reply is always
/// representable; the bridge only consumes the `data` field of a reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BusAccessMessage {
    pub command: u32,
    pub address: u32,
    pub data: u32,
}

impl BusAccessMessage {
    pub const fn read(address: u32) -> Self {
        Self {
            command: BUS_COMMAND_READ,
            address,
            data: 0,
        }
    }

    pub const fn write(address: u32, data: u32) -> Self {
        Self {
            command: BUS_COMMAND_WRITE,
            address,
            data,
        }
    }

    pub fn command(&self) -> Result<BusCommand, Error> {
        BusCommand::try_from(self.command)
    }

    pub fn to_bytes(&self) -> [u8; BUS_ACCESS_MESSAGE_LEN] {
        let mut out = [0u8; BUS_ACCESS_MESSAGE_LEN];
        out[0..4].copy_from_slice(&self.command.to_le_bytes());
        out[4..8].copy_from_slice(&self.address.to_le_bytes());
        out[8..12].copy_from_slice(&self.data.to_le_bytes());
        out
    }

    pub fn from_bytes(buf: &[u8; BUS_ACCESS_MESSAGE_LEN]) -> Self {
        Self {
            command: u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]),
            address: u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
            data: u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
        }
    }

    /// Decodes a complete record; anything other than exactly [`BUS_ACCESS_MESSAGE_LEN`] bytes is
    /// rejected.
    pub fn decode(buf: &[u8]) -> Result<Self, Error> {
        let buf: &[u8; BUS_ACCESS_MESSAGE_LEN] = buf
            .try_into()
            .map_err(|_| Error::WrongLength { len: buf.len() })?;
        Ok(Self::from_bytes(buf))
    }
}
