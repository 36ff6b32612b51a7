//! In-process bus simulator speaking the bridge wire contract.
//!
//! Backed by a sparse register file: READ answers with the stored word (0 if never written),
//! WRITE stores and sends nothing back. Connections are served one at a time, which matches the
//! bridge's single outstanding transaction.

use std::collections::HashMap;
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;

use srp_bus_protocol::{BusAccessMessage, BusCommand, BUS_ACCESS_MESSAGE_LEN};

pub type Registers = Arc<Mutex<HashMap<u32, u32>>>;

pub struct MemoryBusPeer {
    listener: TcpListener,
    registers: Registers,
}

pub struct PeerHandle {
    local_addr: SocketAddr,
    registers: Registers,
    thread: JoinHandle<io::Result<()>>,
}

impl MemoryBusPeer {
    pub fn bind(addr: impl ToSocketAddrs) -> io::Result<Self> {
        Ok(Self {
            listener: TcpListener::bind(addr)?,
            registers: Registers::default(),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn registers(&self) -> Registers {
        Arc::clone(&self.registers)
    }

    /// Serves connections until accepting fails.
    pub fn serve(&self) -> io::Result<()> {
        loop {
            self.serve_one()?;
        }
    }

    /// Serves exactly `count` connections, then returns.
    pub fn serve_connections(&self, count: usize) -> io::Result<()> {
        for _ in 0..count {
            self.serve_one()?;
        }
        Ok(())
    }

    /// Moves the peer onto a background thread serving `count` connections.
    pub fn spawn(self, count: usize) -> io::Result<PeerHandle> {
        let local_addr = self.local_addr()?;
        let registers = self.registers();
        let thread = std::thread::spawn(move || self.serve_connections(count));
        Ok(PeerHandle {
            local_addr,
            registers,
            thread,
        })
    }

    fn serve_one(&self) -> io::Result<()> {
        let (stream, remote) = self.listener.accept()?;
        // A misbehaving client only costs its own connection.
        if let Err(err) = handle_connection(stream, &self.registers) {
            tracing::warn!("bus peer: connection from {remote} failed: {err}");
        }
        Ok(())
    }
}

impl PeerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn registers(&self) -> MutexGuard<'_, HashMap<u32, u32>> {
        lock(&self.registers)
    }

    pub fn join(self) -> io::Result<()> {
        self.thread
            .join()
            .map_err(|_| io::Error::other("bus peer thread panicked"))?
    }
}

fn lock(registers: &Registers) -> MutexGuard<'_, HashMap<u32, u32>> {
    // The map stays consistent even if a holder panicked mid-access.
    registers
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn handle_connection(mut stream: TcpStream, registers: &Registers) -> io::Result<()> {
    let mut buf = [0u8; BUS_ACCESS_MESSAGE_LEN];
    stream.read_exact(&mut buf)?;
    let mut msg = BusAccessMessage::from_bytes(&buf);

    match msg.command() {
        Ok(BusCommand::Read) => {
            msg.data = lock(registers).get(&msg.address).copied().unwrap_or(0);
            tracing::info!(
                "bus peer: read addr={:#010x} data={:#010x}",
                msg.address,
                msg.data
            );
            stream.write_all(&msg.to_bytes())?;
            stream.flush()
        }
        Ok(BusCommand::Write) => {
            lock(registers).insert(msg.address, msg.data);
            tracing::info!(
                "bus peer: write addr={:#010x} data={:#010x}",
                msg.address,
                msg.data
            );
            Ok(())
        }
        Err(err) => {
            tracing::warn!("bus peer: dropping connection: {err}");
            Ok(())
        }
    }
}
