use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream};

/// Produces a connected stream to the bus peer, once per transaction.
///
/// The returned stream is owned by the transaction and closed when it is dropped.
pub trait Connector {
    type Stream: Read + Write;

    fn connect(&mut self) -> io::Result<Self::Stream>;
}

impl<C: Connector + ?Sized> Connector for &mut C {
    type Stream = C::Stream;

    fn connect(&mut self) -> io::Result<Self::Stream> {
        (**self).connect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcpConnector {
    addr: SocketAddr,
    nodelay: bool,
}

impl TcpConnector {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            nodelay: true,
        }
    }

    pub fn with_nodelay(mut self, nodelay: bool) -> Self {
        self.nodelay = nodelay;
        self
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Connector for TcpConnector {
    type Stream = TcpStream;

    fn connect(&mut self) -> io::Result<TcpStream> {
        let stream = TcpStream::connect(self.addr)?;
        // Requests are a single small record; don't let Nagle hold them back.
        stream.set_nodelay(self.nodelay)?;
        Ok(stream)
    }
}
