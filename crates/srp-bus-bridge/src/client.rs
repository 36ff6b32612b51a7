use std::io::{self, Read, Write};

use srp_bus_protocol::{BusAccessMessage, BUS_ACCESS_MESSAGE_LEN};

use crate::{BridgeError, Connector};

/// CPU-side end of the bus bridge.
///
/// Every call opens its own connection, so a reply can only ever pair with the request sent on
/// the same stream. The stream is dropped (closed) before the call returns, on success and error
/// paths alike.
#[derive(Debug)]
pub struct BusBridgeClient<C> {
    connector: C,
}

impl<C: Connector> BusBridgeClient<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn into_connector(self) -> C {
        self.connector
    }

    /// Issues a READ for `address` and blocks until the peer's reply arrives.
    pub fn read(&mut self, address: u32) -> Result<u32, BridgeError> {
        let mut stream = self.connector.connect().map_err(BridgeError::Connect)?;

        let mut msg = BusAccessMessage::read(address);
        send_message(&mut stream, &msg)?;
        msg = recv_message(&mut stream)?;

        tracing::debug!("bus read done: addr={address:#010x} data={:#010x}", msg.data);
        Ok(msg.data)
    }

    /// Issues a WRITE and returns as soon as the record has been handed to the stream.
    ///
    /// Writes are not acknowledged. Anything the peer sends back is discarded when the stream is
    /// closed.
    pub fn write(&mut self, address: u32, data: u32) -> Result<(), BridgeError> {
        let mut stream = self.connector.connect().map_err(BridgeError::Connect)?;

        let msg = BusAccessMessage::write(address, data);
        send_message(&mut stream, &msg)?;
        drop(stream);

        tracing::debug!("bus write done: addr={address:#010x} data={data:#010x}");
        Ok(())
    }
}

fn send_message<S: Write>(stream: &mut S, msg: &BusAccessMessage) -> Result<(), BridgeError> {
    // A single write call, with the byte count checked. A partial send is not resumed: the
    // peer would see a torn record.
    let sent = stream.write(&msg.to_bytes()).map_err(BridgeError::Send)?;
    if sent != BUS_ACCESS_MESSAGE_LEN {
        return Err(BridgeError::ShortSend {
            sent,
            expected: BUS_ACCESS_MESSAGE_LEN,
        });
    }
    stream.flush().map_err(BridgeError::Send)
}

fn recv_message<S: Read>(stream: &mut S) -> Result<BusAccessMessage, BridgeError> {
    let mut buf = [0u8; BUS_ACCESS_MESSAGE_LEN];
    let mut received = 0;
    while received < BUS_ACCESS_MESSAGE_LEN {
        match stream.read(&mut buf[received..]) {
            Ok(0) => {
                return Err(BridgeError::ShortReply {
                    received,
                    expected: BUS_ACCESS_MESSAGE_LEN,
                })
            }
            Ok(n) => received += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(BridgeError::Recv(err)),
        }
    }
    Ok(BusAccessMessage::from_bytes(&buf))
}
