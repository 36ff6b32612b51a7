use std::io;

use thiserror::Error;

/// Failure of a single bus transaction.
///
/// None of these are retried. A desync means the two endpoints no longer agree on record
/// boundaries, so the host is expected to stop emulation.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to connect to bus peer: {0}")]
    Connect(#[source] io::Error),

    /// The send itself failed (peer closed or reset), so zero bytes of the record count as sent.
    #[error("mismatch in number of sent bytes: send failed: {0}")]
    Send(#[source] io::Error),

    #[error("mismatch in number of sent bytes: sent {sent}, expected {expected}")]
    ShortSend { sent: usize, expected: usize },

    #[error("failed to receive bus reply: {0}")]
    Recv(#[source] io::Error),

    #[error("bus reply truncated: received {received} of {expected} bytes")]
    ShortReply { received: usize, expected: usize },
}

impl BridgeError {
    /// Whether the local and remote ends have lost agreement on record boundaries.
    pub fn is_protocol_desync(&self) -> bool {
        matches!(
            self,
            Self::Send(_) | Self::ShortSend { .. } | Self::ShortReply { .. }
        )
    }
}
