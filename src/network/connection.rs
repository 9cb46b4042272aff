//! Connection - Handles an individual client connection.
//!
//! Each Connection runs as two Tokio tasks:
//!
//! ```text
//!    socket read half                          socket write half
//!          │                                          ▲
//!          ▼                                          │
//!   FramedRead<CommandCodec>                FramedWrite<CommandCodec>
//!          │                                          ▲
//!    ┌─────┴──────┐                                   │
//!    │ parse error ├──────────────┐                   │
//!    └─────┬──────┘               ▼                   │
//!          │ Command      [outbound queue] ───────────┘
//!          ▼                      ▲
//!     [hub queue] ──▶ Hub ────────┘ replies, broadcasts
//! ```
//!
//! The writer task is the only thing that touches the write half, so hub
//! replies and local parse-error replies can never interleave mid-line.

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use hubchat_proto::{CommandCodec, ProtocolError, Reply};
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{Instrument, debug, info, warn};

use crate::config::LimitsConfig;
use crate::state::{ClientHandle, ClientId, HubEvent, HubHandle};

/// How long queued replies may take to flush after the client goes away.
const WRITER_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// A client connection handler.
pub struct Connection {
    id: ClientId,
    addr: SocketAddr,
    stream: TcpStream,
    hub: HubHandle,
    limits: LimitsConfig,
}

impl Connection {
    /// Create a new connection handler.
    pub fn new(
        id: ClientId,
        stream: TcpStream,
        addr: SocketAddr,
        hub: HubHandle,
        limits: LimitsConfig,
    ) -> Self {
        Self {
            id,
            addr,
            stream,
            hub,
            limits,
        }
    }

    /// Run the connection read loop.
    ///
    /// The client is always deregistered on the way out, whether the peer
    /// closed the socket or the read failed.
    pub async fn run(self) -> anyhow::Result<()> {
        let Connection {
            id,
            addr,
            stream,
            hub,
            limits,
        } = self;
        info!("Client connected");

        let (read_half, write_half) = stream.into_split();
        let (outbound_tx, outbound_rx) = mpsc::channel::<Reply>(limits.sendq_capacity);
        let client = ClientHandle::new(id, addr, outbound_tx);

        let mut writer = tokio::spawn(
            write_loop(FramedWrite::new(write_half, CommandCodec::new()), outbound_rx)
                .in_current_span(),
        );
        let mut reader = FramedRead::new(
            read_half,
            CommandCodec::with_limits(limits.max_line_len, limits.max_body_len),
        );

        let outcome: anyhow::Result<()> = loop {
            match reader.next().await {
                Some(Ok(Ok(command))) => {
                    debug!(command = %command.kind(), "Received command");
                    if let Err(e) = hub
                        .submit(HubEvent::from_command(client.clone(), command))
                        .await
                    {
                        break Err(e.into());
                    }
                }
                Some(Ok(Err(err))) => {
                    debug!(code = err.error_code(), error = %err, "Rejected frame");
                    client.send(Reply::error(&err));
                }
                Some(Err(e)) => {
                    warn!(error = %e, "Read error");
                    break Err(e.into());
                }
                None => {
                    info!("Client disconnected");
                    break Ok(());
                }
            }
        };

        if let Err(e) = hub.submit(HubEvent::Deregister { id }).await {
            debug!(error = %e, "Could not deregister");
        }

        // The writer stops once the hub has dropped its handles too.
        drop(client);
        match tokio::time::timeout(WRITER_DRAIN_TIMEOUT, &mut writer).await {
            Ok(Ok(Err(e))) => debug!(error = %e, "Writer stopped with error"),
            Ok(_) => {}
            Err(_) => {
                warn!("Writer did not drain in time");
                writer.abort();
            }
        }

        outcome
    }
}

/// Drain the outbound queue into the socket, flushing whenever it runs dry.
async fn write_loop(
    mut sink: FramedWrite<OwnedWriteHalf, CommandCodec>,
    mut rx: mpsc::Receiver<Reply>,
) -> Result<(), ProtocolError> {
    while let Some(reply) = rx.recv().await {
        sink.feed(reply).await?;
        while let Ok(more) = rx.try_recv() {
            sink.feed(more).await?;
        }
        sink.flush().await?;
    }
    Ok(())
}
