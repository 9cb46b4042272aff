//! Gateway - TCP listener that accepts incoming connections.
//!
//! The Gateway binds the listen socket and spawns a Connection task for
//! each incoming client.

use std::io;
use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::{Instrument, error, info, instrument};

use crate::config::LimitsConfig;
use crate::network::Connection;
use crate::state::{ClientIdGenerator, HubHandle};
use crate::telemetry::spans;

/// The Gateway accepts incoming TCP connections and spawns handlers.
pub struct Gateway {
    listener: TcpListener,
    hub: HubHandle,
    limits: LimitsConfig,
    ids: ClientIdGenerator,
}

impl Gateway {
    /// Bind the gateway to the specified address.
    pub async fn bind(
        addr: SocketAddr,
        hub: HubHandle,
        limits: LimitsConfig,
    ) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!(address = %listener.local_addr()?, "Listener bound");

        Ok(Self {
            listener,
            hub,
            limits,
            ids: ClientIdGenerator::new(),
        })
    }

    /// The bound address; differs from the configured one when port 0 was requested.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Run the gateway, accepting connections forever.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let id = self.ids.next();
                    info!(client = %id, %addr, "Connection accepted");

                    let connection =
                        Connection::new(id, stream, addr, self.hub.clone(), self.limits.clone());

                    tokio::spawn(
                        async move {
                            if let Err(e) = connection.run().await {
                                error!(error = %e, "Connection error");
                            }
                            info!("Connection closed");
                        }
                        .instrument(spans::connection(id, addr)),
                    );
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }
}
