//! Logging setup and span constructors.

use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`.
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Standardized span constructors.
pub mod spans {
    use std::net::SocketAddr;

    use hubchat_proto::CommandKind;
    use tracing::{Span, info_span};

    use crate::state::ClientId;

    /// Create a span for a client connection.
    pub fn connection(id: ClientId, addr: SocketAddr) -> Span {
        info_span!("connection", client = %id, addr = %addr)
    }

    /// Create a span for one command applied by the hub.
    pub fn command(kind: CommandKind, client: ClientId, target: Option<&str>) -> Span {
        if let Some(target) = target {
            info_span!("command", name = %kind, client = %client, target = %target)
        } else {
            info_span!("command", name = %kind, client = %client)
        }
    }
}
