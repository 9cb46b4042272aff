//! Queue capacities and frame size limits.

use hubchat_proto::{DEFAULT_MAX_BODY_LEN, DEFAULT_MAX_LINE_LEN};
use serde::Deserialize;

/// Queue and frame limits.
///
/// The hub queue applies back-pressure to every connection; the send queue
/// bounds how far a single slow reader can fall behind before lines for it
/// are dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Hub event queue capacity (default: 256).
    #[serde(default = "default_hub_queue_capacity")]
    pub hub_queue_capacity: usize,
    /// Per-connection outbound queue capacity (default: 512).
    #[serde(default = "default_sendq_capacity")]
    pub sendq_capacity: usize,
    /// Maximum command line length in bytes (default: 65536).
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,
    /// Maximum declared MSG body length in bytes (default: 65536).
    #[serde(default = "default_max_body_len")]
    pub max_body_len: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            hub_queue_capacity: default_hub_queue_capacity(),
            sendq_capacity: default_sendq_capacity(),
            max_line_len: default_max_line_len(),
            max_body_len: default_max_body_len(),
        }
    }
}

fn default_hub_queue_capacity() -> usize {
    256
}

fn default_sendq_capacity() -> usize {
    512
}

fn default_max_line_len() -> usize {
    DEFAULT_MAX_LINE_LEN
}

fn default_max_body_len() -> usize {
    DEFAULT_MAX_BODY_LEN
}
