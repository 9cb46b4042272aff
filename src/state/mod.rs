//! State management module.
//!
//! Contains the [`Hub`] (single owner of shared state), the `Channel`
//! entity and the client handles both of them use to reach connections.

mod channel;
mod client;
mod hub;

pub use client::{ClientHandle, ClientId, ClientIdGenerator};
pub use hub::{Hub, HubEvent, HubHandle};
