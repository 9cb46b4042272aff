//! Hub command handlers.
//!
//! Each submodule adds the handlers for one group of commands to [`Hub`].
//! A handler either sends its success reply itself and returns `Ok`, or
//! returns a [`HubError`] without having changed any state.

use super::Hub;
use crate::error::HubError;
use crate::state::channel::Channel;
use crate::state::client::ClientHandle;

mod files;
mod lists;
mod membership;
mod message;
mod register;

impl Hub {
    /// The sender's username, or [`HubError::NotRegistered`].
    fn require_registered(&self, client: &ClientHandle) -> Result<String, HubError> {
        self.names
            .get(&client.id())
            .cloned()
            .ok_or(HubError::NotRegistered)
    }

    /// A channel the sender belongs to.
    fn member_channel(
        &mut self,
        name: &str,
        client: &ClientHandle,
        username: &str,
    ) -> Result<&mut Channel, HubError> {
        let channel = self
            .channels
            .get_mut(name)
            .ok_or_else(|| HubError::NoSuchChannel(name.to_owned()))?;

        if !channel.is_member(client.id()) {
            return Err(HubError::NotMember {
                user: username.to_owned(),
                channel: name.to_owned(),
            });
        }

        Ok(channel)
    }
}
