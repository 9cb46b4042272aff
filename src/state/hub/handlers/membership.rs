//! JOIN and LEAVE.

use hubchat_proto::Reply;
use tracing::{debug, info};

use super::super::Hub;
use crate::error::HandlerResult;
use crate::state::channel::Channel;
use crate::state::client::ClientHandle;

impl Hub {
    pub(in crate::state::hub) fn handle_join(
        &mut self,
        client: &ClientHandle,
        name: String,
    ) -> HandlerResult {
        let username = self.require_registered(client)?;

        let created = !self.channels.contains_key(&name);
        let channel = self
            .channels
            .entry(name.clone())
            .or_insert_with(|| Channel::new(name.clone()));
        if created {
            info!(
                channel = %name,
                creator = %username,
                created_at = %channel.created(),
                "Channel created"
            );
        }

        let text = if !channel.join(client.clone()) {
            format!("JOIN OK: {} is already a member of {}", username, name)
        } else if created {
            format!("JOIN OK: created and joined {}", name)
        } else {
            format!("JOIN OK: added to {}", name)
        };

        client.send(Reply::notice(text));
        Ok(())
    }

    pub(in crate::state::hub) fn handle_leave(
        &mut self,
        client: &ClientHandle,
        name: &str,
    ) -> HandlerResult {
        let username = self.require_registered(client)?;
        let channel = self.member_channel(name, client, &username)?;
        channel.remove_member(client.id());
        debug!(
            channel = %name,
            user = %username,
            remaining = channel.member_count(),
            "Member left"
        );

        client.send(Reply::notice(format!("LEAVE OK: left {}", name)));
        Ok(())
    }
}
