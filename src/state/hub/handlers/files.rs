//! FILES, SEND and GET: the per-channel file store.

use bytes::Bytes;
use hubchat_proto::Reply;
use tracing::{debug, info};

use super::super::Hub;
use crate::error::{HandlerResult, HubError};
use crate::state::channel::File;
use crate::state::client::ClientHandle;

impl Hub {
    pub(in crate::state::hub) fn handle_files(
        &mut self,
        client: &ClientHandle,
        name: &str,
    ) -> HandlerResult {
        let username = self.require_registered(client)?;
        let channel = self.member_channel(name, client, &username)?;

        let names: Vec<&str> = channel.file_names().collect();
        let text = if names.is_empty() {
            format!("FILES {}: no files", name)
        } else {
            format!("FILES {}: {}", name, names.join(", "))
        };

        client.send(Reply::notice(text));
        Ok(())
    }

    pub(in crate::state::hub) fn handle_send(
        &mut self,
        client: &ClientHandle,
        name: &str,
        filename: String,
        body: Bytes,
    ) -> HandlerResult {
        let username = self.require_registered(client)?;
        let channel = self.member_channel(name, client, &username)?;

        let size = channel
            .store_file(File::new(filename.clone(), body, username.clone()))?
            .size();
        info!(channel = %name, file = %filename, size, uploader = %username, "File stored");

        channel.broadcast(
            &username,
            Bytes::from(format!("stored file {} ({} bytes)", filename, size)),
        );
        client.send(Reply::notice(format!("SEND OK: stored {} in {}", filename, name)));
        Ok(())
    }

    pub(in crate::state::hub) fn handle_get(
        &mut self,
        client: &ClientHandle,
        name: &str,
        filename: &str,
    ) -> HandlerResult {
        let username = self.require_registered(client)?;
        let channel = self.member_channel(name, client, &username)?;

        let file = channel.file(filename).ok_or_else(|| HubError::NoSuchFile {
            file: filename.to_owned(),
            channel: name.to_owned(),
        })?;

        debug!(
            channel = %name,
            file = %filename,
            uploader = %file.uploader,
            stored_at = %file.stored_at,
            "File requested"
        );
        client.send_all(vec![
            Reply::notice(format!("GET OK: sending {} from {}", filename, name)),
            Reply::File {
                name: file.name.clone(),
                body: file.body.clone(),
            },
        ]);
        Ok(())
    }
}
