//! CHNS and USRS.

use hubchat_proto::Reply;

use super::super::Hub;
use crate::error::HandlerResult;
use crate::state::client::ClientHandle;

impl Hub {
    pub(in crate::state::hub) fn handle_chns(&self, client: &ClientHandle) -> HandlerResult {
        self.require_registered(client)?;

        let text = if self.channels.is_empty() {
            "CHNS: no channels".to_string()
        } else {
            let names: Vec<&str> = self.channels.keys().map(String::as_str).collect();
            format!("CHNS: {}", names.join(", "))
        };

        client.send(Reply::notice(text));
        Ok(())
    }

    pub(in crate::state::hub) fn handle_usrs(&self, client: &ClientHandle) -> HandlerResult {
        self.require_registered(client)?;

        let mut names: Vec<&str> = self.users.keys().map(String::as_str).collect();
        names.sort_unstable();

        client.send(Reply::notice(format!("USRS: {}", names.join(", "))));
        Ok(())
    }
}
