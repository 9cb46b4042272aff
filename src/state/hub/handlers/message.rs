//! MSG routing to channels and users.

use bytes::Bytes;
use hubchat_proto::{Recipient, Reply};
use tracing::debug;

use super::super::Hub;
use crate::error::{HandlerResult, HubError};
use crate::state::client::ClientHandle;

impl Hub {
    pub(in crate::state::hub) fn handle_msg(
        &mut self,
        client: &ClientHandle,
        recipient: Recipient,
        body: Bytes,
    ) -> HandlerResult {
        let username = self.require_registered(client)?;

        match recipient {
            Recipient::Channel(name) => {
                let channel = self.member_channel(&name, client, &username)?;
                let len = body.len();
                let delivered = channel.broadcast(&username, body);
                debug!(channel = %name, bytes = len, delivered, "Channel message");
            }
            Recipient::User(name) => {
                let target = self
                    .users
                    .get(&name)
                    .ok_or_else(|| HubError::NoSuchUser(name.clone()))?;

                target.send(Reply::Chat {
                    from: username,
                    body,
                });
                client.send(Reply::notice(format!("MSG OK: delivered to {}", name)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::state::hub::Hub;
    use crate::state::hub::test_support::Peer;

    #[test]
    fn test_broadcast_isolation() {
        let mut hub = Hub::new();
        let mut a = Peer::new(1);
        let mut b = Peer::new(2);
        let mut c = Peer::new(3);
        a.register(&mut hub, "@a");
        b.register(&mut hub, "@b");
        c.register(&mut hub, "@c");
        a.run(&mut hub, "JOIN #x");
        b.run(&mut hub, "JOIN #x");
        c.run(&mut hub, "JOIN #y");
        a.lines();
        b.lines();
        c.lines();

        a.run(&mut hub, "MSG #x 11\r\nline1\nline2");
        assert_eq!(a.lines(), vec!["@a[#x]: line1\nline2\n"]);
        assert_eq!(b.lines(), vec!["@a[#x]: line1\nline2\n"]);
        assert!(c.lines().is_empty());
    }

    #[test]
    fn test_msg_to_missing_channel() {
        let mut hub = Hub::new();
        let mut a = Peer::new(1);
        a.register(&mut hub, "@a");

        a.run(&mut hub, "MSG #void 1\r\nx");
        assert_eq!(a.lines(), vec!["->> ERR: channel #void doesn't exist\n"]);
    }

    #[test]
    fn test_direct_message() {
        let mut hub = Hub::new();
        let mut alice = Peer::new(1);
        let mut bob = Peer::new(2);
        alice.register(&mut hub, "@alice");
        bob.register(&mut hub, "@bob");

        alice.run(&mut hub, "MSG @bob 8\\r\\nhi, bob!\n");
        assert_eq!(bob.lines(), vec!["@alice: hi, bob!\n"]);
        assert_eq!(alice.lines(), vec!["->> MSG OK: delivered to @bob\n"]);
    }

    #[test]
    fn test_direct_message_to_unknown_user() {
        let mut hub = Hub::new();
        let mut alice = Peer::new(1);
        alice.register(&mut hub, "@alice");

        alice.run(&mut hub, "MSG @ghost 3\r\nboo");
        assert_eq!(alice.lines(), vec!["->> ERR: @ghost is not a registered user\n"]);
    }
}
