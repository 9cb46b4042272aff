//! Channel entity: a named broadcast group with its own file store.
//!
//! Channels are owned by the hub and only ever touched from the hub task, so
//! nothing here is synchronized.

use std::collections::{BTreeMap, HashMap};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use hubchat_proto::Reply;
use tracing::debug;

use super::client::{ClientHandle, ClientId};
use crate::error::HubError;

/// A file stored in a channel. Immutable once stored.
#[derive(Debug, Clone)]
pub struct File {
    pub name: String,
    pub body: Bytes,
    pub uploader: String,
    pub stored_at: DateTime<Utc>,
}

impl File {
    pub fn new(name: String, body: Bytes, uploader: String) -> Self {
        Self {
            name,
            body,
            uploader,
            stored_at: Utc::now(),
        }
    }

    /// Body length in bytes.
    pub fn size(&self) -> usize {
        self.body.len()
    }
}

/// A named group of clients sharing broadcasts and files.
#[derive(Debug)]
pub struct Channel {
    name: String,
    created: DateTime<Utc>,
    members: HashMap<ClientId, ClientHandle>,
    files: BTreeMap<String, File>,
}

impl Channel {
    pub fn new(name: String) -> Self {
        Self {
            name,
            created: Utc::now(),
            members: HashMap::new(),
            files: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Add a member. Returns false if the client was already a member.
    pub fn join(&mut self, client: ClientHandle) -> bool {
        self.members.insert(client.id(), client).is_none()
    }

    /// Remove a member. Returns false if the client was not a member.
    pub fn remove_member(&mut self, id: ClientId) -> bool {
        self.members.remove(&id).is_some()
    }

    pub fn is_member(&self, id: ClientId) -> bool {
        self.members.contains_key(&id)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Send `<label>[<channel>]: <body>` to every member, the sender included.
    ///
    /// Delivery is best-effort: a member whose queue is full or closed is
    /// skipped. Returns how many members the line was queued for.
    pub fn broadcast(&self, label: &str, body: Bytes) -> usize {
        let reply = Reply::Chat {
            from: format!("{}[{}]", label, self.name),
            body,
        };

        let delivered = self
            .members
            .values()
            .filter(|member| member.send(reply.clone()))
            .count();

        debug!(
            channel = %self.name,
            members = self.members.len(),
            delivered,
            "Broadcast"
        );
        delivered
    }

    /// Store a new file. An existing file with the same name is never replaced.
    pub fn store_file(&mut self, file: File) -> Result<&File, HubError> {
        use std::collections::btree_map::Entry;

        match self.files.entry(file.name.clone()) {
            Entry::Occupied(_) => Err(HubError::FileExists {
                file: file.name,
                channel: self.name.clone(),
            }),
            Entry::Vacant(slot) => Ok(slot.insert(file)),
        }
    }

    pub fn file(&self, name: &str) -> Option<&File> {
        self.files.get(name)
    }

    /// Stored file names in ascending order.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}
