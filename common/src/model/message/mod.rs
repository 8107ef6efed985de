//! Messaging entries and thread keys

use crate::model::{AccessGroupId, GroupKeyName, PublicKey};

/// Whether a message belongs to a direct-message or group-chat thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewMessageType {
    Dm,
    GroupChat,
}

/// A stored message between two access groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessageEntry {
    pub sender_access_group_owner_public_key: PublicKey,
    pub sender_access_group_key_name: GroupKeyName,
    pub sender_access_group_public_key: PublicKey,
    pub recipient_access_group_owner_public_key: PublicKey,
    pub recipient_access_group_key_name: GroupKeyName,
    pub recipient_access_group_public_key: PublicKey,
    pub encrypted_text: Vec<u8>,
    pub timestamp_nanos: u64,
    pub extra_data: Vec<(String, Vec<u8>)>,
}

impl NewMessageEntry {
    pub fn sender_group(&self) -> AccessGroupId {
        AccessGroupId::new(
            self.sender_access_group_owner_public_key,
            self.sender_access_group_key_name,
        )
    }

    pub fn recipient_group(&self) -> AccessGroupId {
        AccessGroupId::new(
            self.recipient_access_group_owner_public_key,
            self.recipient_access_group_key_name,
        )
    }
}

/// A DM thread seen from one participant's side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DmThreadKey {
    pub user_group: AccessGroupId,
    pub party_group: AccessGroupId,
}

impl DmThreadKey {
    pub fn new(user_group: AccessGroupId, party_group: AccessGroupId) -> Self {
        Self { user_group, party_group }
    }

    /// The same thread regardless of which side is asking
    pub fn canonical(&self) -> (AccessGroupId, AccessGroupId) {
        if self.user_group <= self.party_group {
            (self.user_group, self.party_group)
        } else {
            (self.party_group, self.user_group)
        }
    }

    /// The thread as seen by the other participant
    pub fn flipped(&self) -> Self {
        Self::new(self.party_group, self.user_group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(byte: u8, name: &str) -> AccessGroupId {
        let generator = hex::decode("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798").unwrap();
        let second = hex::decode("02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5").unwrap();
        let key = if byte == 0 { generator } else { second };
        AccessGroupId::new(
            PublicKey::from_bytes(&key).unwrap(),
            GroupKeyName::from_name(name).unwrap(),
        )
    }

    #[test]
    fn test_canonical_thread_is_symmetric() {
        let key = DmThreadKey::new(group(0, "default"), group(1, "default"));
        assert_eq!(key.canonical(), key.flipped().canonical());
        assert_ne!(key, key.flipped());
    }
}
