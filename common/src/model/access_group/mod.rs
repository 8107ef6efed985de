//! Access group names and identifiers

use std::fmt;

use crate::error::{Error, Result};
use crate::model::PublicKey;

/// Shortest allowed access group name, in bytes
pub const MIN_ACCESS_GROUP_KEY_NAME_LEN: usize = 1;

/// Longest allowed access group name, in bytes
pub const MAX_ACCESS_GROUP_KEY_NAME_LEN: usize = 32;

/// An access group name, zero-padded to 32 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKeyName([u8; MAX_ACCESS_GROUP_KEY_NAME_LEN]);

impl GroupKeyName {
    /// Pads a 1..=32 byte name. The all-zero base name is rejected.
    pub fn new(name: &[u8]) -> Result<Self> {
        if name.len() < MIN_ACCESS_GROUP_KEY_NAME_LEN || name.len() > MAX_ACCESS_GROUP_KEY_NAME_LEN {
            return Err(Error::InvalidAccessGroup(format!(
                "group name must be between {} and {} bytes, got {}",
                MIN_ACCESS_GROUP_KEY_NAME_LEN,
                MAX_ACCESS_GROUP_KEY_NAME_LEN,
                name.len()
            )));
        }
        let mut padded = [0u8; MAX_ACCESS_GROUP_KEY_NAME_LEN];
        padded[..name.len()].copy_from_slice(name);
        let key_name = Self(padded);
        if key_name.is_base() {
            return Err(Error::InvalidAccessGroup(
                "the base group name cannot be used".to_string(),
            ));
        }
        Ok(key_name)
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Self::new(name.as_bytes())
    }

    /// The reserved all-zero name of an owner's base key
    pub fn base() -> Self {
        Self([0u8; MAX_ACCESS_GROUP_KEY_NAME_LEN])
    }

    pub fn is_base(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Name bytes with the zero padding removed
    pub fn trimmed(&self) -> &[u8] {
        let end = self.0.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
        &self.0[..end]
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.trimmed())
    }
}

impl fmt::Display for GroupKeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.trimmed()))
    }
}

/// An access group, addressed by its owner and name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccessGroupId {
    pub owner_public_key: PublicKey,
    pub key_name: GroupKeyName,
}

impl AccessGroupId {
    pub fn new(owner_public_key: PublicKey, key_name: GroupKeyName) -> Self {
        Self { owner_public_key, key_name }
    }
}
