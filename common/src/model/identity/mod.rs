//! Public keys, PKIDs and their Base58Check encoding
//!
//! Keys travel over the wire as Base58Check strings: a three-byte network
//! prefix, the 33-byte compressed secp256k1 key, and a four-byte
//! double-SHA256 checksum.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Length of a compressed secp256k1 public key
pub const PUBLIC_KEY_LEN: usize = 33;

/// Length of the Base58Check network prefix
pub const NETWORK_PREFIX_LEN: usize = 3;

const MAINNET_PUBLIC_KEY_PREFIX: [u8; NETWORK_PREFIX_LEN] = [0xcd, 0x14, 0x00];
const TESTNET_PUBLIC_KEY_PREFIX: [u8; NETWORK_PREFIX_LEN] = [0x11, 0xc2, 0x00];

/// Network a node serves, selecting the key encoding prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    pub fn public_key_prefix(&self) -> [u8; NETWORK_PREFIX_LEN] {
        match self {
            Network::Mainnet => MAINNET_PUBLIC_KEY_PREFIX,
            Network::Testnet => TESTNET_PUBLIC_KEY_PREFIX,
        }
    }

    fn from_prefix(prefix: &[u8]) -> Option<Self> {
        if prefix == MAINNET_PUBLIC_KEY_PREFIX {
            Some(Network::Mainnet)
        } else if prefix == TESTNET_PUBLIC_KEY_PREFIX {
            Some(Network::Testnet)
        } else {
            None
        }
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            other => Err(Error::UnknownEnumValue(format!("unknown network '{}'", other))),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

/// A validated compressed secp256k1 public key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey([u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    /// Validates raw key bytes as a point on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let key: [u8; PUBLIC_KEY_LEN] = bytes.try_into().map_err(|_| {
            Error::InvalidPublicKey(format!(
                "expected {} bytes, got {}",
                PUBLIC_KEY_LEN,
                bytes.len()
            ))
        })?;
        secp256k1::PublicKey::from_slice(&key)
            .map_err(|e| Error::InvalidPublicKey(format!("not a secp256k1 point: {}", e)))?;
        Ok(Self(key))
    }

    /// Decodes a Base58Check key from either network.
    pub fn from_base58_check(encoded: &str) -> Result<Self> {
        let decoded = bs58::decode(encoded.trim())
            .with_check(None)
            .into_vec()
            .map_err(|e| Error::InvalidPublicKey(format!("'{}': {}", encoded, e)))?;

        if decoded.len() != NETWORK_PREFIX_LEN + PUBLIC_KEY_LEN {
            return Err(Error::InvalidPublicKey(format!(
                "'{}' decodes to {} bytes",
                encoded,
                decoded.len()
            )));
        }
        let (prefix, key) = decoded.split_at(NETWORK_PREFIX_LEN);
        if Network::from_prefix(prefix).is_none() {
            return Err(Error::InvalidPublicKey(format!(
                "'{}' has unknown network prefix {}",
                encoded,
                hex::encode(prefix)
            )));
        }
        Self::from_bytes(key)
    }

    pub fn to_base58_check(&self, network: Network) -> String {
        let mut payload = Vec::with_capacity(NETWORK_PREFIX_LEN + PUBLIC_KEY_LEN);
        payload.extend_from_slice(&network.public_key_prefix());
        payload.extend_from_slice(&self.0);
        bs58::encode(payload).with_check().into_string()
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Stable profile identifier. Defaults to the owner's original public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pkid([u8; PUBLIC_KEY_LEN]);

impl Pkid {
    /// PKID of the native coin in order entries
    pub const ZERO: Pkid = Pkid([0u8; PUBLIC_KEY_LEN]);

    pub fn new(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }
}

impl From<PublicKey> for Pkid {
    fn from(key: PublicKey) -> Self {
        Self(key.0)
    }
}

impl fmt::Display for Pkid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}
