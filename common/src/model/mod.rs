//! Domain models for the node gateway

pub mod access_group;
pub mod coin;
pub mod identity;
pub mod message;
pub mod order;

pub use access_group::{AccessGroupId, GroupKeyName};
pub use coin::{CoinPair, CoinSide, NATIVE_COIN_IDENTIFIER};
pub use identity::{Network, Pkid, PublicKey};
pub use message::{DmThreadKey, NewMessageEntry, NewMessageType};
pub use order::{DaoCoinLimitOrderEntry, FillType, OrderId, OrderOperationType};
