//! Read and transaction-building interface to the blockchain core
//!
//! The node gateway never touches chain state directly. Everything it reads
//! goes through [`UniversalView`] and every transaction it builds goes through
//! [`TransactionConstructor`]. [`InMemoryUniversalView`] implements both for
//! the development server and tests.

pub mod constructor;
pub mod memory;
pub mod view;

pub use constructor::{
    ConstructedTransaction, DaoCoinLimitOrderTxn, NewMessageTxn, TransactionConstructor,
};
pub use memory::{ExchangeRateState, InMemoryUniversalView};
pub use view::{GlobalParams, NodeStatus, UniversalView};
