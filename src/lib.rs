//! Node gateway metapackage
//!
//! Re-exports the workspace crates so cross-crate integration tests can reach
//! them through one dependency.

pub use api_gateway;
pub use chain_view;
pub use common;
pub use messaging;
pub use order_book;
