//! DAO-coin limit-order book: listings and order placement
//!
//! Reads go through the chain view and render every stored order with the
//! scaled exchange-rate arithmetic from `common::exchange`. Writes validate a
//! new order, check the transactor can cover it alongside their open orders,
//! and hand it to the transaction constructor.

pub mod placement;
pub mod response;
pub mod service;

pub use placement::{DaoCoinLimitOrderResponse, LimitOrderPlacement};
pub use response::{build_order_response, DaoCoinLimitOrderEntryResponse};
pub use service::OrderBookService;
