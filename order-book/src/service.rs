//! Order-book service over the chain view

use std::sync::Arc;

use chain_view::{DaoCoinLimitOrderTxn, TransactionConstructor, UniversalView};
use common::error::{Error, ErrorExt, Result};
use common::exchange::{base_units_to_sell, U256};
use common::model::{
    CoinPair, CoinSide, DaoCoinLimitOrderEntry, FillType, Network, OrderOperationType, Pkid,
    PublicKey,
};
use tracing::{debug, error, info};

use crate::placement::{DaoCoinLimitOrderResponse, LimitOrderPlacement};
use crate::response::{build_order_response, DaoCoinLimitOrderEntryResponse};

/// A coin identifier resolved against the chain view
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedCoin {
    side: CoinSide,
    pkid: Pkid,
}

/// Lists and places DAO-coin limit orders
pub struct OrderBookService {
    view: Arc<dyn UniversalView>,
    constructor: Arc<dyn TransactionConstructor>,
    network: Network,
}

impl OrderBookService {
    /// Create a new order-book service
    pub fn new(
        view: Arc<dyn UniversalView>,
        constructor: Arc<dyn TransactionConstructor>,
        network: Network,
    ) -> Self {
        Self {
            view,
            constructor,
            network,
        }
    }

    /// All open orders between two coins, in both directions
    pub async fn get_dao_coin_limit_orders(
        &self,
        coin1: &str,
        coin2: &str,
    ) -> Result<Vec<DaoCoinLimitOrderEntryResponse>> {
        let coin1 = self
            .resolve_coin(coin1)
            .await
            .with_context(|| "invalid DAOCoin1CreatorPublicKeyBase58Check")?;
        let coin2 = self
            .resolve_coin(coin2)
            .await
            .with_context(|| "invalid DAOCoin2CreatorPublicKeyBase58Check")?;

        if coin1.side.is_native() && coin2.side.is_native() {
            return Err(Error::ValidationError(
                "must provide a DAO coin for at least one of DAOCoin1CreatorPublicKeyBase58Check \
                 or DAOCoin2CreatorPublicKeyBase58Check"
                    .to_string(),
            ));
        }

        let buying_coin1 = self.view.get_dao_coin_limit_orders(&coin1.pkid, &coin2.pkid).await?;
        let buying_coin2 = self.view.get_dao_coin_limit_orders(&coin2.pkid, &coin1.pkid).await?;
        debug!(
            "Found {} orders buying {} and {} orders buying {}",
            buying_coin1.len(),
            coin1.side,
            buying_coin2.len(),
            coin2.side
        );

        let mut responses = Vec::with_capacity(buying_coin1.len() + buying_coin2.len());
        for order in &buying_coin1 {
            let transactor = self.public_key_for_pkid(&order.transactor_pkid).await?;
            push_order_response(&mut responses, &transactor, &coin1.side, &coin2.side, order);
        }
        for order in &buying_coin2 {
            let transactor = self.public_key_for_pkid(&order.transactor_pkid).await?;
            push_order_response(&mut responses, &transactor, &coin2.side, &coin1.side, order);
        }
        Ok(responses)
    }

    /// All open orders placed by one transactor
    pub async fn get_transactor_dao_coin_limit_orders(
        &self,
        transactor: &str,
    ) -> Result<Vec<DaoCoinLimitOrderEntryResponse>> {
        let transactor_public_key = self
            .resolve_public_key(transactor)
            .await
            .with_context(|| "invalid TransactorPublicKeyBase58Check")?;
        let transactor_pkid = self.view.get_pkid_for_public_key(&transactor_public_key).await?;
        let transactor = transactor_public_key.to_base58_check(self.network);

        let orders = self.view.get_transactor_dao_coin_limit_orders(&transactor_pkid).await?;

        let mut responses = Vec::with_capacity(orders.len());
        for order in &orders {
            let buying = self.coin_side_for_pkid(&order.buying_dao_coin_creator_pkid).await?;
            let selling = self.coin_side_for_pkid(&order.selling_dao_coin_creator_pkid).await?;
            push_order_response(&mut responses, &transactor, &buying, &selling, order);
        }
        Ok(responses)
    }

    /// Validates a limit order and builds its unsigned transaction
    pub async fn create_dao_coin_limit_order(
        &self,
        placement: &LimitOrderPlacement,
    ) -> Result<DaoCoinLimitOrderResponse> {
        let transactor = self
            .resolve_public_key(&placement.transactor)
            .await
            .with_context(|| "invalid TransactorPublicKeyBase58CheckOrUsername")?;
        let buying = self
            .resolve_coin(&placement.buying_coin)
            .await
            .with_context(|| "invalid BuyingDAOCoinCreatorPublicKeyBase58CheckOrUsername")?;
        let selling = self
            .resolve_coin(&placement.selling_coin)
            .await
            .with_context(|| "invalid SellingDAOCoinCreatorPublicKeyBase58CheckOrUsername")?;

        if buying.pkid == selling.pkid {
            return Err(Error::ValidationError(format!(
                "cannot buy and sell the same coin {}",
                buying.side
            )));
        }
        let pair = CoinPair::new(buying.side.clone(), selling.side.clone())?;

        let operation: OrderOperationType = placement.operation_type.parse()?;
        let fill_type: FillType = placement.fill_type.parse()?;

        let scaled_rate = placement.scaled_exchange_rate(&pair, operation)?;
        let quantity = placement.quantity_in_base_units(&pair, operation)?;

        let transactor_pkid = self.view.get_pkid_for_public_key(&transactor).await?;
        self.validate_transactor_selling_balance(
            &transactor,
            &transactor_pkid,
            &buying.pkid,
            &selling.pkid,
            operation,
            scaled_rate,
            quantity,
        )
        .await?;

        let txn = DaoCoinLimitOrderTxn {
            transactor_public_key: transactor,
            buying_dao_coin_creator_pkid: buying.pkid,
            selling_dao_coin_creator_pkid: selling.pkid,
            scaled_exchange_rate_coins_to_sell_per_coin_to_buy: scaled_rate,
            quantity_to_fill_in_base_units: quantity,
            operation_type: operation,
            fill_type,
            cancel_order_id: None,
        };
        let constructed = self
            .constructor
            .create_dao_coin_limit_order_txn(&txn, placement.min_fee_rate_nanos_per_kb)
            .await?;

        info!(
            pair = %pair,
            operation = %operation,
            fee_nanos = constructed.fee_nanos,
            "Constructed DAO coin limit order"
        );
        Ok(constructed.into())
    }

    /// Checks the transactor's selling balance covers the new order plus
    /// every open order they have on the same pair.
    #[allow(clippy::too_many_arguments)]
    pub async fn validate_transactor_selling_balance(
        &self,
        transactor: &PublicKey,
        transactor_pkid: &Pkid,
        buying: &Pkid,
        selling: &Pkid,
        operation: OrderOperationType,
        scaled_rate: U256,
        quantity_in_base_units: U256,
    ) -> Result<()> {
        let balance = if selling.is_zero() {
            U256::from(self.view.get_native_balance_nanos(transactor).await?)
        } else {
            self.view.get_dao_coin_balance(transactor_pkid, selling).await?
        };

        let mut total_selling = match operation {
            OrderOperationType::Ask => quantity_in_base_units,
            OrderOperationType::Bid => base_units_to_sell(scaled_rate, quantity_in_base_units)
                .with_context(|| "calculating new order selling quantity")?,
        };

        let open_orders = self.view.get_transactor_dao_coin_limit_orders(transactor_pkid).await?;
        for order in open_orders.iter().filter(|o| o.is_same_pair(buying, selling)) {
            let order_selling = order
                .base_units_to_sell()
                .with_context(|| format!("calculating selling quantity of open order {}", order.order_id))?;
            total_selling = total_selling.checked_add(order_selling).ok_or_else(|| {
                Error::Overflow(format!(
                    "summing open order selling quantities: {} exceeds 256 bits",
                    order.order_id
                ))
            })?;
        }

        if balance < total_selling {
            return Err(Error::InsufficientBalance(format!(
                "selling balance of {} base units cannot cover {} base units across open orders",
                balance, total_selling
            )));
        }
        Ok(())
    }

    /// `"DESO"` is the native coin; anything else must name a DAO-coin creator.
    async fn resolve_coin(&self, identifier: &str) -> Result<ResolvedCoin> {
        if CoinSide::from_identifier(identifier).is_native() {
            return Ok(ResolvedCoin {
                side: CoinSide::Native,
                pkid: Pkid::ZERO,
            });
        }
        let public_key = self.resolve_public_key(identifier).await?;
        let pkid = self.view.get_pkid_for_public_key(&public_key).await?;
        Ok(ResolvedCoin {
            side: CoinSide::dao_coin(public_key.to_base58_check(self.network)),
            pkid,
        })
    }

    /// A Base58Check public key, or a registered username
    async fn resolve_public_key(&self, identifier: &str) -> Result<PublicKey> {
        let identifier = identifier.trim();
        match PublicKey::from_base58_check(identifier) {
            Ok(public_key) => Ok(public_key),
            Err(decode_error) => self
                .view
                .get_public_key_for_username(identifier)
                .await?
                .ok_or(decode_error),
        }
    }

    async fn public_key_for_pkid(&self, pkid: &Pkid) -> Result<String> {
        let public_key = self.view.get_public_key_for_pkid(pkid).await?;
        Ok(public_key.to_base58_check(self.network))
    }

    async fn coin_side_for_pkid(&self, pkid: &Pkid) -> Result<CoinSide> {
        if pkid.is_zero() {
            return Ok(CoinSide::Native);
        }
        Ok(CoinSide::dao_coin(self.public_key_for_pkid(pkid).await?))
    }
}

/// Appends an order's response, skipping entries that cannot be rendered.
fn push_order_response(
    responses: &mut Vec<DaoCoinLimitOrderEntryResponse>,
    transactor: &str,
    buying: &CoinSide,
    selling: &CoinSide,
    order: &DaoCoinLimitOrderEntry,
) {
    match build_order_response(transactor, buying, selling, order) {
        Ok(response) => responses.push(response),
        Err(e) => error!(order_id = %order.order_id, "Skipping limit order that cannot be rendered: {}", e),
    }
}
