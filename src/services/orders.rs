//! Order endpoints.

use crate::error::MarketplaceError;
use crate::execution::{PageSpec, RequestExecutor, RequestSpec, fetch_pages};
use crate::options::RequestOptions;
use crate::utils::url::encode_path_segment;
use serde_json::Value;

/// Order lists carry a complete `?query` string as their cursor.
const ORDER_LIST: PageSpec = PageSpec {
    items_pointer: "/list/elements/order",
    cursor_pointer: "/list/meta/nextCursor",
    cursor_param: "nextCursor",
    initial_cursor: None,
};

#[derive(Clone)]
pub struct Orders {
    executor: RequestExecutor,
}

impl Orders {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    /// `POST /v3/orders/{purchaseOrderId}/acknowledge`
    pub async fn acknowledge_order(
        &self,
        purchase_order_id: &str,
        options: &RequestOptions,
    ) -> Result<Value, MarketplaceError> {
        let path = format!(
            "/v3/orders/{}/acknowledge",
            encode_path_segment(purchase_order_id)
        );
        self.executor
            .execute_json(RequestSpec::post("orders.acknowledge_order", path), options)
            .await
    }

    /// `GET /v3/orders`. Filters (`sku`, `createdStartDate`, ...) go in
    /// `options.query`.
    pub async fn get_all_orders(
        &self,
        options: &RequestOptions,
    ) -> Result<Vec<Value>, MarketplaceError> {
        let spec = RequestSpec::get("orders.get_all_orders", "/v3/orders");
        fetch_pages(&self.executor, spec, &ORDER_LIST, options).await
    }

    /// `GET /v3/orders/released`
    pub async fn get_all_released_orders(
        &self,
        options: &RequestOptions,
    ) -> Result<Vec<Value>, MarketplaceError> {
        let spec = RequestSpec::get("orders.get_all_released_orders", "/v3/orders/released");
        fetch_pages(&self.executor, spec, &ORDER_LIST, options).await
    }

    /// `POST /v3/orders/{purchaseOrderId}/shipping` with the shipment
    /// document (`orderShipment`) as body.
    pub async fn ship_order_lines(
        &self,
        purchase_order_id: &str,
        shipment: Value,
        options: &RequestOptions,
    ) -> Result<Value, MarketplaceError> {
        let path = format!(
            "/v3/orders/{}/shipping",
            encode_path_segment(purchase_order_id)
        );
        let spec = RequestSpec::post("orders.ship_order_lines", path).json(shipment);
        self.executor.execute_json(spec, options).await
    }
}
