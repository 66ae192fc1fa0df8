//! Inventory endpoints.

use crate::error::MarketplaceError;
use crate::execution::{RequestExecutor, RequestSpec};
use crate::options::RequestOptions;
use serde_json::Value;

#[derive(Clone)]
pub struct Inventory {
    executor: RequestExecutor,
}

impl Inventory {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    /// `GET /v3/inventory?sku=`. Pass `shipNode` through `options.query`.
    pub async fn get_inventory(
        &self,
        sku: &str,
        options: &RequestOptions,
    ) -> Result<Value, MarketplaceError> {
        let spec = RequestSpec::get("inventory.get_inventory", "/v3/inventory").query("sku", sku);
        self.executor.execute_json(spec, options).await
    }

    /// `PUT /v3/inventory?sku=` with the inventory document as body.
    ///
    /// The SKU is read from the document's `sku` field.
    pub async fn update_inventory(
        &self,
        inventory: Value,
        options: &RequestOptions,
    ) -> Result<Value, MarketplaceError> {
        let sku = inventory
            .get("sku")
            .and_then(Value::as_str)
            .filter(|sku| !sku.is_empty())
            .ok_or_else(|| {
                MarketplaceError::InvalidParameter("inventory.sku is required".to_string())
            })?
            .to_string();
        let spec = RequestSpec::put("inventory.update_inventory", "/v3/inventory")
            .query("sku", sku)
            .json(inventory);
        self.executor.execute_json(spec, options).await
    }
}
