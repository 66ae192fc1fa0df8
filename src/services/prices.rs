//! Price endpoints.

use crate::error::MarketplaceError;
use crate::execution::{RequestExecutor, RequestSpec};
use crate::options::RequestOptions;
use serde_json::Value;

#[derive(Clone)]
pub struct Prices {
    executor: RequestExecutor,
}

impl Prices {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    /// `PUT /v3/price` for a single SKU.
    pub async fn update_price(
        &self,
        price: Value,
        options: &RequestOptions,
    ) -> Result<Value, MarketplaceError> {
        let spec = RequestSpec::put("prices.update_price", "/v3/price").json(price);
        self.executor.execute_json(spec, options).await
    }
}
