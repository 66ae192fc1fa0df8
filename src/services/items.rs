//! Item catalog endpoints.

use crate::error::MarketplaceError;
use crate::execution::{MultipartFile, PageSpec, RequestExecutor, RequestSpec, fetch_pages};
use crate::options::RequestOptions;
use crate::utils::url::encode_path_segment;
use serde_json::Value;

const ALL_ITEMS: PageSpec = PageSpec {
    items_pointer: "/ItemResponse",
    cursor_pointer: "/nextCursor",
    cursor_param: "nextCursor",
    initial_cursor: Some("*"),
};

const CATALOG_SEARCH: PageSpec = PageSpec {
    items_pointer: "/items",
    cursor_pointer: "/nextCursor",
    cursor_param: "nextCursor",
    initial_cursor: Some("*"),
};

#[derive(Clone)]
pub struct Items {
    executor: RequestExecutor,
}

impl Items {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    /// Upload an item feed (`POST /v3/feeds?feedType=`). Returns the feed
    /// acknowledgement containing `feedId`.
    pub async fn bulk_item_setup(
        &self,
        feed_type: &str,
        file: MultipartFile,
        options: &RequestOptions,
    ) -> Result<Value, MarketplaceError> {
        let spec = RequestSpec::post("items.bulk_item_setup", "/v3/feeds")
            .query("feedType", feed_type)
            .multipart(file);
        self.executor.execute_json(spec, options).await
    }

    /// `GET /v3/items/{id}`. A 404 surfaces as an API error.
    pub async fn get_an_item(
        &self,
        id: &str,
        options: &RequestOptions,
    ) -> Result<Value, MarketplaceError> {
        let path = format!("/v3/items/{}", encode_path_segment(id));
        self.executor
            .execute_json(RequestSpec::get("items.get_an_item", path), options)
            .await
    }

    /// Search the Walmart catalog (`GET /v3/items/walmart/search`).
    /// Criteria such as `upc` or `query` go in `options.query`.
    pub async fn item_search(&self, options: &RequestOptions) -> Result<Value, MarketplaceError> {
        let spec = RequestSpec::get("items.item_search", "/v3/items/walmart/search");
        self.executor.execute_json(spec, options).await
    }

    /// `DELETE /v3/items/{sku}`
    pub async fn retire_an_item(
        &self,
        sku: &str,
        options: &RequestOptions,
    ) -> Result<Value, MarketplaceError> {
        let path = format!("/v3/items/{}", encode_path_segment(sku));
        self.executor
            .execute_json(RequestSpec::delete("items.retire_an_item", path), options)
            .await
    }

    /// Search the seller's catalog (`POST /v3/items/catalog/search`).
    pub async fn catalog_search(
        &self,
        query: Value,
        options: &RequestOptions,
    ) -> Result<Vec<Value>, MarketplaceError> {
        let spec =
            RequestSpec::post("items.catalog_search", "/v3/items/catalog/search").json(query);
        fetch_pages(&self.executor, spec, &CATALOG_SEARCH, options).await
    }

    /// `GET /v3/items`, one page or all pages with `auto_pagination`.
    pub async fn get_all_items(
        &self,
        options: &RequestOptions,
    ) -> Result<Vec<Value>, MarketplaceError> {
        let spec = RequestSpec::get("items.get_all_items", "/v3/items");
        fetch_pages(&self.executor, spec, &ALL_ITEMS, options).await
    }
}
