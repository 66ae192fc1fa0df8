mod support;

use serde_json::json;
use std::sync::Arc;
use support::{BASIC_AUTH, client, mount_token};
use walmart_marketplace::{
    CallbackExt, Completion, InMemoryTokenCache, MarketplaceError, MultipartFile, RequestOptions,
    WalmartMarketplace,
};
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, WalmartMarketplace) {
    let server = MockServer::start().await;
    mount_token(&server, "tok-svc", 1).await;
    let client = client(&server.uri(), Arc::new(InMemoryTokenCache::new()));
    (server, client)
}

#[tokio::test]
async fn domain_requests_carry_standard_headers() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v3/inventory"))
        .and(query_param("sku", "97964_KFTest"))
        .and(header("wm_sec.access_token", "tok-svc"))
        .and(header("authorization", BASIC_AUTH))
        .and(header("wm_svc.name", "Walmart Marketplace"))
        .and(header("accept", "application/json"))
        .and(header_exists("wm_qos.correlation_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sku": "97964_KFTest",
            "quantity": {"unit": "EACH", "amount": 10}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let inventory = client
        .inventory()
        .get_inventory("97964_KFTest", &RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(inventory["quantity"]["amount"], 10);
}

#[tokio::test]
async fn correlation_id_override_reaches_every_request() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v3/items/walmart/search"))
        .and(query_param("upc", "911138034047"))
        .and(header("wm_qos.correlation_id", "my-correlation-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let options = RequestOptions::new()
        .header("WM_QOS.CORRELATION_ID", "my-correlation-id")
        .query("upc", "911138034047");
    let results = client.items().item_search(&options).await.unwrap();
    assert_eq!(results["items"], json!([]));
}

#[tokio::test]
async fn channel_type_header_is_sent_when_configured() {
    let server = MockServer::start().await;
    mount_token(&server, "tok", 1).await;
    Mock::given(method("PUT"))
        .and(path("/v3/price"))
        .and(header("wm_consumer.channel.type", "channel-1"))
        .and(body_json(json!({
            "sku": "97964_KFTest",
            "pricing": [{"currentPriceType": "BASE", "currentPrice": {"currency": "USD", "amount": 9.99}}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ItemPriceResponse": {"mart": "WALMART_US", "sku": "97964_KFTest"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = support::builder(&server.uri(), Arc::new(InMemoryTokenCache::new()))
        .channel_type("channel-1")
        .build()
        .unwrap();
    let response = client
        .prices()
        .update_price(
            json!({
                "sku": "97964_KFTest",
                "pricing": [{"currentPriceType": "BASE", "currentPrice": {"currency": "USD", "amount": 9.99}}]
            }),
            &RequestOptions::default(),
        )
        .await
        .unwrap();
    assert_eq!(response["ItemPriceResponse"]["sku"], "97964_KFTest");
}

#[tokio::test]
async fn update_inventory_takes_sku_from_body() {
    let (server, client) = setup().await;
    let body = json!({"sku": "97964_KFTest", "quantity": {"unit": "EACH", "amount": 5}});
    Mock::given(method("PUT"))
        .and(path("/v3/inventory"))
        .and(query_param("sku", "97964_KFTest"))
        .and(header("content-type", "application/json"))
        .and(body_json(body.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let updated = client
        .inventory()
        .update_inventory(body.clone(), &RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(updated, body);

    let err = client
        .inventory()
        .update_inventory(json!({"quantity": {}}), &RequestOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::InvalidParameter(_)));
}

#[tokio::test]
async fn idempotent_reads_are_equal_across_styles() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v3/items/97964_KFTest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ItemResponse": [{"sku": "97964_KFTest", "publishedStatus": "PUBLISHED"}]
        })))
        .expect(3)
        .mount(&server)
        .await;

    let options = RequestOptions::default();
    let first = client.items().get_an_item("97964_KFTest", &options).await;
    let second = client.items().get_an_item("97964_KFTest", &options).await;
    assert_eq!(first, second);

    let (tx, rx) = tokio::sync::oneshot::channel();
    let items = client.items();
    async move {
        items
            .get_an_item("97964_KFTest", &RequestOptions::default())
            .await
    }
    .spawn_with_callback(move |err, item| {
        let _ = tx.send(Completion { error: err, value: item });
    })
    .await
    .unwrap();
    assert_eq!(rx.await.unwrap(), Completion::from(first));
}

#[tokio::test]
async fn path_segments_are_percent_encoded() {
    let (server, client) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/v3/items/SKU%2F1%20A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sku": "SKU/1 A",
            "message": "Thank you. Your item has been submitted for retirement from Walmart Catalog."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let retired = client
        .items()
        .retire_an_item("SKU/1 A", &RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(retired["sku"], "SKU/1 A");
}

#[tokio::test]
async fn get_all_items_with_and_without_auto_pagination() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v3/items"))
        .and(query_param("nextCursor", "*"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ItemResponse": [{"sku": "a"}],
            "totalItems": 3,
            "nextCursor": "cursor-2"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/items"))
        .and(query_param("nextCursor", "cursor-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ItemResponse": [{"sku": "b"}],
            "totalItems": 3,
            "nextCursor": "cursor-3"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/items"))
        .and(query_param("nextCursor", "cursor-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ItemResponse": [{"sku": "c"}],
            "totalItems": 3
        })))
        .mount(&server)
        .await;

    let one_page = client
        .items()
        .get_all_items(&RequestOptions::new().limit(1))
        .await
        .unwrap();
    assert!(one_page.len() <= 1);

    let all = client
        .items()
        .get_all_items(&RequestOptions::new().limit(1).auto_pagination(true))
        .await
        .unwrap();
    assert!(all.len() > 1);
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn catalog_search_posts_query() {
    let (server, client) = setup().await;
    let query = json!({"query": {"field": "sku", "value": "97964_KFTest"}});
    Mock::given(method("POST"))
        .and(path("/v3/items/catalog/search"))
        .and(query_param("nextCursor", "*"))
        .and(body_json(query.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"sku": "97964_KFTest"}],
            "totalItems": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let items = client
        .items()
        .catalog_search(query, &RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(items, vec![json!({"sku": "97964_KFTest"})]);
}

#[tokio::test]
async fn bulk_item_setup_uploads_feed() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/v3/feeds"))
        .and(query_param("feedType", "MP_ITEM"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"feedId": "FEED-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let file = MultipartFile::new("items.json", br#"{"MPItemFeedHeader":{},"MPItem":[]}"#.to_vec())
        .with_content_type("application/json");
    let ack = client
        .items()
        .bulk_item_setup("MP_ITEM", file, &RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(ack["feedId"], "FEED-1");

    let requests = server.received_requests().await.unwrap();
    let feed = requests
        .iter()
        .find(|r| r.url.path() == "/v3/feeds")
        .unwrap();
    let content_type = feed.headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
    assert!(String::from_utf8_lossy(&feed.body).contains("MPItemFeedHeader"));
}

#[tokio::test]
async fn orders_follow_query_string_cursor() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v3/orders"))
        .and(query_param("limit", "1"))
        .and(query_param("sku", "97964_KFTest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": {
                "meta": {"totalCount": 2, "limit": 1, "nextCursor": "?limit=1&hasMoreElements=true&soIndex=2&poIndex=2"},
                "elements": {"order": [{"purchaseOrderId": "1"}]}
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/orders"))
        .and(query_param("hasMoreElements", "true"))
        .and(query_param("soIndex", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": {
                "meta": {"totalCount": 2, "limit": 1},
                "elements": {"order": [{"purchaseOrderId": "2"}]}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = RequestOptions::new()
        .query("sku", "97964_KFTest")
        .limit(1)
        .auto_pagination(true);
    let orders = client.orders().get_all_orders(&options).await.unwrap();
    let ids: Vec<_> = orders.iter().map(|o| o["purchaseOrderId"].clone()).collect();
    assert_eq!(ids, vec![json!("1"), json!("2")]);
}

#[tokio::test]
async fn released_orders_acknowledge_and_ship() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v3/orders/released"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": {"meta": {}, "elements": {"order": [{"purchaseOrderId": "PO-1"}]}}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v3/orders/PO-1/acknowledge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "order": {"purchaseOrderId": "PO-1"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let shipment = json!({"orderShipment": {"orderLines": {"orderLine": []}}});
    Mock::given(method("POST"))
        .and(path("/v3/orders/PO-1/shipping"))
        .and(body_json(shipment.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "order": {"purchaseOrderId": "PO-1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = RequestOptions::default();
    let released = client.orders().get_all_released_orders(&options).await.unwrap();
    assert_eq!(released.len(), 1);
    let ack = client.orders().acknowledge_order("PO-1", &options).await.unwrap();
    assert_eq!(ack["order"]["purchaseOrderId"], "PO-1");
    let shipped = client
        .orders()
        .ship_order_lines("PO-1", shipment, &options)
        .await
        .unwrap();
    assert_eq!(shipped["order"]["purchaseOrderId"], "PO-1");
}

#[tokio::test]
async fn report_request_lifecycle() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/v3/reports/reportRequests"))
        .and(query_param("reportType", "ITEM"))
        .and(query_param("reportVersion", "v4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "requestId": "REQ-1", "requestStatus": "RECEIVED", "reportType": "ITEM"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/reports/reportRequests/REQ-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "requestId": "REQ-1", "requestStatus": "READY"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/reports/reportRequests"))
        .and(query_param("reportType", "ITEM"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "requests": [{"requestId": "REQ-1"}], "page": 1, "totalCount": 1
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/reports/downloadReport"))
        .and(query_param("requestId", "REQ-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "requestId": "REQ-1", "downloadURL": "https://example.com/report.zip"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = RequestOptions::default();
    let reports = client.reports();
    let created = reports
        .create_report_request("ITEM", "v4", None, &options)
        .await
        .unwrap();
    assert_eq!(created["requestId"], "REQ-1");
    let status = reports.report_request_status("REQ-1", &options).await.unwrap();
    assert_eq!(status["requestStatus"], "READY");
    let all = reports.get_all_report_requests("ITEM", &options).await.unwrap();
    assert_eq!(all.len(), 1);
    let url = reports.download_report_url("REQ-1", &options).await.unwrap();
    assert_eq!(url["downloadURL"], "https://example.com/report.zip");
}

#[tokio::test]
async fn reconciliation_report_rows() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v3/report/reconreport/availableReconFiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "availableApReportDates": ["01012026", "01082026"]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/report/reconreport/reconFile"))
        .and(query_param("reportDate", "01012026"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/csv")
                .set_body_string(
                    "Walmart.com Order #,Transaction Type,Amount\r\n1001,Sale,12.50\r\n1002,Refund,\"-3.00\"\r\n",
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    let options = RequestOptions::default();
    let dates = client
        .reports()
        .get_available_reconciliation_report_dates(&options)
        .await
        .unwrap();
    let first = dates["availableApReportDates"][0].as_str().unwrap();

    let rows = client
        .reports()
        .get_reconciliation_report(first, &options)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["Walmart.com Order #"], "1001");
    assert_eq!(rows[1]["Amount"], "-3.00");
}

fn zipped(name: &str, contents: &str) -> Vec<u8> {
    use std::io::Write;
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    writer
        .start_file(name, zip::write::SimpleFileOptions::default())
        .unwrap();
    writer.write_all(contents.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

#[tokio::test]
async fn zipped_reconciliation_report_rows() {
    let (server, client) = setup().await;
    let archive = zipped(
        "ReconFile_01012026.csv",
        "\u{feff}Walmart.com Order #,Transaction Type,Amount\r\n1001,Sale,12.50\r\n1002,Refund,\"-3.00\"\r\n",
    );
    Mock::given(method("GET"))
        .and(path("/v3/report/reconreport/reconFile"))
        .and(query_param("reportDate", "01012026"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/octet-stream")
                .set_body_bytes(archive),
        )
        .expect(1)
        .mount(&server)
        .await;

    let rows = client
        .reports()
        .get_reconciliation_report("01012026", &RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["Walmart.com Order #"], "1001");
    assert_eq!(rows[0]["Transaction Type"], "Sale");
    assert_eq!(rows[1]["Amount"], "-3.00");
}

#[tokio::test]
async fn corrupt_reconciliation_archive_is_a_parse_error() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v3/report/reconreport/reconFile"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04garbage".to_vec()))
        .mount(&server)
        .await;

    let err = client
        .reports()
        .get_reconciliation_report("01012026", &RequestOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::ParseError(_)));
}
