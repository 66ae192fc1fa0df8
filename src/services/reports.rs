//! Report endpoints.

use crate::error::MarketplaceError;
use crate::execution::{PageSpec, RequestExecutor, RequestSpec, fetch_pages};
use crate::options::RequestOptions;
use crate::utils::archive::{first_csv_entry, is_zip};
use crate::utils::csv::parse_rows;
use crate::utils::url::encode_path_segment;
use serde_json::{Map, Value};

const REPORT_REQUESTS: PageSpec = PageSpec {
    items_pointer: "/requests",
    cursor_pointer: "/nextCursor",
    cursor_param: "nextCursor",
    initial_cursor: None,
};

#[derive(Clone)]
pub struct Reports {
    executor: RequestExecutor,
}

impl Reports {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    /// `POST /v3/reports/reportRequests?reportType=&reportVersion=`.
    /// `body` carries optional filters (`rowFilters`, `excludeColumns`).
    pub async fn create_report_request(
        &self,
        report_type: &str,
        report_version: &str,
        body: Option<Value>,
        options: &RequestOptions,
    ) -> Result<Value, MarketplaceError> {
        let mut spec = RequestSpec::post("reports.create_report_request", "/v3/reports/reportRequests")
            .query("reportType", report_type)
            .query("reportVersion", report_version);
        if let Some(body) = body {
            spec = spec.json(body);
        }
        self.executor.execute_json(spec, options).await
    }

    /// `GET /v3/reports/downloadReport?requestId=`. The response holds a
    /// short-lived `downloadURL`.
    pub async fn download_report_url(
        &self,
        request_id: &str,
        options: &RequestOptions,
    ) -> Result<Value, MarketplaceError> {
        let spec = RequestSpec::get("reports.download_report_url", "/v3/reports/downloadReport")
            .query("requestId", request_id);
        self.executor.execute_json(spec, options).await
    }

    /// `GET /v3/reports/reportRequests?reportType=`
    pub async fn get_all_report_requests(
        &self,
        report_type: &str,
        options: &RequestOptions,
    ) -> Result<Vec<Value>, MarketplaceError> {
        let spec = RequestSpec::get("reports.get_all_report_requests", "/v3/reports/reportRequests")
            .query("reportType", report_type);
        fetch_pages(&self.executor, spec, &REPORT_REQUESTS, options).await
    }

    /// `GET /v3/report/reconreport/availableReconFiles`; dates are under
    /// `availableApReportDates`.
    pub async fn get_available_reconciliation_report_dates(
        &self,
        options: &RequestOptions,
    ) -> Result<Value, MarketplaceError> {
        let spec = RequestSpec::get(
            "reports.get_available_reconciliation_report_dates",
            "/v3/report/reconreport/availableReconFiles",
        );
        self.executor.execute_json(spec, options).await
    }

    /// `GET /v3/reports/reportRequests/{requestId}`
    pub async fn report_request_status(
        &self,
        request_id: &str,
        options: &RequestOptions,
    ) -> Result<Value, MarketplaceError> {
        let path = format!(
            "/v3/reports/reportRequests/{}",
            encode_path_segment(request_id)
        );
        self.executor
            .execute_json(RequestSpec::get("reports.report_request_status", path), options)
            .await
    }

    /// `GET /v3/report/reconreport/reconFile?reportDate=`, one object per
    /// CSV row keyed by column header. The file usually arrives zipped; the
    /// first CSV entry of the archive is read. Plain CSV bodies are accepted
    /// as well.
    pub async fn get_reconciliation_report(
        &self,
        report_date: &str,
        options: &RequestOptions,
    ) -> Result<Vec<Map<String, Value>>, MarketplaceError> {
        let spec = RequestSpec::get(
            "reports.get_reconciliation_report",
            "/v3/report/reconreport/reconFile",
        )
        .query("reportDate", report_date)
        .accept("application/octet-stream, text/csv");
        let body = self.executor.execute_bytes(spec, options).await?;
        if is_zip(&body) {
            return parse_rows(&first_csv_entry(&body)?);
        }
        parse_rows(&body)
    }
}
