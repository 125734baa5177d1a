//! Reporting endpoints extracted from `api`.

#[cfg(test)]
#[path = "api_reports_test.rs"]
mod api_reports_test;

use serde_json::Value;

use super::api::ApiClient;
use super::error::ApiError;
use super::types::ReportQuery;

impl ApiClient {
    /// `GET /reports/inventory-usage`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn inventory_usage_report(&self, query: &ReportQuery) -> Result<Value, ApiError> {
        self.get_with_query("/reports/inventory-usage", query).await
    }

    /// `GET /reports/job-summary`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn job_summary_report(&self, query: &ReportQuery) -> Result<Value, ApiError> {
        self.get_with_query("/reports/job-summary", query).await
    }

    /// `GET /reports/inventory-status`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn inventory_status_report(&self, query: &ReportQuery) -> Result<Value, ApiError> {
        self.get_with_query("/reports/inventory-status", query).await
    }

    /// `GET /reports/overdue-items`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn overdue_items_report(&self) -> Result<Value, ApiError> {
        self.get("/reports/overdue-items").await
    }
}
