//! Job endpoints extracted from `api`.

#[cfg(test)]
#[path = "api_jobs_test.rs"]
mod api_jobs_test;

use serde_json::Value;

use super::api::ApiClient;
use super::error::ApiError;
use super::types::JobQuery;

fn job_path(id: i64) -> String {
    format!("/jobs/{id}")
}

fn job_assignments_path(id: i64) -> String {
    format!("/jobs/{id}/assignments")
}

impl ApiClient {
    /// `GET /jobs` filtered by `query`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn list_jobs(&self, query: &JobQuery) -> Result<Value, ApiError> {
        self.get_with_query("/jobs", query).await
    }

    /// `GET /jobs/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn get_job(&self, id: i64) -> Result<Value, ApiError> {
        self.get(&job_path(id)).await
    }

    /// `POST /jobs`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn create_job(&self, job: &Value) -> Result<Value, ApiError> {
        self.post("/jobs", job).await
    }

    /// `PUT /jobs/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn update_job(&self, id: i64, job: &Value) -> Result<Value, ApiError> {
        self.put(&job_path(id), job).await
    }

    /// `DELETE /jobs/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn delete_job(&self, id: i64) -> Result<Value, ApiError> {
        self.delete(&job_path(id)).await
    }

    /// `GET /jobs/{id}/assignments`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn job_assignments(&self, id: i64) -> Result<Value, ApiError> {
        self.get(&job_assignments_path(id)).await
    }

    /// `GET /jobs/dashboard`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn dashboard_stats(&self) -> Result<Value, ApiError> {
        self.get("/jobs/dashboard").await
    }
}
