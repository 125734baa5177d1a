//! Inventory endpoints extracted from `api`.

#[cfg(test)]
#[path = "api_inventory_test.rs"]
mod api_inventory_test;

use serde_json::Value;

use super::api::ApiClient;
use super::error::ApiError;
use super::types::Params;

fn inventory_item_path(id: i64) -> String {
    format!("/inventory/{id}")
}

fn check_out_path(id: i64) -> String {
    format!("/inventory/{id}/check-out")
}

fn check_in_path(id: i64) -> String {
    format!("/inventory/{id}/check-in")
}

impl ApiClient {
    /// `GET /inventory` with optional filter parameters.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn list_inventory(&self, params: &Params) -> Result<Value, ApiError> {
        self.get_with_query("/inventory", params).await
    }

    /// `GET /inventory/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn get_inventory_item(&self, id: i64) -> Result<Value, ApiError> {
        self.get(&inventory_item_path(id)).await
    }

    /// `POST /inventory`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn create_inventory_item(&self, item: &Value) -> Result<Value, ApiError> {
        self.post("/inventory", item).await
    }

    /// `PUT /inventory/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn update_inventory_item(&self, id: i64, item: &Value) -> Result<Value, ApiError> {
        self.put(&inventory_item_path(id), item).await
    }

    /// `DELETE /inventory/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn delete_inventory_item(&self, id: i64) -> Result<Value, ApiError> {
        self.delete(&inventory_item_path(id)).await
    }

    /// `POST /inventory/{id}/check-out`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn check_out_item(&self, id: i64, checkout: &Value) -> Result<Value, ApiError> {
        self.post(&check_out_path(id), checkout).await
    }

    /// `POST /inventory/{id}/check-in`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn check_in_item(&self, id: i64, checkin: &Value) -> Result<Value, ApiError> {
        self.post(&check_in_path(id), checkin).await
    }

    /// `GET /inventory/categories`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn inventory_categories(&self) -> Result<Value, ApiError> {
        self.get("/inventory/categories").await
    }
}
