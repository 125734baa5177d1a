//! User-administration endpoints extracted from `api`.

#[cfg(test)]
#[path = "api_users_test.rs"]
mod api_users_test;

use serde_json::Value;

use super::api::ApiClient;
use super::error::ApiError;
use super::types::Params;

fn user_path(id: i64) -> String {
    format!("/users/{id}")
}

impl ApiClient {
    /// `GET /users` with optional filter parameters.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn list_users(&self, params: &Params) -> Result<Value, ApiError> {
        self.get_with_query("/users", params).await
    }

    /// `GET /users/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn get_user(&self, id: i64) -> Result<Value, ApiError> {
        self.get(&user_path(id)).await
    }

    /// `POST /users`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn create_user(&self, user: &Value) -> Result<Value, ApiError> {
        self.post("/users", user).await
    }

    /// `PUT /users/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn update_user(&self, id: i64, user: &Value) -> Result<Value, ApiError> {
        self.put(&user_path(id), user).await
    }

    /// `DELETE /users/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn delete_user(&self, id: i64) -> Result<Value, ApiError> {
        self.delete(&user_path(id)).await
    }
}
