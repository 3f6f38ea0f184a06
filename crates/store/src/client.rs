use api_types::record::RecordNew;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

/// Thin client for the six WalletSync endpoints.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Server { status: StatusCode, message: String },
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn post_json_unit<TReq: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<(), ApiError> {
        let resp = self.client.post(self.url(path)).json(body).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let message = match resp.json::<ErrorBody>().await {
            Ok(err) => err.error,
            Err(_) => "server error".to_string(),
        };
        Err(ApiError::Server { status, message })
    }

    async fn delete_unit(&self, path: &str) -> Result<(), ApiError> {
        let resp = self.client.delete(self.url(path)).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let message = match resp.json::<ErrorBody>().await {
            Ok(err) => err.error,
            Err(_) => "server error".to_string(),
        };
        Err(ApiError::Server { status, message })
    }

    /// GET a list endpoint and hand back whatever JSON arrives.
    ///
    /// No status check: the store coerces anything that is not an array of
    /// records to an empty collection, error payloads included.
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let resp = self.client.get(self.url(path)).send().await?;
        Ok(resp.json::<Value>().await?)
    }

    pub async fn create_income(&self, record: &RecordNew) -> Result<(), ApiError> {
        self.post_json_unit("/add-income", record).await
    }

    pub async fn list_incomes(&self) -> Result<Value, ApiError> {
        self.get_json("/get-incomes").await
    }

    pub async fn remove_income(&self, id: &str) -> Result<(), ApiError> {
        self.delete_unit(&format!("/delete-income/{id}")).await
    }

    pub async fn create_expense(&self, record: &RecordNew) -> Result<(), ApiError> {
        self.post_json_unit("/add-expense", record).await
    }

    pub async fn list_expenses(&self) -> Result<Value, ApiError> {
        self.get_json("/get-expenses").await
    }

    pub async fn remove_expense(&self, id: &str) -> Result<(), ApiError> {
        self.delete_unit(&format!("/delete-expense/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_doubling_slashes() {
        let client = ApiClient::new("http://127.0.0.1:3000/");
        assert_eq!(client.url("/add-income"), "http://127.0.0.1:3000/add-income");
        assert_eq!(client.url("get-incomes"), "http://127.0.0.1:3000/get-incomes");
    }
}
