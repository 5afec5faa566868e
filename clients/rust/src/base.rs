use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

pub(crate) struct BaseClient {
    address: String,
    owner_id: Option<String>,
}

#[derive(Debug)]
pub enum APIError {
    Network,
    MalformedResponse,
    UnexpectedStatusCode(StatusCode),
}
pub type APIResponse<T> = Result<T, APIError>;

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            address,
            owner_id: None,
        }
    }

    pub fn set_owner_id(&mut self, owner_id: String) {
        self.owner_id = Some(owner_id);
    }

    fn get_client(&self, method: Method, path: String) -> RequestBuilder {
        let client = Client::new();
        let url = format!("{}/{}", self.address, path);
        let builder = client.request(method, &url);

        if let Some(owner_id) = &self.owner_id {
            builder.header("remindr-owner", owner_id.clone())
        } else {
            builder
        }
    }

    fn check_status_code(
        &self,
        res: &Response,
        expected_status_code: StatusCode,
    ) -> Result<(), APIError> {
        let status = res.status();
        if status != expected_status_code {
            return Err(APIError::UnexpectedStatusCode(status));
        }
        Ok(())
    }

    async fn handle_api_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Response,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.check_status_code(&res, expected_status_code)?;
        res.json::<T>()
            .await
            .map_err(|_| APIError::MalformedResponse)
    }

    async fn send(&self, builder: RequestBuilder) -> APIResponse<Response> {
        builder.send().await.map_err(|_| APIError::Network)
    }

    pub async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.send(self.get_client(Method::GET, path)).await?;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn delete<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.send(self.get_client(Method::DELETE, path)).await?;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn post<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .send(self.get_client(Method::POST, path).json(&body))
            .await?;
        self.handle_api_response(res, expected_status_code).await
    }

    /// Sends a raw body and returns the response text, for endpoints that do
    /// not speak JSON
    pub async fn send_raw(
        &self,
        method: Method,
        body: String,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<String> {
        let builder = self
            .get_client(method, path)
            .header("content-type", "application/json")
            .body(body);
        let res = self.send(builder).await?;
        self.check_status_code(&res, expected_status_code)?;
        res.text().await.map_err(|_| APIError::MalformedResponse)
    }
}
