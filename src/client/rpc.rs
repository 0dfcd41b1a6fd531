use crate::dto;
use crate::routing_utils::BasicErrorResponse;
use reqwest::Response;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("the request could not be sent: {0}")]
    Transport(#[from] reqwest_middleware::Error),
    #[error("the server rejected the call with status {status}")]
    Rejected {
        status: u16,
        error_body: Option<BasicErrorResponse>,
    },
    #[error("the server's response could not be read: {0}")]
    Decode(#[source] reqwest::Error),
}

/// The four calls the todo views make against the todo service
pub trait TodoRpc {
    async fn get_todos(&self) -> Result<Vec<dto::Todo>, RpcError>;
    async fn add_todo(&self, new_todo: &dto::NewTodo) -> Result<dto::InsertedTodo, RpcError>;
    async fn update_todo(&self, todo_id: i32, update: &dto::UpdateTodo) -> Result<(), RpcError>;
    async fn delete_todo(&self, todo_id: i32) -> Result<dto::DeletedTodo, RpcError>;
}

/// Talks to the todo service over HTTP. Requests carry the current trace context.
#[derive(Clone)]
pub struct HttpTodoRpc {
    base_url: String,
    http_client: ClientWithMiddleware,
}

impl HttpTodoRpc {
    /// Creates a client for the service rooted at [base_url], e.g. "http://localhost:8080"
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let base_client = reqwest::Client::builder().use_rustls_tls().build()?;
        let http_client = ClientBuilder::new(base_client)
            .with(TracingMiddleware::default())
            .build();

        Ok(HttpTodoRpc {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client,
        })
    }

    fn todos_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn todo_url(&self, todo_id: i32) -> String {
        format!("{}/todos/{todo_id}", self.base_url)
    }
}

/// Turns a non-2xx response into [RpcError::Rejected], keeping the error body if it decodes
async fn expect_success(response: Response) -> Result<Response, RpcError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_body = response.json::<BasicErrorResponse>().await.ok();
    debug!(status = status.as_u16(), ?error_body, "todo call rejected");
    Err(RpcError::Rejected {
        status: status.as_u16(),
        error_body,
    })
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, RpcError> {
    expect_success(response)
        .await?
        .json::<T>()
        .await
        .map_err(RpcError::Decode)
}

impl TodoRpc for HttpTodoRpc {
    async fn get_todos(&self) -> Result<Vec<dto::Todo>, RpcError> {
        let response = self.http_client.get(self.todos_url()).send().await?;
        decode_json(response).await
    }

    async fn add_todo(&self, new_todo: &dto::NewTodo) -> Result<dto::InsertedTodo, RpcError> {
        let response = self
            .http_client
            .post(self.todos_url())
            .json(new_todo)
            .send()
            .await?;
        decode_json(response).await
    }

    async fn update_todo(&self, todo_id: i32, update: &dto::UpdateTodo) -> Result<(), RpcError> {
        let response = self
            .http_client
            .put(self.todo_url(todo_id))
            .json(update)
            .send()
            .await?;
        expect_success(response).await?;

        Ok(())
    }

    async fn delete_todo(&self, todo_id: i32) -> Result<dto::DeletedTodo, RpcError> {
        let response = self
            .http_client
            .delete(self.todo_url(todo_id))
            .send()
            .await?;
        decode_json(response).await
    }
}
