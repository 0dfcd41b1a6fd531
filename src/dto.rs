mod todo;

pub use todo::*;

use crate::domain::todo::TodoStatus;
use crate::routing_utils::BasicErrorResponse;
use utoipa::OpenApi;

/// Collects schemas used across the API so they show up in the OpenAPI document
#[derive(OpenApi)]
#[openapi(components(schemas(
    Todo,
    NewTodo,
    UpdateTodo,
    InsertedTodo,
    DeletedTodo,
    TodoStatus,
    BasicErrorResponse
)))]
pub struct OpenApiSchemas;
