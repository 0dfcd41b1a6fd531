use crate::domain::todo::driven_ports::{TodoReader, TodoWriter};
use crate::domain::todo::driving_ports::TodoPort;
use crate::external_connections::ExternalConnectivity;
use crate::routing_utils::{Json, StoreErrorResponse};
use crate::{AppState, SharedData, domain, dto, persistence};
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::ErrorResponse;
use axum::routing::{get, put};
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_todos, add_todo, update_todo, delete_todo))]
/// Defines the OpenAPI documentation for the todo API
pub struct TodoApi;
/// Constant used to group todo endpoints in OpenAPI documentation
pub const TODO_API_GROUP: &str = "Todos";

/// Creates a router for the four todo operations under "/todos"
pub fn todo_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route(
            "/",
            get(|State(app_state): AppState| async move {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let todo_service = domain::todo::TodoService {};
                let todo_reader = persistence::db_todo_driven_ports::DbTodoReader;

                get_todos(&mut ext_cxn, &todo_service, &todo_reader).await
            })
            .post(
                |State(app_state): AppState, Json(new_todo): Json<dto::NewTodo>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};
                    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter;

                    add_todo(new_todo, &mut ext_cxn, &todo_service, &todo_writer).await
                },
            ),
        )
        .route(
            "/:todo_id",
            put(
                |State(app_state): AppState,
                 Path(todo_id): Path<i32>,
                 Json(update): Json<dto::UpdateTodo>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};
                    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter;

                    update_todo(todo_id, update, &mut ext_cxn, &todo_service, &todo_writer).await
                },
            )
            .delete(
                |State(app_state): AppState, Path(todo_id): Path<i32>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};
                    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter;

                    delete_todo(todo_id, &mut ext_cxn, &todo_service, &todo_writer).await
                },
            ),
        )
}

#[utoipa::path(
    get,
    path = "/todos",
    tag = TODO_API_GROUP,
    responses(
        (status = 200, description = "Every stored todo", body = Vec<dto::Todo>),
        (status = 500, description = "The todo table could not be read", body = BasicErrorResponse),
    ),
)]
#[tracing::instrument(skip_all)]
/// Retrieves every todo in the system
async fn get_todos(
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
    todo_reader: &impl TodoReader,
) -> Result<Json<Vec<dto::Todo>>, ErrorResponse> {
    info!("Requested todos");
    let todos = todo_service
        .list_todos(&mut *ext_cxn, todo_reader)
        .await
        .map_err(StoreErrorResponse::from)?;

    Ok(Json(todos.into_iter().map(dto::Todo::from).collect()))
}

#[utoipa::path(
    post,
    path = "/todos",
    tag = TODO_API_GROUP,
    request_body = dto::NewTodo,
    responses(
        (status = 201, description = "Todo created", body = dto::InsertedTodo),
        (status = 400, description = "Malformed request body", body = BasicErrorResponse),
        (status = 500, description = "The todo could not be stored", body = BasicErrorResponse),
    ),
)]
#[tracing::instrument(skip_all)]
/// Creates a todo, filling in its id and timestamps
async fn add_todo(
    new_todo: dto::NewTodo,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
    todo_writer: &impl TodoWriter,
) -> Result<(StatusCode, Json<dto::InsertedTodo>), ErrorResponse> {
    info!("Adding todo \"{}\"", new_todo.title);
    let domain_todo = domain::todo::NewTodo::from(new_todo);

    let id = todo_service
        .create_todo(&domain_todo, &mut *ext_cxn, todo_writer)
        .await
        .map_err(StoreErrorResponse::from)?;

    Ok((StatusCode::CREATED, Json(dto::InsertedTodo { id })))
}

#[utoipa::path(
    put,
    path = "/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(("todo_id" = i32, Path, description = "ID of the todo to replace")),
    request_body = dto::UpdateTodo,
    responses(
        (status = 200, description = "Todo replaced, or no todo had the ID"),
        (status = 400, description = "Malformed request body", body = BasicErrorResponse),
        (status = 500, description = "The todo could not be updated", body = BasicErrorResponse),
    ),
)]
#[tracing::instrument(skip(update, ext_cxn, todo_service, todo_writer))]
/// Replaces every mutable field of a todo
async fn update_todo(
    todo_id: i32,
    update: dto::UpdateTodo,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
    todo_writer: &impl TodoWriter,
) -> Result<StatusCode, ErrorResponse> {
    info!("Updating todo {todo_id}");
    let domain_update = domain::todo::UpdateTodo::from(update);

    todo_service
        .update_todo(todo_id, &domain_update, &mut *ext_cxn, todo_writer)
        .await
        .map_err(StoreErrorResponse::from)?;

    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(("todo_id" = i32, Path, description = "ID of the todo to delete")),
    responses(
        (status = 200, description = "Todo removed, or no todo had the ID", body = dto::DeletedTodo),
        (status = 500, description = "The todo could not be deleted", body = BasicErrorResponse),
    ),
)]
#[tracing::instrument(skip(ext_cxn, todo_service, todo_writer))]
/// Deletes a todo
async fn delete_todo(
    todo_id: i32,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
    todo_writer: &impl TodoWriter,
) -> Result<Json<dto::DeletedTodo>, ErrorResponse> {
    info!("Deleting todo {todo_id}");
    let id = todo_service
        .delete_todo(todo_id, &mut *ext_cxn, todo_writer)
        .await
        .map_err(StoreErrorResponse::from)?;

    Ok(Json(dto::DeletedTodo { id }))
}
