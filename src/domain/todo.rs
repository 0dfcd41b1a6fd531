use crate::domain::todo::driven_ports::{TodoReader, TodoWriter};
use crate::domain::{StoreAction, StoreError};
use crate::external_connections::ExternalConnectivity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// Lifecycle label of a todo. Independent of whether the todo is marked completed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoStatus {
    #[default]
    Pending,
    InProgress,
    OnHold,
    Cancelled,
    Review,
}

impl TodoStatus {
    pub const ALL: [TodoStatus; 5] = [
        Self::Pending,
        Self::InProgress,
        Self::OnHold,
        Self::Cancelled,
        Self::Review,
    ];

    /// The label as it's stored and sent over the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::OnHold => "ON_HOLD",
            Self::Cancelled => "CANCELLED",
            Self::Review => "REVIEW",
        }
    }
}

impl Display for TodoStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("\"{0}\" is not a todo status")]
pub struct UnknownStatus(pub String);

impl FromStr for TodoStatus {
    type Err = UnknownStatus;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == label)
            .ok_or_else(|| UnknownStatus(label.to_owned()))
    }
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub due_date: Option<String>,
    pub completed: bool,
    pub status: TodoStatus,
}

#[derive(Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub due_date: Option<String>,
    pub status: Option<TodoStatus>,
}

/// A full replacement of a todo's mutable fields
#[derive(Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct UpdateTodo {
    pub title: String,
    pub description: String,
    pub due_date: Option<String>,
    pub completed: bool,
    pub status: Option<TodoStatus>,
}

/// The mutable content of a todo once defaults have been filled in. This is what
/// actually gets written on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoContent {
    pub title: String,
    pub description: String,
    pub due_date: Option<String>,
    pub completed: bool,
    pub status: TodoStatus,
}

/// An empty due date means the todo has no due date
fn normalize_due_date(due_date: &Option<String>) -> Option<String> {
    due_date.as_ref().filter(|date| !date.is_empty()).cloned()
}

impl From<&NewTodo> for TodoContent {
    fn from(value: &NewTodo) -> Self {
        TodoContent {
            title: value.title.clone(),
            description: value.description.clone(),
            due_date: normalize_due_date(&value.due_date),
            completed: false,
            status: value.status.unwrap_or_default(),
        }
    }
}

impl From<&UpdateTodo> for TodoContent {
    // A missing status resets the todo to PENDING rather than keeping what was stored
    fn from(value: &UpdateTodo) -> Self {
        TodoContent {
            title: value.title.clone(),
            description: value.description.clone(),
            due_date: normalize_due_date(&value.due_date),
            completed: value.completed,
            status: value.status.unwrap_or_default(),
        }
    }
}

pub mod driven_ports {
    use super::*;

    pub trait TodoReader {
        async fn all_todos(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<Todo>, anyhow::Error>;
    }

    pub trait TodoWriter {
        async fn create_todo(
            &self,
            content: &TodoContent,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<i32, anyhow::Error>;

        async fn update_todo(
            &self,
            todo_id: i32,
            content: &TodoContent,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;

        async fn delete_todo(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;

    pub trait TodoPort {
        async fn list_todos(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl TodoReader,
        ) -> Result<Vec<Todo>, StoreError>;
        async fn create_todo(
            &self,
            new_todo: &NewTodo,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_write: &impl TodoWriter,
        ) -> Result<i32, StoreError>;
        async fn update_todo(
            &self,
            todo_id: i32,
            update: &UpdateTodo,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_write: &impl TodoWriter,
        ) -> Result<(), StoreError>;
        async fn delete_todo(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_write: &impl TodoWriter,
        ) -> Result<i32, StoreError>;
    }
}

pub struct TodoService {}

impl driving_ports::TodoPort for TodoService {
    async fn list_todos(
        &self,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
    ) -> Result<Vec<Todo>, StoreError> {
        todo_read
            .all_todos(&mut *ext_cxn)
            .await
            .map_err(|err| StoreError::trying_to(StoreAction::Fetch, err))
    }

    async fn create_todo(
        &self,
        new_todo: &NewTodo,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_write: &impl TodoWriter,
    ) -> Result<i32, StoreError> {
        let content = TodoContent::from(new_todo);
        todo_write
            .create_todo(&content, &mut *ext_cxn)
            .await
            .map_err(|err| StoreError::trying_to(StoreAction::Add, err))
    }

    async fn update_todo(
        &self,
        todo_id: i32,
        update: &UpdateTodo,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_write: &impl TodoWriter,
    ) -> Result<(), StoreError> {
        let content = TodoContent::from(update);
        todo_write
            .update_todo(todo_id, &content, &mut *ext_cxn)
            .await
            .map_err(|err| StoreError::trying_to(StoreAction::Update, err))
    }

    async fn delete_todo(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_write: &impl TodoWriter,
    ) -> Result<i32, StoreError> {
        todo_write
            .delete_todo(todo_id, &mut *ext_cxn)
            .await
            .map_err(|err| StoreError::trying_to(StoreAction::Delete, err))?;

        Ok(todo_id)
    }
}
