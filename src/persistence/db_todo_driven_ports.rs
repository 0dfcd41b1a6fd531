use crate::domain;
use crate::domain::todo::{Todo, TodoContent};
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::{Context, Error};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, query, query_as};
use tracing::debug;

pub struct DbTodoReader;

#[derive(FromRow)]
struct TodoRow {
    id: i32,
    title: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    due_date: Option<String>,
    completed: bool,
    status: String,
}

impl TryFrom<TodoRow> for Todo {
    type Error = domain::todo::UnknownStatus;

    fn try_from(value: TodoRow) -> Result<Self, Self::Error> {
        Ok(Todo {
            id: value.id,
            title: value.title,
            description: value.description,
            created_at: value.created_at,
            updated_at: value.updated_at,
            due_date: value.due_date,
            completed: value.completed,
            status: value.status.parse()?,
        })
    }
}

impl domain::todo::driven_ports::TodoReader for DbTodoReader {
    async fn all_todos(&self, ext_cxn: &mut impl ExternalConnectivity) -> Result<Vec<Todo>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let rows = query_as::<_, TodoRow>(
            "SELECT t.id, t.title, t.description, t.created_at, t.updated_at, t.due_date, t.completed, t.status \
             FROM todo t ORDER BY t.id",
        )
        .fetch_all(cxn.borrow_connection())
        .await
        .context("trying to fetch all todos")?;

        let todos = rows
            .into_iter()
            .map(Todo::try_from)
            .collect::<Result<Vec<Todo>, _>>()
            .context("reading a todo row")?;

        Ok(todos)
    }
}

pub struct DbTodoWriter;

impl domain::todo::driven_ports::TodoWriter for DbTodoWriter {
    async fn create_todo(
        &self,
        content: &TodoContent,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<i32, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        // created_at and updated_at both default to now(), which is fixed for the statement
        let new_id = query_as::<_, super::NewId>(
            "INSERT INTO todo(title, description, due_date, completed, status) \
             VALUES ($1, $2, $3, $4, $5) RETURNING todo.id",
        )
        .bind(&content.title)
        .bind(&content.description)
        .bind(&content.due_date)
        .bind(content.completed)
        .bind(content.status.as_str())
        .fetch_one(cxn.borrow_connection())
        .await
        .context("trying to insert a new todo into the database")?;

        Ok(new_id.id)
    }

    async fn update_todo(
        &self,
        todo_id: i32,
        content: &TodoContent,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let result = query(
            "UPDATE todo SET title = $1, description = $2, due_date = $3, completed = $4, status = $5, \
             updated_at = now() WHERE id = $6",
        )
        .bind(&content.title)
        .bind(&content.description)
        .bind(&content.due_date)
        .bind(content.completed)
        .bind(content.status.as_str())
        .bind(todo_id)
        .execute(cxn.borrow_connection())
        .await
        .context("trying to update a todo in the database")?;

        if result.rows_affected() == 0 {
            debug!(todo_id, "update matched no todo");
        }

        Ok(())
    }

    async fn delete_todo(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        query("DELETE FROM todo WHERE id = $1")
            .bind(todo_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to remove a todo from the database")?;

        Ok(())
    }
}
