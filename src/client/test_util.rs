use super::rpc::{RpcError, TodoRpc};
use crate::domain::todo::TodoStatus;
use crate::dto;
use crate::routing_utils::BasicErrorResponse;
use chrono::{DateTime, Utc};
use std::sync::Mutex;

pub fn sample_todo(id: i32, title: &str) -> dto::Todo {
    dto::Todo {
        id,
        title: title.to_owned(),
        description: format!("Description for {title}"),
        created_at: DateTime::<Utc>::UNIX_EPOCH,
        updated_at: DateTime::<Utc>::UNIX_EPOCH,
        due_date: Some("2024-10-14".to_owned()),
        completed: false,
        status: TodoStatus::Pending,
    }
}

/// Stands in for the todo service behind [TodoRpc]. Any call whose method name is listed
/// in `failing` is answered with a 500.
pub struct FakeTodoServer {
    pub todos: Vec<dto::Todo>,
    pub failing: Vec<&'static str>,
    pub get_todos_calls: u32,
    next_id: i32,
}

impl FakeTodoServer {
    pub fn new() -> FakeTodoServer {
        FakeTodoServer {
            todos: Vec::new(),
            failing: Vec::new(),
            get_todos_calls: 0,
            next_id: 1,
        }
    }

    pub fn new_locked() -> Mutex<FakeTodoServer> {
        Mutex::new(Self::new())
    }

    pub fn new_with_todos(todos: Vec<dto::Todo>) -> Mutex<FakeTodoServer> {
        let next_id = todos.iter().map(|todo| todo.id).max().unwrap_or(0) + 1;
        Mutex::new(FakeTodoServer {
            todos,
            next_id,
            ..Self::new()
        })
    }

    fn blow_up_if_failing(&self, method: &str) -> Result<(), RpcError> {
        if !self.failing.contains(&method) {
            return Ok(());
        }

        Err(RpcError::Rejected {
            status: 500,
            error_body: Some(BasicErrorResponse {
                error_code: "internal_error".to_owned(),
                error_description: format!("{method} is configured to fail"),
                extra_info: None,
            }),
        })
    }
}

impl TodoRpc for Mutex<FakeTodoServer> {
    async fn get_todos(&self) -> Result<Vec<dto::Todo>, RpcError> {
        let mut locked_self = self.lock().expect("fake server mutex poisoned");
        locked_self.get_todos_calls += 1;
        locked_self.blow_up_if_failing("get_todos")?;

        Ok(locked_self.todos.clone())
    }

    async fn add_todo(&self, new_todo: &dto::NewTodo) -> Result<dto::InsertedTodo, RpcError> {
        let mut locked_self = self.lock().expect("fake server mutex poisoned");
        locked_self.blow_up_if_failing("add_todo")?;

        let id = locked_self.next_id;
        locked_self.next_id += 1;
        let now = Utc::now();
        locked_self.todos.push(dto::Todo {
            id,
            title: new_todo.title.clone(),
            description: new_todo.description.clone(),
            created_at: now,
            updated_at: now,
            due_date: new_todo.due_date.clone(),
            completed: false,
            status: new_todo.status.unwrap_or_default(),
        });

        Ok(dto::InsertedTodo { id })
    }

    async fn update_todo(&self, todo_id: i32, update: &dto::UpdateTodo) -> Result<(), RpcError> {
        let mut locked_self = self.lock().expect("fake server mutex poisoned");
        locked_self.blow_up_if_failing("update_todo")?;

        if let Some(todo) = locked_self.todos.iter_mut().find(|todo| todo.id == todo_id) {
            todo.title = update.title.clone();
            todo.description = update.description.clone();
            todo.due_date = update.due_date.clone();
            todo.completed = update.completed;
            todo.status = update.status.unwrap_or_default();
            todo.updated_at = Utc::now();
        }

        Ok(())
    }

    async fn delete_todo(&self, todo_id: i32) -> Result<dto::DeletedTodo, RpcError> {
        let mut locked_self = self.lock().expect("fake server mutex poisoned");
        locked_self.blow_up_if_failing("delete_todo")?;

        locked_self.todos.retain(|todo| todo.id != todo_id);
        Ok(dto::DeletedTodo { id: todo_id })
    }
}
