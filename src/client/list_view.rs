use super::Notification;
use super::forms::{CreateForm, EditForm, Submission};
use super::rpc::TodoRpc;
use crate::dto;
use tracing::{error, warn};

const DELETE_SUCCEEDED: &str = "Todo deleted successfully";
const DELETE_FAILED: &str = "Failed to delete todo";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loaded,
    Failed,
}

/// Returns the todos whose title contains [search_term], ignoring case. An empty term
/// matches everything.
pub fn filter_by_title<'todos>(todos: &'todos [dto::Todo], search_term: &str) -> Vec<&'todos dto::Todo> {
    let needle = search_term.to_lowercase();
    todos
        .iter()
        .filter(|todo| todo.title.to_lowercase().contains(&needle))
        .collect()
}

/// The list of todos as last fetched from the server, plus the one todo being edited, if any
#[derive(Debug)]
pub struct TodoListView {
    todos: Vec<dto::Todo>,
    load_state: LoadState,
    pub search_term: String,
    editing: Option<EditForm>,
}

impl Default for TodoListView {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoListView {
    pub fn new() -> Self {
        TodoListView {
            todos: Vec::new(),
            load_state: LoadState::NotLoaded,
            search_term: String::new(),
            editing: None,
        }
    }

    /// Replaces the held list with a fresh copy from the server. A failed fetch drops the
    /// held list and leaves the view in [LoadState::Failed] until the next refresh.
    pub async fn refresh(&mut self, rpc: &impl TodoRpc) {
        match rpc.get_todos().await {
            Ok(todos) => {
                self.todos = todos;
                self.load_state = LoadState::Loaded;
            }
            Err(err) => {
                error!("Error fetching todos: {err}");
                self.todos.clear();
                self.load_state = LoadState::Failed;
            }
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// Todos matching the current search term
    pub fn visible_todos(&self) -> Vec<&dto::Todo> {
        filter_by_title(&self.todos, &self.search_term)
    }

    /// Number of fetched todos, filtered or not
    pub fn total(&self) -> usize {
        self.todos.len()
    }

    /// The placeholder to show instead of rows, if there are no rows to show. A search
    /// term matching nothing counts as having no rows.
    pub fn status_message(&self) -> Option<&'static str> {
        match self.load_state {
            LoadState::NotLoaded => Some("Loading..."),
            LoadState::Failed => Some("Failed to load todos."),
            LoadState::Loaded if self.visible_todos().is_empty() => Some("No todos available"),
            LoadState::Loaded => None,
        }
    }

    pub async fn delete(&mut self, todo_id: i32, rpc: &impl TodoRpc) -> Notification {
        if let Err(err) = rpc.delete_todo(todo_id).await {
            error!("Error deleting todo {todo_id}: {err}");
            return Notification::failure(DELETE_FAILED);
        }

        if self.editor().is_some_and(|editor| editor.todo_id() == todo_id) {
            self.editing = None;
        }
        self.refresh(rpc).await;
        Notification::success(DELETE_SUCCEEDED)
    }

    /// Opens the edit form on the fetched todo with [todo_id], replacing any form already
    /// open. Returns false if no such todo was fetched.
    pub fn open_editor(&mut self, todo_id: i32) -> bool {
        match self.todos.iter().find(|todo| todo.id == todo_id) {
            Some(todo) => {
                self.editing = Some(EditForm::open(todo));
                true
            }
            None => {
                warn!("Tried to edit todo {todo_id}, which isn't in the list");
                false
            }
        }
    }

    pub fn close_editor(&mut self) {
        self.editing = None;
    }

    pub fn editor(&self) -> Option<&EditForm> {
        self.editing.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut EditForm> {
        self.editing.as_mut()
    }

    /// Submits the open edit form. On success the form closes and the list is re-fetched;
    /// on failure the form stays open with the user's edits. Returns nothing when no form is
    /// open or its submit is already in flight.
    pub async fn submit_edit(&mut self, rpc: &impl TodoRpc) -> Option<Notification> {
        let editor = self.editing.as_mut()?;
        let Submission::Send(update) = editor.start_submit() else {
            return None;
        };

        let outcome = rpc.update_todo(editor.todo_id(), &update).await;
        let notification = editor.finish_submit(&outcome);
        if outcome.is_ok() {
            self.editing = None;
            self.refresh(rpc).await;
        }

        Some(notification)
    }
}

/// The whole todo page: the create form above the list
#[derive(Debug, Default)]
pub struct TodoPage {
    pub list: TodoListView,
    pub create_form: CreateForm,
}

impl TodoPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// First fetch when the page is shown
    pub async fn load(&mut self, rpc: &impl TodoRpc) {
        self.list.refresh(rpc).await;
    }

    pub async fn submit_new_todo(&mut self, rpc: &impl TodoRpc) -> Option<Notification> {
        let notification = self.create_form.submit(rpc).await?;
        if notification.is_success() {
            self.list.refresh(rpc).await;
        }

        Some(notification)
    }
}
