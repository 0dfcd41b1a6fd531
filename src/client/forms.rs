use super::rpc::{RpcError, TodoRpc};
use super::Notification;
use crate::domain::todo::TodoStatus;
use crate::dto;
use tracing::error;
use validator::Validate;

const ADD_SUCCEEDED: &str = "Todo added successfully";
const ADD_FAILED: &str = "Failed to add todo";
const UPDATE_SUCCEEDED: &str = "Todo updated successfully";
const UPDATE_FAILED: &str = "Failed to update todo";
const DRAFT_INCOMPLETE: &str = "A todo needs a title and a description";

/// What a form wants done when the user submits it
#[derive(Debug, PartialEq, Eq)]
pub enum Submission<Request> {
    /// The request should be sent; the form now counts as in flight
    Send(Request),
    /// The draft can't be sent as is
    Rejected(Notification),
    /// A request from this form is already in flight, so the submit is ignored
    InFlight,
}

/// What the user has typed into the create form so far
#[derive(Debug, Default, Clone, PartialEq, Eq, Validate)]
pub struct TodoDraft {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[validate(length(min = 1, max = 256))]
    pub description: String,
    pub due_date: String,
    pub status: TodoStatus,
}

fn optional_due_date(due_date: &str) -> Option<String> {
    (!due_date.is_empty()).then(|| due_date.to_owned())
}

#[derive(Debug, Default)]
pub struct CreateForm {
    pub draft: TodoDraft,
    submitting: bool,
}

impl CreateForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the submit control should be disabled
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validates the draft and, if it's complete, marks the form as in flight
    pub fn start_submit(&mut self) -> Submission<dto::NewTodo> {
        if self.submitting {
            return Submission::InFlight;
        }
        if self.draft.validate().is_err() {
            return Submission::Rejected(Notification::failure(DRAFT_INCOMPLETE));
        }

        self.submitting = true;
        Submission::Send(dto::NewTodo {
            title: self.draft.title.clone(),
            description: self.draft.description.clone(),
            due_date: optional_due_date(&self.draft.due_date),
            status: Some(self.draft.status),
        })
    }

    /// Records how the create call went. A successful create clears the draft; a failed
    /// one leaves it for the user to resubmit.
    pub fn finish_submit(&mut self, outcome: &Result<dto::InsertedTodo, RpcError>) -> Notification {
        self.submitting = false;
        match outcome {
            Ok(_) => {
                self.draft = TodoDraft::default();
                Notification::success(ADD_SUCCEEDED)
            }
            Err(err) => {
                error!("Error adding todo: {err}");
                Notification::failure(ADD_FAILED)
            }
        }
    }

    /// Runs a whole submission against [rpc]. Returns nothing if the submit was ignored.
    pub async fn submit(&mut self, rpc: &impl TodoRpc) -> Option<Notification> {
        match self.start_submit() {
            Submission::Send(new_todo) => {
                let outcome = rpc.add_todo(&new_todo).await;
                Some(self.finish_submit(&outcome))
            }
            Submission::Rejected(notification) => Some(notification),
            Submission::InFlight => None,
        }
    }
}

/// The editable copy of a todo inside the edit form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub completed: bool,
    pub status: TodoStatus,
}

/// Edits exactly one todo. Submitting always sends every field, edited or not.
#[derive(Debug)]
pub struct EditForm {
    todo_id: i32,
    pub draft: EditDraft,
    submitting: bool,
}

impl EditForm {
    /// Opens the form seeded with [todo]'s current values
    pub fn open(todo: &dto::Todo) -> Self {
        EditForm {
            todo_id: todo.id,
            draft: EditDraft {
                title: todo.title.clone(),
                description: todo.description.clone(),
                due_date: todo.due_date.clone().unwrap_or_default(),
                completed: todo.completed,
                status: todo.status,
            },
            submitting: false,
        }
    }

    pub fn todo_id(&self) -> i32 {
        self.todo_id
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn start_submit(&mut self) -> Submission<dto::UpdateTodo> {
        if self.submitting {
            return Submission::InFlight;
        }

        self.submitting = true;
        Submission::Send(dto::UpdateTodo {
            title: self.draft.title.clone(),
            description: self.draft.description.clone(),
            due_date: optional_due_date(&self.draft.due_date),
            completed: self.draft.completed,
            status: Some(self.draft.status),
        })
    }

    pub fn finish_submit(&mut self, outcome: &Result<(), RpcError>) -> Notification {
        self.submitting = false;
        match outcome {
            Ok(()) => Notification::success(UPDATE_SUCCEEDED),
            Err(err) => {
                error!("Error updating todo {}: {err}", self.todo_id);
                Notification::failure(UPDATE_FAILED)
            }
        }
    }
}
