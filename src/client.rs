//! Browser-side half of the todo app: a typed client for the four todo calls and the
//! state behind the list view, the create form and the edit form. Rendering is left to
//! whatever UI sits on top; views only hand back [Notification]s for it to show.

mod forms;
mod list_view;
mod rpc;

#[cfg(test)]
pub(crate) mod test_util;

pub use forms::{CreateForm, EditDraft, EditForm, Submission, TodoDraft};
pub use list_view::{LoadState, TodoListView, TodoPage, filter_by_title};
pub use rpc::{HttpTodoRpc, RpcError, TodoRpc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure,
}

/// A transient message describing how a user action turned out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Failure,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NotificationKind::Success
    }
}
