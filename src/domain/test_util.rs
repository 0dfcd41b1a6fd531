use anyhow::anyhow;

/// Connectivity represents the "connected" state of a mocked port and provides
/// common behavior for returning an error if the port is configured to be in a disconnected state.
pub enum Connectivity {
    Connected,
    Disconnected,
}

impl Connectivity {
    /// Return an error if connectivity is in a "disconnected" state
    pub fn blow_up_if_disconnected(&self) -> Result<(), anyhow::Error> {
        match self {
            Self::Connected => Ok(()),
            Self::Disconnected => Err(anyhow!("could not connect to service!")),
        }
    }
}

/// FakeImplementation stands in for one method of a mocked trait. It records the arguments
/// of every call and hands back a preconfigured return value, which keeps mocks of
/// async trait methods simple.
///
/// * [Args] is what gets captured on each call, typically a tuple of owned arguments
/// * [Ret] is the method's return type
///
/// Mocks hold one of these per method and live behind a [std::sync::Mutex] so they can
/// be mutated through the `&self` receiver:
///
/// ```ignore
/// impl TodoPort for Mutex<MockTodoService> {
///     async fn delete_todo(&self, todo_id: i32, ...) -> Result<i32, StoreError> {
///         let mut locked_self = self.lock().expect("mock mutex poisoned");
///         locked_self.delete_todo_result.save_arguments(todo_id);
///         locked_self.delete_todo_result.return_value_result()
///     }
/// }
/// ```
pub struct FakeImplementation<Args, Ret> {
    saved_arguments: Vec<Args>,
    return_value: Option<Ret>,
}

impl<Args, Ret> FakeImplementation<Args, Ret> {
    pub fn new() -> FakeImplementation<Args, Ret> {
        FakeImplementation {
            saved_arguments: Vec::new(),
            return_value: None,
        }
    }

    /// Saves arguments from a single invocation of the FakeImplementation
    pub fn save_arguments(&mut self, arguments: Args) {
        self.saved_arguments.push(arguments)
    }

    /// Returns the list of arguments passed on every call to this FakeImplementation
    pub fn calls(&self) -> &[Args] {
        self.saved_arguments.as_slice()
    }
}

impl<Args, Success, Fail> FakeImplementation<Args, Result<Success, Fail>>
where
    Success: Clone,
    Fail: Clone,
{
    /// Set the result that should be returned when this FakeImplementation is invoked
    pub fn set_returned_result(&mut self, return_value: Result<Success, Fail>) {
        self.return_value = Some(return_value);
    }

    /// Retrieve the configured result, cloning whichever side was set
    pub fn return_value_result(&self) -> Result<Success, Fail> {
        match self.return_value {
            Some(Ok(ref ok_result)) => Ok(ok_result.clone()),
            Some(Err(ref err)) => Err(err.clone()),
            None => panic!("Tried to return from a function where the return value wasn't set!"),
        }
    }
}
