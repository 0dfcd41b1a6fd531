use axum::body::{self, Body};
use serde::de::DeserializeOwned;

/// Reads the whole response body and decodes it as JSON into the requested type.
/// Panics, failing the test, if the body can't be read or doesn't match [T].
pub async fn deserialize_body<T: DeserializeOwned>(response_body: Body) -> T {
    let bytes = body::to_bytes(response_body, usize::MAX)
        .await
        .expect("Could not read data from response body!");

    serde_json::from_slice(&bytes).unwrap_or_else(|err| {
        panic!(
            "Response body did not decode into the expected type! Error: {}, Received body: {:?}",
            err,
            String::from_utf8_lossy(&bytes)
        )
    })
}
