use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Uniform JSON response envelope used by every API route.
///
/// Absent fields are skipped entirely rather than serialized as null, so a
/// list response carries `success`/`count`/`data` and nothing else.
#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Success with a single record.
    pub fn ok(data: T) -> Self {
        Self { success: true, count: None, data: Some(data), message: None, error: None }
    }

    /// Success with a collection and its count.
    pub fn list(data: T, count: usize) -> Self {
        Self { success: true, count: Some(count), data: Some(data), message: None, error: None }
    }

    /// Failure with a human-readable message and an optional underlying error.
    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self { success: false, count: None, data: None, message: Some(message.into()), error }
    }
}
