use serde::Deserialize;

use crate::error::ApiError;

/// `?offset=N` on collection routes
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub offset: Option<String>,
}

impl PageQuery {
    pub fn offset(&self) -> Result<usize, ApiError> {
        match self.offset.as_deref() {
            None | Some("") => Ok(0),
            Some(raw) => raw.parse::<usize>().map_err(|_| {
                ApiError::bad_request(format!("Invalid offset '{}': expected a non-negative integer", raw))
            }),
        }
    }
}
