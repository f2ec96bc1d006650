//! The boundary between contract tests and the system under test.

use crate::request::ApiRequest;
use crate::response::ApiResponse;

/// Executes requests against the API under test.
///
/// Implemented for every `Fn(&ApiRequest) -> anyhow::Result<ApiResponse>`,
/// so an in-process router, an HTTP client wrapper, or a canned-response
/// stub can all be passed directly.
pub trait Transport {
    /// Send `request` and return the complete response.
    fn send(&self, request: &ApiRequest) -> anyhow::Result<ApiResponse>;
}

impl<F> Transport for F
where
    F: Fn(&ApiRequest) -> anyhow::Result<ApiResponse>,
{
    fn send(&self, request: &ApiRequest) -> anyhow::Result<ApiResponse> {
        self(request)
    }
}
