//! # oas-contract — Contract Tests for API Descriptions
//!
//! Drives an API through the operations its description declares and
//! checks each response against the declared contract.
//!
//! ## Flow
//!
//! 1. [`ApiTests`] keeps named [`Document`](oas_core::Document)s. Tests
//!    register operations into them as they describe the API.
//! 2. [`build_request`] turns an operation plus caller-supplied parameters
//!    and body into an [`ApiRequest`].
//! 3. A [`Transport`] executes the request. This crate performs no network
//!    I/O of its own; any closure `Fn(&ApiRequest) -> anyhow::Result<ApiResponse>`
//!    is a transport.
//! 4. [`assert_response`] checks the [`ApiResponse`] against the declared
//!    response: status, required headers, media type, and the JSON body
//!    against its schema via [`JsonValidator`](oas_schema::JsonValidator).
//!
//! [`OperationFixture`] packages steps 1 to 4 for one operation so a test
//! describes it once and exercises it per expected status. When the suite
//! is done, [`ApiTests::write_documents`] publishes the described documents.

pub mod error;
pub mod fixture;
pub mod harness;
mod media;
pub mod request;
pub mod response;
pub mod transport;
mod xml;

pub use error::ContractError;
pub use fixture::OperationFixture;
pub use harness::{ApiCall, ApiTests};
pub use request::{build_request, ApiRequest, RequestContent, RequestParameters};
pub use response::{assert_response, ApiResponse};
pub use transport::Transport;
