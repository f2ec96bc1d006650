//! # Operation Fixtures
//!
//! An [`OperationFixture`] describes one operation into an [`ApiTests`]
//! registry and then exercises it, once per expected status.

use oas_core::{Operation, OperationType};
use serde_json::Value;

use crate::error::ContractError;
use crate::harness::{ApiCall, ApiTests};
use crate::request::RequestParameters;
use crate::transport::Transport;

/// One described operation bound to a registry and a transport.
#[derive(Debug)]
pub struct OperationFixture<'a, T> {
    tests: &'a ApiTests,
    transport: T,
    document_name: String,
    template: String,
    operation_type: OperationType,
}

impl<'a, T: Transport> OperationFixture<'a, T> {
    /// Declare `operation` in the named document and return a fixture that
    /// tests it through `transport`.
    pub fn describe(
        tests: &'a mut ApiTests,
        transport: T,
        document_name: &str,
        template: &str,
        operation_type: OperationType,
        operation: Operation,
    ) -> Result<Self, ContractError> {
        tests.add_operation(document_name, template, operation_type, operation)?;
        Ok(Self {
            tests,
            transport,
            document_name: document_name.to_string(),
            template: template.to_string(),
            operation_type,
        })
    }

    /// Send the operation with no parameters or body.
    pub fn test(&self, expected_status: &str) -> Result<(), ContractError> {
        self.run(self.call(expected_status))
    }

    /// Send the operation with parameter values.
    pub fn test_with_parameters(
        &self,
        expected_status: &str,
        parameters: RequestParameters,
    ) -> Result<(), ContractError> {
        self.run(self.call(expected_status).with_parameters(parameters))
    }

    /// Send the operation with a body.
    pub fn test_with_body(&self, expected_status: &str, body: Value) -> Result<(), ContractError> {
        self.run(self.call(expected_status).with_body(body))
    }

    /// Send the operation with parameter values and a body.
    pub fn test_with(
        &self,
        expected_status: &str,
        parameters: RequestParameters,
        body: Value,
    ) -> Result<(), ContractError> {
        self.run(
            self.call(expected_status)
                .with_parameters(parameters)
                .with_body(body),
        )
    }

    fn call(&self, expected_status: &str) -> ApiCall {
        ApiCall::new(self.template.as_str(), self.operation_type, expected_status)
    }

    fn run(&self, call: ApiCall) -> Result<(), ContractError> {
        self.tests.test(&self.document_name, &call, &self.transport)
    }
}
