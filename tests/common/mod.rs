//! Shared test utilities and fixtures for the integration test suite.
//!
//! This module provides:
//! - A mockall-backed `ResourceClient` mock
//! - A `FakeAppliance` wiring one mock per resource category
//! - Connection-config fixture helpers
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::*;
//! ```

#![allow(dead_code)]

use oneview_modules::client::{ApplianceClient, ClientResult, ResourceClient};
use serde_json::Value;
use std::io::Write;
use tempfile::NamedTempFile;

mockall::mock! {
    pub ResourceClient {}

    impl ResourceClient for ResourceClient {
        fn get_all(&self) -> ClientResult<Vec<Value>>;
        fn get_by(&self, field: &str, value: &str) -> ClientResult<Vec<Value>>;
        fn create(&self, data: &Value) -> ClientResult<Value>;
        fn update(&self, data: &Value) -> ClientResult<Value>;
        fn delete(&self, resource: &Value) -> ClientResult<()>;
    }
}

/// Appliance double whose resource clients are mocks with per-test
/// expectations.
#[derive(Default)]
pub struct FakeAppliance {
    pub events: MockResourceClient,
    pub firmware_drivers: MockResourceClient,
    pub time_and_locale: MockResourceClient,
}

impl ApplianceClient for FakeAppliance {
    fn events(&self) -> &dyn ResourceClient {
        &self.events
    }

    fn firmware_drivers(&self) -> &dyn ResourceClient {
        &self.firmware_drivers
    }

    fn appliance_time_and_locale_configuration(&self) -> &dyn ResourceClient {
        &self.time_and_locale
    }
}

/// Write a connection config fixture and return its handle; the file is
/// removed when the handle drops.
pub fn config_fixture() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create config fixture");
    file.write_all(
        br#"{
            "ip": "172.16.101.48",
            "api_version": 800,
            "credentials": {"userName": "administrator", "password": "secret"}
        }"#,
    )
    .expect("write config fixture");
    file
}
