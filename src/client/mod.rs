//! Resource client seam for the OneView appliance.
//!
//! All remote state operations go through [`ResourceClient`], one instance
//! per resource category, bundled behind [`ApplianceClient`]. Module logic
//! depends only on these traits; the REST implementation lives in
//! [`rest`] and tests substitute mocks.

pub mod rest;

pub use rest::RestApplianceClient;

use serde_json::Value;
use thiserror::Error;

/// Errors raised by appliance clients
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Appliance returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Remote CRUD operations for a single resource category.
///
/// Resources are opaque JSON objects; no invariants are enforced on this
/// side of the seam. Existence checks go through [`get_by`], which returns
/// every resource whose `field` equals `value` (names are unique
/// externally, so callers take the first match).
///
/// [`get_by`]: ResourceClient::get_by
#[cfg_attr(test, mockall::automock)]
pub trait ResourceClient: Send + Sync {
    /// Retrieve every resource in the category.
    fn get_all(&self) -> ClientResult<Vec<Value>>;

    /// Retrieve resources whose `field` attribute equals `value`.
    fn get_by(&self, field: &str, value: &str) -> ClientResult<Vec<Value>>;

    /// Create a resource from the given attributes, returning the created
    /// resource as the appliance reports it.
    fn create(&self, data: &Value) -> ClientResult<Value>;

    /// Update an existing resource in place, returning the updated resource.
    fn update(&self, data: &Value) -> ClientResult<Value>;

    /// Delete an existing resource.
    fn delete(&self, resource: &Value) -> ClientResult<()>;
}

/// One resource client per OneView resource category consumed by the
/// built-in modules.
pub trait ApplianceClient: Send + Sync {
    /// Appliance event log (append-only).
    fn events(&self) -> &dyn ResourceClient;

    /// Firmware bundles known to the appliance.
    fn firmware_drivers(&self) -> &dyn ResourceClient;

    /// Appliance time and locale configuration.
    fn appliance_time_and_locale_configuration(&self) -> &dyn ResourceClient;
}

#[cfg(test)]
pub(crate) mod test_support {
    //! In-crate test double: an appliance whose resource clients are
    //! mockall mocks, with expectations set per test.

    use super::{ApplianceClient, MockResourceClient, ResourceClient};

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
}
