//! # OneView Modules - Idempotent appliance automation in Rust
//!
//! This crate provides Ansible-style automation modules for HPE OneView
//! appliances. Each module reads declarative parameters, talks to the
//! appliance through a narrow resource-client seam, compares observed state
//! against desired state, and reports a fixed-shape result
//! (`changed`, `msg`, `ansible_facts`).
//!
//! ## Core Concepts
//!
//! - **Modules**: Units of work keyed by name (`event`, `firmware_driver`,
//!   facts modules) implementing the [`modules::Module`] trait
//! - **Resource clients**: The [`client::ResourceClient`] seam
//!   (`get_all`, `get_by`, `create`, `update`, `delete`) behind which all
//!   remote I/O lives; tests substitute mocks here
//! - **Appliance client**: One resource client per OneView resource
//!   category, bundled behind [`client::ApplianceClient`]
//! - **Facts**: Read-only observations returned under `ansible_facts`;
//!   facts modules never mutate and always report `changed: false`
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                   CLI Interface                      │
//! │             (clap-based command parsing)             │
//! └─────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                  Module Registry                     │
//! │      (facts / event / firmware_driver modules)       │
//! └─────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────┐
//! │               ApplianceClient seam                   │
//! │   (ResourceClient per category, mocked in tests)     │
//! └─────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────┐
//! │              OneView REST API (HTTPS)                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use oneview_modules::modules::{ModuleContext, ModuleRegistry};
//! use std::collections::HashMap;
//!
//! let registry = ModuleRegistry::with_builtins();
//! let mut params = HashMap::new();
//! params.insert("config".to_string(), serde_json::json!("config.json"));
//! params.insert("state".to_string(), serde_json::json!("absent"));
//! params.insert("name".to_string(), serde_json::json!("Service Pack for ProLiant.iso"));
//!
//! let result = registry.execute("firmware_driver", &params, &ModuleContext::default())?;
//! println!("changed={} msg={}", result.changed, result.msg);
//! # Ok::<(), oneview_modules::modules::ModuleError>(())
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod modules;

/// Commonly used types, importable as a single unit.
pub mod prelude {
    pub use crate::client::{ApplianceClient, ClientError, ClientResult, ResourceClient};
    pub use crate::config::OneViewConfig;
    pub use crate::modules::{
        Module, ModuleContext, ModuleError, ModuleOutput, ModuleParams, ModuleRegistry,
        ModuleResult, ModuleStatus, ParamExt,
    };
}
