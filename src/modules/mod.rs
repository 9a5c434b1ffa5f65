//! Module system for OneView automation tasks.
//!
//! This module provides the core traits, types, and registry for the
//! module system. Modules are the building blocks that compare desired
//! state against the appliance's observed state and mutate only on
//! mismatch, reporting a fixed-shape result.

pub mod appliance_time_and_locale_configuration_facts;
pub mod event;
pub mod firmware_driver;
pub mod firmware_driver_facts;

use crate::client::{ApplianceClient, ClientError, RestApplianceClient};
use crate::config::{ConfigError, OneViewConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during module execution
#[derive(Error, Debug)]
pub enum ModuleError {
    #[error("Module not found: {0}")]
    NotFound(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Appliance client error: {0}")]
    Client(#[from] ClientError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

/// Result type for module operations
pub type ModuleResult<T> = Result<T, ModuleError>;

/// Status of a module execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleStatus {
    /// Module executed successfully and made changes
    Changed,
    /// Module executed successfully but no changes were needed
    Ok,
    /// Module execution failed
    Failed,
}

impl fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleStatus::Changed => write!(f, "changed"),
            ModuleStatus::Ok => write!(f, "ok"),
            ModuleStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Result of a module execution: the `{changed, msg, ansible_facts}`
/// contract every module honors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleOutput {
    /// Whether the module changed anything
    pub changed: bool,
    /// Human-readable message about what happened
    pub msg: String,
    /// Status of the execution
    pub status: ModuleStatus,
    /// Observed or resulting state, keyed by fact name
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub ansible_facts: HashMap<String, Value>,
}

impl ModuleOutput {
    /// Create a new successful output with no changes
    pub fn ok(msg: impl Into<String>) -> Self {
        Self {
            changed: false,
            msg: msg.into(),
            status: ModuleStatus::Ok,
            ansible_facts: HashMap::new(),
        }
    }

    /// Create a new successful output with changes
    pub fn changed(msg: impl Into<String>) -> Self {
        Self {
            changed: true,
            msg: msg.into(),
            status: ModuleStatus::Changed,
            ansible_facts: HashMap::new(),
        }
    }

    /// Create a failed output
    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            changed: false,
            msg: msg.into(),
            status: ModuleStatus::Failed,
            ansible_facts: HashMap::new(),
        }
    }

    /// Add a fact to the output
    pub fn with_fact(mut self, key: impl Into<String>, value: Value) -> Self {
        self.ansible_facts.insert(key.into(), value);
        self
    }
}

/// Parameters passed to a module
pub type ModuleParams = HashMap<String, Value>;

/// Context for module execution
#[derive(Clone, Default)]
pub struct ModuleContext {
    /// Appliance client to use; when unset, modules open a REST session
    /// from the `config` parameter.
    pub client: Option<Arc<dyn ApplianceClient>>,
}

impl fmt::Debug for ModuleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleContext")
            .field("client", &self.client.as_ref().map(|_| "<appliance>"))
            .finish()
    }
}

impl ModuleContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(mut self, client: Arc<dyn ApplianceClient>) -> Self {
        self.client = Some(client);
        self
    }
}

/// Trait that all modules must implement
pub trait Module: Send + Sync {
    /// Returns the name of the module
    fn name(&self) -> &'static str;

    /// Returns a description of what the module does
    fn description(&self) -> &'static str;

    /// Execute the module with the given parameters
    fn execute(&self, params: &ModuleParams, context: &ModuleContext)
        -> ModuleResult<ModuleOutput>;

    /// Validate the parameters before execution
    fn validate_params(&self, params: &ModuleParams) -> ModuleResult<()> {
        let _ = params;
        Ok(())
    }

    /// Returns the list of required parameters
    fn required_params(&self) -> &[&'static str] {
        &[]
    }
}

/// Resolve the appliance client for one invocation: the injected client
/// when the context carries one, otherwise a fresh REST session built from
/// the `config` parameter.
pub(crate) fn appliance_client(
    params: &ModuleParams,
    context: &ModuleContext,
) -> ModuleResult<Arc<dyn ApplianceClient>> {
    if let Some(client) = &context.client {
        return Ok(Arc::clone(client));
    }
    let path = params.get_string_required("config")?;
    let config = OneViewConfig::from_json_file(&path)?;
    Ok(Arc::new(RestApplianceClient::connect(&config)?))
}

/// Helper trait for extracting parameters
pub trait ParamExt {
    fn get_string(&self, key: &str) -> ModuleResult<Option<String>>;
    fn get_string_required(&self, key: &str) -> ModuleResult<String>;
    fn get_object(&self, key: &str) -> ModuleResult<Option<Value>>;
    fn get_object_required(&self, key: &str) -> ModuleResult<Value>;
}

impl ParamExt for ModuleParams {
    fn get_string(&self, key: &str) -> ModuleResult<Option<String>> {
        match self.get(key) {
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Null) | None => Ok(None),
            Some(v) => Ok(Some(v.to_string().trim_matches('"').to_string())),
        }
    }

    fn get_string_required(&self, key: &str) -> ModuleResult<String> {
        self.get_string(key)?
            .ok_or_else(|| ModuleError::MissingParameter(key.to_string()))
    }

    fn get_object(&self, key: &str) -> ModuleResult<Option<Value>> {
        match self.get(key) {
            Some(v @ Value::Object(_)) => Ok(Some(v.clone())),
            Some(Value::Null) | None => Ok(None),
            Some(_) => Err(ModuleError::InvalidParameter(format!(
                "{} must be an object",
                key
            ))),
        }
    }

    fn get_object_required(&self, key: &str) -> ModuleResult<Value> {
        self.get_object(key)?
            .ok_or_else(|| ModuleError::MissingParameter(key.to_string()))
    }
}

/// Registry for looking up modules by name
pub struct ModuleRegistry {
    modules: HashMap<String, Arc<dyn Module>>,
}

impl ModuleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            modules: HashMap::new(),
        }
    }

    /// Create a registry with all built-in modules
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        // Facts modules
        registry.register(Arc::new(
            appliance_time_and_locale_configuration_facts::ApplianceTimeAndLocaleConfigurationFactsModule,
        ));
        registry.register(Arc::new(firmware_driver_facts::FirmwareDriverFactsModule));

        // State-managing modules
        registry.register(Arc::new(event::EventModule));
        registry.register(Arc::new(firmware_driver::FirmwareDriverModule));
        registry
    }

    /// Register a module
    pub fn register(&mut self, module: Arc<dyn Module>) {
        self.modules.insert(module.name().to_string(), module);
    }

    /// Get a module by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Module>> {
        self.modules.get(name).cloned()
    }

    /// Check if a module exists
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Get all module names
    pub fn names(&self) -> Vec<&str> {
        self.modules.keys().map(|s| s.as_str()).collect()
    }

    /// Execute a module by name
    pub fn execute(
        &self,
        name: &str,
        params: &ModuleParams,
        context: &ModuleContext,
    ) -> ModuleResult<ModuleOutput> {
        let module = self
            .get(name)
            .ok_or_else(|| ModuleError::NotFound(name.to_string()))?;

        module.validate_params(params)?;

        for param in module.required_params() {
            if !params.contains_key(*param) {
                return Err(ModuleError::MissingParameter((*param).to_string()));
            }
        }

        module.execute(params, context)
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestModule;

    impl Module for TestModule {
        fn name(&self) -> &'static str {
            "test"
        }

        fn description(&self) -> &'static str {
            "A test module"
        }

        fn execute(
            &self,
            params: &ModuleParams,
            _context: &ModuleContext,
        ) -> ModuleResult<ModuleOutput> {
            let msg = params
                .get_string("msg")?
                .unwrap_or_else(|| "Hello".to_string());
            Ok(ModuleOutput::changed(msg))
        }

        fn required_params(&self) -> &[&'static str] {
            &["msg"]
        }
    }

    #[test]
    fn test_module_registry() {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(TestModule));

        assert!(registry.contains("test"));
        assert!(!registry.contains("nonexistent"));

        let module = registry.get("test").unwrap();
        assert_eq!(module.name(), "test");
    }

    #[test]
    fn test_registry_enforces_required_params() {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(TestModule));

        let result = registry.execute("test", &HashMap::new(), &ModuleContext::default());
        match result {
            Err(ModuleError::MissingParameter(name)) => assert_eq!(name, "msg"),
            other => panic!("Expected MissingParameter, got {:?}", other.map(|o| o.msg)),
        }
    }

    #[test]
    fn test_registry_unknown_module() {
        let registry = ModuleRegistry::new();
        let result = registry.execute("nope", &HashMap::new(), &ModuleContext::default());
        assert!(matches!(result, Err(ModuleError::NotFound(_))));
    }

    #[test]
    fn test_module_output_facts() {
        let output = ModuleOutput::ok("No changes needed")
            .with_fact("event", serde_json::json!({"name": "e1"}));

        assert!(!output.changed);
        assert_eq!(output.status, ModuleStatus::Ok);
        assert!(output.ansible_facts.contains_key("event"));
    }

    #[test]
    fn test_module_output_serializes_to_fixed_shape() {
        let output = ModuleOutput::changed("Created").with_fact("event", serde_json::json!({}));
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json["changed"], serde_json::json!(true));
        assert_eq!(json["msg"], serde_json::json!("Created"));
        assert_eq!(json["status"], serde_json::json!("changed"));
        assert!(json["ansible_facts"].is_object());
    }

    #[test]
    fn test_param_ext() {
        let mut params: ModuleParams = HashMap::new();
        params.insert("string".to_string(), serde_json::json!("hello"));
        params.insert("null".to_string(), serde_json::Value::Null);
        params.insert("data".to_string(), serde_json::json!({"name": "x"}));

        assert_eq!(
            params.get_string("string").unwrap(),
            Some("hello".to_string())
        );
        assert_eq!(params.get_string("null").unwrap(), None);
        assert_eq!(params.get_string("missing").unwrap(), None);
        assert!(params.get_object("data").unwrap().is_some());
        assert!(matches!(
            params.get_object("string"),
            Err(ModuleError::InvalidParameter(_))
        ));
        assert!(matches!(
            params.get_string_required("missing"),
            Err(ModuleError::MissingParameter(_))
        ));
    }
}
