//! Event module.
//!
//! Appends events to the appliance event log. Events are append-only: the
//! only supported state is `present`, and an event whose name already
//! exists is left untouched. There is no update or delete side.

use super::{
    appliance_client, Module, ModuleContext, ModuleError, ModuleOutput, ModuleParams, ModuleResult,
    ParamExt,
};
use serde_json::Value;
use tracing::debug;

pub const MSG_CREATED: &str = "Event created successfully.";
pub const MSG_ALREADY_EXISTS: &str = "Event already exists.";

/// Fact key the created or found event is reported under
pub const FACT_KEY: &str = "event";

/// Module for appending events to the appliance event log
pub struct EventModule;

impl Module for EventModule {
    fn name(&self) -> &'static str {
        "event"
    }

    fn description(&self) -> &'static str {
        "Create events in the appliance event log"
    }

    fn required_params(&self) -> &[&'static str] {
        &["data"]
    }

    fn validate_params(&self, params: &ModuleParams) -> ModuleResult<()> {
        // Events cannot be removed once logged.
        if let Some(state) = params.get_string("state")? {
            if state != "present" {
                return Err(ModuleError::InvalidParameter(format!(
                    "events are append-only; state must be 'present', got '{}'",
                    state
                )));
            }
        }
        Ok(())
    }

    fn execute(
        &self,
        params: &ModuleParams,
        context: &ModuleContext,
    ) -> ModuleResult<ModuleOutput> {
        let data = params.get_object_required("data")?;
        let name = data
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ModuleError::InvalidParameter("data must contain a 'name' attribute".to_string())
            })?
            .to_string();

        let client = appliance_client(params, context)?;
        let resource = client.events();

        let mut found = resource.get_by("name", &name)?;
        if let Some(existing) = found.drain(..).next() {
            debug!(name, "event already present");
            return Ok(ModuleOutput::ok(MSG_ALREADY_EXISTS).with_fact(FACT_KEY, existing));
        }

        debug!(name, "creating event");
        let created = resource.create(&data)?;
        Ok(ModuleOutput::changed(MSG_CREATED).with_fact(FACT_KEY, created))
    }
}
