//! Firmware driver facts module.
//!
//! Read-only sibling of [`firmware_driver`](super::firmware_driver):
//! reports the firmware bundles known to the appliance under the
//! `firmware_drivers` fact, optionally narrowed to a single name.

use super::{
    appliance_client, Module, ModuleContext, ModuleOutput, ModuleParams, ModuleResult, ParamExt,
};
use serde_json::Value;
use tracing::debug;

/// Fact key the gathered firmware drivers are reported under
pub const FACT_KEY: &str = "firmware_drivers";

/// Module for gathering firmware driver facts
pub struct FirmwareDriverFactsModule;

impl Module for FirmwareDriverFactsModule {
    fn name(&self) -> &'static str {
        "firmware_driver_facts"
    }

    fn description(&self) -> &'static str {
        "Gather facts about the firmware drivers known to the appliance"
    }

    fn execute(
        &self,
        params: &ModuleParams,
        context: &ModuleContext,
    ) -> ModuleResult<ModuleOutput> {
        let client = appliance_client(params, context)?;
        let resource = client.firmware_drivers();

        let found = match params.get_string("name")? {
            Some(name) => {
                debug!(name, "looking up firmware driver by name");
                resource.get_by("name", &name)?
            }
            None => resource.get_all()?,
        };

        Ok(ModuleOutput::ok("Gathered firmware driver facts.")
            .with_fact(FACT_KEY, Value::Array(found)))
    }
}
