//! Firmware driver module.
//!
//! Ensures a firmware bundle is present on or absent from the appliance.
//! Existence is decided by an exact-match name lookup; names are unique on
//! the appliance, so the first match wins.

use super::{
    appliance_client, Module, ModuleContext, ModuleError, ModuleOutput, ModuleParams, ModuleResult,
    ParamExt,
};
use serde_json::Value;
use tracing::debug;

pub const MSG_CREATED: &str = "Firmware driver created successfully.";
pub const MSG_ALREADY_PRESENT: &str = "Firmware driver is already present.";
pub const MSG_DELETED: &str = "Firmware driver deleted successfully.";
pub const MSG_ALREADY_ABSENT: &str = "Firmware driver is already absent.";

/// Fact key the present firmware driver is reported under
pub const FACT_KEY: &str = "firmware_driver";

/// Desired state of the firmware driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Present,
    Absent,
}

impl State {
    fn from_str(s: &str) -> ModuleResult<Self> {
        match s {
            "present" => Ok(State::Present),
            "absent" => Ok(State::Absent),
            other => Err(ModuleError::InvalidParameter(format!(
                "state must be 'present' or 'absent', got '{}'",
                other
            ))),
        }
    }
}

/// Module for managing firmware bundles on the appliance
pub struct FirmwareDriverModule;

impl FirmwareDriverModule {
    /// The lookup name: the `name` parameter, or the `name` attribute of
    /// `data` when only desired attributes were given.
    fn resolve_name(params: &ModuleParams) -> ModuleResult<String> {
        if let Some(name) = params.get_string("name")? {
            return Ok(name);
        }
        params
            .get_object("data")?
            .as_ref()
            .and_then(|d| d.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ModuleError::MissingParameter("name".to_string()))
    }
}

impl Module for FirmwareDriverModule {
    fn name(&self) -> &'static str {
        "firmware_driver"
    }

    fn description(&self) -> &'static str {
        "Ensure a firmware driver is present on or absent from the appliance"
    }

    fn required_params(&self) -> &[&'static str] {
        &["state"]
    }

    fn execute(
        &self,
        params: &ModuleParams,
        context: &ModuleContext,
    ) -> ModuleResult<ModuleOutput> {
        let state = State::from_str(&params.get_string_required("state")?)?;
        let name = Self::resolve_name(params)?;

        let client = appliance_client(params, context)?;
        let resource = client.firmware_drivers();

        let mut found = resource.get_by("name", &name)?;
        let existing = found.drain(..).next();

        match (state, existing) {
            (State::Absent, Some(existing)) => {
                debug!(name, "deleting firmware driver");
                resource.delete(&existing)?;
                Ok(ModuleOutput::changed(MSG_DELETED))
            }
            (State::Absent, None) => Ok(ModuleOutput::ok(MSG_ALREADY_ABSENT)),
            (State::Present, Some(existing)) => {
                Ok(ModuleOutput::ok(MSG_ALREADY_PRESENT).with_fact(FACT_KEY, existing))
            }
            (State::Present, None) => {
                let data = params.get_object_required("data")?;
                debug!(name, "creating firmware driver");
                let created = resource.create(&data)?;
                Ok(ModuleOutput::changed(MSG_CREATED).with_fact(FACT_KEY, created))
            }
        }
    }
}
