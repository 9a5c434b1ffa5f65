//! Appliance time and locale configuration facts module.
//!
//! Read-only: reports the appliance's date, time, locale, and NTP settings
//! under the `appliance_time_and_locale_configuration` fact. Never mutates,
//! so `changed` is always false.

use super::{
    appliance_client, Module, ModuleContext, ModuleOutput, ModuleParams, ModuleResult, ParamExt,
};
use serde_json::Value;
use tracing::debug;

/// Fact key the gathered configuration is reported under
pub const FACT_KEY: &str = "appliance_time_and_locale_configuration";

/// Module for gathering appliance time and locale configuration facts
pub struct ApplianceTimeAndLocaleConfigurationFactsModule;

impl Module for ApplianceTimeAndLocaleConfigurationFactsModule {
    fn name(&self) -> &'static str {
        "appliance_time_and_locale_configuration_facts"
    }

    fn description(&self) -> &'static str {
        "Gather facts about the appliance time and locale configuration"
    }

    fn execute(
        &self,
        params: &ModuleParams,
        context: &ModuleContext,
    ) -> ModuleResult<ModuleOutput> {
        let client = appliance_client(params, context)?;
        let resource = client.appliance_time_and_locale_configuration();

        let found = match params.get_string("name")? {
            Some(name) => {
                debug!(name, "looking up time and locale configuration by name");
                resource.get_by("name", &name)?
            }
            None => resource.get_all()?,
        };

        Ok(
            ModuleOutput::ok("Gathered appliance time and locale configuration.")
                .with_fact(FACT_KEY, Value::Array(found)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::FakeAppliance;
    use mockall::predicate;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[test]
    fn test_gathers_configuration_without_name_filter() {
        let configuration = json!({
            "locale": "en_US.UTF-8",
            "localeDisplayName": "English (United States)"
        });
        let expected = configuration.clone();

        let mut appliance = FakeAppliance::default();
        appliance
            .time_and_locale
            .expect_get_all()
            .times(1)
            .returning(move || Ok(vec![configuration.clone()]));

        let module = ApplianceTimeAndLocaleConfigurationFactsModule;
        let mut params: ModuleParams = HashMap::new();
        params.insert("config".to_string(), json!("config.json"));
        params.insert("name".to_string(), Value::Null);
        let context = ModuleContext::default().with_client(Arc::new(appliance));

        let result = module.execute(&params, &context).unwrap();

        assert!(!result.changed);
        assert_eq!(result.ansible_facts[FACT_KEY], json!([expected]));
    }

    #[test]
    fn test_filters_by_name_when_given() {
        let mut appliance = FakeAppliance::default();
        appliance
            .time_and_locale
            .expect_get_by()
            .with(predicate::eq("name"), predicate::eq("default"))
            .times(1)
            .returning(|_, _| Ok(vec![json!({"name": "default"})]));

        let module = ApplianceTimeAndLocaleConfigurationFactsModule;
        let mut params: ModuleParams = HashMap::new();
        params.insert("config".to_string(), json!("config.json"));
        params.insert("name".to_string(), json!("default"));
        let context = ModuleContext::default().with_client(Arc::new(appliance));

        let result = module.execute(&params, &context).unwrap();

        assert!(!result.changed);
        assert_eq!(result.ansible_facts[FACT_KEY], json!([{"name": "default"}]));
    }

    #[test]
    fn test_client_errors_propagate() {
        let mut appliance = FakeAppliance::default();
        appliance.time_and_locale.expect_get_all().returning(|| {
            Err(crate::client::ClientError::Api {
                status: 500,
                message: "internal error".to_string(),
            })
        });

        let module = ApplianceTimeAndLocaleConfigurationFactsModule;
        let mut params: ModuleParams = HashMap::new();
        params.insert("config".to_string(), json!("config.json"));
        let context = ModuleContext::default().with_client(Arc::new(appliance));

        let err = module.execute(&params, &context).unwrap_err();
        assert!(matches!(err, crate::modules::ModuleError::Client(_)));
    }
}
