//! CLI for the OneView module runner.
//!
//! Parses arguments, loads module parameters from an inline JSON string or
//! a file, and renders module results for humans or scripts.

use crate::modules::{ModuleOutput, ModuleParams, ModuleStatus};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

/// OneView Modules - idempotent appliance automation
#[derive(Parser, Debug, Clone)]
#[command(name = "oneview-modules")]
#[command(version)]
#[command(about = "Idempotent automation modules for HPE OneView appliances", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run a module once and print its result
    Run(RunArgs),
    /// List the available modules
    List,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Name of the module to run (see `list`)
    pub module: String,

    /// Module parameters as an inline JSON object
    #[arg(short = 'p', long, conflicts_with = "params_file")]
    pub params: Option<String>,

    /// Path to a JSON file with module parameters
    #[arg(long)]
    pub params_file: Option<PathBuf>,

    /// Path to the appliance connection config; shorthand for the
    /// `config` parameter
    #[arg(short = 'c', long, env = "ONEVIEW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "human")]
    pub output: OutputFormat,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

impl RunArgs {
    /// Assemble the module parameter mapping from the CLI surface.
    pub fn module_params(&self) -> Result<ModuleParams> {
        let raw = match (&self.params, &self.params_file) {
            (Some(inline), _) => inline.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read params file {}", path.display()))?,
            (None, None) => "{}".to_string(),
        };

        let mut params: ModuleParams =
            serde_json::from_str(&raw).context("Module parameters must be a JSON object")?;

        if let Some(config) = &self.config {
            params
                .entry("config".to_string())
                .or_insert_with(|| serde_json::json!(config.display().to_string()));
        }
        Ok(params)
    }
}

/// Render a module result in the requested format.
pub fn render_result(module: &str, output: &ModuleOutput, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(output)?),
        OutputFormat::Human => {
            let status = match output.status {
                ModuleStatus::Changed => "changed".yellow().bold(),
                ModuleStatus::Ok => "ok".green().bold(),
                ModuleStatus::Failed => "failed".red().bold(),
            };
            let mut rendered = format!("{} [{}]: {}", module, status, output.msg);
            if !output.ansible_facts.is_empty() {
                rendered.push('\n');
                rendered.push_str(&serde_json::to_string_pretty(&output.ansible_facts)?);
            }
            Ok(rendered)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_inline_params_take_precedence_over_default() {
        let args = RunArgs {
            module: "event".to_string(),
            params: Some(r#"{"state": "present"}"#.to_string()),
            params_file: None,
            config: Some(PathBuf::from("config.json")),
            output: OutputFormat::Json,
        };

        let params = args.module_params().unwrap();
        assert_eq!(params["state"], serde_json::json!("present"));
        assert_eq!(params["config"], serde_json::json!("config.json"));
    }

    #[test]
    fn test_explicit_config_param_wins_over_flag() {
        let args = RunArgs {
            module: "event".to_string(),
            params: Some(r#"{"config": "inline.json"}"#.to_string()),
            params_file: None,
            config: Some(PathBuf::from("flag.json")),
            output: OutputFormat::Json,
        };

        let params = args.module_params().unwrap();
        assert_eq!(params["config"], serde_json::json!("inline.json"));
    }

    #[test]
    fn test_rejects_non_object_params() {
        let args = RunArgs {
            module: "event".to_string(),
            params: Some("[1, 2, 3]".to_string()),
            params_file: None,
            config: None,
            output: OutputFormat::Json,
        };

        assert!(args.module_params().is_err());
    }

    #[test]
    fn test_render_json_result() {
        let output = crate::modules::ModuleOutput::ok("No changes needed");
        let rendered = render_result("event", &output, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["changed"], serde_json::json!(false));
    }
}
