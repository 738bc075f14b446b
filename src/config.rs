//! Invocation configuration, resolved once at startup.
//!
//! Flags take precedence over the environment; the environment is injected
//! as a lookup function so resolution stays testable without touching
//! process state.

use clap::Parser;

use crate::constants::DEFAULT_DATASET;
use crate::error::{BqCostError, Result};
use crate::types::MonthSelector;

pub const PROJECT_ENV: &str = "GCP_PROJECT";
pub const DATASET_ENV: &str = "GCP_BILLING_DATASET";
pub const TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Report monthly GCP billing costs per project.
#[derive(Debug, Parser)]
#[command(name = "bqcost", version)]
pub struct Cli {
    /// The month to query: 'current' or 'last'.
    #[arg(long, value_parser = MonthSelector::parse)]
    pub month: MonthSelector,

    /// The GCP project ID where the billing dataset resides
    /// [env fallback: GCP_PROJECT].
    #[arg(long)]
    pub project: Option<String>,

    /// The BigQuery dataset name for billing data
    /// [env fallback: GCP_BILLING_DATASET; default: billing_export].
    #[arg(long)]
    pub dataset: Option<String>,
}

/// Everything a run needs, fully resolved. Built once in `main` and passed
/// down; nothing below reads the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub project: String,
    pub dataset: String,
    pub month: MonthSelector,
    pub access_token: String,
}

impl Config {
    /// Resolve flags over the supplied environment lookup.
    ///
    /// # Errors
    /// `MissingConfig` when no project id or access token is available from
    /// either source.
    pub fn resolve(cli: Cli, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let project = cli
            .project
            .or_else(|| env(PROJECT_ENV))
            .ok_or(BqCostError::MissingConfig {
                what: "GCP project id",
                hint: "pass --project or set GCP_PROJECT",
            })?;

        let dataset = cli
            .dataset
            .or_else(|| env(DATASET_ENV))
            .unwrap_or_else(|| DEFAULT_DATASET.to_string());

        // Token acquisition is delegated to the ambient gcloud environment:
        // GOOGLE_OAUTH_ACCESS_TOKEN=$(gcloud auth print-access-token)
        let access_token = env(TOKEN_ENV).ok_or(BqCostError::MissingConfig {
            what: "OAuth access token",
            hint: "set GOOGLE_OAUTH_ACCESS_TOKEN, e.g. from `gcloud auth print-access-token`",
        })?;

        Ok(Config {
            project,
            dataset,
            month: cli.month,
            access_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(month: &str, project: Option<&str>, dataset: Option<&str>) -> Cli {
        let mut args = vec!["bqcost".to_string(), "--month".to_string(), month.to_string()];
        if let Some(p) = project {
            args.push("--project".to_string());
            args.push(p.to_string());
        }
        if let Some(d) = dataset {
            args.push("--dataset".to_string());
            args.push(d.to_string());
        }
        Cli::parse_from(args)
    }

    fn env_with(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_flags_take_precedence_over_env() {
        let env = env_with(&[
            ("GCP_PROJECT", "env-proj"),
            ("GCP_BILLING_DATASET", "env-ds"),
            ("GOOGLE_OAUTH_ACCESS_TOKEN", "tok"),
        ]);
        let config =
            Config::resolve(cli("current", Some("flag-proj"), Some("flag-ds")), env).unwrap();

        assert_eq!(config.project, "flag-proj");
        assert_eq!(config.dataset, "flag-ds");
        assert_eq!(config.month, MonthSelector::Current);
        assert_eq!(config.access_token, "tok");
    }

    #[test]
    fn test_env_fallback_and_default_dataset() {
        let env = env_with(&[
            ("GCP_PROJECT", "env-proj"),
            ("GOOGLE_OAUTH_ACCESS_TOKEN", "tok"),
        ]);
        let config = Config::resolve(cli("last", None, None), env).unwrap();

        assert_eq!(config.project, "env-proj");
        assert_eq!(config.dataset, "billing_export");
        assert_eq!(config.month, MonthSelector::Last);
    }

    #[test]
    fn test_missing_project() {
        let env = env_with(&[("GOOGLE_OAUTH_ACCESS_TOKEN", "tok")]);
        let err = Config::resolve(cli("last", None, None), env).unwrap_err();
        assert!(matches!(err, BqCostError::MissingConfig { .. }));
        assert!(err.to_string().contains("GCP_PROJECT"));
    }

    #[test]
    fn test_missing_token() {
        let env = env_with(&[("GCP_PROJECT", "p")]);
        let err = Config::resolve(cli("last", None, None), env).unwrap_err();
        assert!(matches!(err, BqCostError::MissingConfig { .. }));
        assert!(err.to_string().contains("GOOGLE_OAUTH_ACCESS_TOKEN"));
    }

    #[test]
    fn test_cli_rejects_invalid_month() {
        let result = Cli::try_parse_from(["bqcost", "--month", "next"]);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid month 'next'"));
    }
}
