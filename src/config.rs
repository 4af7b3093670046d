use crate::cli::Cli;
use crate::i18n::Language;
use crate::models::{AssignmentConfig, AssignmentPatch};
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub assignment: AssignmentConfig,
    pub language: Language,
}

impl Config {
    /// Resolve the startup configuration: built-in demo assignment, patched
    /// by environment variables (via .env if present), patched by CLI flags.
    pub fn load(cli: &Cli) -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let now = Utc::now();
        let mut assignment = AssignmentConfig::demo(now);
        assignment.apply(env_patch(now)?);
        assignment.apply(cli_patch(cli, now)?);

        let explicit_language = cli
            .language
            .clone()
            .or_else(|| env_var("ASSIGNMENT_LANGUAGE"));
        let language = resolve_language(explicit_language.as_deref())?;

        Ok(Config {
            assignment,
            language,
        })
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

fn env_patch(now: DateTime<Utc>) -> Result<AssignmentPatch> {
    let mut patch = AssignmentPatch {
        title: env_var("ASSIGNMENT_TITLE"),
        description: env_var("ASSIGNMENT_DESCRIPTION"),
        ..Default::default()
    };

    if let Some(due) = env_var("ASSIGNMENT_DUE") {
        patch.due_date = Some(parse_datetime(&due).context("Invalid ASSIGNMENT_DUE")?);
    } else if let Some(minutes) = env_var("ASSIGNMENT_DUE_IN_MINUTES") {
        let minutes: i64 = minutes
            .parse()
            .context("Invalid ASSIGNMENT_DUE_IN_MINUTES")?;
        patch.due_date = Some(now + Duration::minutes(minutes));
    }

    if let Some(opened) = env_var("ASSIGNMENT_OPENED") {
        patch.open_date = Some(parse_datetime(&opened).context("Invalid ASSIGNMENT_OPENED")?);
    }

    Ok(patch)
}

fn cli_patch(cli: &Cli, now: DateTime<Utc>) -> Result<AssignmentPatch> {
    let mut patch = AssignmentPatch {
        title: cli.title.clone(),
        description: cli.description.clone(),
        ..Default::default()
    };

    if let Some(due) = &cli.due {
        patch.due_date = Some(parse_datetime(due).context("Invalid --due")?);
    } else if let Some(minutes) = cli.due_in {
        patch.due_date = Some(now + Duration::minutes(minutes));
    }

    if let Some(opened) = &cli.opened {
        patch.open_date = Some(parse_datetime(opened).context("Invalid --opened")?);
    }

    Ok(patch)
}

pub(crate) fn parse_datetime(input: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(input.trim(), "%Y-%m-%d %H:%M")
        .context("expected YYYY-MM-DD HH:MM")?;
    Ok(naive.and_utc())
}

fn resolve_language(explicit: Option<&str>) -> Result<Language> {
    match explicit {
        Some(code) => Language::from_code(code)
            .with_context(|| format!("Unsupported language '{}' (expected en or fr)", code)),
        None => Ok(Language::from_locale_env()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_datetime() {
        let parsed = parse_datetime("2025-03-10 23:59").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 10, 23, 59, 0).unwrap());

        assert!(parse_datetime("2025-03-10").is_err());
        assert!(parse_datetime("tomorrow").is_err());
    }

    #[test]
    fn test_cli_patch_prefers_absolute_due() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let cli = Cli {
            due: Some("2025-04-01 10:00".to_string()),
            due_in: Some(30),
            ..Default::default()
        };
        let patch = cli_patch(&cli, now).unwrap();
        assert_eq!(
            patch.due_date,
            Some(Utc.with_ymd_and_hms(2025, 4, 1, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_cli_patch_relative_due() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let cli = Cli {
            due_in: Some(30),
            ..Default::default()
        };
        let patch = cli_patch(&cli, now).unwrap();
        assert_eq!(patch.due_date, Some(now + Duration::minutes(30)));
    }

    #[test]
    fn test_resolve_language_rejects_unknown_codes() {
        assert_eq!(resolve_language(Some("fr")).unwrap(), Language::Fr);
        assert_eq!(resolve_language(Some("en-GB")).unwrap(), Language::En);
        assert!(resolve_language(Some("de")).is_err());
    }
}
