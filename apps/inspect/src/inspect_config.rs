//! Environment configuration and tracing setup for the inspector.

use std::env;
use std::path::PathBuf;

use plaza_application::{DEFAULT_MAX_TAGLINE_LENGTH, ProfileSettings};
use plaza_core::{AppError, AppResult};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct InspectConfig {
    pub seed_file: PathBuf,
    pub user_name: String,
    pub settings: ProfileSettings,
}

impl InspectConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let seed_file = required(&lookup, "PLAZA_SEED_FILE").map(PathBuf::from)?;
        let user_name = required(&lookup, "PLAZA_USER")?;
        let include_header_summary = lookup("PLAZA_INCLUDE_HEADER_SUMMARY")
            .map(|value| parse_bool("PLAZA_INCLUDE_HEADER_SUMMARY", value.as_str()))
            .transpose()?
            .unwrap_or(true);
        let max_tagline_length = match lookup("PLAZA_MAX_TAGLINE_LENGTH") {
            Some(value) => value.trim().parse::<usize>().map_err(|error| {
                AppError::Validation(format!(
                    "invalid PLAZA_MAX_TAGLINE_LENGTH value '{value}': {error}"
                ))
            })?,
            None => DEFAULT_MAX_TAGLINE_LENGTH,
        };

        if max_tagline_length == 0 {
            return Err(AppError::Validation(
                "PLAZA_MAX_TAGLINE_LENGTH must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            seed_file,
            user_name,
            settings: ProfileSettings {
                include_header_summary,
                max_tagline_length,
            },
        })
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> AppResult<String> {
    lookup(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{name} is required")))
}

fn parse_bool(name: &str, value: &str) -> AppResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(AppError::Validation(format!(
            "invalid {name} value '{value}': expected true or false"
        ))),
    }
}
