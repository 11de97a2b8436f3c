//! Plaza profile inspector.
//!
//! Loads profiles from a JSON seed into the in-memory adapters and prints the
//! private and public views of one user.

#![forbid(unsafe_code)]

mod inspect_config;
mod seed;

use std::sync::Arc;

use plaza_application::ProfileService;
use plaza_core::AppError;
use plaza_infrastructure::{InMemoryHeaderSummaryQueries, InMemoryProfileRepository};
use serde_json::json;
use tracing::info;

use crate::inspect_config::{InspectConfig, init_tracing};
use crate::seed::Seed;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = InspectConfig::load()?;
    let seed = Seed::read(config.seed_file.as_path())?;

    let repository = Arc::new(InMemoryProfileRepository::new());
    let header_queries = Arc::new(InMemoryHeaderSummaryQueries::new());
    seed.apply(&repository, &header_queries).await?;

    let service = ProfileService::new(repository, header_queries, config.settings);

    let user_id = seed.user_id(config.user_name.as_str()).ok_or_else(|| {
        AppError::NotFound(format!("user '{}' is not in the seed", config.user_name))
    })?;
    let private = service.current_user(user_id).await?;
    let public = service.public_profile(config.user_name.as_str()).await?;

    info!(
        user_id = %user_id,
        locked = private.is_locked(),
        has_header_summary = private.header_summary().is_some(),
        header_summary_enabled = service.settings().include_header_summary,
        "resolved profile"
    );

    let output = serde_json::to_string_pretty(&json!({
        "private": private,
        "public": public,
    }))
    .map_err(|error| AppError::Internal(format!("failed to render profile: {error}")))?;
    println!("{output}");

    Ok(())
}
