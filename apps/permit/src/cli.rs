//! # CLI Module
//!
//! Command-line interface for the Permit console.
//!
//! Two commands:
//! - `serve` — run the HTTP service against the platform backend (or the
//!   in-memory demo backend when no URL is configured);
//! - `preview` — offline matrix inspection from a feature dump: apply cell
//!   toggles and print the resulting grid and submission payload.

use crate::api::{AppState, router};
use crate::backend::{Backend, BackendError, HttpBackend, InMemoryBackend};
use clap::{Parser, Subcommand};
use permit_core::{
    Feature, FeatureId, Module, PermissionMatrix, PermissionType, is_allowed_module,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Permit — role & permission console for the recruitment platform.
#[derive(Debug, Parser)]
#[command(name = "permit", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the console HTTP service.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:8080")]
        listen: String,

        /// Base URL of the platform backend. Uses the in-memory demo
        /// backend when omitted.
        #[arg(long)]
        backend_url: Option<String>,

        /// Bearer key required on the /v1 surface. Unset disables the guard.
        #[arg(long)]
        api_key: Option<String>,

        /// Request timeout for backend calls, in seconds.
        #[arg(long, default_value_t = 30)]
        backend_timeout_secs: u64,
    },

    /// Inspect the permission matrix derived from a feature dump.
    Preview {
        /// Path to a JSON file holding the feature list.
        #[arg(long)]
        features: PathBuf,

        /// Cell toggles to apply, as MODULE:TYPE (e.g. CANDIDATE:READ).
        /// Repeatable; repeating a pair deselects it.
        #[arg(long = "select")]
        select: Vec<String>,

        /// Emit the report as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

/// Failures running a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid feature file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid selection {0:?}: expected MODULE:TYPE, e.g. CANDIDATE:READ")]
    InvalidSelection(String),

    #[error("module {0} is not selectable")]
    HiddenModule(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Run the console HTTP service until interrupted.
pub async fn cmd_serve(
    listen: &str,
    backend_url: Option<String>,
    api_key: Option<String>,
    backend_timeout_secs: u64,
) -> Result<(), CliError> {
    let backend: Arc<dyn Backend> = match backend_url {
        Some(url) => {
            tracing::info!(backend = %url, "using platform backend");
            Arc::new(HttpBackend::new(
                url,
                Duration::from_secs(backend_timeout_secs),
            )?)
        }
        None => {
            tracing::warn!("no backend url configured; serving the in-memory demo backend");
            Arc::new(InMemoryBackend::sample())
        }
    };

    let state = AppState {
        backend,
        api_key: api_key.map(Into::into),
    };

    let listener = tokio::net::TcpListener::bind(listen).await?;
    tracing::info!(listen = %listen, "permit console listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(err) => {
            tracing::error!(error = %err, "failed to install shutdown handler");
            // Without a handler there is nothing to wait for; keep serving.
            std::future::pending::<()>().await;
        }
    }
}

// =============================================================================
// PREVIEW COMMAND
// =============================================================================

#[derive(Debug, Serialize)]
struct PreviewCell {
    permission: PermissionType,
    selected: usize,
    available: usize,
}

#[derive(Debug, Serialize)]
struct PreviewRow {
    module: Module,
    cells: Vec<PreviewCell>,
}

#[derive(Debug, Serialize)]
struct PreviewReport {
    modules: Vec<PreviewRow>,
    selected_feature_ids: Vec<FeatureId>,
}

/// Parse a `MODULE:TYPE` selection argument, case-insensitively.
pub fn parse_selection(raw: &str) -> Result<(Module, PermissionType), CliError> {
    let Some((module, permission)) = raw.split_once(':') else {
        return Err(CliError::InvalidSelection(raw.to_string()));
    };
    let module = Module::new(module.trim().to_uppercase());
    let Some(permission) = PermissionType::parse(permission.trim()) else {
        return Err(CliError::InvalidSelection(raw.to_string()));
    };
    Ok((module, permission))
}

/// Build and print the matrix report for a feature dump.
pub fn cmd_preview(features_path: &Path, selections: &[String], json: bool) -> Result<(), CliError> {
    let raw = std::fs::read_to_string(features_path)?;
    let features: Vec<Feature> = serde_json::from_str(&raw)?;

    let mut matrix = PermissionMatrix::initialize(&features);
    for raw_selection in selections {
        let (module, permission) = parse_selection(raw_selection)?;
        if !is_allowed_module(&module) {
            return Err(CliError::HiddenModule(module.to_string()));
        }
        match matrix.toggle_cell(&module, permission, &features) {
            Some(next) => matrix = next,
            None => {
                tracing::warn!("feature list is empty; selections ignored");
                break;
            }
        }
    }

    let report = PreviewReport {
        modules: matrix
            .visible_modules()
            .map(|module| PreviewRow {
                module: module.clone(),
                cells: PermissionType::ALL
                    .into_iter()
                    .map(|permission| PreviewCell {
                        permission,
                        selected: matrix
                            .cell(module, permission)
                            .map(|ids| ids.len())
                            .unwrap_or_default(),
                        available: PermissionMatrix::available_feature_count(
                            &features, module, permission,
                        ),
                    })
                    .collect(),
            })
            .collect(),
        selected_feature_ids: matrix.selected_feature_ids().into_iter().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &PreviewReport) {
    println!(
        "{:<12} {:>14} {:>14} {:>14} {:>14}",
        "MODULE", "READ", "WRITE", "UPDATE", "DELETE"
    );
    for row in &report.modules {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|cell| {
                let mark = if cell.selected > 0 { "x" } else { " " };
                format!("[{mark}] {}/{}", cell.selected, cell.available)
            })
            .collect();
        println!(
            "{:<12} {:>14} {:>14} {:>14} {:>14}",
            row.module.as_str(),
            cells.first().map_or("", String::as_str),
            cells.get(1).map_or("", String::as_str),
            cells.get(2).map_or("", String::as_str),
            cells.get(3).map_or("", String::as_str),
        );
    }
    let ids: Vec<String> = report
        .selected_feature_ids
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("selected feature ids: [{}]", ids.join(", "));
}

// =============================================================================
// TESTS
// =============================================================================
