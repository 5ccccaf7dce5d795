// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `recall status` command implementation.
//!
//! Runs the health check of the configured history backend and the
//! generation adapter, and reports how much history is stored. Nothing is
//! sent to the model.

use std::io::IsTerminal;

use recall_config::RecallConfig;
use recall_core::{HealthStatus, PluginAdapter, RecallError};
use recall_gemini::GeminiProvider;
use serde::Serialize;

/// One adapter's identity and health.
#[derive(Debug, Serialize)]
pub struct AdapterReport {
    pub name: String,
    pub kind: String,
    pub version: String,
    pub healthy: bool,
    pub status: String,
}

impl AdapterReport {
    fn unavailable(name: &str, kind: &str, reason: String) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            version: "-".to_string(),
            healthy: false,
            status: reason,
        }
    }
}

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub storage: AdapterReport,
    pub generation: AdapterReport,
    pub messages: usize,
}

/// Probes `adapter` and describes the result.
pub async fn check_adapter<A: PluginAdapter + ?Sized>(adapter: &A) -> AdapterReport {
    let (healthy, status) = match adapter.health_check().await {
        Ok(HealthStatus::Healthy) => (true, "healthy".to_string()),
        Ok(HealthStatus::Degraded(reason)) => (true, format!("degraded: {reason}")),
        Ok(HealthStatus::Unhealthy(reason)) => (false, format!("unhealthy: {reason}")),
        Err(e) => (false, format!("health check failed: {e}")),
    };
    AdapterReport {
        name: adapter.name().to_string(),
        kind: adapter.adapter_type().to_string().to_lowercase(),
        version: adapter.version().to_string(),
        healthy,
        status,
    }
}

/// Runs `recall status`.
pub async fn run_status(config: &RecallConfig, json: bool, plain: bool) -> Result<(), RecallError> {
    let storage = match recall_storage::open_blob_store(&config.storage) {
        Ok(backend) => check_adapter(backend.as_ref()).await,
        Err(e) => AdapterReport::unavailable("storage", "storage", e.to_string()),
    };
    let generation = match GeminiProvider::new(&config.gemini) {
        Ok(provider) => check_adapter(&provider).await,
        Err(e) => AdapterReport::unavailable("gemini", "generation", e.to_string()),
    };
    let messages = if storage.healthy {
        crate::open_history(config)?.len()
    } else {
        0
    };
    let response = StatusResponse {
        storage,
        generation,
        messages,
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print_status(&response, use_color);
    }
    Ok(())
}

fn print_status(response: &StatusResponse, use_color: bool) {
    println!();
    println!("  recall status");
    println!("  {}", "-".repeat(35));
    print_adapter("Storage", &response.storage, use_color);
    print_adapter("Model", &response.generation, use_color);
    println!("    History:  {} message(s)", response.messages);
    println!();
}

fn print_adapter(label: &str, report: &AdapterReport, use_color: bool) {
    let detail = format!("{} {} ({})", report.name, report.version, report.status);
    if use_color {
        use colored::Colorize;
        let mark = if report.healthy { "✓".green() } else { "✗".red() };
        println!("    {label:<9} {mark} {detail}");
    } else {
        let mark = if report.healthy { "[OK]" } else { "[FAIL]" };
        println!("    {label:<9} {mark} {detail}");
    }
}
