//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api;
use crate::config::ServerConfig;
use sproutlab_core::{CELEBRATION_DELAY_MS, GuideError, GuideSession, STEP_COUNT, StepId};
use std::path::Path;
use std::time::{Duration, Instant};

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(
    config_file: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), GuideError> {
    let config = ServerConfig::resolve(config_file, host, port)?;
    let session = GuideSession::new();

    println!("SproutLab Build Guide Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:       {}", config.host);
    println!("  Port:       {}", config.port);
    println!("  Rate Limit: {} req/s", config.rate_limit);
    println!();
    println!("Endpoints:");
    println!("  GET  /health                - Health check");
    println!("  GET  /catalog               - Step catalog");
    println!("  GET  /state                 - Session state snapshot");
    println!("  GET  /status                - Derived status projection");
    println!("  GET  /component/{{component}} - Single-component status");
    println!("  POST /step/activate         - Move the active pointer");
    println!("  POST /step/toggle           - Toggle a step's completion");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(&config, session).await
}

// =============================================================================
// STEPS COMMAND
// =============================================================================

/// List the build-guide step catalog.
pub fn cmd_steps(json_mode: bool) -> Result<(), GuideError> {
    let session = GuideSession::new();
    let catalog = session.catalog();

    if json_mode {
        let steps: Vec<serde_json::Value> = catalog
            .iter()
            .map(|step| {
                serde_json::json!({
                    "id": step.id.value(),
                    "title": step.title,
                    "description": step.description,
                    "component": step.component.as_str(),
                    "subtasks": step.subtasks,
                    "victory_label": step.victory_label,
                })
            })
            .collect();
        let output = serde_json::json!({ "steps": steps });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("SproutLab Build Guide");
    println!("=====================");
    println!();
    for step in catalog.iter() {
        println!(
            "Step {} - {} [{}]",
            step.id.value(),
            step.title,
            step.component.as_str()
        );
        println!("  {}", step.description);
        for subtask in &step.subtasks {
            println!("    - {}", subtask);
        }
        println!();
    }

    Ok(())
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show the derived guide status for a fresh session.
pub fn cmd_status(json_mode: bool) -> Result<(), GuideError> {
    let session = GuideSession::new();
    print_status(&session, json_mode)
}

/// Render a session's derived status.
fn print_status(session: &GuideSession, json_mode: bool) -> Result<(), GuideError> {
    let overview = session.status_overview();
    let snapshot = session.snapshot();

    if json_mode {
        let components: Vec<serde_json::Value> = overview
            .components
            .iter()
            .map(|(component, status)| {
                serde_json::json!({
                    "component": component.as_str(),
                    "is_active": status.is_active,
                    "is_done": status.is_done,
                    "is_locked": status.is_locked,
                })
            })
            .collect();
        let output = serde_json::json!({
            "active": snapshot.active.value(),
            "celebrating": snapshot.celebrating,
            "completed": snapshot.completed.iter().map(|id| id.value()).collect::<Vec<_>>(),
            "completion_percent": overview.completion_percent,
            "powered_on": overview.powered_on,
            "data_flowing": overview.data_flowing,
            "components": components,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("SproutLab Guide Status");
    println!("======================");
    println!();
    println!("Active Step:  {}", snapshot.active);
    println!(
        "Completed:    {} / {}",
        snapshot.completed.len(),
        STEP_COUNT
    );
    println!("Progress:     {}%", overview.completion_percent);
    println!("Powered On:   {}", overview.powered_on);
    println!("Data Flowing: {}", overview.data_flowing);
    println!();
    for (component, status) in &overview.components {
        let marker = if status.is_done {
            "done"
        } else if status.is_active {
            "active"
        } else if status.is_locked {
            "locked"
        } else {
            "ready"
        };
        println!("  {:<8} {}", component.as_str(), marker);
    }

    Ok(())
}

// =============================================================================
// WALKTHROUGH COMMAND
// =============================================================================

/// Run the full guide start to finish with real timers.
///
/// Completes every step in order, waiting out each celebration window so
/// the advance timers fire exactly as they would under the HTTP server.
pub async fn cmd_walkthrough(json_mode: bool, delay_ms: Option<u64>) -> Result<(), GuideError> {
    let mut session = GuideSession::new();
    let epoch = Instant::now();
    let extra_delay = delay_ms.unwrap_or(0);

    let now_ms =
        |epoch: &Instant| u64::try_from(epoch.elapsed().as_millis()).unwrap_or(u64::MAX);

    if !json_mode {
        println!("SproutLab Walkthrough");
        println!("=====================");
        println!();
    }

    for raw_id in 1..=STEP_COUNT {
        let id = StepId(raw_id);
        let title = session
            .step(id)
            .map(|step| step.title.clone())
            .unwrap_or_default();
        let victory = session
            .step(id)
            .map(|step| step.victory_label.clone())
            .unwrap_or_default();

        session.toggle_complete(id, now_ms(&epoch))?;
        if !json_mode {
            println!("Step {} - {} ... {}", raw_id, title, victory);
        }

        // Let the celebration window elapse so the advance timer fires.
        tokio::time::sleep(Duration::from_millis(CELEBRATION_DELAY_MS + 50)).await;
        session.advance_due(now_ms(&epoch));

        if extra_delay > 0 {
            tokio::time::sleep(Duration::from_millis(extra_delay)).await;
        }
    }

    if !json_mode {
        println!();
    }
    print_status(&session, json_mode)
}
