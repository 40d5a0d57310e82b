//! Match Replay - headless runner
//!
//! Loads a match, plays it in real time and logs what the dashboard would show:
//! - triggered events and overlay timing
//! - half time (optionally continuing automatically) and full time
//! - every update as a JSON line when `REPLAY_EMIT_JSON` is set

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use match_replay::config::Config;
use match_replay::game::{load_match, ControlMsg, MatchReplay, ReplayUpdate};
use match_replay::util::time::format_match_time;
use match_replay::view::{build_timeline, period_label};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    init_tracing(&config.log_level);

    info!("Starting Match Replay");

    let snapshot = Arc::new(load_match(config.seed)?);
    let timeline = build_timeline(&snapshot.events, 0.0);
    for section in &timeline.sections {
        info!(
            section = section.label,
            events = section.entries.len(),
            "Timeline loaded"
        );
    }

    let (replay, handle) = MatchReplay::new(snapshot.clone(), &config);
    let mut updates = handle.subscribe();
    let replay_task = tokio::spawn(replay.run());

    handle.send(ControlMsg::Play).await;
    let started = tokio::time::Instant::now();

    let mut shutdown = Box::pin(shutdown_signal());
    loop {
        let update = tokio::select! {
            update = updates.recv() => update,
            _ = &mut shutdown => {
                handle.send(ControlMsg::Shutdown).await;
                break;
            }
        };

        let update = match update {
            Ok(update) => update,
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Update receiver lagged");
                continue;
            }
            Err(RecvError::Closed) => break,
        };

        if config.emit_json {
            println!("{}", serde_json::to_string(&update)?);
        }

        match update {
            ReplayUpdate::State(state) => {
                tracing::debug!(
                    clock = %state.clock,
                    period = period_label(state.phase),
                    home = state.stats.score.home,
                    away = state.stats.score.away,
                    "State"
                );
            }
            ReplayUpdate::EventTriggered { event } => {
                info!(
                    minute = %format_match_time(event.time),
                    kind = event.kind.label(),
                    player = %event.player_name,
                    team = event.team_name.as_deref().unwrap_or(""),
                    "{}",
                    event.description
                );
            }
            ReplayUpdate::OverlayHidden => {}
            ReplayUpdate::HalfTime { score } => {
                info!(home = score.home, away = score.away, "Half time");
                if config.auto_continue {
                    handle.send(ControlMsg::ContinueSecondHalf).await;
                }
            }
            ReplayUpdate::FullTime { score, winner } => {
                info!(
                    home = score.home,
                    away = score.away,
                    winner = winner.as_deref().unwrap_or("draw"),
                    "Full time"
                );
                break;
            }
        }
    }

    replay_task.await?;
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Replay finished"
    );
    Ok(())
}

/// Logs go to stderr so stdout carries only the JSON update stream
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let stderr = fmt::layer().with_writer(std::io::stderr).with_target(false);

    tracing_subscriber::registry().with(filter).with(stderr).init();
}

/// Ctrl+C / SIGTERM handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, stopping replay");
        }
        _ = terminate => {
            info!("Received terminate signal, stopping replay");
        }
    }
}
