//! Replay task: real-time tick loop and overlay timer around a [`PlaybackEngine`]

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::time::{interval, sleep, Instant, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::view::result_summary;

use super::playback::{MatchPhase, PlaybackEngine};
use super::protocol::{ControlMsg, ReplayUpdate};
use super::snapshot::MatchSnapshot;

/// Handle to a running replay
#[derive(Clone)]
pub struct ReplayHandle {
    pub match_id: Uuid,
    control_tx: mpsc::Sender<ControlMsg>,
    update_tx: broadcast::Sender<ReplayUpdate>,
}

impl ReplayHandle {
    /// Queue a control. Returns `false` once the replay has stopped.
    pub async fn send(&self, msg: ControlMsg) -> bool {
        self.control_tx.send(msg).await.is_ok()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ReplayUpdate> {
        self.update_tx.subscribe()
    }
}

/// Owns the engine for one match session
pub struct MatchReplay {
    engine: PlaybackEngine,
    control_rx: mpsc::Receiver<ControlMsg>,
    update_tx: broadcast::Sender<ReplayUpdate>,
    tick_interval: Duration,
    overlay_duration: Duration,
}

impl MatchReplay {
    pub fn new(snapshot: Arc<MatchSnapshot>, config: &Config) -> (Self, ReplayHandle) {
        let (control_tx, control_rx) = mpsc::channel(64);
        let (update_tx, _) = broadcast::channel(256);

        let handle = ReplayHandle {
            match_id: snapshot.id,
            control_tx,
            update_tx: update_tx.clone(),
        };

        let replay = Self {
            engine: PlaybackEngine::new(snapshot, config.initial_speed),
            control_rx,
            update_tx,
            tick_interval: config.tick_interval,
            overlay_duration: config.overlay_duration,
        };

        (replay, handle)
    }

    /// Run until shutdown, full time, or every handle is dropped
    pub async fn run(mut self) {
        let match_id = self.engine.snapshot().id;
        info!(match_id = %match_id, "Replay started");

        let mut tick_interval = interval(self.tick_interval);
        tick_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // First tick completes immediately
        tick_interval.tick().await;

        // Dropped with the loop, so teardown cancels a pending hide
        let overlay_timer = sleep(Duration::ZERO);
        tokio::pin!(overlay_timer);
        let mut overlay_armed = false;

        self.publish_state();

        loop {
            tokio::select! {
                _ = tick_interval.tick() => {
                    let report = self.engine.tick();
                    if !report.advanced {
                        continue;
                    }
                    if let Some(event) = report.triggered {
                        overlay_timer.as_mut().reset(Instant::now() + self.overlay_duration);
                        overlay_armed = true;
                        let _ = self.update_tx.send(ReplayUpdate::EventTriggered { event });
                    }
                    self.publish_state();
                    if let Some(phase) = report.entered {
                        self.publish_phase(phase);
                    }
                }

                msg = self.control_rx.recv() => {
                    let Some(msg) = msg else {
                        debug!(match_id = %match_id, "All handles dropped");
                        break;
                    };
                    if msg == ControlMsg::Shutdown {
                        break;
                    }

                    let was_playing = self.engine.state().is_playing();
                    let old_speed = self.engine.state().speed();
                    let old_phase = self.engine.phase();

                    if self.apply_control(msg) {
                        let state = self.engine.state();
                        if (state.is_playing() && !was_playing) || state.speed() != old_speed {
                            // Next tick lands a full interval after play or a speed change
                            tick_interval.reset();
                        }
                        self.publish_state();
                        let phase = self.engine.phase();
                        if phase != old_phase {
                            self.publish_phase(phase);
                        }
                    }
                }

                _ = &mut overlay_timer, if overlay_armed => {
                    overlay_armed = false;
                    self.engine.hide_overlay();
                    let _ = self.update_tx.send(ReplayUpdate::OverlayHidden);
                    self.publish_state();
                }
            }

            if self.engine.phase() == MatchPhase::FullTime {
                break;
            }
        }

        info!(
            match_id = %match_id,
            cursor = self.engine.state().cursor(),
            "Replay stopped"
        );
    }

    fn apply_control(&mut self, msg: ControlMsg) -> bool {
        match msg {
            ControlMsg::Play => self.engine.play(),
            ControlMsg::Pause => self.engine.pause(),
            ControlMsg::TogglePlay => self.engine.toggle_play(),
            ControlMsg::SetSpeed { speed } => self.engine.set_speed(speed),
            ControlMsg::CycleSpeed => self.engine.cycle_speed(),
            ControlMsg::Seek { time } => self.engine.set_cursor(time),
            ControlMsg::Skip { minutes } => self.engine.skip(minutes),
            ControlMsg::JumpToEvent { event_id } => self.engine.jump_to_event(&event_id),
            ControlMsg::ContinueSecondHalf => self.engine.continue_to_second_half(),
            ControlMsg::Shutdown => false,
        }
    }

    fn publish_state(&self) {
        let _ = self.update_tx.send(ReplayUpdate::State(self.engine.derived()));
    }

    fn publish_phase(&self, phase: MatchPhase) {
        let stats = self.engine.derived().stats;
        let update = match phase {
            MatchPhase::HalfTime => ReplayUpdate::HalfTime { score: stats.score },
            MatchPhase::FullTime => {
                let summary = result_summary(self.engine.snapshot(), &stats);
                ReplayUpdate::FullTime {
                    score: summary.score,
                    winner: summary.winner,
                }
            }
            MatchPhase::FirstHalf | MatchPhase::SecondHalf => return,
        };
        let _ = self.update_tx.send(update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{assemble, load_match, PlaybackSpeed};
    use crate::generator::{Fixture, StaticEvents};
    use crate::model::{EventKind, HomeAway, MatchEvent};
    use tokio::sync::broadcast::error::{RecvError, TryRecvError};
    use tokio::time::timeout;

    fn test_config() -> Config {
        Config {
            tick_interval: Duration::from_millis(1000),
            overlay_duration: Duration::from_millis(3000),
            ..Config::default()
        }
    }

    type Started = (ReplayHandle, broadcast::Receiver<ReplayUpdate>, tokio::task::JoinHandle<()>);

    fn start(config: &Config) -> Started {
        start_with(Arc::new(load_match(Some(17)).unwrap()), config)
    }

    fn start_with(snapshot: Arc<MatchSnapshot>, config: &Config) -> Started {
        let (replay, handle) = MatchReplay::new(snapshot, config);
        let rx = handle.subscribe();
        let task = tokio::spawn(replay.run());
        (handle, rx, task)
    }

    async fn next_update(rx: &mut broadcast::Receiver<ReplayUpdate>) -> ReplayUpdate {
        loop {
            match rx.recv().await {
                Ok(update) => return update,
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => panic!("replay closed its update channel"),
            }
        }
    }

    async fn wait_for<F>(rx: &mut broadcast::Receiver<ReplayUpdate>, mut pred: F) -> ReplayUpdate
    where
        F: FnMut(&ReplayUpdate) -> bool,
    {
        loop {
            let update = next_update(rx).await;
            if pred(&update) {
                return update;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_initial_state() {
        let (_handle, mut rx, _task) = start(&test_config());
        match next_update(&mut rx).await {
            ReplayUpdate::State(state) => {
                assert_eq!(state.cursor, 0.0);
                assert_eq!(state.phase, MatchPhase::FirstHalf);
                assert!(!state.playing);
            }
            other => panic!("unexpected first update: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn plays_to_half_time_and_pauses() {
        let (handle, mut rx, _task) = start(&test_config());
        assert!(handle.send(ControlMsg::Play).await);

        let update = wait_for(&mut rx, |u| matches!(u, ReplayUpdate::HalfTime { .. })).await;
        assert_eq!(update, ReplayUpdate::HalfTime { score: HomeAway::new(1, 2) });

        assert!(handle.send(ControlMsg::ContinueSecondHalf).await);
        let update = wait_for(&mut rx, |u| {
            matches!(u, ReplayUpdate::State(s) if s.phase == MatchPhase::SecondHalf)
        })
        .await;
        let ReplayUpdate::State(state) = update else { unreachable!() };
        assert_eq!(state.cursor, 45.0);
        assert!(state.playing);
    }

    #[tokio::test(start_paused = true)]
    async fn plays_through_to_full_time_and_stops() {
        let config = Config {
            initial_speed: PlaybackSpeed::X4,
            ..test_config()
        };
        let (handle, mut rx, task) = start(&config);
        handle.send(ControlMsg::Play).await;

        wait_for(&mut rx, |u| matches!(u, ReplayUpdate::HalfTime { .. })).await;
        handle.send(ControlMsg::ContinueSecondHalf).await;

        let update = wait_for(&mut rx, |u| matches!(u, ReplayUpdate::FullTime { .. })).await;
        assert_eq!(
            update,
            ReplayUpdate::FullTime {
                score: HomeAway::new(2, 4),
                winner: Some("Arsenal".to_string()),
            }
        );

        timeout(Duration::from_secs(5), task)
            .await
            .expect("replay did not stop at full time")
            .unwrap();
        assert!(!handle.send(ControlMsg::Play).await);
    }

    #[tokio::test(start_paused = true)]
    async fn overlay_hides_even_when_paused() {
        let (handle, mut rx, _task) = start(&test_config());
        handle.send(ControlMsg::Seek { time: 17.0 }).await;
        handle.send(ControlMsg::Play).await;

        let update = wait_for(&mut rx, |u| matches!(u, ReplayUpdate::EventTriggered { .. })).await;
        let ReplayUpdate::EventTriggered { event } = update else { unreachable!() };
        assert_eq!(event.id, "e1");

        handle.send(ControlMsg::Pause).await;
        let triggered_at = Instant::now();
        wait_for(&mut rx, |u| matches!(u, ReplayUpdate::OverlayHidden)).await;
        assert!(triggered_at.elapsed() <= Duration::from_millis(3000));

        let update = next_update(&mut rx).await;
        let ReplayUpdate::State(state) = update else { panic!("expected state") };
        assert!(!state.overlay_visible);
        assert!(!state.playing);
    }

    fn foul(id: &str, time: f64) -> MatchEvent {
        MatchEvent {
            id: id.to_string(),
            kind: EventKind::Foul,
            time,
            player_id: "a7".to_string(),
            player_name: "Rice".to_string(),
            team_id: "team2".to_string(),
            team_name: Some("Arsenal".to_string()),
            description: "Foul".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn new_trigger_rearms_overlay_timer() {
        let source = StaticEvents(vec![foul("a", 1.2), foul("b", 2.5)]);
        let snapshot = Arc::new(assemble(&Fixture::default(), &source, 5).unwrap());
        let (handle, mut rx, _task) = start_with(snapshot, &test_config());
        handle.send(ControlMsg::Play).await;

        let is_overlay = |u: &ReplayUpdate| {
            matches!(u, ReplayUpdate::EventTriggered { .. } | ReplayUpdate::OverlayHidden)
        };

        let ReplayUpdate::EventTriggered { event } = wait_for(&mut rx, is_overlay).await else {
            panic!("overlay hidden before the first trigger")
        };
        assert_eq!(event.id, "a");

        let ReplayUpdate::EventTriggered { event } = wait_for(&mut rx, is_overlay).await else {
            panic!("overlay hidden between triggers")
        };
        assert_eq!(event.id, "b");
        let second_at = Instant::now();

        let update = wait_for(&mut rx, is_overlay).await;
        assert_eq!(update, ReplayUpdate::OverlayHidden);
        let waited = second_at.elapsed();
        assert!(waited >= Duration::from_millis(3000) && waited < Duration::from_millis(3500));

        handle.send(ControlMsg::Pause).await;
        let again = timeout(
            Duration::from_secs(10),
            wait_for(&mut rx, |u| matches!(u, ReplayUpdate::OverlayHidden)),
        )
        .await;
        assert!(again.is_err(), "overlay hidden twice");
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_drops_pending_overlay_hide() {
        let (handle, mut rx, task) = start(&test_config());
        handle.send(ControlMsg::Seek { time: 17.0 }).await;
        handle.send(ControlMsg::Play).await;
        wait_for(&mut rx, |u| matches!(u, ReplayUpdate::EventTriggered { .. })).await;

        handle.send(ControlMsg::Shutdown).await;
        timeout(Duration::from_secs(1), task)
            .await
            .expect("replay ignored shutdown")
            .unwrap();
        tokio::time::advance(Duration::from_secs(5)).await;

        loop {
            match rx.try_recv() {
                Ok(update) => assert_ne!(update, ReplayUpdate::OverlayHidden),
                Err(TryRecvError::Empty) => break,
                Err(e) => panic!("unexpected receive error: {e:?}"),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn event_jump_pauses_and_swaps_sides() {
        let (handle, mut rx, _task) = start(&test_config());
        next_update(&mut rx).await;

        handle
            .send(ControlMsg::JumpToEvent {
                event_id: "e6".to_string(),
            })
            .await;
        let ReplayUpdate::State(state) = next_update(&mut rx).await else {
            panic!("expected state")
        };
        assert_eq!(state.cursor, 58.7);
        assert_eq!(state.phase, MatchPhase::SecondHalf);
        assert_eq!(state.stats.score, HomeAway::new(2, 2));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_the_loop() {
        let (handle, _rx, task) = start(&test_config());
        handle.send(ControlMsg::Shutdown).await;
        timeout(Duration::from_secs(1), task)
            .await
            .expect("replay ignored shutdown")
            .unwrap();
    }

    #[test]
    fn dropping_every_handle_stops_the_loop() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let snapshot = Arc::new(load_match(Some(3)).unwrap());
        let (replay, handle) = MatchReplay::new(snapshot, &test_config());
        let task = rt.spawn(replay.run());
        drop(handle);
        rt.block_on(task).unwrap();
    }

    #[test]
    fn send_after_stop_reports_closed() {
        let snapshot = Arc::new(load_match(Some(3)).unwrap());
        let (replay, handle) = MatchReplay::new(snapshot, &test_config());
        drop(replay);
        assert!(!tokio_test::block_on(handle.send(ControlMsg::Play)));
    }
}
