//! Outer game loop
//!
//! Single-threaded: pace the frame, poll input, run one simulation tick,
//! hand the snapshot to the sink. Input and presentation failures end the
//! run; the simulation itself cannot fail.

use std::time::Duration;

use crate::error::GameError;
use crate::platform::{FrameClock, InputSource, TimeSource, WallClock};
use crate::renderer::PresentationSink;
use crate::settings::Settings;
use crate::sim::{SimState, Snapshot, tick};

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u64,
    pub ticks: u64,
    pub pairs_resolved: u64,
    /// Simulated time covered by the run
    pub sim_time: Duration,
}

/// A simulation wired to its clock, input and display
pub struct Game<I, P, T = WallClock>
where
    I: InputSource,
    P: PresentationSink,
    T: TimeSource,
{
    sim: SimState,
    clock: FrameClock<T>,
    input: I,
    sink: P,
}

impl<I, P> Game<I, P, WallClock>
where
    I: InputSource,
    P: PresentationSink,
{
    /// Real-time game paced by the wall clock
    pub fn new(settings: Settings, input: I, sink: P) -> Result<Self, GameError> {
        Self::with_time_source(settings, input, sink, WallClock::new())
    }
}

impl<I, P, T> Game<I, P, T>
where
    I: InputSource,
    P: PresentationSink,
    T: TimeSource,
{
    pub fn with_time_source(
        settings: Settings,
        input: I,
        sink: P,
        time: T,
    ) -> Result<Self, GameError> {
        let clock = FrameClock::new(time, settings.frame_budget());
        let sim = SimState::new(settings)?;
        Ok(Self {
            sim,
            clock,
            input,
            sink,
        })
    }

    /// Run one paced frame. Returns the snapshot that was presented.
    pub fn frame(&mut self) -> Result<Snapshot, GameError> {
        let elapsed = self.clock.tick();
        let input = self.input.poll()?;
        let snapshot = tick(&mut self.sim, &input, elapsed);
        self.sink.present(&snapshot)?;
        Ok(snapshot)
    }

    /// Run until quit, then tear down the sink
    pub fn run(&mut self) -> Result<RunSummary, GameError> {
        log::info!(
            "Running at {} FPS (frame budget {:?})",
            self.sim.settings.target_fps,
            self.clock.budget()
        );

        while self.sim.is_running() {
            if let Err(err) = self.frame() {
                log::error!("Stopping at tick {}: {}", self.sim.time_ticks, err);
                self.sink.shutdown();
                return Err(err);
            }
        }

        self.sink.shutdown();
        let summary = self.summary();
        log::info!(
            "Run finished: score {} over {} ticks ({} hits)",
            summary.score,
            summary.ticks,
            summary.pairs_resolved
        );
        Ok(summary)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            score: self.sim.score,
            ticks: self.sim.time_ticks,
            pairs_resolved: self.sim.pairs_resolved,
            sim_time: self.sim.now,
        }
    }

    pub fn sim(&self) -> &SimState {
        &self.sim
    }

    pub fn sink(&self) -> &P {
        &self.sink
    }

    pub fn clock(&self) -> &FrameClock<T> {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InputError, PresentError};
    use crate::platform::{DemoInput, Key, KeyEvent, ManualClock, ScriptedInput};
    use crate::renderer::{LogSink, QuadBatch};
    use crate::sim::{SimPhase, TickInput};

    fn manual_game<I: InputSource, P: PresentationSink>(
        input: I,
        sink: P,
    ) -> Game<I, P, ManualClock> {
        Game::with_time_source(Settings::default(), input, sink, ManualClock::new()).unwrap()
    }

    #[test]
    fn test_demo_run_to_quit() {
        let mut game = manual_game(DemoInput::new(600), LogSink::new(0));
        let summary = game.run().unwrap();

        assert_eq!(game.sim().phase, SimPhase::Stopped);
        assert_eq!(summary.ticks, 601);
        assert_eq!(summary.score, summary.pairs_resolved * 10);
        assert_eq!(game.sink().frames(), 601);
        assert_eq!(game.sink().last().unwrap().score, summary.score);
        // ~10 s of simulated time: about ten spawns so far, none piling up
        assert!(game.sim().entities.targets.len() <= 10);
    }

    #[test]
    fn test_sim_time_follows_frame_clock() {
        let mut game = manual_game(ScriptedInput::new(vec![vec![]; 59]), LogSink::new(0));
        let summary = game.run().unwrap();
        assert_eq!(summary.ticks, 60);
        assert_eq!(summary.sim_time, game.clock().budget() * 60);
    }

    #[test]
    fn test_scripted_hit_scores() {
        // Fire straight up into a target parked above the ship
        let mut game = manual_game(
            ScriptedInput::new(vec![vec![KeyEvent::down(Key::Fire)]]),
            QuadBatch::new(800.0, 600.0),
        );
        let player = game.sim.entities.player.bounds;
        game.sim.entities.spawn_target(crate::sim::Aabb::new(
            player.center_x() - 20.0,
            player.top() - 45.0,
            40.0,
            40.0,
        ));

        let snapshot = game.frame().unwrap();
        assert_eq!(snapshot.score, 10);
        assert_eq!(game.sink().label().unwrap().text, "Score: 10");
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            spawn_interval_ms: 0,
            ..Default::default()
        };
        let result = Game::with_time_source(
            settings,
            DemoInput::new(1),
            LogSink::new(0),
            ManualClock::new(),
        );
        assert!(matches!(result, Err(GameError::Config(_))));
    }

    struct BrokenInput;

    impl InputSource for BrokenInput {
        fn poll(&mut self) -> Result<TickInput, InputError> {
            Err(InputError::Disconnected)
        }
    }

    #[test]
    fn test_input_failure_is_fatal() {
        let mut game = manual_game(BrokenInput, LogSink::new(0));
        let err = game.run().unwrap_err();
        assert!(matches!(err, GameError::Input(InputError::Disconnected)));
        assert_eq!(game.sim().time_ticks, 0);
    }

    struct FlakyDisplay {
        frames_left: u32,
        shut_down: bool,
    }

    impl PresentationSink for FlakyDisplay {
        fn present(&mut self, _frame: &Snapshot) -> Result<(), PresentError> {
            if self.frames_left == 0 {
                return Err(PresentError::DisplayLost);
            }
            self.frames_left -= 1;
            Ok(())
        }

        fn shutdown(&mut self) {
            self.shut_down = true;
        }
    }

    #[test]
    fn test_present_failure_is_fatal() {
        let display = FlakyDisplay {
            frames_left: 3,
            shut_down: false,
        };
        let mut game = manual_game(DemoInput::new(100), display);
        let err = game.run().unwrap_err();
        assert!(matches!(err, GameError::Present(PresentError::DisplayLost)));
        assert_eq!(game.sim().time_ticks, 4);
        assert!(game.sink().shut_down);
    }
}
