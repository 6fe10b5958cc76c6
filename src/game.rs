//! Fixed-rate game loop
//!
//! Each tick: poll input, dispatch paddle commands, run the simulation tick,
//! fire audio cues, then hand a frame snapshot to the renderer. The score
//! region is flagged for redraw only when the score actually changed.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use crate::audio::{AudioSink, SoundEffect};
use crate::consts::{MAX_SUBSTEPS, SCORE_LABEL_OFFSET};
use crate::input::{InputEvent, InputSource, KeyBindings};
use crate::sim::{Arena, BallUpdate, GameState, Rect, Side, TickInput, tick};
use crate::{ConfigError, Settings};

/// Longest frame gap fed to the accumulator (seconds)
const MAX_FRAME_DT: f32 = 0.1;

/// Horizontal center of a score label
pub fn score_label_x(arena: &Arena, side: Side) -> f32 {
    match side {
        Side::Left => arena.center().x - SCORE_LABEL_OFFSET,
        Side::Right => arena.center().x + SCORE_LABEL_OFFSET,
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub tick: u64,
    pub ball: Rect,
    /// Ball heading in [0, 2π)
    pub heading: f32,
    pub left: Rect,
    pub right: Rect,
    pub player1: u32,
    pub player2: u32,
    /// Score region must be redrawn this frame
    pub score_dirty: bool,
}

impl Frame {
    pub fn capture(state: &GameState, score_dirty: bool) -> Self {
        Self {
            tick: state.time_ticks,
            ball: state.ball.rect,
            heading: state.ball.heading(),
            left: state.left.rect,
            right: state.right.rect,
            player1: state.score.player1,
            player2: state.score.player2,
            score_dirty,
        }
    }
}

pub trait Renderer {
    fn render(&mut self, frame: &Frame) -> io::Result<()>;
}

/// Writes the score line whenever it changes; positions go to the trace log
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, frame: &Frame) -> io::Result<()> {
        if frame.score_dirty {
            writeln!(
                self.out,
                "[tick {:>6}] {:>3} : {:<3}",
                frame.tick, frame.player1, frame.player2
            )?;
            self.out.flush()?;
        }
        log::trace!(
            "tick {} ball=({:.1}, {:.1}) heading={:.3} left_y={:.1} right_y={:.1}",
            frame.tick,
            frame.ball.left(),
            frame.ball.top(),
            frame.heading,
            frame.left.top(),
            frame.right.top()
        );
        Ok(())
    }
}

/// What happened during one loop iteration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub outcome: BallUpdate,
    pub score_changed: bool,
    /// Quit was received; the simulation did not advance
    pub quit: bool,
}

/// Totals for a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub player1: u32,
    pub player2: u32,
    pub paddle_hits: u64,
    pub quit: bool,
}

/// Game instance holding all state and collaborators
pub struct Game<I, A, R> {
    state: GameState,
    bindings: KeyBindings,
    input: I,
    audio: A,
    renderer: R,
    tick_dt: f32,
    accumulator: f32,
    started: bool,
    quit: bool,
    paddle_hits: u64,
}

impl<I: InputSource, A: AudioSink, R: Renderer> Game<I, A, R> {
    pub fn new(settings: &Settings, input: I, audio: A, renderer: R) -> Result<Self, ConfigError> {
        let state = GameState::new(settings)?;
        log::info!(
            "Arena {}x{}, seed {}, {} ticks/s",
            settings.arena_width,
            settings.arena_height,
            settings.seed,
            settings.tick_rate
        );
        Ok(Self {
            state,
            bindings: settings.keys,
            input,
            audio,
            renderer,
            tick_dt: settings.tick_dt(),
            accumulator: 0.0,
            started: false,
            quit: false,
            paddle_hits: 0,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn is_quit(&self) -> bool {
        self.quit
    }

    /// Run one full loop iteration
    pub fn step(&mut self) -> io::Result<TickReport> {
        let first_frame = !self.started;
        if first_frame {
            self.audio.start_music();
            self.started = true;
        }

        let mut commands = Vec::new();
        for event in self.input.poll(self.state.time_ticks) {
            match event {
                InputEvent::Quit => self.quit = true,
                other => commands.extend(self.bindings.translate(other)),
            }
        }
        if self.quit {
            log::info!("Quit received at tick {}", self.state.time_ticks);
            return Ok(TickReport {
                quit: true,
                ..TickReport::default()
            });
        }

        let outcome = tick(&mut self.state, &TickInput::new(commands));

        if let Some(side) = outcome.paddle_hit {
            self.paddle_hits += 1;
            self.audio.play(SoundEffect::paddle_hit(side));
        }
        let score_changed = self.state.score.consume_changed();
        if score_changed {
            self.audio.play(SoundEffect::ScoreChanged);
        }

        let frame = Frame::capture(&self.state, score_changed || first_frame);
        self.renderer.render(&frame)?;

        Ok(TickReport {
            outcome,
            score_changed,
            quit: false,
        })
    }

    /// Accumulate `dt` seconds of wall time and run the whole ticks it covers,
    /// at most `MAX_SUBSTEPS` per call. Returns the number of ticks run.
    ///
    /// For callers that own their own frame clock; `run` paces itself the
    /// same way when `realtime` is set.
    pub fn advance(&mut self, dt: f32) -> io::Result<u32> {
        self.run_accumulated(dt, MAX_SUBSTEPS)
    }

    /// Accumulator core: at most `limit` ticks. A tick that observed quit is
    /// not counted.
    fn run_accumulated(&mut self, dt: f32, limit: u32) -> io::Result<u32> {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.tick_dt && substeps < limit && !self.quit {
            if self.step()?.quit {
                break;
            }
            self.accumulator -= self.tick_dt;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog instead of spiralling
            self.accumulator = self.accumulator.min(self.tick_dt);
        }
        Ok(substeps)
    }

    /// Run until quit or `max_ticks` simulation ticks. With `realtime` the
    /// loop feeds measured wall time through the accumulator and sleeps until
    /// the next tick is due; otherwise ticks run back to back.
    pub fn run(&mut self, max_ticks: Option<u64>, realtime: bool) -> io::Result<RunSummary> {
        let mut ticks = 0;
        let mut last = Instant::now();

        while !self.quit && max_ticks.is_none_or(|max| ticks < max) {
            if realtime {
                let now = Instant::now();
                let dt = now.duration_since(last).as_secs_f32();
                last = now;

                let limit = max_ticks.map_or(MAX_SUBSTEPS, |max| {
                    (max - ticks).min(u64::from(MAX_SUBSTEPS)) as u32
                });
                ticks += u64::from(self.run_accumulated(dt, limit)?);

                let wait = self.tick_dt - self.accumulator;
                if wait > 0.0 && !self.quit {
                    thread::sleep(Duration::from_secs_f32(wait));
                }
            } else {
                if self.step()?.quit {
                    break;
                }
                ticks += 1;
            }
        }

        let summary = RunSummary {
            ticks,
            player1: self.state.score.player1,
            player2: self.state.score.player2,
            paddle_hits: self.paddle_hits,
            quit: self.quit,
        };
        log::info!(
            "Finished after {} ticks: {} - {} ({} paddle hits)",
            summary.ticks,
            summary.player1,
            summary.player2,
            summary.paddle_hits
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::input::{Key, NoInput, ScriptedEvent, ScriptedInput};
    use crate::sim::PaddleState;
    use glam::Vec2;

    #[derive(Default)]
    struct RecordingAudio {
        played: Vec<SoundEffect>,
        music_starts: u32,
    }

    impl AudioSink for RecordingAudio {
        fn play(&mut self, effect: SoundEffect) {
            self.played.push(effect);
        }

        fn start_music(&mut self) {
            self.music_starts += 1;
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<Frame>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, frame: &Frame) -> io::Result<()> {
            self.frames.push(frame.clone());
            Ok(())
        }
    }

    fn game<I: InputSource>(input: I) -> Game<I, RecordingAudio, RecordingRenderer> {
        Game::new(
            &Settings::default(),
            input,
            RecordingAudio::default(),
            RecordingRenderer::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_first_frame_draws_score_and_starts_music() {
        let mut g = game(NoInput);
        g.step().unwrap();
        g.step().unwrap();

        assert_eq!(g.audio().music_starts, 1);
        let frames = &g.renderer().frames;
        assert_eq!(frames.len(), 2);
        assert!(frames[0].score_dirty);
        assert!(!frames[1].score_dirty);
    }

    #[test]
    fn test_goal_fires_cue_and_redraw_once() {
        let mut g = game(NoInput);
        g.step().unwrap();
        {
            let state = g.state_mut();
            state.ball.rect.pos = Vec2::new(ARENA_WIDTH - 1.0 - BALL_SIZE, 40.0);
            state.ball.velocity.angle = 0.0;
        }

        let report = g.step().unwrap();
        assert!(report.score_changed);
        assert_eq!(g.audio().played, vec![SoundEffect::ScoreChanged]);
        let last = g.renderer().frames.last().unwrap();
        assert!(last.score_dirty);
        assert_eq!((last.player1, last.player2), (1, 0));

        let report = g.step().unwrap();
        assert!(!report.score_changed);
        assert!(!g.renderer().frames.last().unwrap().score_dirty);
    }

    #[test]
    fn test_paddle_hit_plays_matching_cue() {
        let mut g = game(NoInput);
        {
            let state = g.state_mut();
            let y = state.left.rect.center().y - BALL_SIZE / 2.0;
            state.ball.rect.pos = Vec2::new(15.0, y);
            state.ball.velocity.angle = std::f32::consts::PI;
        }

        let report = g.step().unwrap();
        assert_eq!(report.outcome.paddle_hit, Some(Side::Left));
        assert_eq!(g.audio().played, vec![SoundEffect::Paddle1Hit]);
    }

    #[test]
    fn test_scripted_keys_drive_paddles_and_quit() {
        let script = ScriptedInput::new(vec![
            ScriptedEvent {
                tick: 0,
                event: InputEvent::Pressed(Key::Z),
            },
            ScriptedEvent {
                tick: 2,
                event: InputEvent::Released(Key::Z),
            },
            ScriptedEvent {
                tick: 4,
                event: InputEvent::Quit,
            },
        ]);
        let mut g = game(script);
        let start = g.state().left.rect.top();

        let summary = g.run(Some(100), false).unwrap();

        assert!(summary.quit);
        assert_eq!(summary.ticks, 4);
        assert_eq!(g.state().left.rect.top(), start + 2.0 * PADDLE_SPEED);
        assert_eq!(g.state().left.state, PaddleState::Still);
        assert!(g.is_quit());
    }

    #[test]
    fn test_run_stops_at_tick_limit() {
        let mut g = game(NoInput);
        let summary = g.run(Some(30), false).unwrap();
        assert_eq!(summary.ticks, 30);
        assert!(!summary.quit);
        assert_eq!(g.state().time_ticks, 30);
    }

    #[test]
    fn test_advance_runs_whole_ticks_only() {
        let mut g = game(NoInput);
        let dt = Settings::default().tick_dt();

        assert_eq!(g.advance(dt * 0.5).unwrap(), 0);
        assert_eq!(g.advance(dt * 0.6).unwrap(), 1);
        assert_eq!(g.advance(dt * 3.0).unwrap(), 3);
        assert_eq!(g.state().time_ticks, 4);

        // Large frame gaps are capped
        let ran = g.advance(1.0).unwrap();
        assert!(ran <= MAX_SUBSTEPS);
    }

    #[test]
    fn test_realtime_run_is_paced_by_accumulator() {
        let mut g = game(NoInput);
        let started = Instant::now();

        let summary = g.run(Some(3), true).unwrap();

        assert_eq!(summary.ticks, 3);
        assert_eq!(g.state().time_ticks, 3);
        // Three ticks at 60 Hz cannot finish in under two intervals
        assert!(started.elapsed() >= Duration::from_secs_f32(2.0 / TICK_RATE as f32));
    }

    #[test]
    fn test_realtime_run_stops_on_quit() {
        let script = ScriptedInput::new(vec![ScriptedEvent {
            tick: 2,
            event: InputEvent::Quit,
        }]);
        let mut g = game(script);

        let summary = g.run(Some(100), true).unwrap();

        assert!(summary.quit);
        assert_eq!(summary.ticks, 2);
        assert_eq!(g.state().time_ticks, 2);
    }

    #[test]
    fn test_advance_does_not_count_quit_tick() {
        let script = ScriptedInput::new(vec![ScriptedEvent {
            tick: 1,
            event: InputEvent::Quit,
        }]);
        let mut g = game(script);
        let dt = Settings::default().tick_dt();

        assert_eq!(g.advance(dt * 3.0).unwrap(), 1);
        assert!(g.is_quit());
        assert_eq!(g.advance(dt * 3.0).unwrap(), 0);
    }

    #[test]
    fn test_score_label_positions() {
        let arena = Arena::new(ARENA_WIDTH, ARENA_HEIGHT).unwrap();
        assert_eq!(score_label_x(&arena, Side::Left), 220.0);
        assert_eq!(score_label_x(&arena, Side::Right), 420.0);
    }

    #[test]
    fn test_text_renderer_writes_only_dirty_scores() {
        let state = GameState::new(&Settings::default()).unwrap();
        let mut renderer = TextRenderer::new(Vec::new());
        renderer.render(&Frame::capture(&state, true)).unwrap();
        renderer.render(&Frame::capture(&state, false)).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("0 : 0"));
    }
}
