use std::io::{self, Write};
use std::time::{Duration, Instant};
use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{Color, ResetColor, SetForegroundColor},
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use log::{error, info};

use crate::constants::FRAME_DURATION_MS;
use crate::game::GameLoop;
use crate::input::KeyTracker;
use crate::rendering::{GameGrid, Hud, OutputTarget, ScoreDisplay, ScreenBuffer, Surface};
use crate::scheduler::{FrameClock, FrameScheduler};
use crate::terminal_io::SimulatedInput;

const START_PROMPT: &str = "Press ENTER to start";
const PAUSED_BANNER: &str = "PAUSED";
const CONTROLS_HINT: &str = "<- -> : Move   SPACE : Fire   P : Pause   Q : Quit";

/// Terminal host around the game loop: owns the surface, HUD, clock and
/// input translation, and pumps frames until the player quits.
pub struct App {
    pub game: GameLoop,
    pub grid: GameGrid,
    pub hud: Hud,
    pub clock: FrameClock,
    pub stdout_target: OutputTarget,
    keys: KeyTracker,
    rng: Box<dyn RngCore>,
    simulated_input: Option<SimulatedInput>,
    debug_mode_active: bool,
    max_frames: Option<u64>,
    running: bool,
    host_frame: u64,
}

impl App {
    /// Interactive session on the real terminal.
    pub fn interactive(columns: u16, rows: u16, keyboard_enhanced: bool, max_frames: Option<u64>) -> Self {
        App::new(
            columns,
            rows,
            OutputTarget::Stdout(io::stdout()),
            KeyTracker::new(!keyboard_enhanced),
            Box::new(rand::thread_rng()),
            None,
            max_frames,
        )
    }

    /// Headless session rendering into a `ScreenBuffer` with scripted input and
    /// a seeded RNG, advancing the clock by a fixed step each frame. Hitboxes
    /// are painted under the ship and enemies.
    pub fn headless(columns: u16, rows: u16, script: SimulatedInput, seed: u64, max_frames: u64) -> Self {
        App::new(
            columns,
            rows,
            OutputTarget::ScreenBuffer(ScreenBuffer::new(columns, rows)),
            KeyTracker::new(false),
            Box::new(StdRng::seed_from_u64(seed)),
            Some(script),
            Some(max_frames),
        )
    }

    fn new(
        columns: u16,
        rows: u16,
        stdout_target: OutputTarget,
        keys: KeyTracker,
        rng: Box<dyn RngCore>,
        simulated_input: Option<SimulatedInput>,
        max_frames: Option<u64>,
    ) -> Self {
        let debug_mode_active = simulated_input.is_some();
        let mut game = GameLoop::new();
        game.show_hitboxes = debug_mode_active;
        App {
            game,
            grid: GameGrid::new(columns, rows),
            hud: Hud::new(),
            clock: FrameClock::new(),
            stdout_target,
            keys,
            rng,
            simulated_input,
            debug_mode_active,
            max_frames,
            running: true,
            host_frame: 0,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        info!("Entering frame loop.");
        let frame_duration = Duration::from_millis(FRAME_DURATION_MS);
        let mut previous_frame_start = Instant::now();

        // The loop is a chain: each tick asks for the next one.
        self.clock.schedule_next_frame();

        while self.running && self.max_frames.is_none_or(|max| self.host_frame < max) {
            let frame_start = Instant::now();

            for event in self.poll_events()? {
                self.handle_event(event);
            }
            for input in self.keys.expire(self.host_frame) {
                self.game.handle_input(input);
            }

            let elapsed = if self.debug_mode_active {
                frame_duration
            } else {
                frame_start.duration_since(previous_frame_start)
            };
            previous_frame_start = frame_start;
            self.step(elapsed);

            self.render()?;
            self.host_frame += 1;

            if !self.debug_mode_active {
                let spent = frame_start.elapsed();
                if spent < frame_duration {
                    std::thread::sleep(frame_duration - spent);
                }
            }
        }

        info!("Frame loop ended after {} frames. Final score: {}", self.host_frame, self.game.score);
        Ok(())
    }

    /// Advances the clock, fires due timers, then runs the requested tick.
    pub fn step(&mut self, elapsed: Duration) {
        self.clock.advance(elapsed);
        for task in self.clock.take_due() {
            self.game.run_deferred(task, &mut self.hud);
        }
        if self.clock.take_frame_request() {
            self.game.tick(&mut self.grid, &mut self.clock, &mut self.hud, &mut self.rng);
        }
    }

    fn poll_events(&mut self) -> io::Result<Vec<Event>> {
        if let Some(sim_input) = &mut self.simulated_input {
            return Ok(sim_input.take(self.host_frame));
        }
        let mut events = Vec::new();
        while event::poll(Duration::ZERO).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
            events.push(event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?);
        }
        Ok(events)
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                if key_event.kind == KeyEventKind::Press {
                    self.handle_control_key(key_event);
                }
                if let Some(input) = self.keys.on_key_event(key_event, self.host_frame) {
                    self.game.handle_input(input);
                }
            }
            Event::Resize(new_width, new_height) => {
                info!("Terminal resized to {}x{}", new_width, new_height);
                self.grid.resize(new_width, new_height);
                if let OutputTarget::ScreenBuffer(sb) = &mut self.stdout_target {
                    *sb = ScreenBuffer::new(new_width, new_height);
                }
            }
            _ => {}
        }
    }

    fn handle_control_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                info!("Quit key pressed. Exiting frame loop.");
                self.running = false;
            }
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                info!("Ctrl-C pressed. Exiting frame loop.");
                self.running = false;
            }
            KeyCode::Enter if !self.game.started => {
                self.game.start(self.grid.playfield());
                self.hud.reveal();
                self.hud.show_score(self.game.score);
            }
            KeyCode::Char('p') | KeyCode::Char('P') if self.game.started => {
                if self.game.playing {
                    self.game.pause();
                } else {
                    self.game.resume();
                }
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.grid.render(&mut self.stdout_target).map_err(|e| { error!("Failed to render game grid: {}", e); e })?;
        self.hud.render(&mut self.stdout_target).map_err(|e| { error!("Failed to render score: {}", e); e })?;

        if !self.game.started {
            self.draw_centered(START_PROMPT, self.grid.rows / 2)?;
            self.draw_centered(CONTROLS_HINT, self.grid.rows / 2 + 2)?;
        } else if !self.game.playing {
            self.draw_centered(PAUSED_BANNER, self.grid.rows / 2)?;
        }

        self.stdout_target.flush().map_err(|e| { error!("Failed to flush stdout after rendering: {}", e); e })?;

        if let OutputTarget::ScreenBuffer(sb) = &self.stdout_target {
            sb.print_to_log();
        }
        Ok(())
    }

    fn draw_centered(&mut self, message: &str, row: u16) -> io::Result<()> {
        let x = (self.grid.columns / 2).saturating_sub(message.chars().count() as u16 / 2);
        self.stdout_target.execute_move_to(MoveTo(x, row))?;
        self.stdout_target.execute_other_command(SetForegroundColor(Color::White))?;
        write!(self.stdout_target, "{}", message)?;
        self.stdout_target.execute_other_command(ResetColor)?;
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn screen_text(&self, row: u16) -> Option<String> {
        match &self.stdout_target {
            OutputTarget::ScreenBuffer(sb) => Some(sb.row_text(row)),
            OutputTarget::Stdout(_) => None,
        }
    }
}
