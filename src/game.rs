use std::time::Duration;
use rand::Rng;
use log::{debug, info};

use crate::collision::{collides, score_delta};
use crate::constants::*;
use crate::entities::{Enemy, Entity, Projectile, Ship};
use crate::input::InputEvent;
use crate::rendering::{ScoreDisplay, Surface};
use crate::scheduler::{DeferredTask, FrameScheduler};
use crate::types::Playfield;

/// Difficulty knobs that ramp with every kill and snap back on respawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Difficulty {
    pub speed_multiplier: f64,
    pub spawn_interval: u64,
}

impl Difficulty {
    pub fn new() -> Self {
        Difficulty {
            speed_multiplier: INITIAL_SPEED_MULTIPLIER,
            spawn_interval: INITIAL_SPAWN_INTERVAL,
        }
    }

    pub fn register_kill(&mut self) {
        self.speed_multiplier += SPEED_MULTIPLIER_INCREASE;
        if self.spawn_interval > MIN_SPAWN_INTERVAL {
            self.spawn_interval = self
                .spawn_interval
                .saturating_sub(SPAWN_INTERVAL_DECREASE)
                .max(MIN_SPAWN_INTERVAL);
        }
    }

    pub fn reset(&mut self) {
        *self = Difficulty::new();
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::new()
    }
}

/// Owns every entity and all simulation state. Advanced one frame per
/// [`GameLoop::tick`]; never blocks.
pub struct GameLoop {
    pub ship: Ship,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub score: u32,
    pub difficulty: Difficulty,
    pub frame_counter: u64,
    pub fire_cooldown_counter: u64,
    pub playing: bool,
    pub started: bool,
    /// Paints collision boxes under the ship and enemies.
    pub show_hitboxes: bool,
    deactivation_generation: u64,
}

impl GameLoop {
    /// The loop plays in attract mode from the first frame; `start` hands
    /// control to the player.
    pub fn new() -> Self {
        GameLoop {
            ship: Ship::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            score: 0,
            difficulty: Difficulty::new(),
            frame_counter: 0,
            fire_cooldown_counter: 0,
            playing: true,
            started: false,
            show_hitboxes: false,
            deactivation_generation: 0,
        }
    }

    pub fn start(&mut self, playfield: Playfield) {
        info!("Starting game on a {}x{} playfield.", playfield.width, playfield.height);
        self.difficulty.reset();
        self.enemies.clear();
        self.ship.reposition(playfield);
        self.started = true;
    }

    pub fn pause(&mut self) {
        info!("Game paused at frame {}.", self.frame_counter);
        self.playing = false;
    }

    pub fn resume(&mut self) {
        info!("Game resumed at frame {}.", self.frame_counter);
        self.playing = true;
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        if self.ship.handle_input(event) {
            self.fire_cooldown_counter = 0;
        }
    }

    /// Advances the simulation by exactly one frame and draws it.
    pub fn tick(
        &mut self,
        surface: &mut dyn Surface,
        scheduler: &mut dyn FrameScheduler,
        score_display: &mut dyn ScoreDisplay,
        rng: &mut impl Rng,
    ) {
        if self.playing {
            let playfield = surface.playfield();

            if self.frame_counter % self.difficulty.spawn_interval == 0 && self.ship.is_active() {
                self.enemies.push(Enemy::spawn(playfield, rng));
            }

            surface.fill_background(BACKGROUND_COLOR);

            let ship_x = self.ship.target_x(playfield, self.started);

            if self.ship.is_active()
                && self.ship.firing
                && self.fire_cooldown_counter % FIRE_COOLDOWN_FRAMES == 0
            {
                let muzzle_x = self.ship.muzzle_x(ship_x);
                self.projectiles.push(Projectile::fired_from(muzzle_x, playfield));
            }

            if self.ship.is_active() {
                self.ship.apply_x(ship_x, playfield);
                if self.show_hitboxes {
                    self.ship.draw_hitbox(surface, SHIP_HITBOX_COLOR);
                }
                self.ship.draw(surface);
            }

            self.handle_ship_collisions(scheduler);
            self.handle_projectile_collisions(score_display);
            self.advance_and_draw(surface);
            self.cleanup(playfield);

            if self.ship.firing {
                self.fire_cooldown_counter += 1;
            }
            self.frame_counter += 1;
        }

        scheduler.schedule_next_frame();
    }

    /// Runs a task the scheduler has found due.
    pub fn run_deferred(&mut self, task: DeferredTask, score_display: &mut dyn ScoreDisplay) {
        match task {
            DeferredTask::ReactivateShip { generation } => {
                if generation != self.deactivation_generation {
                    debug!("Ignoring stale reactivation (generation {}).", generation);
                    return;
                }
                self.ship.reactivate();
                self.difficulty.reset();
                self.score = 0;
                score_display.show_score(self.score);
                info!("Ship reactivated. Score and difficulty reset.");
            }
        }
    }

    fn handle_ship_collisions(&mut self, scheduler: &mut dyn FrameScheduler) {
        for enemy in &self.enemies {
            if collides(&self.ship, enemy) {
                self.ship.deactivate();
                self.deactivation_generation += 1;
                scheduler.schedule_delayed(
                    DeferredTask::ReactivateShip { generation: self.deactivation_generation },
                    Duration::from_millis(REACTIVATION_DELAY_MS),
                );
                info!("Ship destroyed by enemy at x: {}, y: {}", enemy.body.position.x, enemy.body.position.y);
            }
        }
    }

    fn handle_projectile_collisions(&mut self, score_display: &mut dyn ScoreDisplay) {
        for enemy in self.enemies.iter_mut() {
            for projectile in self.projectiles.iter_mut() {
                if collides(&*projectile, &*enemy) {
                    enemy.deactivate();
                    projectile.deactivate();
                    self.difficulty.register_kill();
                    self.score += score_delta(enemy.radius);
                    score_display.show_score(self.score);
                    info!(
                        "Enemy destroyed. Score: {}, speed multiplier: {:.3}, spawn interval: {}",
                        self.score, self.difficulty.speed_multiplier, self.difficulty.spawn_interval
                    );
                }
            }
        }
    }

    fn advance_and_draw(&mut self, surface: &mut dyn Surface) {
        let speed_multiplier = self.difficulty.speed_multiplier;
        for projectile in self.projectiles.iter_mut().filter(|p| p.is_active()) {
            let next = projectile.next_position(speed_multiplier);
            projectile.apply_position(next);
            projectile.draw(surface);
        }
        for enemy in self.enemies.iter_mut().filter(|e| e.is_active()) {
            let next = enemy.next_position(speed_multiplier);
            enemy.apply_position(next);
            if self.show_hitboxes {
                enemy.draw_hitbox(surface, ENEMY_HITBOX_COLOR);
            }
            enemy.draw(surface);
        }
    }

    fn cleanup(&mut self, playfield: Playfield) {
        self.enemies.retain(|enemy| enemy.is_active() && !enemy.is_off_screen(playfield));
        self.projectiles.retain(|projectile| projectile.is_active() && !projectile.is_off_screen());
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        GameLoop::new()
    }
}
