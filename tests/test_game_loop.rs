use std::time::Duration;

use arcade_shooter::constants::{BACKGROUND_COLOR, ENEMY_COLOR, ENEMY_HITBOX_COLOR, SHIP_HITBOX_COLOR};
use arcade_shooter::entities::*;
use arcade_shooter::game::*;
use arcade_shooter::input::{InputEvent, Key};
use arcade_shooter::rendering::{GameGrid, Hud, Surface};
use arcade_shooter::scheduler::{DeferredTask, FrameClock};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// 80x30 cells = 800x600 playfield pixels.
struct Harness {
    game: GameLoop,
    grid: GameGrid,
    clock: FrameClock,
    hud: Hud,
    rng: StdRng,
}

impl Harness {
    fn new() -> Self {
        Harness {
            game: GameLoop::new(),
            grid: GameGrid::new(80, 30),
            clock: FrameClock::new(),
            hud: Hud::new(),
            rng: StdRng::seed_from_u64(42),
        }
    }

    /// Started game with the spawn cadence off its trigger frame.
    fn started() -> Self {
        let mut h = Harness::new();
        h.game.start(h.grid.playfield());
        h.game.frame_counter = 1;
        h
    }

    fn tick(&mut self) {
        self.game.tick(&mut self.grid, &mut self.clock, &mut self.hud, &mut self.rng);
    }

    fn wait(&mut self, millis: u64) {
        self.clock.advance(Duration::from_millis(millis));
        for task in self.clock.take_due() {
            self.game.run_deferred(task, &mut self.hud);
        }
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ── start ─────────────────────────────────────────────────────────────────────

#[test]
fn start_resets_difficulty_and_centers_ship() {
    let mut h = Harness::new();
    h.game.difficulty.speed_multiplier = 2.0;
    h.game.difficulty.spawn_interval = 40;
    h.game.enemies.push(Enemy::new(10.0, 10.0));

    h.game.start(h.grid.playfield());

    assert!(h.game.started);
    assert_eq!(h.game.difficulty, Difficulty::new());
    assert!(h.game.enemies.is_empty());
    assert_eq!(h.game.ship.body.position.x, 384.5);
    assert_eq!(h.game.ship.body.position.y, 555.0);
}

#[test]
fn start_twice_just_resets_again() {
    let mut h = Harness::started();
    h.game.score = 75;
    h.game.start(h.grid.playfield());
    assert!(h.game.started);
    assert_eq!(h.game.score, 75);
}

// ── spawning ──────────────────────────────────────────────────────────────────

#[test]
fn first_frame_seeds_exactly_one_enemy() {
    let mut h = Harness::new();
    h.tick();
    assert_eq!(h.game.enemies.len(), 1);
    assert_eq!(h.game.frame_counter, 1);
}

#[test]
fn enemies_spawn_on_interval() {
    let mut h = Harness::new();
    for _ in 0..250 {
        h.tick();
    }
    // Frames 0, 100 and 200.
    assert_eq!(h.game.enemies.len(), 3);
}

#[test]
fn destroyed_ship_stops_enemy_spawns() {
    let mut h = Harness::new();
    h.game.ship.deactivate();
    h.tick();
    assert!(h.game.enemies.is_empty());
}

// ── ship motion ───────────────────────────────────────────────────────────────

#[test]
fn ship_at_left_edge_is_clamped() {
    let mut h = Harness::started();
    h.game.ship.apply_x(0.0, h.grid.playfield());
    h.game.handle_input(InputEvent::down(Key::Left));
    h.tick();
    assert_eq!(h.game.ship.body.position.x, 0.0);
}

#[test]
fn ship_at_right_edge_is_clamped() {
    let mut h = Harness::started();
    h.game.ship.apply_x(765.0, h.grid.playfield());
    h.game.handle_input(InputEvent::down(Key::Right));
    h.tick();
    h.tick();
    assert_eq!(h.game.ship.body.position.x, 770.0);
}

#[test]
fn ship_is_not_clamped_before_start() {
    let mut h = Harness::new();
    h.game.handle_input(InputEvent::down(Key::Left));
    h.tick();
    assert_eq!(h.game.ship.body.position.x, -110.0);
}

#[test]
fn ship_moves_ten_pixels_per_frame() {
    let mut h = Harness::started();
    h.game.handle_input(InputEvent::down(Key::Right));
    for _ in 0..3 {
        h.tick();
    }
    assert_eq!(h.game.ship.body.position.x, 414.5);
}

// ── firing ────────────────────────────────────────────────────────────────────

#[test]
fn held_fire_spawns_one_projectile_every_ten_frames() {
    let mut h = Harness::started();
    h.game.handle_input(InputEvent::down(Key::Fire));
    for _ in 0..25 {
        h.tick();
    }
    assert_eq!(h.game.projectiles.len(), 3);
    assert_eq!(h.game.fire_cooldown_counter, 25);
}

#[test]
fn new_burst_fires_immediately() {
    let mut h = Harness::started();
    h.game.handle_input(InputEvent::down(Key::Fire));
    for _ in 0..3 {
        h.tick();
    }
    h.game.handle_input(InputEvent::up(Key::Fire));
    h.game.handle_input(InputEvent::down(Key::Fire));
    assert_eq!(h.game.fire_cooldown_counter, 0);
    h.tick();
    assert_eq!(h.game.projectiles.len(), 2);
}

#[test]
fn repeated_fire_down_keeps_the_burst_cadence() {
    let mut h = Harness::started();
    h.game.handle_input(InputEvent::down(Key::Fire));
    for _ in 0..5 {
        h.tick();
        h.game.handle_input(InputEvent::down(Key::Fire));
    }
    assert_eq!(h.game.fire_cooldown_counter, 5);
    for _ in 0..5 {
        h.tick();
    }
    assert_eq!(h.game.projectiles.len(), 2);
}

#[test]
fn projectile_fired_from_clamped_position() {
    let mut h = Harness::started();
    h.game.ship.apply_x(0.0, h.grid.playfield());
    h.game.handle_input(InputEvent::down(Key::Left));
    h.game.handle_input(InputEvent::down(Key::Fire));
    h.tick();
    // Spawned at 11.5 and already moved up one step.
    let projectile = &h.game.projectiles[0];
    assert_eq!(projectile.body.position.x, 11.5);
    assert_eq!(projectile.body.position.y, 535.0);
}

// ── projectile / enemy ────────────────────────────────────────────────────────

#[test]
fn shooting_enemy_in_ship_column_scores_and_ramps_difficulty() {
    let mut h = Harness::started();
    h.game.handle_input(InputEvent::down(Key::Fire));
    // Above the ship, inside the projectile's spawn box.
    h.game.enemies.push(Enemy::new(379.5, 512.0));

    h.tick();

    assert!(h.game.enemies.is_empty());
    assert!(h.game.projectiles.is_empty());
    assert!(h.game.ship.is_active());
    assert_eq!(h.game.score, 25);
    assert_eq!(h.hud.score, 25);
    assert!(approx_eq(h.game.difficulty.speed_multiplier, 1.025));
    assert_eq!(h.game.difficulty.spawn_interval, 98);
}

#[test]
fn each_projectile_kills_at_most_one_enemy() {
    let mut h = Harness::started();
    h.game.enemies.push(Enemy::new(100.0, 100.0));
    h.game.enemies.push(Enemy::new(110.0, 100.0));
    h.game.projectiles.push(Projectile::new(120.0, 110.0));

    h.tick();

    assert_eq!(h.game.score, 25);
    assert_eq!(h.game.enemies.len(), 1);
}

#[test]
fn several_kills_in_one_frame_all_count() {
    let mut h = Harness::started();
    for column in 0..3 {
        let x = 100.0 + column as f64 * 200.0;
        h.game.enemies.push(Enemy::new(x, 100.0));
        h.game.projectiles.push(Projectile::new(x + 10.0, 110.0));
    }

    h.tick();

    assert_eq!(h.game.score, 75);
    assert!(approx_eq(h.game.difficulty.speed_multiplier, 1.075));
    assert_eq!(h.game.difficulty.spawn_interval, 94);
}

#[test]
fn difficulty_ramps_linearly_and_interval_floors_at_twenty() {
    let mut difficulty = Difficulty::new();
    for kills in 1..=60u32 {
        difficulty.register_kill();
        assert!(approx_eq(difficulty.speed_multiplier, 1.0 + 0.025 * kills as f64));
        assert!(difficulty.spawn_interval >= 20);
    }
    assert_eq!(difficulty.spawn_interval, 20);
}

#[test]
fn spawn_interval_never_drops_below_floor_from_odd_values() {
    let mut difficulty = Difficulty::new();
    difficulty.spawn_interval = 21;
    difficulty.register_kill();
    assert_eq!(difficulty.spawn_interval, 20);
}

// ── ship / enemy ──────────────────────────────────────────────────────────────

#[test]
fn ship_collision_deactivates_and_schedules_one_reactivation() {
    let mut h = Harness::started();
    h.game.enemies.push(Enemy::new(384.5, 540.0));
    h.game.enemies.push(Enemy::new(370.0, 545.0));

    h.tick();

    assert!(!h.game.ship.is_active());
    assert_eq!(h.clock.pending_count(), 1);

    h.tick();
    assert_eq!(h.clock.pending_count(), 1);
}

#[test]
fn reactivation_after_two_seconds_resets_everything() {
    let mut h = Harness::started();
    h.game.score = 150;
    h.game.difficulty.speed_multiplier = 1.3;
    h.game.difficulty.spawn_interval = 60;
    h.game.enemies.push(Enemy::new(384.5, 540.0));

    h.tick();
    assert!(!h.game.ship.is_active());

    h.wait(1999);
    assert!(!h.game.ship.is_active());
    assert_eq!(h.game.score, 150);

    h.wait(1);
    assert!(h.game.ship.is_active());
    assert_eq!(h.game.score, 0);
    assert_eq!(h.hud.score, 0);
    assert_eq!(h.game.difficulty, Difficulty::new());
}

#[test]
fn stale_reactivation_is_ignored() {
    let mut h = Harness::started();
    h.game.enemies.push(Enemy::new(384.5, 540.0));
    h.tick();

    h.game.run_deferred(DeferredTask::ReactivateShip { generation: 99 }, &mut h.hud);
    assert!(!h.game.ship.is_active());
}

#[test]
fn destroyed_ship_is_not_drawn_and_ignores_fire() {
    let mut h = Harness::started();
    h.game.ship.deactivate();
    h.game.handle_input(InputEvent::down(Key::Fire));
    h.tick();
    assert!(h.game.projectiles.is_empty());

    let (col, row) = (39, 28); // Under the ship's resting box
    let cell = h.grid.cell(col, row).unwrap();
    assert_eq!(cell.glyph, ' ');
}

// ── cleanup & pause ───────────────────────────────────────────────────────────

#[test]
fn projectiles_past_the_top_are_pruned() {
    let mut h = Harness::started();
    h.game.projectiles.push(Projectile::new(10.0, -10.0));
    h.game.projectiles.push(Projectile::new(10.0, 10.0));
    h.tick();
    assert_eq!(h.game.projectiles.len(), 1);
    assert_eq!(h.game.projectiles[0].body.position.y, -5.0);
}

#[test]
fn enemies_past_the_bottom_are_pruned() {
    let mut h = Harness::started();
    h.game.enemies.push(Enemy::new(0.0, 638.0));
    h.game.enemies.push(Enemy::new(0.0, 637.0));
    h.tick();
    assert_eq!(h.game.enemies.len(), 1);
    assert_eq!(h.game.enemies[0].body.position.y, 639.0);
}

#[test]
fn enemies_fall_faster_as_difficulty_rises() {
    let mut h = Harness::started();
    h.game.difficulty.speed_multiplier = 2.0;
    h.game.enemies.push(Enemy::new(0.0, 0.0));
    h.tick();
    assert_eq!(h.game.enemies[0].body.position.y, 4.0);
}

#[test]
fn paused_loop_keeps_scheduling_but_does_not_advance() {
    let mut h = Harness::started();
    h.game.enemies.push(Enemy::new(0.0, 0.0));
    h.game.pause();

    h.tick();

    assert!(h.clock.take_frame_request());
    assert_eq!(h.game.frame_counter, 1);
    assert_eq!(h.game.enemies[0].body.position.y, 0.0);

    h.game.resume();
    h.tick();
    assert_eq!(h.game.frame_counter, 2);
}

#[test]
fn every_tick_requests_the_next_frame() {
    let mut h = Harness::new();
    h.tick();
    assert!(h.clock.take_frame_request());
    assert!(!h.clock.take_frame_request());
}

#[test]
fn active_entities_are_drawn() {
    let mut h = Harness::started();
    h.game.enemies.push(Enemy::new(200.0, 200.0));
    h.tick();
    // Enemy moved to y = 202: rows 10..12, columns 20..23.
    let cell = h.grid.cell(21, 10).unwrap();
    assert_eq!(cell.glyph, '█');
    // Ship wings at x 384.5..414.5, y 570..580.
    assert_eq!(h.grid.cell(39, 28).unwrap().glyph, '█');
}

#[test]
fn hitboxes_paint_the_full_collision_box_under_sprites() {
    let mut h = Harness::started();
    h.game.show_hitboxes = true;
    h.game.enemies.push(Enemy::new(200.0, 200.0));
    h.tick();

    // Sprite is 30x30 at (200, 202); the 40x40 box reaches column 23, row 12.
    assert_eq!(h.grid.cell(21, 10).unwrap().color, ENEMY_COLOR);
    assert_eq!(h.grid.cell(23, 12).unwrap().color, ENEMY_HITBOX_COLOR);
    // Ship box at (384.5, 555) shows in the wing-free top-left cell.
    assert_eq!(h.grid.cell(38, 27).unwrap().color, SHIP_HITBOX_COLOR);
}

#[test]
fn hitboxes_are_off_by_default() {
    let mut h = Harness::started();
    h.game.enemies.push(Enemy::new(200.0, 200.0));
    h.tick();
    assert_eq!(h.grid.cell(23, 12).unwrap().color, BACKGROUND_COLOR);
}
