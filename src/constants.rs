use crossterm::style::Color;

// --- Game Constants ---
pub const INITIAL_SPAWN_INTERVAL: u64 = 100; // Frames per enemy spawn
pub const MIN_SPAWN_INTERVAL: u64 = 20;
pub const SPAWN_INTERVAL_DECREASE: u64 = 2; // Per kill
pub const INITIAL_SPEED_MULTIPLIER: f64 = 1.0;
pub const SPEED_MULTIPLIER_INCREASE: f64 = 0.025; // Per kill

pub const SHIP_RADIUS: f64 = 15.0;
pub const SHIP_SPEED: f64 = 10.0;
pub const SHIP_BOTTOM_MARGIN: f64 = 30.0;
pub const SHIP_OFFSCREEN: f64 = -100.0;

pub const PROJECTILE_WIDTH: f64 = 6.0;
pub const PROJECTILE_HEIGHT: f64 = 20.0;
pub const PROJECTILE_SPEED: f64 = 15.0;
pub const PROJECTILE_SPAWN_OFFSET: f64 = 50.0; // Above the playfield bottom
pub const FIRE_COOLDOWN_FRAMES: u64 = 10;

pub const ENEMY_RADIUS: f64 = 20.0;
pub const ENEMY_SPEED: f64 = 2.0;
pub const ENEMY_DRAW_SIZE: f64 = 30.0; // Drawn smaller than its hitbox

pub const SCORE_NUMERATOR: f64 = 500.0;

pub const REACTIVATION_DELAY_MS: u64 = 2000;

// --- Colors ---
pub const BACKGROUND_COLOR: Color = Color::Rgb { r: 0x20, g: 0x27, b: 0x35 };
pub const SHIP_COLOR: Color = Color::White;
pub const PROJECTILE_COLOR: Color = Color::White;
pub const ENEMY_COLOR: Color = Color::Red;
pub const SHIP_HITBOX_COLOR: Color = Color::Red;
pub const ENEMY_HITBOX_COLOR: Color = Color::Rgb { r: 0x87, g: 0xce, b: 0xeb };

// --- Terminal host ---
pub const CELL_WIDTH_PX: f64 = 10.0; // Playfield pixels per terminal column
pub const CELL_HEIGHT_PX: f64 = 20.0; // Playfield pixels per terminal row
pub const FRAME_DURATION_MS: u64 = 16; // ~60 FPS
pub const HOLD_WINDOW_FRAMES: u64 = 8; // Silence before a held key counts as released
pub const DEBUG_DEFAULT_WIDTH: u16 = 80;
pub const DEBUG_DEFAULT_HEIGHT: u16 = 24;
pub const DEBUG_DEFAULT_FRAMES: u64 = 300;
pub const LOG_FILE: &str = "arcade-shooter.log";
