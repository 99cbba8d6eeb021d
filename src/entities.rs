use crossterm::style::Color;

use crate::constants::*;
use crate::input::{InputEvent, Key, Transition};
use crate::rendering::Surface;
use crate::types::{Bounds, Playfield, Vector2D, clamp_coordinate};
use rand::Rng;
use log::debug;

/// State every entity carries: a top-left anchored box, a per-frame speed and
/// the active flag gating collision, movement and drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub position: Vector2D,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
    pub active: bool,
}

impl Body {
    pub fn new(x: f64, y: f64, width: f64, height: f64, speed: f64) -> Self {
        Body { position: Vector2D::new(x, y), width, height, speed, active: true }
    }
}

/// Movable, drawable, collidable.
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Displacement for one frame at the given difficulty multiplier.
    fn velocity(&self, speed_multiplier: f64) -> Vector2D;

    fn draw(&self, surface: &mut dyn Surface);

    fn bounds(&self) -> Bounds {
        let body = self.body();
        Bounds::new(body.position.x, body.position.y, body.width, body.height)
    }

    /// Fills the collision box, drawn underneath the sprite.
    fn draw_hitbox(&self, surface: &mut dyn Surface, color: Color) {
        let b = self.bounds();
        surface.fill_rect(b.x, b.y, b.width, b.height, color);
    }

    fn is_active(&self) -> bool {
        self.body().active
    }

    fn deactivate(&mut self) {
        self.body_mut().active = false;
    }

    fn next_position(&self, speed_multiplier: f64) -> Vector2D {
        self.body().position.add(self.velocity(speed_multiplier))
    }

    fn apply_position(&mut self, position: Vector2D) {
        self.body_mut().position = position;
    }
}

// --- Ship ---
#[derive(Clone, Debug)]
pub struct Ship {
    pub body: Body,
    pub radius: f64,
    pub moving_left: bool,
    pub moving_right: bool,
    pub firing: bool,
}

impl Ship {
    /// Parked off-screen until the game starts.
    pub fn new() -> Self {
        let size = SHIP_RADIUS * 2.0;
        Ship {
            body: Body::new(SHIP_OFFSCREEN, SHIP_OFFSCREEN, size, size, SHIP_SPEED),
            radius: SHIP_RADIUS,
            moving_left: false,
            moving_right: false,
            firing: false,
        }
    }

    pub fn resting_y(&self, playfield: Playfield) -> f64 {
        playfield.height - self.radius - SHIP_BOTTOM_MARGIN
    }

    /// Bottom-center of the playfield.
    pub fn reposition(&mut self, playfield: Playfield) {
        let x = playfield.width * 0.5 - self.radius - 0.5;
        let y = self.resting_y(playfield);
        self.apply_position(Vector2D::new(x, y));
    }

    /// Horizontal position for this frame. Clamping only applies once the
    /// game has started; before that the ship may sit off-screen.
    pub fn target_x(&self, playfield: Playfield, clamp: bool) -> f64 {
        let x = self.next_position(1.0).x;
        if clamp {
            clamp_coordinate(x, 0.0, playfield.width - self.body.width)
        } else {
            x
        }
    }

    /// Pins the ship to the resting row at `x`.
    pub fn apply_x(&mut self, x: f64, playfield: Playfield) {
        let y = self.resting_y(playfield);
        self.apply_position(Vector2D::new(x, y));
    }

    /// Left edge of a projectile fired from the center of a ship whose left
    /// edge is at `ship_x`.
    pub fn muzzle_x(&self, ship_x: f64) -> f64 {
        ship_x + self.radius - PROJECTILE_WIDTH / 2.0
    }

    pub fn reactivate(&mut self) {
        self.body.active = true;
    }

    /// Applies one key transition. Returns `true` when a firing burst starts.
    ///
    /// Key-downs are ignored while the ship is destroyed; key-ups always clear
    /// their flag so nothing stays latched across a respawn.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match event.transition {
            Transition::Down => {
                if !self.body.active {
                    return false;
                }
                match event.key {
                    Key::Right => self.moving_right = true,
                    Key::Left => self.moving_left = true,
                    Key::Fire => {
                        if !self.firing {
                            self.firing = true;
                            return true;
                        }
                    }
                }
            }
            Transition::Up => match event.key {
                Key::Right => self.moving_right = false,
                Key::Left => self.moving_left = false,
                Key::Fire => self.firing = false,
            },
        }
        false
    }
}

impl Default for Ship {
    fn default() -> Self {
        Ship::new()
    }
}

impl Entity for Ship {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn velocity(&self, _speed_multiplier: f64) -> Vector2D {
        if self.moving_left {
            Vector2D::new(-self.body.speed, 0.0)
        } else if self.moving_right {
            Vector2D::new(self.body.speed, 0.0)
        } else {
            Vector2D::new(0.0, 0.0)
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let Vector2D { x, y } = self.body.position;
        // Nose, then wings.
        surface.fill_rect(x + self.radius - 5.0, y, 10.0, self.radius, SHIP_COLOR);
        surface.fill_rect(x, y + self.radius, self.body.width, 10.0, SHIP_COLOR);
    }
}

// --- Projectile ---
#[derive(Clone, Debug)]
pub struct Projectile {
    pub body: Body,
}

impl Projectile {
    pub fn new(x: f64, y: f64) -> Self {
        Projectile {
            body: Body::new(x, y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT, PROJECTILE_SPEED),
        }
    }

    pub fn fired_from(muzzle_x: f64, playfield: Playfield) -> Self {
        let x = muzzle_x - 0.5;
        let y = playfield.height - PROJECTILE_SPAWN_OFFSET;
        debug!("Projectile fired at x: {}, y: {}", x, y);
        Projectile::new(x, y)
    }

    pub fn is_off_screen(&self) -> bool {
        self.body.position.y <= -self.body.height
    }
}

impl Entity for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn velocity(&self, _speed_multiplier: f64) -> Vector2D {
        Vector2D::new(0.0, -self.body.speed)
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let Body { position, width, height, .. } = self.body;
        surface.fill_rect(position.x, position.y, width, height, PROJECTILE_COLOR);
    }
}

// --- Enemy ---
#[derive(Clone, Debug)]
pub struct Enemy {
    pub body: Body,
    pub radius: f64,
}

impl Enemy {
    pub fn new(x: f64, y: f64) -> Self {
        let size = ENEMY_RADIUS * 2.0;
        Enemy {
            body: Body::new(x, y, size, size, ENEMY_SPEED),
            radius: ENEMY_RADIUS,
        }
    }

    /// Random column just above the top edge.
    pub fn spawn(playfield: Playfield, rng: &mut impl Rng) -> Self {
        let size = ENEMY_RADIUS * 2.0;
        let max_x = (playfield.width - size).floor().max(0.0) as i64;
        let x = rng.gen_range(0..=max_x) as f64;
        debug!("New enemy spawned at x: {}", x);
        Enemy::new(x, -size)
    }

    pub fn is_off_screen(&self, playfield: Playfield) -> bool {
        self.body.position.y >= playfield.height + self.body.width
    }
}

impl Entity for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn velocity(&self, speed_multiplier: f64) -> Vector2D {
        Vector2D::new(0.0, self.body.speed * speed_multiplier)
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let Vector2D { x, y } = self.body.position;
        surface.fill_rect(x, y, ENEMY_DRAW_SIZE, ENEMY_DRAW_SIZE, ENEMY_COLOR);
    }
}
