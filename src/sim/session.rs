//! Session orchestration
//!
//! The session owns every entity, the score and the lives counter. Each
//! entity advances on its own scheduled task; the session routes those tasks,
//! applies collision outcomes and drives the Idle/Playing/GameOver phases.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{circles_collide, escape_axis};
use super::{Command, EntityId, Obstacle, Projectile, ProjectileState, Ship, SizeClass, Task};
use crate::consts::*;
use crate::error::ConfigError;
use crate::platform::{Display, ShapeHandle, ShapeStyle, Surface, TextTag, Timer, TimerToken};
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, no ship
    Idle,
    /// Ship in play
    Playing,
    /// Last life lost, no ship
    GameOver,
}

/// Serializable summary of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub time_ms: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    pub obstacles: usize,
    pub projectiles: usize,
    pub ship_nose: Option<Vec2>,
}

/// One game instance bound to a display/timer surface
#[derive(Debug)]
pub struct Session<S: Surface> {
    surface: S,
    settings: Settings,
    rng: Pcg32,
    phase: GamePhase,
    score: u64,
    lives: u32,
    ship: Option<Ship>,
    /// Live obstacles in spawn order
    obstacles: Vec<Obstacle>,
    life_icons: Vec<ShapeHandle>,
    spawn_job: Option<TimerToken>,
    next_id: EntityId,
}

impl<S: Surface> Session<S> {
    /// Create an idle session; the spawner starts immediately
    pub fn new(mut surface: S, settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        surface.notify_text(TextTag::Status, TITLE_TEXT);
        surface.notify_text(TextTag::Score, "");
        let spawn_job = Some(surface.schedule(settings.spawn_period_ms, Task::SpawnTick));
        log::info!("Session created (seed {seed})");

        Ok(Self {
            surface,
            settings,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            lives: 0,
            ship: None,
            obstacles: Vec::new(),
            life_icons: Vec::new(),
            spawn_job,
            next_id: 1,
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn ship(&self) -> Option<&Ship> {
        self.ship.as_ref()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            time_ms: self.surface.now(),
            phase: self.phase,
            score: self.score,
            lives: self.lives,
            obstacles: self.obstacles.len(),
            projectiles: self.ship.as_ref().map_or(0, |s| s.projectiles.len()),
            ship_nose: self.ship.as_ref().map(Ship::nose),
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // --- Event loop ---

    /// Run every task due up to `deadline`, then move the clock there
    pub fn run_until(&mut self, deadline: u64) {
        while let Some(task) = self.surface.pop_due(deadline) {
            self.dispatch(task);
        }
        self.surface.advance_to(deadline);
    }

    /// Run the next `duration_ms` of simulated time
    pub fn run_for(&mut self, duration_ms: u64) {
        let deadline = self.surface.now() + duration_ms;
        self.run_until(deadline);
    }

    /// Route a fired task to its entity. Tasks for removed entities are ignored.
    pub fn dispatch(&mut self, task: Task) {
        match task {
            Task::ShipTick => self.advance_ship(),
            Task::ObstacleTick(id) => self.advance_obstacle(id),
            Task::ProjectileTick(id) => self.advance_projectile(id),
            Task::SpawnTick => self.spawn_tick(),
        }
    }

    /// Apply player input
    pub fn handle_command(&mut self, command: Command) {
        if command == Command::Start {
            self.start();
            return;
        }

        let now = self.surface.now();
        let Some(ship) = self.ship.as_mut() else {
            return;
        };
        match command {
            Command::RotateLeft => {
                ship.rotate_left();
                self.surface.update_shape(ship.shape, &ship.points);
            }
            Command::RotateRight => {
                ship.rotate_right();
                self.surface.update_shape(ship.shape, &ship.points);
            }
            Command::SpeedUp => ship.speed_up(),
            Command::SlowDown => {
                ship.slow_down(now, self.settings.slow_cooldown_ms);
            }
            Command::Fire => {
                self.fire();
            }
            Command::Start => {}
        }
    }

    // --- Phase and bookkeeping ---

    /// Begin a game from Idle or GameOver. Returns false while already playing.
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::Playing {
            return false;
        }

        self.clear_obstacles();
        self.remove_ship();
        for icon in self.life_icons.drain(..) {
            self.surface.destroy_shape(icon);
        }

        self.score = 0;
        self.lives = self.settings.starting_lives;

        let shape = self.surface.create_shape(&SHIP_START_SHAPE, ShapeStyle::Ship);
        let mut ship = Ship::new(shape);
        ship.job = Some(self.surface.schedule(SHIP_TICK_MS, Task::ShipTick));
        self.ship = Some(ship);

        self.surface.notify_text(TextTag::Score, "0");
        self.surface.notify_text(TextTag::Status, "");
        self.draw_life_icons();

        self.phase = GamePhase::Playing;
        log::info!("Game started with {} lives", self.lives);
        true
    }

    /// Tear down every entity and stop the spawner. Nothing stays scheduled.
    pub fn shutdown(&mut self) {
        if let Some(job) = self.spawn_job.take() {
            self.surface.cancel(job);
        }
        self.clear_obstacles();
        self.remove_ship();
        for icon in self.life_icons.drain(..) {
            self.surface.destroy_shape(icon);
        }
        log::info!("Session shut down with score {}", self.score);
    }

    /// Add points and refresh the score text
    pub fn update_score(&mut self, delta: u64) {
        self.score += delta;
        self.surface
            .notify_text(TextTag::Score, &self.score.to_string());
    }

    /// Spend a life. Returns whether the ship should be recreated; with no
    /// lives left the session moves to GameOver instead.
    /// Does nothing outside Playing.
    pub fn decrease_life(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        if self.lives > 0 {
            self.lives -= 1;
            if let Some(icon) = self.life_icons.pop() {
                self.surface.destroy_shape(icon);
            }
            log::debug!("Life lost, {} remaining", self.lives);
            true
        } else {
            self.phase = GamePhase::GameOver;
            self.surface.notify_text(TextTag::Status, GAME_OVER_TEXT);
            self.surface.notify_text(TextTag::Score, "");
            log::info!("Game over with score {}", self.score);
            false
        }
    }

    /// Put the ship back at its initial pose, or remove it for good
    pub fn reset_ship(&mut self, recreate: bool) {
        if !recreate {
            self.remove_ship();
            return;
        }
        let Some(ship) = self.ship.as_mut() else {
            return;
        };
        self.surface.destroy_shape(ship.shape);
        ship.reset_pose();
        ship.shape = self
            .surface
            .create_shape(&ship.points, ShapeStyle::RespawnedShip);
    }

    fn draw_life_icons(&mut self) {
        for i in 0..self.lives {
            let origin = LIFE_ICON_ORIGIN + Vec2::new(LIFE_ICON_SPACING * i as f32, 0.0);
            let points = [
                origin,
                origin + Vec2::new(-15.0, 20.0),
                origin + Vec2::new(0.0, 15.0),
                origin + Vec2::new(15.0, 20.0),
            ];
            let icon = self.surface.create_shape(&points, ShapeStyle::LifeIcon);
            self.life_icons.push(icon);
        }
    }

    /// Drop the ship and everything it fired, cancelling pending ticks first
    fn remove_ship(&mut self) {
        let Some(ship) = self.ship.take() else {
            return;
        };
        if let Some(job) = ship.job {
            self.surface.cancel(job);
        }
        self.surface.destroy_shape(ship.shape);
        for projectile in ship.projectiles {
            if let Some(job) = projectile.job {
                self.surface.cancel(job);
            }
            self.surface.destroy_shape(projectile.shape);
        }
    }

    fn clear_obstacles(&mut self) {
        for obstacle in self.obstacles.drain(..) {
            if let Some(job) = obstacle.job {
                self.surface.cancel(job);
            }
            self.surface.destroy_shape(obstacle.shape);
        }
    }

    // --- Spawning ---

    /// Periodic spawn attempt; always reschedules itself
    pub fn spawn_tick(&mut self) {
        if self.obstacles.len() >= self.settings.max_obstacles {
            log::debug!("Spawner deferred: {} obstacles live", self.obstacles.len());
        } else {
            self.spawn_random_obstacle();
        }
        self.spawn_job = Some(
            self.surface
                .schedule(self.settings.spawn_period_ms, Task::SpawnTick),
        );
    }

    /// Pick an edge, a point along it and an inbound heading, then spawn
    fn spawn_random_obstacle(&mut self) -> EntityId {
        let bounds = self.surface.bounds();
        let max_x = (bounds.x as i32 - 10).max(0);
        let max_y = (bounds.y as i32 - 10).max(0);

        let side: u8 = self.rng.random_range(0..4);
        let step: i32 = self.rng.random_range(0..18);
        let (start, base_deg) = match side {
            0 => {
                let y = self.rng.random_range(0..=max_y);
                (Vec2::new(10.0, y as f32), -90)
            }
            1 => {
                let x = self.rng.random_range(0..=max_x);
                (Vec2::new(x as f32, 50.0), 0)
            }
            2 => {
                let y = self.rng.random_range(0..=max_y);
                (Vec2::new(bounds.x - 50.0, y as f32), 90)
            }
            _ => {
                let x = self.rng.random_range(0..=max_x);
                (Vec2::new(x as f32, bounds.y - 50.0), 180)
            }
        };
        let heading = ((base_deg + step * 10) as f32).to_radians();

        let size = SizeClass::ALL[self.rng.random_range(0..SizeClass::ALL.len())];
        let speed = self.random_speed();
        self.spawn_obstacle(start, heading, size, speed)
    }

    fn random_speed(&mut self) -> u32 {
        let speeds = &self.settings.speeds;
        if speeds.is_empty() {
            return 1;
        }
        let idx = self.rng.random_range(0..speeds.len());
        speeds[idx]
    }

    /// Register a new obstacle with its outline starting at `start`
    pub fn spawn_obstacle(
        &mut self,
        start: Vec2,
        heading: f32,
        size: SizeClass,
        speed: u32,
    ) -> EntityId {
        let id = self.next_entity_id();
        let points = Obstacle::spawn_outline(start, size, heading);
        let shape = self.surface.create_shape(&points, ShapeStyle::Obstacle);
        let mut obstacle = Obstacle::new(id, size, heading, speed, points, shape);
        obstacle.job = Some(
            self.surface
                .schedule(OBSTACLE_FIRST_TICK_MS, Task::ObstacleTick(id)),
        );
        self.obstacles.push(obstacle);
        log::debug!("Spawned {size:?} obstacle {id} at {start} (speed {speed})");
        id
    }

    // --- Entity steps ---

    /// Launch a projectile from the ship's nose if the gun has cooled down
    fn fire(&mut self) -> bool {
        let now = self.surface.now();
        let cooldown = self.settings.fire_cooldown_ms;
        let Some((origin, heading)) = self
            .ship
            .as_mut()
            .and_then(|ship| ship.try_fire(now, cooldown))
        else {
            return false;
        };

        let id = self.next_entity_id();
        let corners = Projectile::corners_at(origin);
        let shape = self.surface.create_shape(&corners, ShapeStyle::Projectile);
        let mut projectile =
            Projectile::new(id, origin, heading, self.settings.projectile_range, shape);
        projectile.job = Some(
            self.surface
                .schedule(PROJECTILE_TICK_MS, Task::ProjectileTick(id)),
        );
        if let Some(ship) = self.ship.as_mut() {
            ship.projectiles.push(projectile);
        }
        self.surface.notify_audio_cue();
        true
    }

    fn advance_ship(&mut self) {
        let bounds = self.surface.bounds();
        let Some(ship) = self.ship.as_mut() else {
            return;
        };
        ship.step(bounds);
        self.surface.update_shape(ship.shape, &ship.points);
        ship.job = Some(self.surface.schedule(SHIP_TICK_MS, Task::ShipTick));
    }

    fn advance_projectile(&mut self, id: EntityId) {
        let bounds = self.surface.bounds();
        let Some(ship) = self.ship.as_mut() else {
            return;
        };
        let Some(idx) = ship.projectiles.iter().position(|p| p.id == id) else {
            return;
        };

        match ship.projectiles[idx].step(bounds) {
            ProjectileState::Traveling => {
                let projectile = &mut ship.projectiles[idx];
                self.surface
                    .update_shape(projectile.shape, &projectile.corners);
                projectile.job = Some(
                    self.surface
                        .schedule(PROJECTILE_TICK_MS, Task::ProjectileTick(id)),
                );
            }
            state @ (ProjectileState::Expired | ProjectileState::OffScreen) => {
                let projectile = ship.projectiles.remove(idx);
                self.surface.destroy_shape(projectile.shape);
                log::debug!("Projectile {id} removed: {state:?}");
            }
        }
    }

    /// Bounds check, ship check, drift, projectile check, reschedule
    fn advance_obstacle(&mut self, id: EntityId) {
        let Some(idx) = self.obstacles.iter().position(|o| o.id == id) else {
            return;
        };
        let bounds = self.surface.bounds();
        self.obstacles[idx].job = None;

        if let Some(axis) = escape_axis(&self.obstacles[idx].points, bounds) {
            let obstacle = self.obstacles.remove(idx);
            self.surface.destroy_shape(obstacle.shape);
            log::debug!("Obstacle {id} left the playfield ({axis:?})");
            return;
        }

        let center = self.obstacles[idx].center();
        let radius = self.obstacles[idx].radius();
        let ship_hit = self.ship.as_ref().and_then(|ship| {
            circles_collide(ship.nose(), center, SHIP_RADIUS, radius).then_some(ship.shape)
        });
        // On the last life the ship and its projectiles stay until the
        // projectile check below has run
        let mut ship_lost = false;
        if let Some(ship_shape) = ship_hit {
            self.surface.restyle_shape(ship_shape, ShapeStyle::Hit);
            if self.decrease_life() {
                self.reset_ship(true);
            } else {
                ship_lost = true;
            }
        }

        let obstacle = &mut self.obstacles[idx];
        obstacle.drift();
        self.surface.update_shape(obstacle.shape, &obstacle.points);
        let center = obstacle.center();

        let struck = self.ship.as_ref().is_some_and(|ship| {
            ship.projectiles
                .iter()
                .any(|p| circles_collide(p.center(), center, PROJECTILE_RADIUS, radius))
        });
        if struck {
            self.shatter(idx);
        } else {
            let obstacle = &mut self.obstacles[idx];
            obstacle.job = Some(
                self.surface
                    .schedule(obstacle.interval_ms(), Task::ObstacleTick(id)),
            );
        }

        if ship_lost {
            self.reset_ship(false);
        }
    }

    /// Destroy a struck obstacle, score it and spawn its fragments
    fn shatter(&mut self, idx: usize) {
        let obstacle = self.obstacles.remove(idx);
        if let Some(job) = obstacle.job {
            self.surface.cancel(job);
        }
        self.surface.restyle_shape(obstacle.shape, ShapeStyle::Hit);
        self.surface.destroy_shape(obstacle.shape);

        let fragments = obstacle.fragments();
        log::debug!(
            "Obstacle {} ({:?}) hit, {} fragments",
            obstacle.id,
            obstacle.size,
            fragments.len()
        );
        self.update_score(obstacle.size.score_value());
        for fragment in fragments {
            let speed = self.random_speed();
            self.spawn_obstacle(fragment.origin, fragment.heading, fragment.size, speed);
        }
    }
}
