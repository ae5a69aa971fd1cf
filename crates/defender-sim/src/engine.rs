//! Simulation engine — the core of the game.
//!
//! `Simulation` owns the entity registry, processes player commands at
//! tick boundaries, runs all systems in a fixed order, and produces
//! `FrameSnapshot`s. Completely headless (no rendering or host
//! dependency), enabling deterministic testing.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use defender_core::commands::{InputState, PlayerCommand};
use defender_core::constants::SCENE_TRANSITION_MS;
use defender_core::enums::{SceneId, ScenePhase};
use defender_core::events::VisualEvent;
use defender_core::state::FrameSnapshot;
use defender_core::types::SimTime;

use crate::registry::Registry;
use crate::systems;
use crate::systems::collision::OverlapPair;
use crate::systems::spawner::SpawnSchedule;
use crate::timers::{TimerAction, TimerQueue};

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed + same command/tick timeline =
    /// same simulation.
    pub seed: u64,
    /// Whether a player-vs-obstacle hit decrements the integrity counter.
    /// The observed original behavior leaves integrity untouched, so this
    /// defaults to off.
    pub damage_on_hit: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            damage_on_hit: false,
        }
    }
}

/// The simulation engine. Owns the registry and all session state.
pub struct Simulation {
    registry: Registry,
    time: SimTime,
    phase: ScenePhase,
    rng: ChaCha8Rng,
    damage_on_hit: bool,
    command_queue: VecDeque<PlayerCommand>,
    input: InputState,
    prev_fire: bool,
    schedule: SpawnSchedule,
    timers: TimerQueue,
    score: u32,
    session_started_at_ms: f64,
    events: Vec<VisualEvent>,
    pair_buffer: Vec<OverlapPair>,
    timer_scratch: Vec<TimerAction>,
}

impl Simulation {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            registry: Registry::new(),
            time: SimTime::default(),
            phase: ScenePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            damage_on_hit: config.damage_on_hit,
            command_queue: VecDeque::new(),
            input: InputState::default(),
            prev_fire: false,
            schedule: SpawnSchedule::default(),
            timers: TimerQueue::default(),
            score: 0,
            session_started_at_ms: 0.0,
            events: Vec::new(),
            pair_buffer: Vec::new(),
            timer_scratch: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance the simulation to the host timestamp `now_ms` (monotonically
    /// non-decreasing) and return the resulting snapshot.
    pub fn tick(&mut self, now_ms: f64) -> FrameSnapshot {
        self.time.advance(now_ms);
        self.process_commands();
        self.process_timers();

        if self.phase == ScenePhase::Playing {
            self.run_systems();
        }
        self.prev_fire = self.input.fire;

        let elapsed_ms = match self.phase {
            ScenePhase::Playing => self.time.now_ms - self.session_started_at_ms,
            _ => 0.0,
        };
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build(
            self.registry.world(),
            &self.time,
            self.phase,
            self.score,
            elapsed_ms,
            events,
        )
    }

    /// Get the current scene phase.
    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &hecs::World {
        self.registry.world()
    }

    /// Get a read-only reference to the registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Spawn a motionless obstacle at an exact position (for tests).
    #[cfg(test)]
    pub fn spawn_obstacle_at(&mut self, x: f64, y: f64) -> hecs::Entity {
        use defender_core::enums::SizeClass;
        use defender_core::types::{Position, Velocity};

        self.registry.spawn_obstacle_with(
            Position::new(x, y),
            Velocity::default(),
            SizeClass::Small,
            0.0,
        )
    }

    /// Spawn a motionless projectile at an exact position (for tests).
    #[cfg(test)]
    pub fn spawn_projectile_at(&mut self, x: f64, y: f64) -> hecs::Entity {
        use defender_core::types::{Position, Velocity};

        let entity = self.registry.spawn_projectile(Position::new(x, y));
        // Hold it in place so scenario tests control the overlap precisely.
        if let Ok(mut vel) = self.registry.world().get::<&mut Velocity>(entity) {
            *vel = Velocity::default();
        }
        entity
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Scene-changing commands are guarded:
    /// start is only honored in the menu, quit only while playing, and both
    /// are ignored during a transition.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SetInput { input } => {
                self.input = input;
            }
            PlayerCommand::StartGame => {
                if self.phase == ScenePhase::Menu {
                    self.begin_transition(SceneId::Game);
                }
            }
            PlayerCommand::QuitToMenu => {
                if self.phase == ScenePhase::Playing {
                    self.begin_transition(SceneId::Menu);
                }
            }
        }
    }

    /// Enter the guarded transition state toward `target`. The fade plays
    /// on the host; gameplay is frozen until the transition timer fires.
    fn begin_transition(&mut self, target: SceneId) {
        self.phase = ScenePhase::TransitioningOut { target };
        self.events.push(VisualEvent::FadeOut {
            duration_ms: SCENE_TRANSITION_MS,
            target,
        });
        self.timers.schedule(
            self.time.now_ms + SCENE_TRANSITION_MS,
            TimerAction::CompleteTransition(target),
        );
    }

    /// Drain and execute all due deferred actions at this tick boundary.
    fn process_timers(&mut self) {
        let mut due = std::mem::take(&mut self.timer_scratch);
        self.timers.drain_due(self.time.now_ms, &mut due);

        for action in due.drain(..) {
            match action {
                TimerAction::DestroyEntity(entity) => {
                    self.registry.destroy(entity);
                }
                TimerAction::ClearPlayerHit => {
                    systems::combat::clear_player_hit(&mut self.registry, self.time.now_ms);
                }
                TimerAction::CompleteTransition(target) => {
                    if matches!(self.phase, ScenePhase::TransitioningOut { .. }) {
                        self.enter_scene(target);
                    }
                }
            }
        }
        self.timer_scratch = due;
    }

    /// Enter a scene after a completed transition.
    fn enter_scene(&mut self, target: SceneId) {
        // The registry is wiped either way; pending timers refer to entities
        // of the old world and are dropped with it (entity ids may be reused).
        self.registry.clear();
        self.timers.clear();

        match target {
            SceneId::Menu => {
                self.phase = ScenePhase::Menu;
            }
            SceneId::Game => {
                self.score = 0;
                self.session_started_at_ms = self.time.now_ms;
                self.registry.spawn_player();
                self.schedule.reset(self.time.now_ms);
                self.phase = ScenePhase::Playing;
            }
        }
    }

    /// Run all systems in order: spawn, player input, integration,
    /// collision pairing, combat resolution, sweep.
    fn run_systems(&mut self) {
        let now_ms = self.time.now_ms;
        let fire_edge = self.input.fire && !self.prev_fire;

        // 1. Spawn scheduling
        systems::spawner::run(&mut self.registry, &mut self.rng, &mut self.schedule, now_ms);
        // 2. Player input and firing
        systems::player::run(&mut self.registry, &self.input, fire_edge, &mut self.events);
        // 3. Kinematic integration and bounds clamping
        systems::movement::run(self.registry.world_mut(), self.time.dt_secs);
        // 4. Collision pairing
        self.pair_buffer.clear();
        systems::collision::collect_pairs(self.registry.world(), &mut self.pair_buffer);
        // 5. Combat resolution
        let pairs = std::mem::take(&mut self.pair_buffer);
        systems::combat::resolve(
            &mut self.registry,
            &pairs,
            now_ms,
            self.damage_on_hit,
            &mut self.score,
            &mut self.timers,
            &mut self.events,
        );
        self.pair_buffer = pairs;
        // 6. Lifecycle sweep (off-field, expired effects)
        systems::sweep::run(&mut self.registry, now_ms);
    }
}
