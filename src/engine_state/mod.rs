//! # Engine State Module
//!
//! Owns everything the sandbox simulates and runs one update per frame.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container
//! * `camera_state` - Look orientation and mouse look
//! * `physics` - The player body and the collision resolver
//! * `rendering` - Mesh registry and the render surface boundary
//! * `voxels` - The voxel grid, world generation, block edits
//!
//! ## Frame Order
//!
//! 1. `set_input_commands` turns the frame's input snapshot into a `PlayerAction`
//! 2. `process_input` applies mouse look, jumps, the physics step and edits,
//!    but only while input is captured
//! 3. `render` forwards mesh changes to the surface and presents the frame

use cgmath::Point3;
use web_time::Duration;
use winit::{event::MouseButton, keyboard::KeyCode};

use camera_state::LookController;
use physics::{collision::SUPPORT_EYE_HEIGHT, CollisionResolver, MovementIntent, PlayerBody};
use rendering::{sync_surface, MeshRegistry, RenderSurface, Viewpoint};
use voxels::{edit, generation::generate, grid::VoxelGrid, raycast::raycast};

use crate::{
    application_state::input_state::ProcessedInputState,
    config::{EditingConfig, SandboxConfig},
};

pub mod camera_state;
pub mod physics;
pub mod rendering;
pub mod voxels;

/// The main state container for the sandbox.
///
/// Generic over the surface it presents to, so tests and the native shell can
/// plug in whatever they need.
///
/// # Examples
///
/// ```
/// use voxel_sandbox::{EngineState, HeadlessSurface, SandboxConfig};
///
/// let mut engine = EngineState::new(&SandboxConfig::default(), HeadlessSurface::new());
/// engine.set_captured(true);
/// for _ in 0..120 {
///     engine.process_input(web_time::Duration::from_secs_f32(1.0 / 60.0));
///     engine.render();
/// }
/// assert_eq!(engine.player_position().y, 3.5);
/// ```
pub struct EngineState<S: RenderSurface> {
    /// The voxel world
    pub grid: VoxelGrid,
    /// One mesh per solid voxel
    pub registry: MeshRegistry,
    /// The controlled player
    pub body: PlayerBody,
    /// Mouse look
    pub look: LookController,
    /// Physics integrator
    pub resolver: CollisionResolver,
    /// Current player actions derived from input
    pub player_actions: PlayerAction,
    editing: EditingConfig,
    surface: S,
    /// Whether input is routed to the player (pointer locked)
    captured: bool,
}

impl<S: RenderSurface> EngineState<S> {
    /// Generates the world, meshes every solid voxel and places the player.
    ///
    /// # Arguments
    /// * `config` - World, player, physics, input and editing settings
    /// * `surface` - Where frames are presented
    pub fn new(config: &SandboxConfig, surface: S) -> Self {
        let world = &config.world;
        let grid = generate(world.width, world.height, world.depth, &world.generator);

        let mut registry = MeshRegistry::new();
        let (added, _) = registry.sync_with_grid(&grid);
        log::info!(
            "generated {}x{}x{} world with {} solid blocks",
            world.width,
            world.height,
            world.depth,
            added
        );

        let mut body = PlayerBody::new(config.player.spawn_point(), config.player.dimensions);
        lift_above_terrain(&mut body, &grid);

        Self {
            grid,
            registry,
            body,
            look: LookController::new(config.input.mouse_sensitivity),
            resolver: CollisionResolver::new(config.physics),
            player_actions: PlayerAction::default(),
            editing: config.editing.clone(),
            surface,
            captured: false,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Turns player control on or off. While off, physics and look are frozen.
    pub fn set_captured(&mut self, captured: bool) {
        if self.captured != captured {
            log::info!("input {}", if captured { "captured" } else { "released" });
        }
        self.captured = captured;
    }

    /// The player's eye position.
    pub fn player_position(&self) -> Point3<f32> {
        self.body.position
    }

    /// Presents the current frame.
    ///
    /// Pending mesh changes go to the surface first, then the viewpoint.
    pub fn render(&mut self) {
        sync_surface(&mut self.registry, &mut self.surface);
        let viewpoint = Viewpoint {
            eye: self.body.position,
            orientation: self.look.look.rotation(),
        };
        self.surface.present(&viewpoint);
    }

    /// Advances the simulation by one frame.
    ///
    /// # Arguments
    /// * `wait_duration` - The time elapsed since the last frame
    pub fn process_input(&mut self, wait_duration: Duration) {
        if !self.captured {
            return;
        }

        let actions = self.player_actions;
        self.look.intake_motion(actions.rotate_view);

        if actions.jump && self.body.jump(self.resolver.settings.jump_velocity) {
            log::debug!("jump from y = {}", self.body.position.y);
        }

        let was_on_ground = self.body.on_ground;
        let outcome = self.resolver.step(
            &mut self.body,
            &self.grid,
            &actions.movement,
            &self.look.look,
            wait_duration.as_secs_f32(),
        );
        if outcome.landed && !was_on_ground {
            log::debug!("landed at {:?}", self.body.position);
        }

        self.apply_edits(&actions);
    }

    fn apply_edits(&mut self, actions: &PlayerAction) {
        if !self.editing.enabled || !(actions.remove_block || actions.place_block) {
            return;
        }

        let Some(hit) = raycast(
            &self.grid,
            self.body.position,
            self.look.look.forward(),
            self.editing.reach,
        ) else {
            return;
        };

        let result = if actions.remove_block {
            edit::remove(&mut self.grid, &mut self.registry, hit.position).map(|_| ())
        } else {
            edit::place(
                &mut self.grid,
                &mut self.registry,
                &self.body,
                hit.adjacent(),
                self.editing.block,
            )
        };

        if let Err(e) = result {
            log::warn!("edit rejected: {}", e);
        }
    }

    /// Sets the input commands for the next `process_input`.
    pub fn set_input_commands(&mut self, input: ProcessedInputState) {
        self.player_actions = PlayerAction::from_input(&input);
    }
}

/// What the player asked for this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerAction {
    /// Held movement keys
    pub movement: MovementIntent,
    /// Jump key went down this frame
    pub jump: bool,
    /// Mouse motion this frame
    pub rotate_view: Option<(f64, f64)>,
    /// Left button went down this frame
    pub remove_block: bool,
    /// Right button went down this frame
    pub place_block: bool,
}

impl PlayerAction {
    /// Maps W/S/A/D, Space and the mouse buttons to actions.
    pub fn from_input(input: &ProcessedInputState) -> Self {
        Self {
            movement: MovementIntent {
                forward: input.get_key_state(KeyCode::KeyW).is_active(),
                back: input.get_key_state(KeyCode::KeyS).is_active(),
                left: input.get_key_state(KeyCode::KeyA).is_active(),
                right: input.get_key_state(KeyCode::KeyD).is_active(),
            },
            jump: input.get_key_state(KeyCode::Space).is_just_pressed(),
            rotate_view: input.get_mouse_delta(),
            remove_block: input.get_mouse_button_state(MouseButton::Left).is_just_pressed(),
            place_block: input.get_mouse_button_state(MouseButton::Right).is_just_pressed(),
        }
    }
}

/// Raises a body that starts inside the terrain so it rests on the highest
/// column under its footprint.
fn lift_above_terrain(body: &mut PlayerBody, grid: &VoxelGrid) {
    let (min, max) = body.bounding_box().cell_range();
    let top = (min.x..max.x)
        .flat_map(|x| (min.z..max.z).map(move |z| (x, z)))
        .filter_map(|(x, z)| grid.column_top(x, z))
        .max();

    if let Some(top) = top {
        let rest = top as f32 + SUPPORT_EYE_HEIGHT;
        if body.position.y < rest {
            log::info!("spawn {:?} is inside the terrain, lifting to y = {}", body.position, rest);
            body.position.y = rest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_state::input_state::RawInputState;
    use crate::engine_state::{
        rendering::{HeadlessSurface, Material},
        voxels::{block::block_type::BlockType, generation::GeneratorSettings},
    };

    const FRAME: Duration = Duration::from_micros(16_667);

    fn engine() -> EngineState<HeadlessSurface> {
        EngineState::new(&SandboxConfig::default(), HeadlessSurface::new())
    }

    fn settle(engine: &mut EngineState<HeadlessSurface>) {
        engine.set_captured(true);
        for _ in 0..120 {
            engine.process_input(FRAME);
        }
    }

    fn input(keys: &[(KeyCode, RawInputState)], buttons: &[(MouseButton, RawInputState)]) -> ProcessedInputState {
        ProcessedInputState {
            keyboard_states: keys.iter().copied().collect(),
            mouse_button_states: buttons.iter().copied().collect(),
            mouse_delta: None,
        }
    }

    #[test]
    fn new_engine_meshes_the_whole_world() {
        let mut engine = engine();
        assert_eq!(engine.registry.len(), 20 * 3 * 20);
        assert_eq!(engine.player_position(), Point3::new(10.0, 5.0, 10.0));

        engine.render();
        assert_eq!(engine.surface().mesh_count(), 20 * 3 * 20);
        assert_eq!(engine.surface().frames_presented(), 1);
        assert!(!engine.registry.has_pending());
    }

    #[test]
    fn buried_spawn_is_lifted_onto_the_terrain() {
        let mut config = SandboxConfig::default();
        config.world.height = 16;
        config.world.generator = GeneratorSettings::Perlin {
            seed: 1,
            scale: 0.08,
            base_height: 10.0,
            amplitude: 2.0,
        };
        let mut engine = EngineState::new(&config, HeadlessSurface::new());

        let highest = [(9, 9), (9, 10), (10, 9), (10, 10)]
            .into_iter()
            .filter_map(|(x, z)| engine.grid.column_top(x, z))
            .max()
            .unwrap();
        let rest = highest as f32 + SUPPORT_EYE_HEIGHT;
        assert!(rest > 5.0);
        assert_eq!(engine.player_position(), Point3::new(10.0, rest, 10.0));

        settle(&mut engine);
        assert!(engine.body.on_ground);
        assert_eq!(engine.player_position().y, rest);
    }

    #[test]
    fn nothing_moves_until_input_is_captured() {
        let mut engine = engine();
        for _ in 0..10 {
            engine.process_input(FRAME);
        }
        assert_eq!(engine.player_position(), Point3::new(10.0, 5.0, 10.0));

        settle(&mut engine);
        assert!(engine.body.on_ground);
        assert_eq!(engine.player_position().y, 3.5);
        assert_eq!(engine.body.velocity.y, 0.0);
    }

    #[test]
    fn render_presents_the_eye_position() {
        let mut engine = engine();
        settle(&mut engine);
        engine.render();
        let viewpoint = engine.surface().last_viewpoint().copied().unwrap();
        assert_eq!(viewpoint.eye, engine.player_position());
    }

    #[test]
    fn jump_is_edge_triggered() {
        let mut engine = engine();
        settle(&mut engine);

        engine.set_input_commands(input(&[(KeyCode::Space, RawInputState::Pressed)], &[]));
        assert!(engine.player_actions.jump);
        engine.process_input(FRAME);
        assert!(!engine.body.on_ground);
        assert!(engine.player_position().y > 3.5);

        engine.set_input_commands(input(&[(KeyCode::Space, RawInputState::Held)], &[]));
        assert!(!engine.player_actions.jump);
    }

    #[test]
    fn movement_keys_map_to_intents() {
        let snapshot = input(
            &[(KeyCode::KeyW, RawInputState::Held), (KeyCode::KeyA, RawInputState::Pressed)],
            &[(MouseButton::Left, RawInputState::Held)],
        );
        let actions = PlayerAction::from_input(&snapshot);
        assert!(actions.movement.forward && actions.movement.left);
        assert!(!actions.movement.back && !actions.movement.right);
        assert!(!actions.remove_block);
    }

    #[test]
    fn releasing_capture_freezes_look() {
        let mut engine = engine();
        let mut snapshot = ProcessedInputState::default();
        snapshot.mouse_delta = Some((100.0, 0.0));
        engine.set_input_commands(snapshot);

        engine.process_input(FRAME);
        assert_eq!(engine.look.look.yaw.0, 0.0);

        engine.set_captured(true);
        engine.process_input(FRAME);
        assert!(engine.look.look.yaw.0 < 0.0);
    }

    fn look_straight_down_from_block_center(engine: &mut EngineState<HeadlessSurface>) {
        engine.body.position.x = 10.5;
        engine.body.position.z = 10.5;
        engine.look.look.pitch = cgmath::Rad(-std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn clicks_edit_only_when_editing_is_enabled() {
        let mut config = SandboxConfig::default();
        let mut engine = EngineState::new(&config, HeadlessSurface::new());
        settle(&mut engine);
        engine.render();
        look_straight_down_from_block_center(&mut engine);

        let click = input(&[], &[(MouseButton::Left, RawInputState::Pressed)]);
        engine.set_input_commands(click);
        engine.process_input(FRAME);
        assert_eq!(engine.grid.get(10, 2, 10), BlockType::GRASS);

        config.editing.enabled = true;
        let mut engine = EngineState::new(&config, HeadlessSurface::new());
        settle(&mut engine);
        engine.render();
        look_straight_down_from_block_center(&mut engine);
        assert_eq!(engine.surface().material_at(Point3::new(10, 2, 10)), Some(Material::Grass));
        assert_eq!(engine.surface().material_at(Point3::new(10, 0, 10)), Some(Material::Dirt));

        engine.set_input_commands(input(&[], &[(MouseButton::Left, RawInputState::Pressed)]));
        engine.process_input(FRAME);
        assert_eq!(engine.grid.get(10, 2, 10), BlockType::AIR);
        engine.render();
        assert!(!engine.surface().has_mesh(Point3::new(10, 2, 10)));
        assert_eq!(engine.surface().material_at(Point3::new(10, 2, 10)), None);
        assert_eq!(engine.surface().mesh_count(), 20 * 3 * 20 - 1);
    }
}
