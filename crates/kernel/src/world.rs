use crate::collision::{PairResponse, resolve_pair, resolve_surface};
use crate::config::{ConfigError, WorldConfig};
use crate::object::{Behavior, GameObject, ObjectKind};
use crate::triangle::TerrainSurface;
use cubefire_common::{
    DrawSurface, MaterialColor, MeshHandle, MeshProvider, ObjectId, TextureHandle,
    TextureProvider,
};
use cubefire_input::Action;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use std::collections::BTreeMap;

/// Why an object left the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DespawnCause {
    /// Ran out of energy.
    Expired,
    /// Destroyed by a collision.
    Annihilated,
}

/// Which view the renderer should build around the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraMode {
    FirstPerson,
    #[default]
    ThirdPerson,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::FirstPerson => Self::ThirdPerson,
            Self::ThirdPerson => Self::FirstPerson,
        }
    }
}

/// An event record produced by the world as it changes.
///
/// The log is for observers only; nothing in the simulation reads it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    Spawned {
        id: ObjectId,
        kind: ObjectKind,
        position: Vec3,
    },
    Despawned {
        id: ObjectId,
        kind: ObjectKind,
        cause: DespawnCause,
    },
    /// Two dynamic objects overlapped during the pair phase.
    Contact {
        first: ObjectId,
        second: ObjectId,
        response: PairResponse,
    },
    /// An object was pushed out of a terrain triangle.
    Bounced {
        id: ObjectId,
        triangle: usize,
        penetration: f32,
    },
    CameraToggled {
        mode: CameraMode,
    },
    ExitRequested,
    /// Simulation advanced one tick.
    Stepped {
        tick: u64,
    },
}

/// Mesh and texture handles for every object kind, resolved once when the
/// world is created so objects spawned mid-tick can be initialised without
/// going back to the providers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetBindings {
    meshes: BTreeMap<&'static str, MeshHandle>,
    vertex_counts: BTreeMap<MeshHandle, u32>,
    textures: BTreeMap<&'static str, TextureHandle>,
}

impl AssetBindings {
    pub fn resolve(meshes: &dyn MeshProvider, textures: &dyn TextureProvider) -> Self {
        let mut bindings = Self::default();
        for kind in ObjectKind::ALL {
            if let Some(mesh) = meshes.mesh(kind.mesh_name()) {
                bindings.meshes.insert(kind.mesh_name(), mesh);
                if let Some(count) = meshes.vertex_count(mesh) {
                    bindings.vertex_counts.insert(mesh, count);
                }
            }
            if let Some(name) = kind.texture_name() {
                if let Some(texture) = textures.texture(name) {
                    bindings.textures.insert(name, texture);
                }
            }
        }
        bindings
    }
}

impl MeshProvider for AssetBindings {
    fn mesh(&self, name: &str) -> Option<MeshHandle> {
        self.meshes.get(name).copied()
    }

    fn vertex_count(&self, mesh: MeshHandle) -> Option<u32> {
        self.vertex_counts.get(&mesh).copied()
    }
}

impl TextureProvider for AssetBindings {
    fn texture(&self, name: &str) -> Option<TextureHandle> {
        self.textures.get(name).copied()
    }
}

/// The authoritative simulation state.
///
/// Owns every dynamic object and the static terrain. Objects live in an arena
/// keyed by [`ObjectId`]; `order` keeps insertion order, which is the order
/// every per-object phase of a tick walks.
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    objects: SlotMap<ObjectId, GameObject>,
    order: Vec<ObjectId>,
    player: ObjectId,
    terrain: TerrainSurface,
    bindings: AssetBindings,
    camera: CameraMode,
    tick: u64,
    exit_requested: bool,
    event_log: Vec<WorldEvent>,
}

impl World {
    /// Create the world: the player first, then the cube grid row by row.
    pub fn new(
        config: WorldConfig,
        terrain: TerrainSurface,
        meshes: &dyn MeshProvider,
        textures: &dyn TextureProvider,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let bindings = AssetBindings::resolve(meshes, textures);
        let mut world = Self {
            config,
            objects: SlotMap::with_key(),
            order: Vec::new(),
            player: ObjectId::default(),
            terrain,
            bindings,
            camera: CameraMode::default(),
            tick: 0,
            exit_requested: false,
            event_log: Vec::new(),
        };

        let (start, speed) = (world.config.player.start, world.config.player.speed);
        world.player = world.spawn(GameObject::player(start, speed));

        let grid = world.config.cubes.clone();
        for row in 0..grid.rows {
            for col in 0..grid.columns {
                let position = Vec3::new(
                    col as f32 * grid.spacing + grid.origin.x,
                    grid.origin.y,
                    row as f32 * grid.spacing + grid.origin.z,
                );
                let color = MaterialColor::new(row as f32 * 0.2, 0.5, col as f32 * 0.1);
                world.spawn(GameObject::cube(position, grid.scale, color));
            }
        }

        tracing::info!(
            objects = world.objects.len(),
            triangles = world.terrain.len(),
            "world created"
        );
        Ok(world)
    }

    /// Current simulation tick.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn terrain(&self) -> &TerrainSurface {
        &self.terrain
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.camera
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn request_exit(&mut self) {
        if !self.exit_requested {
            self.exit_requested = true;
            self.event_log.push(WorldEvent::ExitRequested);
        }
    }

    pub fn player_id(&self) -> ObjectId {
        self.player
    }

    pub fn player(&self) -> Option<&GameObject> {
        self.objects.get(self.player)
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.get(id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(id)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn count_of(&self, kind: ObjectKind) -> usize {
        self.objects.values().filter(|o| o.kind() == kind).count()
    }

    /// All objects in insertion order.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &GameObject)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.objects.get(*id).map(|obj| (*id, obj)))
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    /// Add an object, bind its assets and append it to the update order.
    pub fn spawn(&mut self, mut object: GameObject) -> ObjectId {
        object.init(&self.bindings, &self.bindings);
        let kind = object.kind();
        let position = object.position();
        let id = self.objects.insert(object);
        self.order.push(id);
        tracing::debug!(?id, kind = kind.name(), %position, "spawned");
        self.event_log.push(WorldEvent::Spawned { id, kind, position });
        id
    }

    /// Spawn a bullet just in front of the player, travelling horizontally
    /// along its facing direction.
    pub fn fire(&mut self) -> Option<ObjectId> {
        let player = self.objects.get(self.player)?;
        let direction = player.avatar()?.direction;
        let origin = player.position();
        let bullet = &self.config.bullet;

        let mut position = origin + direction * bullet.muzzle_offset;
        position.y = origin.y;
        let energy = Vec3::new(direction.x, 0.0, direction.z) * bullet.muzzle_speed;
        Some(self.spawn(GameObject::bullet(position, energy)))
    }

    /// Advance the simulation by one tick, applying `actions` to the player.
    pub fn step(&mut self, actions: &[Action]) {
        self.tick += 1;
        let _span = tracing::trace_span!("tick", tick = self.tick).entered();

        for obj in self.objects.values_mut() {
            obj.previous_position = obj.position();
        }

        let annihilated = self.resolve_pairs();

        for action in actions {
            self.apply(*action);
        }

        let gravity = self.config.gravity;
        if gravity != 0.0 {
            for obj in self.objects.values_mut().filter(|o| o.alive) {
                obj.energy.y -= gravity;
            }
        }

        for id in &self.order {
            if let Some(obj) = self.objects.get_mut(*id) {
                if obj.alive {
                    obj.update();
                }
            }
        }

        self.resolve_terrain();
        self.reap(&annihilated);

        tracing::trace!(objects = self.objects.len(), "tick complete");
        self.event_log.push(WorldEvent::Stepped { tick: self.tick });
    }

    /// Resolve every unordered pair of live objects once, in insertion
    /// order. Returns the ids killed by annihilation.
    fn resolve_pairs(&mut self) -> Vec<ObjectId> {
        let mut annihilated = Vec::new();
        for i in 0..self.order.len() {
            for j in (i + 1)..self.order.len() {
                let (first, second) = (self.order[i], self.order[j]);
                let Some([a, b]) = self.objects.get_disjoint_mut([first, second]) else {
                    continue;
                };
                if !a.alive || !b.alive {
                    continue;
                }
                let Some(contact) = resolve_pair(a, b) else {
                    continue;
                };
                tracing::debug!(
                    ?first,
                    ?second,
                    response = ?contact.response,
                    distance = contact.distance,
                    "contact"
                );
                if contact.response == PairResponse::Annihilate {
                    annihilated.push(first);
                    annihilated.push(second);
                }
                self.event_log.push(WorldEvent::Contact {
                    first,
                    second,
                    response: contact.response,
                });
            }
        }
        annihilated
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Fire => {
                self.fire();
            }
            Action::ToggleCamera => {
                self.camera = self.camera.toggled();
                tracing::debug!(mode = ?self.camera, "camera toggled");
                self.event_log
                    .push(WorldEvent::CameraToggled { mode: self.camera });
            }
            Action::Exit => self.request_exit(),
            Action::Move(towards) => {
                let Some(player) = self.objects.get_mut(self.player) else {
                    return;
                };
                if let Some(thrust) = player.avatar().map(|a| a.thrust(towards)) {
                    player.energy += thrust;
                }
            }
            Action::Turn(sign) => {
                let rate = self.config.player.turn_rate;
                if let Some(avatar) = self
                    .objects
                    .get_mut(self.player)
                    .and_then(GameObject::avatar_mut)
                {
                    avatar.turn(sign * rate);
                }
            }
            Action::Look(delta) => {
                let sensitivity = self.config.player.look_sensitivity;
                if let Some(avatar) = self
                    .objects
                    .get_mut(self.player)
                    .and_then(GameObject::avatar_mut)
                {
                    avatar.look(delta, sensitivity);
                }
            }
        }
    }

    fn resolve_terrain(&mut self) {
        if self.terrain.is_empty() {
            return;
        }
        for id in &self.order {
            let Some(obj) = self.objects.get_mut(*id) else {
                continue;
            };
            if !obj.alive {
                continue;
            }
            for contact in resolve_surface(obj, &self.terrain) {
                tracing::trace!(?id, triangle = contact.triangle, "bounced");
                self.event_log.push(WorldEvent::Bounced {
                    id: *id,
                    triangle: contact.triangle,
                    penetration: contact.penetration,
                });
            }
        }
    }

    /// Remove dead objects. Ids are collected first, then dropped from the
    /// arena and the order list in one stable pass. The player is never
    /// removed.
    fn reap(&mut self, annihilated: &[ObjectId]) {
        let dead: Vec<ObjectId> = self
            .order
            .iter()
            .copied()
            .filter(|id| *id != self.player)
            .filter(|id| self.objects.get(*id).is_some_and(|o| !o.alive))
            .collect();
        if dead.is_empty() {
            return;
        }

        for id in &dead {
            let Some(obj) = self.objects.remove(*id) else {
                continue;
            };
            let cause = if annihilated.contains(id) {
                DespawnCause::Annihilated
            } else {
                DespawnCause::Expired
            };
            tracing::debug!(?id, kind = obj.name(), ?cause, "despawned");
            self.event_log.push(WorldEvent::Despawned {
                id: *id,
                kind: obj.kind(),
                cause,
            });
        }
        let objects = &self.objects;
        self.order.retain(|id| objects.contains_key(*id));
    }

    /// Emit one draw call per live object, in insertion order.
    pub fn render_objects(&self, surface: &mut dyn DrawSurface) {
        for (_, obj) in self.objects() {
            obj.render(surface);
        }
    }

    /// Deterministic hash of the dynamic state, for comparing runs.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.tick.to_le_bytes());
        for (_, obj) in self.objects() {
            mix(&mut h, &[obj.kind() as u8, obj.alive as u8]);
            for v in [obj.position(), obj.energy, obj.transform.scale] {
                for c in v.to_array() {
                    mix(&mut h, &c.to_le_bytes());
                }
            }
            mix(&mut h, &obj.radius.to_le_bytes());
        }
        h
    }
}
