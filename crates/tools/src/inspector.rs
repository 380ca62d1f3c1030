use cubefire_common::ObjectId;
use cubefire_kernel::{CameraMode, DespawnCause, ObjectKind, PairResponse, World, WorldEvent};
use glam::Vec3;
use serde::Serialize;

/// World inspector for developer tooling.
///
/// Read-only queries against the world for debugging and headless reports.
pub struct WorldInspector;

impl WorldInspector {
    /// Produce a summary of the world state.
    pub fn summary(world: &World) -> WorldSummary {
        WorldSummary {
            tick: world.tick(),
            objects: world.object_count(),
            players: world.count_of(ObjectKind::Player),
            cubes: world.count_of(ObjectKind::Cube),
            bullets: world.count_of(ObjectKind::Bullet),
            terrain_triangles: world.terrain().len(),
            terrain_batches: world.terrain().batches().len(),
            camera: world.camera_mode(),
            exit_requested: world.exit_requested(),
            pending_events: world.events().len(),
            player_position: world.player().map(|p| p.position()),
        }
    }

    pub fn inspect_object(world: &World, id: ObjectId) -> Option<ObjectInfo> {
        world.get(id).map(|obj| ObjectInfo {
            id,
            kind: obj.kind(),
            position: obj.position(),
            energy: obj.energy,
            radius: obj.radius,
            scale: obj.transform.scale,
            alive: obj.alive,
        })
    }

    /// All object ids in update order.
    pub fn list_objects(world: &World) -> Vec<ObjectId> {
        world.objects().map(|(id, _)| id).collect()
    }
}

/// Summary of world state for the inspector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSummary {
    pub tick: u64,
    pub objects: usize,
    pub players: usize,
    pub cubes: usize,
    pub bullets: usize,
    pub terrain_triangles: usize,
    pub terrain_batches: usize,
    pub camera: CameraMode,
    pub exit_requested: bool,
    pub pending_events: usize,
    pub player_position: Option<Vec3>,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World: tick={} objects={} (cubes={} bullets={}) triangles={} camera={:?} pending_events={}",
            self.tick,
            self.objects,
            self.cubes,
            self.bullets,
            self.terrain_triangles,
            self.camera,
            self.pending_events
        )?;
        if let Some(p) = self.player_position {
            write!(f, " player=({:.2}, {:.2}, {:.2})", p.x, p.y, p.z)?;
        }
        Ok(())
    }
}

/// Detailed info about a single object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectInfo {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub position: Vec3,
    pub energy: Vec3,
    pub radius: f32,
    pub scale: Vec3,
    pub alive: bool,
}

impl std::fmt::Display for ObjectInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} pos=({:.2}, {:.2}, {:.2}) |e|={:.3} r={:.2}",
            self.kind.name(),
            self.position.x,
            self.position.y,
            self.position.z,
            self.energy.length(),
            self.radius,
        )
    }
}

/// Counts of what happened over a stretch of world events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventTally {
    pub ticks: u64,
    pub spawned: usize,
    pub bullets_fired: usize,
    pub expired: usize,
    pub annihilated: usize,
    pub elastic_contacts: usize,
    pub ignored_contacts: usize,
    pub bounces: usize,
}

impl EventTally {
    pub fn record(&mut self, event: &WorldEvent) {
        match event {
            WorldEvent::Spawned { kind, .. } => {
                self.spawned += 1;
                if *kind == ObjectKind::Bullet {
                    self.bullets_fired += 1;
                }
            }
            WorldEvent::Despawned { cause, .. } => match cause {
                DespawnCause::Expired => self.expired += 1,
                DespawnCause::Annihilated => self.annihilated += 1,
            },
            WorldEvent::Contact { response, .. } => match response {
                PairResponse::Elastic => self.elastic_contacts += 1,
                PairResponse::Ignore => self.ignored_contacts += 1,
                PairResponse::Annihilate => {}
            },
            WorldEvent::Bounced { .. } => self.bounces += 1,
            WorldEvent::Stepped { .. } => self.ticks += 1,
            WorldEvent::CameraToggled { .. } | WorldEvent::ExitRequested => {}
        }
    }

    pub fn from_events(events: &[WorldEvent]) -> Self {
        let mut tally = Self::default();
        for event in events {
            tally.record(event);
        }
        tally
    }
}
