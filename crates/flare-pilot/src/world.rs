//! Capabilities the pilot engine needs from its host.
//!
//! `Body` abstracts over the collidable variants, `WorldQuery` over the
//! sector enumeration and diplomacy service, `RandomSource` over the host's
//! random generator.

use std::f64::consts::TAU;

use glam::DVec3;
use rand::Rng;

use flare_core::constants::MIN_BODY_SIZE;
use flare_core::enums::{BodyKind, Hostility};
use flare_core::state::{Asteroid, Munition, SectorSnapshot, Ship, StaticCollider};
use flare_core::types::{BodyId, FactionId, Sphere};

/// A collidable body: anything with a location, a velocity and a size.
pub trait Body {
    fn id(&self) -> BodyId;
    fn kind(&self) -> BodyKind;
    /// Reference location of the body.
    fn location(&self) -> DVec3;
    fn velocity(&self) -> DVec3;
    /// Sphere used for collision prediction.
    fn collision_sphere(&self) -> Sphere;
}

impl Body for Ship {
    fn id(&self) -> BodyId {
        self.id
    }

    fn kind(&self) -> BodyKind {
        BodyKind::Ship
    }

    fn location(&self) -> DVec3 {
        self.location
    }

    fn velocity(&self) -> DVec3 {
        self.velocity
    }

    /// Ships move parts around (turrets, docked modules), so the sphere is
    /// rebuilt from the live bounding box every query.
    fn collision_sphere(&self) -> Sphere {
        Sphere::new(
            self.bounds.center(),
            self.bounds.extent().length().max(MIN_BODY_SIZE),
        )
    }
}

impl Body for Asteroid {
    fn id(&self) -> BodyId {
        self.id
    }

    fn kind(&self) -> BodyKind {
        BodyKind::Asteroid
    }

    fn location(&self) -> DVec3 {
        self.location
    }

    fn velocity(&self) -> DVec3 {
        self.velocity
    }

    fn collision_sphere(&self) -> Sphere {
        Sphere::new(self.location, self.radius)
    }
}

impl Body for StaticCollider {
    fn id(&self) -> BodyId {
        self.id
    }

    fn kind(&self) -> BodyKind {
        BodyKind::StaticCollider
    }

    fn location(&self) -> DVec3 {
        self.location
    }

    fn velocity(&self) -> DVec3 {
        DVec3::ZERO
    }

    fn collision_sphere(&self) -> Sphere {
        Sphere::new(self.location, self.radius)
    }
}

/// Read-only view of the active sector.
pub trait WorldQuery {
    fn ships(&self) -> &[Ship];
    fn asteroids(&self) -> &[Asteroid];
    fn colliders(&self) -> &[StaticCollider];
    fn munitions(&self) -> &[Munition];
    /// Radius of the playable sphere centered on the origin.
    fn sector_limits(&self) -> f64;
    /// Stance of faction `a` toward faction `b`.
    fn hostility(&self, a: FactionId, b: FactionId) -> Hostility;

    fn ship(&self, id: BodyId) -> Option<&Ship> {
        self.ships().iter().find(|ship| ship.id == id)
    }
}

impl WorldQuery for SectorSnapshot {
    fn ships(&self) -> &[Ship] {
        &self.ships
    }

    fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    fn colliders(&self) -> &[StaticCollider] {
        &self.colliders
    }

    fn munitions(&self) -> &[Munition] {
        &self.munitions
    }

    fn sector_limits(&self) -> f64 {
        self.sector_limits
    }

    fn hostility(&self, a: FactionId, b: FactionId) -> Hostility {
        self.diplomacy.hostility(a, b)
    }
}

/// Randomness needed by the pilot engine.
pub trait RandomSource {
    /// Uniformly distributed unit vector.
    fn unit_vector(&mut self) -> DVec3;
    /// Uniform integer in `0..upper` (0 when `upper` is 0).
    fn below(&mut self, upper: u32) -> u32;
}

impl<R: Rng> RandomSource for R {
    fn unit_vector(&mut self) -> DVec3 {
        // Archimedes: uniform z and azimuth give a uniform point on the sphere
        let z: f64 = self.gen_range(-1.0..=1.0);
        let azimuth: f64 = self.gen_range(0.0..TAU);
        let r = (1.0 - z * z).max(0.0).sqrt();
        DVec3::new(r * azimuth.cos(), r * azimuth.sin(), z)
    }

    fn below(&mut self, upper: u32) -> u32 {
        if upper == 0 {
            0
        } else {
            self.gen_range(0..upper)
        }
    }
}
