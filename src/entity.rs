use crate::steering;
use crate::visibility::View;
use creeps_common::{normalize_heading, ConfigError, EntityKind, EntityRecord, Vec2};
use std::fmt;

/// Stable handle for an entity. Handles are never reused within a simulation,
/// so they stay meaningful across removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Construction parameters for one entity, before it has an id.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySpec {
    pub kind: EntityKind,
    pub radius: f32,
    pub position: Vec2,
    /// Degrees; wrapped into `[0, 360)` on construction.
    pub heading: f32,
    pub speed: f32,
}

impl EntitySpec {
    pub fn creep(position: Vec2, heading: f32, radius: f32, speed: f32) -> Self {
        EntitySpec { kind: EntityKind::Creep, radius, position, heading, speed }
    }

    pub fn base(position: Vec2, radius: f32) -> Self {
        EntitySpec { kind: EntityKind::Base, radius, position, heading: 0.0, speed: 0.0 }
    }

    /// `index` is this entry's position in the construction list, used for reporting.
    pub(crate) fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if !self.position.is_finite() {
            return Err(ConfigError::NonFinite { index, field: "position" });
        }
        if !self.heading.is_finite() {
            return Err(ConfigError::NonFinite { index, field: "heading" });
        }
        if !(self.radius > 0.0) || !self.radius.is_finite() {
            return Err(ConfigError::NonPositiveRadius { index, radius: self.radius });
        }
        if self.speed < 0.0 || !self.speed.is_finite() {
            return Err(ConfigError::NegativeSpeed { index, speed: self.speed });
        }
        Ok(())
    }
}

/// A simulated body. Radius and speed are fixed for its lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: EntityId,
    kind: EntityKind,
    radius: f32,
    pub(crate) position: Vec2,
    pub(crate) heading: f32,
    speed: f32,
}

impl Entity {
    pub(crate) fn from_spec(id: u32, spec: &EntitySpec) -> Self {
        Entity {
            id: EntityId(id),
            kind: spec.kind,
            radius: spec.radius,
            position: spec.position,
            heading: normalize_heading(spec.heading),
            speed: spec.speed,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Advances this entity by one tick using the view computed for it.
    /// Bases ignore the view entirely.
    pub(crate) fn update(&mut self, view: &View) {
        match self.kind {
            EntityKind::Base => {}
            EntityKind::Creep => steering::steer(self, view),
        }
    }

    /// The serializable form handed to renderers and snapshot files.
    pub fn record(&self) -> EntityRecord {
        EntityRecord {
            id: self.id.raw(),
            kind: self.kind,
            radius: self.radius,
            x: self.position.x,
            y: self.position.y,
            heading: self.heading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_spec_normalizes_heading() {
        let spec = EntitySpec::creep(Vec2::new(10.0, 10.0), -90.0, 8.0, 2.0);
        let entity = Entity::from_spec(3, &spec);
        assert_eq!(entity.id().raw(), 3);
        assert_eq!(entity.heading(), 270.0);
        assert_eq!(entity.kind(), EntityKind::Creep);
    }

    #[test]
    fn test_validate_rejects_bad_specs() {
        let ok = EntitySpec::creep(Vec2::new(1.0, 1.0), 0.0, 8.0, 2.0);
        assert!(ok.validate(0).is_ok());

        let mut bad = ok.clone();
        bad.radius = 0.0;
        assert_eq!(bad.validate(4), Err(ConfigError::NonPositiveRadius { index: 4, radius: 0.0 }));

        let mut bad = ok.clone();
        bad.speed = -0.5;
        assert_eq!(bad.validate(1), Err(ConfigError::NegativeSpeed { index: 1, speed: -0.5 }));

        let mut bad = ok;
        bad.position = Vec2::new(f32::NAN, 0.0);
        assert!(matches!(bad.validate(2), Err(ConfigError::NonFinite { index: 2, .. })));
    }

    #[test]
    fn test_zero_speed_is_allowed() {
        let spec = EntitySpec::creep(Vec2::new(1.0, 1.0), 0.0, 8.0, 0.0);
        assert!(spec.validate(0).is_ok());
    }

    #[test]
    fn test_record_carries_render_fields() {
        let entity = Entity::from_spec(9, &EntitySpec::base(Vec2::new(4.0, 5.0), 12.0));
        let record = entity.record();
        assert_eq!(record.id, 9);
        assert_eq!(record.kind, EntityKind::Base);
        assert_eq!((record.x, record.y), (4.0, 5.0));
        assert_eq!(record.radius, 12.0);
    }
}
