use serde::{Deserialize, Serialize};

/// The behaviour class of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Static: never moves or turns.
    Base,
    /// Mobile: bounces off the arena walls and steers around other creeps.
    Creep,
}

impl EntityKind {
    pub fn is_mobile(self) -> bool {
        matches!(self, EntityKind::Creep)
    }

    /// Lowercase name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Base => "base",
            EntityKind::Creep => "creep",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_matches_serialized_name() {
        for kind in [EntityKind::Base, EntityKind::Creep] {
            let quoted = format!("\"{}\"", kind.as_str());
            assert_eq!(toml::Value::try_from(kind).unwrap().to_string(), quoted);
        }
    }
}
