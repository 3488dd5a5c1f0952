use std::io;
use std::path::PathBuf;

use crate::model::EntityKind;

/// Failures while reading or validating world content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown world: {0}")]
    UnknownWorld(String),
    #[error("invalid {kind} id: {id:?}")]
    InvalidId { kind: EntityKind, id: String },
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: EntityKind, id: String },
    #[error("{owner} references unknown {kind} {id}")]
    UnknownReference {
        kind: EntityKind,
        id: String,
        owner: String,
    },
    #[error("invalid content: {0}")]
    Invalid(String),
}

/// Failures of world queries and commands.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },
    #[error("tile ({x}, {y}) is outside the {width}x{height} map")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },
    #[error("no relation between {from} and {to}")]
    NoRelation { from: String, to: String },
    #[error(transparent)]
    Content(#[from] ContentError),
}

impl WorldError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        WorldError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Why a province cannot be attacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidTargetReason {
    EmptyId,
    UnknownProvince,
    Locked,
    NotBordering,
    OwnProvince,
    NeutralProvince,
}

string_enum!(InvalidTargetReason {
    EmptyId => "empty_id",
    UnknownProvince => "unknown_province",
    Locked => "locked",
    NotBordering => "not_bordering",
    OwnProvince => "own_province",
    NeutralProvince => "neutral_province",
});

/// Failures of `attack_province`.
///
/// `InvalidTarget` is a caller bug: targets should already have passed the
/// eligibility filter used by target selection. It is never retried.
#[derive(Debug, thiserror::Error)]
pub enum AttackError {
    #[error("invalid target province {province_id:?}: {reason}")]
    InvalidTarget {
        province_id: String,
        reason: InvalidTargetReason,
    },
    #[error(transparent)]
    World(#[from] WorldError),
}

impl AttackError {
    pub fn invalid(province_id: &str, reason: InvalidTargetReason) -> Self {
        AttackError::InvalidTarget {
            province_id: province_id.to_string(),
            reason,
        }
    }

    /// The rejection reason, if this is an invalid-target error.
    pub fn invalid_reason(&self) -> Option<InvalidTargetReason> {
        match self {
            AttackError::InvalidTarget { reason, .. } => Some(*reason),
            AttackError::World(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_entity() {
        let err = WorldError::not_found(EntityKind::Province, "atlantis");
        assert_eq!(err.to_string(), "province not found: atlantis");

        let err = AttackError::invalid("tuscia", InvalidTargetReason::Locked);
        assert_eq!(err.to_string(), "invalid target province \"tuscia\": locked");
        assert_eq!(err.invalid_reason(), Some(InvalidTargetReason::Locked));
    }

    #[test]
    fn world_errors_convert_into_attack_errors() {
        let err: AttackError = WorldError::not_found(EntityKind::Faction, "rome").into();
        assert!(err.invalid_reason().is_none());
        assert_eq!(err.to_string(), "faction not found: rome");
    }
}
