use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ResourceKind {
    Military,
    Economy,
    Custom(String),
}

string_enum_open!(ResourceKind, "resource kind", {
    Military => "military",
    Economy => "economy",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub kind: ResourceKind,
}

impl Resource {
    pub fn new(id: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_is_custom() {
        let kind: ResourceKind = serde_json::from_str("\"luxury\"").unwrap();
        assert_eq!(kind, ResourceKind::Custom("luxury".to_string()));
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"luxury\"");
    }

    #[test]
    fn empty_kind_rejected() {
        let kind: Result<ResourceKind, _> = serde_json::from_str("\"\"");
        assert!(kind.is_err());
    }
}
