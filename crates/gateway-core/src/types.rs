//! Route type discriminator.

use crate::envelope::FieldEnum;
use crate::error::GatewayError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The family of request/response shapes a route serves.
///
/// Serialized as its tag, e.g. `llm/v1/chat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteType {
    /// Text completions.
    Completions,
    /// Chat completions.
    Chat,
    /// Text embeddings.
    Embeddings,
}

impl FieldEnum for RouteType {
    const VARIANTS: &'static [Self] = &[Self::Completions, Self::Chat, Self::Embeddings];

    fn as_str(self) -> &'static str {
        match self {
            Self::Completions => "llm/v1/completions",
            Self::Chat => "llm/v1/chat",
            Self::Embeddings => "llm/v1/embeddings",
        }
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteType {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_field("route_type", s)
    }
}

impl Serialize for RouteType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RouteType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
