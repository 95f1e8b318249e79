use serde::{Deserialize, Serialize};

/// A `{ name, url }` reference to another API resource (locations, origins).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// One record from `GET /character`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    /// "Alive", "Dead" or "unknown"
    pub status: String,
    pub species: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub gender: String,
    #[serde(default)]
    pub origin: Option<NamedResource>,
    pub location: NamedResource,
    pub image: String,
    /// Episode URLs in airing order.
    #[serde(default)]
    pub episode: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub count: u32,
    pub pages: u32,
    pub next: Option<String>,
    pub prev: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPage {
    #[serde(default)]
    pub info: Option<PageInfo>,
    pub results: Vec<Character>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub name: String,
    #[serde(default)]
    pub id: Option<u64>,
    /// Season/episode code such as `S01E01`.
    #[serde(default)]
    pub episode: Option<String>,
    #[serde(default)]
    pub air_date: Option<String>,
}
