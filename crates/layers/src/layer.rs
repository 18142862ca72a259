use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The interchangeable base maps. Exactly one is mounted at a time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileLayerId {
    #[default]
    Standard,
    Satellite,
    Explore,
}

/// An XYZ tile template plus what a map needs to display it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TileSource {
    pub id: TileLayerId,
    pub name: &'static str,
    /// `{z}`, `{x}`, `{y}` and optionally `{s}` placeholders.
    pub url_template: &'static str,
    pub subdomains: &'static [&'static str],
    pub attribution: &'static str,
    pub min_zoom: u8,
    pub max_zoom: u8,
}

pub const STANDARD: TileSource = TileSource {
    id: TileLayerId::Standard,
    name: "OpenStreetMap",
    url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
    subdomains: &[],
    attribution: "© OpenStreetMap contributors",
    min_zoom: 0,
    max_zoom: 19,
};

pub const SATELLITE: TileSource = TileSource {
    id: TileLayerId::Satellite,
    name: "Esri World Imagery",
    url_template: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
    subdomains: &[],
    attribution: "Tiles © Esri, Maxar, Earthstar Geographics, and the GIS User Community",
    min_zoom: 0,
    max_zoom: 19,
};

pub const EXPLORE: TileSource = TileSource {
    id: TileLayerId::Explore,
    name: "OpenTopoMap",
    url_template: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
    subdomains: &["a", "b", "c"],
    attribution: "© OpenStreetMap contributors, SRTM | © OpenTopoMap (CC-BY-SA)",
    min_zoom: 0,
    max_zoom: 17,
};

impl TileLayerId {
    pub const ALL: [TileLayerId; 3] = [
        TileLayerId::Standard,
        TileLayerId::Satellite,
        TileLayerId::Explore,
    ];

    pub fn source(self) -> &'static TileSource {
        match self {
            TileLayerId::Standard => &STANDARD,
            TileLayerId::Satellite => &SATELLITE,
            TileLayerId::Explore => &EXPLORE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TileLayerId::Standard => "standard",
            TileLayerId::Satellite => "satellite",
            TileLayerId::Explore => "explore",
        }
    }
}

impl std::fmt::Display for TileLayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TileLayerId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TileLayerId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tile layer {s:?} (expected standard, satellite or explore)"))
    }
}

impl TileSource {
    pub fn clamp_zoom(&self, zoom: u8) -> u8 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}
