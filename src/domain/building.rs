// src/domain/building.rs

use serde::Serialize;

use crate::domain::report::Severity;
use crate::domain::time::{rfc3339, rfc3339_opt};
use crate::domain::DAY_SECS;

/// Minimum gap between two "condition is fine" confirmations of one building.
pub const POSITIVE_COOLDOWN_SECS: i64 = DAY_SECS;

pub const RED_SCORE: u32 = 45;
pub const ORANGE_SCORE: u32 = 25;
pub const YELLOW_SCORE: u32 = 10;

#[derive(Debug, Clone, Serialize)]
pub struct Building {
    pub id: i64,
    pub lat: f64,
    pub lng: f64,
    pub address: Option<String>,
    #[serde(serialize_with = "rfc3339")]
    pub created_at: i64,
    pub positive_count: i64,
    #[serde(serialize_with = "rfc3339_opt")]
    pub last_positive_at: Option<i64>,
}

/// Traffic-light classification shown on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildingStatus {
    Green,
    Yellow,
    Orange,
    Red,
}

text_enum!(BuildingStatus, "building status" {
    Green => "green",
    Yellow => "yellow",
    Orange => "orange",
    Red => "red",
});

pub fn severity_weight(severity: Severity) -> u32 {
    match severity {
        Severity::High => 3,
        Severity::Medium => 1,
        Severity::Low => 0,
    }
}

/// Sum of weights over every report of a building, any status.
pub fn score<I>(severities: I) -> u32
where
    I: IntoIterator<Item = Severity>,
{
    severities.into_iter().map(severity_weight).sum()
}

pub fn classify(score: u32) -> BuildingStatus {
    if score >= RED_SCORE {
        BuildingStatus::Red
    } else if score >= ORANGE_SCORE {
        BuildingStatus::Orange
    } else if score >= YELLOW_SCORE {
        BuildingStatus::Yellow
    } else {
        BuildingStatus::Green
    }
}

pub fn building_status<I>(severities: I) -> BuildingStatus
where
    I: IntoIterator<Item = Severity>,
{
    classify(score(severities))
}

/// Row of the map listing.
#[derive(Debug, Clone, Serialize)]
pub struct BuildingSummary {
    pub id: i64,
    pub lat: f64,
    pub lng: f64,
    pub address: Option<String>,
    pub status: BuildingStatus,
    pub positive_count: i64,
    /// Open neighbor-help requests.
    pub help_count: i64,
}

/// Map viewport, degrees, inclusive on all edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// All four edges or no filter at all.
    pub fn from_parts(
        south: Option<f64>,
        west: Option<f64>,
        north: Option<f64>,
        east: Option<f64>,
    ) -> Option<Self> {
        Some(Self {
            south: south?,
            west: west?,
            north: north?,
            east: east?,
        })
    }
}
