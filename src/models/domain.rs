use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A category of aid offered by a shelter. Closed vocabulary; unknown
/// values are rejected at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceTag {
    Meals,
    Beds,
    Showers,
    Medical,
    Counseling,
    Childcare,
    JobPlacement,
}

impl ServiceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceTag::Meals => "meals",
            ServiceTag::Beds => "beds",
            ServiceTag::Showers => "showers",
            ServiceTag::Medical => "medical",
            ServiceTag::Counseling => "counseling",
            ServiceTag::Childcare => "childcare",
            ServiceTag::JobPlacement => "job-placement",
        }
    }
}

impl FromStr for ServiceTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meals" => Ok(ServiceTag::Meals),
            "beds" => Ok(ServiceTag::Beds),
            "showers" => Ok(ServiceTag::Showers),
            "medical" => Ok(ServiceTag::Medical),
            "counseling" => Ok(ServiceTag::Counseling),
            "childcare" => Ok(ServiceTag::Childcare),
            "job-placement" => Ok(ServiceTag::JobPlacement),
            other => Err(format!("unknown service tag: {}", other)),
        }
    }
}

impl fmt::Display for ServiceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An accessibility/eligibility attribute of a shelter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureTag {
    Accessible,
    PetFriendly,
    FamilyFriendly,
    VeteransOnly,
}

impl FeatureTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureTag::Accessible => "accessible",
            FeatureTag::PetFriendly => "pet-friendly",
            FeatureTag::FamilyFriendly => "family-friendly",
            FeatureTag::VeteransOnly => "veterans-only",
        }
    }
}

impl FromStr for FeatureTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accessible" => Ok(FeatureTag::Accessible),
            "pet-friendly" => Ok(FeatureTag::PetFriendly),
            "family-friendly" => Ok(FeatureTag::FamilyFriendly),
            "veterans-only" => Ok(FeatureTag::VeteransOnly),
            other => Err(format!("unknown feature tag: {}", other)),
        }
    }
}

impl fmt::Display for FeatureTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shelter record with capacity and location data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shelter {
    pub id: i64,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    pub capacity: u32,
    #[serde(default)]
    pub current: u32,
    #[serde(default)]
    pub services: Vec<ServiceTag>,
    #[serde(default)]
    pub tags: Vec<FeatureTag>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub hours: String,
    #[serde(default)]
    pub phone: String,
}

impl Shelter {
    pub fn has_service(&self, tag: ServiceTag) -> bool {
        self.services.contains(&tag)
    }

    pub fn has_tag(&self, tag: FeatureTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Remaining open spots, saturating at zero for over-capacity data.
    pub fn spots_left(&self) -> u32 {
        self.capacity.saturating_sub(self.current)
    }
}

/// User matching preferences. Saved wholesale; missing fields default
/// to false/zero so legacy documents keep deserializing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub needs_meals: bool,
    pub needs_shelter: bool,
    pub needs_medical: bool,
    pub needs_counseling: bool,
    pub needs_childcare: bool,
    pub needs_employment: bool,
    pub requires_wheelchair: bool,
    pub requires_pet_friendly: bool,
    pub requires_family: bool,
    pub requires_veteran: bool,
    pub use_gps: bool,
    pub max_distance: f64,
}

/// A shelter check-in entry on a user record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub shelter_id: i64,
    pub date: chrono::DateTime<chrono::Utc>,
}

/// Public view of a user; never exposes credential material
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub avatar: Option<String>,
    pub joined_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub bookmarks: Vec<i64>,
    #[serde(default)]
    pub check_ins: Vec<CheckIn>,
}

/// Compact user listing for the people directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub avatar: Option<String>,
    pub joined_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Connection request lifecycle state. `Rejected` is terminal for the
/// record but does not block a later request for the same pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "connection_status", rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ConnectionStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, ConnectionStatus::Pending | ConnectionStatus::Accepted)
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectionStatus::Pending => "pending",
            ConnectionStatus::Accepted => "accepted",
            ConnectionStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// A pairwise, directional connection request between two users
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecord {
    pub id: uuid::Uuid,
    pub from_user_id: String,
    pub to_user_id: String,
    pub message: String,
    pub status: ConnectionStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub responded_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Which side of a connection request the listing user is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sent,
    Received,
}

/// Connection record tagged with the listing user's direction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionalConnection {
    #[serde(flatten)]
    pub record: ConnectionRecord,
    pub direction: Direction,
}

/// Scored shelter result produced by the ranking pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredShelter {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub capacity: u32,
    pub current: u32,
    pub services: Vec<ServiceTag>,
    pub tags: Vec<FeatureTag>,
    pub rating: f32,
    pub hours: String,
    pub phone: String,
    pub match_score: u8,
    pub matched_services: Vec<ServiceTag>,
    pub match_variant: crate::core::scoring::MatchVariant,
    pub availability: String,
    pub occupancy_level: crate::core::status::OccupancyLevel,
    pub distance_mi: Option<f64>,
}
