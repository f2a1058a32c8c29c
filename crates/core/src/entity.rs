//! Entity records stored by backends
//!
//! Field names follow the public review dataset, so dataset lines deserialize
//! directly. Optional dataset columns default when absent and unknown columns
//! are ignored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The entity collections a backend must support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Registered users
    User,
    /// Businesses
    Business,
    /// Star reviews
    Review,
    /// Short tips
    Tip,
    /// Checkins
    Checkin,
    /// Business photos
    Photo,
}

impl EntityKind {
    /// Every kind, in declaration order.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::User,
        EntityKind::Business,
        EntityKind::Review,
        EntityKind::Tip,
        EntityKind::Checkin,
        EntityKind::Photo,
    ];

    /// Lowercase name, also used as the collection name.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Business => "business",
            EntityKind::Review => "review",
            EntityKind::Tip => "tip",
            EntityKind::Checkin => "checkin",
            EntityKind::Photo => "photo",
        }
    }

    /// Name of the identifier field for this kind.
    pub fn id_field(self) -> &'static str {
        match self {
            EntityKind::User => "user_id",
            EntityKind::Business => "business_id",
            EntityKind::Review => "review_id",
            EntityKind::Tip => "tip_id",
            EntityKind::Checkin => "checkin_id",
            EntityKind::Photo => "photo_id",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let singular = lower.strip_suffix("es").filter(|s| *s == "business");
        let singular = singular.or_else(|| lower.strip_suffix('s')).unwrap_or(&lower);
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == lower || kind.as_str() == singular)
            .ok_or_else(|| Error::InvalidConfig(format!("unknown entity kind: {}", s)))
    }
}

// =============================================================================
// Records
// =============================================================================

/// A registered user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    /// Identifier
    pub user_id: String,
    /// Display name
    pub name: String,
    /// Number of reviews written
    #[serde(default)]
    pub review_count: u32,
    /// Registration date (`YYYY-MM-DD`)
    #[serde(default)]
    pub yelping_since: Option<String>,
}

/// A business listing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Business {
    /// Identifier
    pub business_id: String,
    /// Business name
    #[serde(default)]
    pub name: String,
    /// Street address
    #[serde(default)]
    pub address: String,
    /// City
    #[serde(default)]
    pub city: String,
    /// State or province code
    #[serde(default)]
    pub state: String,
    /// Postal code
    #[serde(default)]
    pub postal_code: String,
    /// Latitude
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Average rating
    #[serde(default)]
    pub stars: Option<f64>,
    /// Number of reviews
    #[serde(default)]
    pub review_count: Option<u32>,
    /// 1 if open, 0 if closed
    #[serde(default)]
    pub is_open: Option<u8>,
    /// Comma-separated category list
    #[serde(default)]
    pub categories: Option<String>,
}

impl Business {
    /// Categories as trimmed, non-empty tokens.
    pub fn category_list(&self) -> impl Iterator<Item = &str> {
        self.categories
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// A star review.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Review {
    /// Identifier
    pub review_id: String,
    /// Author
    pub user_id: String,
    /// Reviewed business
    pub business_id: String,
    /// Rating
    pub stars: f64,
    /// Date (`YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`)
    #[serde(default)]
    pub date: String,
    /// Body
    #[serde(default)]
    pub text: String,
    /// Useful votes
    #[serde(default)]
    pub useful: u32,
    /// Funny votes
    #[serde(default)]
    pub funny: u32,
    /// Cool votes
    #[serde(default)]
    pub cool: u32,
}

/// A short tip. The dataset carries no tip id; one is assigned on insert.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Tip {
    /// Identifier
    #[serde(default)]
    pub tip_id: String,
    /// Author
    pub user_id: String,
    /// Business the tip is about
    pub business_id: String,
    /// Body
    #[serde(default)]
    pub text: String,
    /// Date
    #[serde(default)]
    pub date: String,
    /// Compliments received
    #[serde(default)]
    pub compliment_count: u32,
}

/// A checkin record. The dataset carries no checkin id; one is assigned on insert.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Checkin {
    /// Identifier
    #[serde(default)]
    pub checkin_id: String,
    /// Business checked into
    pub business_id: String,
    /// Date or comma-separated dates
    #[serde(default)]
    pub date: String,
}

/// A business photo.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Photo {
    /// Identifier
    pub photo_id: String,
    /// Business shown
    pub business_id: String,
    /// Caption
    #[serde(default)]
    pub caption: String,
    /// Label (food, inside, outside, ...)
    #[serde(default)]
    pub label: String,
}

// =============================================================================
// Entity
// =============================================================================

/// Any record a backend stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    /// A user
    User(User),
    /// A business
    Business(Business),
    /// A review
    Review(Review),
    /// A tip
    Tip(Tip),
    /// A checkin
    Checkin(Checkin),
    /// A photo
    Photo(Photo),
}

impl Entity {
    /// Kind of this record.
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::User(_) => EntityKind::User,
            Entity::Business(_) => EntityKind::Business,
            Entity::Review(_) => EntityKind::Review,
            Entity::Tip(_) => EntityKind::Tip,
            Entity::Checkin(_) => EntityKind::Checkin,
            Entity::Photo(_) => EntityKind::Photo,
        }
    }

    /// Identifier of this record; may be empty for dataset tips and checkins.
    pub fn id(&self) -> &str {
        match self {
            Entity::User(u) => &u.user_id,
            Entity::Business(b) => &b.business_id,
            Entity::Review(r) => &r.review_id,
            Entity::Tip(t) => &t.tip_id,
            Entity::Checkin(c) => &c.checkin_id,
            Entity::Photo(p) => &p.photo_id,
        }
    }

    /// Assign `id` if the record has none. Returns true if it was assigned.
    pub fn ensure_id(&mut self, id: impl FnOnce() -> String) -> bool {
        let slot = match self {
            Entity::User(u) => &mut u.user_id,
            Entity::Business(b) => &mut b.business_id,
            Entity::Review(r) => &mut r.review_id,
            Entity::Tip(t) => &mut t.tip_id,
            Entity::Checkin(c) => &mut c.checkin_id,
            Entity::Photo(p) => &mut p.photo_id,
        };
        if slot.is_empty() {
            *slot = id();
            true
        } else {
            false
        }
    }

    /// String value of a named field, for criteria matching.
    ///
    /// Returns `None` for unknown fields and for absent optional values.
    pub fn field(&self, name: &str) -> Option<String> {
        match self {
            Entity::User(u) => match name {
                "user_id" => Some(u.user_id.clone()),
                "name" => Some(u.name.clone()),
                "review_count" => Some(u.review_count.to_string()),
                "yelping_since" => u.yelping_since.clone(),
                _ => None,
            },
            Entity::Business(b) => match name {
                "business_id" => Some(b.business_id.clone()),
                "name" => Some(b.name.clone()),
                "address" => Some(b.address.clone()),
                "city" => Some(b.city.clone()),
                "state" => Some(b.state.clone()),
                "postal_code" => Some(b.postal_code.clone()),
                "stars" => b.stars.map(|s| s.to_string()),
                "review_count" => b.review_count.map(|c| c.to_string()),
                "is_open" => b.is_open.map(|o| o.to_string()),
                "categories" => b.categories.clone(),
                _ => None,
            },
            Entity::Review(r) => match name {
                "review_id" => Some(r.review_id.clone()),
                "user_id" => Some(r.user_id.clone()),
                "business_id" => Some(r.business_id.clone()),
                "stars" => Some(r.stars.to_string()),
                "date" => Some(r.date.clone()),
                "text" => Some(r.text.clone()),
                _ => None,
            },
            Entity::Tip(t) => match name {
                "tip_id" => Some(t.tip_id.clone()),
                "user_id" => Some(t.user_id.clone()),
                "business_id" => Some(t.business_id.clone()),
                "text" => Some(t.text.clone()),
                "date" => Some(t.date.clone()),
                "compliment_count" => Some(t.compliment_count.to_string()),
                _ => None,
            },
            Entity::Checkin(c) => match name {
                "checkin_id" => Some(c.checkin_id.clone()),
                "business_id" => Some(c.business_id.clone()),
                "date" => Some(c.date.clone()),
                _ => None,
            },
            Entity::Photo(p) => match name {
                "photo_id" => Some(p.photo_id.clone()),
                "business_id" => Some(p.business_id.clone()),
                "caption" => Some(p.caption.clone()),
                "label" => Some(p.label.clone()),
                _ => None,
            },
        }
    }
}

macro_rules! impl_from_record {
    ($($record:ident),*) => {
        $(
            impl From<$record> for Entity {
                fn from(record: $record) -> Self {
                    Entity::$record(record)
                }
            }
        )*
    };
}

impl_from_record!(User, Business, Review, Tip, Checkin, Photo);
