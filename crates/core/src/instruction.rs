//! Workload instructions
//!
//! An instruction is one synthetic unit of simulated user behaviour. It exists
//! in two forms:
//!
//! - [`Instruction`]: a typed enum with one variant per [`InstructionKind`].
//!   Everything inside the process works with this form.
//! - [`RawInstruction`]: `{ "type": ..., "parameters": { name: value } }`, the
//!   loosely typed shape persisted to disk.
//!
//! Conversion from raw to typed is the only validation point:
//! `Instruction::try_from(raw)` fails with [`Error::MalformedInstruction`]
//! naming the offending field, or [`Error::UnsupportedInstructionKind`] for an
//! unknown `type`. Conversion from typed to raw is total.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Ordered list of instructions produced by one generation run.
pub type InstructionSequence = Vec<Instruction>;

// =============================================================================
// InstructionKind
// =============================================================================

/// The closed set of operation kinds.
///
/// The declaration order is the ordinal order used by the generator to map a
/// random index onto a kind. Appending a kind is compatible; reordering
/// changes every generated workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InstructionKind {
    /// Register a new user
    CreateUser,
    /// Search businesses by category and city
    SearchBusiness,
    /// Read one business by id
    ViewBusiness,
    /// Post a star review
    PostReview,
    /// Post a short tip
    PostTip,
    /// Read one user by id
    ViewUser,
    /// List photos of a business
    ViewPhotos,
    /// Record a checkin at a business
    Checkin,
    /// Search users whose name starts with a prefix
    SearchByNamePrefix,
    /// Composite: create user, find a business, review it
    SubmitReviewFlow,
}

impl InstructionKind {
    /// Every kind, in ordinal order.
    pub const ALL: [InstructionKind; 10] = [
        InstructionKind::CreateUser,
        InstructionKind::SearchBusiness,
        InstructionKind::ViewBusiness,
        InstructionKind::PostReview,
        InstructionKind::PostTip,
        InstructionKind::ViewUser,
        InstructionKind::ViewPhotos,
        InstructionKind::Checkin,
        InstructionKind::SearchByNamePrefix,
        InstructionKind::SubmitReviewFlow,
    ];

    /// Position of this kind in [`InstructionKind::ALL`].
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Kind at the given ordinal.
    pub fn from_ordinal(ordinal: usize) -> Result<Self> {
        Self::ALL
            .get(ordinal)
            .copied()
            .ok_or_else(|| Error::UnsupportedInstructionKind {
                kind: format!("#{}", ordinal),
            })
    }

    /// Canonical wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            InstructionKind::CreateUser => "CreateUser",
            InstructionKind::SearchBusiness => "SearchBusiness",
            InstructionKind::ViewBusiness => "ViewBusiness",
            InstructionKind::PostReview => "PostReview",
            InstructionKind::PostTip => "PostTip",
            InstructionKind::ViewUser => "ViewUser",
            InstructionKind::ViewPhotos => "ViewPhotos",
            InstructionKind::Checkin => "Checkin",
            InstructionKind::SearchByNamePrefix => "SearchByNamePrefix",
            InstructionKind::SubmitReviewFlow => "SubmitReviewFlow",
        }
    }

    /// Parameters an instruction of this kind must carry.
    pub fn required_parameters(self) -> &'static [&'static str] {
        match self {
            InstructionKind::CreateUser => &["name"],
            InstructionKind::SearchBusiness => &["category", "city"],
            InstructionKind::ViewBusiness => &["business_id"],
            InstructionKind::PostReview => &["user_id", "business_id", "stars", "text"],
            InstructionKind::PostTip => &["user_id", "business_id", "text"],
            InstructionKind::ViewUser => &["user_id"],
            InstructionKind::ViewPhotos => &["business_id"],
            InstructionKind::Checkin => &["business_id", "timestamp"],
            InstructionKind::SearchByNamePrefix => &["prefix", "limit"],
            InstructionKind::SubmitReviewFlow => &["name", "category", "city", "stars", "text"],
        }
    }

    /// True for kinds that perform several backend calls as one unit.
    pub fn is_composite(self) -> bool {
        matches!(self, InstructionKind::SubmitReviewFlow)
    }
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstructionKind {
    type Err = Error;

    /// Accepts the canonical PascalCase name as well as snake_case and
    /// kebab-case spellings (`post_review`, `post-review`).
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().to_ascii_lowercase() == normalized)
            .ok_or_else(|| Error::UnsupportedInstructionKind { kind: s.to_string() })
    }
}

// =============================================================================
// Instruction
// =============================================================================

/// A typed workload instruction.
///
/// Serializes through [`RawInstruction`], so the JSON shape is always
/// `{ "type": ..., "parameters": {...} }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInstruction", into = "RawInstruction")]
pub enum Instruction {
    /// Register a new user
    CreateUser {
        /// Display name
        name: String,
    },
    /// Search businesses
    SearchBusiness {
        /// Category substring to match
        category: String,
        /// Exact city
        city: String,
    },
    /// Read one business
    ViewBusiness {
        /// Business id
        business_id: String,
    },
    /// Post a review
    PostReview {
        /// Author
        user_id: String,
        /// Reviewed business
        business_id: String,
        /// Rating in [1, 5]
        stars: f64,
        /// Review body
        text: String,
    },
    /// Post a tip
    PostTip {
        /// Author
        user_id: String,
        /// Business the tip is about
        business_id: String,
        /// Tip body
        text: String,
    },
    /// Read one user
    ViewUser {
        /// User id
        user_id: String,
    },
    /// List photos of a business
    ViewPhotos {
        /// Business id
        business_id: String,
    },
    /// Record a checkin
    Checkin {
        /// Business checked into
        business_id: String,
        /// Checkin time
        timestamp: DateTime<Utc>,
    },
    /// Search users by name prefix
    SearchByNamePrefix {
        /// Name prefix
        prefix: String,
        /// Maximum results
        limit: usize,
    },
    /// Composite review submission
    SubmitReviewFlow {
        /// Name of the user to create
        name: String,
        /// Category of the business to look for
        category: String,
        /// City of the business to look for
        city: String,
        /// Rating in [1, 5]
        stars: f64,
        /// Review body
        text: String,
    },
}

impl Instruction {
    /// The kind of this instruction.
    pub fn kind(&self) -> InstructionKind {
        match self {
            Instruction::CreateUser { .. } => InstructionKind::CreateUser,
            Instruction::SearchBusiness { .. } => InstructionKind::SearchBusiness,
            Instruction::ViewBusiness { .. } => InstructionKind::ViewBusiness,
            Instruction::PostReview { .. } => InstructionKind::PostReview,
            Instruction::PostTip { .. } => InstructionKind::PostTip,
            Instruction::ViewUser { .. } => InstructionKind::ViewUser,
            Instruction::ViewPhotos { .. } => InstructionKind::ViewPhotos,
            Instruction::Checkin { .. } => InstructionKind::Checkin,
            Instruction::SearchByNamePrefix { .. } => InstructionKind::SearchByNamePrefix,
            Instruction::SubmitReviewFlow { .. } => InstructionKind::SubmitReviewFlow,
        }
    }

    /// Convert to the serialized form.
    pub fn to_raw(&self) -> RawInstruction {
        RawInstruction::from(self)
    }
}

// =============================================================================
// RawInstruction
// =============================================================================

/// Serialized instruction: a kind name plus string parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInstruction {
    /// Kind name
    #[serde(rename = "type")]
    pub kind: String,
    /// Parameter name to string value
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

impl RawInstruction {
    /// Create a raw instruction with no parameters.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Builder-style parameter insertion.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Validate and convert into a typed instruction.
    pub fn validate(&self) -> Result<Instruction> {
        Instruction::try_from(self.clone())
    }
}

impl From<&Instruction> for RawInstruction {
    fn from(instruction: &Instruction) -> Self {
        let raw = RawInstruction::new(instruction.kind().as_str());
        match instruction {
            Instruction::CreateUser { name } => raw.with("name", name),
            Instruction::SearchBusiness { category, city } => {
                raw.with("category", category).with("city", city)
            }
            Instruction::ViewBusiness { business_id } => raw.with("business_id", business_id),
            Instruction::PostReview {
                user_id,
                business_id,
                stars,
                text,
            } => raw
                .with("user_id", user_id)
                .with("business_id", business_id)
                .with("stars", stars.to_string())
                .with("text", text),
            Instruction::PostTip {
                user_id,
                business_id,
                text,
            } => raw
                .with("user_id", user_id)
                .with("business_id", business_id)
                .with("text", text),
            Instruction::ViewUser { user_id } => raw.with("user_id", user_id),
            Instruction::ViewPhotos { business_id } => raw.with("business_id", business_id),
            Instruction::Checkin {
                business_id,
                timestamp,
            } => raw.with("business_id", business_id).with(
                "timestamp",
                timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            ),
            Instruction::SearchByNamePrefix { prefix, limit } => {
                raw.with("prefix", prefix).with("limit", limit.to_string())
            }
            Instruction::SubmitReviewFlow {
                name,
                category,
                city,
                stars,
                text,
            } => raw
                .with("name", name)
                .with("category", category)
                .with("city", city)
                .with("stars", stars.to_string())
                .with("text", text),
        }
    }
}

impl From<Instruction> for RawInstruction {
    fn from(instruction: Instruction) -> Self {
        RawInstruction::from(&instruction)
    }
}

impl TryFrom<RawInstruction> for Instruction {
    type Error = Error;

    fn try_from(raw: RawInstruction) -> Result<Self> {
        let kind: InstructionKind = raw.kind.parse()?;
        let p = Params {
            kind,
            map: &raw.parameters,
        };

        let instruction = match kind {
            InstructionKind::CreateUser => Instruction::CreateUser {
                name: p.text("name")?,
            },
            InstructionKind::SearchBusiness => Instruction::SearchBusiness {
                category: p.text("category")?,
                city: p.text("city")?,
            },
            InstructionKind::ViewBusiness => Instruction::ViewBusiness {
                business_id: p.id("business_id")?,
            },
            InstructionKind::PostReview => Instruction::PostReview {
                user_id: p.id("user_id")?,
                business_id: p.id("business_id")?,
                stars: p.stars("stars")?,
                text: p.text("text")?,
            },
            InstructionKind::PostTip => Instruction::PostTip {
                user_id: p.id("user_id")?,
                business_id: p.id("business_id")?,
                text: p.text("text")?,
            },
            InstructionKind::ViewUser => Instruction::ViewUser {
                user_id: p.id("user_id")?,
            },
            InstructionKind::ViewPhotos => Instruction::ViewPhotos {
                business_id: p.id("business_id")?,
            },
            InstructionKind::Checkin => Instruction::Checkin {
                business_id: p.id("business_id")?,
                timestamp: p.timestamp("timestamp")?,
            },
            InstructionKind::SearchByNamePrefix => Instruction::SearchByNamePrefix {
                prefix: p.id("prefix")?,
                limit: p.limit("limit")?,
            },
            InstructionKind::SubmitReviewFlow => Instruction::SubmitReviewFlow {
                name: p.text("name")?,
                category: p.text("category")?,
                city: p.text("city")?,
                stars: p.stars("stars")?,
                text: p.text("text")?,
            },
        };
        Ok(instruction)
    }
}

/// Typed accessors over a parameter map, reporting failures against `kind`.
struct Params<'a> {
    kind: InstructionKind,
    map: &'a BTreeMap<String, String>,
}

impl Params<'_> {
    fn raw(&self, field: &str) -> Result<&str> {
        self.map
            .get(field)
            .map(String::as_str)
            .ok_or_else(|| Error::missing(self.kind.as_str(), field))
    }

    /// Free text; may be empty.
    fn text(&self, field: &str) -> Result<String> {
        self.raw(field).map(str::to_string)
    }

    /// Identifier; must be non-blank.
    fn id(&self, field: &str) -> Result<String> {
        let value = self.raw(field)?;
        if value.trim().is_empty() {
            return Err(Error::invalid(self.kind.as_str(), field, "is empty"));
        }
        Ok(value.to_string())
    }

    fn stars(&self, field: &str) -> Result<f64> {
        let value = self.raw(field)?;
        let stars: f64 = value.trim().parse().map_err(|_| {
            Error::invalid(
                self.kind.as_str(),
                field,
                format!("is not a number: {:?}", value),
            )
        })?;
        if !(1.0..=5.0).contains(&stars) {
            return Err(Error::invalid(
                self.kind.as_str(),
                field,
                format!("is out of range [1, 5]: {}", stars),
            ));
        }
        Ok(stars)
    }

    fn limit(&self, field: &str) -> Result<usize> {
        let value = self.raw(field)?;
        match value.trim().parse::<usize>() {
            Ok(0) => Err(Error::invalid(self.kind.as_str(), field, "must be positive")),
            Ok(limit) => Ok(limit),
            Err(_) => Err(Error::invalid(
                self.kind.as_str(),
                field,
                format!("is not a positive integer: {:?}", value),
            )),
        }
    }

    fn timestamp(&self, field: &str) -> Result<DateTime<Utc>> {
        let value = self.raw(field)?;
        parse_timestamp(value).ok_or_else(|| {
            Error::invalid(
                self.kind.as_str(),
                field,
                format!("is not a timestamp: {:?}", value),
            )
        })
    }
}

/// Parse RFC 3339, `YYYY-MM-DD HH:MM:SS` (UTC) or a bare date (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
