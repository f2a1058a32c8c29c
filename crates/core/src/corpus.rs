//! Reference corpus: sample identifiers the generator draws from
//!
//! Samples are trimmed projections of full dataset records. Sample files are
//! snake_case JSON; PascalCase keys are accepted as aliases so sample files
//! produced by other tooling load unchanged.

use serde::{Deserialize, Serialize};

use crate::entity::{Business, Review, User};

/// Business projection used for ids, categories and cities.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BusinessSample {
    /// Business id
    #[serde(alias = "BusinessId")]
    pub business_id: String,
    /// Name
    #[serde(default, alias = "Name")]
    pub name: String,
    /// City
    #[serde(default, alias = "City")]
    pub city: String,
    /// State
    #[serde(default, alias = "State")]
    pub state: String,
    /// Comma-separated categories
    #[serde(default, alias = "Categories")]
    pub categories: Option<String>,
}

impl BusinessSample {
    /// First listed category, if any.
    pub fn primary_category(&self) -> Option<&str> {
        self.categories
            .as_deref()?
            .split(',')
            .map(str::trim)
            .find(|c| !c.is_empty())
    }
}

impl From<&Business> for BusinessSample {
    fn from(b: &Business) -> Self {
        Self {
            business_id: b.business_id.clone(),
            name: b.name.clone(),
            city: b.city.clone(),
            state: b.state.clone(),
            categories: b.categories.clone(),
        }
    }
}

/// User projection used for ids and name prefixes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserSample {
    /// User id
    #[serde(alias = "UserId")]
    pub user_id: String,
    /// Display name
    #[serde(default, alias = "Name")]
    pub name: String,
    /// Review count
    #[serde(default, alias = "ReviewCount")]
    pub review_count: Option<u32>,
}

impl From<&User> for UserSample {
    fn from(u: &User) -> Self {
        Self {
            user_id: u.user_id.clone(),
            name: u.name.clone(),
            review_count: Some(u.review_count),
        }
    }
}

/// Review projection used for point-read scenarios.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReviewSample {
    /// Review id
    #[serde(alias = "ReviewId")]
    pub review_id: String,
    /// Author
    #[serde(default, alias = "UserId")]
    pub user_id: String,
    /// Reviewed business
    #[serde(default, alias = "BusinessId")]
    pub business_id: String,
    /// Rating
    #[serde(default, alias = "Stars")]
    pub stars: f64,
}

impl From<&Review> for ReviewSample {
    fn from(r: &Review) -> Self {
        Self {
            review_id: r.review_id.clone(),
            user_id: r.user_id.clone(),
            business_id: r.business_id.clone(),
            stars: r.stars,
        }
    }
}

/// Read-only sample sets. Built once before generation and never mutated;
/// share it with `Arc` when several tasks need it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReferenceCorpus {
    /// Business samples
    #[serde(default)]
    pub businesses: Vec<BusinessSample>,
    /// User samples
    #[serde(default)]
    pub users: Vec<UserSample>,
    /// Review samples
    #[serde(default)]
    pub reviews: Vec<ReviewSample>,
}

impl ReferenceCorpus {
    /// An empty corpus; generation falls back to fixed literals.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from sample sets.
    pub fn new(
        businesses: Vec<BusinessSample>,
        users: Vec<UserSample>,
        reviews: Vec<ReviewSample>,
    ) -> Self {
        Self {
            businesses,
            users,
            reviews,
        }
    }

    /// True when no sample set has entries.
    pub fn is_empty(&self) -> bool {
        self.businesses.is_empty() && self.users.is_empty() && self.reviews.is_empty()
    }

    /// Total number of samples across all sets.
    pub fn len(&self) -> usize {
        self.businesses.len() + self.users.len() + self.reviews.len()
    }
}
