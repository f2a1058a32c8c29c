//! Fixed value lists and literals shipped with the generator
//!
//! These are part of the reproducibility contract: editing a list changes the
//! output of every seed.

/// Fifty large US cities. City parameters are always drawn from this list.
pub const CITIES: [&str; 50] = [
    "New York",
    "Los Angeles",
    "Chicago",
    "Houston",
    "Phoenix",
    "Philadelphia",
    "San Antonio",
    "San Diego",
    "Dallas",
    "San Jose",
    "Austin",
    "Jacksonville",
    "Fort Worth",
    "Columbus",
    "Charlotte",
    "San Francisco",
    "Indianapolis",
    "Seattle",
    "Denver",
    "Washington",
    "Boston",
    "El Paso",
    "Nashville",
    "Detroit",
    "Oklahoma City",
    "Portland",
    "Las Vegas",
    "Memphis",
    "Louisville",
    "Baltimore",
    "Milwaukee",
    "Albuquerque",
    "Tucson",
    "Fresno",
    "Mesa",
    "Sacramento",
    "Atlanta",
    "Kansas City",
    "Colorado Springs",
    "Miami",
    "Raleigh",
    "Omaha",
    "Long Beach",
    "Virginia Beach",
    "Oakland",
    "Minneapolis",
    "Tulsa",
    "Arlington",
    "New Orleans",
    "Wichita",
];

/// Categories used when the corpus has no businesses.
pub const CATEGORIES: [&str; 16] = [
    "Restaurants",
    "Food",
    "Shopping",
    "Home Services",
    "Beauty & Spas",
    "Nightlife",
    "Health & Medical",
    "Local Services",
    "Bars",
    "Automotive",
    "Event Planning & Services",
    "Active Life",
    "Coffee & Tea",
    "Sandwiches",
    "Fast Food",
    "American (Traditional)",
];

/// Category used when a sampled business lists none.
pub const FALLBACK_CATEGORY: &str = "Restaurants";

/// User id used when the corpus has no users.
pub const FALLBACK_USER_ID: &str = "user_fallback";

/// Business id used when the corpus has no businesses.
pub const FALLBACK_BUSINESS_ID: &str = "business_fallback";

/// Review body for generated reviews.
pub const REVIEW_TEXT: &str = "This is a test review.";

/// Tip body for generated tips.
pub const TIP_TEXT: &str = "This is a test tip.";

/// Generated user names are `user_{n}` with `n` below this bound.
pub const USER_NAME_SPACE: u32 = 10_000;

/// Inclusive star rating range.
pub const STAR_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Maximum characters taken from a sampled name for prefix searches.
pub const NAME_PREFIX_LEN: usize = 3;

/// Result limit for generated prefix searches.
pub const NAME_PREFIX_LIMIT: usize = 20;

/// Checkin timestamps start at 2020-01-01T00:00:00Z (Unix seconds).
pub const CHECKIN_EPOCH_SECS: i64 = 1_577_836_800;

/// Checkin timestamps fall within this many seconds of the epoch (366 days).
pub const CHECKIN_WINDOW_SECS: i64 = 366 * 24 * 60 * 60;
