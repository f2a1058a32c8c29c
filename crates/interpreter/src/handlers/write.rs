//! Handlers that insert records

use chrono::{DateTime, Utc};

use yardstick_core::{Checkin, Entity, Result, Review, Tip, User};

use super::{dataset_datetime, fresh_id, today};
use crate::backend::Backend;

/// Insert a new user. Returns the generated user id.
pub async fn create_user(backend: &dyn Backend, name: &str) -> Result<String> {
    let user_id = fresh_id();
    backend
        .insert(Entity::User(User {
            user_id: user_id.clone(),
            name: name.to_string(),
            review_count: 0,
            yelping_since: Some(today()),
        }))
        .await?;
    Ok(user_id)
}

/// Insert a review dated today.
pub async fn post_review(
    backend: &dyn Backend,
    user_id: &str,
    business_id: &str,
    stars: f64,
    text: &str,
) -> Result<()> {
    backend
        .insert(Entity::Review(Review {
            review_id: fresh_id(),
            user_id: user_id.to_string(),
            business_id: business_id.to_string(),
            stars,
            date: today(),
            text: text.to_string(),
            useful: 0,
            funny: 0,
            cool: 0,
        }))
        .await
}

/// Insert a tip dated today.
pub async fn post_tip(
    backend: &dyn Backend,
    user_id: &str,
    business_id: &str,
    text: &str,
) -> Result<()> {
    backend
        .insert(Entity::Tip(Tip {
            tip_id: fresh_id(),
            user_id: user_id.to_string(),
            business_id: business_id.to_string(),
            text: text.to_string(),
            date: today(),
            compliment_count: 0,
        }))
        .await
}

/// Insert a checkin at `timestamp`.
pub async fn checkin(backend: &dyn Backend, business_id: &str, timestamp: &DateTime<Utc>) -> Result<()> {
    backend
        .insert(Entity::Checkin(Checkin {
            checkin_id: fresh_id(),
            business_id: business_id.to_string(),
            date: dataset_datetime(timestamp),
        }))
        .await
}
