use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::FormData;
use crate::errors::ClientError;

/// Star rating, 1 through 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Rating(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ClientError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value).ok_or_else(|| {
            ClientError::Validation(format!("rating must be between 1 and 5, got {value}"))
        })
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> u8 {
        rating.0
    }
}

impl FromStr for Rating {
    type Err = ClientError;

    /// Parse the value of a rating radio input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .trim()
            .parse()
            .map_err(|_| ClientError::Validation(format!("invalid rating: {s:?}")))?;
        Rating::try_from(value)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pending review for a single completed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub order_id: String,
    /// At most one rating is selected at a time.
    pub rating: Option<Rating>,
    pub comment: String,
}

impl ReviewDraft {
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            rating: None,
            comment: String::new(),
        }
    }

    pub fn select_rating(&mut self, rating: Rating) {
        self.rating = Some(rating);
    }

    /// Payload for `POST /submit_review`, or `None` while no rating is selected.
    /// The comment is sent exactly as typed.
    pub fn to_form(&self) -> Option<FormData> {
        let rating = self.rating?;
        Some(
            FormData::new()
                .append("order_id", self.order_id.as_str())
                .append("rating", rating.to_string())
                .append("comment", self.comment.as_str()),
        )
    }
}
