//! Companion loyalty value objects
//!
//! ## Loyalty Model
//!
//! Each recruitable companion carries a loyalty score in `[0, 100]` and two
//! keyword lists:
//!
//! - **likes**: each keyword found in a declared action adds `+10`
//! - **dislikes**: each keyword found adds `-15`
//!
//! Matching is a case-insensitive substring test, and contributions are
//! cumulative. The net delta is applied as one clamped mutation.
//!
//! Reaching 0 from above is what makes a companion walk out; that edge is
//! detected by the `Companion` aggregate, not here.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

pub const LOYALTY_MIN: i32 = 0;
pub const LOYALTY_MAX: i32 = 100;
/// Loyalty gained per matched like keyword
pub const LIKE_BONUS: i32 = 10;
/// Loyalty lost per matched dislike keyword
pub const DISLIKE_PENALTY: i32 = -15;

/// Label shown to the player for a companion's loyalty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoyaltyStatus {
    /// 80 and above
    Devoted,
    /// 60 - 79
    Loyal,
    /// 40 - 59
    Neutral,
    /// 20 - 39
    Suspicious,
    /// 1 - 19
    Hostile,
    /// Loyalty exhausted
    Gone,
    /// Companion never takes part in loyalty math
    NotRecruitable,
}

impl LoyaltyStatus {
    /// Map a loyalty score to its label
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 80 => LoyaltyStatus::Devoted,
            s if s >= 60 => LoyaltyStatus::Loyal,
            s if s >= 40 => LoyaltyStatus::Neutral,
            s if s >= 20 => LoyaltyStatus::Suspicious,
            s if s > 0 => LoyaltyStatus::Hostile,
            _ => LoyaltyStatus::Gone,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LoyaltyStatus::Devoted => "Devoted",
            LoyaltyStatus::Loyal => "Loyal",
            LoyaltyStatus::Neutral => "Neutral",
            LoyaltyStatus::Suspicious => "Suspicious",
            LoyaltyStatus::Hostile => "Hostile",
            LoyaltyStatus::Gone => "Gone",
            LoyaltyStatus::NotRecruitable => "Not recruitable",
        }
    }
}

impl fmt::Display for LoyaltyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Before/after pair for one loyalty mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoyaltyShift {
    pub from: i32,
    pub to: i32,
}

impl LoyaltyShift {
    /// The strictly-positive-to-zero transition that triggers departure
    pub fn hit_floor(&self) -> bool {
        self.to == LOYALTY_MIN && self.from > LOYALTY_MIN
    }
}

/// Loyalty score plus the keywords that move it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loyalty {
    current: i32,
    #[serde(default)]
    likes: Vec<String>,
    #[serde(default)]
    dislikes: Vec<String>,
}

impl Default for Loyalty {
    /// Neutral starting point with no keywords
    fn default() -> Self {
        Self {
            current: 50,
            likes: Vec::new(),
            dislikes: Vec::new(),
        }
    }
}

impl Loyalty {
    pub fn new(current: i32) -> Result<Self, DomainError> {
        if !(LOYALTY_MIN..=LOYALTY_MAX).contains(&current) {
            return Err(DomainError::validation(format!(
                "Loyalty {} outside [{}, {}]",
                current, LOYALTY_MIN, LOYALTY_MAX
            )));
        }
        Ok(Self {
            current,
            ..Self::default()
        })
    }

    pub fn with_likes<I, S>(mut self, likes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.likes = likes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dislikes<I, S>(mut self, dislikes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dislikes = dislikes.into_iter().map(Into::into).collect();
        self
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn likes(&self) -> &[String] {
        &self.likes
    }

    pub fn dislikes(&self) -> &[String] {
        &self.dislikes
    }

    pub fn status(&self) -> LoyaltyStatus {
        LoyaltyStatus::from_score(self.current)
    }

    pub fn is_at_floor(&self) -> bool {
        self.current <= LOYALTY_MIN
    }

    /// Re-check the range after deserialization
    pub fn validate(&self) -> Result<(), DomainError> {
        Self::new(self.current).map(|_| ())
    }

    /// Net loyalty delta an action would cause, before clamping.
    pub fn reaction_delta(&self, action: &str) -> i32 {
        let action = action.to_lowercase();
        let liked = count_matches(&self.likes, &action);
        let disliked = count_matches(&self.dislikes, &action);
        liked * LIKE_BONUS + disliked * DISLIKE_PENALTY
    }

    /// Apply a delta clamped into `[0, 100]`.
    pub fn apply(&mut self, delta: i32) -> LoyaltyShift {
        let from = self.current;
        self.current = from.saturating_add(delta).clamp(LOYALTY_MIN, LOYALTY_MAX);
        LoyaltyShift {
            from,
            to: self.current,
        }
    }
}

fn count_matches(keywords: &[String], action_lower: &str) -> i32 {
    keywords
        .iter()
        .filter(|keyword| !keyword.is_empty())
        .filter(|keyword| action_lower.contains(&keyword.to_lowercase()))
        .count() as i32
}
