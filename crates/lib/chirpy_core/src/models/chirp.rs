//! Chirp domain models.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A short post owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Chirp {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Uuid,
}

/// Ordering of chirp listings by creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChirpSort {
    #[default]
    Asc,
    Desc,
}

impl ChirpSort {
    pub fn as_sql(self) -> &'static str {
        match self {
            ChirpSort::Asc => "ASC",
            ChirpSort::Desc => "DESC",
        }
    }
}

impl FromStr for ChirpSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(ChirpSort::Asc),
            "desc" => Ok(ChirpSort::Desc),
            other => Err(format!("invalid sort order '{other}', expected 'asc' or 'desc'")),
        }
    }
}

/// Filter for chirp listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChirpQuery {
    pub author_id: Option<Uuid>,
    pub sort: ChirpSort,
}
