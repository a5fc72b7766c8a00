//! Item model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle stage of an item report, stored as its string name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "TEXT", rename_all = "UPPERCASE")]
pub enum ItemStatus {
    Lost,
    Found,
    Claimed,
    Resolved,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Lost => "LOST",
            ItemStatus::Found => "FOUND",
            ItemStatus::Claimed => "CLAIMED",
            ItemStatus::Resolved => "RESOLVED",
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOST" => Ok(ItemStatus::Lost),
            "FOUND" => Ok(ItemStatus::Found),
            "CLAIMED" => Ok(ItemStatus::Claimed),
            "RESOLVED" => Ok(ItemStatus::Resolved),
            other => Err(format!("Unknown item status: {other}")),
        }
    }
}

/// Item entity: a reported lost or found object
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub status: ItemStatus,
    pub date_lost_found: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: i64,
}

/// New item creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub status: ItemStatus,
    pub date_lost_found: Option<DateTime<Utc>>,
    pub user_id: i64,
}

/// Item update payload; unset fields are left untouched
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub status: Option<ItemStatus>,
    pub date_lost_found: Option<DateTime<Utc>>,
}
