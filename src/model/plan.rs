// File: ./src/model/plan.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use uuid::Uuid;

fn default_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_timestamp() -> DateTime<Utc> {
    Utc::now()
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize, EnumIter)]
pub enum ItemKind {
    Series,
    #[default]
    Video,
    Short,
}

impl ItemKind {
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Series => "series",
            ItemKind::Video => "video",
            ItemKind::Short => "short",
        }
    }
}

/// Production stage of a planned piece of content. Cycling follows
/// declaration order and wraps around.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize, EnumIter)]
pub enum ItemStatus {
    #[default]
    Idea,
    Scripting,
    Filming,
    Editing,
    Published,
    Shelved,
}

impl ItemStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Published | Self::Shelved)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemStatus::Idea => "idea",
            ItemStatus::Scripting => "scripting",
            ItemStatus::Filming => "filming",
            ItemStatus::Editing => "editing",
            ItemStatus::Published => "published",
            ItemStatus::Shelved => "shelved",
        }
    }

    /// Next stage in declaration order, wrapping from the last back to Idea.
    pub fn next(&self) -> Self {
        use strum::IntoEnumIterator;
        let mut iter = Self::iter().cycle();
        // Position the cursor on self, then take the following variant.
        for variant in iter.by_ref() {
            if variant == *self {
                break;
            }
        }
        iter.next().unwrap_or_default()
    }
}

/// One entry on the planning board. Flat record: hierarchy is expressed
/// only through `parent_id`, and the store persists these verbatim.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlanItem {
    #[serde(default = "default_id")]
    pub id: String,
    #[serde(default)]
    pub kind: ItemKind,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default = "default_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl PlanItem {
    pub fn new(kind: ItemKind, title: &str, parent_id: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: default_id(),
            kind,
            title: title.to_string(),
            notes: String::new(),
            status: ItemStatus::default(),
            parent_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
