use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Entity;

/// A health article.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_avatar: Option<String>,
    pub image_url: String,
    /// Estimated reading time in minutes; always positive.
    pub read_time: u32,
    pub published_at: NaiveDate,
    pub tags: Vec<String>,
}

impl Entity for Article {
    const COLLECTION: &'static str = "article";

    fn id(&self) -> &str {
        &self.id
    }
}
