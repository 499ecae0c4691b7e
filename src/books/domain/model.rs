use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::utils::date::serializer;

// BookEntity is the store-level record for a shelved book. The id is assigned
// by the record store on insert; version and the audit timestamps stay inside
// the store layer and never reach a response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookEntity {
    pub book_id: i64,
    pub version: i64,
    pub title: Option<String>,
    pub author: Option<String>,
    pub rating: Option<i64>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookEntity {
    // book_id 0 marks a draft record; the store replaces it on insert.
    pub fn new(title: Option<String>, author: Option<String>, rating: Option<i64>) -> Self {
        Self {
            book_id: 0,
            version: 0,
            title,
            author,
            rating,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}
