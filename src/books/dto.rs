use serde::{Deserialize, Serialize};
use crate::books::domain::model::BookEntity;

// BookDto is the transport shape of a book: exactly these four fields appear
// in response bodies, nothing store-internal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookDto {
    pub id: i64,
    pub title: Option<String>,
    pub author: Option<String>,
    pub rating: Option<i64>,
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            id: other.book_id,
            title: other.title.clone(),
            author: other.author.clone(),
            rating: other.rating,
        }
    }
}
