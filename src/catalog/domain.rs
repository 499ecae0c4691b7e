pub mod service;

use async_trait::async_trait;
use serde_json::Value;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};

#[async_trait]
pub(crate) trait CatalogService: Sync + Send {
    // GET policy: an empty page is a not-found condition
    async fn list_books(&self, page: usize) -> LibraryResult<PaginatedResult<BookDto>>;
    // returns the created id plus the recomputed first shelf page
    async fn add_book(&self, book: &BookEntity) -> LibraryResult<(i64, PaginatedResult<BookDto>)>;
    // rating is the only mutable field; None leaves the record as-is
    async fn change_rating(&self, id: i64, rating: Option<i64>) -> LibraryResult<i64>;
    // returns the removed id plus the recomputed first shelf page
    async fn remove_book(&self, id: i64) -> LibraryResult<(i64, PaginatedResult<BookDto>)>;
}

// Integer coercion for a rating payload value: JSON integers, floats
// (truncated) and numeric strings coerce, anything else fails validation.
pub(crate) fn coerce_rating(value: &Value) -> LibraryResult<i64> {
    if let Some(rating) = value.as_i64() {
        return Ok(rating);
    }
    if let Some(rating) = value.as_f64() {
        return Ok(rating as i64);
    }
    if let Some(raw) = value.as_str() {
        if let Ok(rating) = raw.trim().parse::<i64>() {
            return Ok(rating);
        }
    }
    Err(LibraryError::validation(
        format!("rating {} is not an integer", value).as_str(), None))
}
