use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use chrono::Utc;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{parse_date_attribute, parse_number_attribute, parse_string_attribute, string_date};

// The books table keys on a numeric book_id. Item 0 is reserved for the id
// sequence counter and must never surface as a book.
const COUNTER_KEY: i64 = 0;

#[derive(Debug)]
pub struct DDBBookRepository {
    client: Client,
    table_name: String,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }

    // Atomic counter item: ADD is idempotent on a missing item, so the first
    // insert bootstraps the sequence at 1.
    async fn next_book_id(&self) -> LibraryResult<i64> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .update_item()
            .table_name(table_name)
            .key("book_id", AttributeValue::N(COUNTER_KEY.to_string()))
            .update_expression("ADD next_id :one")
            .expression_attribute_values(":one", AttributeValue::N("1".to_string()))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await.map_err(LibraryError::from).and_then(|out| {
            out.attributes()
                .and_then(|attrs| parse_number_attribute("next_id", attrs))
                .ok_or_else(|| LibraryError::database("book id counter returned no value", None, false))
        })
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let mut stored = entity.clone();
        stored.book_id = self.next_book_id().await?;
        stored.version = 0;

        let table_name: &str = self.table_name.as_ref();
        let mut request = self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(book_id)")
            .item("book_id", AttributeValue::N(stored.book_id.to_string()))
            .item("version", AttributeValue::N(stored.version.to_string()))
            .item("created_at", string_date(stored.created_at))
            .item("updated_at", string_date(stored.updated_at));
        // absent optional fields are omitted rather than stored as empty strings
        if let Some(ref title) = stored.title {
            request = request.item("title", AttributeValue::S(title.to_string()));
        }
        if let Some(ref author) = stored.author {
            request = request.item("author", AttributeValue::S(author.to_string()));
        }
        if let Some(rating) = stored.rating {
            request = request.item("rating", AttributeValue::N(rating.to_string()));
        }
        request.send().await.map(|_| stored).map_err(LibraryError::from)
    }

    // Writes only rating, version and updated_at: the partial-update contract
    // holds at the store level, title and author cannot be touched here.
    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();
        let rating = match entity.rating {
            Some(rating) => AttributeValue::N(rating.to_string()),
            None => AttributeValue::Null(true),
        };

        self.client
            .update_item()
            .table_name(table_name)
            .key("book_id", AttributeValue::N(entity.book_id.to_string()))
            .update_expression("SET version = :version, rating = :rating, updated_at = :updated_at")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
            .expression_attribute_values(":rating", rating)
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn get(&self, id: i64) -> LibraryResult<BookEntity> {
        if id == COUNTER_KEY {
            return Err(LibraryError::not_found(format!("book not found for {}", id).as_str()));
        }
        let table_name: &str = self.table_name.as_ref();
        self.client
            .get_item()
            .table_name(table_name)
            .consistent_read(true)
            .key("book_id", AttributeValue::N(id.to_string()))
            .send()
            .await.map_err(LibraryError::from).and_then(|out| {
            out.item().map(map_to_book)
                .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
        })
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("book_id", AttributeValue::N(id.to_string()))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn list_all(&self) -> LibraryResult<Vec<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let mut items: Vec<HashMap<String, AttributeValue>> = vec![];
        let mut exclusive_start_key: Option<HashMap<String, AttributeValue>> = None;
        loop {
            let out = self.client
                .scan()
                .table_name(table_name)
                .consistent_read(false)
                .set_exclusive_start_key(exclusive_start_key.take())
                .send()
                .await.map_err(LibraryError::from)?;
            let next_key = out.last_evaluated_key().cloned();
            items.extend(out.items.unwrap_or_default());
            match next_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => break,
            }
        }
        let mut books: Vec<BookEntity> = items.iter()
            .map(map_to_book)
            .filter(|book| book.book_id != COUNTER_KEY)
            .collect();
        books.sort_by_key(|book| book.book_id);
        Ok(books)
    }
}

impl BookRepository for DDBBookRepository {}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> BookEntity {
    BookEntity {
        book_id: parse_number_attribute("book_id", map).unwrap_or(0),
        version: parse_number_attribute("version", map).unwrap_or(0),
        title: parse_string_attribute("title", map),
        author: parse_string_attribute("author", map),
        rating: parse_number_attribute("rating", map),
        created_at: parse_date_attribute("created_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use aws_sdk_dynamodb::types::AttributeValue;
    use crate::books::repository::ddb_book_repository::map_to_book;

    #[tokio::test]
    async fn test_should_map_item_to_book() {
        let map = HashMap::from([
            ("book_id".to_string(), AttributeValue::N("12".to_string())),
            ("version".to_string(), AttributeValue::N("3".to_string())),
            ("title".to_string(), AttributeValue::S("title".to_string())),
            ("author".to_string(), AttributeValue::S("author".to_string())),
            ("rating".to_string(), AttributeValue::N("5".to_string())),
        ]);
        let book = map_to_book(&map);
        assert_eq!(12, book.book_id);
        assert_eq!(3, book.version);
        assert_eq!(Some("title".to_string()), book.title);
        assert_eq!(Some("author".to_string()), book.author);
        assert_eq!(Some(5), book.rating);
    }

    #[tokio::test]
    async fn test_should_map_item_with_missing_fields() {
        let map = HashMap::from([
            ("book_id".to_string(), AttributeValue::N("4".to_string())),
        ]);
        let book = map_to_book(&map);
        assert_eq!(4, book.book_id);
        assert_eq!(None, book.title);
        assert_eq!(None, book.author);
        assert_eq!(None, book.rating);
    }
}
