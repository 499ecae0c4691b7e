use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::catalog::domain::{coerce_rating, CatalogService};
use crate::core::command::{Command, CommandError};

pub(crate) struct AddBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl AddBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddBookCommandRequest {
    pub(crate) title: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) rating: Option<Value>,
}

impl AddBookCommandRequest {
    pub fn new(title: Option<&str>, author: Option<&str>, rating: Option<Value>) -> Self {
        Self {
            title: title.map(str::to_string),
            author: author.map(str::to_string),
            rating,
        }
    }

    // every field is optional: an empty payload still builds a draft record
    pub fn build_book(&self) -> Result<BookEntity, CommandError> {
        let rating = match &self.rating {
            Some(value) if !value.is_null() => Some(coerce_rating(value).map_err(CommandError::from)?),
            _ => None,
        };
        Ok(BookEntity::new(self.title.clone(), self.author.clone(), rating))
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddBookCommandResponse {
    pub success: bool,
    pub created: i64,
    pub books: Vec<BookDto>,
    pub total_books: usize,
}

impl AddBookCommandResponse {
    pub fn new(created: i64, books: Vec<BookDto>, total_books: usize) -> Self {
        Self {
            success: true,
            created,
            books,
            total_books,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        let book = req.build_book()?;
        self.catalog_service.add_book(&book).await
            .map_err(CommandError::from)
            .map(|(created, shelf)| AddBookCommandResponse::new(created, shelf.records, shelf.total))
    }
}
