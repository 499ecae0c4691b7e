use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct ListBooksCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl ListBooksCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListBooksCommandRequest {
    pub(crate) page: Option<String>,
}

impl ListBooksCommandRequest {
    pub fn new(page: Option<&str>) -> Self {
        Self {
            page: page.map(str::to_string),
        }
    }

    // 1-based page number; absent, non-numeric or non-positive input falls
    // back to the first page rather than erroring
    pub fn page_number(&self) -> usize {
        self.page.as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|page| *page > 0)
            .map(|page| page as usize)
            .unwrap_or(1)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ListBooksCommandResponse {
    pub success: bool,
    pub books: Vec<BookDto>,
    pub total_books: usize,
}

impl ListBooksCommandResponse {
    pub fn new(books: Vec<BookDto>, total_books: usize) -> Self {
        Self {
            success: true,
            books,
            total_books,
        }
    }
}

#[async_trait]
impl Command<ListBooksCommandRequest, ListBooksCommandResponse> for ListBooksCommand {
    async fn execute(&self, req: ListBooksCommandRequest) -> Result<ListBooksCommandResponse, CommandError> {
        self.catalog_service.list_books(req.page_number()).await
            .map_err(CommandError::from)
            .map(|shelf| ListBooksCommandResponse::new(shelf.records, shelf.total))
    }
}
