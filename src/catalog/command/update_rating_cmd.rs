use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::catalog::domain::{coerce_rating, CatalogService};
use crate::core::command::{Command, CommandError};

pub(crate) struct UpdateRatingCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl UpdateRatingCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

// The request body may carry any other fields alongside rating, e.g. title or
// author; they are ignored, this operation can only ever write the rating.
#[derive(Debug, Deserialize)]
pub(crate) struct UpdateRatingCommandRequest {
    #[serde(skip)]
    pub(crate) book_id: i64,
    pub(crate) rating: Option<Value>,
}

impl UpdateRatingCommandRequest {
    pub fn new(book_id: i64, rating: Option<Value>) -> Self {
        Self {
            book_id,
            rating,
        }
    }

    // a present rating must coerce to an integer; absent or null is a no-op
    fn rating_value(&self) -> Result<Option<i64>, CommandError> {
        match &self.rating {
            Some(value) if !value.is_null() => Ok(Some(coerce_rating(value).map_err(CommandError::from)?)),
            _ => Ok(None),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateRatingCommandResponse {
    pub success: bool,
    pub id: i64,
}

impl UpdateRatingCommandResponse {
    pub fn new(id: i64) -> Self {
        Self {
            success: true,
            id,
        }
    }
}

#[async_trait]
impl Command<UpdateRatingCommandRequest, UpdateRatingCommandResponse> for UpdateRatingCommand {
    async fn execute(&self, req: UpdateRatingCommandRequest) -> Result<UpdateRatingCommandResponse, CommandError> {
        let rating = req.rating_value()?;
        self.catalog_service.change_rating(req.book_id, rating).await
            .map_err(CommandError::from)
            .map(UpdateRatingCommandResponse::new)
    }
}
