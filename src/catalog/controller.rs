use std::collections::HashMap;
use std::sync::Arc;
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::Value;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest, ListBooksCommandResponse};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest, RemoveBookCommandResponse};
use crate::catalog::command::update_rating_cmd::{UpdateRatingCommand, UpdateRatingCommandRequest, UpdateRatingCommandResponse};
use crate::catalog::domain::CatalogService;
use crate::core::command::Command;
use crate::core::controller::{json_to_server_error, ServerError};

// The one service instance built at startup; handlers share it through the
// router state so the backing store survives across requests.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) catalog_service: Arc<dyn CatalogService>,
}

impl AppState {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> AppState {
        AppState {
            catalog_service,
        }
    }
}

pub(crate) async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>) -> Result<Json<ListBooksCommandResponse>, ServerError> {
    let req = ListBooksCommandRequest::new(params.get("page").map(String::as_str));
    let res = ListBooksCommand::new(state.catalog_service.clone()).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn create_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddBookCommandResponse>, ServerError> {
    let req: AddBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = AddBookCommand::new(state.catalog_service.clone()).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn update_book_rating(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    json: Json<Value>) -> Result<Json<UpdateRatingCommandResponse>, ServerError> {
    let book_id = parse_book_id(book_id.as_str())?;
    let mut req: UpdateRatingCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    req.book_id = book_id;
    let res = UpdateRatingCommand::new(state.catalog_service.clone()).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<Json<RemoveBookCommandResponse>, ServerError> {
    let req = RemoveBookCommandRequest::new(parse_book_id(book_id.as_str())?);
    let res = RemoveBookCommand::new(state.catalog_service.clone()).execute(req).await?;
    Ok(Json(res))
}

// a non-numeric id can never name a book, so the route behaves as unmatched
fn parse_book_id(raw: &str) -> Result<i64, ServerError> {
    raw.parse::<i64>().map_err(|_| ServerError::NotFound)
}

// route exists, verb does not
pub(crate) async fn method_not_allowed() -> ServerError {
    ServerError::MethodNotAllowed
}

pub(crate) async fn not_found() -> ServerError {
    ServerError::NotFound
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use axum::extract::{Path, Query, State};
    use axum::response::Json;
    use lazy_static::lazy_static;
    use serde_json::json;
    use crate::books::domain::model::BookEntity;
    use crate::catalog::controller::{create_book, delete_book, list_books, method_not_allowed, parse_book_id, update_book_rating, AppState};
    use crate::catalog::factory;
    use crate::core::controller::ServerError;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    lazy_static! {
        static ref CONFIG: Configuration = Configuration::new("test");
    }

    async fn shelved_state(count: usize) -> AppState {
        let svc = factory::create_catalog_service(&CONFIG, RepositoryStore::Memory).await;
        for i in 1..=count {
            let book = BookEntity::new(
                Some(format!("book {}", i)), Some(format!("author {}", i)), Some(3));
            let _ = svc.add_book(&book).await.expect("should add book");
        }
        AppState::new(svc)
    }

    #[tokio::test]
    async fn test_should_get_books_with_default_page() {
        let state = shelved_state(10).await;
        let Json(res) = list_books(State(state), Query(HashMap::new())).await.expect("should list books");
        assert!(res.success);
        assert_eq!(8, res.books.len());
        assert_eq!(10, res.total_books);
    }

    #[tokio::test]
    async fn test_should_get_books_on_requested_page() {
        let state = shelved_state(10).await;
        let params = HashMap::from([("page".to_string(), "2".to_string())]);
        let Json(res) = list_books(State(state), Query(params)).await.expect("should list books");
        assert_eq!(2, res.books.len());
        assert_eq!(10, res.total_books);
    }

    #[tokio::test]
    async fn test_should_get_not_found_past_the_end() {
        let state = shelved_state(10).await;
        let params = HashMap::from([("page".to_string(), "3".to_string())]);
        let res = list_books(State(state), Query(params)).await;
        assert_eq!(Some(ServerError::NotFound), res.err());
    }

    #[tokio::test]
    async fn test_should_patch_rating_and_keep_other_fields() {
        let state = shelved_state(3).await;
        let body = json!({"rating": 5, "title": "ignored"});
        let Json(res) = update_book_rating(
            State(state.clone()), Path("3".to_string()), Json(body)).await.expect("should update rating");
        assert!(res.success);
        assert_eq!(3, res.id);
        let Json(shelf) = list_books(State(state), Query(HashMap::new())).await.expect("should list books");
        let book = shelf.books.iter().find(|book| book.id == 3).expect("book on shelf");
        assert_eq!(Some(5), book.rating);
        assert_eq!(Some("book 3".to_string()), book.title);
    }

    #[tokio::test]
    async fn test_should_reject_bad_rating_payload() {
        let state = shelved_state(1).await;
        let res = update_book_rating(
            State(state), Path("1".to_string()), Json(json!({"rating": "best"}))).await;
        assert_eq!(Some(ServerError::BadRequest), res.err());
    }

    #[tokio::test]
    async fn test_should_patch_unknown_book_as_not_found() {
        let state = shelved_state(1).await;
        let res = update_book_rating(
            State(state), Path("42".to_string()), Json(json!({"rating": 5}))).await;
        assert_eq!(Some(ServerError::NotFound), res.err());
    }

    #[tokio::test]
    async fn test_should_delete_book() {
        let state = shelved_state(10).await;
        let Json(res) = delete_book(State(state), Path("3".to_string())).await.expect("should delete book");
        assert!(res.success);
        assert_eq!(3, res.deleted);
        assert_eq!(9, res.total_books);
        assert!(res.books.iter().all(|book| book.id != 3));
    }

    #[tokio::test]
    async fn test_should_delete_unknown_book_as_not_found() {
        let state = shelved_state(1).await;
        let res = delete_book(State(state), Path("42".to_string())).await;
        assert_eq!(Some(ServerError::NotFound), res.err());
    }

    #[tokio::test]
    async fn test_should_post_book() {
        let state = shelved_state(9).await;
        let body = json!({"title": "new book", "author": "new author", "rating": 4});
        let Json(res) = create_book(State(state.clone()), Json(body)).await.expect("should create book");
        assert!(res.success);
        assert_eq!(10, res.created);
        assert_eq!(10, res.total_books);
    }

    #[tokio::test]
    async fn test_should_post_book_with_empty_payload() {
        let state = shelved_state(0).await;
        let Json(res) = create_book(State(state), Json(json!({}))).await.expect("should create book");
        assert_eq!(1, res.created);
        assert_eq!(1, res.total_books);
    }

    #[tokio::test]
    async fn test_should_treat_non_numeric_id_as_not_found() {
        assert_eq!(Some(ServerError::NotFound), parse_book_id("abc").err());
        assert_eq!(Ok(7), parse_book_id("7").map_err(|_| ()));
    }

    #[tokio::test]
    async fn test_should_answer_method_not_allowed() {
        assert_eq!(ServerError::MethodNotAllowed, method_not_allowed().await);
    }
}
