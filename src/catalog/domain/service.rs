use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};

pub(crate) struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
    books_per_shelf: usize,
}

impl CatalogServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
            books_per_shelf: config.books_per_shelf,
        }
    }

    // The page-and-total view shared by the mutation responses. Unlike the
    // GET path an empty slice is fine here, e.g. after deleting the last book.
    async fn shelf_page(&self, page: usize) -> LibraryResult<PaginatedResult<BookDto>> {
        let records = self.book_repository.list_all().await?;
        let books: Vec<BookDto> = records.iter().map(BookDto::from).collect();
        Ok(PaginatedResult::paginate(books, page, self.books_per_shelf))
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn list_books(&self, page: usize) -> LibraryResult<PaginatedResult<BookDto>> {
        let shelf = self.shelf_page(page).await?;
        if shelf.records.is_empty() {
            // a page past the end is indistinguishable from an empty shelf
            return Err(LibraryError::not_found(
                format!("no books on page {}", shelf.page).as_str()));
        }
        Ok(shelf)
    }

    async fn add_book(&self, book: &BookEntity) -> LibraryResult<(i64, PaginatedResult<BookDto>)> {
        let created = self.book_repository.create(book).await?;
        let shelf = self.shelf_page(1).await?;
        Ok((created.book_id, shelf))
    }

    async fn change_rating(&self, id: i64, rating: Option<i64>) -> LibraryResult<i64> {
        let mut book = self.book_repository.get(id).await?;
        if let Some(rating) = rating {
            book.rating = Some(rating);
        }
        let _ = self.book_repository.update(&book).await?;
        Ok(book.book_id)
    }

    async fn remove_book(&self, id: i64) -> LibraryResult<(i64, PaginatedResult<BookDto>)> {
        let book = self.book_repository.get(id).await?;
        let _ = self.book_repository.delete(book.book_id).await?;
        let shelf = self.shelf_page(1).await?;
        Ok((book.book_id, shelf))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use lazy_static::lazy_static;
    use crate::books::domain::model::BookEntity;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory;
    use crate::core::domain::Configuration;
    use crate::core::library::LibraryError;
    use crate::core::repository::RepositoryStore;

    lazy_static! {
        static ref CONFIG: Configuration = Configuration::new("test");
    }

    async fn shelved_service(count: usize) -> Arc<dyn CatalogService> {
        let svc = factory::create_catalog_service(&CONFIG, RepositoryStore::Memory).await;
        for i in 1..=count {
            let book = BookEntity::new(
                Some(format!("book {}", i)), Some(format!("author {}", i)), Some(3));
            let _ = svc.add_book(&book).await.expect("should add book");
        }
        svc
    }

    #[tokio::test]
    async fn test_should_list_first_page() {
        let svc = shelved_service(10).await;
        let shelf = svc.list_books(1).await.expect("should list books");
        assert_eq!(8, shelf.records.len());
        assert_eq!(10, shelf.total);
        let ids: Vec<i64> = shelf.records.iter().map(|book| book.id).collect();
        assert_eq!(vec![1, 2, 3, 4, 5, 6, 7, 8], ids);
    }

    #[tokio::test]
    async fn test_should_list_last_partial_page() {
        let svc = shelved_service(10).await;
        let shelf = svc.list_books(2).await.expect("should list books");
        let ids: Vec<i64> = shelf.records.iter().map(|book| book.id).collect();
        assert_eq!(vec![9, 10], ids);
        assert_eq!(10, shelf.total);
    }

    #[tokio::test]
    async fn test_should_not_list_past_the_end() {
        let svc = shelved_service(10).await;
        let res = svc.list_books(3).await;
        assert!(matches!(res, Err(LibraryError::NotFound { message: _ })));
    }

    #[tokio::test]
    async fn test_should_not_list_empty_shelf() {
        let svc = shelved_service(0).await;
        let res = svc.list_books(1).await;
        assert!(matches!(res, Err(LibraryError::NotFound { message: _ })));
    }

    #[tokio::test]
    async fn test_should_add_book_and_recompute_shelf() {
        let svc = shelved_service(0).await;
        let book = BookEntity::new(None, None, None);
        let (created, shelf) = svc.add_book(&book).await.expect("should add book");
        assert_eq!(1, created);
        assert_eq!(1, shelf.total);
        assert_eq!(1, shelf.records.len());
    }

    #[tokio::test]
    async fn test_should_change_only_rating() {
        let svc = shelved_service(3).await;
        let id = svc.change_rating(2, Some(5)).await.expect("should change rating");
        assert_eq!(2, id);
        let shelf = svc.list_books(1).await.expect("should list books");
        let book = shelf.records.iter().find(|book| book.id == 2).expect("book on shelf");
        assert_eq!(Some(5), book.rating);
        assert_eq!(Some("book 2".to_string()), book.title);
        assert_eq!(Some("author 2".to_string()), book.author);
    }

    #[tokio::test]
    async fn test_should_keep_rating_when_absent() {
        let svc = shelved_service(1).await;
        let _ = svc.change_rating(1, None).await.expect("should accept empty update");
        let shelf = svc.list_books(1).await.expect("should list books");
        assert_eq!(Some(3), shelf.records[0].rating);
    }

    #[tokio::test]
    async fn test_should_not_change_rating_of_unknown_book() {
        let svc = shelved_service(1).await;
        let res = svc.change_rating(42, Some(5)).await;
        assert!(matches!(res, Err(LibraryError::NotFound { message: _ })));
    }

    #[tokio::test]
    async fn test_should_remove_book_permanently() {
        let svc = shelved_service(10).await;
        let (deleted, shelf) = svc.remove_book(3).await.expect("should remove book");
        assert_eq!(3, deleted);
        assert_eq!(9, shelf.total);
        assert!(shelf.records.iter().all(|book| book.id != 3));
        let res = svc.remove_book(3).await;
        assert!(matches!(res, Err(LibraryError::NotFound { message: _ })));
    }

    #[tokio::test]
    async fn test_should_remove_last_book() {
        let svc = shelved_service(1).await;
        let (deleted, shelf) = svc.remove_book(1).await.expect("should remove book");
        assert_eq!(1, deleted);
        assert_eq!(0, shelf.total);
        assert!(shelf.records.is_empty());
    }
}
