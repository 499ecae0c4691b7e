pub mod ddb_book_repository;
pub mod memory_book_repository;

use crate::books::domain::model::BookEntity;
use crate::core::repository::Repository;

// Book-specific store queries would hang off this trait; the shelf contract
// needs nothing beyond the core repository operations.
pub(crate) trait BookRepository: Repository<BookEntity> {}
