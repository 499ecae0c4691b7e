use serde::{Deserialize, Serialize};

// Configuration abstracts config options for the bookshelf service
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub(crate) struct Configuration {
    pub branch_id: String,
    // fixed shelf page size; the frontend renders exactly one shelf per page
    pub books_per_shelf: usize,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            books_per_shelf: 8,
        }
    }
}
