use crate::models::{
    Author, Book, CreateAuthorError, CreateAuthorRequest, CreateBookError, CreateBookRequest,
    CreatePrizeError, CreatePrizeRequest, DeleteAuthorError, DeleteAuthorRequest,
    FindAllAuthorsError, FindAuthorError, FindAuthorRequest, FindBookError, FindBookRequest,
    FindPrizeError, FindPrizeRequest, Prize, UpdateAuthorError, UpdateAuthorRequest,
};
use async_trait::async_trait;

/// Persistence of authors. Every returned [`Author`] carries its books and prizes.
#[async_trait]
pub trait AuthorRepository: Send + Sync + 'static {
    async fn create_author(&self, req: &CreateAuthorRequest) -> Result<Author, CreateAuthorError>;

    async fn find_author(&self, req: &FindAuthorRequest) -> Result<Author, FindAuthorError>;

    async fn find_all_authors(&self) -> Result<Vec<Author>, FindAllAuthorsError>;

    async fn update_author(&self, req: &UpdateAuthorRequest) -> Result<Author, UpdateAuthorError>;

    async fn delete_author(&self, req: &DeleteAuthorRequest) -> Result<(), DeleteAuthorError>;
}

#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    async fn create_book(&self, req: &CreateBookRequest) -> Result<Book, CreateBookError>;

    async fn find_book(&self, req: &FindBookRequest) -> Result<Book, FindBookError>;
}

#[async_trait]
pub trait PrizeRepository: Send + Sync + 'static {
    async fn create_prize(&self, req: &CreatePrizeRequest) -> Result<Prize, CreatePrizeError>;

    async fn find_prize(&self, req: &FindPrizeRequest) -> Result<Prize, FindPrizeError>;
}
