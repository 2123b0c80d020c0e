use chrono::NaiveDate;
use thiserror::Error;

pub const AUTHOR_NOT_FOUND: &str = "The author with the given id was not found";
pub const BOOK_NOT_FOUND: &str = "The book with the given id was not found";
pub const PRIZE_NOT_FOUND: &str = "The prize with the given id was not found";
pub const BIRTH_DATE_REQUIRED: &str = "The birth date of the author is required";
pub const BIRTH_DATE_IN_FUTURE: &str = "The birth date of the author cannot be after today";
pub const AUTHOR_HAS_BOOKS: &str = "Unable to delete the author because it has associated books";
pub const AUTHOR_HAS_PRIZES: &str = "Unable to delete the author because it has associated prizes";
pub const AUTHOR_HAS_ASSOCIATIONS: &str =
    "Unable to delete the author because it has associated books or prizes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id: i64,
    name: String,
    isbn: String,
    description: String,
    publishing_date: NaiveDate,
}

impl Book {
    pub const fn new(
        id: i64,
        name: String,
        isbn: String,
        description: String,
        publishing_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            name,
            isbn,
            description,
            publishing_date,
        }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub const fn publishing_date(&self) -> NaiveDate {
        self.publishing_date
    }
}

/// An award won by exactly one author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prize {
    id: i64,
    name: String,
    description: String,
    premiation_date: NaiveDate,
    author_id: i64,
}

impl Prize {
    pub const fn new(
        id: i64,
        name: String,
        description: String,
        premiation_date: NaiveDate,
        author_id: i64,
    ) -> Self {
        Self {
            id,
            name,
            description,
            premiation_date,
            author_id,
        }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub const fn premiation_date(&self) -> NaiveDate {
        self.premiation_date
    }

    pub const fn author_id(&self) -> i64 {
        self.author_id
    }
}

/// A stored author together with its eagerly loaded books and prizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    id: i64,
    name: String,
    birth_date: NaiveDate,
    description: String,
    books: Vec<Book>,
    prizes: Vec<Prize>,
}

impl Author {
    pub const fn new(id: i64, name: String, birth_date: NaiveDate, description: String) -> Self {
        Self {
            id,
            name,
            birth_date,
            description,
            books: Vec::new(),
            prizes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_books(mut self, books: Vec<Book>) -> Self {
        self.books = books;
        self
    }

    #[must_use]
    pub fn with_prizes(mut self, prizes: Vec<Prize>) -> Self {
        self.prizes = prizes;
        self
    }

    pub const fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn prizes(&self) -> &[Prize] {
        &self.prizes
    }
}

/// Input for a new author. The birth date may be missing; the service rejects
/// such requests before they reach the store.
#[derive(Debug, Clone)]
pub struct CreateAuthorRequest {
    name: String,
    birth_date: Option<NaiveDate>,
    description: String,
}

impl CreateAuthorRequest {
    pub const fn new(name: String, birth_date: Option<NaiveDate>, description: String) -> Self {
        Self {
            name,
            birth_date,
            description,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Error, Debug)]
pub enum CreateAuthorError {
    #[error("{0}")]
    IllegalOperation(String),
    #[error(transparent)]
    Other(anyhow::Error),
}

impl CreateAuthorError {
    pub const fn is_illegal_operation(&self) -> bool {
        matches!(self, Self::IllegalOperation(_))
    }
}

#[derive(Debug)]
pub struct FindAuthorRequest {
    id: i64,
}

impl FindAuthorRequest {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Error, Debug)]
pub enum FindAuthorError {
    #[error("{}", AUTHOR_NOT_FOUND)]
    NotFound { id: i64 },
    #[error(transparent)]
    Other(anyhow::Error),
}

impl FindAuthorError {
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct FindAllAuthorsError(#[from] pub anyhow::Error);

/// Replaces every scalar field of an existing author.
#[derive(Debug, Clone)]
pub struct UpdateAuthorRequest {
    id: i64,
    name: String,
    birth_date: NaiveDate,
    description: String,
}

impl UpdateAuthorRequest {
    pub const fn new(id: i64, name: String, birth_date: NaiveDate, description: String) -> Self {
        Self {
            id,
            name,
            birth_date,
            description,
        }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Error, Debug)]
pub enum UpdateAuthorError {
    #[error("{}", AUTHOR_NOT_FOUND)]
    NotFound { id: i64 },
    #[error(transparent)]
    Other(anyhow::Error),
}

impl UpdateAuthorError {
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[derive(Debug)]
pub struct DeleteAuthorRequest {
    id: i64,
}

impl DeleteAuthorRequest {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Error, Debug)]
pub enum DeleteAuthorError {
    #[error("{}", AUTHOR_NOT_FOUND)]
    NotFound { id: i64 },
    #[error("{0}")]
    IllegalOperation(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DeleteAuthorError {
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub const fn is_illegal_operation(&self) -> bool {
        matches!(self, Self::IllegalOperation(_))
    }
}

#[derive(Debug, Clone)]
pub struct CreateBookRequest {
    name: String,
    isbn: String,
    description: String,
    publishing_date: NaiveDate,
    author_ids: Vec<i64>,
}

impl CreateBookRequest {
    pub const fn new(
        name: String,
        isbn: String,
        description: String,
        publishing_date: NaiveDate,
        author_ids: Vec<i64>,
    ) -> Self {
        Self {
            name,
            isbn,
            description,
            publishing_date,
            author_ids,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub const fn publishing_date(&self) -> NaiveDate {
        self.publishing_date
    }

    pub fn author_ids(&self) -> &[i64] {
        &self.author_ids
    }
}

#[derive(Error, Debug)]
pub enum CreateBookError {
    #[error("Book with ISBN \"{isbn}\" already exists")]
    Duplicate { isbn: String },
    #[error("{}", AUTHOR_NOT_FOUND)]
    AuthorNotFound { id: i64 },
    #[error(transparent)]
    Other(anyhow::Error),
}

#[derive(Debug)]
pub struct FindBookRequest {
    id: i64,
}

impl FindBookRequest {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Error, Debug)]
pub enum FindBookError {
    #[error("{}", BOOK_NOT_FOUND)]
    NotFound { id: i64 },
    #[error(transparent)]
    Other(anyhow::Error),
}

#[derive(Debug, Clone)]
pub struct CreatePrizeRequest {
    name: String,
    description: String,
    premiation_date: NaiveDate,
    author_id: i64,
}

impl CreatePrizeRequest {
    pub const fn new(
        name: String,
        description: String,
        premiation_date: NaiveDate,
        author_id: i64,
    ) -> Self {
        Self {
            name,
            description,
            premiation_date,
            author_id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub const fn premiation_date(&self) -> NaiveDate {
        self.premiation_date
    }

    pub const fn author_id(&self) -> i64 {
        self.author_id
    }
}

#[derive(Error, Debug)]
pub enum CreatePrizeError {
    #[error("{}", AUTHOR_NOT_FOUND)]
    AuthorNotFound { id: i64 },
    #[error(transparent)]
    Other(anyhow::Error),
}

#[derive(Debug)]
pub struct FindPrizeRequest {
    id: i64,
}

impl FindPrizeRequest {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Error, Debug)]
pub enum FindPrizeError {
    #[error("{}", PRIZE_NOT_FOUND)]
    NotFound { id: i64 },
    #[error(transparent)]
    Other(anyhow::Error),
}
