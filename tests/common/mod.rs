#![allow(dead_code)]

use bookstore::database::{
    DefaultAuthorRepository, DefaultBookRepository, DefaultPrizeRepository, establish_pool,
};
use bookstore::models::{
    Author, Book, CreateAuthorRequest, CreateBookRequest, CreatePrizeRequest, Prize,
};
use bookstore::repositories::{AuthorRepository, BookRepository, PrizeRepository};
use bookstore::services::AuthorService;
use chrono::{Days, Local, NaiveDate};

pub struct Fixture {
    pub author_service: AuthorService<DefaultAuthorRepository>,
    pub author_repo: DefaultAuthorRepository,
    pub book_repo: DefaultBookRepository,
    pub prize_repo: DefaultPrizeRepository,
    pub authors: Vec<Author>,
}

impl Fixture {
    /// Fresh in-memory store seeded with five authors that have no books or prizes.
    pub async fn new() -> Self {
        let pool = establish_pool("sqlite::memory:", 1).await.unwrap();
        let author_repo = DefaultAuthorRepository::new(pool.clone());

        let mut authors = Vec::new();
        for i in 0..5 {
            let req = CreateAuthorRequest::new(
                format!("Author {i}"),
                Some(date(1950 + i, 1 + i as u32, 10)),
                format!("Description of author {i}"),
            );
            authors.push(author_repo.create_author(&req).await.unwrap());
        }

        Self {
            author_service: AuthorService::new(author_repo.clone()),
            author_repo,
            book_repo: DefaultBookRepository::new(pool.clone()),
            prize_repo: DefaultPrizeRepository::new(pool),
            authors,
        }
    }

    pub async fn add_book(&self, isbn: &str, author_ids: Vec<i64>) -> Book {
        let req = CreateBookRequest::new(
            format!("Book {isbn}"),
            isbn.to_string(),
            "A book".to_string(),
            date(2001, 9, 11),
            author_ids,
        );
        self.book_repo.create_book(&req).await.unwrap()
    }

    pub async fn add_prize(&self, name: &str, author_id: i64) -> Prize {
        let req = CreatePrizeRequest::new(
            name.to_string(),
            "A prize".to_string(),
            date(2010, 12, 10),
            author_id,
        );
        self.prize_repo.create_prize(&req).await.unwrap()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn days_ago(days: u64) -> NaiveDate {
    today().checked_sub_days(Days::new(days)).unwrap()
}

pub fn days_ahead(days: u64) -> NaiveDate {
    today().checked_add_days(Days::new(days)).unwrap()
}
