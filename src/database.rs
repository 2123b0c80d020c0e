use crate::models::{
    AUTHOR_HAS_ASSOCIATIONS, Author, Book, CreateAuthorError, CreateAuthorRequest,
    CreateBookError, CreateBookRequest, CreatePrizeError, CreatePrizeRequest, DeleteAuthorError,
    DeleteAuthorRequest, FindAllAuthorsError, FindAuthorError, FindAuthorRequest, FindBookError,
    FindBookRequest, FindPrizeError, FindPrizeRequest, Prize, UpdateAuthorError,
    UpdateAuthorRequest,
};
use crate::repositories::{AuthorRepository, BookRepository, PrizeRepository};
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{FromRow, Row, SqliteConnection, SqlitePool};
use std::collections::HashMap;
use std::str::FromStr;

static MIGRATOR: Migrator = sqlx::migrate!();

const AUTHOR_COLUMNS: &str = "id, name, birth_date, description";
const BOOK_COLUMNS: &str = "b.id, b.name, b.isbn, b.description, b.publishing_date";
const PRIZE_COLUMNS: &str = "id, name, description, premiation_date, author_id";

/// Opens the pool and applies pending migrations.
///
/// An in-memory database lives inside a single connection, so callers
/// passing `sqlite::memory:` must cap the pool at one connection.
pub async fn establish_pool(path: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(path)
        .with_context(|| format!("Invalid database path {path}"))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(opts)
        .await
        .with_context(|| format!("Failed to open database at {path}"))?;

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    Ok(pool)
}

impl<'r> FromRow<'r, SqliteRow> for Author {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id = row.try_get("id")?;
        let name = row.try_get("name")?;
        let birth_date = row.try_get("birth_date")?;
        let description = row.try_get("description")?;
        Ok(Self::new(id, name, birth_date, description))
    }
}

impl<'r> FromRow<'r, SqliteRow> for Book {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id = row.try_get("id")?;
        let name = row.try_get("name")?;
        let isbn = row.try_get("isbn")?;
        let description = row.try_get("description")?;
        let publishing_date = row.try_get("publishing_date")?;
        Ok(Self::new(id, name, isbn, description, publishing_date))
    }
}

impl<'r> FromRow<'r, SqliteRow> for Prize {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id = row.try_get("id")?;
        let name = row.try_get("name")?;
        let description = row.try_get("description")?;
        let premiation_date = row.try_get("premiation_date")?;
        let author_id = row.try_get("author_id")?;
        Ok(Self::new(id, name, description, premiation_date, author_id))
    }
}

async fn load_associations(
    conn: &mut SqliteConnection,
    author: Author,
) -> Result<Author, sqlx::Error> {
    let books: Vec<Book> = sqlx::query_as(&format!(
        "SELECT {BOOK_COLUMNS} FROM book b \
         JOIN author_book ab ON ab.book_id = b.id \
         WHERE ab.author_id = ? ORDER BY b.id"
    ))
    .bind(author.id())
    .fetch_all(&mut *conn)
    .await?;

    let prizes: Vec<Prize> = sqlx::query_as(&format!(
        "SELECT {PRIZE_COLUMNS} FROM prize WHERE author_id = ? ORDER BY id"
    ))
    .bind(author.id())
    .fetch_all(&mut *conn)
    .await?;

    Ok(author.with_books(books).with_prizes(prizes))
}

#[derive(Debug, Clone)]
pub struct DefaultAuthorRepository {
    pool: SqlitePool,
}

impl DefaultAuthorRepository {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_all_with_associations(&self) -> Result<Vec<Author>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let authors: Vec<Author> =
            sqlx::query_as(&format!("SELECT {AUTHOR_COLUMNS} FROM author ORDER BY id"))
                .fetch_all(&mut *tx)
                .await?;

        let book_rows = sqlx::query(&format!(
            "SELECT ab.author_id, {BOOK_COLUMNS} FROM book b \
             JOIN author_book ab ON ab.book_id = b.id ORDER BY b.id"
        ))
        .fetch_all(&mut *tx)
        .await?;
        let mut books: HashMap<i64, Vec<Book>> = HashMap::new();
        for row in &book_rows {
            let author_id: i64 = row.try_get("author_id")?;
            books.entry(author_id).or_default().push(Book::from_row(row)?);
        }

        let prize_rows: Vec<Prize> =
            sqlx::query_as(&format!("SELECT {PRIZE_COLUMNS} FROM prize ORDER BY id"))
                .fetch_all(&mut *tx)
                .await?;
        let mut prizes: HashMap<i64, Vec<Prize>> = HashMap::new();
        for prize in prize_rows {
            prizes.entry(prize.author_id()).or_default().push(prize);
        }

        tx.commit().await?;

        let authors = authors
            .into_iter()
            .map(|author| {
                let id = author.id();
                author
                    .with_books(books.remove(&id).unwrap_or_default())
                    .with_prizes(prizes.remove(&id).unwrap_or_default())
            })
            .collect();

        Ok(authors)
    }
}

#[async_trait]
impl AuthorRepository for DefaultAuthorRepository {
    async fn create_author(&self, req: &CreateAuthorRequest) -> Result<Author, CreateAuthorError> {
        let author = sqlx::query_as(&format!(
            "INSERT INTO author (name, birth_date, description) VALUES (?, ?, ?) \
             RETURNING {AUTHOR_COLUMNS}"
        ))
        .bind(req.name())
        .bind(req.birth_date())
        .bind(req.description())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            let err = anyhow!(err).context(format!(
                r#"Failed to create author with name "{}""#,
                req.name()
            ));
            CreateAuthorError::Other(err)
        })?;

        Ok(author)
    }

    async fn find_author(&self, req: &FindAuthorRequest) -> Result<Author, FindAuthorError> {
        let other = |err: sqlx::Error| {
            let err = anyhow!(err).context(format!(
                r#"Failed to retrieve author with id "{}""#,
                req.id()
            ));
            FindAuthorError::Other(err)
        };

        let mut tx = self.pool.begin().await.map_err(other)?;

        let author: Option<Author> =
            sqlx::query_as(&format!("SELECT {AUTHOR_COLUMNS} FROM author WHERE id = ?"))
                .bind(req.id())
                .fetch_optional(&mut *tx)
                .await
                .map_err(other)?;
        let author = author.ok_or(FindAuthorError::NotFound { id: req.id() })?;

        let author = load_associations(&mut *tx, author).await.map_err(other)?;
        tx.commit().await.map_err(other)?;

        Ok(author)
    }

    async fn find_all_authors(&self) -> Result<Vec<Author>, FindAllAuthorsError> {
        let authors = self.fetch_all_with_associations().await.map_err(|err| {
            let err = anyhow!(err).context("Failed to retrieve all authors");
            FindAllAuthorsError(err)
        })?;

        Ok(authors)
    }

    async fn update_author(&self, req: &UpdateAuthorRequest) -> Result<Author, UpdateAuthorError> {
        let other = |err: sqlx::Error| {
            let err = anyhow!(err).context(format!(
                r#"Failed to update author with id "{}""#,
                req.id()
            ));
            UpdateAuthorError::Other(err)
        };

        let mut tx = self.pool.begin().await.map_err(other)?;

        let author: Option<Author> = sqlx::query_as(&format!(
            "UPDATE author SET name = ?, birth_date = ?, description = ? WHERE id = ? \
             RETURNING {AUTHOR_COLUMNS}"
        ))
        .bind(req.name())
        .bind(req.birth_date())
        .bind(req.description())
        .bind(req.id())
        .fetch_optional(&mut *tx)
        .await
        .map_err(other)?;
        let author = author.ok_or(UpdateAuthorError::NotFound { id: req.id() })?;

        let author = load_associations(&mut *tx, author).await.map_err(other)?;
        tx.commit().await.map_err(other)?;

        Ok(author)
    }

    async fn delete_author(&self, req: &DeleteAuthorRequest) -> Result<(), DeleteAuthorError> {
        let result = sqlx::query("DELETE FROM author WHERE id = ?")
            .bind(req.id())
            .execute(&self.pool)
            .await
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    DeleteAuthorError::IllegalOperation(AUTHOR_HAS_ASSOCIATIONS.to_string())
                } else {
                    let err = anyhow!(err)
                        .context(format!(r#"Failed to delete author with id "{}""#, req.id()));
                    DeleteAuthorError::Other(err)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(DeleteAuthorError::NotFound { id: req.id() });
        }

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct DefaultBookRepository {
    pool: SqlitePool,
}

impl DefaultBookRepository {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for DefaultBookRepository {
    async fn create_book(&self, req: &CreateBookRequest) -> Result<Book, CreateBookError> {
        let other = |err: sqlx::Error| {
            let err = anyhow!(err).context(format!(
                r#"Failed to create book with ISBN "{}""#,
                req.isbn()
            ));
            CreateBookError::Other(err)
        };

        let mut tx = self.pool.begin().await.map_err(other)?;

        let book: Book = sqlx::query_as(
            "INSERT INTO book (name, isbn, description, publishing_date) VALUES (?, ?, ?, ?) \
             RETURNING id, name, isbn, description, publishing_date",
        )
        .bind(req.name())
        .bind(req.isbn())
        .bind(req.description())
        .bind(req.publishing_date())
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                CreateBookError::Duplicate {
                    isbn: req.isbn().to_string(),
                }
            } else {
                other(err)
            }
        })?;

        for &author_id in req.author_ids() {
            sqlx::query("INSERT INTO author_book (author_id, book_id) VALUES (?, ?)")
                .bind(author_id)
                .bind(book.id())
                .execute(&mut *tx)
                .await
                .map_err(|err| {
                    if is_foreign_key_violation(&err) {
                        CreateBookError::AuthorNotFound { id: author_id }
                    } else {
                        other(err)
                    }
                })?;
        }

        tx.commit().await.map_err(other)?;

        Ok(book)
    }

    async fn find_book(&self, req: &FindBookRequest) -> Result<Book, FindBookError> {
        let book: Option<Book> = sqlx::query_as(&format!(
            "SELECT {BOOK_COLUMNS} FROM book b WHERE b.id = ?"
        ))
        .bind(req.id())
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| {
            let err = anyhow!(err).context(format!(
                r#"Failed to retrieve book with id "{}""#,
                req.id()
            ));
            FindBookError::Other(err)
        })?;

        book.ok_or(FindBookError::NotFound { id: req.id() })
    }
}

#[derive(Debug, Clone)]
pub struct DefaultPrizeRepository {
    pool: SqlitePool,
}

impl DefaultPrizeRepository {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrizeRepository for DefaultPrizeRepository {
    async fn create_prize(&self, req: &CreatePrizeRequest) -> Result<Prize, CreatePrizeError> {
        let prize = sqlx::query_as(&format!(
            "INSERT INTO prize (name, description, premiation_date, author_id) \
             VALUES (?, ?, ?, ?) RETURNING {PRIZE_COLUMNS}"
        ))
        .bind(req.name())
        .bind(req.description())
        .bind(req.premiation_date())
        .bind(req.author_id())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if is_foreign_key_violation(&err) {
                CreatePrizeError::AuthorNotFound {
                    id: req.author_id(),
                }
            } else {
                let err = anyhow!(err).context(format!(
                    r#"Failed to create prize with name "{}""#,
                    req.name()
                ));
                CreatePrizeError::Other(err)
            }
        })?;

        Ok(prize)
    }

    async fn find_prize(&self, req: &FindPrizeRequest) -> Result<Prize, FindPrizeError> {
        let prize: Option<Prize> =
            sqlx::query_as(&format!("SELECT {PRIZE_COLUMNS} FROM prize WHERE id = ?"))
                .bind(req.id())
                .fetch_optional(&self.pool)
                .await
                .map_err(|err| {
                    let err = anyhow!(err).context(format!(
                        r#"Failed to retrieve prize with id "{}""#,
                        req.id()
                    ));
                    FindPrizeError::Other(err)
                })?;

        prize.ok_or(FindPrizeError::NotFound { id: req.id() })
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        return db_err.is_unique_violation();
    }

    false
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        return db_err.is_foreign_key_violation();
    }

    false
}
