use crate::models::{
    AUTHOR_HAS_BOOKS, AUTHOR_HAS_PRIZES, Author, BIRTH_DATE_IN_FUTURE, BIRTH_DATE_REQUIRED,
    CreateAuthorError, CreateAuthorRequest, DeleteAuthorError, DeleteAuthorRequest,
    FindAllAuthorsError, FindAuthorError, FindAuthorRequest, UpdateAuthorError,
    UpdateAuthorRequest,
};
use crate::repositories::AuthorRepository;
use chrono::{Local, NaiveDate};
use tracing::{error, info, warn};

/// Business rules for authors, layered over an [`AuthorRepository`].
#[derive(Debug, Clone)]
pub struct AuthorService<AR: AuthorRepository> {
    author_repo: AR,
}

impl<AR: AuthorRepository> AuthorService<AR> {
    pub const fn new(author_repo: AR) -> Self {
        Self { author_repo }
    }

    /// Persists a new author after checking that its birth date is present
    /// and not after today in the local time zone.
    #[tracing::instrument(skip_all, fields(name = req.name()))]
    pub async fn create_author(
        &self,
        req: &CreateAuthorRequest,
    ) -> Result<Author, CreateAuthorError> {
        if let Err(err) = validate_birth_date(req.birth_date(), today()) {
            warn!(%err, "rejected author");
            return Err(err);
        }

        let author = self.author_repo.create_author(req).await.inspect_err(|err| {
            error!(error = ?err, "failed to create author");
        })?;
        info!(id = author.id(), "created author");

        Ok(author)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_authors(&self) -> Result<Vec<Author>, FindAllAuthorsError> {
        self.author_repo.find_all_authors().await.inspect_err(|err| {
            error!(error = ?err, "failed to list authors");
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_author(&self, id: i64) -> Result<Author, FindAuthorError> {
        self.author_repo
            .find_author(&FindAuthorRequest::new(id))
            .await
            .inspect_err(|err| match err {
                FindAuthorError::NotFound { .. } => warn!("author not found"),
                FindAuthorError::Other(cause) => error!(error = ?cause, "failed to find author"),
            })
    }

    /// Replaces the name, birth date and description of the author at `req.id()`.
    ///
    /// Unlike [`Self::create_author`] the birth date is stored as given.
    #[tracing::instrument(skip_all, fields(id = req.id()))]
    pub async fn update_author(
        &self,
        req: &UpdateAuthorRequest,
    ) -> Result<Author, UpdateAuthorError> {
        let author = self
            .author_repo
            .update_author(req)
            .await
            .inspect_err(|err| match err {
                UpdateAuthorError::NotFound { .. } => warn!("author not found"),
                UpdateAuthorError::Other(cause) => {
                    error!(error = ?cause, "failed to update author");
                }
            })?;
        info!("updated author");

        Ok(author)
    }

    /// Removes an author that has neither books nor prizes.
    #[tracing::instrument(skip(self))]
    pub async fn delete_author(&self, id: i64) -> Result<(), DeleteAuthorError> {
        let author = self
            .author_repo
            .find_author(&FindAuthorRequest::new(id))
            .await
            .map_err(|err| match err {
                FindAuthorError::NotFound { id } => DeleteAuthorError::NotFound { id },
                FindAuthorError::Other(cause) => DeleteAuthorError::Other(cause),
            })
            .inspect_err(|err| warn!(%err, "author not deleted"))?;

        if !author.books().is_empty() {
            warn!(books = author.books().len(), "author has books");
            return Err(DeleteAuthorError::IllegalOperation(AUTHOR_HAS_BOOKS.to_string()));
        }
        if !author.prizes().is_empty() {
            warn!(prizes = author.prizes().len(), "author has prizes");
            return Err(DeleteAuthorError::IllegalOperation(AUTHOR_HAS_PRIZES.to_string()));
        }

        self.author_repo
            .delete_author(&DeleteAuthorRequest::new(id))
            .await
            .inspect_err(|err| warn!(%err, "author not deleted"))?;
        info!("deleted author");

        Ok(())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn validate_birth_date(
    birth_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<NaiveDate, CreateAuthorError> {
    let birth_date = birth_date
        .ok_or_else(|| CreateAuthorError::IllegalOperation(BIRTH_DATE_REQUIRED.to_string()))?;
    if birth_date > today {
        return Err(CreateAuthorError::IllegalOperation(BIRTH_DATE_IN_FUTURE.to_string()));
    }

    Ok(birth_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn birth_date_today_is_accepted() {
        let today = date(2024, 6, 1);
        assert_eq!(validate_birth_date(Some(today), today).unwrap(), today);
    }

    #[test]
    fn birth_date_long_ago_is_accepted() {
        let old = date(1800, 1, 1);
        assert_eq!(validate_birth_date(Some(old), date(2024, 6, 1)).unwrap(), old);
    }

    #[test]
    fn birth_date_tomorrow_is_rejected() {
        let err = validate_birth_date(Some(date(2024, 6, 2)), date(2024, 6, 1)).unwrap_err();
        assert!(err.is_illegal_operation());
        assert_eq!(err.to_string(), BIRTH_DATE_IN_FUTURE);
    }

    #[test]
    fn missing_birth_date_is_rejected() {
        let err = validate_birth_date(None, date(2024, 6, 1)).unwrap_err();
        assert!(err.is_illegal_operation());
        assert_eq!(err.to_string(), BIRTH_DATE_REQUIRED);
    }
}
