use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use library_core::validation::validate_name;
use library_core::{Author, Salutation};

use super::{non_blank, BooksAdministration};
use crate::dto::{AuthorResponse, CreateAuthorRequest, DeleteRecordRequest, UpdateAuthorRequest};
use crate::services::error::{parse_id, ServiceError, ServiceResult};
use crate::services::ledger::RequestContext;

fn parse_salutation(raw: &str) -> ServiceResult<Salutation> {
    Salutation::parse(raw).ok_or_else(|| {
        let allowed: Vec<&str> = Salutation::ALL.iter().map(|s| s.as_str()).collect();
        ServiceError::validation(format!("salutation must be one of {}", allowed.join(", ")))
    })
}

impl BooksAdministration<'_> {
    #[instrument(skip(self, rc, req))]
    pub async fn create_author(
        &self,
        rc: &RequestContext,
        req: CreateAuthorRequest,
    ) -> ServiceResult<AuthorResponse> {
        let tx = self.ledger().open("CreateAuthor", rc).await?;
        let result = self.insert_author(req).await;
        tx.settle(result, "Success").await
    }

    async fn insert_author(&self, req: CreateAuthorRequest) -> ServiceResult<AuthorResponse> {
        let first_name = validate_name("first_name", &req.first_name)?;
        let last_name = validate_name("last_name", &req.last_name)?;
        req.validate()?;
        let salutation = parse_salutation(&req.salutation)?;

        let author = Author::new(
            salutation,
            first_name,
            last_name,
            non_blank(req.description),
            self.catalog_status()?,
        );
        self.ctx
            .author_repo()
            .create(&author)
            .await
            .map_err(ServiceError::save_failed)?;

        info!(author_id = %author.id, name = %author.display_name(), "Author created");
        Ok(AuthorResponse::from(&author))
    }

    #[instrument(skip(self))]
    pub async fn get_author(&self, author_id: &str) -> ServiceResult<AuthorResponse> {
        let id = parse_id(author_id, "author", true)?;
        let author = self
            .ctx
            .author_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found_on_fetch("Author"))?;
        Ok(AuthorResponse::from(&author))
    }

    /// Authors that are not deleted
    #[instrument(skip(self))]
    pub async fn get_authors(&self) -> ServiceResult<Vec<AuthorResponse>> {
        let authors = self.ctx.author_repo().list_visible().await?;
        if authors.is_empty() {
            return Err(ServiceError::not_found("Authors"));
        }
        Ok(authors.iter().map(AuthorResponse::from).collect())
    }

    #[instrument(skip(self, rc, req), fields(author_id = %req.id))]
    pub async fn update_author(
        &self,
        rc: &RequestContext,
        req: UpdateAuthorRequest,
    ) -> ServiceResult<AuthorResponse> {
        let tx = self.ledger().open("UpdateAuthor", rc).await?;
        let result = self.apply_author_update(req).await;
        tx.settle(result, "Success").await
    }

    async fn apply_author_update(&self, req: UpdateAuthorRequest) -> ServiceResult<AuthorResponse> {
        let id = parse_id(&req.id, "author", false)?;
        let mut author = self.load_author(id).await?;
        author.ensure_editable()?;

        if let Some(first_name) = req.first_name.as_deref() {
            author.first_name = validate_name("first_name", first_name)?;
        }
        if let Some(last_name) = req.last_name.as_deref() {
            author.last_name = validate_name("last_name", last_name)?;
        }
        req.validate()?;
        if let Some(salutation) = req.salutation.as_deref() {
            author.salutation = parse_salutation(salutation)?;
        }
        if req.description.is_some() {
            author.description = non_blank(req.description);
        }
        author.date_modified = Utc::now();

        self.ctx
            .author_repo()
            .update(&author)
            .await
            .map_err(ServiceError::save_failed)?;

        info!(author_id = %author.id, "Author updated");
        Ok(AuthorResponse::from(&author))
    }

    #[instrument(skip(self, rc, req), fields(author_id = %req.id))]
    pub async fn delete_author(
        &self,
        rc: &RequestContext,
        req: DeleteRecordRequest,
    ) -> ServiceResult<AuthorResponse> {
        let tx = self.ledger().open("DeleteAuthor", rc).await?;
        let result = self.remove_author(&req.id).await;
        tx.settle(result, "Delete author successfully").await
    }

    async fn remove_author(&self, raw_id: &str) -> ServiceResult<AuthorResponse> {
        let id = parse_id(raw_id, "author", false)?;
        let mut author = self.load_author(id).await?;
        author.delete()?;

        self.ctx
            .author_repo()
            .update(&author)
            .await
            .map_err(ServiceError::status_change_failed)?;

        info!(author_id = %author.id, "Author deleted");
        Ok(AuthorResponse::from(&author))
    }
}
