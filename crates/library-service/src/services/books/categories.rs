use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use library_core::{Category, DomainError};

use super::{non_blank, BooksAdministration};
use crate::dto::{
    CategoryResponse, CreateCategoryRequest, DeleteRecordRequest, UpdateCategoryRequest,
};
use crate::services::error::{parse_id, ServiceError, ServiceResult};
use crate::services::ledger::RequestContext;

fn category_name(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidName("name is required".to_string()));
    }
    Ok(name.to_string())
}

impl BooksAdministration<'_> {
    #[instrument(skip(self, rc, req))]
    pub async fn create_category(
        &self,
        rc: &RequestContext,
        req: CreateCategoryRequest,
    ) -> ServiceResult<CategoryResponse> {
        let tx = self.ledger().open("CreateCategory", rc).await?;
        let result = self.insert_category(req).await;
        tx.settle(result, "Success").await
    }

    async fn insert_category(&self, req: CreateCategoryRequest) -> ServiceResult<CategoryResponse> {
        let name = category_name(&req.name)?;
        req.validate()?;

        let category = Category::new(name, non_blank(req.description), self.catalog_status()?);
        self.ctx
            .category_repo()
            .create(&category)
            .await
            .map_err(ServiceError::save_failed)?;

        info!(category_id = %category.id, name = %category.name, "Category created");
        Ok(CategoryResponse::from(&category))
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, category_id: &str) -> ServiceResult<CategoryResponse> {
        let id = parse_id(category_id, "category", true)?;
        let category = self
            .ctx
            .category_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found_on_fetch("Category"))?;
        Ok(CategoryResponse::from(&category))
    }

    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> ServiceResult<Vec<CategoryResponse>> {
        let categories = self.ctx.category_repo().list_visible().await?;
        if categories.is_empty() {
            return Err(ServiceError::not_found("Categories"));
        }
        Ok(categories.iter().map(CategoryResponse::from).collect())
    }

    #[instrument(skip(self, rc, req), fields(category_id = %req.id))]
    pub async fn update_category(
        &self,
        rc: &RequestContext,
        req: UpdateCategoryRequest,
    ) -> ServiceResult<CategoryResponse> {
        let tx = self.ledger().open("UpdateCategory", rc).await?;
        let result = self.apply_category_update(req).await;
        tx.settle(result, "Success").await
    }

    async fn apply_category_update(
        &self,
        req: UpdateCategoryRequest,
    ) -> ServiceResult<CategoryResponse> {
        let id = parse_id(&req.id, "category", false)?;
        let mut category = self.load_category(id).await?;
        category.ensure_editable()?;

        if let Some(name) = req.name.as_deref() {
            category.name = category_name(name)?;
        }
        req.validate()?;
        if req.description.is_some() {
            category.description = non_blank(req.description);
        }
        category.date_modified = Utc::now();

        self.ctx
            .category_repo()
            .update(&category)
            .await
            .map_err(ServiceError::save_failed)?;

        info!(category_id = %category.id, "Category updated");
        Ok(CategoryResponse::from(&category))
    }

    #[instrument(skip(self, rc, req), fields(category_id = %req.id))]
    pub async fn delete_category(
        &self,
        rc: &RequestContext,
        req: DeleteRecordRequest,
    ) -> ServiceResult<CategoryResponse> {
        let tx = self.ledger().open("DeleteCategory", rc).await?;
        let result = self.remove_category(&req.id).await;
        tx.settle(result, "Delete category successfully").await
    }

    async fn remove_category(&self, raw_id: &str) -> ServiceResult<CategoryResponse> {
        let id = parse_id(raw_id, "category", false)?;
        let mut category = self.load_category(id).await?;
        category.delete()?;

        self.ctx
            .category_repo()
            .update(&category)
            .await
            .map_err(ServiceError::status_change_failed)?;

        info!(category_id = %category.id, "Category deleted");
        Ok(CategoryResponse::from(&category))
    }
}
