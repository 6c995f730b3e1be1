//! Catalogue models -> entities

use library_core::{Author, Book, Category, DomainError, RecordId, Salutation};

use super::decode_status;
use crate::models::{AuthorModel, BookModel, CategoryModel};

impl TryFrom<AuthorModel> for Author {
    type Error = DomainError;

    fn try_from(model: AuthorModel) -> Result<Self, Self::Error> {
        let salutation = Salutation::parse(&model.salutation).ok_or_else(|| {
            DomainError::DatabaseError(format!("unknown salutation: {}", model.salutation))
        })?;

        Ok(Author {
            id: RecordId::from_uuid(model.id),
            salutation,
            first_name: model.first_name,
            last_name: model.last_name,
            description: model.description,
            status: decode_status(&model.state_name)?,
            date_created: model.date_created,
            date_modified: model.date_modified,
        })
    }
}

impl TryFrom<CategoryModel> for Category {
    type Error = DomainError;

    fn try_from(model: CategoryModel) -> Result<Self, Self::Error> {
        Ok(Category {
            id: RecordId::from_uuid(model.id),
            name: model.name,
            description: model.description,
            status: decode_status(&model.state_name)?,
            date_created: model.date_created,
            date_modified: model.date_modified,
        })
    }
}

impl TryFrom<BookModel> for Book {
    type Error = DomainError;

    fn try_from(model: BookModel) -> Result<Self, Self::Error> {
        Ok(Book {
            id: RecordId::from_uuid(model.id),
            title: model.title,
            isbn: model.isbn,
            edition: model.edition,
            published_date: model.published_date,
            image_url: model.image_url,
            author_id: RecordId::from_uuid(model.author_id),
            category_id: RecordId::from_uuid(model.category_id),
            status: decode_status(&model.state_name)?,
            date_created: model.date_created,
            date_modified: model.date_modified,
        })
    }
}
