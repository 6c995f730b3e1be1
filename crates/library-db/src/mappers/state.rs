//! State model -> entity

use library_core::{DomainError, RecordId, State, StatusName};

use crate::models::StateModel;

impl TryFrom<StateModel> for State {
    type Error = DomainError;

    fn try_from(model: StateModel) -> Result<Self, Self::Error> {
        let name = StatusName::parse(&model.name)
            .ok_or_else(|| DomainError::DatabaseError(format!("unknown state: {}", model.name)))?;
        Ok(State {
            id: RecordId::from_uuid(model.id),
            name,
            description: model.description.unwrap_or_default(),
            date_created: model.date_created,
            date_modified: model.date_modified,
        })
    }
}
