//! Model to entity mappers
//!
//! `TryFrom<Model> for Entity` converts rows into domain objects. The
//! conversion fails when a stored state or enum value is not one the
//! entity admits.

mod catalog;
mod loan;
mod member;
mod state;
mod transaction;

use library_core::{DomainError, StatusName};

pub use loan::borrow_duration_column;

/// Decode a joined `states.name` into an entity status
pub(crate) fn decode_status<T>(state_name: &str) -> Result<T, DomainError>
where
    T: TryFrom<StatusName, Error = DomainError>,
{
    let name = StatusName::parse(state_name)
        .ok_or_else(|| DomainError::DatabaseError(format!("unknown state in row: {state_name}")))?;
    T::try_from(name)
}
