//! Member model -> entity

use library_core::{DomainError, Gender, Member, RecordId};

use super::decode_status;
use crate::models::MemberModel;

impl TryFrom<MemberModel> for Member {
    type Error = DomainError;

    fn try_from(model: MemberModel) -> Result<Self, Self::Error> {
        let gender = match model.gender.as_deref() {
            None => None,
            Some(raw) => Some(
                Gender::parse(raw)
                    .ok_or_else(|| DomainError::DatabaseError(format!("unknown gender: {raw}")))?,
            ),
        };

        Ok(Member {
            id: RecordId::from_uuid(model.id),
            first_name: model.first_name,
            last_name: model.last_name,
            national_id: model.national_id,
            mobile_no: model.mobile_no,
            gender,
            membership_no: model.membership_no,
            status: decode_status(&model.state_name)?,
            date_created: model.date_created,
            date_modified: model.date_modified,
        })
    }
}
