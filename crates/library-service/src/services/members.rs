//! Member administration
//!
//! Registration, lookup, profile updates and the member status machine.

use chrono::Utc;
use std::fmt;
use tracing::{info, instrument};
use validator::Validate;

use library_core::validation::validate_name;
use library_core::{Gender, Member, MemberStatus};

use super::context::ServiceContext;
use super::error::{parse_id, ServiceError, ServiceResult};
use super::ledger::{RequestContext, TransactionLog};
use crate::dto::{
    ChangeMemberStatusRequest, CreateMemberRequest, MemberResponse, UpdateMemberRequest,
};

/// Transition requested through `change_member_status`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberAction {
    Delete,
    Enable,
    Disable,
}

impl MemberAction {
    /// Case-insensitive; `None` for anything unknown
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "delete" => Some(Self::Delete),
            "enable" => Some(Self::Enable),
            "disable" => Some(Self::Disable),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delete => "Delete",
            Self::Enable => "Enable",
            Self::Disable => "Disable",
        }
    }

    fn apply(self, member: &mut Member) -> Result<(), library_core::DomainError> {
        match self {
            Self::Delete => member.delete(),
            Self::Enable => member.enable(),
            Self::Disable => member.disable(),
        }
    }
}

impl fmt::Display for MemberAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit label shared by every unrecognised action. The raw action stays in
/// the recorded request.
const INVALID_ACTION_LABEL: &str = "InvalidAction";

/// Trimmed value, or `None` when blank
fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_gender(raw: Option<&str>) -> ServiceResult<Option<Gender>> {
    raw.map(|g| {
        Gender::parse(g).ok_or_else(|| ServiceError::validation("gender must be M or F"))
    })
    .transpose()
}

pub struct MembersAdministration<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MembersAdministration<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn ledger(&self) -> TransactionLog<'a> {
        TransactionLog::new(self.ctx)
    }

    /// Register a member in the configured default state
    #[instrument(skip(self, rc, req))]
    pub async fn create_member(
        &self,
        rc: &RequestContext,
        req: CreateMemberRequest,
    ) -> ServiceResult<MemberResponse> {
        let tx = self.ledger().open("CreateMember", rc).await?;
        let result = self.insert_member(req).await;
        tx.settle(result, "Success").await
    }

    async fn insert_member(&self, req: CreateMemberRequest) -> ServiceResult<MemberResponse> {
        let first_name = validate_name("first_name", &req.first_name)?;
        let last_name = validate_name("last_name", &req.last_name)?;
        req.validate()?;
        let gender = parse_gender(req.gender.as_deref())?;
        let status = MemberStatus::try_from(self.ctx.library().default_state)?;

        let membership_no = non_blank(req.membership_no);
        let mut member = Member::new(first_name, last_name, membership_no, status);
        member.national_id = req.national_id;
        member.mobile_no = req.mobile_no;
        member.gender = gender;

        self.ctx
            .member_repo()
            .create(&member)
            .await
            .map_err(ServiceError::save_failed)?;

        info!(member_id = %member.id, membership_no = %member.membership_no, "Member created");
        Ok(MemberResponse::from(member))
    }

    /// Fetch one member, whatever its state
    #[instrument(skip(self))]
    pub async fn get_member(&self, member_id: &str) -> ServiceResult<MemberResponse> {
        let id = parse_id(member_id, "member", true)?;
        let member = self
            .ctx
            .member_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found_on_fetch("Member record"))?;
        Ok(MemberResponse::from(member))
    }

    /// Every member, including disabled and deleted ones
    #[instrument(skip(self))]
    pub async fn get_members(&self) -> ServiceResult<Vec<MemberResponse>> {
        let members = self.ctx.member_repo().list().await?;
        if members.is_empty() {
            return Err(ServiceError::not_found("Members"));
        }
        Ok(members.iter().map(MemberResponse::from).collect())
    }

    /// Update a member's details. Absent fields are left as they are.
    #[instrument(skip(self, rc, req), fields(member_id = %req.id))]
    pub async fn update_member(
        &self,
        rc: &RequestContext,
        req: UpdateMemberRequest,
    ) -> ServiceResult<MemberResponse> {
        let tx = self.ledger().open("UpdateMember", rc).await?;
        let result = self.apply_member_update(req).await;
        tx.settle(result, "Success").await
    }

    async fn apply_member_update(&self, req: UpdateMemberRequest) -> ServiceResult<MemberResponse> {
        let id = parse_id(&req.id, "member", false)?;
        let mut member = self
            .ctx
            .member_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Member"))?;

        if let Some(first_name) = req.first_name.as_deref() {
            member.first_name = validate_name("first_name", first_name)?;
        }
        if let Some(last_name) = req.last_name.as_deref() {
            member.last_name = validate_name("last_name", last_name)?;
        }
        req.validate()?;
        if let Some(gender) = parse_gender(req.gender.as_deref())? {
            member.gender = Some(gender);
        }
        if req.national_id.is_some() {
            member.national_id = req.national_id;
        }
        if req.mobile_no.is_some() {
            member.mobile_no = req.mobile_no;
        }
        if let Some(membership_no) = non_blank(req.membership_no) {
            member.membership_no = membership_no;
        }
        member.date_modified = Utc::now();

        self.ctx
            .member_repo()
            .update(&member)
            .await
            .map_err(ServiceError::save_failed)?;

        info!(member_id = %member.id, "Member updated");
        Ok(MemberResponse::from(member))
    }

    /// Delete, enable or disable a member. Loans are left untouched.
    #[instrument(skip(self, rc, req), fields(member_id = %req.id))]
    pub async fn change_member_status(
        &self,
        rc: &RequestContext,
        req: ChangeMemberStatusRequest,
    ) -> ServiceResult<MemberResponse> {
        let raw_action = req
            .action
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or("delete");
        let action = MemberAction::parse(raw_action);
        let label = action.map_or(INVALID_ACTION_LABEL, MemberAction::as_str);

        let tx = self.ledger().open(&format!("{label}Member"), rc).await?;
        let result = self.transition_member(&req.id, action, raw_action).await;
        tx.settle(result, &format!("{label} member successfully")).await
    }

    async fn transition_member(
        &self,
        raw_id: &str,
        action: Option<MemberAction>,
        raw_action: &str,
    ) -> ServiceResult<MemberResponse> {
        let id = parse_id(raw_id, "member", false)?;
        let mut member = self
            .ctx
            .member_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Member"))?;

        let action = action.ok_or_else(|| ServiceError::InvalidAction(raw_action.to_string()))?;
        action.apply(&mut member)?;

        self.ctx
            .member_repo()
            .update(&member)
            .await
            .map_err(ServiceError::status_change_failed)?;

        info!(member_id = %member.id, %action, state = ?member.status, "Member state changed");
        Ok(MemberResponse::from(member))
    }
}
