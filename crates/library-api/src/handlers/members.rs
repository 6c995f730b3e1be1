//! Member handlers
//!
//! Endpoints under `/api/v1/members`.

use axum::extract::State;
use library_service::dto::{
    ChangeMemberStatusRequest, CreateMemberRequest, GetMemberRequest, MemberResponse,
    UpdateMemberRequest,
};
use library_service::MembersAdministration;
use serde_json::Value;

use super::request_context;
use crate::extractors::{AuthUser, ClientIp, JsonBody};
use crate::response::{success, ApiResult, Envelope};
use crate::state::AppState;

/// POST /members/create_member/
pub async fn create_member(
    State(state): State<AppState>,
    auth: AuthUser,
    ip: ClientIp,
    JsonBody { body, raw }: JsonBody<CreateMemberRequest>,
) -> ApiResult<Envelope<MemberResponse>> {
    let rc = request_context(&auth, ip, raw);
    let member = MembersAdministration::new(state.service_context())
        .create_member(&rc, body)
        .await?;
    Ok(success(member))
}

/// POST /members/get_member/
pub async fn get_member(
    State(state): State<AppState>,
    _auth: AuthUser,
    JsonBody { body, .. }: JsonBody<GetMemberRequest>,
) -> ApiResult<Envelope<MemberResponse>> {
    let member = MembersAdministration::new(state.service_context())
        .get_member(&body.member_id)
        .await?;
    Ok(success(member))
}

/// POST /members/get_members/
pub async fn get_members(
    State(state): State<AppState>,
    _auth: AuthUser,
    _body: JsonBody<Value>,
) -> ApiResult<Envelope<Vec<MemberResponse>>> {
    let members = MembersAdministration::new(state.service_context())
        .get_members()
        .await?;
    Ok(success(members))
}

/// POST /members/update_member/
pub async fn update_member(
    State(state): State<AppState>,
    auth: AuthUser,
    ip: ClientIp,
    JsonBody { body, raw }: JsonBody<UpdateMemberRequest>,
) -> ApiResult<Envelope<MemberResponse>> {
    let rc = request_context(&auth, ip, raw);
    let member = MembersAdministration::new(state.service_context())
        .update_member(&rc, body)
        .await?;
    Ok(success(member))
}

/// POST /members/change-member-status/
pub async fn change_member_status(
    State(state): State<AppState>,
    auth: AuthUser,
    ip: ClientIp,
    JsonBody { body, raw }: JsonBody<ChangeMemberStatusRequest>,
) -> ApiResult<Envelope<MemberResponse>> {
    let rc = request_context(&auth, ip, raw);
    let member = MembersAdministration::new(state.service_context())
        .change_member_status(&rc, body)
        .await?;
    Ok(success(member))
}
