//! Handlers for the `/agents` resource (business partners).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use ledgerd_core::error::CoreError;
use ledgerd_core::permissions::names;
use ledgerd_core::policy::Policy;
use ledgerd_core::types::DbId;
use ledgerd_db::models::agent::{AgentResponse, CreateAgent, UpdateAgent};
use ledgerd_db::repositories::AgentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Principal;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Accepted `tax_classification` values.
const TAX_CLASSIFICATIONS: &[&str] = &["individual", "non-individual"];

/// Accepted `agent_type` values.
const AGENT_TYPES: &[&str] = &["customer", "supplier", "government-agency", "employee", "others"];

/// Accepted `registration_type` values.
const REGISTRATION_TYPES: &[&str] = &["vat", "non-vat"];

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /agents`.
#[derive(Debug, Deserialize)]
pub struct CreateAgentRequest {
    pub agent_code: String,
    pub tin: String,
    pub tax_classification: String,
    pub registered_name: String,
    pub agent_name: String,
    pub trade_name: String,
    pub agent_type: String,
    pub registration_type: String,
    pub authorized_representative: Option<String>,
    pub address: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub website: Option<String>,
}

/// Request body for `PATCH /agents/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateAgentRequest {
    pub agent_code: Option<String>,
    pub tin: Option<String>,
    pub tax_classification: Option<String>,
    pub registered_name: Option<String>,
    pub agent_name: Option<String>,
    pub trade_name: Option<String>,
    pub agent_type: Option<String>,
    pub registration_type: Option<String>,
    pub authorized_representative: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub website: Option<String>,
}

// ---------------------------------------------------------------------------
// Population helper
// ---------------------------------------------------------------------------

/// Populate a journal's agent reference through the soft-delete filter
/// (deleted agent -> `null`).
pub(crate) async fn populate_agent(
    state: &AppState,
    agent_id: Option<DbId>,
) -> AppResult<Option<AgentResponse>> {
    let Some(id) = agent_id else {
        return Ok(None);
    };
    Ok(AgentRepo::find_by_id(&state.pool, id)
        .await?
        .map(|a| a.into_response(&state.tin)))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/agents
pub async fn list_agents(
    State(state): State<AppState>,
    user: Principal,
) -> AppResult<Json<DataResponse<Vec<AgentResponse>>>> {
    user.authorize(&Policy::permission(names::VIEW_ALL_AGENTS))?;

    let agents = AgentRepo::list(&state.pool).await?;
    let responses = agents
        .into_iter()
        .map(|a| a.into_response(&state.tin))
        .collect();
    Ok(Json(DataResponse::new(responses)))
}

/// GET /api/v1/agents/deleted
pub async fn list_deleted_agents(
    State(state): State<AppState>,
    user: Principal,
) -> AppResult<Json<DataResponse<Vec<AgentResponse>>>> {
    user.authorize(&Policy::permission(names::RESTORE_AGENT))?;

    let agents = AgentRepo::list_deleted(&state.pool).await?;
    let responses = agents
        .into_iter()
        .map(|a| a.into_response(&state.tin))
        .collect();
    Ok(Json(DataResponse::new(responses)))
}

/// POST /api/v1/agents
pub async fn create_agent(
    State(state): State<AppState>,
    user: Principal,
    Json(input): Json<CreateAgentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AgentResponse>>)> {
    user.authorize(&Policy::permission(names::CREATE_AGENT))?;

    if input.tin.is_empty() {
        return Err(AppError::Core(CoreError::Validation("TIN is required".into())));
    }
    validate_enum("tax_classification", &input.tax_classification, TAX_CLASSIFICATIONS)?;
    validate_enum("agent_type", &input.agent_type, AGENT_TYPES)?;
    validate_enum("registration_type", &input.registration_type, REGISTRATION_TYPES)?;

    let digest = state.tin.digest(&input.tin);
    if AgentRepo::find_by_tin_digest(&state.pool, &digest, None)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict("Agent TIN already exists".into())));
    }

    let create_dto = CreateAgent {
        agent_code: input.agent_code,
        tin: state.tin.encrypt(&input.tin),
        tin_digest: digest,
        tax_classification: input.tax_classification,
        registered_name: input.registered_name,
        agent_name: input.agent_name,
        trade_name: input.trade_name,
        agent_type: input.agent_type,
        registration_type: input.registration_type,
        authorized_representative: input.authorized_representative,
        address: input.address,
        email: input.email,
        phone: input.phone,
        fax: input.fax,
        website: input.website,
    };

    let agent = AgentRepo::create(&state.pool, &create_dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(agent.into_response(&state.tin))),
    ))
}

/// GET /api/v1/agents/{id}
pub async fn get_agent(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AgentResponse>>> {
    user.authorize(&Policy::permission(names::VIEW_AGENT_BY_ID))?;

    let agent = AgentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Agent", id }))?;
    Ok(Json(DataResponse::new(agent.into_response(&state.tin))))
}

/// PATCH /api/v1/agents/{id}
pub async fn update_agent(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAgentRequest>,
) -> AppResult<Json<DataResponse<AgentResponse>>> {
    user.authorize(&Policy::permission(names::UPDATE_AGENT))?;

    if let Some(ref v) = input.tax_classification {
        validate_enum("tax_classification", v, TAX_CLASSIFICATIONS)?;
    }
    if let Some(ref v) = input.agent_type {
        validate_enum("agent_type", v, AGENT_TYPES)?;
    }
    if let Some(ref v) = input.registration_type {
        validate_enum("registration_type", v, REGISTRATION_TYPES)?;
    }

    let (tin, tin_digest) = match input.tin {
        Some(ref plaintext) if !plaintext.is_empty() => {
            let digest = state.tin.digest(plaintext);
            if AgentRepo::find_by_tin_digest(&state.pool, &digest, Some(id))
                .await?
                .is_some()
            {
                return Err(AppError::Core(CoreError::Conflict(
                    "Agent TIN already exists".into(),
                )));
            }
            (Some(state.tin.encrypt(plaintext)), Some(digest))
        }
        _ => (None, None),
    };

    let update_dto = UpdateAgent {
        agent_code: input.agent_code,
        tin,
        tin_digest,
        tax_classification: input.tax_classification,
        registered_name: input.registered_name,
        agent_name: input.agent_name,
        trade_name: input.trade_name,
        agent_type: input.agent_type,
        registration_type: input.registration_type,
        authorized_representative: input.authorized_representative,
        address: input.address,
        email: input.email,
        phone: input.phone,
        fax: input.fax,
        website: input.website,
    };

    let agent = AgentRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Agent", id }))?;
    Ok(Json(DataResponse::new(agent.into_response(&state.tin))))
}

/// DELETE /api/v1/agents/{id}
pub async fn delete_agent(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    user.authorize(&Policy::permission(names::DELETE_AGENT))?;

    let deleted = AgentRepo::soft_delete(&state.pool, id).await?;
    if deleted {
        Ok(Json(MessageResponse::new("Agent deleted")))
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Agent", id }))
    }
}

/// PATCH /api/v1/agents/{id}/restore
pub async fn restore_agent(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AgentResponse>>> {
    user.authorize(&Policy::permission(names::RESTORE_AGENT))?;

    let restored = AgentRepo::restore(&state.pool, id).await?;
    if !restored {
        return Err(AppError::Core(CoreError::NotFound { entity: "Agent", id }));
    }

    let agent = AgentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Agent", id }))?;
    Ok(Json(DataResponse::new(agent.into_response(&state.tin))))
}

/// Reject a value outside the accepted set, naming the field.
fn validate_enum(field: &str, value: &str, accepted: &[&str]) -> AppResult<()> {
    if accepted.contains(&value) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "Invalid {field}: {value} (accepted: {})",
            accepted.join(", ")
        ))))
    }
}
