//! Handlers for skill exchanges and ratings.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use skillswap_core::error::CoreError;
use skillswap_core::exchange::{
    active_students_delta, authorize_rating_fields, participant_role, rating_updates,
    validate_exchange_request, validate_rating, validate_status_transition, ExchangeStatus,
};
use skillswap_core::types::DbId;
use skillswap_db::models::exchange::{CreateExchange, ExchangeChange, UpdateExchange};
use skillswap_db::repositories::ExchangeRepo;

use crate::error::AppResult;
use crate::handlers::skills::find_skill;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/exchanges
///
/// Exchanges where the caller is teacher or student.
pub async fn list_exchanges(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let exchanges = ExchangeRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: exchanges }))
}

/// POST /api/exchanges
///
/// Request lessons for a teaching skill. The caller must be the student.
pub async fn create_exchange(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateExchange>,
) -> AppResult<impl IntoResponse> {
    let skill = find_skill(&state.pool, input.teacher_skill_id).await?;
    validate_exchange_request(
        auth.user_id,
        input.student_id,
        input.teacher_id,
        skill.user_id,
        skill.is_teaching,
    )?;

    let exchange = ExchangeRepo::create(&state.pool, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        exchange_id = exchange.id,
        teacher_id = exchange.teacher_id,
        skill_id = skill.id,
        "Exchange requested"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: exchange })))
}

/// PUT /api/exchanges/{id}
///
/// Move the status forward and/or leave a rating. Each participant may only
/// write the rating field named after their own role.
pub async fn update_exchange(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(exchange_id): Path<DbId>,
    Json(input): Json<UpdateExchange>,
) -> AppResult<impl IntoResponse> {
    let exchange = ExchangeRepo::find_by_id(&state.pool, exchange_id)
        .await?
        .ok_or(CoreError::not_found("Exchange", exchange_id))?;

    let role = participant_role(exchange.teacher_id, exchange.student_id, auth.user_id)?;
    authorize_rating_fields(role, input.student_rating, input.teacher_rating)?;
    for rating in [input.student_rating, input.teacher_rating].into_iter().flatten() {
        validate_rating(rating)?;
    }

    let current = ExchangeStatus::from_str_db(&exchange.status)?;
    let target = match input.status.as_deref() {
        Some(status) => ExchangeStatus::from_str_db(status)?,
        None => current,
    };
    validate_status_transition(current, target)?;

    let change = ExchangeChange {
        status: target,
        student_rating: input.student_rating,
        teacher_rating: input.teacher_rating,
        rating_updates: rating_updates(
            exchange.student_rating,
            exchange.teacher_rating,
            input.student_rating,
            input.teacher_rating,
        ),
        active_students_delta: active_students_delta(current, target),
    };
    let updated = ExchangeRepo::apply_change(&state.pool, &exchange, &change).await?;

    tracing::info!(
        user_id = auth.user_id,
        exchange_id,
        from = current.as_str(),
        to = target.as_str(),
        ratings = change.rating_updates.len(),
        "Exchange updated"
    );

    Ok(Json(DataResponse { data: updated }))
}
