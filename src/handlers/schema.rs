use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use strucbot_api::{DeleteSchemaResponse, GenerateSchemaRequest, SchemaRecord};
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::extractors::AuthUser;
use crate::error::AppError;
use crate::gemini::SchemaGenerator;
use crate::store::SchemaStore;

/// POST /api/generate-schema
/// Runs the generation gateway and appends the result to the caller's
/// collection.
pub async fn generate_schema(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<GenerateSchemaRequest>,
) -> Result<Json<SchemaRecord>, AppError> {
    if payload.prompt.is_empty() {
        return Err(AppError::validation("Prompt is required"));
    }

    tracing::info!("Received prompt from {}: \"{}\"", user.username, payload.prompt);

    let generated = state.generator.generate(&payload.prompt).await?;

    let record = SchemaRecord {
        id: Uuid::new_v4(),
        table_name: generated.table_name,
        columns: generated.columns,
        extra: generated.extra,
        prompt: payload.prompt,
        created_at: Utc::now(),
    };

    state.schemas.append(user.id, record.clone())?;

    tracing::info!(
        "Generated and saved schema \"{}\" for user {}",
        record.table_name,
        user.id
    );
    Ok(Json(record))
}

/// GET /api/schemas
pub async fn list_schemas(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<SchemaRecord>>, AppError> {
    Ok(Json(state.schemas.list(user.id)?))
}

/// DELETE /api/schemas/{id}
pub async fn delete_schema(
    State(state): State<AppState>,
    user: AuthUser,
    Path(schema_id): Path<Uuid>,
) -> Result<Json<DeleteSchemaResponse>, AppError> {
    state.schemas.remove(user.id, schema_id)?;

    tracing::info!("Deleted schema {} for user {}", schema_id, user.id);
    Ok(Json(DeleteSchemaResponse {
        message: "Schema deleted successfully".to_string(),
    }))
}
