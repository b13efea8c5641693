use anyhow::{anyhow, Context};
use axum::{
    extract::{Path, State},
    http::{header::LOCATION, StatusCode},
    response::IntoResponse,
    Json,
};
use bookstore_db::{Entity, EntityId};
use bookstore_http::{fault_boundary, AppError, JsonBody, RequireAdmin, RequireAuth};
use validator::Validate;

use super::{CrudState, Identified, Resource};
use crate::utils::operation_label;

/// `GET /api/{component}`
pub async fn list<R: Resource>(
    RequireAuth(caller): RequireAuth,
    State(state): State<CrudState<R>>,
) -> Result<Json<Vec<R::ReadDto>>, AppError> {
    let label = operation_label(R::COMPONENT, "list");
    let failure = format!("Error retrieving {}", R::COMPONENT);

    fault_boundary(&label, &failure, async {
        tracing::info!(operation = %label, caller = %caller.sub, "Attempting to retrieve all {}", R::COMPONENT);

        let entities = state
            .repository
            .find_all()
            .await
            .with_context(|| format!("failed to load {}", R::COMPONENT))?;
        let items: Vec<R::ReadDto> = entities.into_iter().map(R::ReadDto::from).collect();

        tracing::info!(operation = %label, count = items.len(), "Successfully retrieved all {}", R::COMPONENT);
        Ok::<_, AppError>(Json(items))
    })
    .await
}

/// `GET /api/{component}/{id}`
pub async fn get_by_id<R: Resource>(
    RequireAuth(caller): RequireAuth,
    State(state): State<CrudState<R>>,
    Path(id): Path<EntityId>,
) -> Result<Json<R::ReadDto>, AppError> {
    let label = operation_label(R::COMPONENT, "get_by_id");
    let failure = format!("Error retrieving {} with id {id}", R::ENTITY);

    fault_boundary(&label, &failure, async {
        tracing::info!(operation = %label, caller = %caller.sub, id, "Attempting to retrieve {}", R::ENTITY);

        let entity = state
            .repository
            .find_by_id(id)
            .await
            .with_context(|| format!("failed to load {} {id}", R::ENTITY))?;

        let Some(entity) = entity else {
            tracing::warn!(operation = %label, id, "{} with id {id} not found", R::ENTITY);
            return Err(AppError::not_found(format!("{} {id}", R::ENTITY)));
        };

        tracing::info!(operation = %label, id, "Successfully retrieved {}", R::ENTITY);
        Ok::<_, AppError>(Json(R::ReadDto::from(entity)))
    })
    .await
}

/// `POST /api/{component}`, answers 201 with the stored record and its location.
pub async fn create<R: Resource>(
    RequireAdmin(caller): RequireAdmin,
    State(state): State<CrudState<R>>,
    JsonBody(body): JsonBody<R::CreateDto>,
) -> Result<impl IntoResponse, AppError> {
    let label = operation_label(R::COMPONENT, "create");
    let failure = format!("Error creating {}", R::ENTITY);

    fault_boundary(&label, &failure, async {
        tracing::info!(operation = %label, caller = %caller.sub, "Attempting to create {}", R::ENTITY);

        let Some(payload) = body else {
            tracing::warn!(operation = %label, "Empty {} payload", R::ENTITY);
            return Err(AppError::bad_request(format!("{} payload is required", R::ENTITY)));
        };
        payload.validate().inspect_err(|errors| {
            tracing::warn!(operation = %label, errors = %errors, "Invalid {} payload", R::ENTITY);
        })?;

        let mut entity: R::Entity = payload.into();
        let created = state
            .repository
            .create(&mut entity)
            .await
            .with_context(|| format!("failed to persist new {}", R::ENTITY))?;
        if !created {
            return Err(anyhow!("repository refused to create {}", R::ENTITY).into());
        }

        let id = entity.id();
        tracing::info!(operation = %label, id, "Successfully created {}", R::ENTITY);

        let location = format!("/api/{}/{id}", R::COMPONENT);
        Ok::<_, AppError>((
            StatusCode::CREATED,
            [(LOCATION, location)],
            Json(R::ReadDto::from(entity)),
        ))
    })
    .await
}

/// `PUT /api/{component}/{id}`, a full replace of the mutable fields.
pub async fn update<R: Resource>(
    RequireAdmin(caller): RequireAdmin,
    State(state): State<CrudState<R>>,
    Path(id): Path<EntityId>,
    JsonBody(body): JsonBody<R::UpdateDto>,
) -> Result<StatusCode, AppError> {
    let label = operation_label(R::COMPONENT, "update");
    let failure = format!("Error updating {} with id {id}", R::ENTITY);

    fault_boundary(&label, &failure, async {
        tracing::info!(operation = %label, caller = %caller.sub, id, "Attempting to update {}", R::ENTITY);

        let payload = match body {
            Some(payload) if id >= 1 && payload.id() == id => payload,
            other => {
                tracing::warn!(
                    operation = %label,
                    id,
                    body_id = other.as_ref().map(Identified::id),
                    "Rejected {} update: missing payload or id mismatch",
                    R::ENTITY
                );
                return Err(AppError::bad_request(format!(
                    "{} payload is required and its id must match the path id",
                    R::ENTITY
                )));
            }
        };
        payload.validate().inspect_err(|errors| {
            tracing::warn!(operation = %label, id, errors = %errors, "Invalid {} payload", R::ENTITY);
        })?;

        let exists = state
            .repository
            .exists(id)
            .await
            .with_context(|| format!("failed to check {} {id}", R::ENTITY))?;
        if !exists {
            tracing::warn!(operation = %label, id, "{} with id {id} not found", R::ENTITY);
            return Err(AppError::not_found(format!("{} {id}", R::ENTITY)));
        }

        let entity: R::Entity = payload.into();
        let updated = state
            .repository
            .update(&entity)
            .await
            .with_context(|| format!("failed to update {} {id}", R::ENTITY))?;
        if !updated {
            return Err(anyhow!("repository refused to update {} {id}", R::ENTITY).into());
        }

        tracing::info!(operation = %label, id, "Successfully updated {}", R::ENTITY);
        Ok::<_, AppError>(StatusCode::NO_CONTENT)
    })
    .await
}

/// `DELETE /api/{component}/{id}`, a hard delete.
pub async fn delete<R: Resource>(
    RequireAdmin(caller): RequireAdmin,
    State(state): State<CrudState<R>>,
    Path(id): Path<EntityId>,
) -> Result<StatusCode, AppError> {
    let label = operation_label(R::COMPONENT, "delete");
    let failure = format!("Error deleting {} with id {id}", R::ENTITY);

    fault_boundary(&label, &failure, async {
        tracing::info!(operation = %label, caller = %caller.sub, id, "Attempting to delete {}", R::ENTITY);

        if id < 1 {
            tracing::warn!(operation = %label, id, "Rejected {} delete: invalid id", R::ENTITY);
            return Err(AppError::bad_request(format!("{} id must be positive", R::ENTITY)));
        }

        let exists = state
            .repository
            .exists(id)
            .await
            .with_context(|| format!("failed to check {} {id}", R::ENTITY))?;
        if !exists {
            tracing::warn!(operation = %label, id, "{} with id {id} not found", R::ENTITY);
            return Err(AppError::not_found(format!("{} {id}", R::ENTITY)));
        }

        // Not atomic with the check above; a concurrent delete surfaces as 404.
        let entity = state
            .repository
            .find_by_id(id)
            .await
            .with_context(|| format!("failed to load {} {id}", R::ENTITY))?
            .ok_or_else(|| {
                tracing::warn!(operation = %label, id, "{} with id {id} vanished before delete", R::ENTITY);
                AppError::not_found(format!("{} {id}", R::ENTITY))
            })?;

        let deleted = state
            .repository
            .delete(&entity)
            .await
            .with_context(|| format!("failed to delete {} {id}", R::ENTITY))?;
        if !deleted {
            return Err(anyhow!("repository refused to delete {} {id}", R::ENTITY).into());
        }

        tracing::info!(operation = %label, id, "Successfully deleted {}", R::ENTITY);
        Ok::<_, AppError>(StatusCode::NO_CONTENT)
    })
    .await
}
