//! User handlers.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use signup_core::domain::{NewUser, User};
use signup_core::validation;
use signup_shared::ApiResponse;
use signup_shared::dto::UserResponse;

use super::form::read_signup_form;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const CREATE_FAILED: &str = "Failed to create user";

fn to_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        name: user.name,
        image_path: user.image_path,
        content: user.content,
        created_at: user.created_at,
    }
}

/// POST /users
pub async fn create_user(
    state: web::Data<AppState>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let form = read_signup_form(payload, state.limits.max_form_bytes).await?;

    validation::validate_name(&form.name)?;
    validation::validate_password(&form.password)?;
    validation::validate_content(&form.content)?;
    validation::validate_image(form.image.as_ref().map(|image| image.meta()))?;
    let Some(image) = form.image else {
        return Err(AppError::BadRequest("Image file is required".to_string()));
    };

    let image_path = state
        .files
        .save(&image.filename, image.body)
        .await?;

    let new_user = NewUser::new(form.name, form.password, image_path.clone(), form.content);
    let user = match state.with_deadline(state.users.create(new_user)).await {
        Ok(user) => user,
        Err(e) if e.is_indeterminate() => {
            // The insert may still commit, so its image has to stay.
            tracing::warn!(
                path = %image_path,
                error = %e,
                "User create outcome unknown; keeping image"
            );
            return Err(AppError::from(e).with_internal_message(CREATE_FAILED));
        }
        Err(e) => {
            if let Err(remove_err) = state.files.remove(&image_path).await {
                tracing::warn!(
                    path = %image_path,
                    error = %remove_err,
                    "Failed to remove orphaned image"
                );
            }
            return Err(AppError::from(e).with_internal_message(CREATE_FAILED));
        }
    };

    tracing::info!(user_id = %user.id, "User created");

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        to_response(user),
        "User created successfully",
    )))
}

/// GET /users/{id}
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let Ok(id) = Uuid::parse_str(&path) else {
        return Err(AppError::NotFound("User not found".to_string()));
    };

    let user = state.with_deadline(state.users.get_by_id(id)).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        to_response(user),
        "User retrieved successfully",
    )))
}

/// GET /users
pub async fn list_users(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state
        .with_deadline(state.users.get_all())
        .await
        .map_err(|e| AppError::from(e).with_internal_message("Failed to retrieve users"))?;

    let users: Vec<UserResponse> = users.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        users,
        "Users retrieved successfully",
    )))
}
