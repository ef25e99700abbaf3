//! HTTP handlers for the employees collection.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use roster_core::{is_valid_email, Employee};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::storage::EmployeeRepository;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<EmployeeRepository>,
}

impl AppState {
    pub fn new(repo: EmployeeRepository) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
}

/// Error response body: `{ "error": ..., "message": ... }`
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

/// A failed request, rendered as a status plus [`ErrorBody`].
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: &'static str,
    message: String,
}

impl ApiError {
    fn bad_json() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: "invalid_json",
            message: "Cannot parse JSON".to_string(),
        }
    }

    fn validation(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: "Validation failed",
            message,
        }
    }

    fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: "not_found",
            message: "Employee not found".to_string(),
        }
    }

    fn storage(message: &str, e: sqlx::Error) -> Self {
        tracing::error!("{}: {}", message, e);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: "storage_error",
            message: message.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.error,
                message: self.message,
            }),
        )
            .into_response()
    }
}

/// Message body for deletions.
#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Builds the router with every route and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/employees",
            get(list_employees).post(create_employee),
        )
        .route(
            "/api/employees/{id}",
            axum::routing::put(update_employee).delete(delete_employee),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Checks the server-side constraints on an incoming record.
pub fn check_employee(employee: &Employee) -> Result<(), String> {
    let bounded = [
        ("first_name", &employee.first_name, 2, 50),
        ("last_name", &employee.last_name, 2, 50),
        ("phone_number", &employee.phone_number, 10, 15),
        ("job_title", &employee.job_title, 2, 50),
        ("department", &employee.department, 2, 50),
    ];
    for (field, value, min, max) in bounded {
        let len = value.chars().count();
        if len < min || len > max {
            return Err(format!(
                "{} must be between {} and {} characters",
                field, min, max
            ));
        }
    }

    if !employee.gender.is_set() {
        return Err("gender must be one of Male, Female, Other".to_string());
    }
    if !is_valid_email(&employee.email) {
        return Err("email must be a valid email address".to_string());
    }

    Ok(())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn list_employees(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, ApiError> {
    let employees = state
        .repo
        .list()
        .await
        .map_err(|e| ApiError::storage("Failed to fetch employees", e))?;
    Ok(Json(employees))
}

async fn create_employee(
    State(state): State<AppState>,
    body: Result<Json<Employee>, JsonRejection>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let Json(employee) = body.map_err(|_| ApiError::bad_json())?;
    check_employee(&employee).map_err(ApiError::validation)?;

    let created = state
        .repo
        .create(&employee)
        .await
        .map_err(|e| ApiError::storage("Failed to create employee", e))?;

    tracing::info!("Created employee {}", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Employee>, JsonRejection>,
) -> Result<Json<Employee>, ApiError> {
    let Json(employee) = body.map_err(|_| ApiError::bad_json())?;
    check_employee(&employee).map_err(ApiError::validation)?;

    let updated = state
        .repo
        .update(&id, &employee)
        .await
        .map_err(|e| ApiError::storage("Failed to update employee", e))?
        .ok_or_else(ApiError::not_found)?;

    tracing::info!("Updated employee {}", id);
    Ok(Json(updated))
}

async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state
        .repo
        .delete(&id)
        .await
        .map_err(|e| ApiError::storage("Failed to delete employee", e))?;

    if !deleted {
        return Err(ApiError::not_found());
    }

    tracing::info!("Deleted employee {}", id);
    Ok(Json(MessageResponse {
        message: "Employee deleted successfully",
    }))
}
