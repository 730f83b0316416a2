//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y verificación de la empresa autenticada.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    repositories::company_repository::CompanyRepository,
    state::AppState,
    utils::errors::AppError,
    utils::jwt::verify_token,
};

/// Empresa autenticada que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedCompany {
    pub company_id: Uuid,
    pub company_name: String,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    // Decodificar y validar JWT
    let claims = verify_token(auth_header, &state.config)
        .map_err(|_| AppError::Unauthorized("Token inválido".to_string()))?;

    let company_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de empresa inválido".to_string()))?;

    // Verificar que la empresa existe en la base de datos
    let company = CompanyRepository::new(state.pool.clone())
        .find_by_id(company_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Empresa no encontrada".to_string()))?;

    // Inyectar empresa autenticada en las extensions
    request.extensions_mut().insert(AuthenticatedCompany {
        company_id: company.id,
        company_name: company.name,
    });

    Ok(next.run(request).await)
}
