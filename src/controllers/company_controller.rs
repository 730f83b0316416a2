use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::dto::company_dto::{ApiResponse, CompanyResponse, RegisterCompanyRequest};
use crate::models::company::Company;
use crate::repositories::company_repository::CompanyRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::generate_token;

pub struct CompanyController {
    repository: CompanyRepository,
    config: EnvironmentConfig,
}

impl CompanyController {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            repository: CompanyRepository::new(pool),
            config,
        }
    }

    pub async fn register(
        &self,
        request: RegisterCompanyRequest,
    ) -> Result<ApiResponse<CompanyResponse>, AppError> {
        // Validar campos
        if request.company_name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "El nombre de la empresa es requerido".to_string(),
            ));
        }

        if request.admin_email.trim().is_empty() || !request.admin_email.contains('@') {
            return Err(AppError::ValidationError("Email inválido".to_string()));
        }

        if request.admin_password.len() < 8 {
            return Err(AppError::ValidationError(
                "La contraseña debe tener al menos 8 caracteres".to_string(),
            ));
        }

        // Verificar que el email no exista
        if self.repository.email_exists(&request.admin_email).await? {
            return Err(AppError::Conflict("El email ya está registrado".to_string()));
        }

        // Hash de la contraseña
        let password_hash = hash(&request.admin_password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        let company = Company::new(request.company_name, request.admin_email, password_hash);

        let saved = self.repository.create(&company).await?;

        let response = CompanyResponse {
            id: saved.id,
            name: saved.name,
            admin_email: saved.admin_email,
            created_at: saved.created_at,
        };

        Ok(ApiResponse::success_with_message(
            response,
            "Empresa registrada exitosamente".to_string(),
        ))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        // Buscar empresa por email
        let company = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        // Verificar contraseña
        let valid = verify(&request.password, &company.admin_password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        // Generar JWT token
        let token = generate_token(company.id, &company.admin_email, &self.config)?;

        Ok(LoginResponse::success(
            token,
            company.id.to_string(),
            company.name,
        ))
    }

    pub async fn get_by_id(&self, id: uuid::Uuid) -> Result<CompanyResponse, AppError> {
        let company = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Empresa no encontrada".to_string()))?;

        Ok(CompanyResponse {
            id: company.id,
            name: company.name,
            admin_email: company.admin_email,
            created_at: company.created_at,
        })
    }
}
