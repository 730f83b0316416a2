use serde::{Deserialize, Serialize};

// Request de login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Response de login con token JWT
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub company_id: String,
    pub company_name: String,
}

impl LoginResponse {
    pub fn success(token: String, company_id: String, company_name: String) -> Self {
        Self {
            success: true,
            token,
            company_id,
            company_name,
        }
    }
}
