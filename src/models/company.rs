use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Empresa (organización) propietaria de la flota.
/// Todas las consultas del sistema se limitan a la empresa autenticada.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub admin_email: String,
    pub admin_password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Company {
    pub fn new(name: String, admin_email: String, admin_password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            admin_email,
            admin_password_hash,
            created_at: Utc::now(),
        }
    }
}
