use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::document::ExpiryStatus;

// Request para registrar un documento
#[derive(Debug, Deserialize)]
pub struct CreateDocumentRequest {
    pub vehicle_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub document_type: String,
    pub reference_number: Option<String>,
    pub expiry_date: String, // YYYY-MM-DD
}

// Response de documento con su estado de vencimiento calculado
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub document_type: String,
    pub reference_number: Option<String>,
    pub expiry_date: NaiveDate,
    pub expiry_status: ExpiryStatus,
    pub created_at: DateTime<Utc>,
}
