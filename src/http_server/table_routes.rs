//! Table HTTP Routes
//!
//! `POST /create_table` and `POST /write_query`. Bodies are decoded by
//! hand so that every malformed payload goes through the same error path
//! as a store failure.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use super::config::ErrorStatusPolicy;
use super::errors::{ApiError, ApiResult, ErrorResponse};
use crate::store::statement::{self, CellValue};
use crate::store::StoreGateway;

pub const TABLE_CREATED: &str = "Table created:)";
pub const DATA_INSERTED: &str = "Data inserted";

// ==================
// Shared State
// ==================

/// State shared across table handlers
pub struct TableState {
    pub gateway: StoreGateway,
    pub error_status: ErrorStatusPolicy,
}

impl TableState {
    pub fn new(gateway: StoreGateway, error_status: ErrorStatusPolicy) -> Self {
        Self {
            gateway,
            error_status,
        }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct CreateTableRequest {
    pub table_name: String,
    pub table_columns_names: Vec<String>,
    pub table_columns_types: Vec<String>,
}

impl CreateTableRequest {
    fn validate(&self) -> ApiResult<()> {
        if self.table_columns_names.len() != self.table_columns_types.len() {
            return Err(ApiError::BadRequest(format!(
                "{} column names but {} column types",
                self.table_columns_names.len(),
                self.table_columns_types.len()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct WriteQueryRequest {
    pub table_name: String,
    pub table_columns_names: Vec<String>,
    pub values: Vec<Value>,
}

impl WriteQueryRequest {
    fn validate(&self) -> ApiResult<()> {
        if self.table_columns_names.len() != self.values.len() {
            return Err(ApiError::BadRequest(format!(
                "{} column names but {} values",
                self.table_columns_names.len(),
                self.values.len()
            )));
        }
        Ok(())
    }

    fn cell_values(&self) -> ApiResult<Vec<CellValue>> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                CellValue::from_json(v).ok_or_else(|| {
                    ApiError::BadRequest(format!("Unsupported value at index {}: {}", i, v))
                })
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

type HandlerResult = Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)>;

// ==================
// Table Routes
// ==================

/// Create table routes
pub fn table_routes(state: Arc<TableState>) -> Router {
    Router::new()
        .route("/create_table", post(create_table_handler))
        .route("/write_query", post(write_query_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn create_table_handler(State(state): State<Arc<TableState>>, body: Bytes) -> HandlerResult {
    match create_table(&state.gateway, &body).await {
        Ok(table) => {
            info!(%table, "table created");
            Ok(Json(MessageResponse::new(TABLE_CREATED)))
        }
        Err(e) => {
            error!(error = %e, "create_table failed");
            Err(e.into_reply(state.error_status))
        }
    }
}

async fn write_query_handler(State(state): State<Arc<TableState>>, body: Bytes) -> HandlerResult {
    match write_query(&state.gateway, &body).await {
        Ok(table) => {
            info!(%table, "row inserted");
            Ok(Json(MessageResponse::new(DATA_INSERTED)))
        }
        Err(e) => {
            error!(error = %e, "write_query failed");
            Err(e.into_reply(state.error_status))
        }
    }
}

// ==================
// Request Flows
// ==================

/// Decode, validate and run a create-table request. Returns the table name.
pub async fn create_table(gateway: &StoreGateway, body: &[u8]) -> ApiResult<String> {
    let request: CreateTableRequest = serde_json::from_slice(body)?;
    request.validate()?;

    let column_defs =
        statement::column_definitions(&request.table_columns_names, &request.table_columns_types);
    gateway.create_table(&request.table_name, &column_defs).await?;

    Ok(request.table_name)
}

/// Decode, validate and run an insert request. Returns the table name.
pub async fn write_query(gateway: &StoreGateway, body: &[u8]) -> ApiResult<String> {
    let request: WriteQueryRequest = serde_json::from_slice(body)?;
    request.validate()?;

    let values = request.cell_values()?;
    let columns = statement::column_list(&request.table_columns_names);
    gateway
        .insert_row(&request.table_name, &columns, values)
        .await?;

    Ok(request.table_name)
}
