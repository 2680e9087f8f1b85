use thiserror::Error;

#[derive(Error, Debug)]
pub enum MoneyballError {
    #[error("schema mismatch: missing required column(s): {}", .0.join(", "))]
    SchemaMismatch(Vec<String>),

    #[error("role {0} not found in weight spec")]
    RoleNotFound(String),

    #[error("weight version {version} for role {role} not found")]
    WeightVersionNotFound { role: String, version: String },

    #[error("position {0} is not mapped to any role")]
    PositionNotMapped(String),

    #[error("invalid weight spec:\n  - {}", .0.join("\n  - "))]
    InvalidWeightSpec(Vec<String>),

    #[error("unsupported table file: {0}")]
    UnsupportedTable(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, MoneyballError>;
