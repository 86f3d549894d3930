use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("storage failure during {op}: {source}")]
    Storage {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to {op} {field} of car '{id}': {source}")]
    Codec {
        op: &'static str,
        field: &'static str,
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Adapter for `map_err` that tags a sqlx failure with the operation name.
    pub fn storage(op: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Storage { op, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
