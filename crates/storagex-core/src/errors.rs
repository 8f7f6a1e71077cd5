use crate::mapping::ValueKind;
use thiserror::Error;

/// Result type alias for metadata derivation and statement building
pub type Result<T> = std::result::Result<T, MappingError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure surfaced by the mapping engine and the repository layer is
/// classified under one of these kinds. Each kind maps to a stable error
/// code used by tests, logs and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExErrorKind {
    // Configuration (programmer errors, never retried)
    MissingTableMetadata,
    NoDefaultConstructor,
    NoIdentifierColumn,
    EmptyMapping,
    DuplicateColumn,
    DuplicateIdentifier,
    UnsupportedColumnType,
    UnsupportedParameterType,

    // Result shape
    /// A lookup by identifier matched more than one row
    TooManyResults,

    // Storage
    /// Any failure reported by the underlying store (connect, prepare, bind, step, read)
    StorageAccess,

    // Input
    InvalidInput,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MissingTableMetadata => "ERR_MISSING_TABLE_METADATA",
            ExErrorKind::NoDefaultConstructor => "ERR_NO_DEFAULT_CONSTRUCTOR",
            ExErrorKind::NoIdentifierColumn => "ERR_NO_IDENTIFIER_COLUMN",
            ExErrorKind::EmptyMapping => "ERR_EMPTY_MAPPING",
            ExErrorKind::DuplicateColumn => "ERR_DUPLICATE_COLUMN",
            ExErrorKind::DuplicateIdentifier => "ERR_DUPLICATE_IDENTIFIER",
            ExErrorKind::UnsupportedColumnType => "ERR_UNSUPPORTED_COLUMN_TYPE",
            ExErrorKind::UnsupportedParameterType => "ERR_UNSUPPORTED_PARAMETER_TYPE",
            ExErrorKind::TooManyResults => "ERR_TOO_MANY_RESULTS",
            ExErrorKind::StorageAccess => "ERR_STORAGE_ACCESS",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether this kind signals a schema/configuration defect rather than a runtime condition
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ExErrorKind::MissingTableMetadata
                | ExErrorKind::NoDefaultConstructor
                | ExErrorKind::NoIdentifierColumn
                | ExErrorKind::EmptyMapping
                | ExErrorKind::DuplicateColumn
                | ExErrorKind::DuplicateIdentifier
                | ExErrorKind::UnsupportedColumnType
                | ExErrorKind::UnsupportedParameterType
        )
    }
}

/// Canonical structured error type
///
/// Carries the classification plus optional mapping context (operation,
/// table, column, identifier value) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    table: Option<String>,
    column: Option<String>,
    entity_id: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            table: None,
            column: None,
            entity_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add table context
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Add column context
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Add identifier value context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the error signals a schema/configuration defect
    pub fn is_configuration(&self) -> bool {
        self.kind.is_configuration()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(table) = &self.table {
            write!(f, " (table: {})", table)?;
        }
        if let Some(column) = &self.column {
            write!(f, " (column: {})", column)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Configuration and marshalling failures raised by the mapping engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    /// Record type is used as a table-backed entity but declares no table
    #[error("Record type {record_type} declares no table")]
    MissingTable { record_type: &'static str },

    /// Record type declares no zero-argument constructor
    #[error("Record type {record_type} declares no constructor")]
    NoConstructor { record_type: &'static str },

    /// Record type maps no columns at all
    #[error("Record type {record_type} maps no columns")]
    EmptyMapping { record_type: &'static str },

    /// Record type has only an identifier column, so there is nothing to SET
    #[error("Record type {record_type} has no columns besides its identifier")]
    NoUpdatableColumns { record_type: &'static str },

    /// The same column name is mapped by two fields
    #[error("Column {column} is mapped twice in {record_type}")]
    DuplicateColumn {
        record_type: &'static str,
        column: &'static str,
    },

    /// More than one field is marked as identifier
    #[error("Record type {record_type} marks both {first} and {second} as identifier")]
    DuplicateIdentifier {
        record_type: &'static str,
        first: &'static str,
        second: &'static str,
    },

    /// An identifier-based statement was requested for a type without identifier
    #[error("Record type {record_type} has no identifier column")]
    NoIdentifier { record_type: &'static str },

    /// A column value of the wrong kind was written into a field
    #[error("Column {column} expects {expected} but received {actual}")]
    ColumnKindMismatch {
        column: String,
        expected: ValueKind,
        actual: &'static str,
    },

    /// SQL NULL was read for a field that cannot hold it
    #[error("Column {column} is not nullable but the row holds NULL")]
    UnexpectedNull { column: String },

    /// A parameter value cannot be bound for the column it targets
    #[error("Parameter {index} for column {column} expects {expected} but received {actual}")]
    ParameterKindMismatch {
        index: usize,
        column: String,
        expected: ValueKind,
        actual: &'static str,
    },

    /// A cached descriptor did not match the type it was stored under
    #[error("Metadata cache entry for {record_type} has an unexpected type")]
    CacheTypeMismatch { record_type: &'static str },
}

impl MappingError {
    /// Error kind this mapping failure is classified under
    pub fn kind(&self) -> ExErrorKind {
        match self {
            MappingError::MissingTable { .. } => ExErrorKind::MissingTableMetadata,
            MappingError::NoConstructor { .. } => ExErrorKind::NoDefaultConstructor,
            MappingError::EmptyMapping { .. } | MappingError::NoUpdatableColumns { .. } => {
                ExErrorKind::EmptyMapping
            }
            MappingError::DuplicateColumn { .. } => ExErrorKind::DuplicateColumn,
            MappingError::DuplicateIdentifier { .. } => ExErrorKind::DuplicateIdentifier,
            MappingError::NoIdentifier { .. } => ExErrorKind::NoIdentifierColumn,
            MappingError::ColumnKindMismatch { .. } | MappingError::UnexpectedNull { .. } => {
                ExErrorKind::UnsupportedColumnType
            }
            MappingError::ParameterKindMismatch { .. } => ExErrorKind::UnsupportedParameterType,
            MappingError::CacheTypeMismatch { .. } => ExErrorKind::Internal,
        }
    }
}

impl From<MappingError> for ExError {
    fn from(err: MappingError) -> Self {
        let base = ExError::new(err.kind()).with_message(err.to_string());
        match &err {
            MappingError::DuplicateColumn { column, .. } => base.with_column(*column),
            MappingError::ColumnKindMismatch { column, .. }
            | MappingError::UnexpectedNull { column }
            | MappingError::ParameterKindMismatch { column, .. } => base.with_column(column.clone()),
            _ => base,
        }
    }
}
