use sideload_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using SideloadError
pub type Result<T> = std::result::Result<T, SideloadError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable by hosts to pick a
/// status code or by tests to assert on failures without matching
/// message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Caller configuration is unusable: an association without a target
    /// type, or a primary type reserved for metadata
    Configuration,
    /// A related entity or request context lacks a required field
    MissingField,
    /// Input shape the assembler was told not to accept
    UnsupportedShape,
    /// A configuration document failed to parse
    InvalidConfig,
    Serialization,
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Configuration => "ERR_CONFIGURATION",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::UnsupportedShape => "ERR_UNSUPPORTED_SHAPE",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Io => "ERR_IO",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus whatever context the failing
/// operation knew about: the association alias, the entity type name and
/// the correlation ids of the request.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    alias: Option<String>,
    type_name: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            alias: None,
            type_name: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add association alias context
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Add entity type name context
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
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

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
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
        if let Some(alias) = &self.alias {
            write!(f, " (alias: {})", alias)?;
        }
        if let Some(type_name) = &self.type_name {
            write!(f, " (type: {})", type_name)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for document assembly
///
/// Benign shape mismatches (a scalar where a related entity was expected)
/// are not errors; they are skipped and logged at debug level.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SideloadError {
    /// Association descriptor has neither `model` nor `collection`
    #[error("Association '{alias}' declares neither a model nor a collection target type")]
    MissingTargetType { alias: String },

    /// A related entity embedded under an association has no `id`
    #[error("Related {target_type} entity under association '{alias}' has no id field")]
    MissingIdentifier { alias: String, target_type: String },

    /// Primary type collides with the key reserved for metadata
    #[error("Primary type '{primary_type}' is reserved for response metadata")]
    ReservedPrimaryType { primary_type: String },

    /// Request context names neither a model nor a controller
    #[error("Cannot determine primary type: request context has no model or controller")]
    MissingPrimaryType,

    /// List input without associations while the list policy is `reject`
    #[error("Cannot flatten a list of {primary_type} records without association descriptors")]
    UnflattenedList { primary_type: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },
}

impl From<serde_json::Error> for SideloadError {
    fn from(err: serde_json::Error) -> Self {
        SideloadError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for SideloadError {
    fn from(err: std::io::Error) -> Self {
        SideloadError::Io {
            message: err.to_string(),
        }
    }
}

impl From<SideloadError> for ExError {
    fn from(err: SideloadError) -> Self {
        match err {
            SideloadError::MissingTargetType { alias } => {
                ExError::new(ExErrorKind::Configuration)
                    .with_op("resolve_target_type")
                    .with_alias(alias)
                    .with_message("Association declares neither model nor collection")
            }

            SideloadError::MissingIdentifier { alias, target_type } => {
                ExError::new(ExErrorKind::MissingField)
                    .with_op("flatten_one")
                    .with_alias(alias)
                    .with_type_name(target_type)
                    .with_message("Related entity has no id field")
            }

            SideloadError::ReservedPrimaryType { primary_type } => {
                ExError::new(ExErrorKind::Configuration)
                    .with_op("assemble")
                    .with_type_name(primary_type)
                    .with_message("Primary type collides with the metadata key")
            }

            SideloadError::MissingPrimaryType => ExError::new(ExErrorKind::MissingField)
                .with_message("Request context has no model or controller"),

            SideloadError::UnflattenedList { primary_type } => {
                ExError::new(ExErrorKind::UnsupportedShape)
                    .with_op("assemble")
                    .with_type_name(primary_type)
                    .with_message("List input requires association descriptors")
            }

            SideloadError::InvalidConfig { reason } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(reason)
            }

            SideloadError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            SideloadError::Io { message } => ExError::new(ExErrorKind::Io).with_message(message),
        }
    }
}

impl From<&SideloadError> for ExError {
    fn from(err: &SideloadError) -> Self {
        err.clone().into()
    }
}
