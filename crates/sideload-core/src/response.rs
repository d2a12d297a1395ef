//! Response boundary: turns a payload plus request context into a JSON
//! response a host framework can write out
//!
//! Two response modes are offered:
//! - [`Responder::emberjs`]: the side-loaded document with request metadata
//! - [`Responder::ok`]: the payload embedded unflattened under the primary type

use std::time::Instant;

use serde::Serialize;
use serde_json::{Map, Value};
use sideload_core_types::RequestContext;

use crate::config::SideloadConfig;
use crate::errors::{ExError, Result, SideloadError};
use crate::model::AssociationDescriptor;
use crate::ops::{assemble, coerce, coerce_records, AssembleOptions};
use crate::{log_op_end, log_op_error, log_op_start};

pub const STATUS_OK: u16 = 200;
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Outbound response handed back to the host
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Value,
}

impl Response {
    fn json(body: Value) -> Self {
        Self {
            status: STATUS_OK,
            content_type: CONTENT_TYPE_JSON,
            body,
        }
    }
}

/// Per-request inputs a host resolves from its routing layer
#[derive(Debug, Clone, Default)]
pub struct ResponseContext {
    pub request: RequestContext,
    /// Configured model of the route; preferred primary type name
    pub model: Option<String>,
    /// Controller name; fallback primary type name
    pub controller: Option<String>,
    pub associations: Option<Vec<AssociationDescriptor>>,
    pub metadata: Option<Map<String, Value>>,
}

impl ResponseContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            ..Self::default()
        }
    }

    pub fn with_controller(mut self, controller: impl Into<String>) -> Self {
        self.controller = Some(controller.into());
        self
    }

    pub fn with_associations(mut self, associations: Vec<AssociationDescriptor>) -> Self {
        self.associations = Some(associations);
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_request(mut self, request: RequestContext) -> Self {
        self.request = request;
        self
    }

    /// Initialise metadata to `{}` if unset, so every response carries `meta`
    ///
    /// Hosts call this before routing, letting handlers add keys freely.
    pub fn ensure_metadata(&mut self) -> &mut Map<String, Value> {
        self.metadata.get_or_insert_with(Map::new)
    }

    /// Structured form of `err` tagged with this request's correlation ids
    pub fn ex_error(&self, err: &SideloadError) -> ExError {
        let ex_err = ExError::from(err).with_request_id(self.request.request_id.clone());
        match &self.request.trace_id {
            Some(trace_id) => ex_err.with_trace_id(trace_id.clone()),
            None => ex_err,
        }
    }

    /// `model` if set, else `controller`
    ///
    /// # Errors
    ///
    /// Returns `MissingPrimaryType` when neither is set.
    pub fn primary_type(&self) -> Result<&str> {
        self.model
            .as_deref()
            .or(self.controller.as_deref())
            .ok_or(SideloadError::MissingPrimaryType)
    }
}

/// Builds responses according to a [`SideloadConfig`]
#[derive(Debug, Clone, Default)]
pub struct Responder {
    config: SideloadConfig,
}

impl Responder {
    pub fn new(config: SideloadConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SideloadConfig {
        &self.config
    }

    /// Side-loaded response for `data` (one record or a list)
    ///
    /// # Errors
    ///
    /// Returns `MissingPrimaryType` for a context without model/controller,
    /// `Serialization` if `data` cannot be serialized, and any assembly error.
    pub fn emberjs<T: Serialize + ?Sized>(
        &self,
        ctx: &ResponseContext,
        data: &T,
    ) -> Result<Response> {
        let start = Instant::now();
        let request_id = ctx.request.request_id.as_str();
        log_op_start!("emberjs_response", request_id = request_id);

        let result = self.build_document(ctx, data);
        let duration_ms = start.elapsed().as_millis() as u64;
        match result {
            Ok(body) => {
                log_op_end!(
                    "emberjs_response",
                    duration_ms = duration_ms,
                    request_id = request_id
                );
                Ok(Response::json(body))
            }
            Err(err) => {
                let report = ctx.ex_error(&err);
                log_op_error!(
                    "emberjs_response",
                    report,
                    duration_ms = duration_ms,
                    request_id = request_id,
                    trace_id = ctx.request.trace_id.as_ref().map(|t| t.as_str())
                );
                Err(err)
            }
        }
    }

    fn build_document<T: Serialize + ?Sized>(
        &self,
        ctx: &ResponseContext,
        data: &T,
    ) -> Result<Value> {
        let primary_type = ctx.primary_type()?;
        let records = coerce_records(data)?;
        let options = AssembleOptions::from(&self.config);
        let doc = assemble(
            records,
            ctx.associations.as_deref(),
            primary_type,
            &options,
        )?;
        Ok(doc
            .with_meta(ctx.metadata.clone().map(Value::Object))
            .into_value())
    }

    /// Unflattened `{ <primary>: data }` response
    ///
    /// Returns `Ok(None)` when `load_default_ok_response` is off, leaving the
    /// host's own `ok` handler in charge.
    ///
    /// # Errors
    ///
    /// Returns `MissingPrimaryType` or `Serialization`.
    pub fn ok<T: Serialize + ?Sized>(
        &self,
        ctx: &ResponseContext,
        data: &T,
    ) -> Result<Option<Response>> {
        if !self.config.load_default_ok_response {
            return Ok(None);
        }
        let primary_type = ctx.primary_type()?;
        let mut body = Map::new();
        body.insert(primary_type.to_string(), coerce(data)?);
        Ok(Some(Response::json(Value::Object(body))))
    }
}
