//! # Bridge
//!
//! The request/response boundary between an untrusted UI and the [`RecordStore`].
//!
//! A request names one of six operations and optionally carries a JSON payload:
//!
//! ```text
//! {"operation": "update", "data": {"id": "…", "status": "offer_received"}}
//! ```
//!
//! | operation | data                         | success payload           |
//! |-----------|------------------------------|---------------------------|
//! | `init`    | —                            | `{"success": true}`       |
//! | `getAll`  | —                            | array of records          |
//! | `getById` | `{id}`                       | record or `null`          |
//! | `add`     | record minus server fields   | the full stored record    |
//! | `update`  | `{id, ...partial fields}`    | updated record or `null`  |
//! | `delete`  | `{id}`                       | `true` / `false`          |
//!
//! Every failure, including unparseable requests, comes back as
//! `{"error": true, "message": "...", "stack": "..."}`. Nothing escapes
//! [`Bridge::dispatch`] as a Rust error.

use crate::error::{JobTrackError, Result};
use crate::model::{JobApplicationPatch, NewJobApplication};
use crate::store::{RecordStore, StorageBackend};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Init,
    GetAll,
    GetById,
    Add,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Init,
        Operation::GetAll,
        Operation::GetById,
        Operation::Add,
        Operation::Update,
        Operation::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Init => "init",
            Operation::GetAll => "getAll",
            Operation::GetById => "getById",
            Operation::Add => "add",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = JobTrackError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| JobTrackError::UnknownOperation(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Request {
    pub fn new(operation: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            operation: operation.into(),
            data,
        }
    }
}

/// Transport-safe rendition of a [`JobTrackError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl From<&JobTrackError> for ErrorPayload {
    fn from(err: &JobTrackError) -> Self {
        Self {
            error: true,
            message: err.to_string(),
            stack: source_chain(err),
        }
    }
}

fn source_chain(err: &dyn std::error::Error) -> Option<String> {
    let mut causes = Vec::new();
    let mut current = err.source();
    while let Some(cause) = current {
        causes.push(format!("caused by: {}", cause));
        current = cause.source();
    }
    if causes.is_empty() {
        None
    } else {
        Some(causes.join("\n"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Error(ErrorPayload),
    Success(Value),
}

impl Response {
    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            json!({ "error": true, "message": format!("Serialization error: {}", e) }).to_string()
        })
    }
}

#[derive(Deserialize)]
struct IdPayload {
    id: String,
}

pub struct Bridge<B: StorageBackend> {
    store: RecordStore<B>,
}

impl<B: StorageBackend> Bridge<B> {
    pub fn new(store: RecordStore<B>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    pub fn into_store(self) -> RecordStore<B> {
        self.store
    }

    pub fn dispatch(&mut self, request: Request) -> Response {
        tracing::debug!(operation = %request.operation, "received request");
        match self.handle(&request.operation, request.data) {
            Ok(value) => Response::Success(value),
            Err(e) => {
                tracing::warn!(
                    operation = %request.operation,
                    kind = e.kind(),
                    error = %e,
                    "request failed"
                );
                Response::Error(ErrorPayload::from(&e))
            }
        }
    }

    /// Raw JSON in, raw JSON out. Unparseable requests become error payloads.
    pub fn dispatch_json(&mut self, raw: &str) -> String {
        let response = match serde_json::from_str::<Request>(raw) {
            Ok(request) => self.dispatch(request),
            Err(e) => {
                let err = JobTrackError::MalformedInput(format!("invalid request: {}", e));
                tracing::warn!(error = %err, "rejected request");
                Response::Error(ErrorPayload::from(&err))
            }
        };
        response.to_json()
    }

    fn handle(&mut self, operation: &str, data: Option<Value>) -> Result<Value> {
        let op: Operation = operation.parse()?;
        match op {
            Operation::Init => {
                self.store.initialize()?;
                Ok(json!({ "success": true }))
            }
            Operation::GetAll => Ok(serde_json::to_value(self.store.list_all())?),
            Operation::GetById => {
                let IdPayload { id } = payload(op, data)?;
                Ok(serde_json::to_value(self.store.get_by_id(&id))?)
            }
            Operation::Add => {
                let fields: NewJobApplication = payload(op, data)?;
                let id = self.store.create(fields)?;
                Ok(serde_json::to_value(self.store.get_by_id(&id))?)
            }
            Operation::Update => {
                let data = require(op, data)?;
                let IdPayload { id } = decode(op, data.clone())?;
                let patch: JobApplicationPatch = decode(op, data)?;
                match self.store.update(&id, &patch)? {
                    Some(_) => Ok(serde_json::to_value(self.store.get_by_id(&id))?),
                    None => Ok(Value::Null),
                }
            }
            Operation::Delete => {
                let IdPayload { id } = payload(op, data)?;
                Ok(Value::Bool(self.store.delete(&id)?))
            }
        }
    }
}

fn require(op: Operation, data: Option<Value>) -> Result<Value> {
    data.ok_or_else(|| JobTrackError::MalformedInput(format!("{} requires a data payload", op)))
}

fn decode<T: DeserializeOwned>(op: Operation, data: Value) -> Result<T> {
    serde_json::from_value(data).map_err(|e| JobTrackError::MalformedInput(format!("{}: {}", op, e)))
}

fn payload<T: DeserializeOwned>(op: Operation, data: Option<Value>) -> Result<T> {
    decode(op, require(op, data)?)
}
