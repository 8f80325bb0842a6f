//! Per-model results of a fan-out.

use std::fmt;

use arena_llm::{Error, ErrorKind};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// An [`Error`] flattened to its kind and rendered message, so it can be
/// cloned, compared and serialized inside an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchError {
    pub kind: ErrorKind,
    pub message: String,
}

impl DispatchError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&Error> for DispatchError {
    fn from(err: &Error) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

impl From<Error> for DispatchError {
    fn from(err: Error) -> Self {
        Self::from(&err)
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// What happened for one requested model.
///
/// Serializes as `{"model_id", "ok": true, "value"}` on success and
/// `{"model_id", "ok": false, "error": {"kind", "message"}}` on failure.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome<T> {
    pub model_id: String,
    pub result: Result<T, DispatchError>,
}

impl<T> DispatchOutcome<T> {
    pub fn success(model_id: impl Into<String>, value: T) -> Self {
        Self {
            model_id: model_id.into(),
            result: Ok(value),
        }
    }

    pub fn failure(model_id: impl Into<String>, error: impl Into<DispatchError>) -> Self {
        Self {
            model_id: model_id.into(),
            result: Err(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn value(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&DispatchError> {
        self.result.as_ref().err()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DispatchOutcome<U> {
        DispatchOutcome {
            model_id: self.model_id,
            result: self.result.map(f),
        }
    }
}

impl<T: Serialize> Serialize for DispatchOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("DispatchOutcome", 3)?;
        s.serialize_field("model_id", &self.model_id)?;
        match &self.result {
            Ok(value) => {
                s.serialize_field("ok", &true)?;
                s.serialize_field("value", value)?;
            }
            Err(error) => {
                s.serialize_field("ok", &false)?;
                s.serialize_field("error", error)?;
            }
        }
        s.end()
    }
}
