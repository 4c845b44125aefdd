//! Field-level validation errors and the ordered list that accumulates them.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use super::FieldPath;

/// Classification of a field-level validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// A mandatory value is absent or empty
    Required,
    /// The value is present but malformed
    Invalid,
    /// The value is outside a fixed set of supported values
    NotSupported,
    /// The value may not be set, or may not change, here
    Forbidden,
    /// The value repeats one seen earlier in the same collection
    Duplicate,
    /// The value exceeds a size ceiling
    TooLong,
    /// The engine could not evaluate the value
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Required => "ERR_REQUIRED",
            ErrorKind::Invalid => "ERR_INVALID",
            ErrorKind::NotSupported => "ERR_NOT_SUPPORTED",
            ErrorKind::Forbidden => "ERR_FORBIDDEN",
            ErrorKind::Duplicate => "ERR_DUPLICATE",
            ErrorKind::TooLong => "ERR_TOO_LONG",
            ErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Human-readable label used when rendering an error
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Required => "Required value",
            ErrorKind::Invalid => "Invalid value",
            ErrorKind::NotSupported => "Unsupported value",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::Duplicate => "Duplicate value",
            ErrorKind::TooLong => "Too long",
            ErrorKind::Internal => "Internal error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The ceiling a `TooLong` error breached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "unit", content = "max", rename_all = "camelCase")]
pub enum Limit {
    Bytes(usize),
    Entries(usize),
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Bytes(max) => write!(f, "must have at most {} bytes", max),
            Limit::Entries(max) => write!(f, "must have at most {} entries", max),
        }
    }
}

/// One validation failure, addressed by the path of the offending value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    kind: ErrorKind,
    code: &'static str,
    path: FieldPath,
    #[serde(skip_serializing_if = "Option::is_none")]
    bad_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<Limit>,
    #[serde(skip_serializing_if = "String::is_empty")]
    detail: String,
}

impl FieldError {
    fn new(kind: ErrorKind, path: &FieldPath, bad_value: Option<Value>, detail: String) -> Self {
        Self {
            kind,
            code: kind.code(),
            path: path.clone(),
            bad_value,
            limit: None,
            detail,
        }
    }

    /// A mandatory value is missing
    pub fn required(path: &FieldPath, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Required, path, None, detail.into())
    }

    /// A value is malformed
    pub fn invalid(path: &FieldPath, value: impl Into<Value>, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Invalid, path, Some(value.into()), detail.into())
    }

    /// A value is outside `supported`
    pub fn not_supported(path: &FieldPath, value: impl Into<Value>, supported: &[&str]) -> Self {
        let detail = if supported.is_empty() {
            String::new()
        } else {
            let quoted: Vec<String> = supported.iter().map(|s| format!("\"{}\"", s)).collect();
            format!("supported values: {}", quoted.join(", "))
        };
        Self::new(ErrorKind::NotSupported, path, Some(value.into()), detail)
    }

    /// A value may not be set or changed
    pub fn forbidden(path: &FieldPath, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, path, None, detail.into())
    }

    /// A value repeats an earlier one
    pub fn duplicate(path: &FieldPath, value: impl Into<Value>) -> Self {
        Self::new(ErrorKind::Duplicate, path, Some(value.into()), String::new())
    }

    /// A value breaches `limit`
    pub fn too_long(path: &FieldPath, value: impl Into<Value>, limit: Limit) -> Self {
        let mut err = Self::new(ErrorKind::TooLong, path, Some(value.into()), limit.to_string());
        err.limit = Some(limit);
        err
    }

    /// The engine could not evaluate a value
    pub fn internal(path: &FieldPath, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, path, None, detail.into())
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn bad_value(&self) -> Option<&Value> {
        self.bad_value.as_ref()
    }

    pub fn limit(&self) -> Option<Limit> {
        self.limit
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)?;
        if let Some(value) = &self.bad_value {
            match value {
                Value::Null => write!(f, ": null")?,
                Value::String(s) => write!(f, ": {:?}", s)?,
                Value::Object(_) | Value::Array(_) => write!(f, ": {}", compact(value))?,
                other => write!(f, ": {}", other)?,
            }
        }
        if !self.detail.is_empty() {
            write!(f, ": {}", self.detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldError {}

// Large structural values are elided so a rendered line stays readable.
fn compact(value: &Value) -> String {
    const MAX_RENDERED: usize = 256;
    let rendered = value.to_string();
    if rendered.len() <= MAX_RENDERED {
        return rendered;
    }
    let mut cut = MAX_RENDERED;
    while !rendered.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &rendered[..cut])
}

/// Ordered, append-only list of field errors
///
/// Order is traversal order. An empty list means the descriptor was accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ErrorList(Vec<FieldError>);

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: FieldError) {
        self.0.push(err);
    }

    /// Append every error of `other`, after the ones already present
    pub fn append(&mut self, other: ErrorList) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Errors of the given kind, in order
    pub fn of_kind(&self, kind: ErrorKind) -> Vec<&FieldError> {
        self.0.iter().filter(|e| e.kind == kind).collect()
    }

    /// Errors addressed at exactly `path`, in order
    pub fn at(&self, path: &FieldPath) -> Vec<&FieldError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

impl Extend<FieldError> for ErrorList {
    fn extend<I: IntoIterator<Item = FieldError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<FieldError> for ErrorList {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ErrorList {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<FieldError> for ErrorList {
    fn from(err: FieldError) -> Self {
        Self(vec![err])
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for err in &self.0 {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{}", err)?;
            first = false;
        }
        Ok(())
    }
}
