use serde::Serialize;
use serde_json::Value;

/// Whether a redirect is relative to the application root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectScope {
    /// `path` is joined below the application root
    Local,
    /// `path` is used as given
    Absolute,
}

/// Redirect instruction: a target path plus positional parameters appended as
/// path segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Redirect {
    pub scope: RedirectScope,
    pub path: String,
    pub params: Vec<Value>,
}

/// Redirect target after joining and parameter coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub scope: RedirectScope,
    pub path: String,
}

impl Redirect {
    /// Redirect to `component/action` below the application root.
    #[must_use]
    pub fn local(component: &str, action: &str) -> Self {
        Self {
            scope: RedirectScope::Local,
            path: format!("{component}/{action}"),
            params: Vec::new(),
        }
    }

    /// Redirect to a fully specified path or URL.
    #[must_use]
    pub fn absolute(path: impl Into<String>) -> Self {
        Self {
            scope: RedirectScope::Absolute,
            path: path.into(),
            params: Vec::new(),
        }
    }

    #[must_use]
    pub fn param(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }

    #[must_use]
    pub fn params<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.params.extend(values.into_iter().map(Into::into));
        self
    }

    /// Append any serializable value; dates and custom types coerce through
    /// their serde representation.
    ///
    /// # Errors
    ///
    /// Fails if `value` cannot be represented as JSON.
    pub fn try_param<T: Serialize + ?Sized>(mut self, value: &T) -> serde_json::Result<Self> {
        self.params.push(serde_json::to_value(value)?);
        Ok(self)
    }

    /// Join the target below `app_root` (local scope) or as given (absolute
    /// scope), appending every parameter as one segment.
    #[must_use]
    pub fn location(&self, app_root: &str) -> Location {
        let mut path = match self.scope {
            RedirectScope::Local => {
                let mut joined = String::new();
                for piece in [app_root, self.path.as_str()] {
                    let piece = piece.trim_matches('/');
                    if !piece.is_empty() {
                        joined.push('/');
                        joined.push_str(piece);
                    }
                }
                joined
            }
            RedirectScope::Absolute => self.path.trim_end_matches('/').to_string(),
        };
        for param in &self.params {
            path.push('/');
            path.push_str(&coerce_segment(param));
        }
        if path.is_empty() {
            path.push('/');
        }
        Location {
            scope: self.scope,
            path,
        }
    }
}

/// Render a parameter as a path segment.
///
/// Strings are used verbatim and numbers and booleans by their JSON text, so
/// `"7"` and `7` both yield `7`. Null becomes `null`; arrays and objects use
/// compact JSON. No percent-encoding is applied.
#[must_use]
pub fn coerce_segment(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
