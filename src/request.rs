//! Per-call request description for the signed-request pipeline.
//!
//! A [`RequestSpec`] is built once per API call and consumed by the
//! executor in [`crate::auth`]. It carries everything except the
//! Authorization header, which the executor attaches itself after the
//! token refresh step.
//!
//! Array-valued query parameters must reach the wire in repeated-key form
//! (`groupIds=a&groupIds=b`, never bracket or comma notation) — the Hive
//! API does not accept the alternatives. [`Query`] stores flat key/value
//! pairs so that `reqwest`'s serializer emits exactly that form.

use reqwest::Method;
use serde_json::Value;

/// Ordered query-string parameters with repeated-key array encoding.
///
/// ```
/// use reaqta_hive::Query;
///
/// let mut q = Query::new();
/// q.push("malicious", "true");
/// q.push_all("groupIds", ["g1", "g2"]);
/// assert_eq!(q.pairs().len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query(Vec<(String, String)>);

impl Query {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a single `key=value` pair.
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.push((key.into(), value.to_string()));
    }

    /// Appends one pair per value under the same key, producing the
    /// repeated-key wire form for array parameters.
    pub fn push_all<V: ToString>(
        &mut self,
        key: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) {
        let key = key.into();
        for value in values {
            self.0.push((key.clone(), value.to_string()));
        }
    }

    /// Returns `true` if no parameters have been added.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The accumulated pairs, in insertion order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

/// Immutable description of one outbound API call.
///
/// Constructed per call with the builder methods and handed to the signing
/// pipeline. The method defaults to GET; everything else is empty unless
/// set.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// HTTP method for the call.
    pub method: Method,
    /// JSON request body, when present.
    pub body: Option<Value>,
    /// Query-string parameters.
    pub query: Query,
    /// Caller-supplied headers. Merged into the request before the
    /// Authorization header, so they can never shadow it.
    pub headers: Vec<(String, String)>,
    /// When `true`, the response body is left unread so the caller can
    /// stream it instead of buffering.
    pub stream: bool,
}

impl Default for RequestSpec {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            query: Query::new(),
            headers: Vec::new(),
            stream: false,
        }
    }
}

impl RequestSpec {
    /// A GET request with no body or parameters.
    pub fn get() -> Self {
        Self::default()
    }

    /// A POST request with no body yet.
    pub fn post() -> Self {
        Self {
            method: Method::POST,
            ..Self::default()
        }
    }

    /// A DELETE request.
    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    /// Sets the JSON body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the query parameters.
    pub fn query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    /// Adds a caller-supplied header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Marks the response body as streamed rather than buffered.
    pub fn streaming(mut self) -> Self {
        self.stream = true;
        self
    }
}
