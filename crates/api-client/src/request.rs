// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Per-call request construction
//!
//! [`RequestContext::build`] is the single code path that turns an
//! [`EndpointDescriptor`] plus caller [`Arguments`] into a concrete HTTP request.
//! All validation happens here, before any authenticator or transport sees the
//! request, so a rejected call never performs I/O.

use std::{fmt, str::FromStr};

use alloy_primitives::Address;
use serde_json::{Map, Value};
use thiserror::Error;
use url::Url;

use crate::{
    Arguments,
    descriptor::{
        EndpointDescriptor, HttpMethod, ParamKind, ParamSpec, Requirement, placeholder_name,
    },
};

/// Pre-flight failures: the call was rejected before any network I/O
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ValidationError {
    /// No endpoint is registered under the requested name
    #[error("unknown endpoint `{0}`")]
    UnknownEndpoint(String),

    /// The argument name is not part of the endpoint schema
    #[error("`{endpoint}` has no parameter named `{param}`")]
    UnknownParameter {
        endpoint: &'static str,
        param: String,
    },

    /// A required parameter was not supplied
    #[error("missing required parameter `{param}`")]
    MissingParameter { param: &'static str },

    /// The supplied JSON type does not match the parameter kind
    #[error("parameter `{param}` must be {expected}, got {found}")]
    InvalidType {
        param: &'static str,
        expected: String,
        found: &'static str,
    },

    /// The supplied value has the right type but is not acceptable
    #[error("parameter `{param}` must be {expected}, got `{value}`")]
    InvalidValue {
        param: &'static str,
        expected: String,
        value: String,
    },

    /// The path template names a parameter the endpoint does not declare
    #[error("path `{path}` references undeclared parameter `{placeholder}`")]
    UnresolvedPlaceholder {
        path: &'static str,
        placeholder: String,
    },

    /// The path template uses the same placeholder twice
    #[error("path `{path}` repeats placeholder `{placeholder}`")]
    DuplicatePlaceholder {
        path: &'static str,
        placeholder: String,
    },

    /// The base URL cannot have path segments appended
    #[error("base URL `{0}` cannot carry a path")]
    InvalidBaseUrl(String),
}

/// Resolved state for a single outbound request
///
/// Created per call and dropped once the response has been handled. Headers added
/// by an [`Authenticator`](crate::Authenticator) may carry secrets, so the `Debug`
/// output only shows the endpoint, method and URL path.
#[derive(Clone, PartialEq, Eq)]
pub struct RequestContext {
    endpoint: String,
    method: HttpMethod,
    url: Url,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl RequestContext {
    /// Create a bare request with no headers and no body
    pub fn new(endpoint: impl Into<String>, method: HttpMethod, url: Url) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Validate `arguments` against `descriptor` and assemble the request
    ///
    /// Path placeholders are substituted exactly once each, percent-encoded as
    /// path segments. Remaining parameters go into the query string for GET and
    /// DELETE, or into a JSON object body for POST, PUT and PATCH. Omitted
    /// parameters with a default are sent with that default.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing the first problem found
    pub fn build(
        base_url: &Url,
        descriptor: &EndpointDescriptor,
        arguments: &Arguments,
    ) -> Result<Self, ValidationError> {
        if let Some((name, _)) = arguments
            .iter()
            .find(|(name, _)| descriptor.param(name).is_none())
        {
            return Err(ValidationError::UnknownParameter {
                endpoint: descriptor.name,
                param: name.to_string(),
            });
        }

        let mut resolved: Vec<(&'static str, Value)> = Vec::with_capacity(descriptor.params.len());
        for spec in descriptor.params {
            let supplied = arguments.get(spec.name).filter(|value| !value.is_null());
            let value = match (supplied, spec.requirement) {
                (Some(value), _) => {
                    check_value(spec, value)?;
                    value.clone()
                }
                (None, Requirement::Required) => {
                    return Err(ValidationError::MissingParameter { param: spec.name });
                }
                (None, Requirement::Optional) => continue,
                (None, Requirement::Default(default)) => default.to_value(),
            };
            resolved.push((spec.name, value));
        }

        let mut url = base_url.clone();
        fill_path(&mut url, base_url, descriptor, &resolved)?;

        let remaining: Vec<_> = resolved
            .into_iter()
            .filter(|(name, _)| !descriptor.is_path_param(name))
            .collect();

        let body = if descriptor.method.carries_body() {
            let object: Map<String, Value> = remaining
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect();
            Some(Value::Object(object).to_string())
        } else {
            if !remaining.is_empty() {
                let mut pairs = url.query_pairs_mut();
                for (name, value) in &remaining {
                    match value {
                        Value::Array(items) => {
                            for item in items {
                                pairs.append_pair(name, &scalar_text(item));
                            }
                        }
                        other => {
                            pairs.append_pair(name, &scalar_text(other));
                        }
                    }
                }
            }
            None
        };

        Ok(Self {
            endpoint: descriptor.name.to_string(),
            method: descriptor.method,
            url,
            headers: Vec::new(),
            body,
        })
    }

    /// Name of the endpoint this request targets
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// HTTP method
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Final URL including the query string
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Mutable access to the URL, for authenticators that sign via query parameters
    pub fn url_mut(&mut self) -> &mut Url {
        &mut self.url
    }

    /// URL path plus query string, as used in request signatures
    pub fn path_and_query(&self) -> String {
        match self.url.query() {
            Some(query) => format!("{}?{query}", self.url.path()),
            None => self.url.path().to_string(),
        }
    }

    /// All headers in insertion order
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Set a header, replacing any existing value with the same name
    pub fn insert_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.headers.push((name, value)),
        }
    }

    /// Serialized JSON body, if the method carries one
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("endpoint", &self.endpoint)
            .field("method", &self.method)
            .field("path", &self.url.path())
            .finish_non_exhaustive()
    }
}

fn fill_path(
    url: &mut Url,
    base_url: &Url,
    descriptor: &EndpointDescriptor,
    resolved: &[(&'static str, Value)],
) -> Result<(), ValidationError> {
    let mut segments = url
        .path_segments_mut()
        .map_err(|()| ValidationError::InvalidBaseUrl(base_url.to_string()))?;
    segments.pop_if_empty();

    let mut substituted: Vec<&str> = Vec::new();
    for segment in descriptor.path.split('/').filter(|segment| !segment.is_empty()) {
        let Some(name) = placeholder_name(segment) else {
            segments.push(segment);
            continue;
        };

        if substituted.contains(&name) {
            return Err(ValidationError::DuplicatePlaceholder {
                path: descriptor.path,
                placeholder: name.to_string(),
            });
        }

        let value = match resolved.iter().find(|(param, _)| *param == name) {
            Some((_, value)) => value,
            None => {
                return Err(match descriptor.param(name) {
                    Some(spec) => ValidationError::MissingParameter { param: spec.name },
                    None => ValidationError::UnresolvedPlaceholder {
                        path: descriptor.path,
                        placeholder: name.to_string(),
                    },
                });
            }
        };

        segments.push(&scalar_text(value));
        substituted.push(name);
    }

    Ok(())
}

fn check_value(spec: &ParamSpec, value: &Value) -> Result<(), ValidationError> {
    match spec.kind {
        ParamKind::String => {
            let text = expect_str(spec, value)?;
            if text.trim().is_empty() {
                return Err(invalid_value(spec, text));
            }
        }
        ParamKind::Enum(tags) => {
            let text = expect_str(spec, value)?;
            if !tags.contains(&text) {
                return Err(invalid_value(spec, text));
            }
        }
        ParamKind::Address => check_address(spec, expect_str(spec, value)?)?,
        ParamKind::AddressList => {
            let Value::Array(items) = value else {
                return Err(invalid_type(spec, value));
            };
            if items.is_empty() {
                return Err(invalid_value(spec, "[]"));
            }
            for item in items {
                check_address(spec, expect_str(spec, item)?)?;
            }
        }
        ParamKind::Integer { min, max } => {
            let Some(number) = value.as_i64() else {
                return Err(invalid_type(spec, value));
            };
            if number < min || max.is_some_and(|max| number > max) {
                return Err(invalid_value(spec, &number.to_string()));
            }
        }
        ParamKind::Boolean => {
            if !value.is_boolean() {
                return Err(invalid_type(spec, value));
            }
        }
    }
    Ok(())
}

fn check_address(spec: &ParamSpec, text: &str) -> Result<(), ValidationError> {
    Address::from_str(text)
        .map(|_| ())
        .map_err(|_| invalid_value(spec, text))
}

fn expect_str<'a>(spec: &ParamSpec, value: &'a Value) -> Result<&'a str, ValidationError> {
    value.as_str().ok_or_else(|| invalid_type(spec, value))
}

fn invalid_type(spec: &ParamSpec, value: &Value) -> ValidationError {
    ValidationError::InvalidType {
        param: spec.name,
        expected: spec.kind.expected(),
        found: json_type_name(value),
    }
}

fn invalid_value(spec: &ParamSpec, value: &str) -> ValidationError {
    ValidationError::InvalidValue {
        param: spec.name,
        expected: spec.kind.expected(),
        value: value.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(number) if number.is_i64() || number.is_u64() => "an integer",
        Value::Number(_) => "a float",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
