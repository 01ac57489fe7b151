// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Static endpoint metadata
//!
//! An [`EndpointDescriptor`] describes one remote operation: its HTTP method, a path
//! template and the schema of the parameters it accepts. Descriptors are `const`
//! values compiled into a binding crate and shared by every call.
//!
//! ```rust
//! use api_client::{EndpointDescriptor, HttpMethod, ParamKind, ParamSpec};
//!
//! const GET_ASSET: EndpointDescriptor = EndpointDescriptor::new(
//!     "getAsset",
//!     HttpMethod::Get,
//!     "assets/{contract}/{token_id}",
//!     &[
//!         ParamSpec::required("contract", ParamKind::Address),
//!         ParamSpec::required("token_id", ParamKind::String),
//!         ParamSpec::optional("show_attributes", ParamKind::Boolean),
//!     ],
//! );
//!
//! assert!(GET_ASSET.is_path_param("contract"));
//! assert!(!GET_ASSET.is_path_param("show_attributes"));
//! ```

use std::fmt;

use serde_json::Value;

/// HTTP methods an endpoint can use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET
    Get,
    /// HTTP POST
    Post,
    /// HTTP PUT
    Put,
    /// HTTP PATCH
    Patch,
    /// HTTP DELETE
    Delete,
}

impl HttpMethod {
    /// Returns the uppercase method name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Whether non-path parameters travel in a JSON body rather than the query string
    pub const fn carries_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(value: HttpMethod) -> Self {
        match value {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// Type constraint for a single parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// A string with at least one non-whitespace character
    String,
    /// A string restricted to a fixed set of tags
    Enum(&'static [&'static str]),
    /// A 20-byte hex account or contract address, `0x` prefix optional
    Address,
    /// A non-empty array of addresses
    AddressList,
    /// A whole number within `min..=max` (`max` unbounded when `None`)
    Integer {
        /// Smallest accepted value
        min: i64,
        /// Largest accepted value
        max: Option<i64>,
    },
    /// `true` or `false`
    Boolean,
}

impl ParamKind {
    /// Short description of the expected value, used in validation errors
    pub fn expected(&self) -> String {
        match self {
            Self::String => "a non-blank string".to_string(),
            Self::Enum(tags) => format!("one of [{}]", tags.join(", ")),
            Self::Address => "an address string".to_string(),
            Self::AddressList => "an array of address strings".to_string(),
            Self::Integer { min, max: Some(max) } => format!("an integer in {min}..={max}"),
            Self::Integer { min, max: None } => format!("an integer >= {min}"),
            Self::Boolean => "a boolean".to_string(),
        }
    }
}

/// Value used when an optional parameter is omitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    /// Integer default
    Integer(i64),
    /// String default
    Text(&'static str),
    /// Boolean default
    Boolean(bool),
}

impl DefaultValue {
    /// Convert the default into the JSON value sent on the wire
    pub fn to_value(self) -> Value {
        match self {
            Self::Integer(value) => Value::from(value),
            Self::Text(value) => Value::from(value),
            Self::Boolean(value) => Value::from(value),
        }
    }
}

/// Whether a parameter must be supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// The caller must supply a value
    Required,
    /// The parameter is omitted from the request when not supplied
    Optional,
    /// The given value is sent when the caller does not supply one
    Default(DefaultValue),
}

/// Schema entry for one named parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// Wire name of the parameter
    pub name: &'static str,
    /// Type constraint
    pub kind: ParamKind,
    /// Presence rule
    pub requirement: Requirement,
}

impl ParamSpec {
    /// A parameter the caller must supply
    pub const fn required(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            requirement: Requirement::Required,
        }
    }

    /// A parameter that may be omitted
    pub const fn optional(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            requirement: Requirement::Optional,
        }
    }

    /// A parameter that falls back to `default` when omitted
    pub const fn defaulted(name: &'static str, kind: ParamKind, default: DefaultValue) -> Self {
        Self {
            name,
            kind,
            requirement: Requirement::Default(default),
        }
    }
}

/// Static metadata describing one remote operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    /// Operation name, unique within a binding
    pub name: &'static str,
    /// HTTP method
    pub method: HttpMethod,
    /// Path relative to the client base URL; `{param}` placeholders fill whole segments
    pub path: &'static str,
    /// Declared parameters
    pub params: &'static [ParamSpec],
}

impl EndpointDescriptor {
    /// Create a descriptor
    pub const fn new(
        name: &'static str,
        method: HttpMethod,
        path: &'static str,
        params: &'static [ParamSpec],
    ) -> Self {
        Self {
            name,
            method,
            path,
            params,
        }
    }

    /// Look up a declared parameter by name
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|spec| spec.name == name)
    }

    /// Placeholder names appearing in the path template, in order
    pub fn placeholders(&self) -> impl Iterator<Item = &'static str> {
        self.path.split('/').filter_map(placeholder_name)
    }

    /// Whether `name` is filled into the path rather than the query or body
    pub fn is_path_param(&self, name: &str) -> bool {
        self.placeholders().any(|placeholder| placeholder == name)
    }
}

/// Returns the parameter name when `segment` is a `{name}` placeholder
pub(crate) fn placeholder_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}
