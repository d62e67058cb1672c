//! Shared plain-data types for the Guildgate API client.
//!
//! Everything here is inert: call parameters, the transport-ready request
//! descriptor, and the declarative method table consumed by the registry and
//! its conformance harness. No I/O happens in this crate.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

/// HTTP verb of a remote method.
///
/// The Guildgate service routes every call through `GET` or `POST`; other
/// verbs do not appear in its method table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verb {
    Get,
    Post,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a call parameter travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Appended to the URL query string.
    Query,
    /// Merged into the single JSON request body object.
    Body,
}

/// A single named parameter of one call.
///
/// Query values must already be scalars; the request builder stringifies them
/// but performs no type coercion. Callers pre-convert booleans to `1`/`0`
/// where the service expects numeric flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub value: Value,
    pub placement: Placement,
}

impl Param {
    pub fn query(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            placement: Placement::Query,
        }
    }

    pub fn body(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            placement: Placement::Body,
        }
    }
}

/// Fully assembled, transport-ready representation of one outbound call.
///
/// Built once per call by the request builder and never mutated after the
/// dispatcher attaches authorization; transports treat it as read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// Complete request URL, query string included.
    pub url: Url,
    pub method: Verb,
    /// Headers in insertion order.
    pub headers: IndexMap<String, String>,
    /// JSON body object, present only when at least one body parameter was
    /// supplied.
    pub body: Option<Map<String, Value>>,
}

impl RequestDescriptor {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Decoded query pairs in the order they appear on the URL.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    /// Value of the first query parameter with the given name.
    pub fn query_value(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

/// Declared parameter of a registry method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub placement: Placement,
    /// Optional parameters are omitted from the call when the caller has no
    /// value for them; the conformance harness only checks required ones.
    #[serde(default)]
    pub required: bool,
}

/// Registry entry describing one remote method.
///
/// The dispatcher never reads this table; it exists for the section wrappers'
/// documentation of record and for the conformance harness, which enumerates
/// it to verify every wrapper against its declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSpec {
    pub section: String,
    pub method: String,
    pub verb: Verb,
    pub requires_auth: bool,
    #[serde(default)]
    pub params: Vec<ParamSpec>,
}

impl MethodSpec {
    /// Wire identity of the method, as sent in the `method` query parameter.
    pub fn wire_name(&self) -> String {
        format!("{}.{}", self.section, self.method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn verb_formats_as_wire_text() {
        assert_eq!(Verb::Get.to_string(), "GET");
        assert_eq!(Verb::Post.as_str(), "POST");
    }

    #[test]
    fn param_constructors_set_placement() {
        let q = Param::query("uuid", "abc");
        assert_eq!(q.placement, Placement::Query);
        assert_eq!(q.value, json!("abc"));

        let b = Param::body("days", 14);
        assert_eq!(b.placement, Placement::Body);
        assert_eq!(b.value, json!(14));
    }

    #[test]
    fn descriptor_header_lookup_is_case_insensitive() {
        let mut headers = IndexMap::new();
        headers.insert("User-Agent".to_string(), "guildgate".to_string());
        let descriptor = RequestDescriptor {
            url: Url::parse("https://api.example.com/?method=token.me").expect("url"),
            method: Verb::Get,
            headers,
            body: None,
        };

        assert_eq!(descriptor.header("user-agent"), Some("guildgate"));
        assert_eq!(descriptor.header("authorization"), None);
        assert_eq!(descriptor.query_value("method").as_deref(), Some("token.me"));
    }

    #[test]
    fn method_spec_wire_name_joins_section_and_method() {
        let spec = MethodSpec {
            section: "bridge".into(),
            method: "getLinked".into(),
            verb: Verb::Get,
            requires_auth: true,
            params: Vec::new(),
        };
        assert_eq!(spec.wire_name(), "bridge.getLinked");
    }

    #[test]
    fn method_spec_round_trip_minimal() {
        let json = r#"{
            "section": "token",
            "method": "auth",
            "verb": "Post",
            "requires_auth": false,
            "params": [{ "name": "token", "placement": "Body", "required": true }]
        }"#;

        let spec: MethodSpec = serde_json::from_str(json).expect("deserialize MethodSpec");
        assert_eq!(spec.wire_name(), "token.auth");
        assert_eq!(spec.params.len(), 1);
        assert!(spec.params[0].required);

        let back = serde_json::to_string(&spec).expect("serialize MethodSpec");
        let spec2: MethodSpec = serde_json::from_str(&back).expect("round-trip deserialize");
        assert_eq!(spec2, spec);
    }
}
