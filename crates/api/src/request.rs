//! Pure request assembly.
//!
//! Translates one call (base endpoint, section, method, verb, parameters)
//! into a [`RequestDescriptor`]. No I/O happens here, and the builder has no
//! failure modes of its own: a value that cannot be represented on the wire
//! is a caller bug, not a runtime error.

use guildgate_types::{Param, Placement, RequestDescriptor, Verb};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

/// User-Agent sent with every request.
pub const USER_AGENT: &str = "guildgate-api-client/0.1";

/// Assemble the transport-ready descriptor for one call.
///
/// The method identity always rides as the first `method` query parameter,
/// regardless of verb. Query parameters follow in the order supplied; body
/// parameters merge into a single JSON object that is attached only when at
/// least one exists. Values are serialized as-is; callers pre-convert
/// booleans to `1`/`0` where the service expects numeric flags.
pub fn build_request(base: &Url, section: &str, method: &str, verb: Verb, params: &[Param]) -> RequestDescriptor {
    let mut url = base.clone();
    url.query_pairs_mut().append_pair("method", &format!("{section}.{method}"));

    let mut body: Option<Map<String, Value>> = None;
    for param in params {
        match param.placement {
            Placement::Query => {
                url.query_pairs_mut()
                    .append_pair(&param.name, &query_value_to_string(&param.value));
            }
            Placement::Body => {
                body.get_or_insert_with(Map::new)
                    .insert(param.name.clone(), param.value.clone());
            }
        }
    }

    let mut headers = IndexMap::new();
    headers.insert("User-Agent".to_string(), USER_AGENT.to_string());
    headers.insert("Content-Type".to_string(), "application/json".to_string());

    debug!(%url, %verb, "built request descriptor");

    RequestDescriptor {
        url,
        method: verb,
        headers,
        body,
    }
}

fn query_value_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
