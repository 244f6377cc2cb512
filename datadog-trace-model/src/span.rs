// Copyright 2024-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parent span id of a trace root.
pub const ROOT_PARENT_SPAN_ID: i64 = -1;

/// All spans belonging to one trace, in no particular order.
pub type Trace = Vec<SpanRecord>;

/// Checks if the `value` represents an empty string. Used to skip serializing
/// empty strings with serde.
fn is_empty_str(value: &str) -> bool {
    value.is_empty()
}

/// One RPC/operation hop recorded by one application instance.
///
/// `acceptor_host` is only set on spans whose work was triggered by a
/// message consumed from a queue; it names the broker the message was
/// accepted from, since the broker records no span of its own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpanRecord {
    pub span_id: i64,
    pub parent_span_id: i64,
    pub application: String,
    pub service_type_code: u16,
    #[serde(default, skip_serializing_if = "is_empty_str")]
    pub agent_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptor_host: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub span_events: Vec<SpanEventRecord>,
}

impl Default for SpanRecord {
    fn default() -> Self {
        SpanRecord {
            span_id: 0,
            parent_span_id: ROOT_PARENT_SPAN_ID,
            application: String::new(),
            service_type_code: 0,
            agent_id: String::new(),
            acceptor_host: None,
            span_events: Vec::new(),
        }
    }
}

impl SpanRecord {
    pub fn is_root(&self) -> bool {
        self.parent_span_id == ROOT_PARENT_SPAN_ID
    }
}

/// One outbound sub-call recorded inside a span.
///
/// The callee may have produced no span of its own (datastores, queues,
/// unresolved RPC endpoints); `destination_id` is then the only record of
/// its identity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanEventRecord {
    pub service_type_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_id: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub annotations: HashMap<i32, String>,
}

impl SpanEventRecord {
    /// Value of the annotation registered under `key`, if recorded.
    pub fn annotation(&self, key: i32) -> Option<&str> {
        self.annotations.get(&key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_span_is_root() {
        let span = SpanRecord::default();
        assert!(span.is_root());
        assert!(!SpanRecord {
            parent_span_id: 100,
            ..Default::default()
        }
        .is_root());
    }

    #[test]
    fn annotation_lookup() {
        let event = SpanEventRecord {
            service_type_code: 9999,
            annotations: HashMap::from([(-1, "http://host/path".to_string())]),
            ..Default::default()
        };
        assert_eq!(event.annotation(-1), Some("http://host/path"));
        assert_eq!(event.annotation(40), None);
    }

    #[test]
    fn empty_fields_are_skipped_on_the_wire() {
        let span = SpanRecord {
            span_id: 7,
            application: "APP_A".to_string(),
            service_type_code: 1010,
            ..Default::default()
        };
        let json = serde_json::to_value(&span).unwrap();
        assert_eq!(json["span_id"], 7);
        assert_eq!(json["parent_span_id"], -1);
        assert!(json.get("agent_id").is_none());
        assert!(json.get("acceptor_host").is_none());
        assert!(json.get("span_events").is_none());
    }
}
