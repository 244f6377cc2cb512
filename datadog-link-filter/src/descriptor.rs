// Copyright 2024-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::error::LinkFilterError;
use crate::url_pattern::UrlPathPattern;
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use datadog_service_registry::{ServiceType, ServiceTypeRegistry};
use datadog_trace_model::SpanRecord;
use serde::{Deserialize, Serialize};

/// Raw link selection as the query surface hands it over.
///
/// Service types are names to be resolved against the registry; agent ids
/// are optional pins and absence means any agent qualifies. The URL pattern
/// is plain text here; its wire encoding is handled by
/// [`decode_url_pattern`] before this point.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkQuery {
    pub from_application: String,
    pub from_service_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_agent_id: Option<String>,
    pub to_application: String,
    pub to_service_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_agent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_pattern: Option<String>,
}

/// Decodes the base64 wire form of a URL pattern to plain text.
///
/// The pattern crosses the API boundary base64-encoded so wildcard
/// characters survive intermediaries untouched.
pub fn decode_url_pattern(encoded: &str) -> Result<String, LinkFilterError> {
    let bytes = BASE64_STANDARD
        .decode(encoded.trim())
        .map_err(|_| LinkFilterError::InvalidPatternEncoding)?;
    String::from_utf8(bytes).map_err(|_| LinkFilterError::InvalidPatternEncoding)
}

/// One side of a resolved link: application, resolved service type and an
/// optional agent pin.
#[derive(Clone, Debug)]
pub struct NodeDescriptor {
    application: String,
    service_type: ServiceType,
    agent_id: Option<String>,
}

impl NodeDescriptor {
    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn service_type(&self) -> &ServiceType {
        &self.service_type
    }

    pub fn agent_id(&self) -> Option<&str> {
        self.agent_id.as_deref()
    }

    /// Node identity: the span was recorded by this application/type, under
    /// the pinned agent when one is set.
    pub fn matches_span(&self, span: &SpanRecord) -> bool {
        span.application == self.application
            && span.service_type_code == self.service_type.code()
            && self
                .agent_id
                .as_deref()
                .map_or(true, |agent| span.agent_id == agent)
    }
}

/// The matching strategy a descriptor selects, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkStrategy {
    /// Outside traffic into a traced service: match the trace root.
    UserOrigin,
    /// Queue feeding a consumer: match the consumer's acceptor host.
    QueueOrigin,
    /// Datastore/queue destination: match span-event destination ids.
    TerminalDestination,
    /// Unresolved endpoint: match RPC span events, optionally by URL.
    RpcDestination,
    /// Two traced services: match a direct parent/child span pair.
    SpanToSpan,
}

/// A fully resolved, immutable link descriptor.
#[derive(Clone, Debug)]
pub struct LinkDescriptor {
    from: NodeDescriptor,
    to: NodeDescriptor,
    url_pattern: Option<UrlPathPattern>,
    strategy: LinkStrategy,
}

impl LinkDescriptor {
    /// Resolves `query` against the service-type registry and compiles the
    /// URL pattern. The strategy is selected here, once, from the resolved
    /// types; per-trace evaluation only dispatches on it.
    pub fn resolve(
        query: &LinkQuery,
        service_types: &dyn ServiceTypeRegistry,
    ) -> Result<Self, LinkFilterError> {
        let from = NodeDescriptor {
            application: query.from_application.clone(),
            service_type: resolve_type(service_types, &query.from_service_type)?,
            agent_id: query.from_agent_id.clone(),
        };
        let to = NodeDescriptor {
            application: query.to_application.clone(),
            service_type: resolve_type(service_types, &query.to_service_type)?,
            agent_id: query.to_agent_id.clone(),
        };
        let url_pattern = query
            .url_pattern
            .as_deref()
            .map(UrlPathPattern::parse)
            .transpose()?;
        let strategy = select_strategy(&from.service_type, &to.service_type);

        Ok(LinkDescriptor {
            from,
            to,
            url_pattern,
            strategy,
        })
    }

    pub fn from_node(&self) -> &NodeDescriptor {
        &self.from
    }

    pub fn to_node(&self) -> &NodeDescriptor {
        &self.to
    }

    pub fn url_pattern(&self) -> Option<&UrlPathPattern> {
        self.url_pattern.as_ref()
    }

    pub fn strategy(&self) -> LinkStrategy {
        self.strategy
    }
}

fn resolve_type(
    registry: &dyn ServiceTypeRegistry,
    name: &str,
) -> Result<ServiceType, LinkFilterError> {
    registry
        .find_service_type_by_name(name)
        .cloned()
        .ok_or_else(|| LinkFilterError::UnresolvedServiceType {
            name: name.to_owned(),
        })
}

/// First applicable wins: a virtual or queue origin overrides whatever the
/// destination is, since those origins leave no span of their own to pair
/// up with.
fn select_strategy(from: &ServiceType, to: &ServiceType) -> LinkStrategy {
    if from.is_user() {
        LinkStrategy::UserOrigin
    } else if from.is_queue() {
        LinkStrategy::QueueOrigin
    } else if to.is_unknown() {
        LinkStrategy::RpcDestination
    } else if to.is_terminal_like() || to.is_queue() {
        LinkStrategy::TerminalDestination
    } else {
        LinkStrategy::SpanToSpan
    }
}
