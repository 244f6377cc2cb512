// Copyright 2024-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::descriptor::{LinkDescriptor, LinkQuery, LinkStrategy};
use crate::error::LinkFilterError;
use crate::hint::{EventCandidate, MatchHint};
use datadog_service_registry::annotation::RPC_URL_ANNOTATION;
use datadog_service_registry::{AnnotationKeyRegistry, ServiceTypeCategory, ServiceTypeRegistry};
use datadog_trace_model::{SpanEventRecord, SpanRecord};
use std::collections::HashSet;
use tracing::debug;

/// How a span event can satisfy the destination side of a link.
#[derive(Clone, Copy, Debug)]
enum EventRule {
    /// The event names the destination directly: exact service-type code
    /// and destination id.
    Destination,
    /// The destination never produced a span; any RPC-category event with
    /// the right destination id qualifies, filtered by URL pattern when one
    /// was given.
    RpcUrl,
}

/// The link matching engine.
///
/// Built once per query, then applied to each candidate trace's spans.
/// Evaluation is a pure scan: no state survives a call, no input is
/// mutated, so one filter may be shared across threads.
#[derive(Debug)]
pub struct LinkFilter {
    descriptor: LinkDescriptor,
    hint: MatchHint,
    rpc_url_key: Option<i32>,
}

impl LinkFilter {
    /// Resolves `query` and builds the filter. Registry misses on a service
    /// type and malformed URL patterns fail here; a missing RPC-URL
    /// annotation key does not fail; it only disables URL comparisons.
    pub fn new(
        query: &LinkQuery,
        hint: MatchHint,
        service_types: &dyn ServiceTypeRegistry,
        annotation_keys: &dyn AnnotationKeyRegistry,
    ) -> Result<Self, LinkFilterError> {
        let descriptor = LinkDescriptor::resolve(query, service_types)?;
        let rpc_url_key = annotation_keys
            .find_annotation_key_by_name(RPC_URL_ANNOTATION)
            .map(|key| key.code());
        debug!(descriptor = ?descriptor, "link filter built");

        Ok(LinkFilter {
            descriptor,
            hint,
            rpc_url_key,
        })
    }

    pub fn descriptor(&self) -> &LinkDescriptor {
        &self.descriptor
    }

    /// Decides whether the trace made of `spans` contains the link.
    ///
    /// The slice is unordered; spans and events are scanned exhaustively.
    /// Total over its input: incomplete spans are non-matches, never
    /// errors, and an empty slice is `false`.
    pub fn matches(&self, spans: &[SpanRecord]) -> bool {
        match self.descriptor.strategy() {
            LinkStrategy::UserOrigin => self.matches_trace_root(spans),
            LinkStrategy::QueueOrigin => self.matches_acceptor_host(spans),
            LinkStrategy::TerminalDestination => self.matches_events(spans, EventRule::Destination),
            LinkStrategy::RpcDestination => self.matches_events(spans, EventRule::RpcUrl),
            LinkStrategy::SpanToSpan => self.matches_call_edge(spans),
        }
    }

    /// User origin: no span represents the caller, so the link holds if the
    /// trace's root span is the destination node.
    fn matches_trace_root(&self, spans: &[SpanRecord]) -> bool {
        let to = self.descriptor.to_node();
        spans.iter().any(|span| span.is_root() && to.matches_span(span))
    }

    /// Queue origin: the broker leaves no span; the consumer's span records
    /// which broker it accepted the message from.
    fn matches_acceptor_host(&self, spans: &[SpanRecord]) -> bool {
        let to = self.descriptor.to_node();
        let queue = self.descriptor.from_node().application();
        spans.iter().any(|span| {
            to.matches_span(span) && span.acceptor_host.as_deref() == Some(queue)
        })
    }

    /// Ordinary service to service: a direct parent/child span pair, one
    /// hop exactly.
    fn matches_call_edge(&self, spans: &[SpanRecord]) -> bool {
        let from = self.descriptor.from_node();
        let to = self.descriptor.to_node();

        let parent_ids: HashSet<i64> = spans
            .iter()
            .filter(|span| from.matches_span(span))
            .map(|span| span.span_id)
            .collect();
        if parent_ids.is_empty() {
            return false;
        }
        spans
            .iter()
            .any(|span| to.matches_span(span) && parent_ids.contains(&span.parent_span_id))
    }

    /// Opaque destination: the link holds if a span of the source node
    /// carries a qualifying outbound event.
    fn matches_events(&self, spans: &[SpanRecord], rule: EventRule) -> bool {
        let from = self.descriptor.from_node();
        let to_application = self.descriptor.to_node().application();

        // Hinted candidates first. A hit is final, a miss means nothing:
        // the exhaustive walk below is authoritative either way.
        let hinted: Vec<&EventCandidate> = self.hint.candidates_for(to_application).collect();
        if !hinted.is_empty() {
            let hit = spans
                .iter()
                .filter(|span| from.matches_span(span))
                .flat_map(|span| span.span_events.iter())
                .any(|event| {
                    hinted.iter().any(|candidate| candidate.covers(event))
                        && self.event_matches(event, rule)
                });
            if hit {
                return true;
            }
        }

        spans
            .iter()
            .filter(|span| from.matches_span(span))
            .any(|span| span.span_events.iter().any(|event| self.event_matches(event, rule)))
    }

    fn event_matches(&self, event: &SpanEventRecord, rule: EventRule) -> bool {
        let to = self.descriptor.to_node();
        match rule {
            EventRule::Destination => {
                event.service_type_code == to.service_type().code()
                    && event.destination_id.as_deref() == Some(to.application())
            }
            EventRule::RpcUrl => {
                if !ServiceTypeCategory::Rpc.contains(event.service_type_code) {
                    return false;
                }
                if event.destination_id.as_deref() != Some(to.application()) {
                    return false;
                }
                match self.descriptor.url_pattern() {
                    None => true,
                    Some(pattern) => self
                        .rpc_url_key
                        .and_then(|key| event.annotation(key))
                        .map_or(false, |url| pattern.matches_url(url)),
                }
            }
        }
    }
}
