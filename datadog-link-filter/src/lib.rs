// Copyright 2024-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Link filtering for the service-map topology view.
//!
//! A link is a directed call edge between two logical nodes of the service
//! map: App A calling App B, App A writing to a backend, a queue feeding a
//! consumer, or outside traffic entering the system. Given a [`LinkQuery`]
//! the [`LinkFilter`] decides, one trace at a time, whether the trace's
//! spans exhibit that edge. The query surface runs it across every
//! candidate trace and keeps the ones that match.
//!
//! How an edge shows up in a trace depends on what the destination is. Two
//! traced services leave a parent/child span pair; a datastore or queue
//! destination leaves only a span event on the caller; a queue origin leaves
//! only an acceptor host on the consumer; outside traffic leaves nothing but
//! the root span itself. The filter picks the applicable strategy once at
//! construction from the resolved service types and applies it statelessly
//! per trace, so one filter can be shared across evaluation threads.

pub mod descriptor;
pub mod error;
pub mod filter;
pub mod hint;
pub mod url_pattern;

pub use descriptor::{decode_url_pattern, LinkDescriptor, LinkQuery, LinkStrategy, NodeDescriptor};
pub use error::LinkFilterError;
pub use filter::LinkFilter;
pub use hint::{DestinationHint, EventCandidate, MatchHint};
pub use url_pattern::UrlPathPattern;
