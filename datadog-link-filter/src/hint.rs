// Copyright 2024-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use datadog_trace_model::SpanEventRecord;
use serde::{Deserialize, Serialize};

/// Advisory pre-filter narrowing which span-event destinations are worth
/// examining first.
///
/// The query surface may precompute, per destination application, the
/// `(service type, destination id)` pairs it has already observed across the
/// candidate traces. A hint can only accept a trace early; the exhaustive
/// scan stays authoritative, so evaluation produces the same decisions
/// whether the hint is empty, accurate or stale.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchHint {
    entries: Vec<DestinationHint>,
}

/// Candidate span-event destinations for one application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DestinationHint {
    pub application: String,
    pub candidates: Vec<EventCandidate>,
}

/// One plausible `(service type, destination id)` pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventCandidate {
    pub service_type_code: u16,
    pub destination_id: String,
}

impl EventCandidate {
    /// True if `event` carries exactly this destination.
    pub fn covers(&self, event: &SpanEventRecord) -> bool {
        event.service_type_code == self.service_type_code
            && event.destination_id.as_deref() == Some(self.destination_id.as_str())
    }
}

impl MatchHint {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(entries: Vec<DestinationHint>) -> Self {
        MatchHint { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Candidates hinted for `application`, across all entries naming it.
    pub fn candidates_for<'a>(
        &'a self,
        application: &'a str,
    ) -> impl Iterator<Item = &'a EventCandidate> {
        self.entries
            .iter()
            .filter(move |entry| entry.application == application)
            .flat_map(|entry| entry.candidates.iter())
    }
}
