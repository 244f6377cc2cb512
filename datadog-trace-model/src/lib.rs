// Copyright 2024-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Span records as the trace store hands them to the link filter.
//!
//! A trace is an unordered collection of [`SpanRecord`]s forming a call tree
//! through `parent_span_id`; nothing here assumes any traversal order. The
//! records are read-only to every consumer in this workspace.

pub mod span;

pub use span::{SpanEventRecord, SpanRecord, Trace, ROOT_PARENT_SPAN_ID};
