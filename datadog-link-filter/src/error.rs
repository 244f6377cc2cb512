// Copyright 2024-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

/// Errors surfaced while building a link filter.
///
/// All variants are construction-time: the per-trace decision itself is a
/// total function and has no error path. Spans with missing or malformed
/// pieces are produced by an independent instrumentation pipeline and are
/// treated as non-matches, never as failures.
#[derive(Debug, thiserror::Error)]
pub enum LinkFilterError {
    /// A descriptor names a service type the registry does not know.
    #[error("unresolved service type: {name}")]
    UnresolvedServiceType { name: String },
    /// The wildcard URL pattern does not compile.
    #[error("malformed url pattern {pattern:?}: {reason}")]
    MalformedPattern { pattern: String, reason: String },
    /// The wire form of the URL pattern is not base64-encoded UTF-8.
    #[error("url pattern is not base64-encoded utf-8 text")]
    InvalidPatternEncoding,
}
