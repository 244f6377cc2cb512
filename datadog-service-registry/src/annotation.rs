// Copyright 2024-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the annotation carrying the full URL of an outbound RPC call.
pub const RPC_URL_ANNOTATION: &str = "rpc.url";

/// A registered annotation key: numeric code plus symbolic name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationKey {
    code: i32,
    name: String,
}

impl AnnotationKey {
    pub fn new(code: i32, name: impl Into<String>) -> Self {
        AnnotationKey {
            code,
            name: name.into(),
        }
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Read-only lookup of annotation keys by symbolic name.
///
/// Injected into the link filter at construction; a missing entry is not an
/// error there, it only disables URL-based comparisons.
pub trait AnnotationKeyRegistry {
    fn find_annotation_key_by_name(&self, name: &str) -> Option<&AnnotationKey>;
}

/// In-memory [`AnnotationKeyRegistry`] backed by a name map.
#[derive(Clone, Debug, Default)]
pub struct StaticAnnotationKeyRegistry {
    by_name: HashMap<String, AnnotationKey>,
}

impl StaticAnnotationKeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `key`, replacing any previous entry with the same name.
    pub fn register(&mut self, key: AnnotationKey) {
        self.by_name.insert(key.name.clone(), key);
    }
}

impl AnnotationKeyRegistry for StaticAnnotationKeyRegistry {
    fn find_annotation_key_by_name(&self, name: &str) -> Option<&AnnotationKey> {
        self.by_name.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        let mut registry = StaticAnnotationKeyRegistry::new();
        registry.register(AnnotationKey::new(-1, RPC_URL_ANNOTATION));

        let key = registry.find_annotation_key_by_name(RPC_URL_ANNOTATION).unwrap();
        assert_eq!(key.code(), -1);
        assert!(registry.find_annotation_key_by_name("sql.query").is_none());
    }

    #[test]
    fn register_replaces_same_name() {
        let mut registry = StaticAnnotationKeyRegistry::new();
        registry.register(AnnotationKey::new(-1, RPC_URL_ANNOTATION));
        registry.register(AnnotationKey::new(40, RPC_URL_ANNOTATION));
        let key = registry.find_annotation_key_by_name(RPC_URL_ANNOTATION).unwrap();
        assert_eq!(key.code(), 40);
    }
}
