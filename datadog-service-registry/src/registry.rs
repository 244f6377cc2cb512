// Copyright 2024-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::service_type::ServiceType;
use std::collections::HashMap;

/// Read-only lookup of service types by name.
///
/// The link filter resolves descriptor type names through this trait once at
/// construction; implementations are expected to be fully resident in
/// memory.
pub trait ServiceTypeRegistry {
    fn find_service_type_by_name(&self, name: &str) -> Option<&ServiceType>;
}

/// In-memory [`ServiceTypeRegistry`] backed by a name map.
///
/// Embedders load it from their type table at startup; tests register the
/// handful of types a scenario needs.
#[derive(Clone, Debug, Default)]
pub struct StaticServiceTypeRegistry {
    by_name: HashMap<String, ServiceType>,
}

impl StaticServiceTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the reserved UNKNOWN and USER types.
    pub fn with_well_known() -> Self {
        let mut registry = Self::new();
        registry.register(ServiceType::unknown());
        registry.register(ServiceType::user());
        registry
    }

    /// Registers `service_type`, replacing any previous entry with the same
    /// name.
    pub fn register(&mut self, service_type: ServiceType) {
        self.by_name
            .insert(service_type.name().to_owned(), service_type);
    }
}

impl ServiceTypeRegistry for StaticServiceTypeRegistry {
    fn find_service_type_by_name(&self, name: &str) -> Option<&ServiceType> {
        self.by_name.get(name)
    }
}
