// Copyright 2024-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Reserved code for the unresolved destination type: a node that produced
/// no span of its own and is only known from outbound RPC calls.
pub const UNKNOWN_CODE: u16 = 1;
/// Reserved code for the virtual user type representing traffic entering
/// the system from outside.
pub const USER_CODE: u16 = 2;

/// Behavioral properties of a service type.
///
/// The combination of properties decides how a link touching a node of this
/// type is matched: terminal and destination-id types are only visible
/// through span events on the caller, queue types through the consumer's
/// acceptor host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTypeProperties {
    #[serde(default)]
    pub record_statistics: bool,
    #[serde(default)]
    pub terminal: bool,
    #[serde(default)]
    pub include_destination_id: bool,
    #[serde(default)]
    pub queue: bool,
}

impl ServiceTypeProperties {
    pub const fn none() -> Self {
        ServiceTypeProperties {
            record_statistics: false,
            terminal: false,
            include_destination_id: false,
            queue: false,
        }
    }

    pub const fn with_record_statistics(mut self) -> Self {
        self.record_statistics = true;
        self
    }

    pub const fn with_terminal(mut self) -> Self {
        self.terminal = true;
        self
    }

    pub const fn with_include_destination_id(mut self) -> Self {
        self.include_destination_id = true;
        self
    }

    pub const fn with_queue(mut self) -> Self {
        self.queue = true;
        self
    }
}

/// Reserved code ranges grouping service types by the role they play in a
/// trace. Only the range matters for matching; individual codes inside a
/// range are assigned by instrumentation plugins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceTypeCategory {
    Internal,
    Server,
    Database,
    Library,
    Cache,
    Rpc,
}

impl ServiceTypeCategory {
    const fn range(self) -> (u16, u16) {
        match self {
            ServiceTypeCategory::Internal => (0, 1000),
            ServiceTypeCategory::Server => (1000, 2000),
            ServiceTypeCategory::Database => (2000, 3000),
            ServiceTypeCategory::Library => (5000, 8000),
            ServiceTypeCategory::Cache => (8000, 9000),
            ServiceTypeCategory::Rpc => (9000, 10000),
        }
    }

    /// True if `code` falls inside this category's reserved range.
    pub fn contains(self, code: u16) -> bool {
        let (start, end) = self.range();
        start <= code && code < end
    }
}

/// A resolved service type: code, name and properties.
///
/// Produced by a [`ServiceTypeRegistry`](crate::ServiceTypeRegistry);
/// immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceType {
    code: u16,
    name: String,
    #[serde(default)]
    properties: ServiceTypeProperties,
}

impl ServiceType {
    pub fn new(code: u16, name: impl Into<String>, properties: ServiceTypeProperties) -> Self {
        ServiceType {
            code,
            name: name.into(),
            properties,
        }
    }

    /// The well-known unresolved destination type.
    pub fn unknown() -> Self {
        ServiceType::new(
            UNKNOWN_CODE,
            "UNKNOWN",
            ServiceTypeProperties::none().with_record_statistics(),
        )
    }

    /// The well-known virtual user type.
    pub fn user() -> Self {
        ServiceType::new(
            USER_CODE,
            "USER",
            ServiceTypeProperties::none().with_record_statistics(),
        )
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> ServiceTypeProperties {
        self.properties
    }

    pub fn records_statistics(&self) -> bool {
        self.properties.record_statistics
    }

    pub fn is_queue(&self) -> bool {
        self.properties.queue
    }

    /// True for types whose calls are recorded only through span events on
    /// the caller, never as spans of their own.
    pub fn is_terminal_like(&self) -> bool {
        self.properties.terminal || self.properties.include_destination_id
    }

    pub fn is_unknown(&self) -> bool {
        self.code == UNKNOWN_CODE
    }

    pub fn is_user(&self) -> bool {
        self.code == USER_CODE
    }
}
