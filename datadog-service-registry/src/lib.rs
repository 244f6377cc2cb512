// Copyright 2024-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Service-type and annotation-key vocabulary for the service map.
//!
//! Every node of the service map carries a service type: a numeric code plus
//! a set of properties that drive how calls to and from that node are
//! recorded. The link filter never hardcodes a type table; it resolves
//! type names through the [`ServiceTypeRegistry`] and annotation keys
//! through the [`AnnotationKeyRegistry`] it is handed at construction.

pub mod annotation;
pub mod registry;
pub mod service_type;

pub use annotation::{AnnotationKey, AnnotationKeyRegistry, StaticAnnotationKeyRegistry};
pub use registry::{ServiceTypeRegistry, StaticServiceTypeRegistry};
pub use service_type::{ServiceType, ServiceTypeCategory, ServiceTypeProperties};
