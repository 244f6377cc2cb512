// Copyright 2024-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use criterion::{criterion_group, criterion_main, Criterion};
use datadog_link_filter::{LinkFilter, LinkQuery, MatchHint};
use datadog_service_registry::{
    AnnotationKey, ServiceType, ServiceTypeProperties, StaticAnnotationKeyRegistry,
    StaticServiceTypeRegistry,
};
use datadog_trace_model::{SpanEventRecord, SpanRecord};

const TOMCAT_CODE: u16 = 1010;
const BACKEND_CODE: u16 = 2100;

fn service_types() -> StaticServiceTypeRegistry {
    let mut registry = StaticServiceTypeRegistry::with_well_known();
    registry.register(ServiceType::new(
        TOMCAT_CODE,
        "TOMCAT",
        ServiceTypeProperties::none().with_record_statistics(),
    ));
    registry.register(ServiceType::new(
        BACKEND_CODE,
        "BACKEND",
        ServiceTypeProperties::none()
            .with_terminal()
            .with_include_destination_id(),
    ));
    registry
}

fn annotation_keys() -> StaticAnnotationKeyRegistry {
    let mut registry = StaticAnnotationKeyRegistry::new();
    registry.register(AnnotationKey::new(-1, "rpc.url"));
    registry
}

fn get_span(span_id: i64, application: &str) -> SpanRecord {
    SpanRecord {
        span_id,
        parent_span_id: span_id - 1,
        application: application.to_string(),
        service_type_code: TOMCAT_CODE,
        agent_id: format!("{application}-agent"),
        span_events: vec![SpanEventRecord {
            service_type_code: BACKEND_CODE,
            destination_id: Some(format!("BACKEND_{}", span_id % 7)),
            ..Default::default()
        }],
        ..Default::default()
    }
}

fn make_trace(len: i64) -> Vec<SpanRecord> {
    (1..=len)
        .map(|span_id| get_span(span_id, if span_id % 2 == 0 { "APP_B" } else { "APP_A" }))
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("link_filter");
    let trace = make_trace(1000);

    let call_edge = LinkFilter::new(
        &LinkQuery {
            from_application: "APP_A".to_string(),
            from_service_type: "TOMCAT".to_string(),
            to_application: "APP_B".to_string(),
            to_service_type: "TOMCAT".to_string(),
            ..Default::default()
        },
        MatchHint::empty(),
        &service_types(),
        &annotation_keys(),
    )
    .unwrap();
    group.bench_function("span_to_span_1000_spans", |b| {
        b.iter(|| call_edge.matches(&trace))
    });

    let backend = LinkFilter::new(
        &LinkQuery {
            from_application: "APP_A".to_string(),
            from_service_type: "TOMCAT".to_string(),
            to_application: "BACKEND_3".to_string(),
            to_service_type: "BACKEND".to_string(),
            ..Default::default()
        },
        MatchHint::empty(),
        &service_types(),
        &annotation_keys(),
    )
    .unwrap();
    group.bench_function("event_scan_1000_spans", |b| {
        b.iter(|| backend.matches(&trace))
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
