/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

mod support;

use std::sync::Arc;
use std::time::Duration;
use support::{decode, CapturingTransport, WaypointSolver};
use up_response_broadcaster::{BroadcasterConfig, ResponseService, TransportPublishPort};
use up_rust::UTransport;

const CONFIG: &str = r#"{
    service_name: "routing",
    keepalive_interval_ms: 10,
    primary: {
        topic: { authority: "vehicle", ue_id: 23456, ue_version_major: 1, resource_id: 32769 },
    },
    keep_alive: {
        topic: { authority: "vehicle", ue_id: 23456, ue_version_major: 1, resource_id: 32770 },
    },
}"#;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn service_publishes_on_primary_then_keeps_alive_over_transport() {
    let config = BroadcasterConfig::from_json5_str(CONFIG).expect("config should parse");
    let primary_topic = config.primary.topic.to_uuri().unwrap();
    let keep_alive_topic = config.keep_alive.topic.to_uuri().unwrap();

    let transport = Arc::new(CapturingTransport::default());
    let shared_transport: Arc<dyn UTransport> = transport.clone();
    let port = TransportPublishPort::new(
        shared_transport,
        config.primary.to_binding().unwrap(),
        config.keep_alive.to_binding().unwrap(),
    )
    .expect("distinct topics");

    let service = ResponseService::start(
        &config.service_name,
        config.keepalive_interval(),
        WaypointSolver,
        Arc::new(port),
    )
    .expect("service should start");

    tokio::time::sleep(Duration::from_millis(40)).await;
    assert!(
        transport.sent_with_source(&keep_alive_topic).is_empty(),
        "nothing to keep alive before the first request"
    );

    let committed = service
        .process(&"depot gate-4".to_string())
        .await
        .expect("request should succeed");
    tokio::time::sleep(Duration::from_millis(80)).await;
    tokio::task::spawn_blocking(move || service.shutdown())
        .await
        .expect("shutdown task should not panic")
        .expect("clean shutdown");

    let primary = transport.sent_with_source(&primary_topic);
    assert_eq!(primary.len(), 1);
    assert_eq!(decode(&primary[0]), *committed);

    let keep_alive = transport.sent_with_source(&keep_alive_topic);
    assert!(!keep_alive.is_empty());
    for message in &keep_alive {
        let republished = decode(message);
        assert_eq!(republished.waypoints, committed.waypoints);
        assert_eq!(republished.header.module_name, "routing");
        assert!(republished.header.timestamp >= committed.header.timestamp);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn nothing_is_published_after_shutdown() {
    let config = BroadcasterConfig::from_json5_str(CONFIG).unwrap();
    let keep_alive_topic = config.keep_alive.topic.to_uuri().unwrap();
    let transport = Arc::new(CapturingTransport::default());
    let shared_transport: Arc<dyn UTransport> = transport.clone();
    let port = TransportPublishPort::new(
        shared_transport,
        config.primary.to_binding().unwrap(),
        config.keep_alive.to_binding().unwrap(),
    )
    .unwrap();

    let service = ResponseService::start(
        "routing",
        config.keepalive_interval(),
        WaypointSolver,
        Arc::new(port),
    )
    .unwrap();
    service.process(&"depot gate-4".to_string()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(35)).await;
    tokio::task::spawn_blocking(move || service.shutdown())
        .await
        .unwrap()
        .unwrap();

    let at_shutdown = transport.sent_with_source(&keep_alive_topic).len();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(
        transport.sent_with_source(&keep_alive_topic).len(),
        at_shutdown
    );
}
