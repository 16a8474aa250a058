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

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use up_response_broadcaster::{Channel, Header, PublishPort, Solver, Stamped};
use up_rust::{UCode, UListener, UMessage, UStatus, UTransport, UUri};

pub(crate) const UNROUTABLE: &str = "nowhere";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct RouteResponse {
    pub(crate) header: Header,
    pub(crate) waypoints: Vec<String>,
}

impl Stamped for RouteResponse {
    fn header(&self) -> &Header {
        &self.header
    }

    fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }
}

/// Splits a request like `"depot gate-4"` into waypoints.
pub(crate) struct WaypointSolver;

impl Solver for WaypointSolver {
    type Request = String;
    type Response = RouteResponse;

    fn solve(&self, request: &String) -> Result<RouteResponse, UStatus> {
        if request.contains(UNROUTABLE) {
            return Err(UStatus::fail_with_code(
                UCode::NOT_FOUND,
                format!("no route through {UNROUTABLE}"),
            ));
        }
        Ok(RouteResponse {
            waypoints: request.split_whitespace().map(str::to_string).collect(),
            ..Default::default()
        })
    }
}

#[derive(Default)]
pub(crate) struct RecordingPort {
    published: Mutex<Vec<(Channel, RouteResponse)>>,
    rejected: Mutex<Vec<Channel>>,
}

#[allow(dead_code)]
impl RecordingPort {
    pub(crate) fn reject(&self, channel: Channel) {
        self.rejected.lock().unwrap().push(channel);
    }

    pub(crate) fn accept(&self, channel: Channel) {
        self.rejected.lock().unwrap().retain(|c| *c != channel);
    }

    pub(crate) fn published_on(&self, channel: Channel) -> Vec<RouteResponse> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub(crate) fn total(&self) -> usize {
        self.published.lock().unwrap().len()
    }
}

#[async_trait]
impl PublishPort<RouteResponse> for RecordingPort {
    async fn publish(&self, channel: Channel, message: &RouteResponse) -> Result<(), UStatus> {
        if self.rejected.lock().unwrap().contains(&channel) {
            return Err(UStatus::fail_with_code(
                UCode::UNAVAILABLE,
                format!("{channel} rejected"),
            ));
        }
        self.published
            .lock()
            .unwrap()
            .push((channel, message.clone()));
        Ok(())
    }
}

/// A `UTransport` that keeps every sent message.
#[derive(Default)]
pub(crate) struct CapturingTransport {
    sent: Mutex<Vec<UMessage>>,
}

#[allow(dead_code)]
impl CapturingTransport {
    pub(crate) fn sent_with_source(&self, topic: &UUri) -> Vec<UMessage> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|message| {
                message
                    .attributes
                    .as_ref()
                    .and_then(|attributes| attributes.source.as_ref())
                    == Some(topic)
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl UTransport for CapturingTransport {
    async fn send(&self, message: UMessage) -> Result<(), UStatus> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }

    async fn receive(
        &self,
        _source_filter: &UUri,
        _sink_filter: Option<&UUri>,
    ) -> Result<UMessage, UStatus> {
        Err(UStatus::fail_with_code(
            UCode::UNIMPLEMENTED,
            "receive is not used by broadcaster tests",
        ))
    }

    async fn register_listener(
        &self,
        _source_filter: &UUri,
        _sink_filter: Option<&UUri>,
        _listener: Arc<dyn UListener>,
    ) -> Result<(), UStatus> {
        Ok(())
    }

    async fn unregister_listener(
        &self,
        _source_filter: &UUri,
        _sink_filter: Option<&UUri>,
        _listener: Arc<dyn UListener>,
    ) -> Result<(), UStatus> {
        Ok(())
    }
}

#[allow(dead_code)]
pub(crate) fn decode(message: &UMessage) -> RouteResponse {
    let payload = message.payload.as_ref().expect("message carries a payload");
    serde_json::from_slice(payload).expect("payload is a JSON RouteResponse")
}
