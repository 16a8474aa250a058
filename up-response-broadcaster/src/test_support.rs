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

//! Test doubles shared by the unit tests of the request and keep-alive paths.

use crate::header::{Header, Stamped};
use crate::publish::{Channel, PublishPort};
use crate::solver::Solver;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use up_rust::{UCode, UStatus};

pub(crate) const FAILING_REQUEST: &str = "unreachable";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct RouteResponse {
    pub(crate) header: Header,
    pub(crate) route: String,
}

impl Stamped for RouteResponse {
    fn header(&self) -> &Header {
        &self.header
    }

    fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }
}

/// Answers every request with a route named after it, except [`FAILING_REQUEST`].
#[derive(Default)]
pub(crate) struct ScriptedSolver {
    pub(crate) solve_count: AtomicUsize,
}

impl Solver for ScriptedSolver {
    type Request = String;
    type Response = RouteResponse;

    fn solve(&self, request: &String) -> Result<RouteResponse, UStatus> {
        self.solve_count.fetch_add(1, Ordering::SeqCst);
        if request == FAILING_REQUEST {
            return Err(UStatus::fail_with_code(
                UCode::NOT_FOUND,
                format!("no route for {request}"),
            ));
        }
        Ok(RouteResponse {
            route: format!("route-to-{request}"),
            ..Default::default()
        })
    }
}

/// Records every publish and can be told to reject either channel.
#[derive(Default)]
pub(crate) struct RecordingPort {
    published: Mutex<Vec<(Channel, RouteResponse)>>,
    reject_primary: AtomicBool,
    reject_keep_alive: AtomicBool,
}

impl RecordingPort {
    pub(crate) fn reject(&self, channel: Channel, reject: bool) {
        match channel {
            Channel::Primary => self.reject_primary.store(reject, Ordering::SeqCst),
            Channel::KeepAlive => self.reject_keep_alive.store(reject, Ordering::SeqCst),
        }
    }

    pub(crate) fn published_on(&self, channel: Channel) -> Vec<RouteResponse> {
        self.published
            .lock()
            .expect("publish log lock")
            .iter()
            .filter(|(published_channel, _)| *published_channel == channel)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

#[async_trait]
impl PublishPort<RouteResponse> for RecordingPort {
    async fn publish(&self, channel: Channel, message: &RouteResponse) -> Result<(), UStatus> {
        let rejected = match channel {
            Channel::Primary => self.reject_primary.load(Ordering::SeqCst),
            Channel::KeepAlive => self.reject_keep_alive.load(Ordering::SeqCst),
        };
        if rejected {
            return Err(UStatus::fail_with_code(
                UCode::UNAVAILABLE,
                format!("{channel} channel unavailable"),
            ));
        }
        self.published
            .lock()
            .expect("publish log lock")
            .push((channel, message.clone()));
        Ok(())
    }
}
