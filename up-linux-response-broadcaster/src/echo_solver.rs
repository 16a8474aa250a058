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

use serde::{Deserialize, Serialize};
use up_response_broadcaster::{Header, Solver, Stamped};
use up_rust::{UCode, UStatus};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub(crate) struct WaypointRoute {
    pub(crate) header: Header,
    pub(crate) waypoints: Vec<String>,
}

impl Stamped for WaypointRoute {
    fn header(&self) -> &Header {
        &self.header
    }

    fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }
}

/// Turns a line like `depot gate-4 dock-2` into a route through those waypoints.
pub(crate) struct EchoSolver;

impl Solver for EchoSolver {
    type Request = String;
    type Response = WaypointRoute;

    fn solve(&self, request: &String) -> Result<WaypointRoute, UStatus> {
        let waypoints: Vec<String> = request.split_whitespace().map(str::to_string).collect();
        if waypoints.is_empty() {
            return Err(UStatus::fail_with_code(
                UCode::INVALID_ARGUMENT,
                "request names no waypoints",
            ));
        }

        Ok(WaypointRoute {
            waypoints,
            ..Default::default()
        })
    }
}
