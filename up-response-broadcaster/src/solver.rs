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

use crate::header::Stamped;
use up_rust::UStatus;

/// The external computation that turns one request into one response.
///
/// `solve` is synchronous and may block for as long as the computation takes;
/// no lock owned by this crate is held while it runs. It runs inline on the task
/// that awaits [`RequestProcessor::process`](crate::RequestProcessor::process), so
/// a solver that takes long should be driven from
/// [`tokio::task::spawn_blocking`] or wrapped in
/// `tokio::task::block_in_place` on a multi-thread runtime.
///
/// `init` and `start` run once, in that order, when a
/// [`ResponseService`](crate::ResponseService) starts. Either failing aborts the start.
pub trait Solver: Send + Sync + 'static {
    type Request: Send + Sync;
    type Response: Stamped;

    fn init(&self) -> Result<(), UStatus> {
        Ok(())
    }

    fn start(&self) -> Result<(), UStatus> {
        Ok(())
    }

    fn solve(&self, request: &Self::Request) -> Result<Self::Response, UStatus>;
}
