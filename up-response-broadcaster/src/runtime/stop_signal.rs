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

//! Explicit stop signalling between a service and its keep-alive timer.

use tokio::sync::watch;

/// Owning side of the stop signal. Dropping it counts as a stop request.
#[derive(Debug)]
pub(crate) struct StopController {
    tx: watch::Sender<bool>,
}

/// Observing side handed to the timer context at construction.
#[derive(Debug, Clone)]
pub(crate) struct StopSignal {
    rx: watch::Receiver<bool>,
}

impl StopController {
    pub(crate) fn new() -> (Self, StopSignal) {
        let (tx, rx) = watch::channel(false);
        (Self { tx }, StopSignal { rx })
    }

    /// Requests a stop. Returns `false` if a stop was already requested.
    pub(crate) fn stop(&self) -> bool {
        self.tx.send_if_modified(|stopped| !std::mem::replace(stopped, true))
    }
}

impl StopSignal {
    /// Whether a stop was requested or the controller is gone.
    pub(crate) fn is_stopped(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolves once a stop is requested or the controller is dropped.
    pub(crate) async fn stopped(&mut self) {
        while !*self.rx.borrow_and_update() {
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }
}
