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

//! Response header and the stamping applied at publish time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Metadata attached to every published response.
///
/// `timestamp` is written when the response is published, not when the solver
/// produced it, so the same logical response can be re-stamped on republish.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub module_name: String,
    pub sequence_num: u64,
    pub timestamp: DateTime<Utc>,
}

/// A response type that carries a [`Header`].
///
/// Implemented by whatever the [`Solver`](crate::Solver) produces so both publish
/// paths can stamp it without knowing the rest of its shape.
pub trait Stamped: Clone + Send + Sync + 'static {
    fn header(&self) -> &Header;

    fn header_mut(&mut self) -> &mut Header;
}

/// Fills headers on the request path: source identity, next sequence number, now.
pub(crate) struct HeaderStamper {
    module_name: String,
    next_sequence: AtomicU64,
}

impl HeaderStamper {
    pub(crate) fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            next_sequence: AtomicU64::new(0),
        }
    }

    pub(crate) fn fill<T: Stamped>(&self, response: &mut T) {
        let header = response.header_mut();
        header.module_name.clone_from(&self.module_name);
        header.sequence_num = self.next_sequence.fetch_add(1, Ordering::Relaxed);
        header.timestamp = Utc::now();
    }
}

/// Refreshes the timestamp of an outgoing keep-alive copy.
///
/// The wall clock may step backwards; a re-stamped copy never carries an older
/// timestamp than the one it was cloned from.
pub(crate) fn restamp<T: Stamped>(response: &mut T) {
    let header = response.header_mut();
    header.timestamp = header.timestamp.max(Utc::now());
}
