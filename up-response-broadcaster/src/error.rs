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

//! Error types for the request path and the service lifecycle.

use crate::publish::Channel;
use up_rust::{UCode, UStatus};

/// Failure of a single [`RequestProcessor::process`](crate::RequestProcessor::process) call.
///
/// Neither variant leaves a trace in the response slot.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// The solver rejected the request. Nothing was published.
    #[error("solver failed: {0:?}")]
    Solver(UStatus),

    /// The response was computed but could not be published, so it was not cached.
    #[error("publish on {channel} channel failed: {status:?}")]
    Publish { channel: Channel, status: UStatus },
}

impl ProcessError {
    /// The underlying transport or solver status.
    pub fn status(&self) -> &UStatus {
        match self {
            ProcessError::Solver(status) => status,
            ProcessError::Publish { status, .. } => status,
        }
    }
}

impl From<ProcessError> for UStatus {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::Solver(status) => status,
            ProcessError::Publish { status, .. } => status,
        }
    }
}

/// Failure to start or stop a [`ResponseService`](crate::ResponseService).
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("keep-alive interval must be greater than zero")]
    InvalidInterval,

    #[error("solver {stage} failed: {status:?}")]
    SolverLifecycle { stage: &'static str, status: UStatus },

    #[error("unable to spawn keep-alive timer: {0:?}")]
    TimerSpawn(UStatus),

    #[error("keep-alive timer thread panicked")]
    TimerPanicked,
}

impl From<ServiceError> for UStatus {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInterval => {
                UStatus::fail_with_code(UCode::INVALID_ARGUMENT, err.to_string())
            }
            ServiceError::SolverLifecycle { status, .. } => status,
            ServiceError::TimerSpawn(status) => status,
            ServiceError::TimerPanicked => UStatus::fail_with_code(UCode::INTERNAL, err.to_string()),
        }
    }
}
