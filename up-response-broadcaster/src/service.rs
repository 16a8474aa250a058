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

use crate::cache::response_slot::ResponseSlot;
use crate::data_plane::{PeriodicBroadcaster, RequestProcessor};
use crate::error::{ProcessError, ServiceError};
use crate::observability::{events, fields};
use crate::publish::PublishPort;
use crate::runtime::stop_signal::StopController;
use crate::runtime::timer_runtime::{build_runtime_thread_name, KeepAliveLoopHandle};
use crate::solver::Solver;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const RESPONSE_SERVICE_TAG: &str = "ResponseService:";
const COMPONENT: &str = "response_service";

///
/// [`ResponseService`] owns the response slot and wires the two producers of
/// publish events around it: the request path ([`process`](Self::process)) and a
/// keep-alive timer running on its own thread.
///
/// The service is constructed explicitly and owned by whoever composes it. Taking
/// `self` in [`shutdown`](Self::shutdown) guarantees no request is in flight when
/// the timer is torn down; the timer finishes any in-flight tick before its thread
/// is joined.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use async_trait::async_trait;
/// use up_response_broadcaster::{Channel, Header, PublishPort, ResponseService, Solver, Stamped};
/// use up_rust::UStatus;
///
/// #[derive(Clone, Default)]
/// struct Echo {
///     header: Header,
///     text: String,
/// }
///
/// impl Stamped for Echo {
///     fn header(&self) -> &Header {
///         &self.header
///     }
///     fn header_mut(&mut self) -> &mut Header {
///         &mut self.header
///     }
/// }
///
/// struct EchoSolver;
///
/// impl Solver for EchoSolver {
///     type Request = String;
///     type Response = Echo;
///
///     fn solve(&self, request: &String) -> Result<Echo, UStatus> {
///         Ok(Echo { text: request.clone(), ..Default::default() })
///     }
/// }
///
/// struct Discard;
///
/// #[async_trait]
/// impl PublishPort<Echo> for Discard {
///     async fn publish(&self, _channel: Channel, _message: &Echo) -> Result<(), UStatus> {
///         Ok(())
///     }
/// }
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let service = ResponseService::start(
///     "echo",
///     Duration::from_millis(100),
///     EchoSolver,
///     Arc::new(Discard),
/// )
/// .unwrap();
///
/// let response = service.process(&"hello".to_string()).await.unwrap();
/// assert_eq!(response.header().sequence_num, 0);
/// assert_eq!(service.latest().unwrap().text, "hello");
///
/// service.shutdown().unwrap();
/// # });
/// ```
pub struct ResponseService<S: Solver> {
    name: String,
    slot: Arc<ResponseSlot<S::Response>>,
    processor: RequestProcessor<S>,
    stop: StopController,
    keepalive_loop: Option<KeepAliveLoopHandle>,
}

impl<S: Solver> ResponseService<S> {
    /// Initializes and starts the solver, then starts the keep-alive timer.
    ///
    /// The slot starts empty, so the timer stays idle until the first request
    /// succeeds.
    pub fn start(
        name: &str,
        keepalive_interval: Duration,
        solver: S,
        port: Arc<dyn PublishPort<S::Response>>,
    ) -> Result<Self, ServiceError> {
        let name = name.to_string();
        info!(
            event = events::SERVICE_START,
            component = COMPONENT,
            service = name.as_str(),
            interval_ms = fields::duration_ms(keepalive_interval),
            "{RESPONSE_SERVICE_TAG} starting"
        );

        Self::start_solver(&name, &solver)?;

        let slot = Arc::new(ResponseSlot::new());
        let broadcaster =
            PeriodicBroadcaster::new(&name, slot.clone(), port.clone(), keepalive_interval)?;
        let processor = RequestProcessor::new(&name, solver, slot.clone(), port);

        let (stop, stop_signal) = StopController::new();
        let keepalive_loop = broadcaster
            .spawn(build_runtime_thread_name(&name), stop_signal)
            .map_err(ServiceError::TimerSpawn)?;

        Ok(Self {
            name,
            slot,
            processor,
            stop,
            keepalive_loop: Some(keepalive_loop),
        })
    }

    fn start_solver(name: &str, solver: &S) -> Result<(), ServiceError> {
        let lifecycle = solver
            .init()
            .map_err(|status| ("init", status))
            .and_then(|()| solver.start().map_err(|status| ("start", status)));

        lifecycle.map_err(|(stage, status)| {
            warn!(
                event = events::SERVICE_START_FAILED,
                component = COMPONENT,
                service = name,
                stage,
                err = ?status,
                "{RESPONSE_SERVICE_TAG} solver lifecycle failed"
            );
            ServiceError::SolverLifecycle { stage, status }
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Processes one request. See [`RequestProcessor::process`].
    pub async fn process(&self, request: &S::Request) -> Result<Arc<S::Response>, ProcessError> {
        self.processor.process(request).await
    }

    /// The latest committed response, carrying the stamp of its primary publish.
    pub fn latest(&self) -> Option<Arc<S::Response>> {
        self.slot.get()
    }

    pub fn solver(&self) -> &S {
        self.processor.solver()
    }

    /// Stops the keep-alive timer and waits for its thread to finish.
    ///
    /// This blocks the calling thread until any in-flight tick completes. From
    /// async code, call it through [`tokio::task::spawn_blocking`] so a runtime
    /// worker is not parked on the join. Dropping the service blocks the same way.
    pub fn shutdown(mut self) -> Result<(), ServiceError> {
        self.stop_timer()
    }

    fn stop_timer(&mut self) -> Result<(), ServiceError> {
        let Some(keepalive_loop) = self.keepalive_loop.take() else {
            return Ok(());
        };

        info!(
            event = events::SERVICE_STOP_REQUESTED,
            component = COMPONENT,
            service = self.name.as_str(),
            timer_thread = keepalive_loop.timer_thread(),
            "{RESPONSE_SERVICE_TAG} stopping keep-alive timer"
        );
        self.stop.stop();

        keepalive_loop
            .join()
            .map_err(|_| ServiceError::TimerPanicked)?;
        info!(
            event = events::SERVICE_STOPPED,
            component = COMPONENT,
            service = self.name.as_str(),
            "{RESPONSE_SERVICE_TAG} stopped"
        );
        Ok(())
    }
}

/// Stops and joins the timer like [`ResponseService::shutdown`], blocking the
/// dropping thread.
impl<S: Solver> Drop for ResponseService<S> {
    fn drop(&mut self) {
        if let Err(err) = self.stop_timer() {
            warn!(
                component = COMPONENT,
                service = self.name.as_str(),
                err = %err,
                "{RESPONSE_SERVICE_TAG} timer did not stop cleanly"
            );
        }
    }
}
