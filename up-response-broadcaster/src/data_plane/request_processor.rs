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

//! Request path: solve, publish once on the primary channel, then cache.

use crate::cache::response_slot::ResponseSlot;
use crate::error::ProcessError;
use crate::header::{HeaderStamper, Stamped};
use crate::observability::{events, fields};
use crate::publish::{Channel, PublishPort};
use crate::solver::Solver;
use std::sync::Arc;
use tracing::{debug, warn};

const COMPONENT: &str = "request_processor";

/// Turns requests into published, cached responses.
///
/// A response reaches the [`ResponseSlot`] only after its primary publish
/// succeeded, so the keep-alive timer never repeats a response that was not
/// delivered at least once.
pub struct RequestProcessor<S: Solver> {
    service_name: String,
    solver: S,
    slot: Arc<ResponseSlot<S::Response>>,
    port: Arc<dyn PublishPort<S::Response>>,
    stamper: HeaderStamper,
}

impl<S: Solver> RequestProcessor<S> {
    pub fn new(
        service_name: &str,
        solver: S,
        slot: Arc<ResponseSlot<S::Response>>,
        port: Arc<dyn PublishPort<S::Response>>,
    ) -> Self {
        Self {
            service_name: service_name.to_string(),
            solver,
            slot,
            port,
            stamper: HeaderStamper::new(service_name),
        }
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Processes one request.
    ///
    /// On success exactly one primary publish and one slot write happened, and the
    /// committed response is returned. On failure neither happened, except that a
    /// failed publish was attempted once.
    pub async fn process(&self, request: &S::Request) -> Result<Arc<S::Response>, ProcessError> {
        let mut response = self.solver.solve(request).map_err(|status| {
            warn!(
                event = events::PROCESS_SOLVE_FAILED,
                component = COMPONENT,
                service = self.service_name.as_str(),
                err = ?status,
                "solver rejected request"
            );
            ProcessError::Solver(status)
        })?;

        self.stamper.fill(&mut response);
        let sequence_num = response.header().sequence_num;

        if let Err(status) = self.port.publish(Channel::Primary, &response).await {
            warn!(
                event = events::PROCESS_PUBLISH_FAILED,
                component = COMPONENT,
                service = self.service_name.as_str(),
                sequence_num,
                err = ?status,
                "primary publish failed; response not cached"
            );
            return Err(ProcessError::Publish {
                channel: Channel::Primary,
                status,
            });
        }
        debug!(
            event = events::PROCESS_PUBLISH_OK,
            component = COMPONENT,
            service = self.service_name.as_str(),
            sequence_num,
            timestamp = fields::format_timestamp(&response.header().timestamp).as_str(),
            "published response on primary channel"
        );

        let response = Arc::new(response);
        self.slot.set(response.clone());
        debug!(
            event = events::PROCESS_SLOT_UPDATED,
            component = COMPONENT,
            service = self.service_name.as_str(),
            sequence_num,
            "cached latest response"
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::RequestProcessor;
    use crate::cache::response_slot::ResponseSlot;
    use crate::error::ProcessError;
    use crate::header::Stamped;
    use crate::publish::Channel;
    use crate::test_support::{RecordingPort, ScriptedSolver, FAILING_REQUEST};
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use up_rust::UCode;

    fn processor() -> (
        RequestProcessor<ScriptedSolver>,
        Arc<ResponseSlot<crate::test_support::RouteResponse>>,
        Arc<RecordingPort>,
    ) {
        let slot = Arc::new(ResponseSlot::new());
        let port = Arc::new(RecordingPort::default());
        let processor = RequestProcessor::new(
            "routing",
            ScriptedSolver::default(),
            slot.clone(),
            port.clone(),
        );
        (processor, slot, port)
    }

    #[tokio::test]
    async fn successful_request_publishes_once_and_updates_slot() {
        let (processor, slot, port) = processor();

        let committed = processor
            .process(&"depot".to_string())
            .await
            .expect("request should succeed");

        let primary = port.published_on(Channel::Primary);
        assert_eq!(primary.len(), 1);
        assert_eq!(primary[0], *committed);
        assert!(port.published_on(Channel::KeepAlive).is_empty());
        assert_eq!(slot.get().as_deref(), Some(&*committed));
        assert_eq!(committed.route, "route-to-depot");
        assert_eq!(committed.header().module_name, "routing");
    }

    #[tokio::test]
    async fn solver_failure_publishes_nothing_and_keeps_prior_value() {
        let (processor, slot, port) = processor();
        let prior = processor.process(&"depot".to_string()).await.unwrap();

        let err = processor
            .process(&FAILING_REQUEST.to_string())
            .await
            .expect_err("solver should fail");

        assert!(matches!(err, ProcessError::Solver(_)));
        assert_eq!(err.status().code.enum_value_or_default(), UCode::NOT_FOUND);
        assert_eq!(port.published_on(Channel::Primary).len(), 1);
        assert!(Arc::ptr_eq(&slot.get().expect("prior value kept"), &prior));
    }

    #[tokio::test]
    async fn solver_failure_on_fresh_processor_leaves_slot_empty() {
        let (processor, slot, port) = processor();

        assert!(processor
            .process(&FAILING_REQUEST.to_string())
            .await
            .is_err());

        assert!(slot.get().is_none());
        assert!(port.published_on(Channel::Primary).is_empty());
    }

    #[tokio::test]
    async fn publish_failure_does_not_poison_the_cache() {
        let (processor, slot, port) = processor();
        port.reject(Channel::Primary, true);

        let err = processor
            .process(&"depot".to_string())
            .await
            .expect_err("publish should fail");

        assert!(matches!(
            err,
            ProcessError::Publish {
                channel: Channel::Primary,
                ..
            }
        ));
        assert!(slot.get().is_none());
        assert_eq!(processor.solver().solve_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn sequence_numbers_increase_per_solved_request() {
        let (processor, _slot, _port) = processor();

        let first = processor.process(&"a".to_string()).await.unwrap();
        let _ = processor.process(&FAILING_REQUEST.to_string()).await;
        let second = processor.process(&"b".to_string()).await.unwrap();

        assert_eq!(first.header().sequence_num, 0);
        assert_eq!(second.header().sequence_num, 1);
        assert!(second.header().timestamp >= first.header().timestamp);
    }
}
