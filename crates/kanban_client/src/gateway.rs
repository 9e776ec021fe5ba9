//! Request gateway and operation status.
//!
//! Every outbound call goes through [`Gateway`]. It records the call in the
//! shared [`OperationStatus`], awaits the transport, and normalizes any
//! failure into a [`RequestFailure`] whose message follows one fixed
//! precedence:
//!
//! 1. a server-supplied `result` field, verbatim
//! 2. 401: `could not <description> (unauthorized)`
//! 3. 404: `could not <description> (server path not valid)`
//! 4. anything else: `could not <description> (no connection?)`
//!
//! # Concurrency
//!
//! The status slot is last-settled-wins: when two calls overlap, the one
//! that settles last decides `busy`, `error` and `message`. Callers that
//! need the outcome of their own call use the returned `Result`; observers
//! that need every transition subscribe to [`StatusEvent`]s, which are
//! published in the order the gateway applies them.
//!
//! A call whose future is dropped before it settles is cancelled: it leaves
//! `in_flight`, and once nothing else is pending the status stops being busy.

use crate::error::{FailureKind, RequestFailure};
use crate::http::{HttpResponse, TransportError};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;

/// Capacity of the status event channel.
const EVENT_CAPACITY: usize = 64;

/// Snapshot of the most recently settled call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationStatus {
    /// True while the last begun call has not settled.
    pub busy: bool,
    /// True if the last settled call failed.
    pub error: bool,
    /// Description while busy, failure message after a failure, empty otherwise.
    pub message: String,
    /// Calls begun but not yet settled.
    pub in_flight: usize,
    /// Id of the last settled call.
    pub last_call: Option<u64>,
}

impl OperationStatus {
    /// Returns true if nothing is running and the last call succeeded.
    pub fn is_idle(&self) -> bool {
        !self.busy && !self.error
    }
}

/// A status transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusPhase {
    /// The call was issued.
    Started {
        /// Operation description.
        description: String,
    },
    /// The call succeeded.
    Succeeded,
    /// The call failed.
    Failed {
        /// Failure message.
        message: String,
        /// Failure classification.
        kind: FailureKind,
    },
    /// The caller dropped the call before it settled.
    Cancelled,
}

/// A status transition of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEvent {
    /// Gateway-assigned call id, increasing in issue order.
    pub call_id: u64,
    /// What happened.
    pub phase: StatusPhase,
}

/// Normalizes a failed call into a [`RequestFailure`].
///
/// `response` is `None` when no response was received.
pub fn map_failure(description: &str, response: Option<&HttpResponse>) -> RequestFailure {
    let status = response.map(|r| r.status);
    let detail = response.and_then(HttpResponse::result_detail);

    let kind = match (status, detail.is_some()) {
        (None, _) => FailureKind::Transport,
        (Some(401), _) => FailureKind::Unauthorized,
        (Some(404), _) => FailureKind::NotFound,
        (Some(409), true) => FailureKind::Conflict,
        (Some(_), true) => FailureKind::ServerDetail,
        (Some(_), false) => FailureKind::Other,
    };

    let message = detail.unwrap_or_else(|| match status {
        Some(401) => format!("could not {description} (unauthorized)"),
        Some(404) => format!("could not {description} (server path not valid)"),
        _ => format!("could not {description} (no connection?)"),
    });

    RequestFailure {
        message,
        kind,
        status,
    }
}

/// Failure for a successful response whose body does not decode.
fn invalid_response(description: &str, status: u16) -> RequestFailure {
    RequestFailure {
        message: format!("could not {description} (invalid response)"),
        kind: FailureKind::InvalidResponse,
        status: Some(status),
    }
}

/// Wraps outbound calls with status tracking and failure mapping.
#[derive(Debug)]
pub struct Gateway {
    status: RwLock<OperationStatus>,
    events: broadcast::Sender<StatusEvent>,
    next_call: AtomicU64,
}

impl Gateway {
    /// Creates a gateway with an idle status.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            status: RwLock::new(OperationStatus::default()),
            events,
            next_call: AtomicU64::new(1),
        }
    }

    /// Returns a snapshot of the operation status.
    pub fn status(&self) -> OperationStatus {
        self.status.read().clone()
    }

    /// Subscribes to status transitions from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<StatusEvent> {
        self.events.subscribe()
    }

    /// Runs a call and returns the raw response on success.
    pub async fn handle<F>(
        &self,
        call: F,
        description: &str,
    ) -> Result<HttpResponse, RequestFailure>
    where
        F: Future<Output = Result<HttpResponse, TransportError>>,
    {
        self.run(call, description, Ok).await
    }

    /// Runs a call and decodes its JSON body.
    pub async fn handle_json<T, F>(&self, call: F, description: &str) -> Result<T, RequestFailure>
    where
        T: DeserializeOwned,
        F: Future<Output = Result<HttpResponse, TransportError>>,
    {
        self.run(call, description, |response| {
            response
                .json()
                .map_err(|e| (response.status, e.to_string()))
        })
        .await
    }

    /// Runs a call and discards its body.
    pub async fn handle_unit<F>(&self, call: F, description: &str) -> Result<(), RequestFailure>
    where
        F: Future<Output = Result<HttpResponse, TransportError>>,
    {
        self.run(call, description, |_| Ok(())).await
    }

    async fn run<T, F, D>(
        &self,
        call: F,
        description: &str,
        decode: D,
    ) -> Result<T, RequestFailure>
    where
        F: Future<Output = Result<HttpResponse, TransportError>>,
        D: FnOnce(HttpResponse) -> Result<T, (u16, String)>,
    {
        let pending = self.begin(description);
        let call_id = pending.call_id;

        let outcome = match call.await {
            Ok(response) if response.is_success() => {
                decode(response).map_err(|(status, error)| {
                    tracing::debug!(call_id, description, %error, "response body did not decode");
                    invalid_response(description, status)
                })
            }
            Ok(response) => Err(map_failure(description, Some(&response))),
            Err(error) => {
                tracing::debug!(call_id, description, %error, "transport failure");
                Err(map_failure(description, None))
            }
        };

        match &outcome {
            Ok(_) => pending.succeed(),
            Err(failure) => pending.fail(failure),
        }
        outcome
    }

    fn begin(&self, description: &str) -> PendingCall<'_> {
        let call_id = self.next_call.fetch_add(1, Ordering::SeqCst);
        let mut status = self.status.write();
        status.busy = true;
        status.error = false;
        status.message = description.to_string();
        status.in_flight += 1;
        tracing::debug!(call_id, description, in_flight = status.in_flight, "call started");
        self.publish(
            call_id,
            StatusPhase::Started {
                description: description.to_string(),
            },
        );
        PendingCall {
            gateway: self,
            call_id,
            settled: false,
        }
    }

    fn succeed(&self, call_id: u64) {
        let mut status = self.status.write();
        status.busy = false;
        status.error = false;
        status.message.clear();
        status.in_flight = status.in_flight.saturating_sub(1);
        status.last_call = Some(call_id);
        tracing::debug!(call_id, in_flight = status.in_flight, "call succeeded");
        self.publish(call_id, StatusPhase::Succeeded);
    }

    fn fail(&self, call_id: u64, failure: &RequestFailure) {
        let mut status = self.status.write();
        status.busy = false;
        status.error = true;
        status.message = failure.message.clone();
        status.in_flight = status.in_flight.saturating_sub(1);
        status.last_call = Some(call_id);
        tracing::warn!(
            call_id,
            status = ?failure.status,
            kind = ?failure.kind,
            message = %failure.message,
            "call failed"
        );
        self.publish(
            call_id,
            StatusPhase::Failed {
                message: failure.message.clone(),
                kind: failure.kind,
            },
        );
    }

    fn cancel(&self, call_id: u64) {
        let mut status = self.status.write();
        status.in_flight = status.in_flight.saturating_sub(1);
        if status.in_flight == 0 && status.busy {
            status.busy = false;
            status.message.clear();
        }
        tracing::debug!(call_id, in_flight = status.in_flight, "call cancelled");
        self.publish(call_id, StatusPhase::Cancelled);
    }

    // Called with the status lock held so events follow status order.
    fn publish(&self, call_id: u64, phase: StatusPhase) {
        let _ = self.events.send(StatusEvent { call_id, phase });
    }
}

/// A begun call. Dropping it before it settles cancels the call.
struct PendingCall<'a> {
    gateway: &'a Gateway,
    call_id: u64,
    settled: bool,
}

impl PendingCall<'_> {
    fn succeed(mut self) {
        self.settled = true;
        self.gateway.succeed(self.call_id);
    }

    fn fail(mut self, failure: &RequestFailure) {
        self.settled = true;
        self.gateway.fail(self.call_id, failure);
    }
}

impl Drop for PendingCall<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.gateway.cancel(self.call_id);
        }
    }
}

impl Default for Gateway {
    fn default() -> Self {
        Self::new()
    }
}
