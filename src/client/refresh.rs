//! Single-flight access-token renewal with FIFO replay of queued requests.
//!
//! When an authenticated request comes back with a 401, the pipeline asks the
//! [`RefreshCoordinator`] for admission. The first failing request becomes the lead: it
//! flips the coordinator to `Refreshing` and performs the renewal call. Requests that
//! fail while the renewal is in flight are suspended as pending records instead of
//! triggering a second call. Once the renewal settles, the lead replays its own request
//! and then every queued record in FIFO order with the new token—or rejects all of them
//! with the renewal error after clearing the stored credentials.

// std
use std::mem;
// crates.io
use tokio::sync::oneshot;
// self
use crate::{
	_prelude::*,
	client::ApiClient,
	http::{ApiRequest, HttpTransport, RawResponse},
	store::TokenKind,
	token::TokenSecret,
};

/// One delivery attempt of a logical request, carrying the explicit retried flag.
///
/// A request is replayed at most once: an attempt that already went through a renewal
/// cycle propagates a second authentication failure instead of queueing again.
#[derive(Clone, Debug)]
pub(crate) struct RequestAttempt {
	pub(crate) request: ApiRequest,
	pub(crate) retried: bool,
}
impl RequestAttempt {
	fn first(request: ApiRequest) -> Self {
		Self { request, retried: false }
	}

	fn into_retry(mut self) -> Self {
		self.retried = true;

		self
	}
}

/// A request suspended while a renewal is in flight; settled exactly once.
struct Waiter {
	attempt: RequestAttempt,
	settled: oneshot::Sender<Result<RawResponse>>,
}

enum State {
	Idle,
	Refreshing { queue: Vec<Waiter> },
}

/// Outcome of asking the coordinator for admission after an authentication failure.
enum Admission {
	/// The caller owns the renewal call.
	Lead(RequestAttempt),
	/// A renewal is already in flight; await settlement.
	Wait(oneshot::Receiver<Result<RawResponse>>),
}

/// Process-wide renewal state machine: `Idle` or `Refreshing` with a pending queue.
///
/// The check-and-set in [`admit`](Self::admit) happens under a single mutex acquisition,
/// so no two leads can be elected for the same renewal window.
#[derive(Default)]
pub(crate) struct RefreshCoordinator {
	state: Mutex<State>,
}
impl RefreshCoordinator {
	fn admit(&self, attempt: RequestAttempt) -> Admission {
		let mut state = self.state.lock();

		match &mut *state {
			State::Idle => {
				*state = State::Refreshing { queue: Vec::new() };

				Admission::Lead(attempt)
			},
			State::Refreshing { queue } => {
				let (tx, rx) = oneshot::channel();

				queue.push(Waiter { attempt, settled: tx });

				Admission::Wait(rx)
			},
		}
	}

	/// Returns the pending queue in enqueue order and transitions back to `Idle`.
	fn settle(&self) -> Vec<Waiter> {
		match mem::replace(&mut *self.state.lock(), State::Idle) {
			State::Refreshing { queue } => queue,
			State::Idle => Vec::new(),
		}
	}
}
impl Default for State {
	fn default() -> Self {
		Self::Idle
	}
}

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Executes a request with stored-token injection and transparent renewal on 401.
	///
	/// The returned response may still carry a non-2xx status; callers decode it against
	/// the envelope protocol. Only authentication failures engage the coordinator, and
	/// only on a request's first attempt.
	pub async fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
		self.execute_attempt(RequestAttempt::first(request)).await
	}

	async fn execute_attempt(&self, attempt: RequestAttempt) -> Result<RawResponse> {
		let bearer = self.stored_access_token().await;
		let response = self.dispatch(&attempt.request, bearer.as_ref().map(TokenSecret::expose)).await?;

		if !response.is_auth_failure() || attempt.retried {
			return Ok(response);
		}

		match self.refresh.admit(attempt.into_retry()) {
			Admission::Lead(attempt) => self.lead_renewal(attempt).await,
			Admission::Wait(rx) => rx.await.unwrap_or_else(|_| {
				Err(Error::RenewalFailed {
					message: "The renewal task was dropped before settling this request.".into(),
				})
			}),
		}
	}

	/// Performs the renewal call as the elected lead, then settles the pending queue.
	async fn lead_renewal(&self, attempt: RequestAttempt) -> Result<RawResponse> {
		match self.renew_access_token().await {
			Ok(access) => {
				self.persist_token(TokenKind::Access, access.clone()).await;
				tracing::info!("access token renewed");

				let pending = self.refresh.settle();
				let trigger = self.dispatch(&attempt.request, Some(access.expose())).await;

				for waiter in pending {
					let replay =
						self.dispatch(&waiter.attempt.request, Some(access.expose())).await;
					let _ = waiter.settled.send(replay);
				}

				trigger
			},
			Err(message) => {
				tracing::warn!(%message, "access token renewal failed; clearing session");

				let pending = self.refresh.settle();

				self.discard_token(TokenKind::Access).await;
				self.discard_token(TokenKind::Refresh).await;

				for waiter in pending {
					let _ = waiter
						.settled
						.send(Err(Error::RenewalFailed { message: message.clone() }));
				}

				Err(Error::RenewalFailed { message })
			},
		}
	}

	/// Exchanges the stored refresh token for a new access token under the renewal
	/// timeout. Failures are flattened to a message: the session is torn down either way.
	async fn renew_access_token(&self) -> Result<TokenSecret, String> {
		let refresh = match self.store.get(TokenKind::Refresh).await {
			Ok(Some(secret)) => secret,
			Ok(None) => return Err("No refresh token is available to renew the session.".into()),
			Err(err) => {
				// Store failures degrade to token absence, matching the pipeline policy.
				tracing::warn!(%err, "token store read failed during renewal");

				return Err("No refresh token is available to renew the session.".into());
			},
		};

		match tokio::time::timeout(self.renewal_timeout, self.renew_with(&refresh)).await {
			Ok(Ok(secret)) => Ok(secret),
			Ok(Err(err)) => Err(err.to_string()),
			Err(_) => Err(format!(
				"The renewal call did not complete within {:?}.",
				self.renewal_timeout
			)),
		}
	}
}
