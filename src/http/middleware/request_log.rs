//! Request logging adapter.
//!
//! [`RequestLogLayer`] wraps any service that handles `Request<B>` and
//! returns an axum [`Response`]. For every call it captures a snapshot,
//! encodes it, records it to the injected [`LogSink`], and only then hands the
//! untouched request to the inner service.
//!
//! Layers compose with `tower::ServiceBuilder`; the first layer listed is the
//! outermost and sees the request first. Each layer captures its own
//! snapshot, so stacked layers log independent timestamps.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{body::Body, http::Request, response::Response};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use crate::config::{Detail, FailurePolicy, RequestLogConfig};
use crate::http::codec::encode;
use crate::http::snapshot::{RequestSnapshot, RequestSnapshotSimple, Snapshot};
use crate::observability::{LogSink, Record};

/// Layer that logs a `T` snapshot of every request before forwarding it.
pub struct RequestLogLayer<T = RequestSnapshot> {
    sink: Arc<dyn LogSink>,
    on_failure: FailurePolicy,
    _snapshot: PhantomData<fn() -> T>,
}

impl RequestLogLayer<RequestSnapshot> {
    /// Log full request metadata.
    pub fn full(sink: Arc<dyn LogSink>) -> Self {
        Self::new(sink)
    }
}

impl RequestLogLayer<RequestSnapshotSimple> {
    /// Log method and path only.
    pub fn simple(sink: Arc<dyn LogSink>) -> Self {
        Self::new(sink)
    }
}

impl<T> RequestLogLayer<T> {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            on_failure: FailurePolicy::default(),
            _snapshot: PhantomData,
        }
    }

    /// Layer carrying the failure policy from `config`.
    pub fn from_config(config: &RequestLogConfig, sink: Arc<dyn LogSink>) -> Self {
        Self::new(sink).on_failure(config.on_encode_failure)
    }

    /// Set what happens when a snapshot cannot be encoded.
    pub fn on_failure(mut self, policy: FailurePolicy) -> Self {
        self.on_failure = policy;
        self
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.on_failure
    }
}

impl<T> Clone for RequestLogLayer<T> {
    fn clone(&self) -> Self {
        Self {
            sink: self.sink.clone(),
            on_failure: self.on_failure,
            _snapshot: PhantomData,
        }
    }
}

impl<T> fmt::Debug for RequestLogLayer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestLogLayer")
            .field("on_failure", &self.on_failure)
            .finish_non_exhaustive()
    }
}

impl<S, T> Layer<S> for RequestLogLayer<T> {
    type Service = RequestLog<S, T>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLog {
            inner,
            sink: self.sink.clone(),
            on_failure: self.on_failure,
            _snapshot: PhantomData,
        }
    }
}

/// Service produced by [`RequestLogLayer`].
pub struct RequestLog<S, T> {
    inner: S,
    sink: Arc<dyn LogSink>,
    on_failure: FailurePolicy,
    _snapshot: PhantomData<fn() -> T>,
}

impl<S: Clone, T> Clone for RequestLog<S, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            sink: self.sink.clone(),
            on_failure: self.on_failure,
            _snapshot: PhantomData,
        }
    }
}

impl<S, T, B> Service<Request<B>> for RequestLog<S, T>
where
    S: Service<Request<B>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    T: Snapshot,
    B: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        let snapshot = T::capture(&request);

        match encode(&snapshot) {
            Ok(json) => {
                self.sink
                    .record_info(Record::new().with("received request:").with(json));
            }
            Err(e) => {
                self.sink.record_error(Record::new().with(&e));
                if self.on_failure == FailurePolicy::Abandon {
                    return Box::pin(async { Ok(Response::new(Body::empty())) });
                }
            }
        }

        // The clone may not be ready; keep the one that was polled.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move { inner.call(request).await })
    }
}

/// Apply the configured logging adapter to an axum router.
pub fn apply<St>(
    router: axum::Router<St>,
    config: &RequestLogConfig,
    sink: Arc<dyn LogSink>,
) -> axum::Router<St>
where
    St: Clone + Send + Sync + 'static,
{
    if !config.enabled {
        return router;
    }
    match config.detail {
        Detail::Full => {
            router.layer(RequestLogLayer::<RequestSnapshot>::from_config(config, sink))
        }
        Detail::Simple => {
            router.layer(RequestLogLayer::<RequestSnapshotSimple>::from_config(config, sink))
        }
    }
}
