//! One call, end to end: build, send, decode

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokenomy_auth::Environment;
use tokenomy_types::PairRegistry;
use tracing::debug;

use crate::envelope::{decode_private, decode_public};
use crate::error::RestResult;
use crate::request::{Operation, Params, RequestBuilder, SignedRequest};
use crate::transport::{RawResponse, Transport};

/// Shared state behind every endpoint group
///
/// Cheap to clone; everything inside is read-only.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    registry: Arc<PairRegistry>,
    env: Arc<Environment>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>, registry: PairRegistry, env: Environment) -> Self {
        Self {
            transport,
            registry: Arc::new(registry),
            env: Arc::new(env),
        }
    }

    pub(crate) fn set_registry(&mut self, registry: PairRegistry) {
        self.registry = Arc::new(registry);
    }

    /// Pairs accepted by this dispatcher
    pub fn registry(&self) -> &PairRegistry {
        &self.registry
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Request builder over this dispatcher's registry and credentials
    pub fn request_builder(&self) -> RequestBuilder<'_> {
        RequestBuilder::new(&self.registry, self.env.credentials())
    }

    /// Issue a public operation and decode its payload
    pub async fn public<T: DeserializeOwned>(
        &self,
        operation: Operation,
        pair: Option<&str>,
        query: Params,
    ) -> RestResult<T> {
        let request = self.request_builder().public(operation, pair, query)?;
        let raw = self.round_trip(request).await?;
        decode_public(&raw)
    }

    /// Issue a private operation and decode its payload
    pub async fn private<T: DeserializeOwned>(
        &self,
        operation: Operation,
        pair: Option<&str>,
        params: Params,
    ) -> RestResult<T> {
        let request = self.request_builder().private(operation, pair, params)?;
        let raw = self.round_trip(request).await?;
        decode_private(&raw)
    }

    async fn round_trip(&self, request: SignedRequest) -> RestResult<RawResponse> {
        let log_wire = self.env.debug().logs_wire();
        let operation = request.operation;

        if log_wire {
            debug!(
                %operation,
                method = request.method.as_str(),
                path = %request.path,
                params = ?request.params,
                "Sending request"
            );
        }

        let raw = self.transport.send(request).await?;

        if log_wire {
            debug!(%operation, status = raw.status, body = %raw.text(), "Received response");
        }

        Ok(raw)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("address", &self.env.address())
            .field("has_credentials", &self.env.has_credentials())
            .field("pairs", &self.registry.len())
            .finish()
    }
}
