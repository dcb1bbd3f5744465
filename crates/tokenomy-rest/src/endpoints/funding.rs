//! Funding endpoints for withdrawals
//!
//! These endpoints require authentication.

use crate::dispatch::Dispatcher;
use crate::error::RestResult;
use crate::request::Operation;
use crate::types::{WithdrawRequest, WithdrawResult};
use tracing::{debug, instrument};

/// Funding endpoints
pub struct FundingEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> FundingEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Withdraw to an external address
    ///
    /// # Arguments
    /// * `request` - Currency, address, amount, optional memo and request id
    #[instrument(skip(self, request), fields(currency = %request.currency, request_id = %request.request_id))]
    pub async fn withdraw(&self, request: &WithdrawRequest) -> RestResult<WithdrawResult> {
        let params = request.to_params()?;

        debug!("Withdrawing {} {}", request.amount, request.currency);

        self.dispatcher
            .private(Operation::Withdraw, None, params)
            .await
    }
}
