use crate::client::GatewayClient;
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::routes;
use crate::schema::{construct, Fields};
use crate::transport::Transport;
use crate::types::{
    Document, GetOperationRequest, MakeOperationRequest, MakePurchaseOperationRequest, Operation,
    OperationsQuery, OperationsSummary,
};

/// Client for `/api/v1/operations`.
///
/// The make-operation conveniences take only the card and account; status,
/// amount and (for purchases) category come from the schema defaults.
pub struct OperationsClient<'a, T> {
    gateway: &'a GatewayClient<T>,
}

impl<'a, T: Transport> OperationsClient<'a, T> {
    pub(crate) fn new(gateway: &'a GatewayClient<T>) -> Self {
        Self { gateway }
    }

    pub fn get_operation_api(&self, request: &GetOperationRequest) -> Result<HttpResponse, ApiError> {
        self.gateway.send(&routes::GET_OPERATION, request)
    }

    pub fn get_operation(&self, operation_id: &str) -> Result<Operation, ApiError> {
        let response = self.get_operation_api(&by_id(operation_id))?;
        self.gateway.parse_one(&routes::GET_OPERATION, response)
    }

    pub fn get_operation_receipt_api(&self, request: &GetOperationRequest) -> Result<HttpResponse, ApiError> {
        self.gateway.send(&routes::GET_OPERATION_RECEIPT, request)
    }

    pub fn get_operation_receipt(&self, operation_id: &str) -> Result<Document, ApiError> {
        let response = self.get_operation_receipt_api(&by_id(operation_id))?;
        self.gateway.parse_one(&routes::GET_OPERATION_RECEIPT, response)
    }

    pub fn get_operations_api(&self, query: &OperationsQuery) -> Result<HttpResponse, ApiError> {
        self.gateway.send(&routes::GET_OPERATIONS, query)
    }

    pub fn get_operations(&self, account_id: &str) -> Result<Vec<Operation>, ApiError> {
        let response = self.get_operations_api(&by_account(account_id))?;
        self.gateway.parse_list(&routes::GET_OPERATIONS, response)
    }

    pub fn get_operations_summary_api(&self, query: &OperationsQuery) -> Result<HttpResponse, ApiError> {
        self.gateway.send(&routes::GET_OPERATIONS_SUMMARY, query)
    }

    pub fn get_operations_summary(&self, account_id: &str) -> Result<OperationsSummary, ApiError> {
        let response = self.get_operations_summary_api(&by_account(account_id))?;
        self.gateway.parse_one(&routes::GET_OPERATIONS_SUMMARY, response)
    }

    pub fn make_fee_operation_api(&self, request: &MakeOperationRequest) -> Result<HttpResponse, ApiError> {
        self.gateway.send(&routes::MAKE_FEE_OPERATION, request)
    }

    pub fn make_fee_operation(&self, card_id: &str, account_id: &str) -> Result<Operation, ApiError> {
        let request: MakeOperationRequest = construct(card_and_account(card_id, account_id))?;
        let response = self.make_fee_operation_api(&request)?;
        self.gateway.parse_one(&routes::MAKE_FEE_OPERATION, response)
    }

    pub fn make_top_up_operation_api(&self, request: &MakeOperationRequest) -> Result<HttpResponse, ApiError> {
        self.gateway.send(&routes::MAKE_TOP_UP_OPERATION, request)
    }

    pub fn make_top_up_operation(&self, card_id: &str, account_id: &str) -> Result<Operation, ApiError> {
        let request: MakeOperationRequest = construct(card_and_account(card_id, account_id))?;
        let response = self.make_top_up_operation_api(&request)?;
        self.gateway.parse_one(&routes::MAKE_TOP_UP_OPERATION, response)
    }

    pub fn make_cashback_operation_api(&self, request: &MakeOperationRequest) -> Result<HttpResponse, ApiError> {
        self.gateway.send(&routes::MAKE_CASHBACK_OPERATION, request)
    }

    pub fn make_cashback_operation(&self, card_id: &str, account_id: &str) -> Result<Operation, ApiError> {
        let request: MakeOperationRequest = construct(card_and_account(card_id, account_id))?;
        let response = self.make_cashback_operation_api(&request)?;
        self.gateway.parse_one(&routes::MAKE_CASHBACK_OPERATION, response)
    }

    pub fn make_transfer_operation_api(&self, request: &MakeOperationRequest) -> Result<HttpResponse, ApiError> {
        self.gateway.send(&routes::MAKE_TRANSFER_OPERATION, request)
    }

    pub fn make_transfer_operation(&self, card_id: &str, account_id: &str) -> Result<Operation, ApiError> {
        let request: MakeOperationRequest = construct(card_and_account(card_id, account_id))?;
        let response = self.make_transfer_operation_api(&request)?;
        self.gateway.parse_one(&routes::MAKE_TRANSFER_OPERATION, response)
    }

    pub fn make_bill_payment_operation_api(&self, request: &MakeOperationRequest) -> Result<HttpResponse, ApiError> {
        self.gateway.send(&routes::MAKE_BILL_PAYMENT_OPERATION, request)
    }

    pub fn make_bill_payment_operation(&self, card_id: &str, account_id: &str) -> Result<Operation, ApiError> {
        let request: MakeOperationRequest = construct(card_and_account(card_id, account_id))?;
        let response = self.make_bill_payment_operation_api(&request)?;
        self.gateway.parse_one(&routes::MAKE_BILL_PAYMENT_OPERATION, response)
    }

    pub fn make_cash_withdrawal_operation_api(
        &self,
        request: &MakeOperationRequest,
    ) -> Result<HttpResponse, ApiError> {
        self.gateway.send(&routes::MAKE_CASH_WITHDRAWAL_OPERATION, request)
    }

    pub fn make_cash_withdrawal_operation(&self, card_id: &str, account_id: &str) -> Result<Operation, ApiError> {
        let request: MakeOperationRequest = construct(card_and_account(card_id, account_id))?;
        let response = self.make_cash_withdrawal_operation_api(&request)?;
        self.gateway.parse_one(&routes::MAKE_CASH_WITHDRAWAL_OPERATION, response)
    }

    pub fn make_purchase_operation_api(
        &self,
        request: &MakePurchaseOperationRequest,
    ) -> Result<HttpResponse, ApiError> {
        self.gateway.send(&routes::MAKE_PURCHASE_OPERATION, request)
    }

    pub fn make_purchase_operation(&self, card_id: &str, account_id: &str) -> Result<Operation, ApiError> {
        let request: MakePurchaseOperationRequest = construct(card_and_account(card_id, account_id))?;
        let response = self.make_purchase_operation_api(&request)?;
        self.gateway.parse_one(&routes::MAKE_PURCHASE_OPERATION, response)
    }

}

fn by_id(operation_id: &str) -> GetOperationRequest {
    GetOperationRequest {
        operation_id: operation_id.to_string(),
    }
}

fn by_account(account_id: &str) -> OperationsQuery {
    OperationsQuery {
        account_id: account_id.to_string(),
    }
}

fn card_and_account(card_id: &str, account_id: &str) -> Fields {
    Fields::new().with("card_id", card_id).with("account_id", account_id)
}
