use crate::client::GatewayClient;
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::routes;
use crate::transport::Transport;
use crate::types::{Document, GetDocumentRequest};

/// Client for `/api/v1/documents`.
pub struct DocumentsClient<'a, T> {
    gateway: &'a GatewayClient<T>,
}

impl<'a, T: Transport> DocumentsClient<'a, T> {
    pub(crate) fn new(gateway: &'a GatewayClient<T>) -> Self {
        Self { gateway }
    }

    pub fn get_tariff_document_api(&self, request: &GetDocumentRequest) -> Result<HttpResponse, ApiError> {
        self.gateway.send(&routes::GET_TARIFF_DOCUMENT, request)
    }

    pub fn get_tariff_document(&self, account_id: &str) -> Result<Document, ApiError> {
        let response = self.get_tariff_document_api(&for_account(account_id))?;
        self.gateway.parse_one(&routes::GET_TARIFF_DOCUMENT, response)
    }

    pub fn get_contract_document_api(&self, request: &GetDocumentRequest) -> Result<HttpResponse, ApiError> {
        self.gateway.send(&routes::GET_CONTRACT_DOCUMENT, request)
    }

    pub fn get_contract_document(&self, account_id: &str) -> Result<Document, ApiError> {
        let response = self.get_contract_document_api(&for_account(account_id))?;
        self.gateway.parse_one(&routes::GET_CONTRACT_DOCUMENT, response)
    }
}

fn for_account(account_id: &str) -> GetDocumentRequest {
    GetDocumentRequest {
        account_id: account_id.to_string(),
    }
}
