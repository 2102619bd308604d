use crate::client::GatewayClient;
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::routes;
use crate::transport::Transport;
use crate::types::{Card, IssueCardRequest};

/// Client for `/api/v1/cards`.
pub struct CardsClient<'a, T> {
    gateway: &'a GatewayClient<T>,
}

impl<'a, T: Transport> CardsClient<'a, T> {
    pub(crate) fn new(gateway: &'a GatewayClient<T>) -> Self {
        Self { gateway }
    }

    pub fn issue_virtual_card_api(&self, request: &IssueCardRequest) -> Result<HttpResponse, ApiError> {
        self.gateway.send(&routes::ISSUE_VIRTUAL_CARD, request)
    }

    pub fn issue_virtual_card(&self, user_id: &str, account_id: &str) -> Result<Card, ApiError> {
        let response = self.issue_virtual_card_api(&for_account(user_id, account_id))?;
        self.gateway.parse_one(&routes::ISSUE_VIRTUAL_CARD, response)
    }

    pub fn issue_physical_card_api(&self, request: &IssueCardRequest) -> Result<HttpResponse, ApiError> {
        self.gateway.send(&routes::ISSUE_PHYSICAL_CARD, request)
    }

    pub fn issue_physical_card(&self, user_id: &str, account_id: &str) -> Result<Card, ApiError> {
        let response = self.issue_physical_card_api(&for_account(user_id, account_id))?;
        self.gateway.parse_one(&routes::ISSUE_PHYSICAL_CARD, response)
    }
}

fn for_account(user_id: &str, account_id: &str) -> IssueCardRequest {
    IssueCardRequest {
        user_id: user_id.to_string(),
        account_id: account_id.to_string(),
    }
}
