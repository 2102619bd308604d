use crate::client::GatewayClient;
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::routes;
use crate::transport::Transport;
use crate::types::{Account, GetAccountsQuery, OpenAccountRequest};

/// Client for `/api/v1/accounts`.
pub struct AccountsClient<'a, T> {
    gateway: &'a GatewayClient<T>,
}

impl<'a, T: Transport> AccountsClient<'a, T> {
    pub(crate) fn new(gateway: &'a GatewayClient<T>) -> Self {
        Self { gateway }
    }

    pub fn open_deposit_account_api(&self, request: &OpenAccountRequest) -> Result<HttpResponse, ApiError> {
        self.gateway.send(&routes::OPEN_DEPOSIT_ACCOUNT, request)
    }

    pub fn open_deposit_account(&self, user_id: &str) -> Result<Account, ApiError> {
        let response = self.open_deposit_account_api(&for_user(user_id))?;
        self.gateway.parse_one(&routes::OPEN_DEPOSIT_ACCOUNT, response)
    }

    pub fn open_savings_account_api(&self, request: &OpenAccountRequest) -> Result<HttpResponse, ApiError> {
        self.gateway.send(&routes::OPEN_SAVINGS_ACCOUNT, request)
    }

    pub fn open_savings_account(&self, user_id: &str) -> Result<Account, ApiError> {
        let response = self.open_savings_account_api(&for_user(user_id))?;
        self.gateway.parse_one(&routes::OPEN_SAVINGS_ACCOUNT, response)
    }

    pub fn open_debit_card_account_api(&self, request: &OpenAccountRequest) -> Result<HttpResponse, ApiError> {
        self.gateway.send(&routes::OPEN_DEBIT_CARD_ACCOUNT, request)
    }

    /// Open a debit card account; the gateway issues its first card.
    pub fn open_debit_card_account(&self, user_id: &str) -> Result<Account, ApiError> {
        let response = self.open_debit_card_account_api(&for_user(user_id))?;
        self.gateway.parse_one(&routes::OPEN_DEBIT_CARD_ACCOUNT, response)
    }

    pub fn open_credit_card_account_api(&self, request: &OpenAccountRequest) -> Result<HttpResponse, ApiError> {
        self.gateway.send(&routes::OPEN_CREDIT_CARD_ACCOUNT, request)
    }

    /// Open a credit card account; the gateway issues its first card.
    pub fn open_credit_card_account(&self, user_id: &str) -> Result<Account, ApiError> {
        let response = self.open_credit_card_account_api(&for_user(user_id))?;
        self.gateway.parse_one(&routes::OPEN_CREDIT_CARD_ACCOUNT, response)
    }

    pub fn get_accounts_api(&self, query: &GetAccountsQuery) -> Result<HttpResponse, ApiError> {
        self.gateway.send(&routes::GET_ACCOUNTS, query)
    }

    pub fn get_accounts(&self, user_id: &str) -> Result<Vec<Account>, ApiError> {
        let query = GetAccountsQuery {
            user_id: user_id.to_string(),
        };
        let response = self.get_accounts_api(&query)?;
        self.gateway.parse_list(&routes::GET_ACCOUNTS, response)
    }
}

fn for_user(user_id: &str) -> OpenAccountRequest {
    OpenAccountRequest {
        user_id: user_id.to_string(),
    }
}
