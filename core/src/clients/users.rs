use crate::client::GatewayClient;
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::routes;
use crate::schema::{construct, Fields};
use crate::transport::Transport;
use crate::types::{CreateUserRequest, GetUserRequest, User};

/// Client for `/api/v1/users`.
pub struct UsersClient<'a, T> {
    gateway: &'a GatewayClient<T>,
}

impl<'a, T: Transport> UsersClient<'a, T> {
    pub(crate) fn new(gateway: &'a GatewayClient<T>) -> Self {
        Self { gateway }
    }

    pub fn create_user_api(&self, request: &CreateUserRequest) -> Result<HttpResponse, ApiError> {
        self.gateway.send(&routes::CREATE_USER, request)
    }

    /// Register a user with generated contact details.
    pub fn create_user(&self) -> Result<User, ApiError> {
        let request: CreateUserRequest = construct(Fields::new())?;
        let response = self.create_user_api(&request)?;
        self.gateway.parse_one(&routes::CREATE_USER, response)
    }

    pub fn get_user_api(&self, request: &GetUserRequest) -> Result<HttpResponse, ApiError> {
        self.gateway.send(&routes::GET_USER, request)
    }

    pub fn get_user(&self, user_id: &str) -> Result<User, ApiError> {
        let request = GetUserRequest {
            user_id: user_id.to_string(),
        };
        let response = self.get_user_api(&request)?;
        self.gateway.parse_one(&routes::GET_USER, response)
    }
}
