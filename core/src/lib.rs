//! Typed client core for the banking gateway service.
//!
//! # Overview
//! Wraps the gateway's users, accounts, cards, operations and documents
//! endpoints in typed methods. Each method builds a request from a typed
//! shape, sends it through a `Transport`, and decodes the JSON envelope
//! into a typed entity.
//!
//! # Design
//! - `schema` holds the aliasing and default-value engine: static field tables
//!   map internal snake_case names to camelCase wire names and generate
//!   omitted request fields at construction time.
//! - `routes` is a declarative endpoint table; `client` is the one generic
//!   dispatch path every resource client goes through.
//! - `http` types keep requests and responses as plain data so the transport
//!   stays swappable and tests never need a network.
//! - Construction failures, validation failures and transport failures are
//!   distinct `ApiError` variants and always reach the caller.

pub mod client;
pub mod clients;
pub mod error;
pub mod fakers;
pub mod http;
pub mod routes;
pub mod schema;
pub mod transport;
pub mod types;

pub use client::{ClientConfig, GatewayClient};
pub use error::{ApiError, ErrorKind, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use routes::Route;
pub use schema::{construct, decode, encode, Envelope, Fields, Shape};
pub use transport::{Transport, UreqTransport};
pub use types::{
    Account, AccountStatus, AccountType, Card, CardStatus, CardType, CreateUserRequest, Document,
    GetAccountsQuery, GetDocumentRequest, GetOperationRequest, GetUserRequest, IssueCardRequest,
    MakeOperationRequest, MakePurchaseOperationRequest, OpenAccountRequest, Operation, OperationStatus,
    OperationType, OperationsQuery, OperationsSummary, PaymentSystem, User,
};
