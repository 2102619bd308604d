//! One client per gateway resource.
//!
//! Every operation comes as a pair: `*_api` takes a fully formed request and
//! returns the raw response, and the convenience method takes only the
//! identifying parameters, fills the rest from the schema defaults, and
//! returns the typed entity.

mod accounts;
mod cards;
mod documents;
mod operations;
mod users;

pub use accounts::AccountsClient;
pub use cards::CardsClient;
pub use documents::DocumentsClient;
pub use operations::OperationsClient;
pub use users::UsersClient;
