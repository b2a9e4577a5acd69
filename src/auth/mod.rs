//! Bearer token authentication: token issuance, validation, and the
//! request extractor that resolves the authenticated user.

mod extractor;
mod token;

pub use extractor::AuthenticatedUser;
pub use token::{Claims, TokenResponse, decode_token, encode_token, issue_token_endpoint};
