// Providers layer - Work performers
//
// Providers do the actual work (hashing, signing, format checks) that
// coordinators compose into endpoint workflows.

pub mod credential_provider;
pub mod identity_validator;
pub mod token_provider;

pub use credential_provider::CredentialProvider;
pub use token_provider::TokenProvider;
