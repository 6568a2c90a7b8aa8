//! Bearer credential acquisition, caching and persistence

pub mod persistence;
pub mod store;
pub mod types;

pub use persistence::CredentialFile;
pub use store::CredentialStore;
pub use types::{ClientRegistration, Credential, RegistrationIdentity};
