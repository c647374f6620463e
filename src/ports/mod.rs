//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Collaborator Ports
//!
//! - `CompletionProvider` - Hosted LLM completion endpoint
//! - `CredentialStore` - Accounts keyed by username
//! - `PlanStore` - Saved lesson plans
//!
//! ## Auth Ports
//!
//! - `PasswordHasher` - One-way password hashing
//! - `TokenIssuer` - Signs bearer tokens at login
//! - `SessionValidator` - Resolves a bearer token to a session context
//!
//! ## Export Ports
//!
//! - `FlowDocumentBackend` - Renders the flow model (DOCX)
//! - `PageLayoutBackend` - Renders the page-layout model (PDF)

mod completion_provider;
mod credential_store;
mod export_backend;
mod password_hasher;
mod plan_store;
mod session_validator;
mod token_issuer;

pub use completion_provider::{
    AIError, CompletionProvider, CompletionRequest, CompletionResponse, FinishReason,
    ProviderInfo, TokenUsage,
};
pub use credential_store::{Credential, CredentialStore};
pub use export_backend::{
    sanitize_filename, ExportError, ExportFormat, ExportedDocument, FlowDocumentBackend,
    PageLayoutBackend,
};
pub use password_hasher::PasswordHasher;
pub use plan_store::PlanStore;
pub use session_validator::SessionValidator;
pub use token_issuer::{IssuedToken, TokenIssuer};
