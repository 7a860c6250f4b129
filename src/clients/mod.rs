pub mod oauth;
pub mod ravelry;

pub use oauth::{Credentials, OAuthSigner};
pub use ravelry::{HttpResponse, RavelryClient, Transport};
