//! One-legged OAuth 1.0a request signing (HMAC-SHA1).
//!
//! The token/secret pair is fixed, so there is no authorization dance: every
//! request is signed with the same four credentials plus a fresh nonce and
//! timestamp.

use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::fmt;
use url::Url;

use crate::constants::env;
use crate::error::HarvestError;

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_key: String,
    pub client_secret: String,
    pub oauth_token: String,
    pub oauth_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_key", &self.client_key)
            .field("client_secret", &"<redacted>")
            .field("oauth_token", &self.oauth_token)
            .field("oauth_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Reads the four credentials from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::Configuration`] naming every variable that is
    /// unset or empty.
    pub fn from_env() -> Result<Self, HarvestError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, HarvestError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut read = |name: &'static str| match lookup(name) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let credentials = Self {
            client_key: read(env::CLIENT_KEY),
            client_secret: read(env::CLIENT_SECRET),
            oauth_token: read(env::OAUTH_TOKEN),
            oauth_secret: read(env::OAUTH_SECRET),
        };

        if missing.is_empty() {
            Ok(credentials)
        } else {
            Err(HarvestError::Configuration(format!(
                "missing Ravelry credentials: {}",
                missing.join(", ")
            )))
        }
    }
}

pub struct OAuthSigner {
    credentials: Credentials,
}

impl OAuthSigner {
    #[must_use]
    pub const fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Builds the `Authorization` header value for a request.
    pub fn authorization_header(&self, method: &str, url: &Url) -> Result<String, HarvestError> {
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        let timestamp = chrono::Utc::now().timestamp();
        self.authorization_header_with(method, url, &nonce, timestamp)
    }

    pub(crate) fn authorization_header_with(
        &self,
        method: &str,
        url: &Url,
        nonce: &str,
        timestamp: i64,
    ) -> Result<String, HarvestError> {
        let mut oauth_params = self.oauth_params(nonce, timestamp);
        let base = signature_base_string(method, url, &oauth_params);
        let signature = self.sign(&base)?;
        oauth_params.push(("oauth_signature", signature));
        oauth_params.sort_by(|a, b| a.0.cmp(b.0));

        let fields = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("OAuth {fields}"))
    }

    fn oauth_params(&self, nonce: &str, timestamp: i64) -> Vec<(&'static str, String)> {
        vec![
            ("oauth_consumer_key", self.credentials.client_key.clone()),
            ("oauth_nonce", nonce.to_string()),
            ("oauth_signature_method", SIGNATURE_METHOD.to_string()),
            ("oauth_timestamp", timestamp.to_string()),
            ("oauth_token", self.credentials.oauth_token.clone()),
            ("oauth_version", OAUTH_VERSION.to_string()),
        ]
    }

    fn sign(&self, base: &str) -> Result<String, HarvestError> {
        let key = format!(
            "{}&{}",
            encode(&self.credentials.client_secret),
            encode(&self.credentials.oauth_secret)
        );

        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| HarvestError::Configuration(format!("invalid signing key: {e}")))?;
        mac.update(base.as_bytes());

        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// RFC 3986 percent-encoding: everything except `ALPHA / DIGIT / - . _ ~`.
fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn base_uri(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let mut base = format!("{}://{}", url.scheme(), host);
    if let Some(port) = url.port() {
        base.push_str(&format!(":{port}"));
    }
    base.push_str(url.path());
    base
}

pub(crate) fn normalized_parameters(url: &Url, oauth_params: &[(&'static str, String)]) -> String {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (encode(&k), encode(&v)))
        .chain(oauth_params.iter().map(|(k, v)| (encode(k), encode(v))))
        .collect();
    pairs.sort();

    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

pub(crate) fn signature_base_string(
    method: &str,
    url: &Url,
    oauth_params: &[(&'static str, String)],
) -> String {
    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(&base_uri(url)),
        encode(&normalized_parameters(url, oauth_params))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials {
            client_key: "ck".to_string(),
            client_secret: "cs".to_string(),
            oauth_token: "tk".to_string(),
            oauth_secret: "ts".to_string(),
        }
    }

    #[test]
    fn test_from_lookup_reports_every_missing_variable() {
        let err = Credentials::from_lookup(|name| match name {
            "RAVELRY_CLIENT_KEY" => Some("ck".to_string()),
            "RAVELRY_OAUTH_TOKEN" => Some("  ".to_string()),
            _ => None,
        })
        .unwrap_err();

        assert!(matches!(err, HarvestError::Configuration(_)));
        let msg = err.to_string();
        assert!(msg.contains("RAVELRY_CLIENT_SECRET"));
        assert!(msg.contains("RAVELRY_OAUTH_TOKEN"));
        assert!(msg.contains("RAVELRY_OAUTH_SECRET"));
        assert!(!msg.contains("RAVELRY_CLIENT_KEY"));
    }

    #[test]
    fn test_from_lookup_accepts_complete_set() {
        let credentials = Credentials::from_lookup(|name| Some(format!("{name}-value"))).unwrap();
        assert_eq!(credentials.client_key, "RAVELRY_CLIENT_KEY-value");
        assert_eq!(credentials.oauth_secret, "RAVELRY_OAUTH_SECRET-value");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", creds());
        assert!(rendered.contains("ck"));
        assert!(!rendered.contains("\"cs\""));
        assert!(!rendered.contains("\"ts\""));
    }

    #[test]
    fn test_signature_base_string() {
        let signer = OAuthSigner::new(creds());
        let url = Url::parse("https://api.ravelry.com/patterns/search.json?craft=knitting&page=1")
            .unwrap();
        let params = signer.oauth_params("abc", 1_700_000_000);

        let base = signature_base_string("get", &url, &params);
        assert_eq!(
            base,
            "GET&https%3A%2F%2Fapi.ravelry.com%2Fpatterns%2Fsearch.json&\
             craft%3Dknitting%26oauth_consumer_key%3Dck%26oauth_nonce%3Dabc%26\
             oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1700000000%26\
             oauth_token%3Dtk%26oauth_version%3D1.0%26page%3D1"
        );
    }

    #[test]
    fn test_query_values_are_reencoded() {
        let mut url = Url::parse("https://api.ravelry.com/projects/search.json").unwrap();
        url.query_pairs_mut().append_pair("pattern-link", "a b/c");

        let normalized = normalized_parameters(&url, &[]);
        assert_eq!(normalized, "pattern-link=a%20b%2Fc");
    }

    #[test]
    fn test_authorization_header_is_deterministic_for_fixed_nonce() {
        let signer = OAuthSigner::new(creds());
        let url = Url::parse("https://api.ravelry.com/current_user.json").unwrap();

        let a = signer
            .authorization_header_with("GET", &url, "n1", 1_700_000_000)
            .unwrap();
        let b = signer
            .authorization_header_with("GET", &url, "n1", 1_700_000_000)
            .unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with("OAuth oauth_consumer_key=\"ck\", oauth_nonce=\"n1\", oauth_signature=\""));
        assert!(a.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(a.ends_with("oauth_version=\"1.0\""));

        let other = OAuthSigner::new(Credentials {
            oauth_secret: "different".to_string(),
            ..creds()
        })
        .authorization_header_with("GET", &url, "n1", 1_700_000_000)
        .unwrap();
        assert_ne!(a, other);
    }

    #[test]
    fn test_signature_is_base64_sha1_length() {
        let signer = OAuthSigner::new(creds());
        let signature = signer.sign("GET&x&y").unwrap();
        assert_eq!(signature.len(), 28);
        assert!(signature.ends_with('='));
    }
}
