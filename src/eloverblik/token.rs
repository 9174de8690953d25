//! Data access token lifecycle.
//!
//! The upstream hands out a short-lived JWT in exchange for the long-lived
//! refresh token. The last token is cached on disk and reused until its
//! `exp` claim has passed.
//!
//! The claims are read without verifying the signature. Authenticity of the
//! token comes from the TLS connection it was received over; the claims are
//! only used to decide whether to ask for a new one. [`ClaimsDecoder`] is the
//! seam for plugging in a verifying decoder.

use crate::error::{ParseError, Result, StorageError};
use crate::eloverblik::client::Client;
use crate::model::Credential;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde_derive::Deserialize;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Claims the exporter cares about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenClaims {
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenClaims {
    /// A token without an expiry claim is never considered valid.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp > now)
    }
}

/// Turns a credential into its claims.
pub trait ClaimsDecoder: Send + Sync {
    fn decode(&self, credential: &Credential) -> Result<TokenClaims, ParseError>;
}

#[derive(Deserialize)]
struct RawClaims {
    exp: Option<f64>,
}

/// Reads the JWT payload segment without checking the signature.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnverifiedClaimsDecoder;

impl ClaimsDecoder for UnverifiedClaimsDecoder {
    fn decode(&self, credential: &Credential) -> Result<TokenClaims, ParseError> {
        let mut segments = credential.as_str().split('.');
        let payload = match (segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_)) => payload,
            _ => return Err(ParseError::Token("expected three dot-separated segments".to_string())),
        };
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| ParseError::Token(e.to_string()))?;
        let raw: RawClaims =
            serde_json::from_slice(&bytes).map_err(|e| ParseError::Token(e.to_string()))?;

        let expires_at = match raw.exp {
            Some(exp) => Some(
                DateTime::from_timestamp_millis((exp * 1000.0) as i64)
                    .ok_or_else(|| ParseError::Token(format!("exp {} out of range", exp)))?,
            ),
            None => None,
        };
        Ok(TokenClaims { expires_at })
    }
}

/// Persistence for the single cached data access token.
pub trait TokenStore: Send + Sync {
    /// `Ok(None)` when no token has been stored yet.
    fn load(&self) -> Result<Option<Credential>, StorageError>;
    fn save(&self, credential: &Credential) -> Result<(), StorageError>;
}

/// Keeps the token as raw text in one file.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<Credential>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                tracing::info!("Token read from file {}", self.path.display());
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(Credential::new(token)))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("Token file {} does not exist", self.path.display());
                Ok(None)
            }
            Err(e) => Err(StorageError::read(&self.path, e)),
        }
    }

    /// Writes to a temporary file next to the target and renames it into
    /// place, so a crash never leaves a half-written token behind.
    fn save(&self, credential: &Credential) -> Result<(), StorageError> {
        tracing::info!("Writing token to file {}", self.path.display());
        let mut file =
            NamedTempFile::new_in(self.directory()).map_err(|e| StorageError::write(&self.path, e))?;
        file.write_all(credential.as_str().as_bytes())
            .and_then(|_| file.as_file().sync_all())
            .map_err(|e| StorageError::write(&self.path, e))?;
        file.persist(&self.path)
            .map_err(|e| StorageError::write(&self.path, e.error))?;
        Ok(())
    }
}

/// Hands out a data access token that has not expired.
pub struct TokenManager {
    client: Arc<Client>,
    store: Box<dyn TokenStore>,
    decoder: Box<dyn ClaimsDecoder>,
    refresh_token: String,
}

impl TokenManager {
    pub fn new(
        client: Arc<Client>,
        store: Box<dyn TokenStore>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self::with_decoder(client, store, Box::new(UnverifiedClaimsDecoder), refresh_token)
    }

    pub fn with_decoder(
        client: Arc<Client>,
        store: Box<dyn TokenStore>,
        decoder: Box<dyn ClaimsDecoder>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            store,
            decoder,
            refresh_token: refresh_token.into(),
        }
    }

    /// Returns the cached token if it is still valid at `now`, otherwise
    /// refreshes, persists and returns a new one.
    pub async fn valid_credential_at(&self, now: DateTime<Utc>) -> Result<Credential> {
        if let Some(cached) = self.store.load()? {
            if self.is_valid_at(&cached, now) {
                tracing::debug!("Cached data access token is still valid");
                return Ok(cached);
            }
        }

        tracing::info!("Data access token is expired or non-existing, refreshing");
        let credential = self.client.fetch_access_token(&self.refresh_token).await?;
        tracing::info!("Data access token refreshed successfully");
        self.store.save(&credential)?;
        Ok(credential)
    }

    fn is_valid_at(&self, credential: &Credential, now: DateTime<Utc>) -> bool {
        match self.decoder.decode(credential) {
            Ok(claims) => claims.is_valid_at(now),
            Err(e) => {
                tracing::warn!("Cached data access token is unreadable: {}", e);
                false
            }
        }
    }
}
