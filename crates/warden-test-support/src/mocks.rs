//! In-memory [`AccessTokenGateway`] doubles.

use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use warden_api::{AccessTokenGateway, GatewayError};

/// Gateway backed by a fixed public-to-secret table.
#[derive(Debug, Default)]
pub struct StaticTokenGateway {
    tokens: HashMap<String, String>,
    acquisitions: AtomicUsize,
    validations: AtomicUsize,
}

impl StaticTokenGateway {
    /// Empty gateway; every lookup misses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token pair.
    #[must_use]
    pub fn with_token(mut self, public_token: &str, secret_token: &str) -> Self {
        self.tokens
            .insert(public_token.to_string(), secret_token.to_string());
        self
    }

    /// Number of `acquire` calls observed.
    #[must_use]
    pub fn acquisitions(&self) -> usize {
        self.acquisitions.load(Ordering::SeqCst)
    }

    /// Number of `validate` calls observed.
    #[must_use]
    pub fn validations(&self) -> usize {
        self.validations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccessTokenGateway for StaticTokenGateway {
    async fn acquire(&self, public_token: &str) -> Result<String, GatewayError> {
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        self.tokens
            .get(public_token)
            .cloned()
            .ok_or_else(|| GatewayError::TokenNotFound {
                public_token: public_token.to_string(),
            })
    }

    async fn validate(&self, public_token: &str, secret_token: &str) -> Result<bool, GatewayError> {
        self.validations.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .tokens
            .get(public_token)
            .is_some_and(|secret| secret == secret_token))
    }
}

/// Gateway whose backend is unreachable; every call errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingTokenGateway;

#[async_trait]
impl AccessTokenGateway for FailingTokenGateway {
    async fn acquire(&self, public_token: &str) -> Result<String, GatewayError> {
        Err(GatewayError::Acquisition {
            public_token: public_token.to_string(),
            source: Box::new(io::Error::other("token store unavailable")),
        })
    }

    async fn validate(&self, public_token: &str, _secret_token: &str) -> Result<bool, GatewayError> {
        Err(GatewayError::Validation {
            public_token: public_token.to_string(),
            source: Box::new(io::Error::other("token store unavailable")),
        })
    }
}

/// Gateway whose calls never complete; records when a pending call is dropped.
#[derive(Debug, Clone, Default)]
pub struct PendingTokenGateway {
    cancelled: Arc<AtomicBool>,
}

impl PendingTokenGateway {
    /// Whether an in-flight call has been dropped by its caller.
    #[must_use]
    pub fn cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    async fn hang(&self) {
        let _guard = DropFlag(Arc::clone(&self.cancelled));
        std::future::pending::<()>().await;
    }
}

#[async_trait]
impl AccessTokenGateway for PendingTokenGateway {
    async fn acquire(&self, _public_token: &str) -> Result<String, GatewayError> {
        self.hang().await;
        Ok(String::new())
    }

    async fn validate(&self, _public_token: &str, _secret_token: &str) -> Result<bool, GatewayError> {
        self.hang().await;
        Ok(false)
    }
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}
