//! Configuration management for Roomly Core

use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Database configuration
    pub database: DatabaseConfig,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Payment gateway configuration
    pub payment: PaymentConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
}

#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Base URL of the payment gateway API
    pub base_url: String,
    pub merchant_id: String,
    /// Shared secret used to sign checkout requests and verify notify callbacks
    pub secret_key: String,
    /// Public URL the gateway posts payment notifications back to
    pub notify_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").context("DATABASE_URL is required")?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .context("Invalid DATABASE_MAX_CONNECTIONS")?,
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or_else(|_| "1".to_string())
                    .parse()
                    .context("Invalid DATABASE_MIN_CONNECTIONS")?,
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").context("JWT_SECRET is required")?,
                issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "roomly".to_string()),
            },
            payment: PaymentConfig {
                base_url: env::var("PAYMENT_BASE_URL").context("PAYMENT_BASE_URL is required")?,
                merchant_id: env::var("PAYMENT_MERCHANT_ID")
                    .context("PAYMENT_MERCHANT_ID is required")?,
                secret_key: env::var("PAYMENT_SECRET_KEY")
                    .context("PAYMENT_SECRET_KEY is required")?,
                notify_url: env::var("PAYMENT_NOTIFY_URL")
                    .unwrap_or_else(|_| "http://localhost:8080/api/v1/payments/notify".to_string()),
            },
        })
    }

    /// HTTP bind address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            http_host: "127.0.0.1".to_string(),
            http_port: 8080,
            database: DatabaseConfig {
                url: "mysql://root@localhost/roomly".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            jwt: JwtConfig {
                secret: "test-secret".to_string(),
                issuer: "roomly".to_string(),
            },
            payment: PaymentConfig {
                base_url: "http://localhost:9000".to_string(),
                merchant_id: "MS0001".to_string(),
                secret_key: "gateway-secret".to_string(),
                notify_url: "http://localhost:8080/api/v1/payments/notify".to_string(),
            },
        }
    }

    #[test]
    fn test_http_addr() {
        let config = test_config();
        assert_eq!(config.http_addr(), "127.0.0.1:8080");
    }
}
