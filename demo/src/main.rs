//! Console walkthrough: encode a key pair, issue a token, verify it.
//!
//! Prints, in order: the public key string, the secret key string, the issued
//! token, the PEM public key and the verified token body as JSON.

use anyhow::Context;
use kt_core::services::token::public_key_pem;
use kt_core::{
    ClaimSet, DomainResult, ErrorResponse, Es256KeyPair, KeyCodec, KeyRole, TokenService,
};
use kt_shared::{AppConfig, KeysConfig, LogFormat, LoggingConfig};
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SAMPLE_TEXT: &str = "This is a sample. It will be signed.";

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging);

    info!("Starting keytoken demo");

    let pair = load_key_pair(&config.keys).context("Failed to obtain key pair")?;
    println!("Public Key: {}", pair.public_key());
    println!("Secret Key: {}", pair.secret_key());

    let service = TokenService::new();
    let token = service
        .issue(
            pair.secret_key().as_str(),
            &json!({ "sample": SAMPLE_TEXT }),
            &ClaimSet::from(&config.claims),
            config.token.validity_seconds,
        )
        .context("Failed to issue token")?;
    println!("JWT: {}", token);

    // For pasting into a JWT debugger
    let pem = public_key_pem(pair.public_key().as_str()).context("Failed to build public key PEM")?;
    println!("Public Key PEM: {}", pem);

    // The verifier builds its own claim set
    let expected_claims = ClaimSet::from(&config.claims);
    match service.verify_claims::<Value>(&token, pair.public_key().as_str(), &expected_claims) {
        Ok(verified) => {
            println!("Verified Result: {}", serde_json::to_string(&verified)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", serde_json::to_string(&ErrorResponse::from(&e))?);
            Err(e).context("Token verification failed")
        }
    }
}

/// Installs the stderr tracing subscriber; `RUST_LOG` overrides the configured level
fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.format {
        LogFormat::Full => builder.init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

/// Uses the configured keys, or a fresh pair when none are configured
///
/// A half-configured pair fails with `InvalidKeyFormat` for the missing key.
fn load_key_pair(keys: &KeysConfig) -> DomainResult<Es256KeyPair> {
    if keys.is_empty() {
        info!("No keys configured, generating a fresh P-256 pair");
        return Es256KeyPair::generate();
    }

    let public_der = KeyCodec::decode_optional(keys.public_key.as_deref(), KeyRole::Public)?;
    let secret_der = KeyCodec::decode_optional(keys.secret_key.as_deref(), KeyRole::Secret)?;
    info!("Using configured key pair");

    Ok(Es256KeyPair::from_der(&public_der, &secret_der))
}
