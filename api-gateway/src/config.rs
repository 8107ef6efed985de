//! Application configuration

use std::env;
use std::str::FromStr;

use common::error::{Error, Result};
use common::model::Network;

/// Largest request body accepted by default, 10 MiB
pub const DEFAULT_MAX_REQUEST_BODY_BYTES: usize = 10 << 20;

/// Native-coin market price reported when none is configured, 150 USD
pub const DEFAULT_USD_CENTS_PER_UNIT: u64 = 150 * 100;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// API port
    pub port: u16,
    /// Selects the Base58Check public key prefix
    pub network: Network,
    pub support_email: String,
    pub show_processing_spinners: bool,
    pub min_satoshis_burned_for_profile_creation: u64,
    /// Profile creation is paid for by the node
    pub comp_profile_creation: bool,
    pub max_request_body_bytes: usize,
    pub amplitude_key: String,
    pub amplitude_domain: String,
    /// A starter seed funds new accounts
    pub has_starter_seed: bool,
    /// Twilio credentials are present for phone verification
    pub has_twilio_api_key: bool,
    /// Wyre credentials are present for card purchases
    pub has_wyre_integration: bool,
    /// Market price of the native coin
    pub usd_cents_per_unit: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 17001,
            network: Network::Mainnet,
            support_email: String::new(),
            show_processing_spinners: false,
            min_satoshis_burned_for_profile_creation: 0,
            comp_profile_creation: false,
            max_request_body_bytes: DEFAULT_MAX_REQUEST_BODY_BYTES,
            amplitude_key: String::new(),
            amplitude_domain: String::new(),
            has_starter_seed: false,
            has_twilio_api_key: false,
            has_wyre_integration: false,
            usd_cents_per_unit: DEFAULT_USD_CENTS_PER_UNIT,
        }
    }
}

impl AppConfig {
    /// Create a new configuration from environment variables
    pub fn new() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from any key lookup, falling back to defaults
    /// for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            port: parse_var(&lookup, "PORT")?.unwrap_or(defaults.port),
            network: parse_var(&lookup, "NETWORK")?.unwrap_or(defaults.network),
            support_email: lookup("SUPPORT_EMAIL").unwrap_or(defaults.support_email),
            show_processing_spinners: parse_flag(&lookup, "SHOW_PROCESSING_SPINNERS")?
                .unwrap_or(defaults.show_processing_spinners),
            min_satoshis_burned_for_profile_creation: parse_var(
                &lookup,
                "MIN_SATOSHIS_BURNED_FOR_PROFILE_CREATION",
            )?
            .unwrap_or(defaults.min_satoshis_burned_for_profile_creation),
            comp_profile_creation: parse_flag(&lookup, "COMP_PROFILE_CREATION")?
                .unwrap_or(defaults.comp_profile_creation),
            max_request_body_bytes: parse_var(&lookup, "MAX_REQUEST_BODY_BYTES")?
                .unwrap_or(defaults.max_request_body_bytes),
            amplitude_key: lookup("AMPLITUDE_KEY").unwrap_or(defaults.amplitude_key),
            amplitude_domain: lookup("AMPLITUDE_DOMAIN").unwrap_or(defaults.amplitude_domain),
            has_starter_seed: is_set(&lookup, "STARTER_SEED"),
            has_twilio_api_key: is_set(&lookup, "TWILIO_ACCOUNT_SID")
                && is_set(&lookup, "TWILIO_AUTH_TOKEN"),
            has_wyre_integration: is_set(&lookup, "WYRE_ACCOUNT_ID")
                && is_set(&lookup, "WYRE_API_KEY"),
            usd_cents_per_unit: parse_var(&lookup, "USD_CENTS_PER_UNIT")?
                .unwrap_or(defaults.usd_cents_per_unit),
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::InvalidFormat(format!("{}='{}': {}", key, value, e))),
    }
}

/// Present and not blank
fn is_set<F>(lookup: &F, key: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).is_some_and(|value| !value.trim().is_empty())
}

fn parse_flag<F>(lookup: &F, key: &str) -> Result<Option<bool>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).as_deref().map(str::trim) {
        None => Ok(None),
        Some("1") | Some("true") => Ok(Some(true)),
        Some("0") | Some("false") => Ok(Some(false)),
        Some(other) => Err(Error::InvalidFormat(format!("{}='{}' is not a flag", key, other))),
    }
}
