//! Read-only client for the country reference service plus the geolocation seam.
use std::collections::BTreeMap;

use serde::Deserialize;
use url::Url;

use engine_logging::engine_debug;

use crate::client::{decode_json, join_segments, map_reqwest_error, parse_base};
use crate::settings::CountrySettings;
use crate::{ApiError, FailureKind};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Country {
    pub name: CountryName,
    #[serde(default)]
    pub capital: Vec<String>,
    pub region: Option<String>,
    pub subregion: Option<String>,
    /// Language code → language name.
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
    /// Currency code → currency.
    #[serde(default)]
    pub currencies: BTreeMap<String, Currency>,
    pub flags: Option<Flags>,
    pub cca2: Option<String>,
    pub cca3: Option<String>,
    #[serde(rename = "capitalInfo")]
    pub capital_info: Option<CapitalInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountryName {
    pub common: String,
    pub official: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Currency {
    pub name: String,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Flags {
    pub png: Option<String>,
    pub svg: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CapitalInfo {
    pub latlng: Option<Vec<f64>>,
}

impl Country {
    pub fn capital_name(&self) -> &str {
        self.capital.first().map(String::as_str).unwrap_or("-")
    }

    /// `"Euro (EUR), Swiss franc (CHF)"`, or `"-"` when unknown.
    pub fn currency_summary(&self) -> String {
        if self.currencies.is_empty() {
            return "-".to_string();
        }
        self.currencies
            .iter()
            .map(|(code, currency)| format!("{} ({code})", currency.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn language_summary(&self) -> String {
        if self.languages.is_empty() {
            return "-".to_string();
        }
        self.languages.values().cloned().collect::<Vec<_>>().join(", ")
    }

    /// `(latitude, longitude)` of the capital when the record has both.
    pub fn capital_coordinates(&self) -> Option<(f64, f64)> {
        match self.capital_info.as_ref()?.latlng.as_deref()? {
            [lat, lng, ..] => Some((*lat, *lng)),
            _ => None,
        }
    }

    pub fn flag_emoji(&self) -> Option<String> {
        self.cca2.as_deref().map(linguora_core::flag_emoji)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Country>),
    One(Box<Country>),
}

#[derive(Debug, Clone)]
pub struct CountryClient {
    base: Url,
    client: reqwest::Client,
}

impl CountryClient {
    pub fn new(settings: &CountrySettings) -> Result<Self, ApiError> {
        let base = parse_base(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { base, client })
    }

    /// Looks up a country by ISO alpha-2 or alpha-3 code.
    pub async fn by_code(&self, code: &str) -> Result<Country, ApiError> {
        let url = join_segments(&self.base, &["alpha", code.trim()]);
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let country = match decode_json::<OneOrMany>(response).await? {
            OneOrMany::Many(countries) => countries.into_iter().next(),
            OneOrMany::One(country) => Some(*country),
        };
        engine_debug!("Country lookup {} found={}", code, country.is_some());
        country.ok_or_else(|| ApiError::new(FailureKind::Decode, format!("no country for {code}")))
    }
}

/// Device location resolved to an ISO country code. Implemented by the
/// platform; `None` when permission is missing or geocoding fails.
#[async_trait::async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_country_code(&self) -> Option<String>;
}

/// The country the device is in, if it can be determined.
pub async fn current_country(
    provider: &dyn LocationProvider,
    client: &CountryClient,
) -> Result<Option<Country>, ApiError> {
    match provider.current_country_code().await {
        Some(code) => client.by_code(&code).await.map(Some),
        None => Ok(None),
    }
}
