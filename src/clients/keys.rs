use crate::types::provider::{Provider, UnknownProvider};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// API keys per provider, built once at startup and handed to the client factory.
///
/// Keys are never printed: the `Debug` output only lists which providers have one.
///
/// # Examples
///
/// ```
/// use weather_collector::{ApiKeys, Provider};
///
/// let keys = ApiKeys::new().with(Provider::OpenWeatherMap, "0123456789abcdef");
/// assert_eq!(keys.get(Provider::OpenWeatherMap), Some("0123456789abcdef"));
/// assert_eq!(keys.get(Provider::Weatherbit), None);
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<String, String>", into = "HashMap<String, String>")]
pub struct ApiKeys {
    keys: HashMap<Provider, String>,
}

impl ApiKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the key for `provider`. Blank keys are ignored.
    pub fn with(mut self, provider: Provider, key: impl Into<String>) -> Self {
        self.insert(provider, key);
        self
    }

    pub fn insert(&mut self, provider: Provider, key: impl Into<String>) {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            self.keys.remove(&provider);
        } else {
            self.keys.insert(provider, key);
        }
    }

    pub fn get(&self, provider: Provider) -> Option<&str> {
        self.keys.get(&provider).map(String::as_str)
    }

    pub fn contains(&self, provider: Provider) -> bool {
        self.keys.contains_key(&provider)
    }
}

impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut providers: Vec<_> = self.keys.keys().collect();
        providers.sort();
        f.debug_struct("ApiKeys")
            .field("providers", &providers)
            .finish()
    }
}

impl TryFrom<HashMap<String, String>> for ApiKeys {
    type Error = UnknownProvider;

    fn try_from(raw: HashMap<String, String>) -> Result<Self, Self::Error> {
        let mut keys = ApiKeys::new();
        for (name, key) in raw {
            keys.insert(name.parse::<Provider>()?, key);
        }
        Ok(keys)
    }
}

impl From<ApiKeys> for HashMap<String, String> {
    fn from(keys: ApiKeys) -> Self {
        keys.keys
            .into_iter()
            .map(|(provider, key)| (provider.to_string(), key))
            .collect()
    }
}
