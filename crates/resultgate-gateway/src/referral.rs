// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Referral key to payment-button resolution.

use std::collections::HashMap;

use resultgate_config::ReferralConfig;

/// Immutable referral table, built once at startup and shared by all requests.
#[derive(Debug, Clone)]
pub struct ReferralResolver {
    buttons: HashMap<String, String>,
    default_button_id: String,
}

impl ReferralResolver {
    /// Build a resolver. Keys are trimmed and lowercased here so lookups
    /// only need to fold the incoming key.
    pub fn new(
        default_button_id: impl Into<String>,
        buttons: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self {
            buttons: buttons
                .into_iter()
                .map(|(key, id)| (key.trim().to_lowercase(), id))
                .collect(),
            default_button_id: default_button_id.into(),
        }
    }

    pub fn from_config(config: &ReferralConfig) -> Self {
        Self::new(
            config.default_button_id.clone(),
            config
                .buttons
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        )
    }

    /// Button id for `key`, or the default when the key is absent, blank,
    /// or not in the table.
    pub fn resolve(&self, key: Option<&str>) -> &str {
        key.map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .and_then(|k| self.buttons.get(&k))
            .map_or(self.default_button_id.as_str(), String::as_str)
    }

    pub fn default_button_id(&self) -> &str {
        &self.default_button_id
    }

    /// Number of referral keys in the table.
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}

impl Default for ReferralResolver {
    fn default() -> Self {
        Self::from_config(&ReferralConfig::default())
    }
}
