//! Form configuration, launch parameters and branding.
//!
//! `FormConfig` carries the deployment settings (endpoint, default brand,
//! attachment limit). `LaunchContext` is the page URL the form was opened
//! with; its query may override the brand and pre-fill the environment
//! fields. `Brand` is resolved once from the two and then only read.

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::attachments::DEFAULT_ATTACHMENT_LIMIT;
use crate::error::{Error, Result};
use crate::models::FormFields;
use crate::util::{is_http_url, normalize_text_option};

pub const DEFAULT_APP_NAME: &str = "Wiremesh";
pub const DEFAULT_ENDPOINT: &str = "https://getform.io/f/aejemvdb";
pub const DEFAULT_PAGE_URL: &str = "https://localhost/bug-report";

const PARAM_APP_NAME: &str = "appName";
const PARAM_VERSION: &str = "version";
const PARAM_BROWSER: &str = "browser";

/// Deployment settings for a bug report form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FormConfig {
    /// Brand name used when the launch URL does not override it.
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Form-processing endpoint that receives the multipart POST.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Maximum number of attachments per submission.
    #[serde(default = "default_attachment_limit")]
    pub attachment_limit: usize,
    /// Page URL reported with each submission when the host has no better one.
    #[serde(default = "default_page_url")]
    pub page_url: String,
    /// Optional request timeout. Unset means the request waits on the transport.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

const fn default_attachment_limit() -> usize {
    DEFAULT_ATTACHMENT_LIMIT
}

fn default_page_url() -> String {
    DEFAULT_PAGE_URL.to_string()
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            endpoint: default_endpoint(),
            attachment_limit: default_attachment_limit(),
            page_url: default_page_url(),
            request_timeout_secs: None,
        }
    }
}

impl FormConfig {
    /// Load a JSON config file. A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let mut config = serde_json::from_str::<Self>(&raw)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Trim text settings; a blank app name falls back to the default.
    pub fn normalize(&mut self) {
        self.app_name = normalize_text_option(Some(self.app_name.clone()))
            .unwrap_or_else(default_app_name);
        self.endpoint = self.endpoint.trim().to_string();
        self.page_url = self.page_url.trim().to_string();
    }

    pub fn validate(&self) -> Result<()> {
        if !is_http_url(&self.endpoint) {
            return Err(Error::InvalidConfig(
                "endpoint must include http:// or https://".to_string(),
            ));
        }
        Url::parse(&self.endpoint)
            .map_err(|error| Error::InvalidConfig(format!("endpoint is not a valid URL: {error}")))?;
        if !is_http_url(&self.page_url) {
            return Err(Error::InvalidConfig(
                "page_url must include http:// or https://".to_string(),
            ));
        }
        if self.attachment_limit == 0 {
            return Err(Error::InvalidConfig(
                "attachment_limit must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(Error::InvalidConfig(
                "request_timeout_secs must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Brand text shown on the form and used in submission subjects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brand {
    name: String,
}

impl Brand {
    /// Use `requested` when it is non-blank after trimming, else `default_name`.
    pub fn resolve(default_name: &str, requested: Option<&str>) -> Self {
        let name = normalize_text_option(requested.map(str::to_string))
            .unwrap_or_else(|| default_name.trim().to_string());
        Self { name }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn document_title(&self) -> String {
        format!("{} · Bug Report", self.name)
    }

    #[must_use]
    pub fn subject_prefix(&self) -> String {
        format!("[{}] Bug report", self.name)
    }

    /// Subject line for a report with the given (already trimmed) title.
    #[must_use]
    pub fn subject_for(&self, title: &str) -> String {
        format!("{}: {title}", self.subject_prefix())
    }
}

/// The URL the form was opened with and the parameters read from its query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchContext {
    page_url: String,
    app_name: Option<String>,
    version: Option<String>,
    browser: Option<String>,
}

impl LaunchContext {
    /// Parse a launch URL. Only the first occurrence of each parameter counts.
    pub fn parse(page_url: &str) -> Result<Self> {
        let url = Url::parse(page_url.trim())
            .map_err(|error| Error::InvalidInput(format!("Invalid launch URL: {error}")))?;
        Ok(Self::from_url(&url))
    }

    /// Build a launch URL from a base page URL and explicit parameters.
    ///
    /// Parameters already present on the base URL are kept; explicit values
    /// are appended after them and so lose to the originals.
    pub fn from_parts(
        base_url: &str,
        app_name: Option<&str>,
        version: Option<&str>,
        browser: Option<&str>,
    ) -> Result<Self> {
        let mut url = Url::parse(base_url.trim())
            .map_err(|error| Error::InvalidInput(format!("Invalid page URL: {error}")))?;

        let pairs: Vec<(&str, &str)> = [
            (PARAM_APP_NAME, app_name),
            (PARAM_VERSION, version),
            (PARAM_BROWSER, browser),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect();

        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        Ok(Self::from_url(&url))
    }

    fn from_url(url: &Url) -> Self {
        let param = |name: &str| {
            url.query_pairs()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
        };

        Self {
            page_url: url.to_string(),
            app_name: param(PARAM_APP_NAME),
            version: normalize_text_option(param(PARAM_VERSION)),
            browser: normalize_text_option(param(PARAM_BROWSER)),
        }
    }

    #[must_use]
    pub fn page_url(&self) -> &str {
        &self.page_url
    }

    #[must_use]
    pub fn requested_app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    #[must_use]
    pub fn brand(&self, default_name: &str) -> Brand {
        Brand::resolve(default_name, self.app_name.as_deref())
    }

    /// Fields as they appear when the form first opens.
    #[must_use]
    pub fn initial_fields(&self) -> FormFields {
        FormFields::with_environment(self.version.clone(), self.browser.clone())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn brand_override_applies_everywhere() {
        let brand = Brand::resolve("Wiremesh", Some("  Acme  "));
        assert_eq!(brand.name(), "Acme");
        assert_eq!(brand.document_title(), "Acme · Bug Report");
        assert_eq!(brand.subject_prefix(), "[Acme] Bug report");
        assert_eq!(brand.subject_for("Crash"), "[Acme] Bug report: Crash");
    }

    #[test]
    fn blank_brand_override_falls_back() {
        assert_eq!(Brand::resolve("Wiremesh", Some("   ")).name(), "Wiremesh");
        assert_eq!(Brand::resolve("Wiremesh", None).name(), "Wiremesh");
    }

    #[test]
    fn launch_url_query_drives_brand_and_environment() {
        let launch = LaunchContext::parse(
            "https://example.com/bug-report?appName=Acme&version=2.4.1&browser=Firefox%20128",
        )
        .unwrap();

        assert_eq!(launch.brand(DEFAULT_APP_NAME).name(), "Acme");
        let fields = launch.initial_fields();
        assert_eq!(fields.version, "2.4.1");
        assert_eq!(fields.browser, "Firefox 128");
        assert_eq!(fields.title, "");
    }

    #[test]
    fn launch_url_without_query_uses_defaults() {
        let launch = LaunchContext::parse("https://example.com/bug-report").unwrap();
        assert_eq!(launch.brand(DEFAULT_APP_NAME).name(), "Wiremesh");
        assert_eq!(launch.initial_fields().version, "Unknown");
        assert_eq!(launch.initial_fields().browser, "Unknown");
    }

    #[test]
    fn empty_environment_params_become_unknown() {
        let launch = LaunchContext::parse("https://example.com/?version=&browser=%20").unwrap();
        assert_eq!(launch.initial_fields().version, "Unknown");
        assert_eq!(launch.initial_fields().browser, "Unknown");
    }

    #[test]
    fn from_parts_encodes_parameters() {
        let launch = LaunchContext::from_parts(
            DEFAULT_PAGE_URL,
            Some("Acme Tools"),
            Some("1.0"),
            None,
        )
        .unwrap();

        assert_eq!(
            launch.page_url(),
            "https://localhost/bug-report?appName=Acme+Tools&version=1.0"
        );
        assert_eq!(launch.requested_app_name(), Some("Acme Tools"));
    }

    #[test]
    fn from_parts_without_parameters_keeps_url() {
        let launch = LaunchContext::from_parts(DEFAULT_PAGE_URL, None, None, None).unwrap();
        assert_eq!(launch.page_url(), DEFAULT_PAGE_URL);
    }

    #[test]
    fn invalid_launch_url_is_rejected() {
        assert!(LaunchContext::parse("not a url").is_err());
    }

    #[test]
    fn config_defaults_are_valid() {
        let config = FormConfig::default();
        assert_eq!(config.attachment_limit, 6);
        assert_eq!(config.app_name, "Wiremesh");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_rejects_bad_values() {
        let config = FormConfig {
            endpoint: "getform.io/f/x".to_string(),
            ..FormConfig::default()
        };
        assert!(config.validate().is_err());

        let config = FormConfig {
            attachment_limit: 0,
            ..FormConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_file_partial_values_merge_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "app_name": " Acme ", "attachment_limit": 3 }"#,
        )
        .unwrap();

        let config = FormConfig::load_from_path(&path).unwrap();
        assert_eq!(config.app_name, "Acme");
        assert_eq!(config.attachment_limit, 3);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn config_file_rejects_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "endpoint_url": "https://x.test" }"#).unwrap();

        let error = FormConfig::load_from_path(&path).unwrap_err();
        assert!(error.to_string().contains("unknown field"));
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = FormConfig::load_from_path(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, FormConfig::default());
    }
}
