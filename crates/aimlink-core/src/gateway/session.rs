//! Session Context
//!
//! Who is calling and for which workspace. Built by the embedding app and
//! handed to the gateway when it is constructed.

use serde::{Deserialize, Serialize};

/// Region codes indexed by the user's language setting
const REGIONS: [&str; 5] = ["", "zh_CN", "en", "zh_TW", "ja"];
const DEFAULT_LANGUAGE: usize = 1;
const FALLBACK_REGION: &str = "en";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Auth token from login
    pub token: Option<String>,
    /// Selected workspace (corp)
    pub corp_id: Option<String>,
    /// Language index from the user profile
    pub language: Option<usize>,
}

impl SessionContext {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    pub fn with_corp(mut self, corp_id: impl Into<String>) -> Self {
        self.corp_id = Some(corp_id.into());
        self
    }

    pub fn with_language(mut self, language: usize) -> Self {
        self.language = Some(language);
        self
    }

    /// `antsRegion` value for this session
    pub fn region(&self) -> &'static str {
        let index = self.language.unwrap_or(DEFAULT_LANGUAGE);
        match REGIONS.get(index) {
            Some(region) if !region.is_empty() => *region,
            _ => FALLBACK_REGION,
        }
    }

    /// Headers attached to every request, in send order
    pub fn header_pairs(&self, client_version: &str) -> Vec<(&'static str, String)> {
        let mut headers = Vec::with_capacity(4);
        if let Some(token) = self.token.as_deref().filter(|t| !t.is_empty()) {
            headers.push(("token", token.to_string()));
        }
        if let Some(corp_id) = self.corp_id.as_deref().filter(|c| !c.is_empty()) {
            headers.push(("corpid", corp_id.to_string()));
        }
        headers.push(("antsregion", self.region().to_string()));
        headers.push(("version", client_version.to_string()));
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_mapping() {
        assert_eq!(SessionContext::default().region(), "zh_CN");
        assert_eq!(SessionContext::default().with_language(2).region(), "en");
        assert_eq!(SessionContext::default().with_language(4).region(), "ja");
        assert_eq!(SessionContext::default().with_language(0).region(), "en");
        assert_eq!(SessionContext::default().with_language(17).region(), "en");
    }

    #[test]
    fn test_headers_with_full_session() {
        let session = SessionContext::new("tok-1").with_corp("88").with_language(3);
        assert_eq!(
            session.header_pairs("mobile-v1.1"),
            vec![
                ("token", "tok-1".to_string()),
                ("corpid", "88".to_string()),
                ("antsregion", "zh_TW".to_string()),
                ("version", "mobile-v1.1".to_string()),
            ]
        );
    }

    #[test]
    fn test_headers_skip_missing_credentials() {
        let headers = SessionContext::default().header_pairs("mobile-v1.1");
        let names: Vec<_> = headers.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["antsregion", "version"]);
    }
}
