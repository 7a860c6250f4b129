use url::Url;

use crate::config::SearchConfig;
use crate::constants::endpoints;
use crate::error::HarvestError;

/// Builds fully-encoded request URLs against the API base.
///
/// The URL string is also the cache signature, so parameter order is fixed.
#[derive(Debug, Clone)]
pub struct ApiUrls {
    base: String,
}

impl ApiUrls {
    pub fn new(base_url: &str) -> Result<Self, HarvestError> {
        Url::parse(base_url).map_err(|e| {
            HarvestError::Configuration(format!("invalid API base URL '{base_url}': {e}"))
        })?;

        Ok(Self {
            base: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, HarvestError> {
        let raw = format!("{}{}", self.base, path);
        Url::parse(&raw)
            .map_err(|e| HarvestError::Configuration(format!("invalid endpoint URL '{raw}': {e}")))
    }

    /// First page of the pattern search.
    pub fn patterns_search(&self, search: &SearchConfig) -> Result<String, HarvestError> {
        let mut url = self.endpoint(endpoints::PATTERNS_SEARCH)?;
        url.query_pairs_mut()
            .append_pair("craft", &search.craft)
            .append_pair("pc", &search.pattern_category)
            .append_pair("sort", &search.sort)
            .append_pair("page_size", &search.pattern_page_size.to_string())
            .append_pair("page", "1");
        Ok(url.into())
    }

    /// First page of the project search filtered to one pattern.
    pub fn projects_search(
        &self,
        search: &SearchConfig,
        pattern_permalink: &str,
    ) -> Result<String, HarvestError> {
        let mut url = self.endpoint(endpoints::PROJECTS_SEARCH)?;
        url.query_pairs_mut()
            .append_pair("craft", &search.craft)
            .append_pair("pc", &search.pattern_category)
            .append_pair("status", &search.project_status)
            .append_pair("pattern-link", pattern_permalink)
            .append_pair("sort", &search.sort)
            .append_pair("page_size", &search.project_page_size.to_string())
            .append_pair("page", "1");
        Ok(url.into())
    }

    pub fn project_detail(&self, username: &str, project_id: i64) -> Result<String, HarvestError> {
        let path = format!(
            "/projects/{}/{}.json",
            urlencoding::encode(username),
            project_id
        );
        Ok(self.endpoint(&path)?.into())
    }

    pub fn yarn_detail(&self, yarn_id: i64) -> Result<String, HarvestError> {
        Ok(self.endpoint(&format!("/yarns/{yarn_id}.json"))?.into())
    }

    pub fn current_user(&self) -> Result<String, HarvestError> {
        Ok(self.endpoint(endpoints::CURRENT_USER)?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls() -> ApiUrls {
        ApiUrls::new("https://api.ravelry.com/").unwrap()
    }

    #[test]
    fn test_patterns_search_url() {
        let url = urls().patterns_search(&SearchConfig::default()).unwrap();
        assert_eq!(
            url,
            "https://api.ravelry.com/patterns/search.json?craft=knitting&pc=sweater&sort=popularity&page_size=100&page=1"
        );
    }

    #[test]
    fn test_projects_search_url() {
        let url = urls()
            .projects_search(&SearchConfig::default(), "cardi")
            .unwrap();
        assert_eq!(
            url,
            "https://api.ravelry.com/projects/search.json?craft=knitting&pc=sweater&status=finished&pattern-link=cardi&sort=popularity&page_size=100&page=1"
        );
    }

    #[test]
    fn test_permalink_is_query_encoded() {
        let url = urls()
            .projects_search(&SearchConfig::default(), "a&b c")
            .unwrap();
        assert!(url.contains("pattern-link=a%26b+c&"));
    }

    #[test]
    fn test_detail_and_user_urls() {
        assert_eq!(
            urls().project_detail("alice", 99).unwrap(),
            "https://api.ravelry.com/projects/alice/99.json"
        );
        assert_eq!(
            urls().project_detail("knit ter", 1).unwrap(),
            "https://api.ravelry.com/projects/knit%20ter/1.json"
        );
        assert_eq!(
            urls().yarn_detail(523).unwrap(),
            "https://api.ravelry.com/yarns/523.json"
        );
        assert_eq!(
            urls().current_user().unwrap(),
            "https://api.ravelry.com/current_user.json"
        );
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let urls = ApiUrls::new("http://127.0.0.1:8080/mock").unwrap();
        assert_eq!(
            urls.current_user().unwrap(),
            "http://127.0.0.1:8080/mock/current_user.json"
        );
    }

    #[test]
    fn test_rejects_invalid_base() {
        assert!(matches!(
            ApiUrls::new("api.ravelry.com").unwrap_err(),
            HarvestError::Configuration(_)
        ));
    }
}
