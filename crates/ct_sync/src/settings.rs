use ct_core::ContentFilter;
use std::time::Duration;

pub const DEEP_RESEARCH_TYPES: [&str; 2] = ["openai_deep_research", "perplexity_deep_research"];
pub const NON_TECH_TYPE: &str = "rss_reddit_goodnews";
/// Local hours at which the content cache goes stale.
pub const DEFAULT_BOUNDARY_HOURS: [u32; 2] = [7, 17];

#[derive(Debug, Clone)]
pub struct SyncSettings {
    pub boundary_hours: Vec<u32>,
    pub deep_research_types: Vec<String>,
    pub non_tech_type: String,
    pub request_timeout: Duration,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            boundary_hours: DEFAULT_BOUNDARY_HOURS.to_vec(),
            deep_research_types: DEEP_RESEARCH_TYPES.iter().map(|t| t.to_string()).collect(),
            non_tech_type: NON_TECH_TYPE.to_string(),
            request_timeout: ct_remote::config::DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl SyncSettings {
    pub fn deep_research_filter(&self) -> ContentFilter {
        ContentFilter::In(self.deep_research_types.clone())
    }

    pub fn other_content_filter(&self) -> ContentFilter {
        ContentFilter::NotIn(self.deep_research_types.clone())
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
