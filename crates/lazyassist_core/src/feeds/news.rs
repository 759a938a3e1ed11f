//! News headlines: GNews over HTTP, or a curated offline table.

use super::{get_json, http_agent, FeedResult};
use chrono::NaiveDateTime;
use log::debug;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

const GNEWS_PROVIDER: &str = "gnews";
const GNEWS_HEADLINES_URL: &str = "https://gnews.io/api/v4/top-headlines";
const GNEWS_MAX_ARTICLES: &str = "10";
const PUBLISHED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single headline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
}

impl NewsArticle {
    /// Placeholder article shown when no provider could answer.
    pub fn unavailable(reason: &str, now: NaiveDateTime) -> Self {
        Self {
            title: "News temporarily unavailable".to_string(),
            description: format!("Could not retrieve news data: {reason}"),
            url: "#".to_string(),
            published_at: now.format(PUBLISHED_AT_FORMAT).to_string(),
        }
    }
}

/// Source of headlines for a topic.
pub trait NewsProvider {
    fn headlines(&self, topic: &str, now: NaiveDateTime) -> FeedResult<Vec<NewsArticle>>;
}

impl<T: NewsProvider + ?Sized> NewsProvider for Box<T> {
    fn headlines(&self, topic: &str, now: NaiveDateTime) -> FeedResult<Vec<NewsArticle>> {
        (**self).headlines(topic, now)
    }
}

/// GNews `top-headlines` client; `topic` is passed as the category.
pub struct GNewsProvider {
    agent: ureq::Agent,
    api_key: String,
}

impl GNewsProvider {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: http_agent(timeout),
            api_key: api_key.into(),
        }
    }
}

impl NewsProvider for GNewsProvider {
    fn headlines(&self, topic: &str, _now: NaiveDateTime) -> FeedResult<Vec<NewsArticle>> {
        debug!("event=news_fetch module=feeds status=start provider={GNEWS_PROVIDER}");
        let request = self
            .agent
            .get(GNEWS_HEADLINES_URL)
            .query("category", topic)
            .query("lang", "en")
            .query("max", GNEWS_MAX_ARTICLES)
            .query("apikey", &self.api_key);
        let body = get_json(GNEWS_PROVIDER, request)?;
        Ok(parse_gnews_articles(&body))
    }
}

/// Maps a GNews response body into articles; absent fields become empty.
pub fn parse_gnews_articles(body: &Value) -> Vec<NewsArticle> {
    let field = |article: &Value, key: &str| {
        article
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    body.get("articles")
        .and_then(Value::as_array)
        .map(|articles| {
            articles
                .iter()
                .map(|article| NewsArticle {
                    title: field(article, "title"),
                    description: field(article, "description"),
                    url: field(article, "url"),
                    published_at: field(article, "publishedAt"),
                })
                .collect()
        })
        .unwrap_or_default()
}

type Headline = (&'static str, &'static str);

/// Topic → headlines. Unknown topics fall back to the first entry.
const CURATED_HEADLINES: &[(&str, &[Headline])] = &[
    (
        "general",
        &[
            (
                "Global Leaders Meet to Discuss Climate Change",
                "World leaders gathered to address urgent climate issues.",
            ),
            (
                "Tech Company Launches New Smart Device",
                "Innovative features promise to change how we interact with technology.",
            ),
            (
                "Scientists Make Breakthrough in Cancer Research",
                "New treatment approach shows promising results in clinical trials.",
            ),
        ],
    ),
    (
        "technology",
        &[
            (
                "AI Development Reaches New Milestone",
                "Recent advancements in machine learning are reshaping multiple industries.",
            ),
            (
                "Cybersecurity Concerns Rise with Remote Work",
                "Experts warn about new threats as work-from-home continues.",
            ),
            (
                "New Programming Language Gains Popularity",
                "Developers are switching to this language for its efficiency and flexibility.",
            ),
        ],
    ),
    (
        "business",
        &[
            (
                "Stock Market Reaches All-Time High",
                "Investors optimistic about economic recovery and growth.",
            ),
            (
                "Major Merger Announced Between Industry Giants",
                "The deal is expected to reshape the competitive landscape.",
            ),
            (
                "Startup Secures Record Funding Round",
                "Innovative business model attracts significant venture capital.",
            ),
        ],
    ),
    (
        "health",
        &[
            (
                "New Study Reveals Benefits of Mediterranean Diet",
                "Research confirms positive effects on heart health and longevity.",
            ),
            (
                "Mental Health Awareness Campaigns Show Impact",
                "More people seeking help as stigma decreases.",
            ),
            (
                "Breakthrough in Vaccine Development",
                "New technology could speed up response to future pandemics.",
            ),
        ],
    ),
];

/// Offline provider used when no GNews API key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct CuratedNewsProvider;

impl NewsProvider for CuratedNewsProvider {
    fn headlines(&self, topic: &str, now: NaiveDateTime) -> FeedResult<Vec<NewsArticle>> {
        let topic = topic.to_lowercase();
        let headlines = CURATED_HEADLINES
            .iter()
            .find(|(key, _)| *key == topic)
            .or_else(|| CURATED_HEADLINES.first())
            .map_or(&[][..], |(_, headlines)| *headlines);
        let published_at = now.format(PUBLISHED_AT_FORMAT).to_string();

        Ok(headlines
            .iter()
            .map(|(title, description)| NewsArticle {
                title: (*title).to_string(),
                description: (*description).to_string(),
                url: "#".to_string(),
                published_at: published_at.clone(),
            })
            .collect())
    }
}
