//! Billboard chart scraping.
//!
//! The chart page for a week lives at `{base}/hot-100/{YYYY-MM-DD}/`. Song
//! titles are the `h3` headings nested inside the chart's list items, so the
//! extraction depends on the selector path `li ul li h3` and breaks when the
//! site changes its markup. That case surfaces as an empty title list, which
//! the caller reports as [`ChartError::NoEntries`], separate from network
//! failures.

use chrono::NaiveDate;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::{config::Config, error::ChartError, utils};

pub const TITLE_SELECTOR: &str = "li ul li h3";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct ChartScraper {
    client: Client,
    base_url: String,
}

impl ChartScraper {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.chart_base_url.clone())
    }

    pub fn chart_url(&self, date: NaiveDate) -> String {
        format!(
            "{base}/hot-100/{date}/",
            base = self.base_url.trim_end_matches('/'),
            date = utils::format_date(date)
        )
    }

    /// Fetches the chart page for `date` and returns its titles in rank order.
    ///
    /// # Errors
    ///
    /// - [`ChartError::Network`] if the request could not be sent or read
    /// - [`ChartError::Status`] for any non-success status
    /// - [`ChartError::EmptyBody`] if the server answered with an empty page
    pub async fn fetch_titles(&self, date: NaiveDate) -> Result<Vec<String>, ChartError> {
        let response = self
            .client
            .get(self.chart_url(date))
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChartError::Status(status));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(ChartError::EmptyBody);
        }

        parse_titles(&body)
    }
}

/// Extracts the trimmed text of every element matching [`TITLE_SELECTOR`].
pub fn parse_titles(html: &str) -> Result<Vec<String>, ChartError> {
    let selector =
        Selector::parse(TITLE_SELECTOR).map_err(|e| ChartError::Selector(e.to_string()))?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect())
}
