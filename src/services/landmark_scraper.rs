use std::{path::Path, time::Duration};

use url::Url;

use crate::{
    domain::{
        definition_fields, pair_labeled_content, split_title, LandmarkRecord, LocationResult,
        SiteLayout, ADDRESS_KEY, ENGLISH_NAME_KEY,
    },
    error::{Result, ScrapeError},
};

use super::{persist_location_result, BrowserSession, Locator};

pub const DEFAULT_HOME_URL: &str = "https://www.mafengwo.cn/mdd/";
pub const DEFAULT_LANDMARK_COUNT: usize = 5;
pub const DEFAULT_TITLE_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Scrapes the top `landmark_count` landmarks of `location` with the default
/// site layout and writes them to `<output_dir>/<location>.json`.
pub async fn scrape_location_landmarks<S: BrowserSession + ?Sized>(
    session: &S,
    location: &str,
    output_dir: &Path,
    landmark_count: usize,
) -> Result<LocationResult> {
    LandmarkScraper::new(session)
        .scrape(location, output_dir, landmark_count)
        .await
}

pub struct LandmarkScraper<'a, S: ?Sized> {
    session: &'a S,
    layout: SiteLayout,
    home_url: String,
    title_timeout: Duration,
    poll_interval: Duration,
}

impl<'a, S: BrowserSession + ?Sized> LandmarkScraper<'a, S> {
    pub fn new(session: &'a S) -> Self {
        LandmarkScraper {
            session,
            layout: SiteLayout::default(),
            home_url: DEFAULT_HOME_URL.to_string(),
            title_timeout: DEFAULT_TITLE_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn layout(mut self, layout: SiteLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn home_url(mut self, url: impl Into<String>) -> Self {
        self.home_url = url.into();
        self
    }

    pub fn title_timeout(mut self, timeout: Duration) -> Self {
        self.title_timeout = timeout;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub async fn scrape(
        &self,
        location: &str,
        output_dir: &Path,
        landmark_count: usize,
    ) -> Result<LocationResult> {
        validate_location(location)?;
        if landmark_count == 0 {
            return Err(ScrapeError::InvalidLandmarkCount);
        }

        let candidates = self.find_candidates(location, landmark_count).await?;
        log::info!(
            "Found {} landmark candidates for {}",
            candidates.len(),
            location
        );

        let mut result = LocationResult::new(location);
        for url in candidates {
            let (name, record) = self.scrape_landmark(&url).await?;
            log::info!("Scraped {} fields for {} from {}", record.len(), name, url);
            result.insert(name, record);
        }

        let path = persist_location_result(output_dir, &result).await?;
        log::info!(
            "Wrote {} landmarks for {} to {}",
            result.len(),
            location,
            path.display()
        );

        Ok(result)
    }

    /// Searches for `location`, opens its attractions tab and returns the
    /// first `landmark_count` landmark page URLs in document order.
    async fn find_candidates(&self, location: &str, landmark_count: usize) -> Result<Vec<String>> {
        let session = self.session;
        let layout = &self.layout;

        session.goto(&self.home_url).await?;
        log::info!("Searching for {}", location);
        session
            .send_keys(&Locator::class(&layout.search_input_class), location)
            .await?;
        session
            .click(&Locator::class(&layout.search_button_class))
            .await?;
        session
            .click(&Locator::link_text(&layout.attractions_link_text))
            .await?;

        let hrefs = session
            .attributes(
                &Locator::partial_link_text(&layout.landmark_link_pattern),
                "href",
            )
            .await?;
        let base = session.current_url().await?;

        Ok(hrefs
            .into_iter()
            .take(landmark_count)
            .filter_map(|href| match href {
                Some(href) if !href.trim().is_empty() => Some(resolve_href(&base, href.trim())),
                _ => {
                    log::warn!("Skipping landmark link without href on {}", base);
                    None
                }
            })
            .collect())
    }

    async fn scrape_landmark(&self, url: &str) -> Result<(String, LandmarkRecord)> {
        let session = self.session;
        let layout = &self.layout;

        session.goto(url).await?;
        let title = Locator::class(&layout.title_class);
        session
            .wait_for(&title, self.title_timeout, self.poll_interval)
            .await?;

        let mut record = LandmarkRecord::new();

        let (name, english_name) = split_title(&session.text(&title).await?);
        if let Some(english_name) = english_name {
            record.insert(ENGLISH_NAME_KEY, english_name);
        }

        let address = session.text(&Locator::class(&layout.address_class)).await?;
        record.insert(ADDRESS_KEY, address);

        let contents = session.texts(&Locator::class(&layout.content_class)).await?;
        let labels = session.texts(&Locator::class(&layout.label_class)).await?;
        for (label, content) in pair_labeled_content(labels, &contents)? {
            record.insert(label, content);
        }

        let definitions = session.texts(&Locator::tag(&layout.definition_tag)).await?;
        for (key, value) in definition_fields(&definitions)? {
            record.insert(key, value);
        }

        Ok((name, record))
    }
}

fn validate_location(location: &str) -> Result<()> {
    if location.trim().is_empty() || location.contains(['/', '\\']) {
        return Err(ScrapeError::InvalidLocation(location.to_string()));
    }
    Ok(())
}

fn resolve_href(base: &str, href: &str) -> String {
    match Url::parse(base).and_then(|base| base.join(href)) {
        Ok(url) => url.to_string(),
        Err(_) => href.to_string(),
    }
}
