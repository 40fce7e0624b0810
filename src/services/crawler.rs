use std::{path::PathBuf, time::Duration};

use crate::{configuration::CrawlerSettings, error::Result};

use super::{output_path, BrowserSession, LandmarkScraper};

/// Scrapes every configured location in order, sharing one session.
///
/// The first failure ends the crawl; locations after it are not attempted.
pub async fn crawl_locations<S: BrowserSession + ?Sized>(
    session: &S,
    settings: &CrawlerSettings,
) -> Result<Vec<PathBuf>> {
    log::info!(
        "Started landmark crawl for {} locations",
        settings.locations.len()
    );

    let scraper = LandmarkScraper::new(session)
        .layout(settings.layout.clone())
        .home_url(settings.home_url.clone())
        .title_timeout(Duration::from_secs(settings.title_timeout_secs))
        .poll_interval(Duration::from_millis(settings.poll_interval_millis));

    let mut written = vec![];
    for location in settings.locations.iter() {
        if let Err(e) = scraper
            .scrape(location, &settings.output_dir, settings.landmark_count)
            .await
        {
            log::error!("Crawl stopped at {}: {}", location, e);
            return Err(e);
        }
        written.push(output_path(&settings.output_dir, location));
    }

    Ok(written)
}
