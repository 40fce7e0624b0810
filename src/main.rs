use anyhow::Context;
use env_logger::Env;
use landmark_crawler::{
    configuration::get_configuration,
    services::{crawl_locations, Droid},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration.")?;

    let droid = Droid::new(&configuration.browser)
        .await
        .context("Failed to start webdriver session")?;

    let crawl_result = crawl_locations(&droid, &configuration.crawler).await;

    // Quit even when the crawl failed.
    if let Err(e) = droid.quit().await {
        log::error!("Failed to quit webdriver session: {:?}", e);
    }

    let written = crawl_result.context("Landmark crawl failed")?;
    log::info!("Finished crawl, wrote {} files", written.len());

    Ok(())
}
