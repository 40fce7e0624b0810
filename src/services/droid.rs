use async_trait::async_trait;
use thirtyfour::{
    error::WebDriverResult, By, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver,
    WebElement,
};

use crate::{
    configuration::BrowserSettings,
    error::{Result, ScrapeError},
};

use super::{BrowserSession, Locator};

pub struct Droid {
    pub driver: WebDriver,
}

impl Droid {
    pub async fn new(settings: &BrowserSettings) -> WebDriverResult<Self> {
        let mut caps = DesiredCapabilities::chrome();
        if settings.headless {
            caps.set_headless()?;
        }

        log::info!("Connecting to webdriver at {}", settings.webdriver_url);
        let driver = WebDriver::new(settings.webdriver_url.as_str(), caps).await?;
        if settings.maximize_window {
            driver.maximize_window().await?;
        }

        Ok(Droid { driver })
    }

    pub async fn quit(self) -> WebDriverResult<()> {
        self.driver.quit().await
    }

    async fn first(&self, locator: &Locator) -> Result<WebElement> {
        self.driver
            .find_all(by(locator))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ScrapeError::ElementNotFound {
                locator: locator.clone(),
            })
    }
}

fn by(locator: &Locator) -> By {
    match locator {
        Locator::ClassName(c) => By::ClassName(c.as_str()),
        Locator::LinkText(t) => By::LinkText(t.as_str()),
        Locator::PartialLinkText(t) => By::PartialLinkText(t.as_str()),
        Locator::Tag(t) => By::Tag(t.as_str()),
    }
}

#[async_trait]
impl BrowserSession for Droid {
    async fn goto(&self, url: &str) -> Result<()> {
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.driver.current_url().await?.to_string())
    }

    async fn send_keys(&self, locator: &Locator, text: &str) -> Result<()> {
        self.first(locator).await?.send_keys(text).await?;
        Ok(())
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        self.first(locator).await?.click().await?;
        Ok(())
    }

    async fn count(&self, locator: &Locator) -> Result<usize> {
        Ok(self.driver.find_all(by(locator)).await?.len())
    }

    async fn text(&self, locator: &Locator) -> Result<String> {
        Ok(self.first(locator).await?.text().await?)
    }

    async fn texts(&self, locator: &Locator) -> Result<Vec<String>> {
        let mut texts = vec![];
        for element in self.driver.find_all(by(locator)).await? {
            texts.push(element.text().await?);
        }
        Ok(texts)
    }

    // Properties first so `href` comes back resolved, like `element.href` in the page.
    // An anchor without the attribute still reports an empty `href` property.
    async fn attributes(&self, locator: &Locator, name: &str) -> Result<Vec<Option<String>>> {
        let mut values = vec![];
        for element in self.driver.find_all(by(locator)).await? {
            let value = match element.prop(name).await? {
                Some(v) if !v.is_empty() => Some(v),
                _ => element.attr(name).await?,
            };
            values.push(value);
        }
        Ok(values)
    }
}
