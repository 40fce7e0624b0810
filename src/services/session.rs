use std::{fmt, time::Duration};

use async_trait::async_trait;
use tokio::time::{self, Instant};

use crate::error::{Result, ScrapeError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    ClassName(String),
    LinkText(String),
    PartialLinkText(String),
    Tag(String),
}

impl Locator {
    pub fn class(name: &str) -> Self {
        Locator::ClassName(name.to_string())
    }

    pub fn link_text(text: &str) -> Self {
        Locator::LinkText(text.to_string())
    }

    pub fn partial_link_text(text: &str) -> Self {
        Locator::PartialLinkText(text.to_string())
    }

    pub fn tag(name: &str) -> Self {
        Locator::Tag(name.to_string())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::ClassName(c) => write!(f, "class `{}`", c),
            Locator::LinkText(t) => write!(f, "link text `{}`", t),
            Locator::PartialLinkText(t) => write!(f, "partial link text `{}`", t),
            Locator::Tag(t) => write!(f, "tag `{}`", t),
        }
    }
}

/// A browser the scraper can drive. Lifecycle belongs to the caller.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    async fn goto(&self, url: &str) -> Result<()>;

    async fn current_url(&self) -> Result<String>;

    /// Types into the first match.
    async fn send_keys(&self, locator: &Locator, text: &str) -> Result<()>;

    /// Clicks the first match.
    async fn click(&self, locator: &Locator) -> Result<()>;

    /// Number of matches on the current page.
    async fn count(&self, locator: &Locator) -> Result<usize>;

    /// Text of every match, in document order.
    async fn texts(&self, locator: &Locator) -> Result<Vec<String>>;

    /// Value of `name` for every match, in document order.
    async fn attributes(&self, locator: &Locator, name: &str) -> Result<Vec<Option<String>>>;

    /// Text of the first match.
    async fn text(&self, locator: &Locator) -> Result<String> {
        self.texts(locator)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ScrapeError::ElementNotFound {
                locator: locator.clone(),
            })
    }

    async fn wait_for(&self, locator: &Locator, timeout: Duration, poll: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;

        loop {
            if self.count(locator).await? > 0 {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(ScrapeError::PageTimeout {
                    locator: locator.clone(),
                    url: self.current_url().await?,
                    timeout,
                });
            }
            time::sleep(poll).await;
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    use async_trait::async_trait;

    use super::{BrowserSession, Locator};
    use crate::error::{Result, ScrapeError};

    #[derive(Debug, Clone, Default)]
    pub struct FakeElement {
        pub tag: String,
        pub classes: Vec<String>,
        pub text: String,
        pub attrs: HashMap<String, String>,
    }

    impl FakeElement {
        pub fn new(tag: &str) -> Self {
            FakeElement {
                tag: tag.to_string(),
                ..Default::default()
            }
        }

        pub fn with_class(tag: &str, class: &str, text: &str) -> Self {
            FakeElement::new(tag).class(class).text(text)
        }

        pub fn link(text: &str, href: &str) -> Self {
            FakeElement::new("a").text(text).attr("href", href)
        }

        pub fn class(mut self, class: &str) -> Self {
            self.classes.push(class.to_string());
            self
        }

        pub fn text(mut self, text: &str) -> Self {
            self.text = text.to_string();
            self
        }

        pub fn attr(mut self, name: &str, value: &str) -> Self {
            self.attrs.insert(name.to_string(), value.to_string());
            self
        }

        fn matches(&self, locator: &Locator) -> bool {
            match locator {
                Locator::ClassName(c) => self.classes.iter().any(|cls| cls == c),
                Locator::LinkText(t) => self.tag == "a" && self.text == *t,
                Locator::PartialLinkText(t) => self.tag == "a" && self.text.contains(t.as_str()),
                Locator::Tag(t) => self.tag == *t,
            }
        }
    }

    #[derive(Debug, Default)]
    struct FakeState {
        current_url: String,
        visited: Vec<String>,
        typed: Vec<String>,
        text_reads: usize,
    }

    /// Serves fixed pages keyed by URL. Clicking an element follows its
    /// `href`, or `navigates_to` for buttons, where `{query}` stands for the
    /// last typed text.
    #[derive(Debug, Clone, Default)]
    pub struct FakeSession {
        pages: Arc<HashMap<String, Vec<FakeElement>>>,
        state: Arc<Mutex<FakeState>>,
    }

    impl FakeSession {
        pub fn new(pages: HashMap<String, Vec<FakeElement>>) -> Self {
            FakeSession {
                pages: Arc::new(pages),
                state: Arc::default(),
            }
        }

        pub fn visited(&self) -> Vec<String> {
            self.state.lock().unwrap().visited.clone()
        }

        pub fn typed(&self) -> Vec<String> {
            self.state.lock().unwrap().typed.clone()
        }

        pub fn text_reads(&self) -> usize {
            self.state.lock().unwrap().text_reads
        }

        fn matching(&self, locator: &Locator) -> Vec<FakeElement> {
            let url = self.state.lock().unwrap().current_url.clone();
            self.pages
                .get(&url)
                .map(|elements| {
                    elements
                        .iter()
                        .filter(|e| e.matches(locator))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default()
        }

        fn first(&self, locator: &Locator) -> Result<FakeElement> {
            self.matching(locator)
                .into_iter()
                .next()
                .ok_or_else(|| ScrapeError::ElementNotFound {
                    locator: locator.clone(),
                })
        }
    }

    #[async_trait]
    impl BrowserSession for FakeSession {
        async fn goto(&self, url: &str) -> Result<()> {
            let mut state = self.state.lock().unwrap();
            state.current_url = url.to_string();
            state.visited.push(url.to_string());
            Ok(())
        }

        async fn current_url(&self) -> Result<String> {
            Ok(self.state.lock().unwrap().current_url.clone())
        }

        async fn send_keys(&self, locator: &Locator, text: &str) -> Result<()> {
            self.first(locator)?;
            self.state.lock().unwrap().typed.push(text.to_string());
            Ok(())
        }

        async fn click(&self, locator: &Locator) -> Result<()> {
            let element = self.first(locator)?;
            let target = element
                .attrs
                .get("href")
                .or_else(|| element.attrs.get("navigates_to"));
            if let Some(url) = target {
                let query = self.typed().last().cloned().unwrap_or_default();
                self.goto(&url.replace("{query}", &query)).await?;
            }
            Ok(())
        }

        async fn count(&self, locator: &Locator) -> Result<usize> {
            Ok(self.matching(locator).len())
        }

        async fn texts(&self, locator: &Locator) -> Result<Vec<String>> {
            let texts: Vec<String> = self
                .matching(locator)
                .into_iter()
                .map(|e| e.text)
                .collect();
            self.state.lock().unwrap().text_reads += texts.len();
            Ok(texts)
        }

        async fn attributes(&self, locator: &Locator, name: &str) -> Result<Vec<Option<String>>> {
            Ok(self
                .matching(locator)
                .into_iter()
                .map(|e| e.attrs.get(name).cloned())
                .collect())
        }
    }
}
