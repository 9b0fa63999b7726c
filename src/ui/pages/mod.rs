//! Page objects
//!
//! Each page type owns its locators and exposes wait-then-act operations.
//! Shared element plumbing lives in [`PageContext`].

#![allow(dead_code)]

mod dashboard;
mod login;

pub use dashboard::DashboardPage;
pub use login::LoginPage;

use chromiumoxide::element::Element;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::UiError;
use super::locator::Locator;
use super::wait::Wait;

/// Turn a wait timeout into `sentinel`; every other error propagates
pub(crate) fn timeout_as<T>(result: Result<T, UiError>, sentinel: T) -> Result<T, UiError> {
    match result {
        Err(e) if e.is_timeout() => {
            debug!("{}", e);
            Ok(sentinel)
        }
        other => other,
    }
}

/// Page handle plus wait policy shared by the page objects
#[derive(Clone, Copy)]
pub struct PageContext<'a> {
    page: &'a Page,
    wait: Wait,
}

impl<'a> PageContext<'a> {
    pub fn new(page: &'a Page, wait: Wait) -> Self {
        Self { page, wait }
    }

    pub fn page(&self) -> &'a Page {
        self.page
    }

    pub fn wait(&self) -> Wait {
        self.wait
    }

    /// Evaluate a script and deserialize its result
    pub async fn eval<T: DeserializeOwned>(&self, script: String) -> Result<T, UiError> {
        self.page
            .evaluate(script)
            .await?
            .into_value()
            .map_err(|e| UiError::Script(e.to_string()))
    }

    async fn check(&self, script: String) -> Result<Option<()>, UiError> {
        let ok: bool = self.eval(script).await?;
        Ok(ok.then_some(()))
    }

    /// Find an element immediately
    pub async fn find(&self, locator: &Locator) -> Result<Element, UiError> {
        let found = match (locator.css(), locator.xpath()) {
            (Some(css), _) => self.page.find_element(css).await,
            (None, Some(xpath)) => self.page.find_xpath(xpath).await,
            (None, None) => return Err(UiError::ElementNotFound(locator.to_string())),
        };
        found.map_err(|_| UiError::ElementNotFound(locator.to_string()))
    }

    pub async fn wait_for_presence(&self, locator: &Locator) -> Result<Element, UiError> {
        let script = locator.js_present();
        self.wait
            .until(&format!("presence of {locator}"), || self.check(script.clone()))
            .await?;
        self.find(locator).await
    }

    pub async fn wait_for_clickable(&self, locator: &Locator) -> Result<Element, UiError> {
        let script = locator.js_clickable();
        self.wait
            .until(&format!("{locator} to be clickable"), || {
                self.check(script.clone())
            })
            .await?;
        self.find(locator).await
    }

    /// Wait until the current URL contains `fragment`
    pub async fn wait_for_url(&self, fragment: &str) -> Result<String, UiError> {
        self.wait
            .until(&format!("URL containing '{fragment}'"), || async {
                let url = self.page.url().await?.unwrap_or_default();
                Ok::<_, UiError>(url.contains(fragment).then_some(url))
            })
            .await
    }

    /// Wait for an input, clear it and type into it
    pub async fn fill(&self, locator: &Locator, text: &str) -> Result<(), UiError> {
        let element = self.wait_for_presence(locator).await?;
        let _: bool = self.eval(locator.js_clear()).await?;
        element.click().await?.type_str(text).await?;
        debug!("Typed into {}", locator);
        Ok(())
    }

    /// Visible text of an element
    pub async fn text(&self, locator: &Locator) -> Result<String, UiError> {
        self.eval(locator.js_text()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_becomes_sentinel() {
        let timed_out: Result<bool, UiError> = Err(UiError::Timeout {
            condition: "URL containing '/dashboard'".into(),
            secs: 10,
        });
        assert!(!timeout_as(timed_out, false).unwrap());

        let timed_out: Result<Option<String>, UiError> = Err(UiError::Timeout {
            condition: "presence of class 'error-message'".into(),
            secs: 10,
        });
        assert_eq!(timeout_as(timed_out, None).unwrap(), None);
    }

    #[test]
    fn test_other_errors_propagate() {
        let failed: Result<bool, UiError> = Err(UiError::Script("not a bool".into()));
        assert!(matches!(timeout_as(failed, false), Err(UiError::Script(_))));

        let failed: Result<Option<String>, UiError> =
            Err(UiError::ElementNotFound("#email".into()));
        assert!(matches!(
            timeout_as(failed, None),
            Err(UiError::ElementNotFound(_))
        ));
    }

    #[test]
    fn test_success_passes_through() {
        assert!(timeout_as(Ok(true), false).unwrap());
        assert_eq!(
            timeout_as(Ok(Some("Invalid credentials".to_string())), None).unwrap(),
            Some("Invalid credentials".to_string())
        );
    }
}
