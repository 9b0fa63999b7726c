//! Element locators
//!
//! A locator names one element the way the page objects describe it and
//! translates into the CSS selector, XPath or JavaScript lookup the browser
//! needs.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Locator {
    Id(&'static str),
    Css(&'static str),
    ClassName(&'static str),
    /// Anchor whose visible text matches exactly
    LinkText(&'static str),
}

/// Quote a string as a JavaScript literal
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Quote a string as an XPath literal
fn xpath_string(value: &str) -> String {
    if !value.contains('\'') {
        format!("'{value}'")
    } else if !value.contains('"') {
        format!("\"{value}\"")
    } else {
        let parts: Vec<String> = value.split('\'').map(|p| format!("'{p}'")).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}

impl Locator {
    /// CSS selector, when the locator has one
    pub fn css(&self) -> Option<String> {
        match self {
            Locator::Id(id) => Some(format!("#{id}")),
            Locator::Css(selector) => Some(selector.to_string()),
            Locator::ClassName(class) => Some(format!(".{class}")),
            Locator::LinkText(_) => None,
        }
    }

    /// XPath expression; CSS locators have none
    pub fn xpath(&self) -> Option<String> {
        match self {
            Locator::Id(id) => Some(format!("//*[@id={}]", xpath_string(id))),
            Locator::ClassName(class) => Some(format!(
                "//*[contains(concat(' ', normalize-space(@class), ' '), ' {class} ')]"
            )),
            Locator::LinkText(text) => {
                Some(format!("//a[normalize-space(.)={}]", xpath_string(text)))
            }
            Locator::Css(_) => None,
        }
    }

    /// JavaScript expression evaluating to the element or `null`
    pub fn js_lookup(&self) -> String {
        match (self.css(), self.xpath()) {
            (Some(css), _) => format!("document.querySelector({})", js_string(&css)),
            (None, xpath) => format!(
                "document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
                js_string(&xpath.unwrap_or_default())
            ),
        }
    }

    /// Condition: element is attached to the DOM
    pub fn js_present(&self) -> String {
        format!("!!({})", self.js_lookup())
    }

    /// Condition: element is rendered and enabled
    pub fn js_clickable(&self) -> String {
        format!(
            "(() => {{ const el = {}; return !!el && el.getClientRects().length > 0 && !el.disabled; }})()",
            self.js_lookup()
        )
    }

    /// Visible text of the element, empty when absent
    pub fn js_text(&self) -> String {
        format!(
            "(() => {{ const el = {}; return el ? (el.innerText || el.textContent || '') : ''; }})()",
            self.js_lookup()
        )
    }

    /// Clear the value of an input element
    pub fn js_clear(&self) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) return false; el.value = ''; el.dispatchEvent(new Event('input', {{ bubbles: true }})); return true; }})()",
            self.js_lookup()
        )
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Id(id) => write!(f, "id={id}"),
            Locator::Css(selector) => write!(f, "css={selector}"),
            Locator::ClassName(class) => write!(f, "class={class}"),
            Locator::LinkText(text) => write!(f, "link text={text}"),
        }
    }
}
