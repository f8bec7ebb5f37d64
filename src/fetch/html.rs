use std::collections::HashMap;

use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, Result};

/// Owned snapshot of a matched element.
///
/// Decoupled from the parser's borrowed node types so extraction code only
/// depends on [`SelectAll`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Text before the first child element.
    pub leading_text: String,
    /// Direct text-node children, in order.
    pub own_text: Vec<String>,
    /// All descendant text, concatenated.
    pub text: String,
    pub attrs: HashMap<String, String>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    fn from_ref(el: ElementRef<'_>) -> Self {
        let mut leading_text = String::new();
        let mut own_text = Vec::new();
        let mut seen_child_element = false;

        for child in el.children() {
            let node = child.value();
            if let Some(text) = node.as_text() {
                let text: &str = text;
                if !seen_child_element {
                    leading_text.push_str(text);
                }
                own_text.push(text.to_string());
            } else if node.is_element() {
                seen_child_element = true;
            }
        }

        Self {
            leading_text,
            own_text,
            text: el.text().collect(),
            attrs: el
                .value()
                .attrs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Selector capability over a parsed document.
pub trait SelectAll {
    /// All elements matching a CSS selector, in document order.
    fn select_all(&self, selector: &str) -> Result<Vec<Element>>;

    /// First match, or a parse error naming `what` when nothing matches.
    fn select_first(&self, selector: &str, what: &str) -> Result<Element> {
        self.select_all(selector)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Parse(format!("missing {what} ({selector})")))
    }
}

/// HTML document backed by `scraper`.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }
}

impl SelectAll for HtmlDocument {
    fn select_all(&self, selector: &str) -> Result<Vec<Element>> {
        let sel = Selector::parse(selector)
            .map_err(|e| Error::Parse(format!("invalid selector {selector}: {e:?}")))?;
        Ok(self.html.select(&sel).map(Element::from_ref).collect())
    }
}
