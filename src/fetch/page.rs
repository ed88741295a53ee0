// src/fetch/page.rs
// =============================================================================
// The parsed form of one fetched page.
//
// A wiki article is reduced to its content blocks (by default the <p>
// elements inside #mw-content-text). For every block we keep:
// - its text, which the index counts terms in
// - the raw href of every anchor inside it, in document order
//
// The scraper DOM (Html) is dropped as soon as parsing is done, so a
// PageContent is plain owned data and can be held across .await points.
// =============================================================================

use crate::error::FetchError;
use scraper::{Html, Selector};
use url::Url;

/// Paragraphs of the article body on MediaWiki sites.
pub const DEFAULT_CONTENT_SELECTOR: &str = "#mw-content-text p";

const ANCHOR_SELECTOR: &str = "a";

/// One block-level element of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub text: String,
    /// Raw `href` values, exactly as written in the markup
    pub hrefs: Vec<String>,
}

/// Content of a fetched document plus the location it was served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    base: Url,
    blocks: Vec<ContentBlock>,
}

impl PageContent {
    pub fn new(base: Url, blocks: Vec<ContentBlock>) -> Self {
        Self { base, blocks }
    }

    /// The document's own location; relative links resolve against it.
    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    /// Text of every block, in document order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|block| block.text.as_str())
    }
}

/// Turns HTML into `PageContent` using a content-block selector.
#[derive(Debug, Clone)]
pub struct PageParser {
    content: Selector,
    anchor: Selector,
}

impl PageParser {
    pub fn new(content_selector: &str) -> Result<Self, FetchError> {
        Ok(Self {
            content: parse_selector(content_selector)?,
            anchor: parse_selector(ANCHOR_SELECTOR)?,
        })
    }

    pub fn parse(&self, html: &str, base: Url) -> PageContent {
        let document = Html::parse_document(html);

        let blocks = document
            .select(&self.content)
            .map(|block| ContentBlock {
                text: block.text().collect::<String>().trim().to_string(),
                hrefs: block
                    .select(&self.anchor)
                    .filter_map(|anchor| anchor.value().attr("href"))
                    .map(str::to_string)
                    .collect(),
            })
            .collect();

        PageContent::new(base, blocks)
    }
}

fn parse_selector(selector: &str) -> Result<Selector, FetchError> {
    Selector::parse(selector).map_err(|e| FetchError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = r#"
        <html><body>
          <p>Outside the article body, <a href="/wiki/Ignored">ignored</a>.</p>
          <div id="mw-content-text">
            <p>Java is a <a href="/wiki/Programming_language">programming language</a>.</p>
            <table><tr><td><a href="/wiki/Table">not a paragraph</a></td></tr></table>
            <p>It runs on the <a href="/wiki/Java_virtual_machine">JVM</a>
               and <a>has no target</a>.</p>
          </div>
        </body></html>
    "#;

    fn base() -> Url {
        Url::parse("https://en.wikipedia.org/wiki/Java_(programming_language)").unwrap()
    }

    #[test]
    fn test_parse_selects_article_paragraphs() {
        let page = PageParser::new(DEFAULT_CONTENT_SELECTOR).unwrap().parse(ARTICLE, base());

        assert_eq!(page.blocks().len(), 2);
        assert_eq!(page.blocks()[0].text, "Java is a programming language.");
        assert_eq!(page.blocks()[0].hrefs, vec!["/wiki/Programming_language"]);
        // anchors without href are dropped
        assert_eq!(page.blocks()[1].hrefs, vec!["/wiki/Java_virtual_machine"]);
        assert_eq!(page.base(), &base());
    }

    #[test]
    fn test_custom_selector() {
        let page = PageParser::new("td").unwrap().parse(ARTICLE, base());
        assert_eq!(page.blocks().len(), 1);
        assert_eq!(page.texts().collect::<Vec<_>>(), vec!["not a paragraph"]);
    }

    #[test]
    fn test_invalid_selector() {
        let err = PageParser::new("p[").unwrap_err();
        assert!(matches!(err, FetchError::Selector { .. }));
    }
}
