//! Document measurement over a parsed HTML page.
//!
//! The classifier and the reading session only ever talk to a document
//! through [`DocumentMeasurement`]; [`HtmlDocument`] is the implementation
//! backed by `scraper`. Scroll geometry cannot be derived from markup alone,
//! so the host pushes it in with [`HtmlDocument::set_geometry`].

use std::fs;
use std::path::Path;

use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

use crate::types::document::{ContentRegion, ScrollGeometry};
use crate::types::errors::DocumentError;

/// Tags whose text never reaches the screen.
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Read-only measurements the core needs from the displayed document.
pub trait DocumentMeasurement {
    /// Handle to a region, borrowed from the document for one measurement.
    type Region<'a>: Copy
    where
        Self: 'a;

    fn host_name(&self) -> &str;
    fn select_first(&self, selector: &str) -> Option<Self::Region<'_>>;
    fn body(&self) -> Option<Self::Region<'_>>;
    fn measure(&self, region: Self::Region<'_>) -> ContentRegion;
    fn paragraph_count(&self) -> usize;
    fn visible_text(&self) -> String;
    fn geometry(&self) -> ScrollGeometry;
}

/// An HTML page parsed into a DOM, plus the scroll geometry reported by the
/// host that displays it.
pub struct HtmlDocument {
    html: Html,
    url: Option<Url>,
    host: String,
    geometry: ScrollGeometry,
}

impl HtmlDocument {
    /// Parses `source` as a full HTML document served from `page_url`.
    ///
    /// An unparseable URL leaves the host name empty, which matches no
    /// reading-site domain.
    pub fn parse(source: &str, page_url: &str) -> Self {
        let url = Url::parse(page_url).ok();
        if url.is_none() && !page_url.is_empty() {
            log::debug!("Ignoring unparseable page URL: {}", page_url);
        }
        let host = url
            .as_ref()
            .and_then(|u| u.host_str())
            .unwrap_or_default()
            .to_string();

        Self {
            html: Html::parse_document(source),
            url,
            host,
            geometry: ScrollGeometry::default(),
        }
    }

    /// Reads and parses an HTML file from disk.
    pub fn from_file<P: AsRef<Path>>(path: P, page_url: &str) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            DocumentError::ReadFailed(format!("{}: {}", path.display(), e))
        })?;
        Ok(Self::parse(&source, page_url))
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Text of the `<title>` element, trimmed.
    pub fn title(&self) -> Option<String> {
        let title = self
            .select_first("title")
            .map(|el| el.text().collect::<String>())?;
        let title = title.trim();
        if title.is_empty() {
            None
        } else {
            Some(title.to_string())
        }
    }

    /// Records the latest viewport state reported by the host.
    pub fn set_geometry(&mut self, geometry: ScrollGeometry) {
        self.geometry = geometry;
    }
}

impl DocumentMeasurement for HtmlDocument {
    type Region<'a> = ElementRef<'a>;

    fn host_name(&self) -> &str {
        &self.host
    }

    fn select_first(&self, selector: &str) -> Option<ElementRef<'_>> {
        let parsed = match Selector::parse(selector) {
            Ok(s) => s,
            Err(e) => {
                log::debug!("Invalid selector {:?}: {:?}", selector, e);
                return None;
            }
        };
        self.html.select(&parsed).next()
    }

    fn body(&self) -> Option<ElementRef<'_>> {
        self.select_first("body")
    }

    fn measure(&self, region: ElementRef<'_>) -> ContentRegion {
        let text_len = collapsed_len(&visible_text_of(region));
        let markup_len = region.inner_html().chars().count();
        ContentRegion::new(text_len, markup_len)
    }

    fn paragraph_count(&self) -> usize {
        match Selector::parse("p") {
            Ok(sel) => self.html.select(&sel).count(),
            Err(_) => 0,
        }
    }

    fn visible_text(&self) -> String {
        self.body().map(visible_text_of).unwrap_or_default()
    }

    fn geometry(&self) -> ScrollGeometry {
        self.geometry
    }
}

/// Concatenated text of every rendered text node below `element`.
fn visible_text_of(element: ElementRef<'_>) -> String {
    let mut buf = String::new();
    collect_visible(element, &mut buf);
    buf
}

fn collect_visible(element: ElementRef<'_>, buf: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(t) => buf.push_str(&t.text),
            Node::Element(el) => {
                if HIDDEN_TAGS.contains(&el.name()) {
                    continue;
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_visible(child_el, buf);
                }
            }
            _ => {}
        }
    }
}

/// Length of `text` once whitespace runs are folded to a single space and
/// the ends are trimmed, approximating what a renderer would show.
fn collapsed_len(text: &str) -> usize {
    let mut len = 0;
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = len > 0;
            continue;
        }
        if pending_space {
            len += 1;
            pending_space = false;
        }
        len += 1;
    }
    len
}
