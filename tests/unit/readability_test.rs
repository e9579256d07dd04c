//! Integration tests for the readability classifier.
//!
//! Real HTML pages go through `HtmlDocument`; cases that need exact
//! measurements use a document with fixed numbers instead.

use rstest::rstest;

use readpace::services::html_document::{DocumentMeasurement, HtmlDocument};
use readpace::services::readability::{
    is_readable, ClassifierConfig, ReadabilityClassifier, ReadabilityClassifierTrait, Stage,
};
use readpace::types::document::{ContentRegion, ScrollGeometry};

/// Document with fixed measurements and no article container.
struct MeasuredDocument {
    host: &'static str,
    text_len: usize,
    paragraphs: usize,
    body: ContentRegion,
}

impl DocumentMeasurement for MeasuredDocument {
    type Region<'a> = ();

    fn host_name(&self) -> &str {
        self.host
    }

    fn select_first(&self, _selector: &str) -> Option<()> {
        None
    }

    fn body(&self) -> Option<()> {
        Some(())
    }

    fn measure(&self, _region: ()) -> ContentRegion {
        self.body
    }

    fn paragraph_count(&self) -> usize {
        self.paragraphs
    }

    fn visible_text(&self) -> String {
        "字".repeat(self.text_len)
    }

    fn geometry(&self) -> ScrollGeometry {
        ScrollGeometry::default()
    }
}

fn paragraphs(count: usize, chars_each: usize) -> String {
    (0..count)
        .map(|i| format!("<p>{}</p>", "abcdefghij".repeat(chars_each / 10) + &i.to_string()))
        .collect()
}

#[rstest]
#[case("https://zhuanlan.zhihu.com/p/123", true)]
#[case("https://foo.medium.com/a-story", true)]
#[case("https://en.wikipedia.org/wiki/Rust", true)]
#[case("https://someone.github.io/blog/post", true)]
#[case("https://mp.weixin.qq.com/s/abc", true)]
#[case("https://example.com/", false)]
#[case("https://news.ycombinator.com/", false)]
fn test_domain_allowlist(#[case] url: &str, #[case] expected: bool) {
    let doc = HtmlDocument::parse("<html><body><nav>menu</nav></body></html>", url);
    assert_eq!(is_readable(&doc), expected, "host of {}", url);
}

#[test]
fn test_known_domain_wins_regardless_of_content() {
    let doc = HtmlDocument::parse("", "https://www.zhihu.com/question/1");
    let verdict = ReadabilityClassifier::new().classify(&doc);
    assert!(verdict.readable);
    assert_eq!(verdict.decided_by, Some(Stage::DomainAllowlist));
}

#[test]
fn test_dense_article_container_is_readable() {
    let html = format!(
        "<html><body><header><a href=\"/\">Home</a></header><article>{}</article></body></html>",
        paragraphs(4, 200)
    );
    let doc = HtmlDocument::parse(&html, "https://blog.example.com/post");
    let verdict = ReadabilityClassifier::new().classify(&doc);
    assert!(verdict.readable);
    assert_eq!(verdict.decided_by, Some(Stage::ContainerDensity));
}

#[test]
fn test_cms_class_container_is_readable() {
    let html = format!(
        "<html><body><div class=\"entry-content\">{}</div></body></html>",
        paragraphs(2, 100)
    );
    let doc = HtmlDocument::parse(&html, "https://example.com/2024/01/post");
    let verdict = ReadabilityClassifier::new().classify(&doc);
    assert_eq!(verdict.decided_by, Some(Stage::ContainerDensity));
}

#[test]
fn test_fallback_accepts_plain_prose() {
    let html = format!("<html><body><div>{}</div></body></html>", paragraphs(5, 200));
    let doc = HtmlDocument::parse(&html, "https://example.com/essay");
    let verdict = ReadabilityClassifier::new().classify(&doc);
    assert!(verdict.readable);
    assert_eq!(verdict.decided_by, Some(Stage::DocumentFallback));
}

#[test]
fn test_fallback_rejects_link_farm() {
    let links: String = (0..40)
        .map(|i| {
            format!(
                "<div class=\"nav-item nav-item--primary\"><a href=\"https://example.com/section/{}\">S{}</a></div>",
                i, i
            )
        })
        .collect();
    let html = format!("<html><body>{}</body></html>", links);
    let doc = HtmlDocument::parse(&html, "https://example.com/");
    let verdict = ReadabilityClassifier::new().classify(&doc);
    assert!(!verdict.readable);
    assert_eq!(verdict.decided_by, Some(Stage::DocumentFallback));
}

#[test]
fn test_fallback_requires_three_paragraphs() {
    let html = format!("<html><body>{}</body></html>", paragraphs(2, 600));
    let doc = HtmlDocument::parse(&html, "https://example.com/");
    assert!(!is_readable(&doc));
}

#[test]
fn test_fallback_rejects_script_heavy_page() {
    let html = format!(
        "<html><body>{}<script>{}</script></body></html>",
        paragraphs(4, 200),
        "var x = 1;".repeat(1000)
    );
    let doc = HtmlDocument::parse(&html, "https://example.com/app");
    assert!(!is_readable(&doc));
}

#[test]
fn test_sparse_container_falls_back_to_document() {
    // The article container is mostly markup, but the page as a whole
    // still carries enough prose.
    let padded: String = (0..20)
        .map(|_| "<span class=\"decoration decoration--wide\" data-x=\"1\"></span>")
        .collect();
    let html = format!(
        "<html><body><article>{}x</article><div>{}</div></body></html>",
        padded,
        paragraphs(5, 300)
    );
    let doc = HtmlDocument::parse(&html, "https://example.com/");
    let verdict = ReadabilityClassifier::new().classify(&doc);
    assert!(verdict.readable);
    assert_eq!(verdict.decided_by, Some(Stage::DocumentFallback));
}

#[test]
fn test_short_document_with_paragraphs_is_rejected() {
    let doc = MeasuredDocument {
        host: "example.com",
        text_len: 400,
        paragraphs: 5,
        body: ContentRegion::new(400, 800),
    };
    assert!(!is_readable(&doc));
}

#[test]
fn test_fallback_density_above_threshold_is_accepted() {
    let doc = MeasuredDocument {
        host: "example.com",
        text_len: 600,
        paragraphs: 4,
        body: ContentRegion::new(600, 2400),
    };
    let verdict = ReadabilityClassifier::new().classify(&doc);
    assert!(verdict.readable);
    assert_eq!(verdict.decided_by, Some(Stage::DocumentFallback));
}

#[test]
fn test_fallback_density_at_threshold_is_rejected() {
    let doc = MeasuredDocument {
        host: "example.com",
        text_len: 600,
        paragraphs: 4,
        body: ContentRegion::new(600, 3000),
    };
    assert!(!is_readable(&doc));
}

#[test]
fn test_custom_config_thresholds() {
    let config = ClassifierConfig {
        reading_domains: vec!["example.org".to_string()],
        min_text_len: 100,
        ..ClassifierConfig::default()
    };
    let classifier = ReadabilityClassifier::with_config(config);

    let allowed = HtmlDocument::parse("", "https://docs.example.org/");
    assert!(classifier.is_readable(&allowed));

    let doc = MeasuredDocument {
        host: "zhihu.com",
        text_len: 150,
        paragraphs: 3,
        body: ContentRegion::new(150, 300),
    };
    // zhihu.com is no longer on the list, but the lower length floor lets
    // the fallback accept it.
    let verdict = classifier.classify(&doc);
    assert_eq!(verdict.decided_by, Some(Stage::DocumentFallback));
    assert!(verdict.readable);
}
