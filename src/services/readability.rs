//! Readability classifier.
//!
//! Decides once per page whether the document is article-like prose worth
//! tracking. The decision is an ordered list of [`Stage`]s: the cheapest,
//! most precise signal runs first and the first decisive stage wins.

use serde::{Deserialize, Serialize};

use crate::services::density::region_density;
use crate::services::estimator::count_words;
use crate::services::html_document::DocumentMeasurement;

/// Host name fragments of sites that are known to serve articles.
pub const READING_DOMAINS: &[&str] = &[
    "medium.com",
    "zhihu.com",
    "jianshu.com",
    "csdn.net",
    "juejin.cn",
    "segmentfault.com",
    "infoq.cn",
    "ruanyifeng.com",
    "cnblogs.com",
    "weixin.qq.com",
    "wikipedia.org",
    "github.io",
    "gitbook.io",
    "readhub.cn",
    "toutiao.com",
];

/// Selectors for common article containers, most specific first.
pub const ARTICLE_SELECTORS: &[&str] = &[
    "article",
    "[role=\"article\"]",
    ".post-content",
    ".article-content",
    ".post-body",
    ".article-body",
    ".entry-content",
    ".markdown-body",
    ".main-content",
    "#article-content",
    ".rich_media_content",
    ".content-wrapper",
];

/// Tunables for the classifier cascade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub reading_domains: Vec<String>,
    pub article_selectors: Vec<String>,
    /// A matched container must be strictly denser than this.
    pub container_density_threshold: f64,
    /// Minimum non-whitespace characters in the whole document.
    pub min_text_len: usize,
    pub min_paragraphs: usize,
    /// The whole document must be strictly denser than this.
    pub document_density_threshold: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            reading_domains: READING_DOMAINS.iter().map(|d| d.to_string()).collect(),
            article_selectors: ARTICLE_SELECTORS.iter().map(|s| s.to_string()).collect(),
            container_density_threshold: 0.3,
            min_text_len: 500,
            min_paragraphs: 3,
            document_density_threshold: 0.2,
        }
    }
}

/// One heuristic in the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Host name contains a known reading-site fragment.
    DomainAllowlist,
    /// First matching article container is dense enough.
    ContainerDensity,
    /// Whole document is long, paragraph-structured and dense enough.
    DocumentFallback,
}

/// Result of evaluating a single stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Accept,
    Reject,
    /// Not decisive; move on to the next stage.
    Continue,
}

impl Stage {
    /// The default evaluation order.
    pub const CASCADE: [Stage; 3] = [
        Stage::DomainAllowlist,
        Stage::ContainerDensity,
        Stage::DocumentFallback,
    ];

    pub fn evaluate<D: DocumentMeasurement>(
        &self,
        document: &D,
        config: &ClassifierConfig,
    ) -> StageOutcome {
        match self {
            Stage::DomainAllowlist => domain_allowlist(document, config),
            Stage::ContainerDensity => container_density(document, config),
            Stage::DocumentFallback => document_fallback(document, config),
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::DomainAllowlist => write!(f, "domain allowlist"),
            Stage::ContainerDensity => write!(f, "article container density"),
            Stage::DocumentFallback => write!(f, "whole-document heuristics"),
        }
    }
}

fn domain_allowlist<D: DocumentMeasurement>(
    document: &D,
    config: &ClassifierConfig,
) -> StageOutcome {
    let host = document.host_name();
    if !host.is_empty()
        && config
            .reading_domains
            .iter()
            .any(|d| host.contains(d.as_str()))
    {
        StageOutcome::Accept
    } else {
        StageOutcome::Continue
    }
}

fn container_density<D: DocumentMeasurement>(
    document: &D,
    config: &ClassifierConfig,
) -> StageOutcome {
    let Some((selector, region)) = config
        .article_selectors
        .iter()
        .find_map(|s| document.select_first(s).map(|r| (s, r)))
    else {
        return StageOutcome::Continue;
    };

    let density = region_density(&document.measure(region));
    log::debug!("Article container {} has density {:?}", selector, density);
    match density {
        Some(d) if d > config.container_density_threshold => StageOutcome::Accept,
        _ => StageOutcome::Continue,
    }
}

fn document_fallback<D: DocumentMeasurement>(
    document: &D,
    config: &ClassifierConfig,
) -> StageOutcome {
    let text_len = count_words(&document.visible_text()) as usize;
    if text_len < config.min_text_len {
        log::debug!("Document too short: {} chars", text_len);
        return StageOutcome::Reject;
    }

    let paragraphs = document.paragraph_count();
    if paragraphs < config.min_paragraphs {
        log::debug!("Document has only {} paragraphs", paragraphs);
        return StageOutcome::Reject;
    }

    let density = document
        .body()
        .and_then(|body| region_density(&document.measure(body)));
    log::debug!("Whole-document density {:?}", density);
    match density {
        Some(d) if d > config.document_density_threshold => StageOutcome::Accept,
        _ => StageOutcome::Reject,
    }
}

/// Final decision plus the stage that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub readable: bool,
    /// `None` when no stage was decisive.
    pub decided_by: Option<Stage>,
}

/// Trait defining the readability classifier interface.
pub trait ReadabilityClassifierTrait {
    fn classify<D: DocumentMeasurement>(&self, document: &D) -> Verdict;

    fn is_readable<D: DocumentMeasurement>(&self, document: &D) -> bool {
        self.classify(document).readable
    }
}

/// Cascade of stages evaluated lazily, in order.
pub struct ReadabilityClassifier {
    config: ClassifierConfig,
    stages: Vec<Stage>,
}

impl ReadabilityClassifier {
    pub fn new() -> Self {
        Self::with_config(ClassifierConfig::default())
    }

    pub fn with_config(config: ClassifierConfig) -> Self {
        Self {
            config,
            stages: Stage::CASCADE.to_vec(),
        }
    }

    /// Replaces the evaluation order.
    pub fn with_stages(mut self, stages: Vec<Stage>) -> Self {
        self.stages = stages;
        self
    }
}

impl Default for ReadabilityClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadabilityClassifierTrait for ReadabilityClassifier {
    fn classify<D: DocumentMeasurement>(&self, document: &D) -> Verdict {
        for stage in &self.stages {
            match stage.evaluate(document, &self.config) {
                StageOutcome::Accept => {
                    log::debug!("{} accepted {}", stage, document.host_name());
                    return Verdict {
                        readable: true,
                        decided_by: Some(*stage),
                    };
                }
                StageOutcome::Reject => {
                    log::debug!("{} rejected {}", stage, document.host_name());
                    return Verdict {
                        readable: false,
                        decided_by: Some(*stage),
                    };
                }
                StageOutcome::Continue => {}
            }
        }
        Verdict {
            readable: false,
            decided_by: None,
        }
    }
}

/// Classifies `document` with the default configuration.
pub fn is_readable<D: DocumentMeasurement>(document: &D) -> bool {
    ReadabilityClassifier::new().is_readable(document)
}
