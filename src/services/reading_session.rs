//! Reading session for one page load.
//!
//! Ties the pieces together: the classifier gates activation, the word
//! count is taken once, and every scroll or speed change recomputes the
//! report and feeds the completion state. Rendering and the celebration
//! effect are left to a [`Presenter`].

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::services::completion::{CompletionPhase, CompletionState, CompletionTransition};
use crate::services::debounce::Debouncer;
use crate::services::estimator::{count_words, estimate_time, snapshot};
use crate::services::html_document::DocumentMeasurement;
use crate::services::readability::{ReadabilityClassifierTrait, Verdict};
use crate::services::settings_engine::{load_reading_speed, save_reading_speed, SettingsStore};
use crate::types::document::ScrollGeometry;
use crate::types::errors::SettingsError;
use crate::types::progress::ReadingReport;
use crate::types::settings::ReadingSpeed;

/// Pages with fewer words than this are never tracked.
pub const MIN_WORD_COUNT: u64 = 500;

/// Receiver of everything the session wants shown.
pub trait Presenter {
    /// Called after every recomputation.
    fn render(&mut self, report: &ReadingReport);
    /// Called once, when the page is first read to the end.
    fn celebrate(&mut self, report: &ReadingReport);
}

/// Events the host delivers while a page is displayed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReadingEvent {
    Scroll(ScrollGeometry),
    /// The reader typed a new speed.
    SpeedInput(u32),
    /// The stored settings changed outside this session.
    SettingsChanged,
}

/// Outcome of trying to start a session on a page.
pub enum Activation<S, P> {
    Active(ReadingSession<S, P>),
    NotReadable(Verdict),
    TooShort { word_count: u64 },
}

impl<S, P> Activation<S, P> {
    pub fn into_session(self) -> Option<ReadingSession<S, P>> {
        match self {
            Activation::Active(session) => Some(session),
            _ => None,
        }
    }
}

/// Live tracking state of a single page.
pub struct ReadingSession<S, P> {
    id: Uuid,
    verdict: Verdict,
    word_count: u64,
    speed: ReadingSpeed,
    geometry: ScrollGeometry,
    completion: CompletionState,
    store: S,
    presenter: P,
    last_report: Option<ReadingReport>,
}

impl<S: SettingsStore, P: Presenter> ReadingSession<S, P> {
    /// Classifies `document` and, when it qualifies, starts tracking it and
    /// renders the initial report.
    ///
    /// The verdict and the word count are computed here and never again.
    pub fn activate<D, C>(document: &D, classifier: &C, store: S, presenter: P) -> Activation<S, P>
    where
        D: DocumentMeasurement,
        C: ReadabilityClassifierTrait,
    {
        let verdict = classifier.classify(document);
        if !verdict.readable {
            log::info!(
                "{} is not article-like ({:?}), staying inactive",
                display_host(document.host_name()),
                verdict.decided_by
            );
            return Activation::NotReadable(verdict);
        }

        let word_count = count_words(&document.visible_text());
        if word_count < MIN_WORD_COUNT {
            log::info!(
                "{} has only {} words, staying inactive",
                display_host(document.host_name()),
                word_count
            );
            return Activation::TooShort { word_count };
        }

        let speed = load_reading_speed(&store);
        let mut session = Self {
            id: Uuid::new_v4(),
            verdict,
            word_count,
            speed,
            geometry: document.geometry(),
            completion: CompletionState::new(),
            store,
            presenter,
            last_report: None,
        };
        log::info!(
            "[{}] tracking {}: {} words at {}",
            session.id,
            display_host(document.host_name()),
            word_count,
            speed
        );
        session.recompute();
        Activation::Active(session)
    }

    /// Recomputes after the viewport settled at `geometry`.
    pub fn on_scroll(&mut self, geometry: ScrollGeometry) -> ReadingReport {
        self.geometry = geometry;
        self.recompute()
    }

    /// Applies a speed typed by the reader. Unusable input falls back to the
    /// default speed. The value is persisted before the report is refreshed.
    pub fn on_speed_input(&mut self, wpm: u32) -> Result<ReadingReport, SettingsError> {
        let speed = ReadingSpeed::new(wpm).unwrap_or_default();
        save_reading_speed(&mut self.store, speed)?;
        self.speed = speed;
        Ok(self.recompute())
    }

    /// Re-reads the speed after the store reported a change.
    pub fn on_settings_changed(&mut self) -> ReadingReport {
        self.speed = load_reading_speed(&self.store);
        self.recompute()
    }

    /// Dispatches a host event.
    pub fn handle(&mut self, event: ReadingEvent) -> Result<ReadingReport, SettingsError> {
        match event {
            ReadingEvent::Scroll(geometry) => Ok(self.on_scroll(geometry)),
            ReadingEvent::SpeedInput(wpm) => self.on_speed_input(wpm),
            ReadingEvent::SettingsChanged => Ok(self.on_settings_changed()),
        }
    }

    fn recompute(&mut self) -> ReadingReport {
        let report = ReadingReport {
            snapshot: snapshot(self.word_count, &self.geometry, self.speed),
            word_count: self.word_count,
            total_minutes: estimate_time(self.word_count, self.speed),
            reading_speed: self.speed.wpm(),
        };
        log::debug!(
            "[{}] progress {}%, {} words left",
            self.id,
            report.snapshot.progress,
            report.snapshot.remaining_words
        );

        self.presenter.render(&report);
        if self.completion.observe(report.snapshot.progress) == CompletionTransition::JustCompleted {
            log::info!("[{}] finished reading", self.id);
            self.presenter.celebrate(&report);
        }

        self.last_report = Some(report);
        report
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn word_count(&self) -> u64 {
        self.word_count
    }

    pub fn speed(&self) -> ReadingSpeed {
        self.speed
    }

    pub fn phase(&self) -> CompletionPhase {
        self.completion.phase()
    }

    pub fn last_report(&self) -> Option<&ReadingReport> {
        self.last_report.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }
}

fn display_host(host: &str) -> &str {
    if host.is_empty() {
        "<local document>"
    } else {
        host
    }
}

/// Drives `session` from a stream of host events until the stream closes.
///
/// Scroll events go through `debouncer`, so only the last position of each
/// burst is recomputed; speed and settings events apply immediately. A
/// scroll still waiting when the stream closes is flushed before returning.
pub async fn run_event_loop<S, P>(
    session: &mut ReadingSession<S, P>,
    events: &mut mpsc::UnboundedReceiver<ReadingEvent>,
    debouncer: &mut Debouncer<ScrollGeometry>,
) where
    S: SettingsStore,
    P: Presenter,
{
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(ReadingEvent::Scroll(geometry)) => debouncer.notify(geometry),
                Some(other) => {
                    if let Err(e) = session.handle(other) {
                        log::warn!("[{}] failed to apply {:?}: {}", session.id(), other, e);
                    }
                }
                None => break,
            },
            Some(geometry) = debouncer.recv() => {
                session.on_scroll(geometry);
            }
        }
    }

    if let Some(geometry) = debouncer.settle().await {
        session.on_scroll(geometry);
    }
}
