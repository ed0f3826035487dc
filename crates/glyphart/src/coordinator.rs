//! One request at a time, from raw input to published art
//!
//! Every submission walks the same road:
//!
//! 1. **Gate** - rejected with `Busy` unless the session is idle
//! 2. **Start** - session goes in flight, `{kind}:gen:start` is published
//! 3. **Validate** - raw fields become trusted fields
//! 4. **Cache** - text and poem requests may be answered from the cache
//! 5. **Render** - under a timeout, text/poem and image budgets differ
//! 6. **Store** - text and poem results are cached
//! 7. **Finish** - `complete` or `error` is published, then the session goes idle
//!
//! The session reset lives in a guard's `Drop`, so a submission that is
//! cancelled or unwinds halfway still frees the session.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;

use glyphart_core::{
    cache::{CacheStatistics, ResultCache},
    cache_key::CacheKey,
    config::CoordinatorConfig,
    error::{GlyphartError, Result, ValidationError},
    request::{
        GenerationRequest, ImageRequest, PoemRequest, TextRequest, MAX_IMAGE_WIDTH,
        MIN_IMAGE_WIDTH, SUPPORTED_ANIMATIONS, SUPPORTED_COLORS,
    },
    result::{measure, now_millis, ImageMetadata, Metadata, PoemMetadata, RenderResult, TextMetadata},
    traits::{
        CancelToken, GlyphSource, InputValidator, Notifier, RenderJob, RenderOutput, Renderer,
        TextField,
    },
    types::{CharRamp, RequestKind, SessionState},
    GlyphTable,
};
use glyphart_fontdb::GlyphLibrary;
use glyphart_input::DefaultValidator;
use glyphart_render::EngineRenderer;

use crate::events::{self, Phase};
use crate::notifier::EventBus;

/// Frees the session when dropped
struct SessionGuard<'a> {
    session: &'a Mutex<SessionState>,
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        *self.session.lock() = SessionState::Idle;
    }
}

/// Drives generation requests through validation, caching, and rendering
///
/// ```no_run
/// # async fn demo() -> glyphart_core::Result<()> {
/// use glyphart::GenerationCoordinator;
/// use glyphart_core::request::TextRequest;
///
/// let coordinator = GenerationCoordinator::builder().build()?;
/// let result = coordinator.submit_text(TextRequest::new("Hello")).await?;
/// println!("{}", result.ascii_text);
/// # Ok(())
/// # }
/// ```
pub struct GenerationCoordinator {
    fonts: Arc<dyn GlyphSource>,
    validator: Arc<dyn InputValidator>,
    renderer: Arc<dyn Renderer>,
    notifier: Arc<dyn Notifier>,
    cache: ResultCache,
    config: CoordinatorConfig,
    session: Mutex<SessionState>,
    last_results: Mutex<HashMap<RequestKind, Arc<RenderResult>>>,
}

impl GenerationCoordinator {
    pub fn builder() -> CoordinatorBuilder {
        CoordinatorBuilder::new()
    }

    /// Render banner text
    pub async fn submit_text(&self, request: TextRequest) -> Result<Arc<RenderResult>> {
        self.submit(GenerationRequest::Text(request)).await
    }

    /// Map a picture onto characters
    pub async fn submit_image(&self, request: ImageRequest) -> Result<Arc<RenderResult>> {
        self.submit(GenerationRequest::Image(request)).await
    }

    /// Render a poem with its keywords drawn as glyph art
    pub async fn submit_poem(&self, request: PoemRequest) -> Result<Arc<RenderResult>> {
        self.submit(GenerationRequest::Poem(request)).await
    }

    /// Run any request, publishing its events along the way
    ///
    /// Returns `Busy` without publishing `start` when another request is in
    /// flight. Otherwise exactly one of `complete` or `error` follows `start`,
    /// published before the session goes idle again. A handler that submits
    /// from inside a terminal event is therefore turned away as busy.
    pub async fn submit(&self, request: GenerationRequest) -> Result<Arc<RenderResult>> {
        let kind = request.kind();
        let guard = match self.begin(kind) {
            Ok(guard) => guard,
            Err(err) => {
                log::warn!("Rejected {kind} request: {err}");
                self.publish(kind, Phase::Busy, events::busy_payload(&err));
                return Err(err);
            },
        };

        log::debug!("Accepted {kind} request");
        self.publish(kind, Phase::Start, events::start_payload(&request, self.config.echo_limit));

        let outcome = match request {
            GenerationRequest::Text(request) => self.generate_text(&request).await,
            GenerationRequest::Image(request) => self.generate_image(&request).await,
            GenerationRequest::Poem(request) => self.generate_poem(&request).await,
        };

        // Still in flight here; the session goes idle only after the terminal event
        match &outcome {
            Ok(result) => {
                self.last_results.lock().insert(kind, Arc::clone(result));
                self.publish(kind, Phase::Complete, events::complete_payload(result));
            },
            Err(err) => {
                log::warn!("{kind} generation failed: {err}");
                self.publish(kind, Phase::Error, events::error_payload(err));
            },
        }
        drop(guard);
        outcome
    }

    /// What the coordinator is doing right now
    pub fn session(&self) -> SessionState {
        *self.session.lock()
    }

    /// Latest successful result of a kind; failures never replace it
    pub fn last_result(&self, kind: RequestKind) -> Option<Arc<RenderResult>> {
        self.last_results.lock().get(&kind).cloned()
    }

    pub fn cache_statistics(&self) -> CacheStatistics {
        self.cache.statistics()
    }

    /// Drop cached results inserted more than `max_age` ago
    pub fn purge_cache(&self, max_age: Duration) -> usize {
        self.cache.purge_older_than(max_age)
    }

    /// Change how many results the cache keeps
    pub fn resize_cache(&self, capacity: usize) -> Result<()> {
        self.cache.resize(capacity)
    }

    /// Forget the cached result for a request
    ///
    /// The request is normalized the same way a submission would be, so
    /// fails when it would fail validation. Image requests are never cached.
    pub fn invalidate(&self, request: &GenerationRequest) -> Result<bool> {
        let key = match request {
            GenerationRequest::Text(request) => CacheKey::for_text(&self.normalize_text(request)?),
            GenerationRequest::Poem(request) => CacheKey::for_poem(&self.normalize_poem(request)?),
            GenerationRequest::Image(_) => return Ok(false),
        };
        Ok(self.cache.invalidate(&key))
    }

    /// Empty the result cache and any renderer memo
    pub fn clear_cache(&self) {
        self.cache.clear();
        self.renderer.clear_cache();
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn fonts(&self) -> &Arc<dyn GlyphSource> {
        &self.fonts
    }

    /// The notifier events are published on; subscribe here
    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    fn begin(&self, kind: RequestKind) -> Result<SessionGuard<'_>> {
        let mut session = self.session.lock();
        match *session {
            SessionState::InFlight(in_flight) => Err(GlyphartError::Busy { in_flight }),
            SessionState::Idle => {
                *session = SessionState::InFlight(kind);
                Ok(SessionGuard {
                    session: &self.session,
                })
            },
        }
    }

    fn publish(&self, kind: RequestKind, phase: Phase, payload: Value) {
        self.notifier.publish(&events::event_name(kind, phase), payload);
    }

    async fn generate_text(&self, request: &TextRequest) -> Result<Arc<RenderResult>> {
        let request = self.normalize_text(request)?;
        let key = CacheKey::for_text(&request);
        if let Some(hit) = self.cached(&key) {
            return Ok(hit);
        }

        let font = self.resolve_font(&request.font_name)?;
        // A rowless table echoes the text verbatim, so case matters to its output
        let cacheable = !font.is_empty();
        let job = RenderJob::Text {
            text: request.text.clone(),
            font,
        };
        let output = self.render_within(RequestKind::Text, job).await?;

        let (line_count, char_count) = measure(&output.ascii);
        let metadata = Metadata::Text(TextMetadata {
            text: request.text,
            font_name: request.font_name,
            color: request.color,
            animation: request.animation,
            line_count,
            char_count,
            timestamp: now_millis(),
        });
        let result = Arc::new(RenderResult::new(output.ascii, metadata));
        if cacheable {
            self.cache.store(key, Arc::clone(&result));
        } else {
            log::debug!("Not caching text drawn with a rowless font");
        }
        Ok(result)
    }

    async fn generate_image(&self, request: &ImageRequest) -> Result<Arc<RenderResult>> {
        self.validator.validate_image_source(&request.source)?;
        self.validator.validate_range(
            "width",
            i64::from(request.width),
            i64::from(MIN_IMAGE_WIDTH),
            i64::from(MAX_IMAGE_WIDTH),
        )?;
        let ramp = CharRamp::named(&request.char_set).ok_or_else(|| {
            ValidationError::UnsupportedOption {
                field: "character set",
                value: request.char_set.clone(),
            }
        })?;

        let job = RenderJob::Image {
            source: request.source.clone(),
            width: request.width,
            ramp,
        };
        let output = self.render_within(RequestKind::Image, job).await?;

        let (source_width, source_height) = output.source_dimensions.unwrap_or((0, 0));
        let (line_count, char_count) = measure(&output.ascii);
        let metadata = Metadata::Image(ImageMetadata {
            source_name: request.source.name.clone(),
            source_width,
            source_height,
            width: request.width,
            char_set: ramp.name().to_string(),
            line_count,
            char_count,
            timestamp: now_millis(),
        });
        Ok(Arc::new(RenderResult::new(output.ascii, metadata)))
    }

    async fn generate_poem(&self, request: &PoemRequest) -> Result<Arc<RenderResult>> {
        let request = self.normalize_poem(request)?;
        let key = CacheKey::for_poem(&request);
        if let Some(hit) = self.cached(&key) {
            return Ok(hit);
        }

        let font = self.resolve_font(&request.font_name)?;
        let output = self
            .render_within(
                RequestKind::Poem,
                RenderJob::Poem {
                    request: request.clone(),
                    font,
                },
            )
            .await?;

        let (line_count, char_count) = measure(&output.ascii);
        let metadata = Metadata::Poem(PoemMetadata {
            poem_text: request.poem_text,
            font_name: request.font_name,
            keywords: request.keywords.into_iter().collect(),
            layout: request.layout.as_str().to_string(),
            decoration: request.decoration.as_str().to_string(),
            color: request.color,
            animation: request.animation,
            highlighted: output.highlighted,
            line_count,
            char_count,
            timestamp: now_millis(),
        });
        let result = Arc::new(RenderResult::new(output.ascii, metadata));
        self.cache.store(key, Arc::clone(&result));
        Ok(result)
    }

    fn normalize_text(&self, request: &TextRequest) -> Result<TextRequest> {
        Ok(TextRequest {
            text: self.validator.validate_text(&request.text, TextField::Banner)?,
            font_name: normalize_font_name(&request.font_name)?,
            color: self
                .validator
                .validate_choice("color", &request.color, SUPPORTED_COLORS)?,
            animation: self
                .validator
                .validate_choice("animation", &request.animation, SUPPORTED_ANIMATIONS)?,
        })
    }

    fn normalize_poem(&self, request: &PoemRequest) -> Result<PoemRequest> {
        let keywords: BTreeSet<String> = request
            .keywords
            .iter()
            .map(|keyword| self.validator.validate_text(keyword, TextField::Keyword))
            .collect::<std::result::Result<_, ValidationError>>()?;

        Ok(PoemRequest {
            poem_text: self
                .validator
                .validate_text(&request.poem_text, TextField::Poem)?,
            font_name: normalize_font_name(&request.font_name)?,
            keywords,
            layout: request.layout,
            decoration: request.decoration,
            color: self
                .validator
                .validate_choice("color", &request.color, SUPPORTED_COLORS)?,
            animation: self
                .validator
                .validate_choice("animation", &request.animation, SUPPORTED_ANIMATIONS)?,
        })
    }

    /// Age-based maintenance, then a lookup
    fn cached(&self, key: &CacheKey) -> Option<Arc<RenderResult>> {
        if let Some(max_age) = self.config.max_entry_age {
            let purged = self.cache.purge_older_than(max_age);
            if purged > 0 {
                log::debug!("Purged {purged} cached result(s) older than {max_age:?}");
            }
        }

        let hit = self.cache.lookup(key);
        if hit.is_some() {
            log::debug!("Cache hit for {} request", key.kind);
        } else {
            log::debug!("Cache miss for {} request", key.kind);
        }
        hit
    }

    fn resolve_font(&self, name: &str) -> Result<Arc<GlyphTable>> {
        self.fonts
            .get_font(name)
            .ok_or_else(|| GlyphartError::ResourceNotFound(name.to_string()))
    }

    async fn render_within(&self, kind: RequestKind, job: RenderJob) -> Result<RenderOutput> {
        let budget = match kind {
            RequestKind::Image => self.config.image_timeout,
            RequestKind::Text | RequestKind::Poem => self.config.text_timeout,
        };
        let cancel = CancelToken::new();

        log::debug!("Rendering {kind} with {} (budget {budget:?})", self.renderer.name());
        match tokio::time::timeout(budget, self.renderer.render(job, cancel.clone())).await {
            Ok(outcome) => outcome,
            Err(_) => {
                cancel.cancel();
                Err(GlyphartError::RenderTimeout {
                    kind,
                    budget_ms: budget.as_millis() as u64,
                })
            },
        }
    }
}

fn normalize_font_name(name: &str) -> Result<String> {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return Err(ValidationError::Empty { field: "font" }.into());
    }
    Ok(name)
}

/// Assemble a coordinator, defaulting any collaborator left unset
///
/// Defaults: the bundled [`GlyphLibrary`], [`DefaultValidator`],
/// [`EngineRenderer`], a fresh [`EventBus`], and [`CoordinatorConfig::default`].
pub struct CoordinatorBuilder {
    fonts: Option<Arc<dyn GlyphSource>>,
    validator: Option<Arc<dyn InputValidator>>,
    renderer: Option<Arc<dyn Renderer>>,
    notifier: Option<Arc<dyn Notifier>>,
    config: CoordinatorConfig,
}

impl CoordinatorBuilder {
    pub fn new() -> Self {
        Self {
            fonts: None,
            validator: None,
            renderer: None,
            notifier: None,
            config: CoordinatorConfig::default(),
        }
    }

    /// Where font names are looked up
    pub fn fonts(mut self, fonts: Arc<dyn GlyphSource>) -> Self {
        self.fonts = Some(fonts);
        self
    }

    /// Who checks raw input
    pub fn validator(mut self, validator: Arc<dyn InputValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Who turns jobs into art
    pub fn renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Where events go
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn config(mut self, config: CoordinatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Check the configuration and build
    pub fn build(self) -> Result<GenerationCoordinator> {
        self.config.validate()?;
        let cache = ResultCache::new(self.config.cache_capacity)?;

        let renderer = self
            .renderer
            .unwrap_or_else(|| Arc::new(EngineRenderer::new()));
        log::debug!(
            "Building coordinator: renderer {}, cache capacity {}",
            renderer.name(),
            self.config.cache_capacity
        );

        Ok(GenerationCoordinator {
            fonts: self
                .fonts
                .unwrap_or_else(|| Arc::new(GlyphLibrary::bundled())),
            validator: self
                .validator
                .unwrap_or_else(|| Arc::new(DefaultValidator::new())),
            renderer,
            notifier: self.notifier.unwrap_or_else(|| Arc::new(EventBus::new())),
            cache,
            config: self.config,
            session: Mutex::new(SessionState::Idle),
            last_results: Mutex::new(HashMap::new()),
        })
    }
}

impl Default for CoordinatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
