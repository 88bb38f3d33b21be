//! Modal options, their defaults, and configuration merging

use std::fmt;
use std::sync::Arc;

use modal_orchestrator_animation::{
    create_animation, AnimatedSurface, AnimationPreset, AnimationProvider, Instant,
};
use serde::{Deserialize, Serialize};

use super::{MultiModalBehaviour, TouchBlockStrategy};
use crate::error::{ModalError, ModalResult};

/// Distance from a scroll boundary, in device pixels, that already counts as
/// "at the boundary". Absorbs sub-pixel rounding at the exact edges.
pub const DEFAULT_SCROLL_SAFETY_MARGIN: f64 = 5.0;

// ============ Style ============

/// Pass-through presentation values handed to the surface adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModalStyle {
    pub backdrop_color: String,
    pub padding: String,
    pub width: Option<String>,
    pub height: Option<String>,
    pub max_width: Option<String>,
    pub max_height: Option<String>,
}

impl Default for ModalStyle {
    fn default() -> Self {
        Self {
            backdrop_color: "rgba(0, 0, 0, 0.6)".to_string(),
            padding: "24px".to_string(),
            width: None,
            height: None,
            max_width: Some("100%".to_string()),
            max_height: None,
        }
    }
}

// ============ Animations ============

/// The four transitions of a modal.
pub struct ModalAnimations<H> {
    /// Wrapper entry.
    pub modal_enter: Arc<dyn AnimationProvider<H>>,
    /// Wrapper exit.
    pub modal_leave: Arc<dyn AnimationProvider<H>>,
    pub backdrop_enter: Arc<dyn AnimationProvider<H>>,
    pub backdrop_leave: Arc<dyn AnimationProvider<H>>,
}

impl<H> ModalAnimations<H>
where
    H: Sync + 'static,
{
    /// Animations that all settle immediately.
    pub fn instant() -> Self {
        Self {
            modal_enter: Arc::new(Instant),
            modal_leave: Arc::new(Instant),
            backdrop_enter: Arc::new(Instant),
            backdrop_leave: Arc::new(Instant),
        }
    }
}

impl<H> Default for ModalAnimations<H>
where
    H: AnimatedSurface + 'static,
{
    /// Zoom for the wrapper, fade for the backdrop. Presets compiled out fall
    /// back to [`Instant`].
    fn default() -> Self {
        Self {
            modal_enter: preset_or_instant(&AnimationPreset::zoom_in()),
            modal_leave: preset_or_instant(&AnimationPreset::zoom_out()),
            backdrop_enter: preset_or_instant(&AnimationPreset::fade_in()),
            backdrop_leave: preset_or_instant(&AnimationPreset::fade_out()),
        }
    }
}

fn preset_or_instant<H>(preset: &AnimationPreset) -> Arc<dyn AnimationProvider<H>>
where
    H: AnimatedSurface + 'static,
{
    create_animation(preset).unwrap_or_else(|_| Arc::new(Instant))
}

impl<H> Clone for ModalAnimations<H> {
    fn clone(&self) -> Self {
        Self {
            modal_enter: Arc::clone(&self.modal_enter),
            modal_leave: Arc::clone(&self.modal_leave),
            backdrop_enter: Arc::clone(&self.backdrop_enter),
            backdrop_leave: Arc::clone(&self.backdrop_leave),
        }
    }
}

impl<H> fmt::Debug for ModalAnimations<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalAnimations")
            .field("modal_enter", &self.modal_enter.name())
            .field("modal_leave", &self.modal_leave.name())
            .field("backdrop_enter", &self.backdrop_enter.name())
            .field("backdrop_leave", &self.backdrop_leave.name())
            .finish()
    }
}

// ============ Callbacks ============

/// Lifecycle hook, called with the modal's content handle.
pub type LifecycleCallback<H> = Arc<dyn Fn(&H) + Send + Sync>;

/// Optional lifecycle hooks
///
/// For one modal they fire in the order `before_open`, `after_open`,
/// `before_close`, `after_close`.
pub struct LifecycleCallbacks<H> {
    /// Fires synchronously inside `open`, before the entry animations.
    pub before_open: Option<LifecycleCallback<H>>,
    /// Fires once both entry animations have settled.
    pub after_open: Option<LifecycleCallback<H>>,
    /// Fires synchronously when the exit sequence starts.
    pub before_close: Option<LifecycleCallback<H>>,
    /// Fires once both exit animations have settled, before disposal.
    pub after_close: Option<LifecycleCallback<H>>,
}

impl<H> LifecycleCallbacks<H> {
    pub(crate) fn fire(hook: Option<&LifecycleCallback<H>>, content: &H) {
        if let Some(hook) = hook {
            hook(content);
        }
    }
}

impl<H> Default for LifecycleCallbacks<H> {
    fn default() -> Self {
        Self {
            before_open: None,
            after_open: None,
            before_close: None,
            after_close: None,
        }
    }
}

impl<H> Clone for LifecycleCallbacks<H> {
    fn clone(&self) -> Self {
        Self {
            before_open: self.before_open.clone(),
            after_open: self.after_open.clone(),
            before_close: self.before_close.clone(),
            after_close: self.after_close.clone(),
        }
    }
}

impl<H> fmt::Debug for LifecycleCallbacks<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleCallbacks")
            .field("before_open", &self.before_open.is_some())
            .field("after_open", &self.after_open.is_some())
            .field("before_close", &self.before_close.is_some())
            .field("after_close", &self.after_close.is_some())
            .finish()
    }
}

// ============ Options ============

/// Fully resolved configuration of one modal.
///
/// Every field has a value; there is no partially populated state.
/// Build one from [`Default`] and the `with_*` / `on_*` methods, or from a
/// [`ModalConfig`] with [`ModalOptions::from_config`].
#[derive(Debug)]
pub struct ModalOptions<H> {
    pub animations: ModalAnimations<H>,
    pub callbacks: LifecycleCallbacks<H>,
    /// Close when the backdrop itself (not the content) is clicked.
    pub close_on_backdrop_click: bool,
    /// Close on `Escape` reaching the backdrop.
    pub close_on_escape: bool,
    pub multi_modal_behaviour: MultiModalBehaviour,
    /// `None` defers to the surface adapter's preference.
    pub touch_strategy: Option<TouchBlockStrategy>,
    pub scroll_safety_margin: f64,
    pub style: ModalStyle,
}

impl<H> Default for ModalOptions<H>
where
    H: AnimatedSurface + 'static,
{
    fn default() -> Self {
        Self::with_animations(ModalAnimations::default())
    }
}

impl<H> Clone for ModalOptions<H> {
    fn clone(&self) -> Self {
        Self {
            animations: self.animations.clone(),
            callbacks: self.callbacks.clone(),
            close_on_backdrop_click: self.close_on_backdrop_click,
            close_on_escape: self.close_on_escape,
            multi_modal_behaviour: self.multi_modal_behaviour,
            touch_strategy: self.touch_strategy,
            scroll_safety_margin: self.scroll_safety_margin,
            style: self.style.clone(),
        }
    }
}

impl<H> ModalOptions<H> {
    /// Default options with the given animations.
    pub fn with_animations(animations: ModalAnimations<H>) -> Self {
        Self {
            animations,
            callbacks: LifecycleCallbacks::default(),
            close_on_backdrop_click: true,
            close_on_escape: false,
            multi_modal_behaviour: MultiModalBehaviour::OnTop,
            touch_strategy: None,
            scroll_safety_margin: DEFAULT_SCROLL_SAFETY_MARGIN,
            style: ModalStyle::default(),
        }
    }

    #[must_use]
    pub fn behaviour(mut self, behaviour: MultiModalBehaviour) -> Self {
        self.multi_modal_behaviour = behaviour;
        self
    }

    #[must_use]
    pub fn touch_strategy(mut self, strategy: TouchBlockStrategy) -> Self {
        self.touch_strategy = Some(strategy);
        self
    }

    #[must_use]
    pub fn close_on_backdrop_click(mut self, enabled: bool) -> Self {
        self.close_on_backdrop_click = enabled;
        self
    }

    #[must_use]
    pub fn close_on_escape(mut self, enabled: bool) -> Self {
        self.close_on_escape = enabled;
        self
    }

    #[must_use]
    pub fn style(mut self, style: ModalStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn on_before_open(mut self, hook: impl Fn(&H) + Send + Sync + 'static) -> Self {
        self.callbacks.before_open = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn on_after_open(mut self, hook: impl Fn(&H) + Send + Sync + 'static) -> Self {
        self.callbacks.after_open = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn on_before_close(mut self, hook: impl Fn(&H) + Send + Sync + 'static) -> Self {
        self.callbacks.before_close = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn on_after_close(mut self, hook: impl Fn(&H) + Send + Sync + 'static) -> Self {
        self.callbacks.after_close = Some(Arc::new(hook));
        self
    }
}

impl<H> ModalOptions<H>
where
    H: AnimatedSurface + 'static,
{
    /// Resolve a configuration over the defaults.
    pub fn from_config(config: &ModalConfig) -> ModalResult<Self> {
        let mut options = Self::default();
        options.apply_config(config)?;
        Ok(options)
    }

    /// Layer `config` over these options; fields the config leaves unset keep
    /// their current value.
    ///
    /// Either the whole config applies or, on error, nothing does.
    pub fn apply_config(&mut self, config: &ModalConfig) -> ModalResult<()> {
        if let Some(margin) = config.scroll_safety_margin {
            if !margin.is_finite() || margin < 0.0 {
                return Err(ModalError::InvalidConfig(format!(
                    "scrollSafetyMargin must be a finite non-negative number, got {margin}"
                )));
            }
        }

        let resolve = |preset: Option<&AnimationPreset>| -> ModalResult<Option<Arc<dyn AnimationProvider<H>>>> {
            preset
                .map(|p| create_animation(p).map_err(ModalError::from))
                .transpose()
        };
        let modal_enter = resolve(config.animations.modal_enter.as_ref())?;
        let modal_leave = resolve(config.animations.modal_leave.as_ref())?;
        let backdrop_enter = resolve(config.animations.backdrop_enter.as_ref())?;
        let backdrop_leave = resolve(config.animations.backdrop_leave.as_ref())?;

        if let Some(animation) = modal_enter {
            self.animations.modal_enter = animation;
        }
        if let Some(animation) = modal_leave {
            self.animations.modal_leave = animation;
        }
        if let Some(animation) = backdrop_enter {
            self.animations.backdrop_enter = animation;
        }
        if let Some(animation) = backdrop_leave {
            self.animations.backdrop_leave = animation;
        }

        if let Some(enabled) = config.close_on_backdrop_click {
            self.close_on_backdrop_click = enabled;
        }
        if let Some(enabled) = config.close_on_escape {
            self.close_on_escape = enabled;
        }
        if let Some(behaviour) = config.multi_modal_behaviour {
            self.multi_modal_behaviour = behaviour;
        }
        if let Some(strategy) = config.touch_strategy {
            self.touch_strategy = Some(strategy);
        }
        if let Some(margin) = config.scroll_safety_margin {
            self.scroll_safety_margin = margin;
        }
        config.style.apply_to(&mut self.style);

        Ok(())
    }
}

// ============ Configuration ============

/// Animation part of [`ModalConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnimationConfig {
    pub modal_enter: Option<AnimationPreset>,
    pub modal_leave: Option<AnimationPreset>,
    pub backdrop_enter: Option<AnimationPreset>,
    pub backdrop_leave: Option<AnimationPreset>,
}

/// Style part of [`ModalConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleConfig {
    pub backdrop_color: Option<String>,
    pub padding: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub max_width: Option<String>,
    pub max_height: Option<String>,
}

impl StyleConfig {
    fn apply_to(&self, style: &mut ModalStyle) {
        if let Some(color) = &self.backdrop_color {
            style.backdrop_color.clone_from(color);
        }
        if let Some(padding) = &self.padding {
            style.padding.clone_from(padding);
        }
        if self.width.is_some() {
            style.width.clone_from(&self.width);
        }
        if self.height.is_some() {
            style.height.clone_from(&self.height);
        }
        if self.max_width.is_some() {
            style.max_width.clone_from(&self.max_width);
        }
        if self.max_height.is_some() {
            style.max_height.clone_from(&self.max_height);
        }
    }

    fn merge(&mut self, other: &Self) {
        merge_field(&mut self.backdrop_color, &other.backdrop_color);
        merge_field(&mut self.padding, &other.padding);
        merge_field(&mut self.width, &other.width);
        merge_field(&mut self.height, &other.height);
        merge_field(&mut self.max_width, &other.max_width);
        merge_field(&mut self.max_height, &other.max_height);
    }
}

/// Partial, serializable modal configuration.
///
/// Every field is optional; unset fields fall back to whatever they are
/// layered over (ultimately [`ModalOptions::default`]).
///
/// ```json
/// {
///   "multiModalBehaviour": "exclusiveInContainer",
///   "closeOnEscape": true,
///   "animations": { "modalEnter": { "kind": "slideIn", "distance": 60 } },
///   "style": { "backdropColor": "rgba(12, 12, 12, 0.8)" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModalConfig {
    pub animations: AnimationConfig,
    pub close_on_backdrop_click: Option<bool>,
    pub close_on_escape: Option<bool>,
    pub multi_modal_behaviour: Option<MultiModalBehaviour>,
    pub touch_strategy: Option<TouchBlockStrategy>,
    pub scroll_safety_margin: Option<f64>,
    pub style: StyleConfig,
}

impl ModalConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> ModalResult<Self> {
        serde_json::from_str(json).map_err(|e| ModalError::InvalidConfig(e.to_string()))
    }

    /// Layer `other` over `self`; fields set in `other` win.
    pub fn merge(&mut self, other: &Self) {
        merge_field(&mut self.animations.modal_enter, &other.animations.modal_enter);
        merge_field(&mut self.animations.modal_leave, &other.animations.modal_leave);
        merge_field(
            &mut self.animations.backdrop_enter,
            &other.animations.backdrop_enter,
        );
        merge_field(
            &mut self.animations.backdrop_leave,
            &other.animations.backdrop_leave,
        );
        merge_field(
            &mut self.close_on_backdrop_click,
            &other.close_on_backdrop_click,
        );
        merge_field(&mut self.close_on_escape, &other.close_on_escape);
        merge_field(&mut self.multi_modal_behaviour, &other.multi_modal_behaviour);
        merge_field(&mut self.touch_strategy, &other.touch_strategy);
        merge_field(&mut self.scroll_safety_margin, &other.scroll_safety_margin);
        self.style.merge(&other.style);
    }
}

fn merge_field<T: Clone>(target: &mut Option<T>, overlay: &Option<T>) {
    if overlay.is_some() {
        target.clone_from(overlay);
    }
}
