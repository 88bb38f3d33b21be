use async_trait::async_trait;

/// Surfaces that built-in presets know how to transition.
///
/// Implemented by a host's surface handle. Values are absolute: opacity in
/// `0.0..=1.0`, translation in device pixels, scale as a factor of the natural
/// size.
pub trait AnimatedSurface: Send + Sync {
    /// Set the surface opacity.
    fn set_opacity(&self, opacity: f64);

    /// Set the surface translation relative to its laid-out position.
    fn set_translate(&self, x: f64, y: f64);

    /// Set the surface scale factor.
    fn set_scale(&self, scale: f64);
}

/// Animation provider trait
///
/// Runs a single transition on a surface and resolves once it has settled.
/// A modal consumes up to four of these: wrapper enter/leave and backdrop
/// enter/leave.
#[async_trait]
pub trait AnimationProvider<H: ?Sized>: Send + Sync {
    /// Preset identifier, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Run the transition on `surface`.
    ///
    /// Must always settle. Nothing about the outcome is inspected beyond
    /// completion.
    async fn animate(&self, surface: &H);
}
