use async_trait::async_trait;

use crate::traits::AnimationProvider;

/// Settles immediately without touching the surface.
///
/// Used for `{"kind": "none"}` and as the neutral choice when a host wants
/// modals without transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Instant;

#[async_trait]
impl<H> AnimationProvider<H> for Instant
where
    H: Sync + ?Sized,
{
    fn name(&self) -> &'static str {
        "none"
    }

    async fn animate(&self, _surface: &H) {}
}
