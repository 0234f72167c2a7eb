use thiserror::Error;

/// Error type mount effects and build closures are allowed to surface.
///
/// Concrete error enums from higher layers convert into this via the blanket
/// `From<E: Error>` impl, so `?` works unchanged inside effect bodies.
pub type EffectError = Box<dyn std::error::Error + Send + Sync>;

/// A frame-level failure. The frame that produced it is aborted; the host
/// itself stays usable for the next compose pass.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("compose failed: {0}")]
    Compose(EffectError),

    #[error("mount effect failed: {0}")]
    Effect(EffectError),
}
