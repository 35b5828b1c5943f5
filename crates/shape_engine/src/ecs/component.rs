//! Component trait

/// Marker trait for components
///
/// The world is driven from a single thread, so components need not be
/// `Send` or `Sync`.
pub trait Component: 'static {}
