//! Component trait and implementations

/// Marker trait for components
pub trait Component: 'static + Send + Sync {}
