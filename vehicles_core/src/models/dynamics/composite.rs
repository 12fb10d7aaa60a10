// vehicles_core/src/models/dynamics/composite.rs

/// State of a vehicle built around a base model: the base state plus the extra
/// joint variables the wrapper integrates itself (a steering angle, a turret yaw...).
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeState<S, E> {
    pub base: S,
    pub extra: E,
}

impl<S, E> CompositeState<S, E> {
    pub fn new(base: S, extra: E) -> Self {
        Self { base, extra }
    }
}
