//! The aggregate hint registry.

use crate::proxy::ProxyHints;
use crate::reflection::ReflectionHints;

/// Sink that discovery writes hints into.
///
/// [`RuntimeHints`] is the standard implementation. Other implementations can wrap one to observe or filter
/// registrations.
pub trait HintRegistry {
    fn reflection_mut(&mut self) -> &mut ReflectionHints;

    fn proxies_mut(&mut self) -> &mut ProxyHints;
}

/// All hints needed to run an application ahead-of-time compiled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeHints {
    reflection: ReflectionHints,
    proxies: ProxyHints,
}

impl RuntimeHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reflection(&self) -> &ReflectionHints {
        &self.reflection
    }

    pub fn proxies(&self) -> &ProxyHints {
        &self.proxies
    }

    pub fn is_empty(&self) -> bool {
        self.reflection.is_empty() && self.proxies.is_empty()
    }
}

impl HintRegistry for RuntimeHints {
    fn reflection_mut(&mut self) -> &mut ReflectionHints {
        &mut self.reflection
    }

    fn proxies_mut(&mut self) -> &mut ProxyHints {
        &mut self.proxies
    }
}
