//! JDK-style interface proxy hints.

use crate::type_reference::TypeReference;

/// A proxy implementing an ordered list of interfaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceProxyHint {
    interfaces: Vec<TypeReference>,
}

impl InterfaceProxyHint {
    pub fn new(interfaces: Vec<TypeReference>) -> Self {
        Self { interfaces }
    }

    /// Proxied interfaces; order matters to the runtime.
    pub fn interfaces(&self) -> &[TypeReference] {
        &self.interfaces
    }
}

/// Proxy hints in registration order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyHints {
    proxies: Vec<InterfaceProxyHint>,
}

impl ProxyHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_interface_proxy(&mut self, interfaces: Vec<TypeReference>) -> &mut Self {
        let hint = InterfaceProxyHint::new(interfaces);
        if !self.proxies.contains(&hint) {
            self.proxies.push(hint);
        }
        self
    }

    pub fn interface_proxies(&self) -> impl Iterator<Item = &InterfaceProxyHint> {
        self.proxies.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }
}
