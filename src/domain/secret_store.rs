/// Read-only view of the credentials the hosting platform injects.
///
/// Only existence is ever asked for; values stay inside the store.
pub trait SecretStore: Send + Sync {
    fn has_key(&self, name: &str) -> bool;
}

impl<T: SecretStore + ?Sized> SecretStore for std::sync::Arc<T> {
    fn has_key(&self, name: &str) -> bool {
        (**self).has_key(name)
    }
}

impl<T: SecretStore + ?Sized> SecretStore for Box<T> {
    fn has_key(&self, name: &str) -> bool {
        (**self).has_key(name)
    }
}
