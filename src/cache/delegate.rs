use super::error::DelegateError;

/// Loads values on a cache miss.
///
/// Returning `Ok(None)` means the key does not exist at the source; nothing
/// is cached. Any closure `Fn(&K) -> Result<Option<V>, DelegateError>`
/// implements this trait.
pub trait Reader<K, V>: Send + Sync {
    fn read(&self, key: &K) -> Result<Option<V>, DelegateError>;
}

impl<K, V, F> Reader<K, V> for F
where
    F: Fn(&K) -> Result<Option<V>, DelegateError> + Send + Sync,
{
    fn read(&self, key: &K) -> Result<Option<V>, DelegateError> {
        self(key)
    }
}

/// Persists values before they are admitted to the cache.
///
/// A failed write keeps the value out of the cache. Any closure
/// `Fn(&K, &V) -> Result<(), DelegateError>` implements this trait.
pub trait Writer<K, V>: Send + Sync {
    fn write(&self, key: &K, value: &V) -> Result<(), DelegateError>;
}

impl<K, V, F> Writer<K, V> for F
where
    F: Fn(&K, &V) -> Result<(), DelegateError> + Send + Sync,
{
    fn write(&self, key: &K, value: &V) -> Result<(), DelegateError> {
        self(key, value)
    }
}
