use crate::error::Result;

/// Carries a request document to the API and returns the raw response body.
///
/// Failures are returned as-is to the caller of the client; nothing retries.
pub trait Transport {
    fn send(&self, document: &str) -> Result<String>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, document: &str) -> Result<String> {
        (**self).send(document)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, document: &str) -> Result<String> {
        (**self).send(document)
    }
}
