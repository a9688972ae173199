use axum::http::{HeaderName, HeaderValue, Request, request::Parts};

/// Per-request storage shared between the access gate (writer) and handlers (readers).
///
/// Backed by the request's extension map, so values live exactly as long as the request.
pub trait RequestContext {
    fn header(&self, name: &HeaderName) -> Option<&HeaderValue>;

    fn set_attribute<T>(&mut self, value: T)
    where
        T: Clone + Send + Sync + 'static;

    fn attribute<T>(&self) -> Option<&T>
    where
        T: Send + Sync + 'static;
}

impl<B> RequestContext for Request<B> {
    fn header(&self, name: &HeaderName) -> Option<&HeaderValue> {
        self.headers().get(name)
    }

    fn set_attribute<T>(&mut self, value: T)
    where
        T: Clone + Send + Sync + 'static,
    {
        self.extensions_mut().insert(value);
    }

    fn attribute<T>(&self) -> Option<&T>
    where
        T: Send + Sync + 'static,
    {
        self.extensions().get::<T>()
    }
}

// Extractors only see `Parts`.
impl RequestContext for Parts {
    fn header(&self, name: &HeaderName) -> Option<&HeaderValue> {
        self.headers.get(name)
    }

    fn set_attribute<T>(&mut self, value: T)
    where
        T: Clone + Send + Sync + 'static,
    {
        self.extensions.insert(value);
    }

    fn attribute<T>(&self) -> Option<&T>
    where
        T: Send + Sync + 'static,
    {
        self.extensions.get::<T>()
    }
}
