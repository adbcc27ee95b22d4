//! Async stream driver.
//!
//! Feeds an ordered input of provider chunks to a [`StreamNormalizer`] and
//! exposes the canonical parts as a lazy stream. Input is only polled when
//! the consumer polls the output.

use crate::cancel::CancelHandle;
use crate::config::NormalizerConfig;
use crate::normalizer::StreamNormalizer;
use crate::part::RawChunk;
use crate::protocol::ProviderProtocol;
use futures::Stream;
use futures_util::StreamExt;
use std::pin::Pin;
use unistream_spec::{NormalizerError, StreamPart};

/// Canonical part stream.
pub type PartStream = Pin<Box<dyn Stream<Item = StreamPart> + Send>>;

pub struct StreamDriver<P> {
    normalizer: StreamNormalizer<P>,
    cancel: CancelHandle,
}

impl<P: ProviderProtocol + 'static> StreamDriver<P> {
    pub fn new(protocol: P, config: NormalizerConfig) -> Self {
        Self {
            normalizer: StreamNormalizer::new(protocol, config),
            cancel: CancelHandle::new(),
        }
    }

    /// Observe an externally owned cancel handle instead of a private one.
    pub fn with_cancel_handle(mut self, cancel: CancelHandle) -> Self {
        self.cancel = cancel;
        self
    }

    /// Handle that cancels the stream returned by `run`.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Drive provider JSON chunks (for instance from [`crate::sse_json_values`]).
    ///
    /// `Err` items become `error` parts; see [`StreamNormalizer::push_error`].
    pub fn run<S>(self, input: S) -> PartStream
    where
        S: Stream<Item = Result<serde_json::Value, NormalizerError>> + Send + 'static,
    {
        self.drive(input.map(|item| match item {
            Ok(value) => Input::Value(value),
            Err(error) => Input::Error(error),
        }))
    }

    /// Drive chunks that are already narrowed.
    pub fn run_chunks<S>(self, input: S) -> PartStream
    where
        S: Stream<Item = RawChunk> + Send + 'static,
    {
        self.drive(input.map(Input::Chunk))
    }

    fn drive<S>(self, input: S) -> PartStream
    where
        S: Stream<Item = Input> + Send + 'static,
    {
        let StreamDriver {
            mut normalizer,
            cancel,
        } = self;

        let out = async_stream::stream! {
            let mut input = Box::pin(input);
            loop {
                // Cancellation wins over a ready item.
                let next = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => None,
                    item = input.next() => Some(item),
                };
                let parts = match next {
                    None => normalizer.abort(),
                    Some(None) => normalizer.finish(),
                    Some(Some(Input::Value(value))) => normalizer.push_value(value),
                    Some(Some(Input::Chunk(chunk))) => normalizer.push_chunk(chunk),
                    Some(Some(Input::Error(error))) => normalizer.push_error(error),
                };
                for part in parts {
                    yield part;
                }
                if normalizer.is_finished() {
                    break;
                }
            }
        };
        Box::pin(out)
    }
}

enum Input {
    Value(serde_json::Value),
    Chunk(RawChunk),
    Error(NormalizerError),
}
