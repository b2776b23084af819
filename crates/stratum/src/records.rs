use crate::{Record, Result};

use std::{
    pin::Pin,
    task::{Context, Poll},
};
use tokio_stream::{Stream, StreamExt};

/// Lazily fetched records.
///
/// Database round trips happen as the stream is polled; dropping it early
/// skips the remaining chunks.
pub struct Records<'a> {
    stream: Pin<Box<dyn Stream<Item = Result<Record>> + Send + 'a>>,
}

pub trait FromRecords: Extend<Record> + Default {}

impl<T: Extend<Record> + Default> FromRecords for T {}

impl<'a> Records<'a> {
    pub(crate) fn new(stream: impl Stream<Item = Result<Record>> + Send + 'a) -> Self {
        Self {
            stream: Box::pin(stream),
        }
    }

    pub async fn next(&mut self) -> Option<Result<Record>> {
        self.stream.next().await
    }

    /// Collect all records, stopping at the first error
    pub async fn collect<B>(mut self) -> Result<B>
    where
        B: FromRecords,
    {
        let mut ret = B::default();

        while let Some(res) = self.next().await {
            ret.extend(Some(res?));
        }

        Ok(ret)
    }
}

impl Stream for Records<'_> {
    type Item = Result<Record>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.stream.as_mut().poll_next(cx)
    }
}

impl std::fmt::Debug for Records<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Records").finish_non_exhaustive()
    }
}
