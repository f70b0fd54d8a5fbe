use std::{
    error::Error as StdError,
    fmt,
    pin::Pin,
    task::{ready, Context, Poll},
};

use bytes::Bytes;
use futures::stream::Stream;
use http_body::{Body as HttpBody, Frame, SizeHint};
use http_body_util::{combinators::UnsyncBoxBody, BodyExt};
use pin_project::pin_project;

/// Request and response body used by [`Client`](crate::Client)
///
/// Requests carry a single buffered chunk of json. Responses wrap whatever body
/// the underlying service produced.
pub struct Body {
    kind: Kind,
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Body");
        if let Kind::Once(bytes) = &self.kind {
            d.field("len", &bytes.as_ref().map_or(0, Bytes::len));
        }
        d.finish()
    }
}

enum Kind {
    Once(Option<Bytes>),
    Wrap(UnsyncBoxBody<Bytes, Box<dyn StdError + Send + Sync>>),
}

impl Body {
    fn new(kind: Kind) -> Self {
        Body { kind }
    }

    /// Create an empty body
    pub fn empty() -> Self {
        Self::new(Kind::Once(None))
    }

    pub(crate) fn wrap_body<B>(body: B) -> Self
    where
        B: HttpBody<Data = Bytes> + Send + 'static,
        B::Error: Into<Box<dyn StdError + Send + Sync>>,
    {
        Body::new(Kind::Wrap(body.map_err(Into::into).boxed_unsync()))
    }

    /// Buffer the whole body
    pub(crate) async fn collect_bytes(self) -> Result<Bytes, crate::Error> {
        Ok(BodyExt::collect(self).await?.to_bytes())
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        if bytes.is_empty() {
            Self::empty()
        } else {
            Self::new(Kind::Once(Some(bytes)))
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(vec: Vec<u8>) -> Self {
        Self::from(Bytes::from(vec))
    }
}

impl From<&'static str> for Body {
    fn from(s: &'static str) -> Self {
        Self::from(Bytes::from_static(s.as_bytes()))
    }
}

impl HttpBody for Body {
    type Data = Bytes;
    type Error = crate::Error;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        match self.kind {
            Kind::Once(ref mut val) => Poll::Ready(val.take().map(|data| Ok(Frame::data(data)))),
            Kind::Wrap(ref mut body) => Poll::Ready(
                ready!(Pin::new(body).poll_frame(cx)).map(|chunk| chunk.map_err(crate::Error::Service)),
            ),
        }
    }

    fn size_hint(&self) -> SizeHint {
        match &self.kind {
            Kind::Once(Some(bytes)) => SizeHint::with_exact(bytes.len() as u64),
            Kind::Once(None) => SizeHint::with_exact(0),
            Kind::Wrap(body) => body.size_hint(),
        }
    }

    fn is_end_stream(&self) -> bool {
        match &self.kind {
            Kind::Once(Some(bytes)) => bytes.is_empty(),
            Kind::Once(None) => true,
            Kind::Wrap(body) => body.is_end_stream(),
        }
    }
}

// Data frames of an `http_body::Body` as a `Stream`, trailers are skipped.
#[pin_project]
pub(crate) struct BodyDataStream<B> {
    #[pin]
    body: B,
}

impl<B> Stream for BodyDataStream<B>
where
    B: HttpBody<Data = Bytes>,
{
    type Item = Result<Bytes, B::Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            return match ready!(self.as_mut().project().body.poll_frame(cx)) {
                Some(Ok(frame)) => {
                    let Ok(bytes) = frame.into_data() else {
                        continue;
                    };
                    Poll::Ready(Some(Ok(bytes)))
                }
                Some(Err(err)) => Poll::Ready(Some(Err(err))),
                None => Poll::Ready(None),
            };
        }
    }
}

pub(crate) trait IntoBodyDataStream: HttpBody + Sized {
    fn into_stream(self) -> BodyDataStream<Self> {
        BodyDataStream { body: self }
    }
}

impl<T> IntoBodyDataStream for T where T: HttpBody {}

#[cfg(test)]
mod test {
    use super::*;
    use futures::TryStreamExt;
    use http_body_util::{Full, StreamBody};

    #[tokio::test]
    async fn once_body_yields_single_chunk() {
        let body = Body::from(br#"{"a":1}"#.to_vec());
        assert_eq!(body.size_hint().exact(), Some(7));
        let chunks: Vec<Bytes> = IntoBodyDataStream::into_stream(body).try_collect().await.unwrap();
        assert_eq!(chunks, vec![Bytes::from_static(br#"{"a":1}"#)]);
    }

    #[tokio::test]
    async fn empty_vec_is_end_of_stream() {
        let body = Body::from(Vec::new());
        assert!(body.is_end_stream());
        assert!(body.collect_bytes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn wrapped_body_keeps_chunks() {
        let chunks = futures::stream::iter(vec![
            Ok::<_, std::io::Error>(Frame::data(Bytes::from_static(b"line one\n"))),
            Ok(Frame::data(Bytes::from_static(b"line two\n"))),
        ]);
        let body = Body::wrap_body(StreamBody::new(chunks));
        let all = body.collect_bytes().await.unwrap();
        assert_eq!(&all[..], b"line one\nline two\n");

        let full = Body::wrap_body(Full::new(Bytes::from_static(b"x")));
        let parts: Vec<Bytes> = IntoBodyDataStream::into_stream(full).try_collect().await.unwrap();
        assert_eq!(parts.len(), 1);
    }
}
