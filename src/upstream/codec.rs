//! Incremental decoding of a JSON array body.
//!
//! # Responsibilities
//! - Split an upstream array body into its elements as bytes arrive
//! - Decode each element as soon as its closing byte is seen
//! - Reject bodies that are not a single JSON array
//!
//! # Design Decisions
//! - Only the bytes of the element in flight are buffered
//! - The scanner tracks nesting depth and string/escape state, nothing more;
//!   element validity is left to serde_json
//! - Chunk boundaries may fall anywhere, including inside strings and escapes

use std::collections::VecDeque;

use futures_util::stream::{self, BoxStream, Stream, StreamExt};
use serde::de::{DeserializeOwned, Error as _};

use crate::error::{ProxyError, ProxyResult};
use crate::item::Item;

/// Stream of items decoded from an upstream array body, in arrival order.
pub type ItemStream = BoxStream<'static, ProxyResult<Item>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Waiting for the opening `[`.
    Start,
    /// After `[`: an element or `]`.
    First,
    /// After `,`: an element.
    Next,
    /// Inside an element.
    Element,
    /// After an element: `,` or `]`.
    After,
    /// After the closing `]`.
    Done,
}

/// Push-based scanner that yields complete array elements.
#[derive(Debug)]
pub struct JsonArrayDecoder {
    state: State,
    element: Vec<u8>,
    depth: usize,
    in_string: bool,
    escaped: bool,
}

impl Default for JsonArrayDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonArrayDecoder {
    pub fn new() -> Self {
        Self {
            state: State::Start,
            element: Vec::new(),
            depth: 0,
            in_string: false,
            escaped: false,
        }
    }

    /// Feed the next chunk of body bytes, returning every element completed by it.
    pub fn feed<T: DeserializeOwned>(&mut self, chunk: &[u8]) -> Result<Vec<T>, serde_json::Error> {
        let mut out = Vec::new();
        let mut i = 0;

        while i < chunk.len() {
            let b = chunk[i];
            match self.state {
                State::Start => {
                    if b == b'[' {
                        self.state = State::First;
                    } else if !is_whitespace(b) {
                        return Err(unexpected(b, "'['"));
                    }
                }
                State::First | State::Next => {
                    if is_whitespace(b) {
                        // skip
                    } else if b == b']' && self.state == State::First {
                        self.state = State::Done;
                    } else if b == b']' || b == b',' {
                        return Err(unexpected(b, "an array element"));
                    } else {
                        self.state = State::Element;
                        continue;
                    }
                }
                State::Element => {
                    if self.in_string {
                        self.element.push(b);
                        if self.escaped {
                            self.escaped = false;
                        } else if b == b'\\' {
                            self.escaped = true;
                        } else if b == b'"' {
                            self.in_string = false;
                            if self.depth == 0 {
                                out.push(self.take()?);
                            }
                        }
                    } else {
                        match b {
                            b'"' => {
                                self.element.push(b);
                                self.in_string = true;
                            }
                            b'{' | b'[' => {
                                self.element.push(b);
                                self.depth += 1;
                            }
                            b'}' | b']' if self.depth > 0 => {
                                self.element.push(b);
                                self.depth -= 1;
                                if self.depth == 0 {
                                    out.push(self.take()?);
                                }
                            }
                            // A bare scalar ends at the first delimiter; re-scan it as a separator.
                            b',' | b']' if self.depth == 0 => {
                                out.push(self.take()?);
                                continue;
                            }
                            _ if self.depth == 0 && is_whitespace(b) => {
                                out.push(self.take()?);
                                continue;
                            }
                            _ => self.element.push(b),
                        }
                    }
                }
                State::After => {
                    if b == b',' {
                        self.state = State::Next;
                    } else if b == b']' {
                        self.state = State::Done;
                    } else if !is_whitespace(b) {
                        return Err(unexpected(b, "',' or ']'"));
                    }
                }
                State::Done => {
                    if !is_whitespace(b) {
                        return Err(unexpected(b, "end of body"));
                    }
                }
            }
            i += 1;
        }

        Ok(out)
    }

    /// Confirm the body ended right after the closing `]`.
    pub fn finish(&self) -> Result<(), serde_json::Error> {
        if self.state == State::Done {
            Ok(())
        } else {
            Err(serde_json::Error::custom("body ended before the array was closed"))
        }
    }

    fn take<T: DeserializeOwned>(&mut self) -> Result<T, serde_json::Error> {
        let value = serde_json::from_slice(&self.element);
        self.element.clear();
        self.state = State::After;
        value
    }
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

fn unexpected(b: u8, expected: &str) -> serde_json::Error {
    serde_json::Error::custom(format!(
        "unexpected byte {:?} in array body, expected {}",
        b as char, expected
    ))
}

/// Decode a chunked array body into a stream of items.
///
/// The stream ends after the first error.
pub fn decode_items<S, B, E>(body: S) -> ItemStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<ProxyError> + Send + 'static,
{
    let state = (Box::pin(body), JsonArrayDecoder::new(), VecDeque::new(), false);

    stream::unfold(state, |(mut body, mut decoder, mut pending, mut done)| async move {
        loop {
            if let Some(item) = pending.pop_front() {
                return Some((Ok(item), (body, decoder, pending, done)));
            }
            if done {
                return None;
            }

            let next = body.next().await;
            let failure = match next {
                Some(Ok(chunk)) => match decoder.feed::<Item>(chunk.as_ref()) {
                    Ok(items) => {
                        pending.extend(items);
                        None
                    }
                    Err(e) => Some(ProxyError::Decode(e)),
                },
                Some(Err(e)) => Some(e.into()),
                None => {
                    done = true;
                    decoder.finish().err().map(ProxyError::Decode)
                }
            };

            if let Some(err) = failure {
                pending.clear();
                done = true;
                return Some((Err(err), (body, decoder, pending, done)));
            }
        }
    })
    .boxed()
}
