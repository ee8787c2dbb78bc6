//! Parsed pointers and the cursor used to walk them.

use std::fmt;
use std::str::FromStr;

use json_splice_value::{Map, Value};

use crate::{is_canonical_index, unescape_component, PointerError};

/// A parsed JSON Pointer.
///
/// Tokens are kept exactly as written (still escaped); they are decoded
/// against the node they address when read through a [`Cursor`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Pointer {
    raw: String,
    tokens: Vec<String>,
}

impl Pointer {
    /// Parses a pointer string.
    ///
    /// # Errors
    ///
    /// `InvalidPointer` when the string is neither empty nor starts with `/`.
    pub fn parse(pointer: &str) -> Result<Self, PointerError> {
        if pointer.is_empty() {
            return Ok(Self::root());
        }
        let Some(rest) = pointer.strip_prefix('/') else {
            return Err(PointerError::InvalidPointer {
                pointer: pointer.to_string(),
            });
        };
        Ok(Self {
            raw: pointer.to_string(),
            tokens: rest.split('/').map(str::to_string).collect(),
        })
    }

    /// The pointer to the whole document, `""`.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Raw, still escaped, tokens.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// A cursor positioned before the first token.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor {
            pointer: self,
            pos: 0,
        }
    }

    /// Returns `true` if every token of `self` equals the token of `other` at
    /// the same position. The root is a prefix of every pointer, and every
    /// pointer is a prefix of itself.
    pub fn is_prefix_of(&self, other: &Pointer) -> bool {
        self.tokens.len() <= other.tokens.len()
            && self.tokens.iter().zip(&other.tokens).all(|(a, b)| a == b)
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Pointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pointer::parse(s)
    }
}

impl TryFrom<&str> for Pointer {
    type Error = PointerError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Pointer::parse(s)
    }
}

/// A token decoded against the container it addresses.
///
/// The member itself may or may not exist; [`Slot::get`] tells.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<'v> {
    /// An object member, with the key unescaped.
    Key { object: &'v Map, key: String },
    /// An array position. `index` may equal the array length (`"-"`, or an
    /// explicit index one past the end).
    Index { array: &'v [Value], index: usize },
}

impl<'v> Slot<'v> {
    /// The addressed member, if present.
    pub fn get(&self) -> Option<&'v Value> {
        match *self {
            Slot::Key { object, ref key } => object.get(key.as_str()),
            Slot::Index { array, index } => array.get(index),
        }
    }
}

impl fmt::Display for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Key { key, .. } => f.write_str(key),
            Slot::Index { index, .. } => write!(f, "{index}"),
        }
    }
}

/// Read position within a [`Pointer`].
///
/// Reading a token never changes the cursor it was read from; [`Cursor::next`]
/// hands back the advanced cursor instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    pointer: &'a Pointer,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn pointer(&self) -> &'a Pointer {
        self.pointer
    }

    /// Number of tokens consumed.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// All tokens have been consumed: the cursor denotes the node it was last
    /// read against.
    pub fn is_fully_read(&self) -> bool {
        self.pos >= self.pointer.tokens.len()
    }

    /// The tokens consumed so far, as a pointer string.
    pub fn consumed(&self) -> String {
        let mut out = String::new();
        for token in &self.pointer.tokens[..self.pos.min(self.pointer.tokens.len())] {
            out.push('/');
            out.push_str(token);
        }
        out
    }

    /// Decodes the next token against `context`.
    ///
    /// # Errors
    ///
    /// - `PointerExhausted` when no token is left.
    /// - `PathNotObjectOrArray` when `context` is a scalar or null.
    /// - `InvalidArrayIndex` when `context` is an array and the token is
    ///   neither `"-"` nor a canonical index.
    pub fn next<'v>(self, context: &'v Value) -> Result<(Slot<'v>, Cursor<'a>), PointerError> {
        let Some(token) = self.pointer.tokens.get(self.pos) else {
            return Err(PointerError::PointerExhausted {
                consumed: self.consumed(),
            });
        };
        let slot = match context {
            Value::Object(object) => Slot::Key {
                object: &**object,
                key: unescape_component(token),
            },
            Value::Array(array) => Slot::Index {
                array: array.as_slice(),
                index: decode_index(token, array.len())?,
            },
            other => {
                return Err(PointerError::PathNotObjectOrArray {
                    kind: other.kind(),
                    at: self.consumed(),
                })
            }
        };
        let advanced = Cursor {
            pointer: self.pointer,
            pos: self.pos + 1,
        };
        Ok((slot, advanced))
    }
}

fn decode_index(token: &str, len: usize) -> Result<usize, PointerError> {
    if token == "-" {
        return Ok(len);
    }
    let invalid = || PointerError::InvalidArrayIndex {
        token: token.to_string(),
    };
    if !is_canonical_index(token) {
        return Err(invalid());
    }
    token.parse().map_err(|_| invalid())
}
