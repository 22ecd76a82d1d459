//! Byte-level parser for serialized PHP values.

use crate::config::MAX_DECODE_DEPTH;

use super::{DecodeError, Mapping, Object, Value};

pub(super) struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(super) fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Fails unless the whole buffer was consumed.
    pub(super) fn finish(&self) -> Result<(), DecodeError> {
        if self.pos == self.input.len() {
            Ok(())
        } else {
            Err(DecodeError::TrailingBytes { offset: self.pos })
        }
    }

    pub(super) fn parse_value(&mut self, depth: usize) -> Result<Value, DecodeError> {
        if depth > MAX_DECODE_DEPTH {
            return Err(DecodeError::TooDeep {
                limit: MAX_DECODE_DEPTH,
                offset: self.pos,
            });
        }

        let offset = self.pos;
        let tag = self.next_byte()?;
        match tag {
            b'N' => {
                self.expect(b';')?;
                Ok(Value::Null)
            }
            b'b' => {
                self.expect(b':')?;
                let start = self.pos;
                let value = match self.next_byte()? {
                    b'0' => false,
                    b'1' => true,
                    _ => return Err(DecodeError::InvalidNumber { offset: start }),
                };
                self.expect(b';')?;
                Ok(Value::Bool(value))
            }
            b'i' => {
                self.expect(b':')?;
                Ok(Value::Int(self.read_number(b';')?))
            }
            b'd' => {
                self.expect(b':')?;
                Ok(Value::Float(self.read_number(b';')?))
            }
            b's' => {
                self.expect(b':')?;
                Ok(Value::Bytes(self.read_string(b';')?.to_vec()))
            }
            b'a' => {
                self.expect(b':')?;
                let count: usize = self.read_number(b':')?;
                Ok(Value::Map(self.read_entries(count, depth)?))
            }
            b'O' => {
                self.expect(b':')?;
                let class = String::from_utf8_lossy(self.read_string(b':')?).into_owned();
                let count: usize = self.read_number(b':')?;
                let fields = self.read_entries(count, depth)?;
                Ok(Value::Object(Object { class, fields }))
            }
            other => Err(DecodeError::UnknownTag {
                tag: char::from(other),
                offset,
            }),
        }
    }

    /// Reads `{<key><value>...}` with exactly `count` pairs.
    fn read_entries(&mut self, count: usize, depth: usize) -> Result<Mapping, DecodeError> {
        self.expect(b'{')?;
        let mut mapping = Mapping::new();
        for _ in 0..count {
            let key_offset = self.pos;
            let key = match self.parse_value(depth + 1)? {
                Value::Bytes(bytes) => bytes,
                Value::Int(i) => i.to_string().into_bytes(),
                _ => return Err(DecodeError::InvalidKey { offset: key_offset }),
            };
            let value = self.parse_value(depth + 1)?;
            mapping.insert(key, value);
        }
        self.expect(b'}')?;
        Ok(mapping)
    }

    /// Reads `<len>:"<bytes>"` followed by `terminator`.
    fn read_string(&mut self, terminator: u8) -> Result<&'a [u8], DecodeError> {
        let len: usize = self.read_number(b':')?;
        self.expect(b'"')?;
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.input.len())
            .ok_or(DecodeError::UnexpectedEof {
                offset: self.input.len(),
            })?;
        let bytes = &self.input[self.pos..end];
        self.pos = end;
        self.expect(b'"')?;
        self.expect(terminator)?;
        Ok(bytes)
    }

    /// Reads ASCII up to `delimiter` and parses it, consuming the delimiter.
    fn read_number<T: std::str::FromStr>(&mut self, delimiter: u8) -> Result<T, DecodeError> {
        let start = self.pos;
        let len = self.input[start..]
            .iter()
            .position(|b| *b == delimiter)
            .ok_or(DecodeError::UnexpectedEof {
                offset: self.input.len(),
            })?;
        self.pos = start + len + 1;
        std::str::from_utf8(&self.input[start..start + len])
            .ok()
            .and_then(|text| text.parse().ok())
            .ok_or(DecodeError::InvalidNumber { offset: start })
    }

    fn next_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = *self
            .input
            .get(self.pos)
            .ok_or(DecodeError::UnexpectedEof { offset: self.pos })?;
        self.pos += 1;
        Ok(byte)
    }

    fn expect(&mut self, expected: u8) -> Result<(), DecodeError> {
        let offset = self.pos;
        let found = self.next_byte()?;
        if found == expected {
            Ok(())
        } else {
            Err(DecodeError::UnexpectedByte {
                expected: char::from(expected),
                found: char::from(found),
                offset,
            })
        }
    }
}
