/***************************************************************************************************
 * Copyright (c) 2024 rs_marshal contributors. All rights reserved.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the “Software”), to deal in the Software without
 * restriction, including without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all copies or
 * substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
 * BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 **************************************************************************************************/
/***************************************************************************************************
 * rs_marshal handle facade
 *
 * `Value<'buf>` is the public face of the decoder: a lazy, typed view over a byte sub-range of the
 * buffer passed to `decode()`. Nothing is read until a caller asks for it.
 **************************************************************************************************/
#[cfg(feature = "trace")]
use func_trace::trace;

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::cache::Shared;
use crate::composite;
use crate::constants::{
    TAG_ARRAY, TAG_FALSE, TAG_IVAR, TAG_LINK, TAG_MAP, TAG_NIL, TAG_OBJECT, TAG_STRING, TAG_SYMBOL,
    TAG_SYMBOL_REF, TAG_TRUE, TAG_USER_DEFINED,
};
use crate::error::{MarshalError, Result};
use crate::primitive;
use crate::probe;
use crate::string;
use crate::varint;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// The type a handle's bytes resolve to.
///
/// `tag()` always returns one of these, including `Unknown` for an empty slice or a first byte
/// this decoder does not recognize - it never panics and never needs a `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// Empty data, or a first byte this decoder does not recognize.
    Unknown,
    /// The nil value.
    Nil,
    /// A boolean.
    Bool,
    /// A signed integer, varint-encoded.
    Integer,
    /// A floating-point value, encoded as an ASCII digit string.
    Float,
    /// Covers all four wire forms: new symbol (`:`), symbol back-reference (`;`), raw string
    /// (`"`), and encoded string (`I"`).
    String,
    /// A count-prefixed sequence of values.
    Array,
    /// A count-prefixed sequence of key/value pairs.
    Map,
    /// An opaque class-name-tagged payload this crate does not interpret.
    UserDefined,
    /// A non-string value wrapped with extra instance variables (`I`, not followed by `"`).
    InstanceVariables,
    /// A class-name-tagged value with a maplike block of instance variables.
    ObjectInstance,
}

/// A lazy, reference-resolving handle over one value within a decoded buffer.
///
/// Cloning a `Value` is cheap (an `Rc` bump and a slice copy); it does not clone any decoded data.
/// `Value` is `!Send`/`!Sync` by construction, since the caches behind it are `Rc<RefCell<_>>` -
/// independent trees from independent `decode()` calls are independent `Rc` graphs and may be
/// moved to other threads freely, but a single tree cannot be shared across threads.
#[derive(Clone)]
pub struct Value<'buf> {
    shared: Rc<Shared<'buf>>,
    /// Intentionally *not* truncated to this value's own span: every handle's `data` runs from
    /// its own first byte to the end of the original buffer. This is what lets a composite reader
    /// register a handle's cache entry before it knows how long the value is (see `composite.rs`)
    /// - the handle and its eventual span are two separate pieces of state from the start.
    data: &'buf [u8],
    /// `0` until this value's span has been computed at least once (by a direct call on this
    /// handle, or by the composite reader that produced it as a child). Doubles as the gate that
    /// makes `as_array`/`as_map`/`as_string` idempotent: a handle whose span is already known does
    /// not register anything into the object cache a second time.
    span: Cell<usize>,
}

impl<'buf> Value<'buf> {
    fn child(&self, data: &'buf [u8]) -> Value<'buf> {
        Value { shared: Rc::clone(&self.shared), data, span: Cell::new(0) }
    }

    /// The version header of the decoded buffer, e.g. `(4, 8)`.
    #[cfg_attr(feature = "trace", trace)]
    pub fn version(&self) -> (u8, u8) {
        self.shared.version()
    }

    /// Peek the tag of this handle's own bytes without following an object-cache link.
    fn raw_tag(&self) -> Tag {
        match self.data.first() {
            None => Tag::Unknown,
            Some(&TAG_NIL) => Tag::Nil,
            Some(&TAG_TRUE) | Some(&TAG_FALSE) => Tag::Bool,
            Some(&b'i') => Tag::Integer,
            Some(&b'f') => Tag::Float,
            Some(&TAG_SYMBOL) | Some(&TAG_SYMBOL_REF) | Some(&TAG_STRING) => Tag::String,
            Some(&TAG_IVAR) => {
                if self.data.get(1) == Some(&TAG_STRING) { Tag::String } else { Tag::InstanceVariables }
            }
            Some(&TAG_USER_DEFINED) => Tag::UserDefined,
            Some(&TAG_OBJECT) => Tag::ObjectInstance,
            Some(&TAG_ARRAY) => Tag::Array,
            Some(&TAG_MAP) => Tag::Map,
            Some(_) => Tag::Unknown,
        }
    }

    /// Follow one `@` object-cache hop, if present. A handle whose first byte is not `@` resolves
    /// to itself. An out-of-range index is treated as [`MarshalError::IncompleteData`] (see
    /// `DESIGN.md` for why this tightens the source format's own silently-ignored behaviour).
    fn resolve(&self) -> Result<Value<'buf>> {
        match self.data.first() {
            Some(&TAG_LINK) => {
                let (index, _vlen) = varint::decode(&self.data[1..])?;
                if index < 0 {
                    return Err(MarshalError::MalformedEncoding);
                }
                let entry = self.shared.object(index as usize).ok_or(MarshalError::IncompleteData)?;
                Ok(Value { shared: Rc::clone(&self.shared), data: entry.data, span: Cell::new(entry.span) })
            }
            _ => Ok(self.clone()),
        }
    }

    /// The type of this handle, resolving through an object-cache link first. Total: never fails,
    /// returning [`Tag::Unknown`] rather than an error for an empty slice, an unrecognized byte, or
    /// a back-reference that cannot be resolved.
    #[cfg_attr(feature = "trace", trace)]
    pub fn tag(&self) -> Tag {
        self.resolve().map(|v| v.raw_tag()).unwrap_or(Tag::Unknown)
    }

    fn expect(&self, expected: Tag, name: &'static str) -> Result<Value<'buf>> {
        let v = self.resolve()?;
        let found = v.raw_tag();
        if found == expected {
            Ok(v)
        } else {
            Err(MarshalError::TypeMismatch { expected: name, found })
        }
    }

    #[cfg_attr(feature = "trace", trace)]
    pub fn as_bool(&self) -> Result<bool> {
        let v = self.expect(Tag::Bool, "bool")?;
        Ok(primitive::read_bool(v.data)?.0)
    }

    #[cfg_attr(feature = "trace", trace)]
    pub fn as_integer(&self) -> Result<i64> {
        let v = self.expect(Tag::Integer, "integer")?;
        Ok(primitive::read_integer(v.data)?.0)
    }

    #[cfg_attr(feature = "trace", trace)]
    pub fn as_float(&self) -> Result<f64> {
        let v = self.expect(Tag::Float, "float")?;
        Ok(primitive::read_float(v.data)?.0)
    }

    #[cfg_attr(feature = "trace", trace)]
    pub fn as_string(&self) -> Result<&'buf str> {
        let v = self.expect(Tag::String, "string")?;
        let register = v.span.get() == 0;
        let (text, len) = string::read_string(&v.shared, v.data, 0, register)?;
        if register {
            v.span.set(len);
        }
        Ok(text)
    }

    #[cfg_attr(feature = "trace", trace)]
    pub fn as_array(&self) -> Result<Vec<Value<'buf>>> {
        let v = self.expect(Tag::Array, "array")?;
        let register = v.span.get() == 0;
        let walked = composite::walk_array(&v.shared, v.data, 0, register)?;
        if register {
            v.span.set(walked.total);
        }
        Ok(walked
            .children
            .into_iter()
            .map(|(start, len)| {
                let child = v.child(&v.data[start..]);
                child.span.set(len);
                child
            })
            .collect())
    }

    /// The untyped `(key, value)` pairs of a map, before stringification - for callers who need
    /// full key fidelity rather than `as_map`'s collapsed `HashMap<String, Value>`.
    #[cfg_attr(feature = "trace", trace)]
    pub fn entries(&self) -> Result<Vec<(Value<'buf>, Value<'buf>)>> {
        let v = self.expect(Tag::Map, "map")?;
        let register = v.span.get() == 0;
        let walked = composite::walk_map(&v.shared, v.data, 0, register)?;
        if register {
            v.span.set(walked.total);
        }
        Ok(walked
            .children
            .chunks_exact(2)
            .map(|pair| {
                let (kstart, klen) = pair[0];
                let (vstart, vlen) = pair[1];
                let key = v.child(&v.data[kstart..]);
                key.span.set(klen);
                let value = v.child(&v.data[vstart..]);
                value.span.set(vlen);
                (key, value)
            })
            .collect())
    }

    /// A map with every key stringified through [`Value::render`]; a key whose tag is not a
    /// primitive renders as `""`. On a colliding key string, the last entry wins.
    #[cfg_attr(feature = "trace", trace)]
    pub fn as_map(&self) -> Result<HashMap<String, Value<'buf>>> {
        let mut out = HashMap::new();
        for (key, value) in self.entries()? {
            out.insert(key.render(), value);
        }
        Ok(out)
    }

    /// The class-name handle and raw opaque payload of a user-defined value. Neither is
    /// interpreted: this crate reconstructs no class semantics, only exposes the bytes the format
    /// itself already delimits.
    #[cfg_attr(feature = "trace", trace)]
    pub fn as_user_defined(&self) -> Result<(Value<'buf>, &'buf [u8])> {
        let v = self.expect(Tag::UserDefined, "user-defined")?;
        let (_tag, name_len) = probe::span(&v.shared, &v.data[1..], 0, false)?;
        let class_name = v.child(&v.data[1..]);
        class_name.span.set(name_len);
        let after_name = 1 + name_len;
        let (payload_len, vlen) = varint::decode(&v.data[after_name..])?;
        if payload_len < 0 {
            return Err(MarshalError::MalformedEncoding);
        }
        let payload_len = payload_len as usize;
        let payload_start = after_name + vlen;
        if v.data.len() < payload_start + payload_len {
            return Err(MarshalError::IncompleteData);
        }
        Ok((class_name, &v.data[payload_start..payload_start + payload_len]))
    }

    /// Render a primitive value as text: `<nil>` for nil, `"true"`/`"false"` for bool, decimal for
    /// integer and float (shortest round-tripping form, `inf`/`-inf`/`nan` spelled out), the text
    /// itself for a string. Any other tag renders as the empty string.
    #[cfg_attr(feature = "trace", trace)]
    pub fn render(&self) -> String {
        match self.tag() {
            Tag::Nil => "<nil>".to_string(),
            Tag::Bool => self.as_bool().map(|b| b.to_string()).unwrap_or_default(),
            Tag::Integer => self.as_integer().map(|i| i.to_string()).unwrap_or_default(),
            Tag::Float => self.as_float().map(primitive::render_float).unwrap_or_default(),
            Tag::String => self.as_string().map(str::to_string).unwrap_or_default(),
            _ => String::new(),
        }
    }
}

/// Decode the version header of `bytes` and return a handle over the single top-level value that
/// follows it.
#[cfg_attr(feature = "trace", trace)]
pub fn decode(bytes: &[u8]) -> Result<Value> {
    if bytes.len() < 2 {
        return Err(MarshalError::IncompleteData);
    }
    let shared = Shared::new((bytes[0], bytes[1]));
    Ok(Value { shared, data: &bytes[2..], span: Cell::new(0) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_is_unknown_on_empty_or_garbage_byte() {
        let v = decode(&[4, 8]).unwrap();
        assert_eq!(v.tag(), Tag::Unknown);
        let v2 = decode(&[4, 8, 0xFF]).unwrap();
        assert_eq!(v2.tag(), Tag::Unknown);
    }

    #[test]
    fn nil_round_trips() {
        let v = decode(&[4, 8, b'0']).unwrap();
        assert_eq!(v.tag(), Tag::Nil);
    }

    #[test]
    fn bool_round_trips() {
        let v = decode(&[4, 8, b'T']).unwrap();
        assert_eq!(v.tag(), Tag::Bool);
        assert!(v.as_bool().unwrap());
    }

    #[test]
    fn integer_round_trips() {
        let v = decode(&[4, 8, b'i', 0x06]).unwrap();
        assert_eq!(v.as_integer().unwrap(), 1);
    }

    #[test]
    fn type_mismatch_is_reported() {
        let v = decode(&[4, 8, b'0']).unwrap();
        assert!(matches!(v.as_integer(), Err(MarshalError::TypeMismatch { .. })));
    }
}
