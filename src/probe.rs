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
 * rs_marshal size prober
 *
 * Every value in the format is either fixed-size, length-prefixed, or a count-prefixed sequence of
 * sub-values - there is no end marker anywhere. Finding where one value ends (so that a sibling,
 * or the rest of an enclosing array/map, can be found) means walking it the same way a full read
 * would. This module and `composite` are mutually recursive for exactly that reason: measuring an
 * array means walking its elements, and an element may itself be an array.
 *
 * `register` threads the "is this the first time this byte range has been visited" decision down
 * through the whole recursive walk. The public facade (`Value::as_array`/`as_map`/`as_string`)
 * decides it once, from its own cached span, and the two mutually recursive walkers below simply
 * obey it - this is what keeps a second call to `as_array()` on the same handle from registering
 * its elements into the object cache twice.
 **************************************************************************************************/
#[cfg(feature = "trace")]
use func_trace::trace;

use crate::cache::Shared;
use crate::composite;
use crate::constants::{
    MAX_DEPTH, TAG_ARRAY, TAG_FALSE, TAG_FLOAT, TAG_INTEGER, TAG_IVAR, TAG_LINK, TAG_MAP, TAG_NIL,
    TAG_OBJECT, TAG_STRING, TAG_SYMBOL, TAG_SYMBOL_REF, TAG_TRUE, TAG_USER_DEFINED,
};
use crate::error::{MarshalError, Result};
use crate::primitive;
use crate::string;
use crate::utils::within;
use crate::value::Tag;
use crate::varint;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// Measure the value at the front of `data`, returning its tag and the number of bytes it
/// occupies. Interns any new symbol encountered along the way; registers composite/string values
/// into the object cache only when `register` is `true`.
#[cfg_attr(feature = "trace", trace)]
pub(crate) fn span<'buf>(
    shared: &Shared<'buf>,
    data: &'buf [u8],
    depth: usize,
    register: bool,
) -> Result<(Tag, usize)> {
    if depth > MAX_DEPTH {
        return Err(MarshalError::DepthExceeded);
    }
    let b0 = *data.first().ok_or(MarshalError::IncompleteData)?;
    match b0 {
        TAG_LINK => {
            let (_index, vlen) = varint::decode(data.get(1..).ok_or(MarshalError::IncompleteData)?)?;
            Ok((Tag::Unknown, 1 + vlen))
        }
        TAG_NIL => Ok((Tag::Nil, 1)),
        TAG_TRUE | TAG_FALSE => Ok((Tag::Bool, 1)),
        TAG_INTEGER => {
            let (_value, len) = primitive::read_integer(data)?;
            Ok((Tag::Integer, len))
        }
        TAG_FLOAT => {
            let (_value, len) = primitive::read_float(data)?;
            Ok((Tag::Float, len))
        }
        TAG_SYMBOL | TAG_SYMBOL_REF | TAG_STRING => {
            let (_text, len) = string::read_string(shared, data, depth, register)?;
            Ok((Tag::String, len))
        }
        TAG_IVAR if data.get(1) == Some(&TAG_STRING) => {
            let (_text, len) = string::read_string(shared, data, depth, register)?;
            Ok((Tag::String, len))
        }
        TAG_IVAR => {
            let (_inner_tag, inner_len) =
                span(shared, data.get(1..).ok_or(MarshalError::IncompleteData)?, depth + 1, register)?;
            let trailer_start = 1 + inner_len;
            let trailer_len = skip_maplike(
                shared,
                data.get(trailer_start..).ok_or(MarshalError::IncompleteData)?,
                depth,
                register,
            )?;
            Ok((Tag::InstanceVariables, trailer_start + trailer_len))
        }
        TAG_USER_DEFINED => {
            let (_name_tag, name_len) =
                span(shared, data.get(1..).ok_or(MarshalError::IncompleteData)?, depth + 1, register)?;
            let after_name = 1 + name_len;
            let (payload_len, vlen) =
                varint::decode(data.get(after_name..).ok_or(MarshalError::IncompleteData)?)?;
            if payload_len < 0 {
                return Err(MarshalError::MalformedEncoding);
            }
            let total = after_name + vlen + payload_len as usize;
            if !within(data, 0, total) {
                return Err(MarshalError::IncompleteData);
            }
            Ok((Tag::UserDefined, total))
        }
        TAG_OBJECT => {
            let (_name_tag, name_len) =
                span(shared, data.get(1..).ok_or(MarshalError::IncompleteData)?, depth + 1, register)?;
            let maplike_start = 1 + name_len;
            let maplike_len = skip_maplike(
                shared,
                data.get(maplike_start..).ok_or(MarshalError::IncompleteData)?,
                depth,
                register,
            )?;
            Ok((Tag::ObjectInstance, maplike_start + maplike_len))
        }
        TAG_ARRAY => {
            let result = composite::walk_array(shared, data, depth, register)?;
            Ok((Tag::Array, result.total))
        }
        TAG_MAP => {
            let result = composite::walk_map(shared, data, depth, register)?;
            Ok((Tag::Map, result.total))
        }
        other => Err(MarshalError::UnsupportedType(other)),
    }
}

/// Skip a headerless maplike sequence: a count varint followed by that many (key, value) pairs,
/// used both for the `I"` encoded-string instance-variable trailer and for the general
/// instance-variable / object-instance ivar block. Keys are always symbols in practice and so
/// never enter the object cache; values are arbitrary and walked (and, if eligible, registered)
/// the same way any other value is.
#[cfg_attr(feature = "trace", trace)]
pub(crate) fn skip_maplike<'buf>(
    shared: &Shared<'buf>,
    data: &'buf [u8],
    depth: usize,
    register: bool,
) -> Result<usize> {
    let (count, vlen) = varint::decode(data)?;
    if count < 0 {
        return Err(MarshalError::MalformedEncoding);
    }
    let count = count as usize;
    let mut idx = vlen;
    for _ in 0..count {
        let (_ktag, klen) =
            span(shared, data.get(idx..).ok_or(MarshalError::IncompleteData)?, depth + 1, register)?;
        idx += klen;
        let (_vtag, vklen) =
            span(shared, data.get(idx..).ok_or(MarshalError::IncompleteData)?, depth + 1, register)?;
        idx += vklen;
    }
    Ok(idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Shared;

    #[test]
    fn measures_nil_bool_integer() {
        let shared = Shared::new_for_test();
        assert_eq!(span(&shared, b"0", 0, false).unwrap(), (Tag::Nil, 1));
        assert_eq!(span(&shared, b"T", 0, false).unwrap(), (Tag::Bool, 1));
        assert_eq!(span(&shared, &[b'i', 0x06], 0, false).unwrap(), (Tag::Integer, 2));
    }

    #[test]
    fn measures_link_without_resolving() {
        let shared = Shared::new_for_test();
        assert_eq!(span(&shared, &[b'@', 0x06], 0, false).unwrap(), (Tag::Unknown, 2));
    }

    #[test]
    fn depth_limit_is_enforced() {
        let shared = Shared::new_for_test();
        // Tag::InstanceVariables wrapping itself, `MAX_DEPTH + 2` times deep, all referring past
        // a truncated buffer - what matters here is that recursion bails before stack overflow.
        let mut data = vec![b'I'; MAX_DEPTH + 2];
        data.push(b'0');
        let err = span(&shared, &data, 0, false).unwrap_err();
        assert_eq!(err, MarshalError::DepthExceeded);
    }
}
