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
 * rs_marshal string/symbol reader
 *
 * Four wire forms collapse to the one `Tag::String`: a new symbol (`:`), a symbol back-reference
 * (`;`), a raw length-prefixed string (`"`), and a raw string carrying a trailing instance-variable
 * block, almost always just naming its encoding (`I"`).
 **************************************************************************************************/
#[cfg(feature = "trace")]
use func_trace::trace;

use crate::cache::Shared;
use crate::constants::{TAG_IVAR, TAG_STRING, TAG_SYMBOL, TAG_SYMBOL_REF};
use crate::error::{MarshalError, Result};
use crate::probe;
use crate::utils::within;
use crate::value::Tag;
use crate::varint;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// Read a varint length followed by that many raw bytes. `data` starts at the length varint
/// itself (i.e. after any tag byte).
#[cfg_attr(feature = "trace", trace)]
pub(crate) fn read_length_prefixed(data: &[u8]) -> Result<(&[u8], usize)> {
    let (len, vlen) = varint::decode(data)?;
    if len < 0 {
        return Err(MarshalError::MalformedEncoding);
    }
    let len = len as usize;
    if !within(data, vlen, len) {
        return Err(MarshalError::IncompleteData);
    }
    Ok((&data[vlen..vlen + len], vlen + len))
}

/// Read a full `STRING`-tagged value starting at `data[0]`, interning a new symbol into `shared`
/// where relevant and, for the `register` case, registering raw/encoded strings into the object
/// cache (bare symbols never enter the object cache — see the cache manager's eligibility rule).
///
/// Returns the decoded text, borrowed straight from `data`, and the number of bytes consumed
/// (including any trailing instance-variable block on an `I"` form).
#[cfg_attr(feature = "trace", trace)]
pub(crate) fn read_string<'buf>(
    shared: &Shared<'buf>,
    data: &'buf [u8],
    depth: usize,
    register: bool,
) -> Result<(&'buf str, usize)> {
    let first = *data.first().ok_or(MarshalError::IncompleteData)?;
    let (text, len) = match first {
        TAG_SYMBOL => {
            let (bytes, clen) = read_length_prefixed(data.get(1..).ok_or(MarshalError::IncompleteData)?)?;
            let text = core::str::from_utf8(bytes).map_err(|_| MarshalError::Utf8Error)?;
            shared.intern_symbol(text);
            (text, 1 + clen)
        }
        TAG_SYMBOL_REF => {
            let (index, vlen) = varint::decode(data.get(1..).ok_or(MarshalError::IncompleteData)?)?;
            if index < 0 {
                return Err(MarshalError::MalformedEncoding);
            }
            let text = shared.symbol(index as usize).ok_or(MarshalError::IncompleteData)?;
            (text, 1 + vlen)
        }
        TAG_STRING => {
            let (bytes, clen) = read_length_prefixed(data.get(1..).ok_or(MarshalError::IncompleteData)?)?;
            let text = core::str::from_utf8(bytes).map_err(|_| MarshalError::Utf8Error)?;
            (text, 1 + clen)
        }
        TAG_IVAR if data.get(1) == Some(&TAG_STRING) => {
            let (bytes, clen) =
                read_length_prefixed(data.get(2..).ok_or(MarshalError::IncompleteData)?)?;
            let text = core::str::from_utf8(bytes).map_err(|_| MarshalError::Utf8Error)?;
            let trailer_start = 2 + clen;
            let trailer_len = probe::skip_maplike(
                shared,
                data.get(trailer_start..).ok_or(MarshalError::IncompleteData)?,
                depth,
                register,
            )?;
            (text, trailer_start + trailer_len)
        }
        _ => return Err(MarshalError::TypeMismatch { expected: "string", found: Tag::Unknown }),
    };
    // Bare symbol forms (`:`/`;`) never enter the object cache, regardless of `register` -
    // only raw/encoded strings are first-class back-reference targets (cache manager rule).
    if register && first != TAG_SYMBOL && first != TAG_SYMBOL_REF {
        shared.register_complete(data, Tag::String, len);
    }
    Ok((text, len))
}
