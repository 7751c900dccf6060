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
 * rs_marshal array/map readers
 *
 * An array is a tag byte, a varint element count, then that many values back to back. A map is
 * the same shape with (key, value) pairs instead of bare elements. Both register *themselves* into
 * the object cache before walking their own contents, matching the source format's own traversal
 * order: a circular array (one that contains a back-reference to itself) can only resolve if the
 * array's own cache slot exists before its elements are read.
 **************************************************************************************************/
#[cfg(feature = "trace")]
use func_trace::trace;

use crate::cache::Shared;
use crate::constants::{MAX_DEPTH, TAG_ARRAY, TAG_MAP};
use crate::error::{MarshalError, Result};
use crate::probe;
use crate::value::Tag;
use crate::varint;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// The outcome of walking an array or map: its total byte span, plus the `(offset, length)` of
/// every element (for a map, alternating key then value) relative to the start of `data`.
pub(crate) struct Walked {
    pub(crate) total: usize,
    pub(crate) children: Vec<(usize, usize)>,
}

#[cfg_attr(feature = "trace", trace)]
pub(crate) fn walk_array<'buf>(
    shared: &Shared<'buf>,
    data: &'buf [u8],
    depth: usize,
    register: bool,
) -> Result<Walked> {
    if depth > MAX_DEPTH {
        return Err(MarshalError::DepthExceeded);
    }
    debug_assert_eq!(data.first(), Some(&TAG_ARRAY));
    let (count, vlen) = varint::decode(data.get(1..).ok_or(MarshalError::IncompleteData)?)?;
    if count < 0 {
        return Err(MarshalError::MalformedEncoding);
    }
    let count = count as usize;
    let mut idx = 1 + vlen;
    let self_index = register.then(|| shared.register_object(data, Tag::Array));
    let mut children = Vec::with_capacity(count);
    for _ in 0..count {
        let (_tag, clen) =
            probe::span(shared, data.get(idx..).ok_or(MarshalError::IncompleteData)?, depth + 1, register)?;
        children.push((idx, clen));
        idx += clen;
    }
    if let Some(index) = self_index {
        shared.finalize_object_span(index, idx);
    }
    Ok(Walked { total: idx, children })
}

#[cfg_attr(feature = "trace", trace)]
pub(crate) fn walk_map<'buf>(
    shared: &Shared<'buf>,
    data: &'buf [u8],
    depth: usize,
    register: bool,
) -> Result<Walked> {
    if depth > MAX_DEPTH {
        return Err(MarshalError::DepthExceeded);
    }
    debug_assert_eq!(data.first(), Some(&TAG_MAP));
    let (count, vlen) = varint::decode(data.get(1..).ok_or(MarshalError::IncompleteData)?)?;
    if count < 0 {
        return Err(MarshalError::MalformedEncoding);
    }
    let count = count as usize;
    let mut idx = 1 + vlen;
    let self_index = register.then(|| shared.register_object(data, Tag::Map));
    let mut children = Vec::with_capacity(count * 2);
    for _ in 0..count {
        let (_ktag, klen) =
            probe::span(shared, data.get(idx..).ok_or(MarshalError::IncompleteData)?, depth + 1, register)?;
        children.push((idx, klen));
        idx += klen;
        let (_vtag, vlen2) =
            probe::span(shared, data.get(idx..).ok_or(MarshalError::IncompleteData)?, depth + 1, register)?;
        children.push((idx, vlen2));
        idx += vlen2;
    }
    if let Some(index) = self_index {
        shared.finalize_object_span(index, idx);
    }
    Ok(Walked { total: idx, children })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Shared;

    #[test]
    fn array_of_two_integers() {
        let shared = Shared::new_for_test();
        // `[`, count=2, `i` 1, `i` 2
        let data = [b'[', 0x05 + 2, b'i', 0x05 + 1, b'i', 0x05 + 2];
        let walked = walk_array(&shared, &data, 0, true).unwrap();
        assert_eq!(walked.total, data.len());
        assert_eq!(walked.children, vec![(2, 2), (4, 2)]);
    }

    #[test]
    fn array_registers_itself_before_children() {
        let shared = Shared::new_for_test();
        let mut data = vec![b'[', 0x05 + 1, b'"', 0x05 + 3];
        data.extend_from_slice(b"foo");
        walk_array(&shared, &data, 0, true).unwrap();
        let array_entry = shared.object(0).unwrap();
        assert_eq!(array_entry.tag, Tag::Array);
        let string_entry = shared.object(1).unwrap();
        assert_eq!(string_entry.tag, Tag::String);
    }
}
