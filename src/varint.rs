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
 * rs_marshal variable-length signed integer codec
 *
 * Every count, index and integer value in the format is encoded with the same variable-length
 * scheme: a single leading byte either carries a small value directly or names how many
 * little-endian magnitude bytes follow.
 **************************************************************************************************/
#[cfg(feature = "trace")]
use func_trace::trace;

use crate::error::{MarshalError, Result};
use crate::utils::within;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// Decode one variable-length signed integer from the front of `buf`.
///
/// Returns the decoded value together with the number of bytes consumed (always at least one).
/// `buf` must start at the varint itself, i.e. *after* any tag byte that precedes it.
#[cfg_attr(feature = "trace", trace)]
pub(crate) fn decode(buf: &[u8]) -> Result<(i64, usize)> {
    let b0 = *buf.first().ok_or(MarshalError::IncompleteData)?;
    if b0 <= 0x05 {
        let n = b0 as usize;
        if !within(buf, 1, n) {
            return Err(MarshalError::IncompleteData);
        }
        let mut magnitude: u64 = 0;
        for (i, byte) in buf[1..1 + n].iter().enumerate() {
            magnitude |= (*byte as u64) << (8 * i);
        }
        Ok((magnitude as i64, n + 1))
    } else if b0 <= 0xFA {
        let value = if b0 > 0x7F {
            -(((0xFFu16 - b0 as u16) + 1) as i64) + 5
        } else {
            b0 as i64 - 5
        };
        Ok((value, 1))
    } else {
        let n = (0xFFu16 - b0 as u16 + 1) as usize;
        if !within(buf, 1, n) {
            return Err(MarshalError::IncompleteData);
        }
        let mut magnitude: u64 = 0;
        for (i, byte) in buf[1..1 + n].iter().enumerate() {
            magnitude |= ((0xFFu8 - *byte) as u64) << (8 * i);
        }
        Ok((-(magnitude as i64) - 1, n + 1))
    }
}
