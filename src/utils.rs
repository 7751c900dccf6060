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
 * rs_marshal utilities
 **************************************************************************************************/
#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// Return `true` if it is possible to obtain a slice of length `len` starting from `start` from
/// `buf`, without overflowing `usize` arithmetic on an adversarial `len`.
#[cfg_attr(feature = "trace", trace)]
#[inline]
pub(crate) fn within(buf: &[u8], start: usize, len: usize) -> bool {
    start.checked_add(len).map(|end| end <= buf.len()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_accepts_exact_fit() {
        let buf = [0u8; 4];
        assert!(within(&buf, 0, 4));
        assert!(within(&buf, 2, 2));
        assert!(!within(&buf, 2, 3));
        assert!(!within(&buf, 5, 0));
    }

    #[test]
    fn within_rejects_overflowing_length() {
        let buf = [0u8; 4];
        assert!(!within(&buf, 1, usize::MAX));
    }
}
