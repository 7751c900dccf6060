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
 * rs_marshal tag-byte constants
 **************************************************************************************************/

/// Maximum mutual-recursion depth allowed to the size prober and composite readers.
pub(crate) const MAX_DEPTH: usize = 64;

pub(crate) const TAG_NIL: u8 = b'0';
pub(crate) const TAG_TRUE: u8 = b'T';
pub(crate) const TAG_FALSE: u8 = b'F';
pub(crate) const TAG_INTEGER: u8 = b'i';
pub(crate) const TAG_FLOAT: u8 = b'f';
pub(crate) const TAG_SYMBOL: u8 = b':';
pub(crate) const TAG_SYMBOL_REF: u8 = b';';
pub(crate) const TAG_STRING: u8 = b'"';
pub(crate) const TAG_IVAR: u8 = b'I';
pub(crate) const TAG_USER_DEFINED: u8 = b'u';
pub(crate) const TAG_OBJECT: u8 = b'o';
pub(crate) const TAG_ARRAY: u8 = b'[';
pub(crate) const TAG_MAP: u8 = b'{';
pub(crate) const TAG_LINK: u8 = b'@';
