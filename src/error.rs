/***************************************************************************************************
 * Copyright (c) 2024 rs_marshal contributors. All rights reserved.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the “Software”), to deal in the Software without
 * restriction, including without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice (including the next
 * paragraph) shall be included in all copies or substantial portions of the
 * Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
 * BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 **************************************************************************************************/
/***************************************************************************************************
 * rs_marshal error API
 **************************************************************************************************/
//! Error kinds raised while decoding a buffer, and the `Result` alias used throughout this crate.

use std::result;

use thiserror::Error;

use crate::value::Tag;

/// An alias for `Result<T, MarshalError>` used throughout this crate.
pub type Result<T> = result::Result<T, MarshalError>;

/// `MarshalError` describes the ways decoding a buffer can fail.
#[derive(Copy, Clone, Debug, Error, PartialEq)]
pub enum MarshalError {
    /// The handle's resolved tag did not match the type the caller asked for.
    #[error("expected a {expected} value, found {found:?}")]
    TypeMismatch {
        /// Name of the type the caller requested.
        expected: &'static str,
        /// Tag actually found at (or resolved from) the handle.
        found: Tag,
    },
    /// A length, count, or back-reference index ran past the end of the buffer.
    #[error("buffer ended before the next value could be read")]
    IncompleteData,
    /// The first byte of a value did not match any tag this decoder understands.
    #[error("unsupported tag byte {0:#04x}")]
    UnsupportedType(u8),
    /// A string, symbol, or float digit sequence was not valid UTF-8.
    #[error("value contains invalid UTF-8")]
    Utf8Error,
    /// A float's digit string (or other encoded text) did not parse as what it claimed to be.
    #[error("malformed encoding")]
    MalformedEncoding,
    /// The size prober or composite reader recursed past the configured depth limit.
    #[error("nesting too deep")]
    DepthExceeded,
}
