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
 * rs_marshal module definition
 *
 * A lazy, reference-resolving decoder for the binary object-serialization format produced by a
 * popular dynamic language's built-in marshalling facility.
 **************************************************************************************************/
#![warn(missing_docs)]

//! # rs_marshal
//!
//! `rs_marshal` decodes the binary format a popular dynamic language's standard library uses to
//! serialize its object graphs: a tag-byte-driven encoding of nil, booleans, integers, floats,
//! strings and symbols, arrays, maps, and user-defined/object payloads, with two intern tables (a
//! symbol cache and an object cache) populated in the order the original writer would have
//! traversed its graph.
//!
//! Decoding is lazy: [`decode`] only reads the two-byte version header and returns a [`Value`]
//! handle over the rest of the buffer. Nothing else is parsed until a caller asks for it through a
//! typed accessor (`as_bool`, `as_integer`, `as_array`, ...), and a composite value's own elements
//! stay unparsed until it is walked.
//!
//! This crate decodes only; it does not reconstruct the class semantics the original producer's
//! objects had (no method dispatch, no field-to-struct mapping), and it does not encode.
//!
//! ## Features
//!
//! - `trace` — instruments every public and most private functions with `func_trace` entry/exit
//!   logging. Off by default; meant for debugging this crate itself, not for applications
//!   embedding it.
//!
//! ## Example
//!
//! ```
//! let buf = [0x04, 0x08, b'[', 0x05 + 2, b'i', 0x05 + 1, b'i', 0x05 + 2];
//! let value = rs_marshal::decode(&buf).unwrap();
//! assert_eq!(value.tag(), rs_marshal::Tag::Array);
//! let elements = value.as_array().unwrap();
//! assert_eq!(elements[0].as_integer().unwrap(), 1);
//! assert_eq!(elements[1].as_integer().unwrap(), 2);
//! ```

mod cache;
mod composite;
mod constants;
mod primitive;
mod probe;
mod string;
mod utils;
mod varint;

pub mod error;

mod value;

pub use error::{MarshalError, Result};
pub use value::{decode, Tag, Value};
