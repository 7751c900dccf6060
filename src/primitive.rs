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
 * rs_marshal primitive readers: nil, bool, integer, float
 **************************************************************************************************/
#[cfg(feature = "trace")]
use func_trace::trace;

use crate::constants::{TAG_FALSE, TAG_TRUE};
use crate::error::{MarshalError, Result};
use crate::string::read_length_prefixed;
use crate::varint;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// Read a bool value. `data` starts at the `T`/`F` tag byte.
#[cfg_attr(feature = "trace", trace)]
pub(crate) fn read_bool(data: &[u8]) -> Result<(bool, usize)> {
    match data.first() {
        Some(&TAG_TRUE) => Ok((true, 1)),
        Some(&TAG_FALSE) => Ok((false, 1)),
        _ => Err(MarshalError::IncompleteData),
    }
}

/// Read an integer value. `data` starts at the `i` tag byte.
#[cfg_attr(feature = "trace", trace)]
pub(crate) fn read_integer(data: &[u8]) -> Result<(i64, usize)> {
    let (value, len) = varint::decode(&data[1..])?;
    Ok((value, 1 + len))
}

/// Read a float value. `data` starts at the `f` tag byte; the payload is a length-prefixed ASCII
/// digit string, the same shape as a raw string, with `inf`/`-inf`/`nan` spelled out literally.
#[cfg_attr(feature = "trace", trace)]
pub(crate) fn read_float(data: &[u8]) -> Result<(f64, usize)> {
    let (bytes, consumed) = read_length_prefixed(data.get(1..).ok_or(MarshalError::IncompleteData)?)?;
    let text = core::str::from_utf8(bytes).map_err(|_| MarshalError::Utf8Error)?;
    let value = parse_float_text(text)?;
    Ok((value, 1 + consumed))
}

fn parse_float_text(text: &str) -> Result<f64> {
    match text.to_ascii_lowercase().as_str() {
        "inf" => Ok(f64::INFINITY),
        "-inf" => Ok(f64::NEG_INFINITY),
        "nan" => Ok(f64::NAN),
        _ => text.parse::<f64>().map_err(|_| MarshalError::MalformedEncoding),
    }
}

/// Render a float the way [`crate::value::Value::render`] needs to: Rust's own `Display` for
/// `f64` already produces the shortest round-tripping decimal form; only the special values need
/// spelling out to match the format's own textual convention.
pub(crate) fn render_float(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "inf".to_string() } else { "-inf".to_string() }
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_reads_true_and_false() {
        assert_eq!(read_bool(b"T").unwrap(), (true, 1));
        assert_eq!(read_bool(b"F").unwrap(), (false, 1));
    }

    #[test]
    fn integer_reads_small_positive() {
        assert_eq!(read_integer(&[b'i', 0x06]).unwrap(), (1, 2));
    }

    #[test]
    fn float_reads_plain_decimal() {
        let mut buf = vec![b'f', 0x05 + 4];
        buf.extend_from_slice(b"3.14");
        assert_eq!(read_float(&buf).unwrap(), (3.14, buf.len()));
    }

    #[test]
    fn float_reads_infinities_and_nan() {
        let mut buf = vec![b'f', 0x05 + 3];
        buf.extend_from_slice(b"inf");
        let (value, _) = read_float(&buf).unwrap();
        assert!(value.is_infinite() && value.is_sign_positive());
    }
}
