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
 * Adversarial and malformed-input test cases: every bounds check must fail loudly rather than
 * read past the end of the buffer or panic.
 **************************************************************************************************/
extern crate rs_marshal;

use rs_marshal::{decode, MarshalError};

#[test]
fn truncated_version_header_is_incomplete_data() {
    assert_eq!(decode(&[0x04]).unwrap_err(), MarshalError::IncompleteData);
    assert_eq!(decode(&[]).unwrap_err(), MarshalError::IncompleteData);
}

#[test]
fn truncated_varint_length_does_not_panic() {
    // `"` raw string tag with a length varint claiming a multi-byte form that isn't there.
    let value = decode(&[0x04, 0x08, 0x22, 0x02, 0x01]).unwrap();
    assert_eq!(value.as_string().unwrap_err(), MarshalError::IncompleteData);
}

#[test]
fn string_length_past_end_of_buffer_is_incomplete_data() {
    // Claims a 10-byte payload but only one byte follows.
    let value = decode(&[0x04, 0x08, 0x22, 0x05 + 10, 0x66]).unwrap();
    assert_eq!(value.as_string().unwrap_err(), MarshalError::IncompleteData);
}

#[test]
fn array_element_count_past_end_of_buffer_is_incomplete_data() {
    // Claims 5 elements, buffer has room for none.
    let value = decode(&[0x04, 0x08, 0x5B, 0x05 + 5]).unwrap();
    assert_eq!(value.as_array().unwrap_err(), MarshalError::IncompleteData);
}

#[test]
fn unsupported_tag_byte_is_reported_with_offending_byte() {
    let value = decode(&[0x04, 0x08, 0x5B, 0x05 + 1, 0x3F]).unwrap();
    match value.as_array() {
        Err(MarshalError::UnsupportedType(byte)) => assert_eq!(byte, 0x3F),
        other => panic!("expected UnsupportedType, got {:?}", other),
    }
}

#[test]
fn deeply_nested_arrays_hit_depth_limit() {
    // 80 single-element arrays nested inside one another, wrapping a final nil: exceeds the
    // fixed recursion depth before it would otherwise overflow the stack on adversarial input.
    let mut bytes = vec![0x04, 0x08];
    for _ in 0..80 {
        bytes.push(0x5B);
        bytes.push(0x05 + 1);
    }
    bytes.push(0x30);
    let value = decode(&bytes).unwrap();
    assert_eq!(value.tag(), rs_marshal::Tag::Array);
    assert_eq!(value.as_array().unwrap_err(), MarshalError::DepthExceeded);
}

#[test]
fn encoded_string_trailer_with_zero_pairs_is_tolerated() {
    // `I"` string with an ivar trailer claiming zero pairs: malformed per well-formed payloads
    // (which always carry exactly one encoding pair) but tolerated rather than rejected.
    let mut bytes = vec![0x04, 0x08, b'I', 0x22, 0x05 + 3];
    bytes.extend_from_slice(b"foo");
    bytes.push(0x00); // pair count 0
    let value = decode(&bytes).unwrap();
    assert_eq!(value.as_string().unwrap(), "foo");
}

#[test]
fn negative_count_varint_is_malformed_encoding() {
    // Array tag whose count varint decodes to a negative number.
    let value = decode(&[0x04, 0x08, 0x5B, 0xFA]).unwrap();
    assert_eq!(value.as_array().unwrap_err(), MarshalError::MalformedEncoding);
}
