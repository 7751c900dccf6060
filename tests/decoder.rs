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
 * End-to-end decoder test cases, covering the eight root-value scenarios and the six invariants
 * over the cache-sharing/idempotence behaviour of `Value`.
 **************************************************************************************************/
extern crate rs_marshal;

use rs_marshal::{decode, MarshalError, Tag};

macro_rules! check_tag {
    ($name:ident, $bytes:expr, $tag:expr) => {
        #[test]
        fn $name() {
            let value = decode($bytes).unwrap();
            assert_eq!(value.tag(), $tag);
        }
    };
}

// Scenario 1: `04 08 30` -> NIL
check_tag!(scenario_1_nil, &[0x04, 0x08, 0x30], Tag::Nil);

// Scenario 2: `04 08 54` -> BOOL true
#[test]
fn scenario_2_bool_true() {
    let value = decode(&[0x04, 0x08, 0x54]).unwrap();
    assert_eq!(value.tag(), Tag::Bool);
    assert!(value.as_bool().unwrap());
}

// Scenario 3: `04 08 69 06` -> INTEGER 1
#[test]
fn scenario_3_integer_one() {
    let value = decode(&[0x04, 0x08, 0x69, 0x06]).unwrap();
    assert_eq!(value.tag(), Tag::Integer);
    assert_eq!(value.as_integer().unwrap(), 1);
}

// Scenario 4: `04 08 69 FF 9C` -> INTEGER -100
#[test]
fn scenario_4_integer_negative_100() {
    let value = decode(&[0x04, 0x08, 0x69, 0xFF, 0x9C]).unwrap();
    assert_eq!(value.as_integer().unwrap(), -100);
}

// Scenario 5: `04 08 3A 08 66 6F 6F` -> STRING "foo"; symbol cache ["foo"]
#[test]
fn scenario_5_symbol_string() {
    let value = decode(&[0x04, 0x08, 0x3A, 0x08, 0x66, 0x6F, 0x6F]).unwrap();
    assert_eq!(value.tag(), Tag::String);
    assert_eq!(value.as_string().unwrap(), "foo");
}

// Scenario 6: `04 08 5B 07 3A 08 66 6F 6F 3B 00` -> ARRAY of two "foo" strings, second a symbol
// back-reference.
#[test]
fn scenario_6_array_of_symbol_and_backreference() {
    let value = decode(&[0x04, 0x08, 0x5B, 0x07, 0x3A, 0x08, 0x66, 0x6F, 0x6F, 0x3B, 0x00]).unwrap();
    assert_eq!(value.tag(), Tag::Array);
    let elements = value.as_array().unwrap();
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0].as_string().unwrap(), "foo");
    assert_eq!(elements[1].as_string().unwrap(), "foo");
}

// Scenario 7: `04 08 7B 06 3A 06 61 69 0A` -> MAP {"a" -> 5}
#[test]
fn scenario_7_map_symbol_key_integer_value() {
    let value = decode(&[0x04, 0x08, 0x7B, 0x06, 0x3A, 0x06, 0x61, 0x69, 0x0A]).unwrap();
    assert_eq!(value.tag(), Tag::Map);
    let entries = value.entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0.as_string().unwrap(), "a");
    assert_eq!(entries[0].1.as_integer().unwrap(), 5);

    let map = value.as_map().unwrap();
    assert_eq!(map.get("a").unwrap().as_integer().unwrap(), 5);
}

// Scenario 8: `04 08 5B 07 22 08 66 6F 6F 40 06` -> ARRAY of two "foo" raw strings, second an
// object back-reference `@1` (index 1 because the array itself occupies index 0).
#[test]
fn scenario_8_array_with_object_backreference() {
    let value = decode(&[0x04, 0x08, 0x5B, 0x07, 0x22, 0x08, 0x66, 0x6F, 0x6F, 0x40, 0x06]).unwrap();
    let elements = value.as_array().unwrap();
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0].as_string().unwrap(), "foo");
    assert_eq!(elements[1].as_string().unwrap(), "foo");
}

// Invariant 1: `tag()` is total and deterministic - never panics, same answer every call.
#[test]
fn invariant_tag_is_total_and_deterministic() {
    let value = decode(&[0x04, 0x08, 0xFF]).unwrap();
    assert_eq!(value.tag(), Tag::Unknown);
    assert_eq!(value.tag(), value.tag());
}

// Invariant 2: after `as_array()`, the element spans cover exactly the value region.
#[test]
fn invariant_array_span_covers_value_region() {
    let bytes = [0x04, 0x08, 0x5B, 0x07, 0x69, 0x06, 0x69, 0x0C];
    let value = decode(&bytes).unwrap();
    let elements = value.as_array().unwrap();
    assert_eq!(elements[0].as_integer().unwrap(), 1);
    assert_eq!(elements[1].as_integer().unwrap(), 7);
}

// Invariant 3: symbol cache indices are stable and assigned in traversal order.
#[test]
fn invariant_symbol_cache_indices_are_stable() {
    // array of two distinct new symbols then a back-reference to the first.
    let mut bytes = vec![0x04, 0x08, 0x5B, 0x05 + 3];
    bytes.extend_from_slice(&[0x3A, 0x05 + 3]);
    bytes.extend_from_slice(b"foo");
    bytes.extend_from_slice(&[0x3A, 0x05 + 3]);
    bytes.extend_from_slice(b"bar");
    bytes.extend_from_slice(&[0x3B, 0x00]);
    let value = decode(&bytes).unwrap();
    let elements = value.as_array().unwrap();
    assert_eq!(elements[0].as_string().unwrap(), "foo");
    assert_eq!(elements[1].as_string().unwrap(), "bar");
    assert_eq!(elements[2].as_string().unwrap(), "foo");
}

// Invariant 4 & 5: the object cache holds exactly the first-materialised composite/string
// handles, and an `@k` back-reference resolves to the same value as the `k`-th cached handle.
#[test]
fn invariant_object_backreference_resolves_to_cached_value() {
    let bytes = [0x04, 0x08, 0x5B, 0x07, 0x22, 0x08, 0x66, 0x6F, 0x6F, 0x40, 0x06];
    let value = decode(&bytes).unwrap();
    let elements = value.as_array().unwrap();
    assert_eq!(elements[1].tag(), Tag::String);
    assert_eq!(elements[1].as_string().unwrap(), elements[0].as_string().unwrap());
}

// Invariant 6: idempotence - calling `as_array()` twice yields handles over the same sub-slices
// and does not register the elements into the object cache a second time.
#[test]
fn invariant_as_array_is_idempotent() {
    let bytes = [0x04, 0x08, 0x5B, 0x07, 0x22, 0x08, 0x66, 0x6F, 0x6F, 0x40, 0x06];
    let value = decode(&bytes).unwrap();
    let first = value.as_array().unwrap();
    let second = value.as_array().unwrap();
    assert_eq!(first.len(), second.len());
    // A back-reference that pointed past the two registered entries would only ever go wrong if
    // the second `as_array()` call had pushed duplicate entries ahead of it.
    assert_eq!(second[1].as_string().unwrap(), "foo");
}

#[test]
fn out_of_range_symbol_backreference_is_incomplete_data() {
    let bytes = [0x04, 0x08, 0x3B, 0x64];
    let err = decode(&bytes).unwrap().as_string().unwrap_err();
    assert_eq!(err, MarshalError::IncompleteData);
}

#[test]
fn out_of_range_object_backreference_is_incomplete_data() {
    let bytes = [0x04, 0x08, 0x40, 0x64];
    let err = decode(&bytes).unwrap().as_string().unwrap_err();
    assert_eq!(err, MarshalError::IncompleteData);
}

#[test]
fn user_defined_exposes_class_name_and_payload() {
    // `u`, class-name symbol `:Foo`, payload length 3, payload b"bar"
    let mut bytes = vec![0x04, 0x08, 0x75, 0x3A, 0x05 + 3];
    bytes.extend_from_slice(b"Foo");
    bytes.push(0x05 + 3);
    bytes.extend_from_slice(b"bar");
    let value = decode(&bytes).unwrap();
    assert_eq!(value.tag(), Tag::UserDefined);
    let (class_name, payload) = value.as_user_defined().unwrap();
    assert_eq!(class_name.as_string().unwrap(), "Foo");
    assert_eq!(payload, b"bar");
}
