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
 * rs_marshal cache manager
 *
 * The two intern tables an emitter populates as it walks its object graph: a symbol cache shared
 * by every `:`/`;` occurrence, and an object cache that gives `@`-tagged back-references something
 * to resolve against. Both are append-only and indexed in the order the emitter would have
 * encountered the corresponding values.
 **************************************************************************************************/
use std::cell::RefCell;

use crate::value::Tag;

/// Ordered, deduplicated-by-equality table of interned symbol text.
///
/// Entries borrow directly from the buffer passed to [`crate::decode`], so the cache itself never
/// owns a `String` and carries no allocation beyond its index vector.
#[derive(Debug, Default)]
pub(crate) struct SymbolCache<'buf>(Vec<&'buf str>);

impl<'buf> SymbolCache<'buf> {
    pub(crate) fn new() -> Self {
        Self(Vec::new())
    }

    /// Intern `text`, returning its stable index. A symbol already present by equality is not
    /// duplicated; its existing index is returned instead.
    pub(crate) fn add(&mut self, text: &'buf str) -> usize {
        match self.0.iter().position(|existing| *existing == text) {
            Some(index) => index,
            None => {
                self.0.push(text);
                self.0.len() - 1
            }
        }
    }

    pub(crate) fn get(&self, index: usize) -> Option<&'buf str> {
        self.0.get(index).copied()
    }
}

/// One entry in the object cache: enough information to reconstruct a `Value` handle over the
/// same sub-range without re-walking the buffer from scratch.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ObjectCacheEntry<'buf> {
    /// The handle's data slice, unsliced at the end (see `Value`'s own doc comment for why).
    pub(crate) data: &'buf [u8],
    /// Consumed length in bytes, or `0` if a composite's self-registration has not yet been
    /// finalised by its own composite reader.
    pub(crate) span: usize,
    pub(crate) tag: Tag,
}

/// Ordered, append-only table of composite-or-string handles, indexed exactly as an emitter would
/// have indexed them: deduplication is structural (a value is registered at most once, by
/// construction of the call graph that reaches it) rather than by comparing byte ranges.
#[derive(Debug, Default)]
pub(crate) struct ObjectCache<'buf>(Vec<ObjectCacheEntry<'buf>>);

impl<'buf> ObjectCache<'buf> {
    pub(crate) fn new() -> Self {
        Self(Vec::new())
    }

    /// Register a handle before its full span is known (used for arrays/maps, which must appear
    /// in the cache before their own elements are walked so that a self-referential back-reference
    /// can resolve). Returns the index to pass to [`ObjectCache::finalize_span`] later.
    pub(crate) fn register(&mut self, data: &'buf [u8], tag: Tag) -> usize {
        self.0.push(ObjectCacheEntry { data, span: 0, tag });
        self.0.len() - 1
    }

    /// Register a handle whose span is already known in full (used for strings).
    pub(crate) fn register_complete(&mut self, data: &'buf [u8], tag: Tag, span: usize) -> usize {
        self.0.push(ObjectCacheEntry { data, span, tag });
        self.0.len() - 1
    }

    pub(crate) fn finalize_span(&mut self, index: usize, span: usize) {
        if let Some(entry) = self.0.get_mut(index) {
            entry.span = span;
        }
    }

    pub(crate) fn get(&self, index: usize) -> Option<ObjectCacheEntry<'buf>> {
        self.0.get(index).copied()
    }
}

/// The state shared by every handle produced from a single [`crate::decode`] call: the version
/// header, both intern tables, and nothing else. Held behind an `Rc` so every `Value<'buf>` can
/// clone a cheap handle to it; held behind a `RefCell` because interning is logically a side
/// effect of an otherwise read-only walk over the buffer.
///
/// Not `Sync`/`Send` by construction - each `decode()` call produces an independent tree, and nothing in this
/// crate lets two threads observe the same `Shared`.
#[derive(Debug)]
pub(crate) struct Shared<'buf> {
    version: (u8, u8),
    symbols: RefCell<SymbolCache<'buf>>,
    objects: RefCell<ObjectCache<'buf>>,
}

impl<'buf> Shared<'buf> {
    pub(crate) fn new(version: (u8, u8)) -> std::rc::Rc<Self> {
        std::rc::Rc::new(Self {
            version,
            symbols: RefCell::new(SymbolCache::new()),
            objects: RefCell::new(ObjectCache::new()),
        })
    }

    #[cfg(test)]
    pub(crate) fn new_for_test() -> std::rc::Rc<Self> {
        Self::new((4, 8))
    }

    pub(crate) fn version(&self) -> (u8, u8) {
        self.version
    }

    pub(crate) fn intern_symbol(&self, text: &'buf str) -> usize {
        self.symbols.borrow_mut().add(text)
    }

    pub(crate) fn symbol(&self, index: usize) -> Option<&'buf str> {
        self.symbols.borrow().get(index)
    }

    pub(crate) fn register_object(&self, data: &'buf [u8], tag: Tag) -> usize {
        self.objects.borrow_mut().register(data, tag)
    }

    pub(crate) fn register_complete(&self, data: &'buf [u8], tag: Tag, span: usize) -> usize {
        self.objects.borrow_mut().register_complete(data, tag, span)
    }

    pub(crate) fn finalize_object_span(&self, index: usize, span: usize) {
        self.objects.borrow_mut().finalize_span(index, span);
    }

    pub(crate) fn object(&self, index: usize) -> Option<ObjectCacheEntry<'buf>> {
        self.objects.borrow().get(index)
    }
}
