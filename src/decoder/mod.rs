// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Primitive decoders (spec.md §4.B): one per compression scheme, each a
//! lazy, finite, non-restartable sequence of [`crate::cell::Cell`]s.

pub mod boolean_bitset;
pub mod byte_delta;
pub mod default;
pub mod dictionary;
pub mod rle;

use crate::cell::Cell;
use crate::error::Result;

/// Calling `next()` when `has_next()` is false is a programmer error; spec.md
/// §4.B leaves this undefined at this layer, so implementations may panic.
pub trait PrimitiveDecoder {
    fn has_next(&self) -> bool;

    /// Returns a reference to the decoder's own internal cell: the same
    /// object on every call, rewritten in place (spec.md §9).
    fn next(&mut self) -> Result<&Cell>;

    /// The decoder's row count, when it's declared up front on the wire
    /// (e.g. BOOLEAN_BITSET's explicit `count`). `None` when the only way to
    /// know the row count is to fully drain the decoder (DEFAULT, RLE,
    /// DICT, BYTE_DELTA). Used to validate null-bitmap indices against the
    /// logical row count (spec.md §3) without over-reading the buffer.
    fn known_row_count(&self) -> Option<u32> {
        None
    }
}
