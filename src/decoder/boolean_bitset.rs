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

//! Boolean bit-packed decoding (spec.md §4.B "Boolean bitset"), applicable
//! only to BOOLEAN: `count:int32` then `ceil(count/64)` little-endian
//! 64-bit words, padded to the word boundary.

use crate::byte_order::Cursor;
use crate::cell::Cell;
use crate::decoder::PrimitiveDecoder;
use crate::error::Result;

pub struct BooleanBitsetDecoder {
    cursor: Cursor,
    pos: u32,
    count: u32,
    current_word: u64,
    cell: Cell,
}

impl BooleanBitsetDecoder {
    pub fn new(mut cursor: Cursor) -> Result<Self> {
        let count = cursor.read_i32()?;
        let count = u32::try_from(count).unwrap_or(0);
        Ok(Self {
            cursor,
            pos: 0,
            count,
            current_word: 0,
            cell: Cell::Boolean(false),
        })
    }
}

impl PrimitiveDecoder for BooleanBitsetDecoder {
    fn has_next(&self) -> bool {
        self.pos < self.count
    }

    fn known_row_count(&self) -> Option<u32> {
        Some(self.count)
    }

    fn next(&mut self) -> Result<&Cell> {
        if self.pos % 64 == 0 {
            self.current_word = self.cursor.read_u64()?;
        }
        let bit = (self.current_word >> (self.pos % 64)) & 1;
        self.cell = Cell::Boolean(bit != 0);
        self.pos += 1;
        Ok(&self.cell)
    }
}
