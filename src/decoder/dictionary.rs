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

//! Dictionary decoding (spec.md §4.B "Dictionary"): `size:int32`, `size`
//! materialized values, then a stream of `int16` codes until end-of-buffer.

use crate::byte_order::Cursor;
use crate::cell::Cell;
use crate::column_type::ColumnType;
use crate::decoder::PrimitiveDecoder;
use crate::error::{DictionaryIndexOutOfRangeSnafu, Result};
use snafu::ensure;

pub struct DictionaryDecoder {
    cursor: Cursor,
    dictionary: Vec<Cell>,
}

impl DictionaryDecoder {
    /// Materializes the whole dictionary up front; this is the one-time
    /// O(dictionary size) cost spec.md §5 allows at `init`.
    pub fn new(column_type: ColumnType, mut cursor: Cursor) -> Result<Self> {
        let size = cursor.read_i32()?;
        let size = usize::try_from(size).unwrap_or(0);
        let mut dictionary = Vec::with_capacity(size);
        for _ in 0..size {
            let mut cell = column_type.new_cell();
            column_type.extract_into(&mut cursor, &mut cell)?;
            dictionary.push(cell);
        }
        Ok(Self { cursor, dictionary })
    }
}

impl PrimitiveDecoder for DictionaryDecoder {
    fn has_next(&self) -> bool {
        self.cursor.has_remaining()
    }

    fn next(&mut self) -> Result<&Cell> {
        let code = self.cursor.read_i16()?;
        let size = self.dictionary.len();
        ensure!(
            code >= 0 && (code as usize) < size,
            DictionaryIndexOutOfRangeSnafu {
                code: code as u16,
                size: size as u32,
            }
        );
        Ok(&self.dictionary[code as usize])
    }
}
