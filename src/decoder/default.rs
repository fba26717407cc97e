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

//! Uncompressed decoding (spec.md §4.B "Default"): applicable to all column
//! types, drains the buffer one value at a time via `extract_into`.

use crate::byte_order::Cursor;
use crate::cell::Cell;
use crate::column_type::ColumnType;
use crate::decoder::PrimitiveDecoder;
use crate::error::Result;

pub struct DefaultDecoder {
    column_type: ColumnType,
    cursor: Cursor,
    cell: Cell,
}

impl DefaultDecoder {
    pub fn new(column_type: ColumnType, cursor: Cursor) -> Self {
        Self {
            cell: column_type.new_cell(),
            column_type,
            cursor,
        }
    }
}

impl PrimitiveDecoder for DefaultDecoder {
    fn has_next(&self) -> bool {
        self.cursor.has_remaining()
    }

    fn next(&mut self) -> Result<&Cell> {
        self.column_type.extract_into(&mut self.cursor, &mut self.cell)?;
        Ok(&self.cell)
    }
}
