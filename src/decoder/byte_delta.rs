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

//! Byte-delta decoding (spec.md §4.B "Byte-delta"), applicable to SHORT,
//! INT, LONG: each row is preceded by a 1-byte flag. [`NEW_BASE_VALUE`]
//! means a full-width value follows; any other flag is a signed delta
//! added to the previous value at the type's natural width, wrapping on
//! overflow as the writer defines (no overflow check here, spec.md §4.B).
//!
//! spec.md §9 Open Question (b) leaves the exact sentinel unspecified
//! beyond "must match bit-exact" with the writer; this crate fixes it to
//! `i8::MIN`, reserving the one extreme value a delta byte can take and
//! leaving the other 255 as legal deltas. See DESIGN.md.

use crate::byte_order::Cursor;
use crate::cell::Cell;
use crate::column_type::ColumnType;
use crate::decoder::PrimitiveDecoder;
use crate::error::Result;

pub const NEW_BASE_VALUE: i8 = i8::MIN;

pub struct ByteDeltaDecoder {
    column_type: ColumnType,
    cursor: Cursor,
    prev: Cell,
    started: bool,
}

impl ByteDeltaDecoder {
    pub fn new(column_type: ColumnType, cursor: Cursor) -> Self {
        Self {
            prev: column_type.new_cell(),
            column_type,
            cursor,
            started: false,
        }
    }

    fn apply_delta(&mut self, delta: i8) {
        self.prev = match self.prev {
            Cell::Short(v) => Cell::Short(v.wrapping_add(delta as i16)),
            Cell::Int(v) => Cell::Int(v.wrapping_add(delta as i32)),
            Cell::Long(v) => Cell::Long(v.wrapping_add(delta as i64)),
            ref other => unreachable!(
                "byte-delta is only constructed for SHORT/INT/LONG, got {other:?}"
            ),
        };
    }
}

impl PrimitiveDecoder for ByteDeltaDecoder {
    fn has_next(&self) -> bool {
        self.cursor.has_remaining()
    }

    fn next(&mut self) -> Result<&Cell> {
        let flag = self.cursor.read_i8()?;
        if !self.started || flag == NEW_BASE_VALUE {
            self.column_type
                .extract_into(&mut self.cursor, &mut self.prev)?;
            self.started = true;
        } else {
            self.apply_delta(flag);
        }
        Ok(&self.prev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_order::ByteOrder;
    use bytes::{BufMut, Bytes, BytesMut};

    #[test]
    fn short_delta_round_trip_worked_example() {
        // NEW_BASE_VALUE, 1000, +5, +5, NEW_BASE_VALUE, -1, -3
        let mut buf = BytesMut::new();
        buf.put_i8(NEW_BASE_VALUE);
        buf.put_i16_le(1000);
        buf.put_i8(5);
        buf.put_i8(5);
        buf.put_i8(NEW_BASE_VALUE);
        buf.put_i16_le(-1);
        buf.put_i8(-3);
        let bytes: Bytes = buf.freeze();

        let cursor = Cursor::new(bytes, ByteOrder::LittleEndian);
        let mut decoder = ByteDeltaDecoder::new(ColumnType::Short, cursor);

        let mut decoded = vec![];
        while decoder.has_next() {
            decoded.push(decoder.next().unwrap().as_i64().unwrap());
        }
        assert_eq!(decoded, vec![1000, 1005, 1010, -1, -4]);
    }

    #[test]
    fn int_delta_wraps_on_overflow_without_erroring() {
        let mut buf = BytesMut::new();
        buf.put_i8(NEW_BASE_VALUE);
        buf.put_i32_le(i32::MAX);
        buf.put_i8(1);
        let bytes: Bytes = buf.freeze();

        let cursor = Cursor::new(bytes, ByteOrder::LittleEndian);
        let mut decoder = ByteDeltaDecoder::new(ColumnType::Int, cursor);
        assert_eq!(decoder.next().unwrap().as_i64().unwrap(), i32::MAX as i64);
        assert_eq!(
            decoder.next().unwrap().as_i64().unwrap(),
            i32::MIN as i64
        );
    }

    use proptest::prelude::*;

    /// Builds a valid byte-delta buffer for `values`, emitting a full base
    /// whenever the previous-to-current delta doesn't fit a legal delta byte
    /// (either out of `i8` range or colliding with the sentinel itself).
    fn encode_short(values: &[i16]) -> Bytes {
        let mut buf = BytesMut::new();
        let mut prev: Option<i16> = None;
        for &value in values {
            let diff = prev.map(|p| value as i32 - p as i32);
            match diff.and_then(|d| i8::try_from(d).ok()).filter(|&d| d != NEW_BASE_VALUE) {
                Some(delta) => buf.put_i8(delta),
                None => {
                    buf.put_i8(NEW_BASE_VALUE);
                    buf.put_i16_le(value);
                }
            }
            prev = Some(value);
        }
        buf.freeze()
    }

    proptest! {
        #[test]
        fn roundtrip_short_byte_delta(values in prop::collection::vec(any::<i16>(), 0..80)) {
            let cursor = Cursor::new(encode_short(&values), ByteOrder::LittleEndian);
            let mut decoder = ByteDeltaDecoder::new(ColumnType::Short, cursor);

            let mut decoded = vec![];
            while decoder.has_next() {
                decoded.push(decoder.next().unwrap().as_i64().unwrap() as i16);
            }
            prop_assert_eq!(decoded, values);
        }
    }
}
