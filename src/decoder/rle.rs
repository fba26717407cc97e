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

//! Run-length decoding (spec.md §4.B "Run-length (RLE)"): a stream of
//! `(value, run_length:int32)` pairs, applicable to every fixed-width
//! column type.
//!
//! `has_next` tests "buffer has remaining bytes", not a row count — spec.md
//! §9 Open Question (a) calls out that this can over-read by one run if the
//! writer doesn't align the final run exactly to end-of-buffer. We rely on
//! that writer-side invariant rather than tracking a separate row count.

use crate::byte_order::Cursor;
use crate::cell::Cell;
use crate::column_type::ColumnType;
use crate::decoder::PrimitiveDecoder;
use crate::error::{Result, RunPastEndSnafu};
use snafu::ensure;

pub struct RleDecoder {
    column_type: ColumnType,
    cursor: Cursor,
    cell: Cell,
    run_len: i32,
    count_in_run: i32,
}

impl RleDecoder {
    pub fn new(column_type: ColumnType, cursor: Cursor) -> Self {
        Self {
            cell: column_type.new_cell(),
            column_type,
            cursor,
            run_len: 0,
            count_in_run: 0,
        }
    }
}

impl PrimitiveDecoder for RleDecoder {
    fn has_next(&self) -> bool {
        // Mid-run, there's always a next value even with zero bytes left;
        // a fresh run can only start if the buffer still has bytes. The
        // writer-side invariant (stream ends exactly at end-of-buffer)
        // means these two conditions never disagree about the final row.
        self.count_in_run < self.run_len || self.cursor.has_remaining()
    }

    fn next(&mut self) -> Result<&Cell> {
        if self.count_in_run == self.run_len {
            self.column_type
                .extract_into(&mut self.cursor, &mut self.cell)?;
            let remaining_before = self.cursor.remaining();
            self.run_len = self.cursor.read_i32()?;
            ensure!(
                self.run_len >= 0,
                RunPastEndSnafu {
                    overrun: remaining_before
                }
            );
            self.count_in_run = 1;
        } else {
            self.count_in_run += 1;
        }
        Ok(&self.cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_order::ByteOrder;
    use bytes::{BufMut, Bytes, BytesMut};

    fn rle_long_buffer(runs: &[(i64, i32)]) -> Bytes {
        let mut buf = BytesMut::new();
        for &(value, run_length) in runs {
            buf.put_i64_le(value);
            buf.put_i32_le(run_length);
        }
        buf.freeze()
    }

    #[test]
    fn long_rle_expands_runs() {
        let cursor = Cursor::new(
            rle_long_buffer(&[(100, 3), (200, 1), (100, 2)]),
            ByteOrder::LittleEndian,
        );
        let mut decoder = RleDecoder::new(ColumnType::Long, cursor);

        let mut decoded = vec![];
        while decoder.has_next() {
            decoded.push(decoder.next().unwrap().as_i64().unwrap());
        }
        assert_eq!(decoded, vec![100, 100, 100, 200, 100, 100]);
    }

    use proptest::prelude::*;

    fn runs_strategy() -> impl Strategy<Value = Vec<(i64, u16)>> {
        prop::collection::vec((any::<i64>(), 1u16..200), 1..50)
    }

    fn expand(runs: &[(i64, u16)]) -> Vec<i64> {
        runs.iter()
            .flat_map(|&(value, len)| std::iter::repeat(value).take(len as usize))
            .collect()
    }

    proptest! {
        #[test]
        fn roundtrip_rle_runs(runs in runs_strategy()) {
            let pairs: Vec<(i64, i32)> = runs.iter().map(|&(v, l)| (v, l as i32)).collect();
            let cursor = Cursor::new(rle_long_buffer(&pairs), ByteOrder::LittleEndian);
            let mut decoder = RleDecoder::new(ColumnType::Long, cursor);

            let mut decoded = vec![];
            while decoder.has_next() {
                decoded.push(decoder.next().unwrap().as_i64().unwrap());
            }
            prop_assert_eq!(decoded, expand(&runs));
        }
    }
}
