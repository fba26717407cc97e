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

//! Buffer dispatcher (spec.md §4.E): the only public entry point, and the
//! only place that turns wire tags into concrete decoder types.

use bytes::Bytes;
use snafu::ensure;
use tracing::debug;

use crate::byte_order::{ByteOrder, Cursor};
use crate::column_type::ColumnType;
use crate::compression::CompressionType;
use crate::decoder::boolean_bitset::BooleanBitsetDecoder;
use crate::decoder::byte_delta::ByteDeltaDecoder;
use crate::decoder::default::DefaultDecoder;
use crate::decoder::dictionary::DictionaryDecoder;
use crate::decoder::rle::RleDecoder;
use crate::decoder::PrimitiveDecoder;
use crate::error::{
    IncompatibleEncodingSnafu, NullIndexOutOfOrderSnafu, NullIndexOutOfRangeSnafu, Result,
};
use crate::iterator::RowIterator;
use crate::null_mask::NullMaskDecoder;

/// Reads `column_type_tag:int32` from a duplicated, byte-order-aware view
/// of `buf` and returns a lazily-initializing [`RowIterator`] over it.
///
/// Everything past the column-type tag — the null bitmap, the
/// compression-type tag, and the compression-specific decoder — is parsed
/// lazily on the iterator's first `next()` (spec.md §4.D "Laziness rule"),
/// not here.
pub fn new_iterator(buf: Bytes, order: ByteOrder) -> Result<RowIterator> {
    let mut cursor = Cursor::new(buf, order);
    let column_type_tag = cursor.read_i32()?;
    let column_type = ColumnType::from_tag(column_type_tag)?;
    debug!(?column_type, "dispatching column buffer");
    Ok(RowIterator::fresh(column_type, cursor))
}

/// Convenience wrapper assuming the writer used little-endian byte order.
pub fn new_iterator_le(buf: Bytes) -> Result<RowIterator> {
    new_iterator(buf, ByteOrder::LittleEndian)
}

/// Parses the null bitmap and compression-type tag at the current cursor
/// position, builds the matching primitive decoder, and wraps it in the
/// null-mask wrapper. This is the deferred "init" work the facade performs
/// on first `next()`.
pub(crate) fn init_null_masked_decoder(
    column_type: ColumnType,
    mut cursor: Cursor,
) -> Result<NullMaskDecoder> {
    let null_indices = read_null_indices(&mut cursor)?;

    let compression_type_tag = cursor.read_i32()?;
    let compression = CompressionType::from_tag(compression_type_tag)?;
    ensure!(
        compression.applicable_to(column_type),
        IncompatibleEncodingSnafu {
            column_type,
            compression,
        }
    );
    debug!(?compression, "selected primitive decoder");

    let inner = build_primitive_decoder(column_type, compression, cursor)?;
    validate_null_indices(&null_indices, inner.as_ref())?;
    Ok(NullMaskDecoder::new(inner, null_indices))
}

/// Checks every null index against the logical row count (spec.md §3:
/// "row indices in the null bitmap are... within `[0, logicalCount)`"),
/// when the inner decoder can report its row count up front (BOOLEAN_BITSET
/// declares `count` explicitly on the wire). Decoders that can only learn
/// their row count by draining the buffer (DEFAULT, RLE, DICT, BYTE_DELTA)
/// are not checked here; an out-of-range code/run in those still surfaces
/// as its own fatal error once the decoder actually reaches it.
fn validate_null_indices(null_indices: &[u32], inner: &dyn PrimitiveDecoder) -> Result<()> {
    if let Some(inner_count) = inner.known_row_count() {
        let logical_count = inner_count + null_indices.len() as u32;
        for &index in null_indices {
            ensure!(
                index < logical_count,
                NullIndexOutOfRangeSnafu {
                    index,
                    count: logical_count,
                }
            );
        }
    }
    Ok(())
}

fn read_null_indices(cursor: &mut Cursor) -> Result<Vec<u32>> {
    let null_count = cursor.read_i32()?;
    let null_count = usize::try_from(null_count).unwrap_or(0);
    let mut indices = Vec::with_capacity(null_count);
    let mut previous: Option<u32> = None;
    for _ in 0..null_count {
        let index = cursor.read_u32()?;
        if let Some(previous) = previous {
            ensure!(
                index > previous,
                NullIndexOutOfOrderSnafu { index, previous }
            );
        }
        previous = Some(index);
        indices.push(index);
    }
    Ok(indices)
}

/// One arm per [`CompressionType`]; adding a new compression scheme means
/// adding one arm here plus one new decoder module (spec.md §6).
fn build_primitive_decoder(
    column_type: ColumnType,
    compression: CompressionType,
    cursor: Cursor,
) -> Result<Box<dyn PrimitiveDecoder + Send>> {
    Ok(match compression {
        CompressionType::Default => Box::new(DefaultDecoder::new(column_type, cursor)),
        CompressionType::Rle => Box::new(RleDecoder::new(column_type, cursor)),
        CompressionType::Dict => Box::new(DictionaryDecoder::new(column_type, cursor)?),
        CompressionType::BooleanBitset => Box::new(BooleanBitsetDecoder::new(cursor)?),
        CompressionType::ByteDelta => Box::new(ByteDeltaDecoder::new(column_type, cursor)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iterator::ColumnIterator;
    use bytes::{BufMut, BytesMut};

    #[test]
    fn out_of_range_null_index_against_boolean_bitset_count_is_fatal() {
        let mut buf = BytesMut::new();
        buf.put_i32_le(ColumnType::Boolean.tag());
        buf.put_i32_le(1); // null_count
        buf.put_u32_le(10); // logical count is 2 (1 bitset row + 1 null), index 10 is out of range
        buf.put_i32_le(CompressionType::BooleanBitset.tag());
        buf.put_i32_le(1); // uncompressed row count
        buf.put_u64_le(0);
        let mut iter = new_iterator_le(buf.freeze()).unwrap();

        assert!(iter.next().is_err());
        assert!(iter.next().is_err(), "iterator must stay poisoned");
    }

    #[test]
    fn unknown_compression_tag_poisons_iterator() {
        let mut buf = BytesMut::new();
        buf.put_i32_le(ColumnType::Int.tag()); // column type
        buf.put_i32_le(0); // null_count
        buf.put_i32_le(99); // bogus compression tag
        let mut iter = new_iterator_le(buf.freeze()).unwrap();

        assert!(iter.next().is_err());
        assert!(iter.next().is_err(), "iterator must stay poisoned");
    }

    #[test]
    fn int_default_no_nulls_worked_example() {
        let mut buf = BytesMut::new();
        buf.put_i32_le(ColumnType::Int.tag());
        buf.put_i32_le(0); // no nulls
        buf.put_i32_le(CompressionType::Default.tag());
        for v in [7, -3, 0, i32::MAX] {
            buf.put_i32_le(v);
        }
        let mut iter = new_iterator_le(buf.freeze()).unwrap();

        let mut decoded = vec![];
        while iter.has_next() {
            iter.next().unwrap();
            decoded.push(iter.current().unwrap().as_i64().unwrap() as i32);
        }
        assert_eq!(decoded, vec![7, -3, 0, i32::MAX]);
    }
}
