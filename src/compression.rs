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

use crate::column_type::ColumnType;
use crate::error::{Result, UnknownCompressionTypeSnafu};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum CompressionType {
    Default = 0,
    Rle = 1,
    Dict = 2,
    BooleanBitset = 3,
    ByteDelta = 4,
}

impl CompressionType {
    pub fn from_tag(tag: i32) -> Result<Self> {
        Ok(match tag {
            0 => CompressionType::Default,
            1 => CompressionType::Rle,
            2 => CompressionType::Dict,
            3 => CompressionType::BooleanBitset,
            4 => CompressionType::ByteDelta,
            _ => return UnknownCompressionTypeSnafu { tag }.fail(),
        })
    }

    pub fn tag(self) -> i32 {
        self as i32
    }

    /// Legality rules from spec.md §4.B, one branch per compression scheme.
    /// Adding a new scheme means adding one arm here plus one new decoder
    /// (spec.md §6).
    pub fn applicable_to(self, column_type: ColumnType) -> bool {
        match self {
            CompressionType::Default => true,
            CompressionType::Rle => column_type.is_fixed_width(),
            CompressionType::Dict => {
                matches!(
                    column_type,
                    ColumnType::String | ColumnType::Binary | ColumnType::Timestamp
                ) || matches!(column_type.fixed_width(), Some(width) if width > 2)
            }
            CompressionType::BooleanBitset => column_type == ColumnType::Boolean,
            CompressionType::ByteDelta => matches!(
                column_type,
                ColumnType::Short | ColumnType::Int | ColumnType::Long
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_tag() {
        assert!(CompressionType::from_tag(99).is_err());
    }

    #[test]
    fn byte_delta_rejects_string() {
        assert!(!CompressionType::ByteDelta.applicable_to(ColumnType::String));
    }

    #[test]
    fn dict_legal_for_short_is_false_since_code_width_ties() {
        // 16-bit code doesn't "beat" a 16-bit value width.
        assert!(!CompressionType::Dict.applicable_to(ColumnType::Short));
    }

    #[test]
    fn dict_legal_for_int_since_code_width_beats_value_width() {
        assert!(CompressionType::Dict.applicable_to(ColumnType::Int));
    }

    #[test]
    fn rle_legal_iff_fixed_width() {
        assert!(CompressionType::Rle.applicable_to(ColumnType::Timestamp));
        assert!(!CompressionType::Rle.applicable_to(ColumnType::String));
    }

    #[test]
    fn boolean_bitset_only_for_boolean() {
        assert!(CompressionType::BooleanBitset.applicable_to(ColumnType::Boolean));
        assert!(!CompressionType::BooleanBitset.applicable_to(ColumnType::Byte));
    }
}
