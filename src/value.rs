//! SQL 值类型：字段值、条件值与占位符参数共用的封闭枚举。

use crate::valuer::SqlValuer;
use std::borrow::Cow;

/// SQL 值。
///
/// 字面量模式下由 [`crate::escape`] 转成文本；占位符模式下原样进入参数列表。
#[derive(Debug, Clone)]
pub enum SqlValue {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    String(Cow<'static, str>),
    DateTime(time::OffsetDateTime),
    Bytes(Vec<u8>),
    Array(SqlArray),
    Valuer(Box<dyn SqlValuer>),
}

/// 数组值，用于 `IN` / `NOT IN` 条件。
#[derive(Debug, Clone, PartialEq)]
pub enum SqlArray {
    String(Vec<String>),
    I64(Vec<i64>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    Bool(Vec<bool>),
}

impl SqlArray {
    pub fn len(&self) -> usize {
        match self {
            Self::String(v) => v.len(),
            Self::I64(v) => v.len(),
            Self::U64(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
            Self::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SqlValue {
    /// 将 `Option<T>` 映射为 `SqlValue`：`None => Null`，`Some(v) => v.into()`。
    pub fn from_option<T: Into<SqlValue>>(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }

    /// 值的种类名，用于日志。
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::I64(_) => "i64",
            Self::U64(_) => "u64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::String(_) => "string",
            Self::DateTime(_) => "datetime",
            Self::Bytes(_) => "bytes",
            Self::Array(_) => "array",
            Self::Valuer(_) => "valuer",
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }
}

impl PartialEq for SqlValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::I64(a), Self::I64(b)) => a == b,
            (Self::U64(a), Self::U64(b)) => a == b,
            (Self::F32(a), Self::F32(b)) => a == b,
            (Self::F64(a), Self::F64(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            // valuer 之间按解析后的值比较
            (Self::Valuer(a), Self::Valuer(b)) => match (a.value(), b.value()) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            },
            _ => false,
        }
    }
}

impl From<()> for SqlValue {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! from_signed {
    ($($t:ty),+ $(,)?) => {
        $(impl From<$t> for SqlValue {
            fn from(v: $t) -> Self {
                Self::I64(v as i64)
            }
        })+
    };
}

macro_rules! from_unsigned {
    ($($t:ty),+ $(,)?) => {
        $(impl From<$t> for SqlValue {
            fn from(v: $t) -> Self {
                Self::U64(v as u64)
            }
        })+
    };
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for SqlValue {
    fn from(v: f32) -> Self {
        Self::F32(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::String(Cow::Owned(v))
    }
}

impl From<&'static str> for SqlValue {
    fn from(v: &'static str) -> Self {
        Self::String(Cow::Borrowed(v))
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<time::OffsetDateTime> for SqlValue {
    fn from(v: time::OffsetDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl From<time::PrimitiveDateTime> for SqlValue {
    fn from(v: time::PrimitiveDateTime) -> Self {
        Self::DateTime(v.assume_utc())
    }
}

impl From<SqlArray> for SqlValue {
    fn from(v: SqlArray) -> Self {
        Self::Array(v)
    }
}

impl From<Box<dyn SqlValuer>> for SqlValue {
    fn from(v: Box<dyn SqlValuer>) -> Self {
        Self::Valuer(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        Self::from_option(v)
    }
}

macro_rules! from_array {
    ($variant:ident, $elem:ty => $($t:ty),+ $(,)?) => {
        $(
            impl From<Vec<$t>> for SqlValue {
                fn from(v: Vec<$t>) -> Self {
                    Self::Array(SqlArray::$variant(v.into_iter().map(<$elem>::from).collect()))
                }
            }

            impl<const N: usize> From<[$t; N]> for SqlValue {
                fn from(v: [$t; N]) -> Self {
                    Self::Array(SqlArray::$variant(v.into_iter().map(<$elem>::from).collect()))
                }
            }
        )+
    };
}

from_array!(I64, i64 => i8, i16, i32, i64);
from_array!(U64, u64 => u16, u32, u64);
from_array!(F32, f32 => f32);
from_array!(F64, f64 => f64);
from_array!(Bool, bool => bool);
from_array!(String, String => String, &'static str);

#[cfg(test)]
mod tests {
    use super::{SqlArray, SqlValue};
    use pretty_assertions::assert_eq;

    #[test]
    fn from_option_some() {
        assert_eq!(SqlValue::from_option(Some(123_i64)), SqlValue::I64(123));
    }

    #[test]
    fn from_option_none() {
        assert_eq!(SqlValue::from(None::<i64>), SqlValue::Null);
    }

    #[test]
    fn from_unit_is_null() {
        let v: SqlValue = ().into();
        assert_eq!(v, SqlValue::Null);
    }

    #[test]
    fn integer_widths_collapse() {
        assert_eq!(SqlValue::from(7_i8), SqlValue::I64(7));
        assert_eq!(SqlValue::from(7_u32), SqlValue::U64(7));
    }

    #[test]
    fn vectors_become_arrays_except_bytes() {
        assert_eq!(
            SqlValue::from(vec![1_i32, 2, 3]),
            SqlValue::Array(SqlArray::I64(vec![1, 2, 3]))
        );
        assert_eq!(
            SqlValue::from(["a", "b"]),
            SqlValue::Array(SqlArray::String(vec!["a".to_string(), "b".to_string()]))
        );
        assert_eq!(SqlValue::from(vec![1_u8, 2]), SqlValue::Bytes(vec![1, 2]));
    }

    #[test]
    fn array_shape_helpers() {
        let v = SqlValue::from(vec![1.5_f64, 2.5]);
        assert!(v.is_array());
        assert!(!SqlValue::from(vec![1_u8]).is_array());
        let SqlValue::Array(a) = v else {
            panic!("expected array");
        };
        assert_eq!(a.len(), 2);
        assert!(SqlArray::Bool(Vec::new()).is_empty());
    }
}
