//! Scan：把查询结果的一行文本单元写回模型（结果读取适配器）。
//!
//! 本库不连接数据库；这里只负责“列名 -> 字段标识”的解析与按字段写值，
//! 行数据以字符串单元的形式提供，每个单元对应 SELECT 的一列。

use crate::model::Model;
use crate::registry::ModelInfo;

/// 扫描/解析错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("scan requires a SELECT statement")]
    NotSelect,
    #[error("row has {got} cells but {expected} columns were selected")]
    NotEnoughCells { expected: usize, got: usize },
    #[error("model has no field `{0}`")]
    UnknownField(String),
    #[error("failed to parse int: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
    #[error("failed to parse float")]
    ParseFloat,
    #[error("failed to parse bool")]
    ParseBool,
    #[error("scan into this type is not supported")]
    UnsupportedType,
}

/// 从字符串单元写入自身。
pub trait ScanFromStr {
    fn scan_from_str(&mut self, s: &str) -> Result<(), ScanError>;
}

impl ScanFromStr for String {
    fn scan_from_str(&mut self, s: &str) -> Result<(), ScanError> {
        self.clear();
        self.push_str(s);
        Ok(())
    }
}

macro_rules! scan_int {
    ($($t:ty),+ $(,)?) => {
        $(impl ScanFromStr for $t {
            fn scan_from_str(&mut self, s: &str) -> Result<(), ScanError> {
                *self = s.trim().parse::<$t>()?;
                Ok(())
            }
        })+
    };
}

scan_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl ScanFromStr for f32 {
    fn scan_from_str(&mut self, s: &str) -> Result<(), ScanError> {
        *self = s.trim().parse::<f32>().map_err(|_| ScanError::ParseFloat)?;
        Ok(())
    }
}

impl ScanFromStr for f64 {
    fn scan_from_str(&mut self, s: &str) -> Result<(), ScanError> {
        *self = s.trim().parse::<f64>().map_err(|_| ScanError::ParseFloat)?;
        Ok(())
    }
}

impl ScanFromStr for bool {
    fn scan_from_str(&mut self, s: &str) -> Result<(), ScanError> {
        match s.trim() {
            "true" | "TRUE" | "1" => {
                *self = true;
                Ok(())
            }
            "false" | "FALSE" | "0" => {
                *self = false;
                Ok(())
            }
            _ => Err(ScanError::ParseBool),
        }
    }
}

impl<T: ScanFromStr + Default> ScanFromStr for Option<T> {
    fn scan_from_str(&mut self, s: &str) -> Result<(), ScanError> {
        if s.eq_ignore_ascii_case("null") {
            *self = None;
            return Ok(());
        }
        let mut v = T::default();
        v.scan_from_str(s)?;
        *self = Some(v);
        Ok(())
    }
}

/// 表名字段（`()`）不承载数据。
impl ScanFromStr for () {
    fn scan_from_str(&mut self, _s: &str) -> Result<(), ScanError> {
        Err(ScanError::UnsupportedType)
    }
}

/// 按 `columns` 的顺序把 `row` 写入 `dest`。
///
/// 每一列先通过注册表解析回字段标识；解析不到的列（原生片段、模型外字段）跳过。
pub fn scan_row<M: Model>(
    info: &ModelInfo,
    columns: &[String],
    row: &[&str],
    dest: &mut M,
) -> Result<(), ScanError> {
    if row.len() < columns.len() {
        return Err(ScanError::NotEnoughCells {
            expected: columns.len(),
            got: row.len(),
        });
    }
    for (column, cell) in columns.iter().zip(row) {
        let Some(field) = info.field(column) else {
            tracing::trace!(column = %column, "column is not mapped; skipped");
            continue;
        };
        dest.scan_field(field.ident, cell)?;
    }
    Ok(())
}

/// 按空白把一行文本切成单元。
pub fn split_cells(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}
