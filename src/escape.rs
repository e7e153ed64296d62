//! 字面量转换：把 [`SqlValue`] 转成可直接拼进 SQL 的文本，并过滤敏感字符。
//!
//! 安全警告：字面量模式永远不如 `?` 占位符安全；这里的过滤只是尽量破坏常见的注入写法。

use crate::value::{SqlArray, SqlValue};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// 无法转换的值渲染成的哨兵标记。
pub const UNSUPPORTED: &str = "[!unsupported!]";

const DATETIME: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const DATETIME_MICROS: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]");

/// 用反引号包裹标识符。
pub fn quote(name: &str) -> String {
    format!("`{name}`")
}

/// 过滤 SQL 敏感字符。
///
/// - `"`、`'`、`` ` `` 出现奇数次时，只把第一个重复一次（不是完整转义）
/// - 所有 `\` 重复一次
/// - 所有 `--` 扩成 `---`，破坏行注释
pub fn filter_sql(v: &str) -> String {
    let mut out = v.to_string();
    for quote in ['"', '\'', '`'] {
        if out.matches(quote).count() % 2 != 0 {
            let doubled: String = [quote, quote].iter().collect();
            out = out.replacen(quote, &doubled, 1);
        }
    }
    out.replace('\\', "\\\\").replace("--", "---")
}

/// 标量转文本。不支持的种类返回 [`UNSUPPORTED`]。
pub fn scalar_to_text(v: &SqlValue) -> String {
    match v {
        SqlValue::String(s) => filter_sql(s),
        SqlValue::I64(n) => n.to_string(),
        SqlValue::U64(n) => n.to_string(),
        SqlValue::F32(n) => n.to_string(),
        SqlValue::F64(n) => n.to_string(),
        SqlValue::Bool(b) => b.to_string(),
        SqlValue::DateTime(dt) => datetime_to_text(dt),
        SqlValue::Valuer(valuer) => match valuer.value() {
            Ok(SqlValue::Valuer(_)) => unsupported(v),
            Ok(resolved) => scalar_to_text(&resolved),
            Err(err) => {
                tracing::warn!(error = %err, "valuer failed; rendering sentinel");
                UNSUPPORTED.to_string()
            }
        },
        SqlValue::Null | SqlValue::Bytes(_) | SqlValue::Array(_) => unsupported(v),
    }
}

/// 数组转文本序列，逐个元素套用标量规则。非数组返回空序列。
pub fn array_to_text(v: &SqlValue) -> Vec<String> {
    let SqlValue::Array(array) = v else {
        if let SqlValue::Valuer(valuer) = v
            && let Ok(resolved @ SqlValue::Array(_)) = valuer.value()
        {
            return array_to_text(&resolved);
        }
        tracing::warn!(kind = v.kind(), "IN value is not an array");
        return Vec::new();
    };

    match array {
        SqlArray::String(items) => items.iter().map(|s| filter_sql(s)).collect(),
        SqlArray::I64(items) => items.iter().map(ToString::to_string).collect(),
        SqlArray::U64(items) => items.iter().map(ToString::to_string).collect(),
        SqlArray::F32(items) => items.iter().map(ToString::to_string).collect(),
        SqlArray::F64(items) => items.iter().map(ToString::to_string).collect(),
        SqlArray::Bool(items) => items.iter().map(ToString::to_string).collect(),
    }
}

fn unsupported(v: &SqlValue) -> String {
    tracing::warn!(kind = v.kind(), "unsupported value kind; rendering sentinel");
    UNSUPPORTED.to_string()
}

fn datetime_to_text(dt: &time::OffsetDateTime) -> String {
    let formatted = if dt.nanosecond() == 0 {
        dt.format(DATETIME)
    } else {
        // 四舍五入到微秒；越过上限时直接截断
        dt.checked_add(time::Duration::nanoseconds(500))
            .unwrap_or(*dt)
            .format(DATETIME_MICROS)
    };
    match formatted {
        Ok(s) => filter_sql(&s),
        Err(err) => {
            tracing::warn!(error = %err, "datetime formatting failed; rendering sentinel");
            UNSUPPORTED.to_string()
        }
    }
}
