//! Model：记录结构的字段描述与取值逻辑。
//!
//! Rust 没有运行时反射；这里通过 `macro_rules!` 为业务 struct 生成字段元数据（字段标识、
//! 声明类型、标记）以及按字段标识取值/写值的代码。字段注册表（[`crate::registry`]）
//! 只读取这些元数据，从不接触具体实例。

use crate::scan::ScanError;
use crate::value::SqlValue;

/// 一个字段的静态描述。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    /// 内存中的字段标识。默认等于 Rust 字段名，可以在宏里用 `as "..."` 覆盖。
    pub ident: &'static str,
    /// 声明的类型（按源码书写）。
    pub kind: &'static str,
    /// 标记：`(标记名, 值)`，例如 `("sql", "username")`。
    pub tags: &'static [(&'static str, &'static str)],
}

impl FieldMeta {
    /// 读取指定标记的值；没有该标记时返回空字符串。
    pub fn tag(&self, name: &str) -> &'static str {
        self.tags
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| *v)
            .unwrap_or("")
    }
}

/// 由 [`sql_model!`](crate::sql_model) 为业务 struct 实现的 trait。
pub trait Model: 'static {
    /// 按声明顺序列出的全部字段（包括没有标记的字段）。
    const FIELDS: &'static [FieldMeta];

    /// 按字段标识取值；标识不存在时返回 `None`。
    fn value_of(&self, ident: &str) -> Option<SqlValue>;

    /// 把一个文本单元写入字段（结果读取适配器使用）。
    fn scan_field(&mut self, ident: &str, raw: &str) -> Result<(), ScanError>;
}

/// 声明一个可用于 [`crate::Builder`] 的模型。
///
/// 每个字段写成 `字段名 [as "字段标识"]: 类型 => { 标记名: "值", ... }`。
/// 没有目标标记的字段不会参与生成 SQL；标识等于表名字段名（默认 `tableName`）的字段只提供表名。
///
/// ```ignore
/// #[derive(Debug, Clone, Default)]
/// struct User { table_name: (), id: i64, username: String, password: String }
///
/// halo_space::sql_model! {
///     impl User {
///         table_name as "tableName": () => { sql: "user" },
///         id: i64 => { sql: "id" },
///         username: String => { sql: "username" },
///         password: String => { sql: "password" },
///     }
/// }
/// ```
#[macro_export]
macro_rules! sql_model {
    (
        impl $model:ty {
            $(
                $field:ident $(as $ident:literal)? : $fty:ty => { $($tag:ident : $val:literal),* $(,)? }
            ),* $(,)?
        }
    ) => {
        impl $crate::model::Model for $model {
            const FIELDS: &'static [$crate::model::FieldMeta] = &[
                $(
                    $crate::model::FieldMeta {
                        ident: $crate::__model_ident!(stringify!($field) $(, $ident)?),
                        kind: stringify!($fty),
                        tags: &[ $( (stringify!($tag), $val) ),* ],
                    }
                ),*
            ];

            fn value_of(&self, ident: &str) -> Option<$crate::value::SqlValue> {
                $(
                    if ident == $crate::__model_ident!(stringify!($field) $(, $ident)?) {
                        return Some($crate::value::SqlValue::from(self.$field.clone()));
                    }
                )*
                None
            }

            fn scan_field(&mut self, ident: &str, raw: &str) -> Result<(), $crate::scan::ScanError> {
                $(
                    if ident == $crate::__model_ident!(stringify!($field) $(, $ident)?) {
                        return $crate::scan::ScanFromStr::scan_from_str(&mut self.$field, raw);
                    }
                )*
                Err($crate::scan::ScanError::UnknownField(ident.to_string()))
            }
        }
    };
}
pub use crate::sql_model;

/// 宏内部 helper：支持 `as "..."` 的可选字段标识。
#[doc(hidden)]
#[macro_export]
macro_rules! __model_ident {
    ($default:expr) => {
        $default
    };
    ($default:expr, $custom:expr) => {
        $custom
    };
}

#[cfg(test)]
mod tests {
    use super::{FieldMeta, Model};
    use crate::scan::ScanError;
    use crate::value::SqlValue;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Default)]
    struct Article {
        table_name: (),
        id: u32,
        title: String,
        draft: Option<bool>,
        scratch: String,
    }

    crate::sql_model! {
        impl Article {
            table_name as "tableName": () => { sql: "article" },
            id: u32 => { sql: "id", json: "articleId" },
            title: String => { sql: "title" },
            draft: Option<bool> => { sql: "is_draft" },
            scratch: String => {},
        }
    }

    #[test]
    fn fields_keep_declaration_order_and_tags() {
        let idents: Vec<&str> = Article::FIELDS.iter().map(|f| f.ident).collect();
        assert_eq!(idents, vec!["tableName", "id", "title", "draft", "scratch"]);
        assert_eq!(
            Article::FIELDS[1],
            FieldMeta {
                ident: "id",
                kind: "u32",
                tags: &[("sql", "id"), ("json", "articleId")],
            }
        );
        assert_eq!(Article::FIELDS[1].tag("json"), "articleId");
        assert_eq!(Article::FIELDS[2].kind, "String");
        assert_eq!(Article::FIELDS[4].tag("sql"), "");
    }

    #[test]
    fn value_of_reads_by_ident() {
        let a = Article {
            id: 9,
            title: "hello".to_string(),
            ..Article::default()
        };
        assert_eq!(a.value_of("id"), Some(SqlValue::U64(9)));
        assert_eq!(a.value_of("title"), Some("hello".into()));
        assert_eq!(a.value_of("draft"), Some(SqlValue::Null));
        assert_eq!(a.value_of("tableName"), Some(SqlValue::Null));
        assert_eq!(a.value_of("table_name"), None);
    }

    #[test]
    fn scan_field_writes_by_ident() {
        let mut a = Article::default();
        a.scan_field("id", "42").unwrap();
        a.scan_field("title", "x").unwrap();
        assert_eq!(a.id, 42);
        assert_eq!(a.title, "x");
        assert_eq!(
            a.scan_field("nope", "1"),
            Err(ScanError::UnknownField("nope".to_string()))
        );
    }
}
