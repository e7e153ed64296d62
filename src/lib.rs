//! halo-model-sql：基于记录结构的 MySQL 语句构建器。
//!
//! 用 [`sql_model!`] 声明记录的字段与列名映射，再从 [`Builder`] 开启会话，
//! 流式追加列、条件、排序与分页，最后得到 SQL 文本与参数列表：
//!
//! ```ignore
//! let builder = Builder::default();
//! let stmt = builder
//!     .update(&user)
//!     .column("username")
//!     .where_("id", "=", 1)
//!     .build(false)?;
//! assert_eq!(stmt.stmt(), "UPDATE `user` SET `username`=? WHERE (`id`=?)");
//! ```

pub mod builder;
#[cfg(test)]
mod builder_tests;
pub mod error;
pub mod escape;
pub mod macros;
pub mod model;
pub mod query;
pub mod registry;
#[cfg(test)]
mod registry_tests;
mod render;
pub mod scan;
#[cfg(test)]
mod scan_tests;
pub mod session;
mod string_builder;
pub mod value;
pub mod valuer;

pub use crate::builder::{
    Binding, Builder, DEFAULT_TABLE_NAME_FIELD, DEFAULT_TAG_NAME, Options,
};
pub use crate::error::BuildError;
pub use crate::escape::{UNSUPPORTED, array_to_text, filter_sql, scalar_to_text};
pub use crate::macros::IntoStrings;
pub use crate::model::{FieldMeta, Model};
pub use crate::query::{Action, Conjunction, Direction, Operator, QuerySpec};
pub use crate::registry::{ModelField, ModelInfo, Registry};
pub use crate::scan::{ScanError, ScanFromStr, split_cells};
pub use crate::session::{Session, Statement};
pub use crate::value::{SqlArray, SqlValue};
pub use crate::valuer::{SqlValuer, ValuerError, valuer};

/// 便捷命名空间：允许 `use halo_space::sqlbuilder::{...}` 形式导入。
pub mod sqlbuilder {
    pub use crate::*;
}
