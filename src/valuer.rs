//! SqlValuer：自定义字段类型在构建时才计算出实际的 [`SqlValue`]。
//!
//! 模型字段可以是任意业务类型，只要它能在构建语句时给出一个 `SqlValue`。
//! 字面量模式下解析失败会渲染为哨兵标记，而不是让整个构建失败。

use crate::value::SqlValue;

/// Valuer 错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("sql valuer error: {0}")]
pub struct ValuerError(pub String);

/// 可在构建阶段动态计算实际值的 trait。
pub trait SqlValuer: dyn_clone::DynClone + std::fmt::Debug {
    fn value(&self) -> Result<SqlValue, ValuerError>;
}

dyn_clone::clone_trait_object!(SqlValuer);

/// 把实现了 [`SqlValuer`] 的值装箱成 [`SqlValue::Valuer`]。
pub fn valuer(v: impl SqlValuer + 'static) -> SqlValue {
    SqlValue::Valuer(Box::new(v))
}
