//! 构建错误。

/// 构建语句时可能返回的错误。
///
/// 流式调用中出现的第一个错误会被会话记住，后续调用与最终的 `build` 都直接返回它。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("no table name defined")]
    NoTableName,
    #[error("sort direction must be ASC or DESC, got `{0}`")]
    InvalidSortDirection(String),
    #[error("unknown action `{0}`")]
    UnknownAction(String),
    #[error("column `{0}` is not mapped by the model")]
    UnknownColumn(String),
    #[error("{0} needs a single record, not a collection")]
    CollectionTarget(crate::query::Action),
}
