//! Builder：持有配置与模型缓存，为每条语句创建一个会话。

use crate::model::Model;
use crate::query::Action;
use crate::registry::{ModelInfo, Registry};
use crate::session::Session;
use std::sync::Arc;

/// 默认标记名。
pub const DEFAULT_TAG_NAME: &str = "sql";
/// 默认表名字段标识。
pub const DEFAULT_TABLE_NAME_FIELD: &str = "tableName";

/// 构建器配置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// 读取列名的标记名，默认 `sql`
    pub tag_name: String,
    /// 标记表名的字段标识，默认 `tableName`
    pub table_name_field: String,
    /// 是否缓存模型解析结果，默认开启
    pub cache_models: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tag_name: DEFAULT_TAG_NAME.to_string(),
            table_name_field: DEFAULT_TABLE_NAME_FIELD.to_string(),
            cache_models: true,
        }
    }
}

impl Options {
    pub fn with_tag_name(mut self, tag_name: impl Into<String>) -> Self {
        self.tag_name = tag_name.into();
        self
    }

    pub fn with_table_name_field(mut self, field: impl Into<String>) -> Self {
        self.table_name_field = field.into();
        self
    }

    pub fn with_model_cache(mut self, enabled: bool) -> Self {
        self.cache_models = enabled;
        self
    }

    /// 空字符串回落到默认值。
    fn normalized(mut self) -> Self {
        if self.tag_name.is_empty() {
            self.tag_name = DEFAULT_TAG_NAME.to_string();
        }
        if self.table_name_field.is_empty() {
            self.table_name_field = DEFAULT_TABLE_NAME_FIELD.to_string();
        }
        self
    }
}

/// 会话绑定的记录：单个实例，或者（仅对 SELECT 有意义的）实例集合。
#[derive(Debug)]
pub enum Binding<'a, M> {
    One(&'a M),
    Many(&'a [M]),
}

impl<M> Clone for Binding<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for Binding<'_, M> {}

impl<M> Binding<'_, M> {
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Many(_))
    }
}

impl<'a, M: Model> From<&'a M> for Binding<'a, M> {
    fn from(m: &'a M) -> Self {
        Self::One(m)
    }
}

impl<'a, M: Model> From<&'a [M]> for Binding<'a, M> {
    fn from(m: &'a [M]) -> Self {
        Self::Many(m)
    }
}

impl<'a, M: Model> From<&'a Vec<M>> for Binding<'a, M> {
    fn from(m: &'a Vec<M>) -> Self {
        Self::Many(m.as_slice())
    }
}

/// 语句构建器。
///
/// 模型缓存由实例持有，可以在线程间共享（`&Builder` 是 `Sync` 的）；
/// 它创建的 [`Session`] 只属于一条调用链。
#[derive(Debug)]
pub struct Builder {
    options: Options,
    registry: Registry,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Builder {
    pub fn new(options: Options) -> Self {
        let options = options.normalized();
        let registry = Registry::new(&options);
        Self { options, registry }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// 解析（或从缓存读取）模型 `M` 的字段映射。
    pub fn model_info<M: Model>(&self) -> Arc<ModelInfo> {
        self.registry.resolve::<M>()
    }

    /// 以指定行为开始一个会话。
    pub fn begin<'a, M: Model>(
        &'a self,
        action: Action,
        target: impl Into<Binding<'a, M>>,
    ) -> Session<'a, M> {
        Session::new(self, action, target.into())
    }

    pub fn insert<'a, M: Model>(&'a self, record: &'a M) -> Session<'a, M> {
        self.begin(Action::Insert, record)
    }

    pub fn update<'a, M: Model>(&'a self, record: &'a M) -> Session<'a, M> {
        self.begin(Action::Update, record)
    }

    /// SELECT 可以绑定单个实例，也可以绑定集合（`&[M]` / `&Vec<M>`）。
    pub fn select<'a, M: Model>(&'a self, target: impl Into<Binding<'a, M>>) -> Session<'a, M> {
        self.begin(Action::Select, target)
    }

    pub fn delete<'a, M: Model>(&'a self, record: &'a M) -> Session<'a, M> {
        self.begin(Action::Delete, record)
    }
}
