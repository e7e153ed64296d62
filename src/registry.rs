//! 字段注册表：按模型类型解析一次字段映射与表名，并按类型缓存。

use crate::builder::Options;
use crate::model::Model;
use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// 模型中参与生成 SQL 的一个字段。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelField {
    /// 内存中的字段标识
    pub ident: &'static str,
    /// 声明的类型
    pub kind: &'static str,
    /// SQL 列名
    pub column: &'static str,
}

/// 一个模型类型的解析结果。创建后不再修改，由所有会话只读共享。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    name: &'static str,
    table_name: &'static str,
    fields: Vec<ModelField>,
    index: HashMap<&'static str, usize>,
}

impl ModelInfo {
    /// 模型类型名（缓存键的可读形式）。
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 标记在表名字段上的表名；没有时为空字符串。
    pub fn table_name(&self) -> &'static str {
        self.table_name
    }

    /// 按声明顺序排列的字段。
    pub fn fields(&self) -> &[ModelField] {
        &self.fields
    }

    /// 按列名查找字段。
    pub fn field(&self, column: &str) -> Option<&ModelField> {
        self.index.get(column).map(|&i| &self.fields[i])
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn introspect<M: Model>(tag_name: &str, table_name_field: &str) -> Self {
        let mut info = Self {
            name: type_name::<M>(),
            table_name: "",
            fields: Vec::new(),
            index: HashMap::new(),
        };

        for meta in M::FIELDS {
            let column = meta.tag(tag_name);
            if column.is_empty() {
                continue;
            }
            if meta.ident == table_name_field {
                info.table_name = column;
                continue;
            }
            let field = ModelField {
                ident: meta.ident,
                kind: meta.kind,
                column,
            };
            // 列名重复时后者覆盖前者，位置保持不变
            match info.index.get(column) {
                Some(&i) => info.fields[i] = field,
                None => {
                    info.index.insert(column, info.fields.len());
                    info.fields.push(field);
                }
            }
        }

        info
    }
}

/// 模型缓存。由 [`crate::Builder`] 持有，不是全局状态。
#[derive(Debug)]
pub struct Registry {
    tag_name: String,
    table_name_field: String,
    cache: Option<RwLock<HashMap<TypeId, Arc<ModelInfo>>>>,
}

impl Registry {
    pub fn new(options: &Options) -> Self {
        Self {
            tag_name: options.tag_name.clone(),
            table_name_field: options.table_name_field.clone(),
            cache: options
                .cache_models
                .then(|| RwLock::new(HashMap::new())),
        }
    }

    /// 解析模型 `M`。
    ///
    /// 开启缓存时，同一类型之后的每次调用都返回同一个 `Arc`；
    /// 关闭缓存时每次都重新解析。
    pub fn resolve<M: Model>(&self) -> Arc<ModelInfo> {
        let Some(cache) = &self.cache else {
            return Arc::new(self.introspect::<M>());
        };

        let key = TypeId::of::<M>();
        {
            let cache = cache.read().unwrap_or_else(|e| e.into_inner());
            if let Some(info) = cache.get(&key) {
                tracing::trace!(model = info.name(), "model cache hit");
                return info.clone();
            }
        }

        // 并发首次解析同一类型时可能算两次；插入只保留第一份
        let info = Arc::new(self.introspect::<M>());
        let mut cache = cache.write().unwrap_or_else(|e| e.into_inner());
        cache.entry(key).or_insert(info).clone()
    }

    /// 已缓存的模型数量；关闭缓存时为 0。
    pub fn cached(&self) -> usize {
        self.cache
            .as_ref()
            .map(|c| c.read().unwrap_or_else(|e| e.into_inner()).len())
            .unwrap_or(0)
    }

    fn introspect<M: Model>(&self) -> ModelInfo {
        let info = ModelInfo::introspect::<M>(&self.tag_name, &self.table_name_field);
        tracing::debug!(
            model = info.name(),
            table = info.table_name(),
            fields = info.len(),
            "model introspected"
        );
        info
    }
}
