//! 语句渲染：把完成的 [`QuerySpec`] 与模型解析结果渲染成 SQL 文本与参数列表。
//!
//! - 字面量模式：值经 [`crate::escape`] 转换后直接拼进 SQL，参数列表为空
//! - 占位符模式：每个值输出一个 `?`，原值按出现顺序进入参数列表
//!
//! LIMIT / OFFSET 永远以字面量输出。`IN (?)` 只输出一个占位符，整个数组作为一个参数。

use crate::builder::Binding;
use crate::error::BuildError;
use crate::escape::{array_to_text, quote, scalar_to_text};
use crate::model::Model;
use crate::query::{Action, Operator, QuerySpec};
use crate::registry::{ModelField, ModelInfo};
use crate::string_builder::StringBuilder;
use crate::value::SqlValue;

/// 渲染结果。
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Rendered {
    pub(crate) sql: String,
    pub(crate) values: Vec<SqlValue>,
    /// SELECT 读取的列，按输出顺序
    pub(crate) columns: Vec<String>,
}

struct Renderer<'r, M: Model> {
    query: &'r QuerySpec,
    info: &'r ModelInfo,
    target: &'r Binding<'r, M>,
    table: &'r str,
    literal: bool,
    values: Vec<SqlValue>,
    columns: Vec<String>,
    out: StringBuilder,
}

pub(crate) fn render<M: Model>(
    query: &QuerySpec,
    info: &ModelInfo,
    target: &Binding<'_, M>,
    table: &str,
    literal: bool,
) -> Result<Rendered, BuildError> {
    let mut r = Renderer {
        query,
        info,
        target,
        table,
        literal,
        values: Vec::new(),
        columns: Vec::new(),
        out: StringBuilder::new(),
    };

    match query.action {
        Action::Insert => r.insert()?,
        Action::Update => {
            r.update()?;
            r.where_clause();
            r.order_by();
            r.limit();
        }
        Action::Select => {
            r.select()?;
            r.where_clause();
            r.order_by();
            r.limit();
            r.offset();
        }
        Action::Delete => {
            r.out.write_str("DELETE FROM ");
            r.out.write_quoted(r.table);
            r.where_clause();
            r.order_by();
            r.limit();
        }
    }

    Ok(Rendered {
        sql: r.out.into_string(),
        values: r.values,
        columns: r.columns,
    })
}

impl<'r, M: Model> Renderer<'r, M> {
    fn record(&self) -> Result<&'r M, BuildError> {
        match self.target {
            Binding::One(m) => Ok(*m),
            Binding::Many(_) => Err(BuildError::CollectionTarget(self.query.action)),
        }
    }

    /// 显式列对应的模型字段；列名必须已映射。
    fn explicit_fields(&self) -> Result<Vec<&'r ModelField>, BuildError> {
        let info: &'r ModelInfo = self.info;
        self.query
            .columns
            .iter()
            .map(|c| info.field(c).ok_or_else(|| BuildError::UnknownColumn(c.clone())))
            .collect()
    }

    /// 字面量模式返回转换后的文本；占位符模式记录参数并返回 `?`。
    fn bind(&mut self, v: SqlValue) -> String {
        if self.literal {
            scalar_to_text(&v)
        } else {
            self.values.push(v);
            "?".to_string()
        }
    }

    fn field_value(record: &M, field: &ModelField) -> SqlValue {
        record.value_of(field.ident).unwrap_or(SqlValue::Null)
    }

    fn insert(&mut self) -> Result<(), BuildError> {
        let (query, info) = (self.query, self.info);
        let record = self.record()?;
        let fields: Vec<&ModelField> = if query.columns.is_empty() {
            info.fields().iter().collect()
        } else {
            self.explicit_fields()?
        };

        let mut names = Vec::with_capacity(fields.len() + query.extra.len());
        let mut values = Vec::with_capacity(names.capacity());
        for field in fields {
            names.push(quote(field.column));
            let v = Self::field_value(record, field);
            values.push(self.bind(v));
        }
        for extra in &query.extra {
            match &extra.value {
                Some(v) => {
                    names.push(quote(&extra.name));
                    values.push(self.bind(v.clone()));
                }
                // 原生列没有对应的值，两种模式下都写 NULL，不产生参数
                None => {
                    names.push(extra.name.clone());
                    values.push("NULL".to_string());
                }
            }
        }

        self.out.write_str("INSERT INTO ");
        self.out.write_quoted(self.table);
        self.out.write_str(" (");
        self.out.write_joined(&names, ", ");
        self.out.write_str(") VALUES (");
        self.out.write_joined(&values, ", ");
        self.out.write_str(");");
        Ok(())
    }

    /// 不指定列时 SET 为空：UPDATE 不会默认写入全部字段。
    fn update(&mut self) -> Result<(), BuildError> {
        let query = self.query;
        let record = self.record()?;
        let mut assigns = Vec::with_capacity(query.columns.len() + query.extra.len());
        for field in self.explicit_fields()? {
            let v = Self::field_value(record, field);
            let rhs = self.bind(v);
            assigns.push(format!("{}={rhs}", quote(field.column)));
        }
        for extra in &query.extra {
            match &extra.value {
                Some(v) => {
                    let rhs = self.bind(v.clone());
                    assigns.push(format!("{}={rhs}", quote(&extra.name)));
                }
                None => assigns.push(extra.name.clone()),
            }
        }

        self.out.write_str("UPDATE ");
        self.out.write_quoted(self.table);
        self.out.write_str(" SET ");
        self.out.write_joined(&assigns, ", ");
        Ok(())
    }

    /// SELECT 的列表只输出列名，从不嵌入值（集合目标也一样）。
    fn select(&mut self) -> Result<(), BuildError> {
        let (query, info) = (self.query, self.info);
        let mut items = Vec::new();
        if query.columns.is_empty() && query.extra.is_empty() {
            for field in info.fields() {
                items.push(quote(field.column));
                self.columns.push(field.column.to_string());
            }
        } else {
            for field in self.explicit_fields()? {
                items.push(quote(field.column));
                self.columns.push(field.column.to_string());
            }
            for extra in &query.extra {
                match extra.value {
                    Some(_) => items.push(quote(&extra.name)),
                    None => items.push(extra.name.clone()),
                }
                self.columns.push(extra.name.clone());
            }
        }
        if items.is_empty() {
            items.push("*".to_string());
        }

        self.out.write_str("SELECT ");
        self.out.write_joined(&items, ", ");
        self.out.write_str(" FROM ");
        self.out.write_quoted(self.table);
        Ok(())
    }

    fn where_clause(&mut self) {
        let query = self.query;
        if query.predicates.is_empty() {
            return;
        }
        self.out.write_str(" WHERE ");

        for (i, p) in query.predicates.iter().enumerate() {
            if i > 0 {
                self.out.write_char(' ');
                self.out.write_str(p.conjunction.as_str());
                self.out.write_char(' ');
            }
            let value = p.value.clone().unwrap_or(SqlValue::Null);
            match &p.operator {
                Operator::In | Operator::NotIn => {
                    match &value {
                        SqlValue::Array(a) if a.is_empty() => {
                            tracing::warn!(field = %p.field, "IN list is empty")
                        }
                        // 字面量模式由 array_to_text 记录
                        v if !self.literal
                            && !v.is_array()
                            && !matches!(v, SqlValue::Valuer(_)) =>
                        {
                            tracing::warn!(field = %p.field, kind = v.kind(), "IN value is not an array")
                        }
                        _ => {}
                    }
                    let list = if self.literal {
                        array_to_text(&value).join(", ")
                    } else {
                        self.values.push(value);
                        "?".to_string()
                    };
                    self.out.write_char('(');
                    self.out.write_quoted(&p.field);
                    self.out.write_char(' ');
                    self.out.write_str(p.operator.as_str());
                    self.out.write_str(" (");
                    self.out.write_str(&list);
                    self.out.write_str("))");
                }
                Operator::Raw => self.out.write_str(&p.field),
                Operator::Compare(op) => {
                    let rhs = self.bind(value);
                    self.out.write_char('(');
                    self.out.write_quoted(&p.field);
                    self.out.write_str(op);
                    self.out.write_str(&rhs);
                    self.out.write_char(')');
                }
            }
        }
    }

    fn order_by(&mut self) {
        if self.query.orders.is_empty() {
            return;
        }
        let items: Vec<String> = self
            .query
            .orders
            .iter()
            .map(|o| format!("{} {}", quote(&o.field), o.direction.as_str()))
            .collect();
        self.out.write_str(" ORDER BY ");
        self.out.write_joined(&items, ", ");
    }

    fn limit(&mut self) {
        if self.query.limit > 0 {
            self.out.write_str(" LIMIT ");
            self.out.write_str(&self.query.limit.to_string());
        }
    }

    fn offset(&mut self) {
        if self.query.offset > 0 {
            self.out.write_str(" OFFSET ");
            self.out.write_str(&self.query.offset.to_string());
        }
    }
}
