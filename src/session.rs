//! Session：一次语句构建的流式接口。
//!
//! 会话由 [`Builder`] 创建，确定行为并绑定记录；流式调用累积 [`QuerySpec`]，
//! 最后 [`Session::build`] 消费会话并返回只读的 [`Statement`]。
//! 会话不做任何同步，只应在创建它的那条调用链里使用。

use crate::builder::{Binding, Builder};
use crate::error::BuildError;
use crate::macros::{IntoStrings, collect_into_strings};
use crate::model::Model;
use crate::query::{Action, Conjunction, Operator, QuerySpec};
use crate::registry::ModelInfo;
use crate::render::render;
use crate::scan::{ScanError, scan_row};
use crate::value::SqlValue;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

pub struct Session<'a, M: Model> {
    builder: &'a Builder,
    target: Binding<'a, M>,
    query: QuerySpec,
}

impl<M: Model> fmt::Debug for Session<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 记录本身不要求 Debug；这里只输出语句状态。
        f.debug_struct("Session")
            .field("model", &std::any::type_name::<M>())
            .field("collection", &self.target.is_collection())
            .field("query", &self.query)
            .finish()
    }
}

impl<'a, M: Model> Session<'a, M> {
    pub(crate) fn new(builder: &'a Builder, action: Action, target: Binding<'a, M>) -> Self {
        Self {
            builder,
            target,
            query: QuerySpec::new(action),
        }
    }

    pub fn action(&self) -> Action {
        self.query.action
    }

    /// 当前累积的语句状态。
    pub fn query(&self) -> &QuerySpec {
        &self.query
    }

    /// 已记录的第一个错误。
    pub fn error(&self) -> Option<&BuildError> {
        self.query.error.as_ref()
    }

    /// 设置本次会话的表名，优先于模型里标记的表名。
    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.query.set_table(name);
        self
    }

    /// 指定参与的字段：INSERT 只插入、UPDATE 只更新、SELECT 只返回这些字段。DELETE 忽略。
    pub fn column(mut self, names: impl IntoStrings) -> Self {
        self.query.add_columns(collect_into_strings(names));
        self
    }

    /// 原生列：原样拼进 SQL，不加引号，也不产生参数。调用方自行保证安全。
    pub fn column_raw(mut self, fragment: impl Into<String>) -> Self {
        self.query.add_extra(fragment, None);
        self
    }

    /// 模型之外的字段及其值。
    pub fn column_raw_value(mut self, name: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.query.add_extra(name, Some(value.into()));
        self
    }

    /// 写入模型之外的字段及其值，只对 INSERT/UPDATE 生效。
    pub fn add_value(mut self, name: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.query.add_value(name, Some(value.into()));
        self
    }

    /// 写入一段原生赋值（如 `updated_at=NOW()`），只对 INSERT/UPDATE 生效。
    pub fn add_value_raw(mut self, fragment: impl Into<String>) -> Self {
        self.query.add_value(fragment, None);
        self
    }

    /// AND 条件，与 [`Session::and_where`] 相同。
    pub fn where_(self, field: &str, operator: &str, value: impl Into<SqlValue>) -> Self {
        self.and_where(field, operator, value)
    }

    pub fn and_where(self, field: &str, operator: &str, value: impl Into<SqlValue>) -> Self {
        self.predicate(Conjunction::And, field, Operator::Compare(operator.to_string()), value)
    }

    pub fn or_where(self, field: &str, operator: &str, value: impl Into<SqlValue>) -> Self {
        self.predicate(Conjunction::Or, field, Operator::Compare(operator.to_string()), value)
    }

    /// 原生条件，原样拼接，务必注意安全。
    pub fn where_raw(self, stmt: impl Into<String>) -> Self {
        self.and_where_raw(stmt)
    }

    pub fn and_where_raw(mut self, stmt: impl Into<String>) -> Self {
        self.query
            .add_predicate(Conjunction::And, stmt, Operator::Raw, None);
        self
    }

    pub fn or_where_raw(mut self, stmt: impl Into<String>) -> Self {
        self.query
            .add_predicate(Conjunction::Or, stmt, Operator::Raw, None);
        self
    }

    /// `IN` 条件，`values` 应是数组值（如 `vec![1, 2, 3]`）。
    pub fn where_in(self, field: &str, values: impl Into<SqlValue>) -> Self {
        self.and_where_in(field, values)
    }

    pub fn and_where_in(self, field: &str, values: impl Into<SqlValue>) -> Self {
        self.predicate(Conjunction::And, field, Operator::In, values)
    }

    pub fn or_where_in(self, field: &str, values: impl Into<SqlValue>) -> Self {
        self.predicate(Conjunction::Or, field, Operator::In, values)
    }

    pub fn where_not_in(self, field: &str, values: impl Into<SqlValue>) -> Self {
        self.and_where_not_in(field, values)
    }

    pub fn and_where_not_in(self, field: &str, values: impl Into<SqlValue>) -> Self {
        self.predicate(Conjunction::And, field, Operator::NotIn, values)
    }

    pub fn or_where_not_in(self, field: &str, values: impl Into<SqlValue>) -> Self {
        self.predicate(Conjunction::Or, field, Operator::NotIn, values)
    }

    fn predicate(
        mut self,
        conjunction: Conjunction,
        field: &str,
        operator: Operator,
        value: impl Into<SqlValue>,
    ) -> Self {
        self.query
            .add_predicate(conjunction, field, operator, Some(value.into()));
        self
    }

    /// 排序，`direction` 只能是 `ASC` 或 `DESC`（不区分大小写）。
    pub fn order_by(mut self, field: &str, direction: &str) -> Self {
        self.query.add_order(field, direction);
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.query.set_limit(n);
        self
    }

    /// 只对 SELECT 生效。
    pub fn offset(mut self, n: u64) -> Self {
        self.query.set_offset(n);
        self
    }

    /// 构建语句。
    ///
    /// `literal` 为 `true` 时把值直接拼进 SQL；为 `false` 时输出 `?` 占位符，
    /// 对应的值通过 [`Statement::values`] 获得。
    pub fn build(self, literal: bool) -> Result<Statement<M>, BuildError> {
        if let Some(err) = &self.query.error {
            return Err(err.clone());
        }

        let model = self.builder.model_info::<M>();
        let table = match self.query.table.as_deref() {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => model.table_name().to_string(),
        };
        if table.is_empty() {
            return Err(BuildError::NoTableName);
        }

        let rendered = render(&self.query, &model, &self.target, &table, literal)?;
        tracing::debug!(
            action = %self.query.action,
            literal,
            sql = %rendered.sql,
            values = rendered.values.len(),
            "statement built"
        );

        Ok(Statement {
            action: self.query.action,
            literal,
            table,
            sql: rendered.sql,
            values: rendered.values,
            columns: rendered.columns,
            model,
            _model: PhantomData,
        })
    }
}

/// 构建完成的只读语句。
pub struct Statement<M> {
    action: Action,
    literal: bool,
    table: String,
    sql: String,
    values: Vec<SqlValue>,
    columns: Vec<String>,
    model: Arc<ModelInfo>,
    _model: PhantomData<fn() -> M>,
}

impl<M> fmt::Debug for Statement<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Statement")
            .field("action", &self.action)
            .field("literal", &self.literal)
            .field("sql", &self.sql)
            .field("values", &self.values)
            .finish()
    }
}

impl<M: Model> Statement<M> {
    /// 最终的 SQL 语句。
    pub fn stmt(&self) -> &str {
        &self.sql
    }

    /// `?` 占位符对应的参数值；字面量模式下为空。
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn is_literal(&self) -> bool {
        self.literal
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// 实际使用的表名。
    pub fn table(&self) -> &str {
        &self.table
    }

    /// SELECT 读取的列（按输出顺序）；其他行为为空。
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 构建时使用的模型解析结果。
    pub fn model(&self) -> &Arc<ModelInfo> {
        &self.model
    }

    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.values)
    }

    /// 把一行结果写入单个记录。
    pub fn scan_one(&self, dest: &mut M, row: &[&str]) -> Result<(), ScanError> {
        if self.action != Action::Select {
            return Err(ScanError::NotSelect);
        }
        scan_row(&self.model, &self.columns, row, dest)
    }

    /// 把多行结果逐行追加到 `dest`，返回追加的行数。
    pub fn scan_all<'r, I, R>(&self, dest: &mut Vec<M>, rows: I) -> Result<usize, ScanError>
    where
        M: Default,
        I: IntoIterator<Item = R>,
        R: AsRef<[&'r str]>,
    {
        if self.action != Action::Select {
            return Err(ScanError::NotSelect);
        }
        let mut n = 0;
        for row in rows {
            let mut record = M::default();
            scan_row(&self.model, &self.columns, row.as_ref(), &mut record)?;
            dest.push(record);
            n += 1;
        }
        Ok(n)
    }
}
