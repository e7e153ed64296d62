//! 查询描述：一次会话中通过流式调用累积的语句状态。

use crate::error::BuildError;
use crate::value::SqlValue;
use std::fmt;
use std::str::FromStr;

/// 语句行为。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Insert,
    Update,
    Select,
    Delete,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Select => "SELECT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INSERT" => Ok(Self::Insert),
            "UPDATE" => Ok(Self::Update),
            "SELECT" => Ok(Self::Select),
            "DELETE" => Ok(Self::Delete),
            _ => Err(BuildError::UnknownAction(s.to_string())),
        }
    }
}

/// 条件之间的连接符。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    And,
    Or,
}

impl Conjunction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// 条件运算符。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operator {
    /// `=`、`<>`、`>=`、`LIKE` 等比较运算符，原样拼接。
    Compare(String),
    In,
    NotIn,
    /// 原生条件：字段位置保存的是整段 SQL。
    Raw,
}

impl Operator {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Compare(op) => op,
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Raw => "",
        }
    }
}

/// 一个 WHERE 条件。
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub conjunction: Conjunction,
    pub field: String,
    pub operator: Operator,
    pub value: Option<SqlValue>,
}

/// 排序方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for Direction {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("ASC") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("DESC") {
            Ok(Self::Desc)
        } else {
            Err(BuildError::InvalidSortDirection(s.to_string()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// 模型之外的字段，或不带值的原生 SQL 片段。
#[derive(Debug, Clone, PartialEq)]
pub struct ExtraColumn {
    pub name: String,
    pub value: Option<SqlValue>,
}

/// 一次会话的全部语句状态。
///
/// 只属于一个会话，不在线程之间共享。出现第一个错误后，除 `set_table` 以外的修改都不再生效。
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    pub action: Action,
    pub table: Option<String>,
    pub columns: Vec<String>,
    pub extra: Vec<ExtraColumn>,
    pub predicates: Vec<Predicate>,
    pub orders: Vec<OrderBy>,
    pub limit: u64,
    pub offset: u64,
    pub error: Option<BuildError>,
}

impl QuerySpec {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            table: None,
            columns: Vec::new(),
            extra: Vec::new(),
            predicates: Vec::new(),
            orders: Vec::new(),
            limit: 0,
            offset: 0,
            error: None,
        }
    }

    fn latched(&self) -> bool {
        self.error.is_some()
    }

    /// 覆盖本次会话的表名。不受已记录错误的影响。
    pub fn set_table(&mut self, name: impl Into<String>) {
        self.table = Some(name.into());
    }

    /// 追加显式列。DELETE 忽略。重复的列名不去重。
    pub fn add_columns(&mut self, names: Vec<String>) {
        if self.latched() || self.action == Action::Delete {
            return;
        }
        self.columns.extend(names);
    }

    /// 追加额外列；`value` 为 `None` 时 `name` 作为原生 SQL 片段。
    pub fn add_extra(&mut self, name: impl Into<String>, value: Option<SqlValue>) {
        if self.latched() {
            return;
        }
        self.extra.push(ExtraColumn {
            name: name.into(),
            value,
        });
    }

    /// 追加只对 INSERT/UPDATE 有意义的额外列，其他行为忽略。
    pub fn add_value(&mut self, name: impl Into<String>, value: Option<SqlValue>) {
        if !matches!(self.action, Action::Insert | Action::Update) {
            return;
        }
        self.add_extra(name, value);
    }

    pub fn add_predicate(
        &mut self,
        conjunction: Conjunction,
        field: impl Into<String>,
        operator: Operator,
        value: Option<SqlValue>,
    ) {
        if self.latched() {
            return;
        }
        self.predicates.push(Predicate {
            conjunction,
            field: field.into(),
            operator,
            value,
        });
    }

    /// 追加排序；方向不合法时记录错误并丢弃该排序。
    pub fn add_order(&mut self, field: impl Into<String>, direction: &str) {
        if self.latched() {
            return;
        }
        match direction.parse::<Direction>() {
            Ok(direction) => self.orders.push(OrderBy {
                field: field.into(),
                direction,
            }),
            Err(err) => self.error = Some(err),
        }
    }

    pub fn set_limit(&mut self, n: u64) {
        if self.latched() {
            return;
        }
        self.limit = n;
    }

    /// 只有 SELECT 会渲染 OFFSET。
    pub fn set_offset(&mut self, n: u64) {
        if self.latched() {
            return;
        }
        self.offset = n;
    }
}
