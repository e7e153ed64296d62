//! 宏集合：为会话提供可变参数风格的字段列表。
//! `column` 接受单个字符串、数组、切片或 `Vec`；`columns!` 允许直接写不定长参数。

#[doc(hidden)]
#[macro_export]
macro_rules! __collect_strings {
    () => {
        Vec::<String>::new()
    };
    ($($value:expr),+ $(,)?) => {{
        let mut values = Vec::<String>::new();
        $(
            $crate::macros::extend_into_strings($value, &mut values);
        )*
        values
    }};
}

pub trait IntoStrings {
    fn extend_into_strings(self, dst: &mut Vec<String>);
}

impl IntoStrings for String {
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.push(self);
    }
}

impl IntoStrings for &str {
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.push(self.to_string());
    }
}

impl<const N: usize, T> IntoStrings for [T; N]
where
    T: Into<String>,
{
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.extend(self.into_iter().map(Into::into));
    }
}

impl<T> IntoStrings for &[T]
where
    T: Into<String> + Clone,
{
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        for item in self {
            dst.push(item.clone().into());
        }
    }
}

impl<T> IntoStrings for &Vec<T>
where
    T: Into<String> + Clone,
{
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        self.as_slice().extend_into_strings(dst);
    }
}

impl<T> IntoStrings for Vec<T>
where
    T: Into<String>,
{
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.extend(self.into_iter().map(Into::into));
    }
}

#[doc(hidden)]
pub fn extend_into_strings<T>(value: T, dst: &mut Vec<String>)
where
    T: IntoStrings,
{
    value.extend_into_strings(dst);
}

#[doc(hidden)]
pub fn collect_into_strings<T>(value: T) -> Vec<String>
where
    T: IntoStrings,
{
    let mut dst = Vec::new();
    value.extend_into_strings(&mut dst);
    dst
}

/// 为 `Session::column` 提供不定长参数调用：`columns!(sess, "id", "username")`。
#[macro_export]
macro_rules! columns {
    ($session:expr $(, $col:expr)* $(,)?) => {
        $session.column($crate::__collect_strings!($($col),*))
    };
}
pub use crate::columns;

#[cfg(test)]
mod tests {
    use super::collect_into_strings;
    use pretty_assertions::assert_eq;

    #[test]
    fn collects_from_many_shapes() {
        assert_eq!(collect_into_strings("a"), vec!["a"]);
        assert_eq!(collect_into_strings(["a", "b"]), vec!["a", "b"]);
        let v = vec!["c".to_string()];
        assert_eq!(collect_into_strings(&v), vec!["c"]);
        assert_eq!(collect_into_strings(v.as_slice()), vec!["c"]);
        assert_eq!(collect_into_strings(v), vec!["c"]);
    }

    #[test]
    fn collect_macro_flattens_arguments() {
        let out = crate::__collect_strings!("a", ["b", "c"], String::from("d"));
        assert_eq!(out, vec!["a", "b", "c", "d"]);
    }
}
