//! SQL 文本拼接工具。

#[derive(Debug, Default, Clone)]
pub(crate) struct StringBuilder {
    buf: String,
}

impl StringBuilder {
    pub(crate) fn new() -> Self {
        Self { buf: String::new() }
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    pub(crate) fn write_char(&mut self, c: char) {
        self.buf.push(c);
    }

    /// 写入用反引号包裹的标识符。
    pub(crate) fn write_quoted(&mut self, ident: &str) {
        self.buf.push('`');
        self.buf.push_str(ident);
        self.buf.push('`');
    }

    /// 用 `sep` 连接写入 `items`，不跳过空串（空串在这里是有意义的片段）。
    pub(crate) fn write_joined(&mut self, items: &[String], sep: &str) {
        for (i, s) in items.iter().enumerate() {
            if i > 0 {
                self.buf.push_str(sep);
            }
            self.buf.push_str(s);
        }
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}
