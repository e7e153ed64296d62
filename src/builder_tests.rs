#[cfg(test)]
mod tests {
    use crate::builder::{Binding, Builder, DEFAULT_TABLE_NAME_FIELD, DEFAULT_TAG_NAME, Options};
    use crate::query::Action;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[derive(Debug, Clone, Default)]
    struct Tag {
        table: (),
        id: i64,
        name: String,
    }

    crate::sql_model! {
        impl Tag {
            table as "__table": () => { col: "tag", sql: "ignored" },
            id: i64 => { col: "tag_id", sql: "id" },
            name: String => { col: "tag_name" },
        }
    }

    #[test]
    fn options_defaults() {
        let o = Options::default();
        assert_eq!(o.tag_name, DEFAULT_TAG_NAME);
        assert_eq!(o.table_name_field, DEFAULT_TABLE_NAME_FIELD);
        assert!(o.cache_models);
    }

    #[test]
    fn empty_options_fall_back_to_defaults() {
        let b = Builder::new(
            Options::default()
                .with_tag_name("")
                .with_table_name_field(""),
        );
        assert_eq!(b.options(), &Options::default());
    }

    #[test]
    fn custom_tag_and_table_marker() {
        let b = Builder::new(
            Options::default()
                .with_tag_name("col")
                .with_table_name_field("__table"),
        );
        let tag = Tag {
            id: 3,
            name: "rust".to_string(),
            ..Tag::default()
        };
        let stmt = b.insert(&tag).build(true).unwrap();
        assert_eq!(
            stmt.stmt(),
            "INSERT INTO `tag` (`tag_id`, `tag_name`) VALUES (3, rust);"
        );
    }

    #[test]
    fn default_options_ignore_other_tags() {
        let b = Builder::default();
        let tag = Tag::default();
        // 默认表名字段是 tableName，这里的 `__table` 只是普通字段
        let stmt = b.select(&tag).table("tag").build(false).unwrap();
        assert_eq!(stmt.stmt(), "SELECT `ignored`, `id` FROM `tag`");
    }

    #[test]
    fn builder_caches_per_instance() {
        let a = Builder::default();
        let b = Builder::default();
        assert!(Arc::ptr_eq(&a.model_info::<Tag>(), &a.model_info::<Tag>()));
        assert!(!Arc::ptr_eq(&a.model_info::<Tag>(), &b.model_info::<Tag>()));
        assert_eq!(a.registry().cached(), 1);
    }

    #[test]
    fn statement_reuses_cached_model() {
        let b = Builder::default();
        let tag = Tag::default();
        let stmt = b.delete(&tag).table("tag").build(false).unwrap();
        assert!(Arc::ptr_eq(stmt.model(), &b.model_info::<Tag>()));
    }

    #[test]
    fn begin_matches_shortcuts() {
        let b = Builder::default();
        let tag = Tag::default();
        assert_eq!(b.begin(Action::Update, &tag).action(), Action::Update);
        assert_eq!(b.select(&tag).action(), Action::Select);
        let action: Action = "DELETE".parse().unwrap();
        assert_eq!(b.begin(action, &tag).action(), Action::Delete);
    }

    #[test]
    fn binding_kinds() {
        let tags = vec![Tag::default(), Tag::default()];
        let one: Binding<'_, Tag> = (&tags[0]).into();
        let many: Binding<'_, Tag> = tags.as_slice().into();
        assert!(!one.is_collection());
        assert!(many.is_collection());
    }
}
