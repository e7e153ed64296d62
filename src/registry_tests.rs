#[cfg(test)]
mod tests {
    use crate::builder::{Builder, Options};
    use crate::registry::{ModelField, Registry};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[derive(Debug, Clone, Default)]
    struct Post {
        table_name: (),
        id: i64,
        title: String,
        headline: String,
        body: String,
        cache_key: String,
    }

    crate::sql_model! {
        impl Post {
            table_name as "tableName": () => { sql: "post" },
            id: i64 => { sql: "id", db: "post_id" },
            title: String => { sql: "title" },
            headline: String => { sql: "title" },
            body: String => { db: "content" },
            cache_key: String => {},
        }
    }

    #[derive(Debug, Clone, Default)]
    struct Empty {
        scratch: i32,
    }

    crate::sql_model! {
        impl Empty {
            scratch: i32 => {},
        }
    }

    #[test]
    fn fields_follow_declaration_order() {
        let info = Builder::default().model_info::<Post>();
        let columns: Vec<&str> = info.fields().iter().map(|f| f.column).collect();
        assert_eq!(columns, vec!["id", "title"]);
        assert_eq!(info.table_name(), "post");
    }

    #[test]
    fn duplicate_column_keeps_last_field() {
        let info = Builder::default().model_info::<Post>();
        assert_eq!(
            info.field("title"),
            Some(&ModelField {
                ident: "headline",
                kind: "String",
                column: "title",
            })
        );
        assert_eq!(info.len(), 2);
    }

    #[test]
    fn untagged_fields_and_marker_are_not_columns() {
        let info = Builder::default().model_info::<Post>();
        assert_eq!(info.field("content"), None);
        assert_eq!(info.field("cache_key"), None);
        assert_eq!(info.field("post"), None);
        assert!(info.fields().iter().all(|f| f.ident != "tableName"));
    }

    #[test]
    fn empty_shape_has_no_fields_or_table() {
        let info = Builder::default().model_info::<Empty>();
        assert!(info.is_empty());
        assert_eq!(info.table_name(), "");
        assert!(info.name().ends_with("Empty"));
    }

    #[test]
    fn custom_tag_name_reads_other_tags() {
        let b = Builder::new(Options::default().with_tag_name("db"));
        let info = b.model_info::<Post>();
        let columns: Vec<&str> = info.fields().iter().map(|f| f.column).collect();
        assert_eq!(columns, vec!["post_id", "content"]);
        // 表名字段只带 sql 标记
        assert_eq!(info.table_name(), "");
    }

    #[test]
    fn cache_returns_same_arc() {
        let registry = Registry::new(&Options::default());
        let a = registry.resolve::<Post>();
        let b = registry.resolve::<Post>();
        assert!(Arc::ptr_eq(&a, &b));
        registry.resolve::<Empty>();
        assert_eq!(registry.cached(), 2);
    }

    #[test]
    fn disabled_cache_resolves_every_time() {
        let registry = Registry::new(&Options::default().with_model_cache(false));
        let a = registry.resolve::<Post>();
        let b = registry.resolve::<Post>();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a, b);
        assert_eq!(registry.cached(), 0);
    }

    #[test]
    fn concurrent_resolution_shares_one_entry() {
        let registry = Arc::new(Registry::new(&Options::default()));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.resolve::<Post>())
            })
            .collect();
        let infos: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let first = registry.resolve::<Post>();
        assert!(infos.iter().all(|i| Arc::ptr_eq(i, &first)));
        assert_eq!(registry.cached(), 1);
    }
}
