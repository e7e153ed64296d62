#[cfg(test)]
mod tests {
    use crate::builder::Builder;
    use crate::scan::{ScanError, scan_row, split_cells};
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Account {
        table_name: (),
        id: u64,
        email: String,
        balance: f64,
        banned: Option<bool>,
    }

    crate::sql_model! {
        impl Account {
            table_name as "tableName": () => { sql: "account" },
            id: u64 => { sql: "id" },
            email: String => { sql: "email_address" },
            balance: f64 => { sql: "balance" },
            banned: Option<bool> => { sql: "banned" },
        }
    }

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn scan_row_resolves_columns_to_fields() {
        let info = Builder::default().model_info::<Account>();
        let mut dest = Account::default();
        scan_row(
            &info,
            &columns(&["email_address", "id", "balance", "banned"]),
            &["a@b.c", "9", "10.5", "null"],
            &mut dest,
        )
        .unwrap();
        assert_eq!(
            dest,
            Account {
                id: 9,
                email: "a@b.c".to_string(),
                balance: 10.5,
                banned: None,
                ..Account::default()
            }
        );
    }

    #[test]
    fn scan_row_skips_unmapped_columns() {
        let info = Builder::default().model_info::<Account>();
        let mut dest = Account::default();
        scan_row(
            &info,
            &columns(&["COUNT(*)", "banned"]),
            &["3", "true"],
            &mut dest,
        )
        .unwrap();
        assert_eq!(dest.banned, Some(true));
        assert_eq!(dest.id, 0);
    }

    #[test]
    fn scan_row_reports_short_rows() {
        let info = Builder::default().model_info::<Account>();
        let mut dest = Account::default();
        let err = scan_row(&info, &columns(&["id", "email_address"]), &["1"], &mut dest)
            .unwrap_err();
        assert_eq!(err, ScanError::NotEnoughCells { expected: 2, got: 1 });
    }

    #[test]
    fn scan_row_propagates_parse_errors() {
        let info = Builder::default().model_info::<Account>();
        let mut dest = Account::default();
        let err = scan_row(&info, &columns(&["balance"]), &["lots"], &mut dest).unwrap_err();
        assert_eq!(err, ScanError::ParseFloat);
    }

    #[test]
    fn scan_text_line_from_select() {
        let b = Builder::default();
        let probe = Account::default();
        let stmt = b
            .select(&probe)
            .column(["id", "email_address"])
            .build(false)
            .unwrap();
        let mut dest = Account::default();
        stmt.scan_one(&mut dest, &split_cells("17 x@y.z")).unwrap();
        assert_eq!(dest.id, 17);
        assert_eq!(dest.email, "x@y.z");
    }
}
