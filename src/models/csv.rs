//! Splitting of the CRLF/comma delimited payloads served by SNDS.
//!
//! The reports never quote fields, so no escaping rules apply.

pub type Row = Vec<String>;

const ROW_SEPARATOR: &str = "\r\n";
const FIELD_SEPARATOR: char = ',';

/// Split a raw report body into rows of fields, dropping empty rows
pub fn parse(payload: &str) -> Vec<Row> {
    payload
        .split(ROW_SEPARATOR)
        .filter(|line| !line.is_empty())
        .map(|line| line.split(FIELD_SEPARATOR).map(str::to_owned).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_rows_and_fields() {
        let rows = parse("1.1.1.0,1.1.1.1,Yes,spam\r\n1.1.1.3,1.1.1.3,Yes,spam");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["1.1.1.0", "1.1.1.1", "Yes", "spam"]);
        assert_eq!(rows[1][0], "1.1.1.3");
    }

    #[test]
    fn drops_trailing_and_blank_rows() {
        let rows = parse("a,b\r\n\r\nc,d\r\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn keeps_empty_fields() {
        let rows = parse("1.1.1.0,,,");
        assert_eq!(rows, vec![vec!["1.1.1.0", "", "", ""]]);
    }

    #[test]
    fn empty_payload_yields_nothing() {
        assert!(parse("").is_empty());
        assert!(parse("\r\n").is_empty());
    }
}
