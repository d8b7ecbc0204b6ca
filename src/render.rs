//! Text tables for the command line

use std::fmt;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::Table;

/// Placeholder for absent values
pub const NULL: &str = "-";

/// Build a table from a header row and string cells
pub fn table<R>(headers: &[&str], rows: impl IntoIterator<Item = R>) -> Table
where
    R: IntoIterator<Item = String>,
{
    let mut builder = Builder::default();
    builder.push_record(headers.iter().copied());
    for row in rows {
        builder.push_record(row);
    }
    let mut table = builder.build();
    table.with(Style::psql());
    table
}

/// Render an optional value, `-` when absent
pub fn cell<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| NULL.to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_header() {
        let rendered = table(
            &["EndNumber", "NominalVoltage_kV"],
            vec![
                vec!["1".to_string(), "110".to_string()],
                vec!["2".to_string(), cell::<f64>(None)],
            ],
        )
        .to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].contains("EndNumber") && lines[0].contains("NominalVoltage_kV"));
        assert!(lines.iter().any(|l| l.contains("110")));
        assert!(lines.last().unwrap().contains('-'));
        assert!(rendered.find("EndNumber").unwrap() < rendered.find("110").unwrap());
    }

    #[test]
    fn test_cell() {
        assert_eq!(cell(Some(400.0)), "400");
        assert_eq!(cell::<&str>(None), NULL);
    }

    #[test]
    fn test_header_only() {
        let rendered = table(&["Tag"], Vec::<Vec<String>>::new()).to_string();
        assert!(rendered.contains("Tag"));
    }
}
