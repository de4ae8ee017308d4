//! Tests for table name and alias parsing.

use sqldata_core::TableName;

#[test]
fn test_name_without_alias() {
    let parsed = TableName::parse("Customers");
    assert_eq!(parsed.name(), "Customers");
    assert_eq!(parsed.alias(), &None);
}

#[test]
fn test_name_with_alias_is_trimmed() {
    let parsed = TableName::parse("  dbo.Customers   c  ");
    assert_eq!(parsed.name(), "dbo.Customers");
    assert_eq!(parsed.alias().as_deref(), Some("c"));
}

#[test]
fn test_middle_words_are_ignored() {
    let (name, alias) = TableName::parse("Orders AS o").into_parts();
    assert_eq!(name, "Orders");
    assert_eq!(alias.as_deref(), Some("o"));
}

#[test]
fn test_display_round_trips_through_parse() {
    for input in ["Customers", "Customers c", "Sales.Orders ord"] {
        let parsed = TableName::parse(input);
        assert_eq!(TableName::parse(&parsed.to_string()), parsed);
        assert_eq!(parsed.to_string(), input);
    }
}

#[test]
fn test_empty_input_yields_empty_name() {
    let parsed = TableName::parse("   ");
    assert!(parsed.name().is_empty());
    assert_eq!(parsed.alias(), &None);
}
