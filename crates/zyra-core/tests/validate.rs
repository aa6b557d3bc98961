use zyra_core::schema::*;
use zyra_core::validate::RuleRegistry;

fn message(column: &ColumnDescriptor, value: impl Into<Value>) -> Option<String> {
    column
        .validate(&value.into(), &RuleRegistry::new())
        .err()
        .map(|violation| violation.message)
}

#[test]
fn required_values() {
    let name = ColumnDescriptor::string("name");
    assert_eq!(message(&name, Value::Null), Some("name is required".to_string()));
    assert_eq!(message(&name, ""), Some("name is required".to_string()));
    assert_eq!(message(&name, "Ada"), None);

    let nickname = ColumnDescriptor::string("nickname").nullable().min_length(3);
    assert_eq!(message(&nickname, Value::Null), None);
    assert_eq!(message(&nickname, ""), None);
}

#[test]
fn string_lengths() {
    let username = ColumnDescriptor::string("username").min_length(3).max_length(5);
    assert_eq!(
        message(&username, "ab"),
        Some("username must be at least 3 characters".to_string())
    );
    assert_eq!(
        message(&username, "abcdefg"),
        Some("username must be 5 characters or less".to_string())
    );
    assert_eq!(message(&username, "abcd"), None);

    let pin = ColumnDescriptor::string("pin").length(4);
    assert_eq!(
        message(&pin, "123"),
        Some("pin must be exactly 4 characters".to_string())
    );
}

#[test]
fn formats() {
    let email = ColumnDescriptor::string("email").email();
    assert_eq!(
        message(&email, "not an email"),
        Some("Please enter a valid email address".to_string())
    );
    assert_eq!(message(&email, "ada@example.com"), None);

    let website = ColumnDescriptor::string("website").url();
    assert_eq!(message(&website, "example"), Some("Please enter a valid URL".to_string()));
    assert_eq!(message(&website, "https://example.com/about"), None);

    let id = ColumnDescriptor::uuid("id");
    assert_eq!(message(&id, "nope"), Some("id must be a valid UUID".to_string()));
    assert_eq!(message(&id, "6f1c2a4e-8b0d-4c53-9d2e-1f0a6b7c8d9e"), None);

    let ip = ColumnDescriptor::string("ip").format(Format::Ipv4);
    assert_eq!(message(&ip, "10.0.0.300"), Some("ip must be a valid IPv4 address".to_string()));
    assert_eq!(message(&ip, "10.0.0.1"), None);
}

#[test]
fn integers() {
    let age = ColumnDescriptor::integer("age").int_min(1).int_max(130);
    assert_eq!(message(&age, 0), Some("age must be at least 1".to_string()));
    assert_eq!(message(&age, 200), Some("age must be 130 or less".to_string()));
    assert_eq!(message(&age, "abc"), Some("age must be a valid number".to_string()));
    assert_eq!(message(&age, "42"), None);

    let even = ColumnDescriptor::integer("seats").even().positive();
    assert_eq!(message(&even, 3), Some("seats must be even".to_string()));
    assert_eq!(message(&even, -2), Some("seats must be positive".to_string()));
}

#[test]
fn doubles() {
    let price = ColumnDescriptor::double("price").min(0.5).max(10.0);
    assert_eq!(message(&price, 0.1), Some("price must be at least 0.5".to_string()));
    assert_eq!(message(&price, 12.5), Some("price must be 10 or less".to_string()));
    assert_eq!(message(&price, 2.0), None);
}

#[test]
fn text_rules() {
    let code = ColumnDescriptor::string("code")
        .starts_with("ZX-")
        .uppercase()
        .pattern_with_message(r"^ZX-\d+$", "code must look like ZX-123");

    assert_eq!(
        message(&code, "AB-1"),
        Some("code must start with \"ZX-\"".to_string())
    );
    assert_eq!(message(&code, "ZX-a"), Some("code must be uppercase".to_string()));
    assert_eq!(
        message(&code, "ZX-A"),
        Some("code must look like ZX-123".to_string())
    );
    assert_eq!(message(&code, "ZX-123"), None);
}

#[test]
fn enum_membership() {
    let status = ColumnDescriptor::enumeration("status", EnumDescriptor::new("status", ["draft", "live"]));
    assert_eq!(
        message(&status, "archived"),
        Some("status must be one of: draft, live".to_string())
    );
    assert_eq!(message(&status, "live"), None);
}

#[test]
fn custom_rules() {
    let mut rules = RuleRegistry::new();
    rules.register("even_length", |value| {
        value.as_str().is_some_and(|text| text.len() % 2 == 0)
    });

    let handle = ColumnDescriptor::string("handle").custom("even_length", "handle length must be even");

    let err = handle.validate(&Value::from("abc"), &rules).unwrap_err();
    assert_eq!(err.column, "handle");
    assert_eq!(err.to_string(), "handle length must be even");
    assert!(handle.validate(&Value::from("abcd"), &rules).is_ok());

    // Unknown rules are skipped.
    assert!(handle.validate(&Value::from("abc"), &RuleRegistry::new()).is_ok());
}
