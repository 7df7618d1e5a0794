pub fn validate_access_key(s: &str) -> anyhow::Result<()> {
    if s.is_empty() {
        return Err(anyhow::anyhow!("access key cannot be empty"));
    } else if s.len() > 128 {
        return Err(anyhow::anyhow!(
            "access key cannot be longer than 128 characters"
        ));
    }
    if s.chars().any(|c| !c.is_ascii_alphanumeric() && c != '-') {
        return Err(anyhow::anyhow!(
            "access key can only contain alphanumeric characters and hyphens"
        ));
    }
    Ok(())
}

/// Drop the root label dot that resolvers append to absolute names
pub fn normalize_hostname(name: &str) -> String {
    name.strip_suffix('.').unwrap_or(name).to_owned()
}

#[test]
fn test_validate_access_key() {
    assert!(validate_access_key("a1b2c3d4-0000-4f00-9e00-123456789abc").is_ok());
    assert!(validate_access_key("").is_err());
    assert!(validate_access_key("key with spaces").is_err());
    assert!(validate_access_key("key&date=010120").is_err());
    assert!(validate_access_key(&"k".repeat(129)).is_err());
}
#[test]
fn test_normalize_hostname() {
    assert_eq!(normalize_hostname("one.one.one.one."), "one.one.one.one");
    assert_eq!(normalize_hostname("mail.example.com"), "mail.example.com");
    assert_eq!(normalize_hostname("."), "");
}
