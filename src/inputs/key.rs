use std::fmt::{Debug, Display, Formatter};

use crate::utils;

/// SNDS automated data access key
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccessKey(String);

impl std::str::FromStr for AccessKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        utils::validate_access_key(s).map(|_| Self(s.to_owned()))
    }
}

impl AccessKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// keys grant access to the report, never print them whole
impl Debug for AccessKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessKey({self})")
    }
}

impl Display for AccessKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let visible = self.0.get(..4).unwrap_or_default();
        write!(f, "{visible}****")
    }
}

#[test]
fn test_access_key_is_masked() -> anyhow::Result<()> {
    let key = "a1b2c3d4-0000".parse::<AccessKey>()?;
    assert_eq!(key.as_str(), "a1b2c3d4-0000");
    assert_eq!(key.to_string(), "a1b2****");
    assert_eq!(format!("{key:?}"), "AccessKey(a1b2****)");
    assert!("".parse::<AccessKey>().is_err());
    Ok(())
}
