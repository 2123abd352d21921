use std::fmt::{self, Display, Formatter};

/// A participant, as far as the server can tell one apart: a self-reported
/// display name plus an opaque device token the browser generated and holds.
/// The token is a best-effort duplicate-vote heuristic, not authentication.
/// A missing token normalizes to the empty string so the (name, device) pair
/// always compares exactly in the store's composite key.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct VoterIdentity {
    pub name: String,
    pub device: String,
}

impl VoterIdentity {
    pub fn new(name: impl Into<String>, device: Option<String>) -> VoterIdentity {
        VoterIdentity {
            name: name.into(),
            device: device.unwrap_or_default(),
        }
    }
}

impl Display for VoterIdentity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.device.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.device)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_device_token_normalizes_to_empty() {
        let identity = VoterIdentity::new("Alice", None);
        assert_eq!(identity.device, "");
        assert_eq!(identity, VoterIdentity::new("Alice", Some(String::new())));
    }

    #[test]
    fn same_name_different_device_is_a_different_identity() {
        let a = VoterIdentity::new("Alice", Some(String::from("dev1")));
        let b = VoterIdentity::new("Alice", Some(String::from("dev2")));
        assert_ne!(a, b);
    }
}
