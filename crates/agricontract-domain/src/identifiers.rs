use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

const RANDOM_ID_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(UserId);
string_id!(ProductId);
string_id!(ContractId);
string_id!(MessageId);
string_id!(TransactionId);

impl UserId {
    /// Client-fabricated identifier: nine lowercase base-36 characters.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let value = (0..RANDOM_ID_LEN)
            .map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())]))
            .collect::<String>();
        Self(value)
    }
}

impl ContractId {
    pub fn issued_at(at: OffsetDateTime) -> Self {
        Self(format!("CON-{}", unix_millis(at)))
    }
}

impl TransactionId {
    pub fn issued_at(at: OffsetDateTime) -> Self {
        Self(format!("TXN-{}", unix_millis(at)))
    }
}

impl ProductId {
    pub fn issued_at(at: OffsetDateTime) -> Self {
        Self(unix_millis(at).to_string())
    }
}

fn unix_millis(at: OffsetDateTime) -> i128 {
    at.unix_timestamp_nanos() / 1_000_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use time::macros::datetime;

    #[test]
    fn random_user_ids_are_nine_base36_chars() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            let id = UserId::random(&mut rng);
            assert_eq!(id.as_str().len(), 9);
            assert!(id
                .as_str()
                .chars()
                .all(|ch| ch.is_ascii_digit() || ch.is_ascii_lowercase()));
        }
    }

    #[test]
    fn issued_ids_embed_unix_millis() {
        let at = datetime!(2024-02-01 10:00:00.250 UTC);
        assert_eq!(ContractId::issued_at(at).as_str(), "CON-1706781600250");
        assert_eq!(TransactionId::issued_at(at).as_str(), "TXN-1706781600250");
        assert_eq!(ProductId::issued_at(at).as_str(), "1706781600250");
    }
}
