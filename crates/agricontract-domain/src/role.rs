use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::UserId;

const DEMO_PHONE: &str = "+1234567890";
const DEMO_NAME: &str = "Demo User";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Farmer,
    Buyer,
}

impl Role {
    pub const ALL: [Self; 2] = [Self::Farmer, Self::Buyer];

    pub fn label(self) -> &'static str {
        match self {
            Self::Farmer => "Farmer",
            Self::Buyer => "Buyer",
        }
    }

    pub fn counterparty(self) -> Self {
        match self {
            Self::Farmer => Self::Buyer,
            Self::Buyer => Self::Farmer,
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            Self::Farmer => "List your crops and connect with verified buyers",
            Self::Buyer => "Source quality produce directly from farmers",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
}

impl User {
    /// Fabricates a user from login form input. Blank name and phone fall back
    /// to demo values.
    pub fn from_login<R: Rng + ?Sized>(
        rng: &mut R,
        role: Role,
        name: &str,
        email: &str,
        phone: &str,
    ) -> Self {
        Self {
            id: UserId::random(rng),
            name: non_blank_or(name, DEMO_NAME),
            email: email.trim().to_owned(),
            phone: non_blank_or(phone, DEMO_PHONE),
            role,
        }
    }

    pub fn quick_demo<R: Rng + ?Sized>(rng: &mut R, role: Role) -> Self {
        let (name, email) = match role {
            Role::Farmer => ("John Farmer", "john@farm.com"),
            Role::Buyer => ("Sarah Buyer", "sarah@company.com"),
        };
        Self {
            id: UserId::random(rng),
            name: name.to_owned(),
            email: email.to_owned(),
            phone: DEMO_PHONE.to_owned(),
            role,
        }
    }

    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}

fn non_blank_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_owned()
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn counterparty_flips_role() {
        assert_eq!(Role::Farmer.counterparty(), Role::Buyer);
        assert_eq!(Role::Buyer.counterparty(), Role::Farmer);
    }

    #[test]
    fn login_falls_back_to_demo_name_and_phone() {
        let mut rng = StdRng::seed_from_u64(1);
        let user = User::from_login(&mut rng, Role::Buyer, "  ", "a@b.com", "");
        assert_eq!(user.name, "Demo User");
        assert_eq!(user.phone, "+1234567890");
        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.role, Role::Buyer);
    }

    #[test]
    fn quick_demo_users_match_role() {
        let mut rng = StdRng::seed_from_u64(2);
        let farmer = User::quick_demo(&mut rng, Role::Farmer);
        let buyer = User::quick_demo(&mut rng, Role::Buyer);
        assert_eq!(farmer.name, "John Farmer");
        assert_eq!(farmer.email, "john@farm.com");
        assert_eq!(buyer.name, "Sarah Buyer");
        assert_eq!(buyer.email, "sarah@company.com");
        assert_ne!(farmer.id, buyer.id);
    }
}
