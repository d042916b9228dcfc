use time::macros::date;
use time::Date;

use crate::{Amount, DashboardStat, Role};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub title: String,
    pub date: Date,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub reviewer: &'static str,
    pub rating: u8,
    pub comment: &'static str,
    pub date: Date,
}

pub fn profile_stats(role: Role) -> Vec<DashboardStat> {
    let rows: [(&'static str, &'static str); 4] = match role {
        Role::Farmer => [
            ("Products Listed", "24"),
            ("Contracts Signed", "18"),
            ("Total Revenue", "$45,200"),
            ("Years Farming", "15"),
        ],
        Role::Buyer => [
            ("Active Contracts", "12"),
            ("Completed Deals", "28"),
            ("Total Spent", "$32,800"),
            ("Years Buying", "8"),
        ],
    };
    rows.into_iter()
        .map(|(label, value)| DashboardStat { label, value })
        .collect()
}

pub fn profile_activity(role: Role) -> Vec<ActivityEntry> {
    let rice = match role {
        Role::Farmer => "Listed Premium Rice",
        Role::Buyer => "Purchased Premium Rice",
    };
    vec![
        ActivityEntry {
            title: "Contract signed for Organic Tomatoes".to_owned(),
            date: date!(2024 - 01 - 15),
            amount: Amount::from_whole(2500),
        },
        ActivityEntry {
            title: rice.to_owned(),
            date: date!(2024 - 01 - 12),
            amount: Amount::from_whole(4200),
        },
        ActivityEntry {
            title: "Payment received from buyer".to_owned(),
            date: date!(2024 - 01 - 10),
            amount: Amount::from_whole(1800),
        },
    ]
}

pub fn profile_reviews(role: Role) -> Vec<Review> {
    let (first, second) = match role {
        Role::Farmer => ("Sarah Mitchell (Buyer)", "Mike Johnson (Buyer)"),
        Role::Buyer => ("John Smith (Farmer)", "Maria Garcia (Farmer)"),
    };
    vec![
        Review {
            reviewer: first,
            rating: 5,
            comment: "Excellent quality produce and timely delivery. Highly recommended!",
            date: date!(2024 - 01 - 10),
        },
        Review {
            reviewer: second,
            rating: 4,
            comment: "Great communication and professional service throughout the contract.",
            date: date!(2024 - 01 - 05),
        },
    ]
}

impl Role {
    /// Bio shown on a fresh profile.
    pub fn default_bio(self) -> &'static str {
        match self {
            Self::Farmer => "Experienced organic farmer with 15+ years in sustainable agriculture.",
            Self::Buyer => {
                "Agricultural procurement specialist focused on quality produce sourcing."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_wording_follows_role() {
        assert_eq!(profile_activity(Role::Farmer)[1].title, "Listed Premium Rice");
        assert_eq!(profile_activity(Role::Buyer)[1].title, "Purchased Premium Rice");
    }

    #[test]
    fn reviews_come_from_the_other_side() {
        assert!(profile_reviews(Role::Farmer)
            .iter()
            .all(|review| review.reviewer.ends_with("(Buyer)")));
        assert!(profile_reviews(Role::Buyer)
            .iter()
            .all(|review| review.reviewer.ends_with("(Farmer)")));
    }
}
