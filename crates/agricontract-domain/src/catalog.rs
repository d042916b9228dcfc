use time::macros::{date, datetime};
use time::Date;

use crate::{
    Amount, Contract, ContractId, ContractStatus, ContractTerms, NegotiationThread, Offer,
    Product, ProductCategory, ProductId, QuantityUnit, Role, UserId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStat {
    pub label: &'static str,
    pub value: &'static str,
}

pub fn dashboard_stats(role: Role) -> Vec<DashboardStat> {
    let (first, second) = match role {
        Role::Farmer => (
            DashboardStat {
                label: "Products Listed",
                value: "12",
            },
            DashboardStat {
                label: "Total Revenue",
                value: "₹2,45,000",
            },
        ),
        Role::Buyer => (
            DashboardStat {
                label: "Active Contracts",
                value: "8",
            },
            DashboardStat {
                label: "Total Spent",
                value: "₹2,45,000",
            },
        ),
    };
    vec![
        first,
        second,
        DashboardStat {
            label: "Pending Negotiations",
            value: "5",
        },
        DashboardStat {
            label: "Completed Deals",
            value: "23",
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    category: ProductCategory,
    quantity: u32,
    price: u64,
    harvest_date: Date,
    farmer: (&str, &str),
    description: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        category,
        quantity,
        unit: QuantityUnit::Kg,
        price_per_unit: Amount::from_whole(price),
        harvest_date,
        farmer_id: UserId::new(farmer.0),
        farmer_name: farmer.1.to_owned(),
        description: description.to_owned(),
        location: None,
    }
}

pub fn mock_products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Organic Tomatoes",
            ProductCategory::Vegetables,
            500,
            45,
            date!(2024 - 01 - 15),
            ("farmer1", "John Smith"),
            "Fresh organic tomatoes grown without pesticides",
        ),
        product(
            "2",
            "Premium Rice",
            ProductCategory::Grains,
            1000,
            120,
            date!(2024 - 01 - 20),
            ("farmer2", "Maria Garcia"),
            "High-quality basmati rice, aged to perfection",
        ),
        product(
            "3",
            "Fresh Wheat",
            ProductCategory::Grains,
            2000,
            35,
            date!(2024 - 01 - 25),
            ("farmer3", "David Johnson"),
            "Premium wheat suitable for flour production",
        ),
        product(
            "4",
            "Organic Carrots",
            ProductCategory::Vegetables,
            300,
            55,
            date!(2024 - 01 - 18),
            ("farmer1", "John Smith"),
            "Sweet and crunchy organic carrots",
        ),
    ]
}

/// Contracts shown on the contracts page, derived from the mock catalog.
pub fn mock_contracts() -> Vec<Contract> {
    let products = mock_products();
    let specs = [
        (
            0usize,
            "CON-1705300000000",
            200u32,
            date!(2024 - 02 - 01),
            "Mumbai wholesale market",
            ContractStatus::Active,
            datetime!(2024-01-15 06:26:40 UTC),
        ),
        (
            1,
            "CON-1704700000000",
            350,
            date!(2024 - 01 - 28),
            "Delhi grain depot",
            ContractStatus::Completed,
            datetime!(2024-01-08 07:46:40 UTC),
        ),
        (
            2,
            "CON-1705900000000",
            800,
            date!(2024 - 02 - 20),
            "Ludhiana flour mill",
            ContractStatus::Pending,
            datetime!(2024-01-22 05:06:40 UTC),
        ),
    ];

    specs
        .into_iter()
        .filter_map(
            |(index, contract_id, quantity, delivery_date, location, status, created_at)| {
                let product = products.get(index)?;
                let offer = Offer::priced(quantity, product.price_per_unit, delivery_date);
                let mut final_terms = ContractTerms::from_agreed(&offer);
                final_terms.delivery_location = location.to_owned();
                Some(Contract {
                    contract_id: ContractId::new(contract_id),
                    thread: NegotiationThread {
                        product_id: product.id.clone(),
                        product_name: product.name.clone(),
                        buyer_id: UserId::new("buyer1"),
                        buyer_name: "Sarah Mitchell".to_owned(),
                        seller_id: product.farmer_id.clone(),
                        seller_name: product.farmer_name.clone(),
                        initial_offer: offer.clone(),
                    },
                    agreed_terms: offer,
                    final_terms,
                    created_at,
                    status,
                })
            },
        )
        .collect()
}
