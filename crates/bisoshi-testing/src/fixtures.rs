//! Sample business data shared by the fake backend and tests.

use bisoshi_types::{Client, Product, RecordId, Sale, SaleParty, SaleProduct};

pub const ADMIN_EMAIL: &str = "admin@bisoshi.pe";
pub const ADMIN_PASSWORD: &str = "secret";

/// Build a product with its derived totals filled in.
pub fn product(
    id: &str,
    name: &str,
    quantity: f64,
    unit: &str,
    cost: f64,
    price: f64,
    category: &str,
) -> Product {
    Product {
        id: RecordId::from(id),
        name: name.to_string(),
        quantity,
        unit_of_measure: unit.to_string(),
        cost,
        price,
        category: category.to_string(),
        total_price: price * quantity,
        total_cost: cost * quantity,
        total_profit: (price - cost) * quantity,
    }
}

pub fn client(id: &str, name: &str, segment: &str, region: &str) -> Client {
    Client {
        id: RecordId::from(id),
        name: name.to_string(),
        customer_segment: segment.to_string(),
        client_type: "Empresa".to_string(),
        region: region.to_string(),
        city: region.to_string(),
        zone: "Centro".to_string(),
        contact: format!("{}@example.pe", id),
    }
}

/// A sale whose amounts follow the embedded product's price and cost.
pub fn sale(id: &str, client: &Client, product: &Product, quantity: f64, date: &str) -> Sale {
    Sale {
        id: RecordId::from(id),
        client: SaleParty {
            id: client.id.clone(),
            name: client.name.clone(),
        },
        product: SaleProduct {
            id: product.id.clone(),
            name: product.name.clone(),
            price: Some(product.price),
            total_cost: Some(product.cost * quantity),
        },
        quantity,
        total_amount: product.price * quantity,
        date: Some(date.to_string()),
    }
}

pub fn sample_products() -> Vec<Product> {
    vec![
        product("p1", "Glifosato 480", 120.0, "L", 18.0, 25.0, "Herbicidas"),
        product("p2", "Urea agricola", 300.0, "kg", 2.0, 3.0, "Fertilizantes"),
        product("p3", "Mancozeb 80", 45.0, "kg", 12.0, 19.5, "Fungicidas"),
        product("p4", "Abono foliar", 80.0, "L", 9.0, 14.0, "Fertilizantes"),
    ]
}

pub fn sample_clients() -> Vec<Client> {
    vec![
        client("c1", "Agro Norte SAC", "Mayorista", "Piura"),
        client("c2", "Fundo Santa Rosa", "Minorista", "Ica"),
        client("c3", "Cooperativa Valle Verde", "Cooperativa", "Junin"),
    ]
}

pub fn sample_sales() -> Vec<Sale> {
    let products = sample_products();
    let clients = sample_clients();
    vec![
        sale("s1", &clients[0], &products[0], 10.0, "2023-03-14T09:30:00Z"),
        sale("s2", &clients[1], &products[1], 100.0, "2024-02-01T15:00:00Z"),
        sale("s3", &clients[2], &products[2], 5.0, "2024-05-20"),
    ]
}
