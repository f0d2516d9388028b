use super::record::{FieldRef, RecordId, Row, format_number};
use super::resource::{Column, Endpoint, EntityKind, FormField, FormInput, Resource, ResourceSpec};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

fn unknown(name: &str) -> Error {
    Error::UnknownField(name.to_string())
}

fn number(field: &'static str, raw: &str) -> Result<f64> {
    FormField::number(field, field).parse_number(raw)
}

// ---------------------------------------------------------------------------
// Product

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: RecordId,
    pub name: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit_of_measure: String,
    pub cost: f64,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub total_profit: f64,
}

impl Row for Product {
    fn row_id(&self) -> RecordId {
        self.id.clone()
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        Some(match name {
            "id" => FieldRef::Text(self.id.as_str()),
            "name" => FieldRef::Text(&self.name),
            "quantity" => FieldRef::Number(self.quantity),
            "unitOfMeasure" => FieldRef::Text(&self.unit_of_measure),
            "cost" => FieldRef::Number(self.cost),
            "price" => FieldRef::Number(self.price),
            "category" => FieldRef::Text(&self.category),
            "totalPrice" => FieldRef::Number(self.total_price),
            "totalCost" => FieldRef::Number(self.total_cost),
            "totalProfit" => FieldRef::Number(self.total_profit),
            _ => return None,
        })
    }

    fn filter_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub quantity: f64,
    pub unit_of_measure: String,
    pub cost: f64,
    pub price: f64,
    pub category: String,
}

impl FormInput for ProductInput {
    fn set_field(&mut self, name: &str, raw: &str) -> Result<()> {
        match name {
            "name" => self.name = raw.to_string(),
            "quantity" => self.quantity = number("quantity", raw)?,
            "unitOfMeasure" => self.unit_of_measure = raw.to_string(),
            "cost" => self.cost = number("cost", raw)?,
            "price" => self.price = number("price", raw)?,
            "category" => self.category = raw.to_string(),
            _ => return Err(unknown(name)),
        }
        Ok(())
    }

    fn get_field(&self, name: &str) -> Option<String> {
        Some(match name {
            "name" => self.name.clone(),
            "quantity" => format_number(self.quantity),
            "unitOfMeasure" => self.unit_of_measure.clone(),
            "cost" => format_number(self.cost),
            "price" => format_number(self.price),
            "category" => self.category.clone(),
            _ => return None,
        })
    }
}

pub struct Products;

static PRODUCT_SPEC: ResourceSpec = ResourceSpec {
    kind: EntityKind::Product,
    title: "Products",
    endpoint: Endpoint {
        list: "/products",
        create: "/products/create",
        update: "/products/update/{id}",
        delete: "/products/delete/{id}",
    },
    columns: &[
        Column::text("name", "Name"),
        Column::number("quantity", "Quantity"),
        Column::text("unitOfMeasure", "Unit"),
        Column::money("cost", "Cost"),
        Column::money("price", "Price"),
        Column::text("category", "Category"),
        Column::money("totalPrice", "Total Price"),
        Column::money("totalCost", "Total Cost"),
        Column::money("totalProfit", "Profit"),
    ],
    form_fields: &[
        FormField::text("name", "Name"),
        FormField::number("quantity", "Quantity"),
        FormField::text("unitOfMeasure", "Unit"),
        FormField::number("cost", "Cost"),
        FormField::number("price", "Price"),
        FormField::text("category", "Category"),
    ],
    refetch_after_delete: true,
};

impl Resource for Products {
    type Row = Product;
    type Input = ProductInput;

    fn spec() -> &'static ResourceSpec {
        &PRODUCT_SPEC
    }

    fn input_from(row: &Product) -> ProductInput {
        ProductInput {
            name: row.name.clone(),
            quantity: row.quantity,
            unit_of_measure: row.unit_of_measure.clone(),
            cost: row.cost,
            price: row.price,
            category: row.category.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Client

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub customer_segment: String,
    #[serde(default)]
    pub client_type: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub contact: String,
}

impl Row for Client {
    fn row_id(&self) -> RecordId {
        self.id.clone()
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        let value = match name {
            "id" => self.id.as_str(),
            "name" => &self.name,
            "customerSegment" => &self.customer_segment,
            "clientType" => &self.client_type,
            "region" => &self.region,
            "city" => &self.city,
            "zone" => &self.zone,
            "contact" => &self.contact,
            _ => return None,
        };
        Some(FieldRef::Text(value))
    }

    fn filter_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

/// Client ids are chosen by the user, so the id is part of the form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInput {
    pub id: String,
    pub name: String,
    pub customer_segment: String,
    pub client_type: String,
    pub region: String,
    pub city: String,
    pub zone: String,
    pub contact: String,
}

impl ClientInput {
    fn slot(&mut self, name: &str) -> Option<&mut String> {
        Some(match name {
            "id" => &mut self.id,
            "name" => &mut self.name,
            "customerSegment" => &mut self.customer_segment,
            "clientType" => &mut self.client_type,
            "region" => &mut self.region,
            "city" => &mut self.city,
            "zone" => &mut self.zone,
            "contact" => &mut self.contact,
            _ => return None,
        })
    }
}

impl FormInput for ClientInput {
    fn set_field(&mut self, name: &str, raw: &str) -> Result<()> {
        let slot = self.slot(name).ok_or_else(|| unknown(name))?;
        *slot = raw.to_string();
        Ok(())
    }

    fn get_field(&self, name: &str) -> Option<String> {
        let value = match name {
            "id" => &self.id,
            "name" => &self.name,
            "customerSegment" => &self.customer_segment,
            "clientType" => &self.client_type,
            "region" => &self.region,
            "city" => &self.city,
            "zone" => &self.zone,
            "contact" => &self.contact,
            _ => return None,
        };
        Some(value.clone())
    }
}

pub struct Clients;

static CLIENT_SPEC: ResourceSpec = ResourceSpec {
    kind: EntityKind::Client,
    title: "Clients",
    endpoint: Endpoint {
        list: "/clients",
        create: "/clients",
        update: "/clients/{id}",
        delete: "/clients/{id}",
    },
    columns: &[
        Column::text("id", "ID"),
        Column::text("name", "Name"),
        Column::text("customerSegment", "Segment"),
        Column::text("clientType", "Type"),
        Column::text("region", "Region"),
        Column::text("city", "City"),
        Column::text("zone", "Zone"),
        Column::text("contact", "Contact"),
    ],
    form_fields: &[
        FormField::text("id", "ID"),
        FormField::text("name", "Name"),
        FormField::text("customerSegment", "Segment"),
        FormField::text("clientType", "Type"),
        FormField::text("region", "Region"),
        FormField::text("city", "City"),
        FormField::text("zone", "Zone"),
        FormField::text("contact", "Contact"),
    ],
    refetch_after_delete: false,
};

impl Resource for Clients {
    type Row = Client;
    type Input = ClientInput;

    fn spec() -> &'static ResourceSpec {
        &CLIENT_SPEC
    }

    fn input_from(row: &Client) -> ClientInput {
        ClientInput {
            id: row.id.to_string(),
            name: row.name.clone(),
            customer_segment: row.customer_segment.clone(),
            client_type: row.client_type.clone(),
            region: row.region.clone(),
            city: row.city.clone(),
            zone: row.zone.clone(),
            contact: row.contact.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Sale

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleParty {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
}

/// Product as embedded in a sale; pricing fields are optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleProduct {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: RecordId,
    pub client: SaleParty,
    pub product: SaleProduct,
    pub quantity: f64,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Row for Sale {
    fn row_id(&self) -> RecordId {
        self.id.clone()
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        Some(match name {
            "id" => FieldRef::Text(self.id.as_str()),
            "client" => FieldRef::Text(&self.client.name),
            "product" => FieldRef::Text(&self.product.name),
            "quantity" => FieldRef::Number(self.quantity),
            "totalAmount" => FieldRef::Number(self.total_amount),
            "date" => FieldRef::Text(self.date.as_deref()?),
            _ => return None,
        })
    }

    fn filter_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.client.name)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleInput {
    pub client_id: String,
    pub product_id: String,
    pub quantity: f64,
}

impl FormInput for SaleInput {
    fn set_field(&mut self, name: &str, raw: &str) -> Result<()> {
        match name {
            "clientId" => self.client_id = raw.to_string(),
            "productId" => self.product_id = raw.to_string(),
            "quantity" => self.quantity = number("quantity", raw)?,
            _ => return Err(unknown(name)),
        }
        Ok(())
    }

    fn get_field(&self, name: &str) -> Option<String> {
        Some(match name {
            "clientId" => self.client_id.clone(),
            "productId" => self.product_id.clone(),
            "quantity" => format_number(self.quantity),
            _ => return None,
        })
    }
}

pub struct Sales;

static SALE_SPEC: ResourceSpec = ResourceSpec {
    kind: EntityKind::Sale,
    title: "Sales",
    endpoint: Endpoint {
        list: "/sales",
        create: "/sales/create",
        update: "/sales/update/{id}",
        delete: "/sales/delete/{id}",
    },
    columns: &[
        Column::text("client", "Client"),
        Column::text("product", "Product"),
        Column::number("quantity", "Quantity"),
        Column::money("totalAmount", "Total"),
        Column::text("date", "Date"),
    ],
    form_fields: &[
        FormField::text("clientId", "Client"),
        FormField::text("productId", "Product"),
        FormField::number("quantity", "Quantity"),
    ],
    refetch_after_delete: false,
};

impl Resource for Sales {
    type Row = Sale;
    type Input = SaleInput;

    fn spec() -> &'static ResourceSpec {
        &SALE_SPEC
    }

    fn input_from(row: &Sale) -> SaleInput {
        SaleInput {
            client_id: row.client.id.to_string(),
            product_id: row.product.id.to_string(),
            quantity: row.quantity,
        }
    }
}
