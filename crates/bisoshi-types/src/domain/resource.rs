use super::record::{RecordId, Row};
use crate::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::str::FromStr;

/// Business entities managed through a CRUD list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Product,
    Client,
    Sale,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Product => "product",
            EntityKind::Client => "client",
            EntityKind::Sale => "sale",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "product" | "products" => Ok(EntityKind::Product),
            "client" | "clients" => Ok(EntityKind::Client),
            "sale" | "sales" => Ok(EntityKind::Sale),
            other => Err(Error::InvalidValue(format!("unknown entity '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "asc"),
            SortDirection::Descending => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(Error::InvalidValue(format!("unknown sort direction '{}'", other))),
        }
    }
}

/// How a column's cells are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormat {
    Text,
    Number,
    Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub id: &'static str,
    pub label: &'static str,
    pub format: CellFormat,
}

impl Column {
    pub const fn text(id: &'static str, label: &'static str) -> Self {
        Self { id, label, format: CellFormat::Text }
    }

    pub const fn number(id: &'static str, label: &'static str) -> Self {
        Self { id, label, format: CellFormat::Number }
    }

    pub const fn money(id: &'static str, label: &'static str) -> Self {
        Self { id, label, format: CellFormat::Money }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FormField {
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self { name, label, kind: FieldKind::Text }
    }

    pub const fn number(name: &'static str, label: &'static str) -> Self {
        Self { name, label, kind: FieldKind::Number }
    }

    /// Parse raw user input for this field.
    pub fn parse_number(&self, raw: &str) -> Result<f64> {
        raw.trim().parse::<f64>().map_err(|_| Error::InvalidField {
            field: self.name.to_string(),
            reason: format!("'{}' is not a number", raw),
        })
    }
}

/// REST routes of one resource collection, relative to the API base URL.
///
/// `{id}` in the update and delete templates is replaced with the row id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub list: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

impl Endpoint {
    pub fn update_path(&self, id: &RecordId) -> String {
        self.update.replace("{id}", id.as_str())
    }

    pub fn delete_path(&self, id: &RecordId) -> String {
        self.delete.replace("{id}", id.as_str())
    }
}

/// Everything a generic list view needs to know about one entity.
#[derive(Debug, Clone, Copy)]
pub struct ResourceSpec {
    pub kind: EntityKind,
    pub title: &'static str,
    pub endpoint: Endpoint,
    pub columns: &'static [Column],
    pub form_fields: &'static [FormField],
    /// Reload the whole collection after a successful delete.
    pub refetch_after_delete: bool,
}

impl ResourceSpec {
    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn form_field(&self, name: &str) -> Option<&FormField> {
        self.form_fields.iter().find(|f| f.name == name)
    }
}

/// Values edited in a create/update form.
pub trait FormInput: Clone + Default + Serialize {
    fn set_field(&mut self, name: &str, raw: &str) -> Result<()>;

    fn get_field(&self, name: &str) -> Option<String>;
}

/// An entity type served by a REST collection.
pub trait Resource: Send + Sync + 'static {
    type Row: Row + Clone + DeserializeOwned + Serialize + Send + Sync;
    type Input: FormInput + Send + Sync;

    fn spec() -> &'static ResourceSpec;

    /// Form values pre-filled from an existing row.
    fn input_from(row: &Self::Row) -> Self::Input;
}
