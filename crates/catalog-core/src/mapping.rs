//! # Key/Value Mapping
//!
//! Converts a [`Product`] to and from the plain JSON object the web service
//! sends and receives.
//!
//! ## Wire Shape
//! ```text
//! {
//!   "id":          "550e8400-..." | null,
//!   "name":        "Fedora",
//!   "description": "A red hat",
//!   "price":       "12.50",          ← canonical string, never a float
//!   "available":   true,             ← must be a real boolean
//!   "category":    "CLOTHS"          ← enumeration name
//! }
//! ```
//!
//! `deserialize` never touches `id`: identity belongs to the repository.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{DataValidationError, ValidationResult};
use crate::price::Price;
use crate::types::{Category, Product};
use crate::validation::validate_product_name;

impl Product {
    /// Produces the key/value form of every field.
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::{Category, Price, Product};
    ///
    /// let hat = Product::new("Fedora", "A red hat", Price::from_cents(1250), true, Category::Cloths);
    /// let map = hat.serialize();
    /// assert_eq!(map["price"], "12.50");
    /// assert_eq!(map["category"], "CLOTHS");
    /// assert!(map["id"].is_null());
    /// ```
    pub fn serialize(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(
            "id".to_string(),
            self.id
                .map_or(Value::Null, |id| Value::String(id.to_string())),
        );
        map.insert("name".to_string(), Value::String(self.name.clone()));
        map.insert(
            "description".to_string(),
            Value::String(self.description.clone()),
        );
        map.insert("price".to_string(), Value::String(self.price.to_string()));
        map.insert("available".to_string(), Value::Bool(self.available));
        map.insert(
            "category".to_string(),
            Value::String(self.category.as_str().to_string()),
        );
        map
    }

    /// Overwrites this product's fields from a key/value payload.
    ///
    /// All fields are validated before any is assigned, so a failed call
    /// leaves the product exactly as it was. `id` is never read or written.
    ///
    /// ## Errors
    /// `DataValidationError` when the payload is not an object, a key is
    /// missing, or a value has the wrong type or an unknown category name.
    pub fn deserialize(&mut self, data: &Value) -> ValidationResult<()> {
        let fields = ProductFields::parse(data)?;
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.available = fields.available;
        self.category = fields.category;
        Ok(())
    }

    /// Builds a fresh, unpersisted product from a key/value payload.
    pub fn from_json(data: &Value) -> ValidationResult<Product> {
        let fields = ProductFields::parse(data)?;
        Ok(Product::new(
            fields.name,
            fields.description,
            fields.price,
            fields.available,
            fields.category,
        ))
    }
}

/// The mutable fields, parsed and validated but not yet applied.
struct ProductFields {
    name: String,
    description: String,
    price: Price,
    available: bool,
    category: Category,
}

impl ProductFields {
    fn parse(data: &Value) -> ValidationResult<Self> {
        let object = data
            .as_object()
            .ok_or_else(|| DataValidationError::BadData(json_type_name(data).to_string()))?;

        let name = string_field(object, "name")?;
        validate_product_name(&name)?;

        Ok(ProductFields {
            name,
            description: string_field(object, "description")?,
            price: price_field(object)?,
            available: bool_field(object, "available")?,
            category: category_field(object)?,
        })
    }
}

// =============================================================================
// Field Readers
// =============================================================================

fn required<'a>(object: &'a Map<String, Value>, field: &str) -> ValidationResult<&'a Value> {
    object
        .get(field)
        .ok_or_else(|| DataValidationError::missing(field))
}

fn string_field(object: &Map<String, Value>, field: &str) -> ValidationResult<String> {
    match required(object, field)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(DataValidationError::invalid_type(
            field,
            "string",
            json_type_name(other),
        )),
    }
}

fn bool_field(object: &Map<String, Value>, field: &str) -> ValidationResult<bool> {
    match required(object, field)? {
        Value::Bool(b) => Ok(*b),
        other => Err(DataValidationError::invalid_type(
            field,
            "boolean",
            json_type_name(other),
        )),
    }
}

fn price_field(object: &Map<String, Value>) -> ValidationResult<Price> {
    let value = required(object, "price")?;
    match value {
        Value::String(_) | Value::Number(_) => Price::deserialize(value)
            .map_err(|e| DataValidationError::invalid_price(value.to_string(), e.to_string())),
        other => Err(DataValidationError::invalid_type(
            "price",
            "decimal",
            json_type_name(other),
        )),
    }
}

fn category_field(object: &Map<String, Value>) -> ValidationResult<Category> {
    match required(object, "category")? {
        Value::String(name) => name.parse(),
        other => Err(DataValidationError::invalid_type(
            "category",
            "category name",
            json_type_name(other),
        )),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::ProductFactory;
    use serde_json::json;
    use uuid::Uuid;

    fn fedora() -> Product {
        Product::new(
            "Fedora",
            "A red hat",
            Price::from_cents(1250),
            true,
            Category::Cloths,
        )
    }

    fn fedora_json() -> Value {
        json!({
            "name": "Fedora",
            "description": "A red hat",
            "price": 12.50,
            "available": true,
            "category": "CLOTHS"
        })
    }

    #[test]
    fn test_serialize() {
        let mut product = fedora();
        let id = Uuid::new_v4();
        product.id = Some(id);

        let map = product.serialize();
        assert_eq!(map.len(), 6);
        assert_eq!(map["id"], json!(id.to_string()));
        assert_eq!(map["name"], json!("Fedora"));
        assert_eq!(map["description"], json!("A red hat"));
        assert_eq!(map["price"], json!("12.50"));
        assert_eq!(map["available"], json!(true));
        assert_eq!(map["category"], json!("CLOTHS"));
    }

    #[test]
    fn test_serialize_then_deserialize_reproduces_fields() {
        for mut original in ProductFactory::seeded(7).take(200) {
            original.id = Some(Uuid::new_v4());

            let data = Value::Object(original.serialize());
            let mut copy = Product::new("x", "", Price::zero(), false, Category::Unknown);
            copy.deserialize(&data).unwrap();

            assert_eq!(copy.id, None);
            assert_eq!(copy.name, original.name);
            assert_eq!(copy.description, original.description);
            assert_eq!(copy.price.to_decimal(), original.price.to_decimal());
            assert_eq!(copy.available, original.available);
            assert_eq!(copy.category, original.category, "{}", original);
        }
    }

    #[test]
    fn test_factory_products_cover_every_category() {
        let products: Vec<_> = ProductFactory::seeded(7).take(200).collect();
        for category in Category::ALL {
            assert!(products.iter().any(|p| p.category == category), "{category}");
        }
    }

    #[test]
    fn test_deserialize_leaves_id_untouched() {
        let id = Uuid::new_v4();
        let mut product = fedora();
        product.id = Some(id);

        let mut data = fedora_json();
        data["id"] = json!(Uuid::new_v4().to_string());
        data["name"] = json!("Panama");
        product.deserialize(&data).unwrap();

        assert_eq!(product.id, Some(id));
        assert_eq!(product.name, "Panama");
    }

    #[test]
    fn test_from_json() {
        let product = Product::from_json(&fedora_json()).unwrap();
        assert_eq!(product, fedora());
    }

    #[test]
    fn test_price_as_string_or_number() {
        let mut data = fedora_json();
        data["price"] = json!("12.5");
        let from_string = Product::from_json(&data).unwrap();
        assert_eq!(from_string.price, Price::from_cents(1250));

        data["price"] = json!(12);
        let from_int = Product::from_json(&data).unwrap();
        assert_eq!(from_int.price, Price::from_cents(1200));
    }

    #[test]
    fn test_available_must_be_boolean() {
        let mut product = fedora();
        let data = json!({
            "name": "Fedora",
            "description": "A red hat",
            "price": 12.50,
            "available": "Test",
            "category": "CLOTHS"
        });

        let err = product.deserialize(&data).unwrap_err();
        assert_eq!(
            err,
            DataValidationError::invalid_type("available", "boolean", "string")
        );
    }

    #[test]
    fn test_unknown_category_fails() {
        let mut data = fedora_json();
        data["category"] = json!("SHOES");
        assert_eq!(
            Product::from_json(&data).unwrap_err(),
            DataValidationError::UnknownCategory("SHOES".to_string())
        );

        data["category"] = json!(1);
        assert!(matches!(
            Product::from_json(&data),
            Err(DataValidationError::InvalidType { .. })
        ));
    }

    #[test]
    fn test_missing_fields_fail() {
        for field in ["name", "description", "price", "available", "category"] {
            let mut data = fedora_json();
            data.as_object_mut().unwrap().remove(field);
            assert_eq!(
                Product::from_json(&data).unwrap_err(),
                DataValidationError::missing(field),
                "missing {field} should be rejected"
            );
        }
    }

    #[test]
    fn test_bad_price_fails() {
        let mut data = fedora_json();
        data["price"] = json!("a lot");
        assert!(matches!(
            Product::from_json(&data),
            Err(DataValidationError::InvalidPrice { .. })
        ));

        data["price"] = json!(1.234);
        assert!(matches!(
            Product::from_json(&data),
            Err(DataValidationError::InvalidPrice { .. })
        ));

        data["price"] = json!(true);
        assert!(matches!(
            Product::from_json(&data),
            Err(DataValidationError::InvalidType { .. })
        ));
    }

    #[test]
    fn test_non_object_payload_fails() {
        assert_eq!(
            Product::from_json(&json!(null)).unwrap_err(),
            DataValidationError::BadData("null".to_string())
        );
        assert!(Product::from_json(&json!(["Fedora"])).is_err());
    }

    #[test]
    fn test_failed_deserialize_changes_nothing() {
        let mut product = fedora();
        let before = product.clone();

        let mut data = fedora_json();
        data["name"] = json!("Panama");
        data["available"] = json!("yes");

        assert!(product.deserialize(&data).is_err());
        assert_eq!(product, before);
    }

    #[test]
    fn test_empty_name_fails() {
        let mut data = fedora_json();
        data["name"] = json!("");
        assert!(matches!(
            Product::from_json(&data),
            Err(DataValidationError::Required { .. })
        ));
    }
}
