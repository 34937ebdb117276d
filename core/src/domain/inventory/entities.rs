use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::DeserializeOwned};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{
    common::entities::app_errors::CoreError, inventory::expiry::ExpiryDate,
    meal_log::entities::MealLogEntry,
};

/// Quantities closer to zero than this are treated as zero.
pub const QUANTITY_EPSILON: f64 = 1e-9;

/// One acquisition event of one food (a "batch").
///
/// Several batches may share a name; there is no generated key, each entry
/// of the inventory list is its own batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InventoryItem {
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_food_type")]
    #[schema(value_type = String, example = "fruit")]
    pub food_type: FoodType,
    #[serde(default)]
    #[schema(value_type = f64, example = 3)]
    pub quantity: Quantity,
    #[serde(
        default,
        deserialize_with = "lenient_unit",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, example = "items")]
    pub unit: Option<Unit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "15/11/2025")]
    pub expected_expiry_date: Option<ExpiryText>,
    #[serde(default, deserialize_with = "lenient_nutrient")]
    pub calories: u32,
    #[serde(default, deserialize_with = "lenient_nutrient")]
    pub carbs: u32,
    #[serde(default, deserialize_with = "lenient_nutrient")]
    pub fats: u32,
    #[serde(default, deserialize_with = "lenient_nutrient")]
    pub protein: u32,
}

impl InventoryItem {
    pub fn new(
        name: impl Into<String>,
        food_type: FoodType,
        quantity: f64,
        unit: Unit,
        expected_expiry_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            food_type,
            quantity: Quantity::Amount(quantity),
            unit: Some(unit),
            expected_expiry_date: Some(ExpiryText::Text(expected_expiry_date.into())),
            calories: 0,
            carbs: 0,
            fats: 0,
            protein: 0,
        }
    }

    pub fn with_nutrition(mut self, nutrition: Nutrition) -> Self {
        self.calories = nutrition.calories;
        self.carbs = nutrition.carbs;
        self.fats = nutrition.fats;
        self.protein = nutrition.protein;
        self
    }

    pub fn nutrition(&self) -> Nutrition {
        Nutrition {
            calories: self.calories,
            carbs: self.carbs,
            fats: self.fats,
            protein: self.protein,
        }
    }

    /// The expiry as text, `None` when it is absent or not a string.
    pub fn expiry_text(&self) -> Option<&str> {
        self.expected_expiry_date.as_ref().and_then(ExpiryText::as_text)
    }

    pub fn expiry(&self) -> ExpiryDate {
        ExpiryDate::parse(self.expiry_text())
    }

    /// `normalized` must already be the output of [`normalize_name`].
    pub fn matches_name(&self, normalized: &str) -> bool {
        normalize_name(&self.name) == normalized
    }

    /// Sets a new positive quantity, scaling the nutrition totals so they
    /// still describe the whole batch.
    pub(crate) fn reduce_to(&mut self, remaining: f64) {
        if let Some(previous) = self.quantity.positive_amount() {
            let factor = remaining / previous;
            let scale = |value: u32| (f64::from(value) * factor).round().max(0.0) as u32;
            self.calories = scale(self.calories);
            self.carbs = scale(self.carbs);
            self.fats = scale(self.fats);
            self.protein = scale(self.protein);
        }
        self.quantity = Quantity::Amount(remaining);
    }
}

/// Case-insensitive, whitespace-trimmed identity key used to match batches.
/// Synonyms ("apple" / "apples") are not unified.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FoodType {
    Fruit,
    Vegetable,
    Protein,
    Grains,
    Dairy,
    Beverage,
    Snacks,
    Condiments,
    Other(String),
}

impl FoodType {
    pub const CATEGORIES: [&'static str; 8] = [
        "fruit",
        "vegetable",
        "protein",
        "grains",
        "dairy",
        "beverage",
        "snacks",
        "condiments",
    ];

    pub fn as_str(&self) -> &str {
        match self {
            FoodType::Fruit => "fruit",
            FoodType::Vegetable => "vegetable",
            FoodType::Protein => "protein",
            FoodType::Grains => "grains",
            FoodType::Dairy => "dairy",
            FoodType::Beverage => "beverage",
            FoodType::Snacks => "snacks",
            FoodType::Condiments => "condiments",
            FoodType::Other(raw) => raw,
        }
    }
}

impl Default for FoodType {
    fn default() -> Self {
        FoodType::Other("other".to_string())
    }
}

impl From<String> for FoodType {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "fruit" | "fruits" => FoodType::Fruit,
            "vegetable" | "vegetables" => FoodType::Vegetable,
            "protein" | "proteins" | "meat" => FoodType::Protein,
            "grain" | "grains" => FoodType::Grains,
            "dairy" => FoodType::Dairy,
            "beverage" | "beverages" | "drink" | "drinks" => FoodType::Beverage,
            "snack" | "snacks" => FoodType::Snacks,
            "condiment" | "condiments" => FoodType::Condiments,
            _ => FoodType::Other(raw),
        }
    }
}

impl From<FoodType> for String {
    fn from(food_type: FoodType) -> Self {
        match food_type {
            FoodType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a quantity is counted. Volume units are never used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    Items,
    Grams,
    Containers,
    Eggs,
    Other(String),
}

impl Unit {
    pub const RECOGNIZED: [&'static str; 4] = ["items", "grams", "containers", "eggs"];

    pub fn as_str(&self) -> &str {
        match self {
            Unit::Items => "items",
            Unit::Grams => "grams",
            Unit::Containers => "containers",
            Unit::Eggs => "eggs",
            Unit::Other(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Unit::Other(_))
    }
}

impl From<String> for Unit {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "item" | "items" => Unit::Items,
            "g" | "gram" | "grams" => Unit::Grams,
            "container" | "containers" => Unit::Containers,
            "egg" | "eggs" => Unit::Eggs,
            _ => Unit::Other(raw),
        }
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        match unit {
            Unit::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A batch quantity as persisted. Anything that is not a JSON number is kept
/// verbatim in `Raw` so that a rewrite of the document never destroys it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Amount(f64),
    Raw(Value),
}

impl Quantity {
    /// The amount, if it is a finite number strictly greater than zero.
    pub fn positive_amount(&self) -> Option<f64> {
        match self {
            Quantity::Amount(amount) if amount.is_finite() && *amount > QUANTITY_EPSILON => {
                Some(*amount)
            }
            _ => None,
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::Raw(Value::Null)
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // whole amounts go back out as integers, matching what scans produce
            Quantity::Amount(amount)
                if amount.fract() == 0.0 && amount.abs() < i64::MAX as f64 =>
            {
                serializer.serialize_i64(*amount as i64)
            }
            Quantity::Amount(amount) => serializer.serialize_f64(*amount),
            Quantity::Raw(raw) => raw.serialize(serializer),
        }
    }
}

/// An expiry as persisted. Scans write `DD/MM/YYYY` text; anything else
/// (a bare number, an object) is kept in `Raw` and written back unchanged.
/// A `Raw` expiry always reads as [`ExpiryDate::Unknown`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpiryText {
    Text(String),
    Raw(Value),
}

impl ExpiryText {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ExpiryText::Text(text) => Some(text),
            ExpiryText::Raw(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Nutrition {
    #[serde(default, deserialize_with = "lenient_nutrient")]
    pub calories: u32,
    #[serde(default, deserialize_with = "lenient_nutrient")]
    pub carbs: u32,
    #[serde(default, deserialize_with = "lenient_nutrient")]
    pub fats: u32,
    #[serde(default, deserialize_with = "lenient_nutrient")]
    pub protein: u32,
}

impl Nutrition {
    pub fn saturating_add(self, other: Nutrition) -> Nutrition {
        Nutrition {
            calories: self.calories.saturating_add(other.calories),
            carbs: self.carbs.saturating_add(other.carbs),
            fats: self.fats.saturating_add(other.fats),
            protein: self.protein.saturating_add(other.protein),
        }
    }
}

/// The whole persisted document of one bin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InventoryDocument {
    #[serde(default, deserialize_with = "lenient_entries")]
    pub inventory: Vec<InventoryItem>,
    /// Meals cooked from this bin, oldest first.
    #[serde(
        default,
        deserialize_with = "lenient_entries",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub meal_log: Vec<MealLogEntry>,
}

impl InventoryDocument {
    pub fn new(inventory: Vec<InventoryItem>) -> Self {
        Self {
            inventory,
            meal_log: Vec::new(),
        }
    }
}

/// Identifier of one logical inventory document in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BinId(String);

impl BinId {
    pub fn parse(raw: impl Into<String>) -> Result<Self, CoreError> {
        let raw = raw.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() || trimmed.len() > 128 {
            return Err(CoreError::Invalid(
                "bin id must be between 1 and 128 characters".to_string(),
            ));
        }

        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(CoreError::Invalid(
                "bin id may only contain letters, digits, '-' and '_'".to_string(),
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque version token handed out on read and checked on conditional write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentVersion(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub document: InventoryDocument,
    /// `None` when the backing store has no versioning.
    pub version: Option<DocumentVersion>,
}

fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(name)) => name,
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    })
}

fn lenient_food_type<'de, D>(deserializer: D) -> Result<FoodType, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(raw)) => FoodType::from(raw),
        _ => FoodType::default(),
    })
}

/// A unit that is not a string is kept as its JSON text so validation can
/// reject it and storage never loses it.
fn lenient_unit<'de, D>(deserializer: D) -> Result<Option<Unit>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(raw)) => Some(Unit::from(raw)),
        Some(other) => Some(Unit::Other(other.to_string())),
    })
}

/// Reads a list of document entries, dropping (and logging) entries that
/// are not readable at all, such as a bare string where an object belongs.
/// A list that is not an array is still an error.
pub(crate) fn lenient_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();

    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!(error = %e, "Dropping unreadable document entry");
                None
            }
        })
        .collect())
}

pub(crate) fn lenient_nutrient<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(nutrient_from_value).unwrap_or(0))
}

/// Reads a nutrient total from a number or a string such as `"95 kcal"`.
pub(crate) fn nutrient_from_value(value: &Value) -> Option<u32> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => leading_number(text)?,
        _ => return None,
    };

    if !number.is_finite() {
        return None;
    }

    Some(number.max(0.0).round().min(f64::from(u32::MAX)) as u32)
}

/// Parses the numeric prefix of a string: `"200g"` -> 200.0, `" 1.5 "` -> 1.5.
pub(crate) fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim();
    let end = text
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.' || *c == '-' || *c == '+'))
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());

    text[..end].parse::<f64>().ok()
}
