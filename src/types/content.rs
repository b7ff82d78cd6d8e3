use serde::{Deserialize, Serialize};

/// Type of data validation
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ValidationType {
    #[default]
    None,
    Whole,   // Whole number
    Decimal, // Decimal number
    List,    // Dropdown list
    Date,
    Time,
    TextLength,
    Custom, // Custom formula
}

/// Data validation rule for a range of cells
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataValidation {
    pub validation_type: ValidationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula1: Option<String>,
    pub allow_blank: bool,
    pub show_dropdown: bool, // For list type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_values: Option<Vec<String>>, // For list type with explicit values (parsed from formula1)
}

/// Data validation applied to a range of cells
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataValidationRange {
    pub sqref: String, // Cell range like "F2:F100"
    pub validation: DataValidation,
}
