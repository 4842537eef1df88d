//! Declarative request validation.
//!
//! A route declares its rules as a static slice of [`Rule`]s. Each rule names a
//! field, where to find it (JSON body or path parameter), a [`Check`] and the
//! message reported when the check fails. [`validate`] runs every rule in
//! declaration order and returns one [`FieldError`] per failing rule, so several
//! rules on the same field can each contribute an entry.
//!
//! Checks judge a value by its textual form: strings as-is, numbers and booleans
//! by their JSON text, and missing or `null` values as the empty string.

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Params,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Textual form is non-empty.
    NotEmpty,
    /// Optionally signed decimal number (`15`, `-7`, `1.5`, `.5`).
    Numeric,
    /// Coerces to a number strictly greater than zero.
    Positive,
    /// `true`/`false`, or one of `"true"`, `"false"`, `"1"`, `"0"`.
    Boolean,
    /// Optionally signed integer without leading zeros.
    Int,
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub field: &'static str,
    pub location: Location,
    pub check: Check,
    pub message: &'static str,
}

impl Rule {
    pub const fn body(field: &'static str, check: Check, message: &'static str) -> Self {
        Self {
            field,
            location: Location::Body,
            check,
            message,
        }
    }

    pub const fn param(field: &'static str, check: Check, message: &'static str) -> Self {
        Self {
            field,
            location: Location::Params,
            check,
            message,
        }
    }
}

/// One failing rule, shaped the way clients of this API already parse it.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "field")]
    pub kind: &'static str,
    /// The offending value, omitted when the field was absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub value: Option<JsonValue>,
    #[schema(example = "El id no es valido")]
    pub msg: String,
    #[schema(example = "id")]
    pub path: String,
    pub location: Location,
}

/// The data a rule set is evaluated against.
pub struct RequestFields<'a> {
    pub params: &'a HashMap<String, String>,
    pub body: &'a JsonValue,
}

impl RequestFields<'_> {
    fn lookup(&self, location: Location, field: &str) -> Option<JsonValue> {
        match location {
            Location::Params => self.params.get(field).cloned().map(JsonValue::String),
            Location::Body => self.body.get(field).cloned(),
        }
    }
}

pub const MSG_INVALID_ID: &str = "El id no es valido";
pub const MSG_EMPTY_NAME: &str = "el nombre del producto no puede ir vacio";
pub const MSG_NOT_NUMERIC: &str = "el valor no es valido";
pub const MSG_EMPTY_PRICE: &str = "el precio del producto no puede ir vacio";
pub const MSG_INVALID_PRICE: &str = "El precio no es valido";
pub const MSG_INVALID_AVAILABILITY: &str = "Valor para disponibilidad no valido";

const ID_RULE: Rule = Rule::param("id", Check::Int, MSG_INVALID_ID);
const NAME_RULE: Rule = Rule::body("name", Check::NotEmpty, MSG_EMPTY_NAME);
const PRICE_NUMERIC_RULE: Rule = Rule::body("price", Check::Numeric, MSG_NOT_NUMERIC);
const PRICE_PRESENT_RULE: Rule = Rule::body("price", Check::NotEmpty, MSG_EMPTY_PRICE);
const PRICE_POSITIVE_RULE: Rule = Rule::body("price", Check::Positive, MSG_INVALID_PRICE);
const AVAILABILITY_RULE: Rule = Rule::body("availability", Check::Boolean, MSG_INVALID_AVAILABILITY);

/// GET, PATCH and DELETE on `/api/products/:id`.
pub static PRODUCT_ID_RULES: &[Rule] = &[ID_RULE];

pub static CREATE_PRODUCT_RULES: &[Rule] = &[
    NAME_RULE,
    PRICE_NUMERIC_RULE,
    PRICE_PRESENT_RULE,
    PRICE_POSITIVE_RULE,
];

pub static UPDATE_PRODUCT_RULES: &[Rule] = &[
    ID_RULE,
    NAME_RULE,
    PRICE_NUMERIC_RULE,
    PRICE_PRESENT_RULE,
    PRICE_POSITIVE_RULE,
    AVAILABILITY_RULE,
];

/// Runs `rules` in order against `input` and collects every failure.
pub fn validate(rules: &[Rule], input: &RequestFields<'_>) -> Vec<FieldError> {
    rules
        .iter()
        .filter_map(|rule| {
            let value = input.lookup(rule.location, rule.field);
            if passes(rule.check, value.as_ref()) {
                return None;
            }
            Some(FieldError {
                kind: "field",
                value,
                msg: rule.message.to_string(),
                path: rule.field.to_string(),
                location: rule.location,
            })
        })
        .collect()
}

pub fn passes(check: Check, value: Option<&JsonValue>) -> bool {
    let text = text_of(value);
    match check {
        Check::NotEmpty => !text.is_empty(),
        Check::Numeric => is_decimal(&text),
        Check::Positive => coerce_number(value).is_some_and(|n| n > 0.0),
        Check::Boolean => matches!(text.as_str(), "true" | "false" | "1" | "0"),
        Check::Int => is_int(&text),
    }
}

/// Textual form of a request value.
pub fn text_of(value: Option<&JsonValue>) -> String {
    match value {
        None | Some(JsonValue::Null) => String::new(),
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Number(n)) => number_text(n),
        Some(other) => other.to_string(),
    }
}

/// Plain decimal notation between 1e-6 and 1e21; exponent notation outside.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
        Some(f) if n.is_f64() && (1e-6..1e21).contains(&f.abs()) => f.to_string(),
        _ => n.to_string(),
    }
}

/// Loose numeric coercion: numbers as-is, strings parsed after trimming (the
/// empty string counts as zero), `true`/`false` as 1/0.
pub fn coerce_number(value: Option<&JsonValue>) -> Option<f64> {
    match value? {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
            }
        }
        JsonValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        JsonValue::Null => Some(0.0),
        _ => None,
    }
}

/// Boolean coercion matching [`Check::Boolean`].
pub fn coerce_bool(value: Option<&JsonValue>) -> Option<bool> {
    match text_of(value).as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn strip_sign(s: &str) -> &str {
    s.strip_prefix(['+', '-']).unwrap_or(s)
}

fn is_decimal(text: &str) -> bool {
    let unsigned = strip_sign(text);
    match unsigned.split_once('.') {
        Some((int_part, frac_part)) => {
            all_digits(int_part) && !frac_part.is_empty() && all_digits(frac_part)
        }
        None => !unsigned.is_empty() && all_digits(unsigned),
    }
}

fn is_int(text: &str) -> bool {
    let unsigned = strip_sign(text);
    if unsigned.is_empty() || !all_digits(unsigned) {
        return false;
    }
    unsigned == "0" || !unsigned.starts_with('0')
}
