// validation.rs
//! Field-level checks for JSON request bodies. Every offending field is
//! reported, not just the first one.
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }

    pub fn missing(loc: &[&str]) -> Self {
        Self::new(loc, "Field required", "missing")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn details(&self) -> &[FieldError] {
        &self.errors
    }

    /// Shorthand for a single failing field.
    pub fn single(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

/// Walks one JSON object, collecting errors as fields are pulled out.
pub struct ObjectValidator<'a> {
    fields: Option<&'a Map<String, Value>>,
    errors: ValidationErrors,
}

impl<'a> ObjectValidator<'a> {
    pub fn new(body: &'a Value) -> Self {
        let mut errors = ValidationErrors::default();
        let fields = body.as_object();
        if fields.is_none() {
            errors.push(FieldError::new(
                &["body"],
                "Input should be a valid object",
                "model_type",
            ));
        }
        Self { fields, errors }
    }

    fn field(&mut self, name: &str) -> Option<&'a Value> {
        let fields = self.fields?;
        match fields.get(name) {
            Some(value) => Some(value),
            None => {
                self.errors.push(FieldError::missing(&["body", name]));
                None
            }
        }
    }

    pub fn string(&mut self, name: &str) -> Option<String> {
        let value = self.field(name)?;
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.errors.push(FieldError::new(
                    &["body", name],
                    "Input should be a valid string",
                    "string_type",
                ));
                None
            }
        }
    }

    /// JSON numbers, or strings holding a finite decimal number.
    pub fn number(&mut self, name: &str) -> Option<f64> {
        let value = self.field(name)?;
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        };
        if parsed.is_none() {
            self.errors.push(FieldError::new(
                &["body", name],
                "Input should be a valid number",
                "float_type",
            ));
        }
        parsed
    }

    /// A string restricted to `allowed`.
    pub fn choice(&mut self, name: &str, allowed: &[&str]) -> Option<String> {
        let value = self.field(name)?;
        match value.as_str() {
            Some(s) if allowed.contains(&s) => Some(s.to_string()),
            _ => {
                let quoted: Vec<String> = allowed.iter().map(|a| format!("'{}'", a)).collect();
                self.errors.push(FieldError::new(
                    &["body", name],
                    format!("Input should be {}", quoted.join(" or ")),
                    "literal_error",
                ));
                None
            }
        }
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
