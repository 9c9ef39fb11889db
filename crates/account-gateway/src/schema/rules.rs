//! Declarative field rules for event payloads

use regex::Regex;

/// Extra format check applied to a string field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringFormat {
    #[default]
    Plain,
    Email,
    Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct StringRule {
    pub required: bool,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub exact_length: Option<u64>,
    pub pattern: Option<Regex>,
    pub format: StringFormat,
}

impl StringRule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Inclusive character-count bounds
    pub fn length(mut self, min: u64, max: u64) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    pub fn exact_length(mut self, len: u64) -> Self {
        self.exact_length = Some(len);
        self
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn email(mut self) -> Self {
        self.format = StringFormat::Email;
        self
    }

    pub fn uuid(mut self) -> Self {
        self.format = StringFormat::Uuid;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumberRule {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumberRule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

/// Constraint on a single payload field
#[derive(Debug, Clone)]
pub enum FieldRule {
    String(StringRule),
    Number(NumberRule),
    Boolean { required: bool },
    Object { required: bool },
}

impl FieldRule {
    pub fn is_required(&self) -> bool {
        match self {
            Self::String(rule) => rule.required,
            Self::Number(rule) => rule.required,
            Self::Boolean { required } | Self::Object { required } => *required,
        }
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "a string",
            Self::Number(_) => "a number",
            Self::Boolean { .. } => "a boolean",
            Self::Object { .. } => "an object",
        }
    }
}

impl From<StringRule> for FieldRule {
    fn from(rule: StringRule) -> Self {
        Self::String(rule)
    }
}

impl From<NumberRule> for FieldRule {
    fn from(rule: NumberRule) -> Self {
        Self::Number(rule)
    }
}

/// Ordered field rules, checked in insertion order
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(&'static str, FieldRule)>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, rule: impl Into<FieldRule>) -> Self {
        self.fields.push((name, rule.into()));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldRule)> {
        self.fields.iter().map(|(name, rule)| (*name, rule))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
