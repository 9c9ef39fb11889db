//! Payload validation against a [`Schema`]

use account_core::{generate_error, ErrorKind, ErrorValue};
use serde_json::Value;
use validator::{ValidateEmail, ValidateLength};

use super::rules::{FieldRule, NumberRule, Schema, StringFormat, StringRule};
use crate::protocol::Payload;

/// Check a payload, reporting the first problem found
///
/// Missing required fields are reported before any per-field rule runs.
/// Fields without a rule are ignored, as are absent optional ones.
pub fn validate(payload: &Payload, required: &[&str], schema: &Schema) -> Result<(), ErrorValue> {
    if let Some(missing) = required.iter().find(|field| !payload.contains_key(**field)) {
        return Err(generate_error(
            ErrorKind::MissingArguments,
            Some(&format!("Missing argument: {missing}")),
        ));
    }

    for (field, rule) in schema.iter() {
        check_field(field, payload.get(field), rule)?;
    }

    Ok(())
}

fn check_field(field: &str, value: Option<&Value>, rule: &FieldRule) -> Result<(), ErrorValue> {
    let value = match value {
        None | Some(Value::Null) => {
            return if rule.is_required() {
                Err(required_error(field, format_kind(rule)))
            } else {
                Ok(())
            };
        }
        Some(value) => value,
    };

    match (rule, value) {
        (FieldRule::String(rule), Value::String(s)) => check_string(field, s, rule),
        (FieldRule::Number(rule), Value::Number(n)) => check_number(field, n.as_f64(), rule),
        (FieldRule::Boolean { .. }, Value::Bool(_)) => Ok(()),
        (FieldRule::Object { required }, Value::Object(map)) => {
            if *required && map.is_empty() {
                Err(required_error(field, None))
            } else {
                Ok(())
            }
        }
        (rule, _) => Err(generate_error(
            mismatch_kind(rule),
            Some(&format!("The {field} field must be {}", rule.type_name())),
        )),
    }
}

fn check_string(field: &str, value: &str, rule: &StringRule) -> Result<(), ErrorValue> {
    if value.is_empty() {
        return if rule.required {
            Err(required_error(field, string_format_kind(rule.format)))
        } else {
            Ok(())
        };
    }

    if (rule.min_length.is_some() || rule.max_length.is_some())
        && !value.validate_length(rule.min_length, rule.max_length, None)
    {
        return Err(generate_error(
            ErrorKind::Length,
            Some(&length_message(field, rule.min_length, rule.max_length)),
        ));
    }

    if let Some(exact) = rule.exact_length {
        if !value.validate_length(None, None, Some(exact)) {
            return Err(generate_error(
                ErrorKind::ExactLength,
                Some(&format!("The {field} must be exactly {exact} characters long")),
            ));
        }
    }

    if let Some(pattern) = &rule.pattern {
        if !pattern.is_match(value) {
            return Err(generate_error(
                ErrorKind::InvalidRegex,
                Some(&format!("The {field} has an invalid format")),
            ));
        }
    }

    match rule.format {
        StringFormat::Plain => Ok(()),
        StringFormat::Email if value.validate_email() => Ok(()),
        StringFormat::Email => Err(generate_error(
            ErrorKind::RequiredEmail,
            Some(&format!("The {field} must be a valid email address")),
        )),
        StringFormat::Uuid if is_hyphenated_uuid(value) => Ok(()),
        StringFormat::Uuid => Err(generate_error(
            ErrorKind::RequiredUuid,
            Some(&format!("The {field} must be a valid UUID")),
        )),
    }
}

fn check_number(field: &str, value: Option<f64>, rule: &NumberRule) -> Result<(), ErrorValue> {
    let Some(value) = value else {
        return Err(generate_error(
            ErrorKind::Unknown,
            Some(&format!("The {field} field must be a number")),
        ));
    };

    let below = rule.min.is_some_and(|min| value < min);
    let above = rule.max.is_some_and(|max| value > max);
    if below || above {
        let message = match (rule.min, rule.max) {
            (Some(min), Some(max)) => format!("The {field} must be between {min} and {max}"),
            (Some(min), None) => format!("The {field} must be at least {min}"),
            _ => format!("The {field} must be at most {}", rule.max.unwrap_or_default()),
        };
        return Err(generate_error(ErrorKind::Length, Some(&message)));
    }

    Ok(())
}

fn is_hyphenated_uuid(value: &str) -> bool {
    value.len() == uuid::fmt::Hyphenated::LENGTH && uuid::Uuid::parse_str(value).is_ok()
}

fn string_format_kind(format: StringFormat) -> Option<ErrorKind> {
    match format {
        StringFormat::Plain => None,
        StringFormat::Email => Some(ErrorKind::RequiredEmail),
        StringFormat::Uuid => Some(ErrorKind::RequiredUuid),
    }
}

fn format_kind(rule: &FieldRule) -> Option<ErrorKind> {
    match rule {
        FieldRule::String(rule) => string_format_kind(rule.format),
        _ => None,
    }
}

fn mismatch_kind(rule: &FieldRule) -> ErrorKind {
    format_kind(rule).unwrap_or(ErrorKind::Unknown)
}

fn required_error(field: &str, kind: Option<ErrorKind>) -> ErrorValue {
    let kind = kind.unwrap_or(ErrorKind::Required);
    generate_error(kind, Some(&format!("The {field} field is required")))
}

fn length_message(field: &str, min: Option<u64>, max: Option<u64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => {
            format!("The {field} must be between {min} and {max} characters long")
        }
        (Some(min), None) => format!("The {field} must be at least {min} characters long"),
        (None, Some(max)) => format!("The {field} must be at most {max} characters long"),
        (None, None) => format!("The {field} has an invalid length"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::account_schema;
    use crate::test_support::payload;
    use regex::Regex;
    use serde_json::json;

    fn kind_of(result: Result<(), ErrorValue>) -> ErrorKind {
        result.unwrap_err().kind
    }

    #[test]
    fn test_valid_payload() {
        let data = payload(json!({"email": "someone@example.com", "password": "password123"}));
        assert!(validate(&data, &["email", "password"], &account_schema()).is_ok());
    }

    #[test]
    fn test_missing_argument_comes_first() {
        // password is too short too, but the missing email wins
        let data = payload(json!({"password": "x"}));
        let err = validate(&data, &["email", "password"], &account_schema()).unwrap_err();

        assert_eq!(err.kind, ErrorKind::MissingArguments);
        assert!(err.message.contains("email"));
    }

    #[test]
    fn test_length_bounds() {
        let schema = account_schema();
        let short = payload(json!({"email": "someone@example.com", "password": "1234567"}));
        let long = payload(json!({"email": "someone@example.com", "password": "a".repeat(91)}));
        let edge = payload(json!({"email": "someone@example.com", "password": "a".repeat(90)}));

        assert_eq!(kind_of(validate(&short, &[], &schema)), ErrorKind::Length);
        assert_eq!(kind_of(validate(&long, &[], &schema)), ErrorKind::Length);
        assert!(validate(&edge, &[], &schema).is_ok());
    }

    #[test]
    fn test_email_length_bounds() {
        let schema = account_schema();
        let shortest = payload(json!({"email": "a@b.com", "password": "password123"}));
        let too_short = payload(json!({"email": "a@b.c", "password": "password123"}));
        let too_long = payload(json!({
            "email": format!("{}@example.com", "a".repeat(110)),
            "password": "password123"
        }));

        assert!(validate(&shortest, &["email", "password"], &schema).is_ok());
        assert_eq!(kind_of(validate(&too_short, &[], &schema)), ErrorKind::Length);
        assert_eq!(kind_of(validate(&too_long, &[], &schema)), ErrorKind::Length);
    }

    #[test]
    fn test_length_counts_characters() {
        let schema = Schema::new().field("name", StringRule::new().length(1, 3));
        let data = payload(json!({"name": "日本語"}));

        assert!(validate(&data, &[], &schema).is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let data = payload(json!({"email": "not-an-email-at-all", "password": "password123"}));
        let err = validate(&data, &[], &account_schema()).unwrap_err();

        assert_eq!(err.kind, ErrorKind::RequiredEmail);
    }

    #[test]
    fn test_empty_required_email() {
        let data = payload(json!({"email": "", "password": "password123"}));
        assert_eq!(
            kind_of(validate(&data, &[], &account_schema())),
            ErrorKind::RequiredEmail
        );
    }

    #[test]
    fn test_empty_required_plain_string() {
        let schema = Schema::new().field("name", StringRule::new().required());
        let data = payload(json!({"name": ""}));

        assert_eq!(kind_of(validate(&data, &[], &schema)), ErrorKind::Required);
    }

    #[test]
    fn test_type_mismatch() {
        let schema = Schema::new().field("name", StringRule::new().required());
        let data = payload(json!({"name": 42}));

        assert_eq!(kind_of(validate(&data, &[], &schema)), ErrorKind::Unknown);
    }

    #[test]
    fn test_exact_length_and_uuid() {
        let schema = Schema::new().field(
            "profileId",
            StringRule::new().required().exact_length(36).uuid(),
        );

        let ok = payload(json!({"profileId": "67e55044-10b1-426f-9247-bb680e5fe0c8"}));
        let short = payload(json!({"profileId": "67e55044"}));
        let bad = payload(json!({"profileId": "zze55044-10b1-426f-9247-bb680e5fe0c8"}));

        assert!(validate(&ok, &[], &schema).is_ok());
        assert_eq!(kind_of(validate(&short, &[], &schema)), ErrorKind::ExactLength);
        assert_eq!(kind_of(validate(&bad, &[], &schema)), ErrorKind::RequiredUuid);
    }

    #[test]
    fn test_regex() {
        let schema = Schema::new().field(
            "token",
            StringRule::new()
                .required()
                .pattern(Regex::new(r"^[a-z]+\.[a-z]+$").unwrap()),
        );

        let ok = payload(json!({"token": "abc.def"}));
        let bad = payload(json!({"token": "abc def"}));

        assert!(validate(&ok, &[], &schema).is_ok());
        assert_eq!(kind_of(validate(&bad, &[], &schema)), ErrorKind::InvalidRegex);
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let schema = Schema::new()
            .field("nickname", StringRule::new().length(2, 10))
            .field("age", NumberRule::new().range(0.0, 150.0));

        assert!(validate(&Payload::new(), &[], &schema).is_ok());
        assert!(validate(&payload(json!({"nickname": null})), &[], &schema).is_ok());
    }

    #[test]
    fn test_number_range() {
        let schema = Schema::new().field("age", NumberRule::new().required().range(0.0, 150.0));

        assert!(validate(&payload(json!({"age": 30})), &[], &schema).is_ok());
        assert_eq!(
            kind_of(validate(&payload(json!({"age": 200})), &[], &schema)),
            ErrorKind::Length
        );
        assert_eq!(
            kind_of(validate(&payload(json!({"age": "30"})), &[], &schema)),
            ErrorKind::Unknown
        );
    }

    #[test]
    fn test_boolean_and_object() {
        let schema = Schema::new()
            .field("flag", FieldRule::Boolean { required: true })
            .field("settings", FieldRule::Object { required: true });

        let ok = payload(json!({"flag": false, "settings": {"a": 1}}));
        let empty = payload(json!({"flag": true, "settings": {}}));
        let wrong = payload(json!({"flag": "yes", "settings": {"a": 1}}));

        assert!(validate(&ok, &[], &schema).is_ok());
        assert_eq!(kind_of(validate(&empty, &[], &schema)), ErrorKind::Required);
        assert_eq!(kind_of(validate(&wrong, &[], &schema)), ErrorKind::Unknown);
    }

    #[test]
    fn test_unlisted_fields_are_ignored() {
        let data = payload(json!({
            "email": "someone@example.com",
            "password": "password123",
            "extra": [1, 2, 3]
        }));

        assert!(validate(&data, &["email", "password"], &account_schema()).is_ok());
    }
}
