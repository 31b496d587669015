//! Default scalar conversion service.

use graphwire_domain::{PropertyValue, ValueKind};

use crate::infrastructure::ports::{ConversionError, ConversionService};

/// Coerces between the scalar property kinds.
///
/// Nulls pass through to any kind. Strings parse into numbers and booleans;
/// every scalar renders to a string. Floats only narrow to integers when no
/// fraction is lost.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultConversionService;

impl DefaultConversionService {
    pub fn new() -> Self {
        Self
    }
}

impl ConversionService for DefaultConversionService {
    fn can_convert(&self, from: ValueKind, to: ValueKind) -> bool {
        use ValueKind::*;
        if from == to || from == Null {
            return true;
        }
        matches!(
            (from, to),
            (Bool | Int | Float, String)
                | (String, Bool | Int | Float)
                | (Int, Float)
                | (Float, Int)
        )
    }

    fn convert(&self, value: PropertyValue, to: ValueKind) -> Result<PropertyValue, ConversionError> {
        let from = value.kind();
        if !self.can_convert(from, to) {
            return Err(ConversionError::Unsupported { from, to });
        }
        if from == to || from == ValueKind::Null {
            return Ok(value);
        }

        let invalid = |value: &PropertyValue| ConversionError::Invalid {
            value: value.to_string(),
            to,
        };

        let converted = match (&value, to) {
            (PropertyValue::Bool(b), ValueKind::String) => PropertyValue::String(b.to_string()),
            (PropertyValue::Int(i), ValueKind::String) => PropertyValue::String(i.to_string()),
            (PropertyValue::Float(x), ValueKind::String) => PropertyValue::String(x.to_string()),
            (PropertyValue::Int(i), ValueKind::Float) => PropertyValue::Float(*i as f64),
            (PropertyValue::Float(x), ValueKind::Int) => {
                if x.fract() != 0.0 || !x.is_finite() || x.abs() > i64::MAX as f64 {
                    return Err(invalid(&value));
                }
                PropertyValue::Int(*x as i64)
            }
            (PropertyValue::String(s), ValueKind::Int) => {
                PropertyValue::Int(s.trim().parse().map_err(|_| invalid(&value))?)
            }
            (PropertyValue::String(s), ValueKind::Float) => {
                PropertyValue::Float(s.trim().parse().map_err(|_| invalid(&value))?)
            }
            (PropertyValue::String(s), ValueKind::Bool) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => PropertyValue::Bool(true),
                "false" => PropertyValue::Bool(false),
                _ => return Err(invalid(&value)),
            },
            _ => return Err(ConversionError::Unsupported { from, to }),
        };
        Ok(converted)
    }

    fn describe(&self) -> String {
        "DefaultConversionService".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_and_null_pass_through() {
        let service = DefaultConversionService::new();
        assert_eq!(
            service.convert(PropertyValue::Int(4), ValueKind::Int),
            Ok(PropertyValue::Int(4))
        );
        assert_eq!(
            service.convert(PropertyValue::Null, ValueKind::String),
            Ok(PropertyValue::Null)
        );
    }

    #[test]
    fn parses_strings() {
        let service = DefaultConversionService::new();
        assert_eq!(
            service.convert("42".into(), ValueKind::Int),
            Ok(PropertyValue::Int(42))
        );
        assert_eq!(
            service.convert(" TRUE ".into(), ValueKind::Bool),
            Ok(PropertyValue::Bool(true))
        );
        assert!(matches!(
            service.convert("forty".into(), ValueKind::Int),
            Err(ConversionError::Invalid { .. })
        ));
    }

    #[test]
    fn float_narrowing_requires_whole_number() {
        let service = DefaultConversionService::new();
        assert_eq!(
            service.convert(PropertyValue::Float(3.0), ValueKind::Int),
            Ok(PropertyValue::Int(3))
        );
        assert!(service
            .convert(PropertyValue::Float(3.5), ValueKind::Int)
            .is_err());
    }

    #[test]
    fn lists_do_not_coerce_to_scalars() {
        let service = DefaultConversionService::new();
        assert!(!service.can_convert(ValueKind::List, ValueKind::String));
        assert_eq!(
            service.convert(PropertyValue::from(vec![1i64]), ValueKind::Int),
            Err(ConversionError::Unsupported {
                from: ValueKind::List,
                to: ValueKind::Int
            })
        );
    }
}
