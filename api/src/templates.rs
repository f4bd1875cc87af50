use std::collections::HashMap;

use common::formatting::{format_rfc3339, DateStyle};
use tera::{Tera, Value};

lazy_static::lazy_static! {
    pub static ref TEMPLATES: Tera = {
        let mut tera = match Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*.html")) {
            Ok(t) => t,
            Err(e) => {
                tracing::error!("Template parsing error: {}", e);
                std::process::exit(1);
            }
        };
        tera.register_filter("datetime", datetime_filter);
        tera
    };
}

/// `{{ show.start_time | datetime(format="full") }}`
///
/// Values that do not parse as RFC 3339 are passed through unchanged.
fn datetime_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let style = match args.get("format").and_then(Value::as_str) {
        Some(raw) => raw.parse::<DateStyle>().map_err(tera::Error::msg)?,
        None => DateStyle::default(),
    };

    let Some(raw) = value.as_str() else {
        return Ok(value.clone());
    };

    Ok(format_rfc3339(raw, style)
        .map(Value::String)
        .unwrap_or_else(|| value.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datetime_filter_medium_default() {
        let value = Value::String("2035-04-01T20:00:00Z".into());
        let out = datetime_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(out, Value::String("Sun 04, 01, 2035 8:00PM".into()));
    }

    #[test]
    fn test_datetime_filter_full() {
        let mut args = HashMap::new();
        args.insert("format".to_string(), Value::String("full".into()));
        let value = Value::String("2019-05-21T21:30:00Z".into());
        let out = datetime_filter(&value, &args).unwrap();
        assert_eq!(out, Value::String("Tuesday May, 21, 2019 at 9:30PM".into()));
    }

    #[test]
    fn test_datetime_filter_rejects_unknown_format() {
        let mut args = HashMap::new();
        args.insert("format".to_string(), Value::String("weird".into()));
        let value = Value::String("2019-05-21T21:30:00Z".into());
        assert!(datetime_filter(&value, &args).is_err());
    }

    #[test]
    fn test_datetime_filter_passes_through_garbage() {
        let value = Value::String("not a date".into());
        let out = datetime_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(out, value);
    }
}
