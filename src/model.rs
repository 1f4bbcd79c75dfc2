use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One observation in a product's price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub price: f64,
}

/// Price history as returned by the backend. The series is kept in the
/// order the backend sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub asin: String,
    pub history: Vec<PricePoint>,
}

impl PriceHistory {
    pub fn identifier(&self) -> &str {
        &self.asin
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.history.last()
    }

    pub fn lowest(&self) -> Option<&PricePoint> {
        self.history.iter().fold(None, |best: Option<&PricePoint>, p| match best {
            Some(b) if b.price <= p.price => Some(b),
            _ => Some(p),
        })
    }

    pub fn highest(&self) -> Option<&PricePoint> {
        self.history.iter().fold(None, |best: Option<&PricePoint>, p| match best {
            Some(b) if b.price >= p.price => Some(b),
            _ => Some(p),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryRequest<'a> {
    pub url: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRequest {
    pub asin: String,
    pub target_price: f64,
    pub email: String,
}

/// Error payload of a non-success backend response.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

impl ErrorBody {
    /// Human-readable message carried by the body, if any.
    ///
    /// Validation failures arrive as a list of objects with a `msg` field;
    /// those are joined into one line.
    pub fn message(&self) -> Option<String> {
        let message = match self.detail.as_ref()? {
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Object(obj) => {
                        obj.get("msg").and_then(Value::as_str).map(String::from)
                    }
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("; "),
            Value::Null => return None,
            other => other.to_string(),
        };

        if message.trim().is_empty() {
            None
        } else {
            Some(message)
        }
    }
}
