use crate::date;

/// Key of the one-entry dictionary that stands in for a UID.
pub const UID_KEY: &str = "CF$UID";

/// A decoded property-list value.
///
/// This is the whole data model of a binary plist. Containers own their
/// children outright; nothing in a `Value` borrows from the source buffer.
///
/// ```text
/// ┌────────────┬────────┬──────────────────────────────────────────┐
/// │ Variant    │ Marker │ Notes                                    │
/// ├────────────┼────────┼──────────────────────────────────────────┤
/// │ Null       │ 0x00   │                                          │
/// │ Bool       │ 0x08/9 │                                          │
/// │ Int        │ 0x1n   │ < 8 bytes: unsigned; 8 bytes: signed     │
/// │ Real       │ 0x2n   │ f32 widened to f64                       │
/// │ Date       │ 0x33   │ seconds since 2001-01-01T00:00:00Z       │
/// │ Data       │ 0x4n   │                                          │
/// │ String     │ 0x5n/6n│ ASCII or UTF-16BE on the wire            │
/// │ (UID)      │ 0x8n   │ Dictionary {"CF$UID": n}                 │
/// │ Array      │ 0xAn   │                                          │
/// │ Dictionary │ 0xDn   │ ordered pairs, any key type, no dedup    │
/// └────────────┴────────┴──────────────────────────────────────────┘
/// ```
///
/// UIDs have no variant of their own. They decode to the same
/// `{"CF$UID": n}` shape the XML and OpenStep formats write; use
/// [`Value::as_uid`] to recognise them.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
  Null,
  Bool(bool),
  Int(i64),
  Real(f64),
  Date(f64),
  Data(Vec<u8>),
  String(String),
  Array(Vec<Value>),
  /// Pairs in table order. Keys need not be strings and may repeat.
  Dictionary(Vec<(Value, Value)>),
}

impl Value {
  /// Build the `{"CF$UID": n}` dictionary for a UID.
  ///
  /// The count is stored bit-for-bit in an `Int`, so values above
  /// `i64::MAX` appear negative; [`Value::as_uid`] reverses this.
  #[allow(clippy::cast_possible_wrap)]
  pub fn uid(n: u64) -> Self {
    Self::Dictionary(vec![(
      Self::String(UID_KEY.to_string()),
      Self::Int(n as i64),
    )])
  }

  /// The UID number if this is exactly a one-entry `{"CF$UID": int}` dictionary.
  #[allow(clippy::cast_sign_loss)]
  pub fn as_uid(&self) -> Option<u64> {
    match self {
      Self::Dictionary(pairs) => match pairs.as_slice() {
        [(Self::String(key), Self::Int(n))] if key == UID_KEY => Some(*n as u64),
        _ => None,
      },
      _ => None,
    }
  }

  /// Lowercase name of the variant, with UIDs reported as `"uid"`.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::Null => "null",
      Self::Bool(_) => "bool",
      Self::Int(_) => "int",
      Self::Real(_) => "real",
      Self::Date(_) => "date",
      Self::Data(_) => "data",
      Self::String(_) => "string",
      Self::Array(_) => "array",
      Self::Dictionary(_) if self.as_uid().is_some() => "uid",
      Self::Dictionary(_) => "dictionary",
    }
  }

  pub fn is_null(&self) -> bool {
    matches!(self, Self::Null)
  }

  pub fn as_bool(&self) -> Option<bool> {
    match self {
      Self::Bool(b) => Some(*b),
      _ => None,
    }
  }

  pub fn as_i64(&self) -> Option<i64> {
    match self {
      Self::Int(n) => Some(*n),
      _ => None,
    }
  }

  /// Reals as-is; integers are converted (possibly losing precision).
  #[allow(clippy::cast_precision_loss)]
  pub fn as_f64(&self) -> Option<f64> {
    match self {
      Self::Real(r) => Some(*r),
      Self::Int(n) => Some(*n as f64),
      _ => None,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::String(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_data(&self) -> Option<&[u8]> {
    match self {
      Self::Data(d) => Some(d),
      _ => None,
    }
  }

  pub fn as_array(&self) -> Option<&[Value]> {
    match self {
      Self::Array(items) => Some(items),
      _ => None,
    }
  }

  pub fn as_dictionary(&self) -> Option<&[(Value, Value)]> {
    match self {
      Self::Dictionary(pairs) => Some(pairs),
      _ => None,
    }
  }

  /// First value whose key is the string `key`.
  ///
  /// Returns `None` for non-dictionaries. Duplicate keys are kept in the
  /// tree, so only the earliest match is reachable through this lookup.
  pub fn get(&self, key: &str) -> Option<&Value> {
    self
      .as_dictionary()?
      .iter()
      .find(|(k, _)| k.as_str() == Some(key))
      .map(|(_, v)| v)
  }

  /// Date as seconds since the Unix epoch.
  pub fn date_to_unix_seconds(&self) -> Option<f64> {
    match self {
      Self::Date(secs) => Some(date::to_unix_seconds(*secs)),
      _ => None,
    }
  }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Self::Bool(b)
  }
}

impl From<i64> for Value {
  fn from(n: i64) -> Self {
    Self::Int(n)
  }
}

impl From<f64> for Value {
  fn from(r: f64) -> Self {
    Self::Real(r)
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Self::String(s.to_string())
  }
}

impl From<String> for Value {
  fn from(s: String) -> Self {
    Self::String(s)
  }
}

impl From<Vec<u8>> for Value {
  fn from(d: Vec<u8>) -> Self {
    Self::Data(d)
  }
}

impl From<Vec<Value>> for Value {
  fn from(items: Vec<Value>) -> Self {
    Self::Array(items)
  }
}
