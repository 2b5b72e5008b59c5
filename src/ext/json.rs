use json::JsonValue;

#[cfg(test)]
pub trait ToJson {
    fn to_json(&self) -> Option<JsonValue>;
}

#[cfg(test)]
impl ToJson for &str {
    fn to_json(&self) -> Option<JsonValue> {
        Some(JsonValue::String(String::from(*self)))
    }
}

#[cfg(test)]
impl ToJson for String {
    fn to_json(&self) -> Option<JsonValue> {
        Some(JsonValue::String(self.to_string()))
    }
}

#[cfg(test)]
impl ToJson for JsonValue {
    fn to_json(&self) -> Option<JsonValue> {
        Some(self.clone())
    }
}

#[cfg(test)]
impl<T: ToJson> ToJson for &T {
    fn to_json(&self) -> Option<JsonValue> {
        (*self).to_json()
    }
}

#[cfg(test)]
impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self) -> Option<JsonValue> {
        match self {
            Some(d) => d.to_json(),
            None => None,
        }
    }
}

/// Always produce a value
pub trait ToJson2 {
    fn to_json2(&self) -> JsonValue;
}

impl ToJson2 for str {
    fn to_json2(&self) -> JsonValue {
        JsonValue::String(self.to_owned())
    }
}

impl ToJson2 for String {
    fn to_json2(&self) -> JsonValue {
        JsonValue::String(self.clone())
    }
}

#[cfg(test)]
pub trait FromJson
where
    Self: Sized,
{
    type Err;
    fn from_json<T: ToJson>(v: T) -> Result<Self, Self::Err>;
}
