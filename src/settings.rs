use crate::settings_list::get_settings_list;
use json::JsonValue;
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Json value type
#[derive(Clone, Copy, PartialEq)]
pub enum JsonValueType {
    Str,
    Number,
    Boolean,
    Object,
    Array,
}

impl JsonValueType {
    pub fn to_str(&self) -> &'static str {
        match self {
            JsonValueType::Str => "String",
            JsonValueType::Number => "Number",
            JsonValueType::Boolean => "Boolean",
            JsonValueType::Object => "Object",
            JsonValueType::Array => "Array",
        }
    }
}

impl Debug for JsonValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl Display for JsonValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// An callback to check if a json value is valid
pub type SettingDesCallback = fn(obj: &JsonValue) -> bool;

/// An object to describe a setting
#[derive(Clone)]
pub struct SettingDes {
    /// The name of the setting
    _name: String,
    /// The description of the setting
    _description: String,
    /// The type of the setting
    _type: JsonValueType,
    /// The callback function of the setting
    _fun: Option<SettingDesCallback>,
}

impl SettingDes {
    /// Create a new setting description.
    ///
    /// Returns [None] if `typ` is an array or object but `callback` is not provided.
    pub fn new(
        name: &str,
        description: &str,
        typ: JsonValueType,
        callback: Option<SettingDesCallback>,
    ) -> Option<SettingDes> {
        if (typ == JsonValueType::Array || typ == JsonValueType::Object) && callback.is_none() {
            return None;
        }
        Some(SettingDes {
            _name: String::from(name),
            _description: String::from(description),
            _type: typ,
            _fun: callback,
        })
    }

    pub fn name(&self) -> &str {
        self._name.as_str()
    }

    pub fn description(&self) -> &str {
        self._description.as_str()
    }

    pub fn type_name(&self) -> &'static str {
        self._type.to_str()
    }

    /// Check if a value is valid
    pub fn is_vaild_value(&self, value: &JsonValue) -> bool {
        let type_matched = match self._type {
            JsonValueType::Array => value.is_array(),
            JsonValueType::Boolean => value.is_boolean(),
            JsonValueType::Number => value.is_number(),
            JsonValueType::Object => value.is_object(),
            JsonValueType::Str => value.is_string(),
        };
        if !type_matched {
            return false;
        }
        match self._fun {
            Some(fun) => fun(value),
            None => true,
        }
    }
}

impl Debug for SettingDes {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "SettingDes {{ name: {}, description: {}, type: {} }}",
            self._name, self._description, self._type
        )
    }
}

/// Store a list of settings
#[derive(Clone, Debug)]
pub struct SettingDesStore {
    list: Vec<SettingDes>,
}

impl SettingDesStore {
    pub fn new(list: Vec<SettingDes>) -> SettingDesStore {
        SettingDesStore { list }
    }

    /// Returns [None] if the key is unknown.
    pub fn check_valid(&self, key: &str, value: &JsonValue) -> Option<bool> {
        self.list
            .iter()
            .find(|i| i.name() == key)
            .map(|i| i.is_vaild_value(value))
    }

    pub fn help(&self) -> String {
        let mut s = String::new();
        for i in self.list.iter() {
            let mut t = format!("{}: {}", i.name(), i.type_name());
            if t.len() >= 24 {
                t += "\t";
            } else {
                t += " ".repeat(24 - t.len()).as_str();
            }
            t += i.description();
            if !s.is_empty() {
                s += "\n";
            }
            s += t.as_str();
        }
        s
    }

    pub fn print_help(&self) {
        println!("{}", self.help());
    }
}

impl Default for SettingDesStore {
    fn default() -> Self {
        Self {
            list: get_settings_list(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SettingJar {
    pub settings: HashMap<String, JsonValue>,
}

impl SettingJar {
    pub fn new() -> SettingJar {
        SettingJar {
            settings: HashMap::new(),
        }
    }

    pub fn add(&mut self, key: &str, opt: JsonValue) {
        self.settings.insert(String::from(key), opt);
    }

    pub fn clear(&mut self) {
        self.settings.clear();
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.settings.get(key)
    }

    #[cfg(test)]
    pub fn have(&self, key: &str) -> bool {
        self.settings.contains_key(key)
    }

    pub fn to_json(&self) -> JsonValue {
        let mut v = JsonValue::new_object();
        for (key, val) in self.settings.iter() {
            v[key.as_str()] = val.clone();
        }
        v
    }
}

#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum SettingError {
    #[display(fmt = "Can not access settings file: {}", _0)]
    IOError(std::io::Error),
    #[display(fmt = "Can not parse settings file: {}", _0)]
    JSONError(json::Error),
    #[display(fmt = "Settings file is empty.")]
    #[from(ignore)]
    Empty,
    #[display(fmt = "Unknown settings file.")]
    #[from(ignore)]
    NotObject,
    #[display(
        fmt = "\"{}\" is invalid, you can use \"movigo config fix\" to remove all invalid value.",
        _0
    )]
    #[from(ignore)]
    InvalidValue(String),
}

impl std::error::Error for SettingError {}

#[derive(Clone, Debug)]
pub struct SettingStore {
    pub basic: SettingDesStore,
    pub data: SettingJar,
}

impl SettingStore {
    pub fn new(list: Vec<SettingDes>) -> Self {
        Self {
            basic: SettingDesStore::new(list),
            data: SettingJar::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.data.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.data.get(key).and_then(|obj| obj.as_bool())
    }

    pub fn get_str(&self, key: &str) -> Option<String> {
        self.data
            .get(key)
            .and_then(|obj| obj.as_str())
            .map(|s| s.to_owned())
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.data.get(key).and_then(|obj| obj.as_u64())
    }

    #[cfg(test)]
    pub fn have(&self, key: &str) -> bool {
        self.data.have(key)
    }

    /// Parse settings from text.
    /// * `fix_invalid` - Drop invalid values instead of failing.
    pub fn read_str(&mut self, s: &str, fix_invalid: bool) -> Result<(), SettingError> {
        self.data.clear();
        if s.trim().is_empty() {
            return if fix_invalid {
                Ok(())
            } else {
                Err(SettingError::Empty)
            };
        }
        let obj = match json::parse(s) {
            Ok(obj) => obj,
            Err(e) => {
                return if fix_invalid { Ok(()) } else { Err(e.into()) };
            }
        };
        if !obj.is_object() {
            return if fix_invalid {
                Ok(())
            } else {
                Err(SettingError::NotObject)
            };
        }
        for (key, o) in obj.entries() {
            match self.basic.check_valid(key, o) {
                Some(false) => {
                    if !fix_invalid {
                        self.data.clear();
                        return Err(SettingError::InvalidValue(key.to_owned()));
                    }
                    log::warn!("Removed invalid setting: {}", key);
                }
                _ => {
                    self.data.add(key, o.clone());
                }
            }
        }
        Ok(())
    }

    pub fn read<P: AsRef<Path> + ?Sized>(
        &mut self,
        file_name: &P,
        fix_invalid: bool,
    ) -> Result<(), SettingError> {
        self.data.clear();
        let mut f = File::open(file_name)?;
        let mut s = String::new();
        f.read_to_string(&mut s)?;
        self.read_str(&s, fix_invalid)
    }

    pub fn save<P: AsRef<Path> + ?Sized>(&self, file_name: &P) -> Result<(), SettingError> {
        let s = self.data.to_json().pretty(2);
        let mut f = File::create(file_name)?;
        f.write_all(s.as_bytes())?;
        f.flush()?;
        Ok(())
    }
}

impl Default for SettingStore {
    fn default() -> Self {
        Self::new(get_settings_list())
    }
}
