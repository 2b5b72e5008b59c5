#[cfg(test)]
use crate::ext::json::{FromJson, ToJson};
use crate::ext::json::ToJson2;
use json::JsonValue;

#[derive(Clone, Debug)]
/// Error information of a request
pub struct JSONError {
    /// Error code
    pub code: i32,
    /// Error message
    pub msg: String,
    /// The debug information of the error
    pub debug_msg: Option<JsonValue>,
}

impl JSONError {
    /// The HTTP status of a response carrying this error.
    ///
    /// Codes between -400 and -600 are HTTP status codes.
    pub fn status(&self) -> u16 {
        if self.code <= -400 && self.code >= -600 {
            (-self.code) as u16
        } else if self.code < 0 {
            500
        } else if self.code > 0 {
            400
        } else {
            200
        }
    }
}

impl From<(i32, String)> for JSONError {
    fn from((code, msg): (i32, String)) -> Self {
        Self {
            code,
            msg,
            debug_msg: None,
        }
    }
}

impl<S> From<(i32, &S)> for JSONError
where
    S: AsRef<str> + ?Sized,
{
    fn from((code, msg): (i32, &S)) -> Self {
        Self {
            code,
            msg: msg.as_ref().to_owned(),
            debug_msg: None,
        }
    }
}

impl From<(i32, String, Option<JsonValue>)> for JSONError {
    fn from((code, msg, debug_msg): (i32, String, Option<JsonValue>)) -> Self {
        Self {
            code,
            msg,
            debug_msg,
        }
    }
}

impl From<(i32, String, String)> for JSONError {
    fn from((code, msg, debug_msg): (i32, String, String)) -> Self {
        Self {
            code,
            msg,
            debug_msg: Some(debug_msg.to_json2()),
        }
    }
}

impl From<crate::error::MovigoError> for JSONError {
    fn from(e: crate::error::MovigoError) -> Self {
        let code = match &e {
            crate::error::MovigoError::Tmdb(e) if e.is_not_found() => -404,
            crate::error::MovigoError::Tmdb(_) | crate::error::MovigoError::ReqwestError(_) => {
                -502
            }
            _ => -500,
        };
        Self::from((code, format!("{}", e), format!("{:?}", e)))
    }
}

pub type JSONResult = Result<JsonValue, JSONError>;

impl ToJson2 for JSONResult {
    fn to_json2(&self) -> JsonValue {
        match self {
            Self::Ok(v) => json::object! {
                "ok": true,
                "code": 0,
                "result": v.clone(),
            },
            Self::Err(e) => json::object! {
                "ok": false,
                "code": e.code,
                "msg": e.msg.as_str(),
                "debug_msg": e.debug_msg.clone().unwrap_or(JsonValue::Null),
            },
        }
    }
}

#[cfg(test)]
impl FromJson for JSONResult {
    type Err = &'static str;
    fn from_json<T: ToJson>(v: T) -> Result<Self, <Self as FromJson>::Err> {
        let v = v.to_json().ok_or("Empty value.")?;
        match v["ok"].as_bool() {
            Some(true) => Ok(Ok(v["result"].clone())),
            Some(false) => {
                let code = v["code"].as_i32().ok_or("Error code is missing.")?;
                let msg = v["msg"].as_str().ok_or("Error message is missing.")?;
                let debug_msg = &v["debug_msg"];
                Ok(Err(JSONError {
                    code,
                    msg: msg.to_owned(),
                    debug_msg: if debug_msg.is_null() {
                        None
                    } else {
                        Some(debug_msg.clone())
                    },
                }))
            }
            None => Err("Not a result object."),
        }
    }
}

#[test]
fn test_json_result() {
    let re: JSONResult = Ok(json::object! {"id": 1});
    let v = re.to_json2();
    assert_eq!(v, json::object! {"ok": true, "code": 0, "result": {"id": 1}});
    let back = JSONResult::from_json(&v).unwrap().unwrap();
    assert_eq!(back["id"].as_u64(), Some(1));
    let re: JSONResult = Err(JSONError::from((-404, "Not found.")));
    let v = re.to_json2();
    assert_eq!(v["ok"], false);
    assert_eq!(v["code"], -404);
    assert!(v["debug_msg"].is_null());
    let back = JSONResult::from_json(v).unwrap().unwrap_err();
    assert_eq!(back.code, -404);
    assert_eq!(back.status(), 404);
    assert_eq!(JSONError::from((-1001, "db")).status(), 500);
    assert_eq!(JSONError::from((3, "bad")).status(), 400);
}
