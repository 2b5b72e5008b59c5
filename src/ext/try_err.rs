use crate::server::result::JSONError;

/// Try with custom error message
pub trait TryErr<T, E> {
    /// try with custom error message
    fn try_err(self, err: E) -> Result<T, E>;
}

/// A quick way to return detailed JSON error
pub trait TryErr3<T> {
    /// A quick way to return detailed JSON error
    /// * `code` - error code
    /// * `msg` - error message
    fn try_err3<S: AsRef<str> + ?Sized>(self, code: i32, msg: &S) -> Result<T, JSONError>;
}

impl<T, E> TryErr<T, E> for Option<T> {
    fn try_err(self, err: E) -> Result<T, E> {
        match self {
            Some(v) => Ok(v),
            None => Err(err),
        }
    }
}

impl<T, E, E2> TryErr<T, E> for Result<T, E2> {
    fn try_err(self, err: E) -> Result<T, E> {
        match self {
            Ok(v) => Ok(v),
            Err(_) => Err(err),
        }
    }
}

impl<T, E> TryErr3<T> for Result<T, E>
where
    E: std::fmt::Debug + std::fmt::Display,
{
    fn try_err3<S: AsRef<str> + ?Sized>(self, code: i32, msg: &S) -> Result<T, JSONError> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(JSONError::from((
                code,
                format!("{} {}", msg.as_ref(), e),
                format!("{:?}", e),
            ))),
        }
    }
}

impl<T> TryErr3<T> for Option<T> {
    fn try_err3<S: AsRef<str> + ?Sized>(self, code: i32, msg: &S) -> Result<T, JSONError> {
        match self {
            Some(v) => Ok(v),
            None => Err(JSONError::from((code, msg.as_ref().to_string(), None))),
        }
    }
}

#[test]
fn test_try_err() {
    assert_eq!(Some(1).try_err("none"), Ok(1));
    assert_eq!(None::<i32>.try_err("none"), Err("none"));
    assert_eq!("12".parse::<i32>().try_err(-1), Ok(12));
    assert_eq!("x".parse::<i32>().try_err(-1), Err(-1));
    let e = "x".parse::<i64>().try_err3(-400, "Invalid id:").unwrap_err();
    assert_eq!(e.code, -400);
    assert!(e.msg.starts_with("Invalid id: "));
    assert!(e.debug_msg.is_some());
    let e = None::<u8>.try_err3(-404, "Not found.").unwrap_err();
    assert_eq!(e.msg, "Not found.");
    assert!(e.debug_msg.is_none());
}
