use super::super::version::VERSION;
use super::UnitTestContext;
use crate::error::MovigoError;

pub async fn test(ctx: &UnitTestContext) -> Result<(), MovigoError> {
    let (status, res) = ctx.get_json("/version").await?;
    assert_eq!(status, 200);
    assert_eq!(res, json::object! {"version": VERSION.to_vec()});
    let (_, res) = ctx.get_json("/api/version").await?;
    assert_eq!(res, json::object! {"version": VERSION.to_vec()});
    Ok(())
}
