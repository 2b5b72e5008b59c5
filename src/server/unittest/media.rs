use super::{UnitTestContext, ALLOWED_ORIGIN};
use crate::error::MovigoError;
use crate::ext::json::FromJson;
use crate::server::result::JSONResult;
use hyper::header::{ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN};
use hyper::{Body, Method, Request};
use std::net::SocketAddr;

pub async fn test(ctx: &UnitTestContext) -> Result<(), MovigoError> {
    let (status, re) = ctx.get_json("/tv/95557").await?;
    assert_eq!(status, 200);
    let result = JSONResult::from_json(&re)?.expect("Failed to get tv show:");
    assert_eq!(result["name"], "Invincible");
    assert_eq!(
        result["production_companies"][0]["name"],
        "Skybound Entertainment"
    );
    let (status, re) = ctx.get_json("/api/movie/603?summary=1").await?;
    assert_eq!(status, 200);
    let result = JSONResult::from_json(&re)?.expect("Failed to get movie:");
    assert_eq!(result["title"], "The Matrix");
    assert_eq!(result["runtime"], 136);
    assert_eq!(result["genres"][0], "Action");
    assert!(result.has_key("tagline"));
    assert!(result["tagline"].is_null());
    let (status, re) = ctx.get_json("/person/6384/").await?;
    assert_eq!(status, 200);
    let result = JSONResult::from_json(&re)?.expect("Failed to get person:");
    assert_eq!(result["name"], "Keanu Reeves");

    let (status, re) = ctx.get_json("/album/1").await?;
    assert_eq!(status, 400);
    let err = JSONResult::from_json(&re)?.unwrap_err();
    assert_eq!(err.code, -400);
    assert_eq!(err.msg, "invalid content type");
    for uri in ["/tv/abc", "/tv/0", "/tv/-5", "/tv/1.5"] {
        let (status, re) = ctx.get_json(uri).await?;
        assert_eq!(status, 400, "{}", uri);
        let err = JSONResult::from_json(&re)?.unwrap_err();
        assert_eq!(err.code, -400);
        assert!(err.msg.starts_with("Invalid id"), "{}", err.msg);
    }

    let (status, re) = ctx.get_json("/movie/999").await?;
    assert_eq!(status, 404);
    let err = JSONResult::from_json(&re)?.unwrap_err();
    assert_eq!(err.code, -404);
    assert!(err.msg.contains("could not be found"));
    let (status, re) = ctx.get_json("/movie/500").await?;
    assert_eq!(status, 502);
    assert_eq!(JSONResult::from_json(&re)?.unwrap_err().code, -502);

    let (status, re) = ctx.get_json("/a/b/c").await?;
    assert_eq!(status, 404);
    assert_eq!(JSONResult::from_json(&re)?.unwrap_err().code, -404);
    Ok(())
}

pub async fn test_cors(ctx: &UnitTestContext) -> Result<(), MovigoError> {
    let req = Request::builder()
        .uri("/tv/95557")
        .header(ORIGIN, ALLOWED_ORIGIN)
        .body(Body::empty())?;
    let res = ctx.request(req).await?;
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], ALLOWED_ORIGIN);
    let req = Request::builder()
        .uri("/tv/95557")
        .header(ORIGIN, "http://evil.test")
        .body(Body::empty())?;
    assert_eq!(ctx.request(req).await?.status(), 403);
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/movie/603")
        .header(ORIGIN, ALLOWED_ORIGIN)
        .body(Body::empty())?;
    let res = ctx.request(req).await?;
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()[ACCESS_CONTROL_ALLOW_METHODS], "GET, OPTIONS");
    let req = Request::builder()
        .method(Method::POST)
        .uri("/movie/603")
        .body(Body::empty())?;
    let res = ctx.request(req).await?;
    assert_eq!(res.status(), 405);
    assert_eq!(res.headers()["Allow"], "GET, OPTIONS");
    Ok(())
}

pub async fn test_bad_api_key(tmdb: SocketAddr) -> Result<(), MovigoError> {
    let ctx = UnitTestContext::new(tmdb, "wrong-key");
    let (status, re) = ctx.get_json("/tv/95557").await?;
    assert_eq!(status, 502);
    let err = JSONResult::from_json(&re)?.unwrap_err();
    assert_eq!(err.code, -502);
    assert!(err.msg.contains("Invalid API key"));
    Ok(())
}

/// TMDB is down: the error must not expose the API key.
pub async fn test_unreachable_tmdb() -> Result<(), MovigoError> {
    let closed = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        listener.local_addr()?
    };
    let key = "unreachable-secret-key";
    let ctx = UnitTestContext::new(closed, key);
    let (status, re) = ctx.get_json("/tv/95557").await?;
    assert_eq!(status, 502);
    assert!(!re.dump().contains(key), "{}", re.dump());
    let err = JSONResult::from_json(&re)?.unwrap_err();
    assert_eq!(err.code, -502);
    Ok(())
}
