mod media;
mod version;

use super::context::ServerContext;
use super::cors::{CorsContext, CorsHost};
use super::route::ServerRoutes;
use super::service::MovigoSvc;
use crate::error::MovigoError;
use crate::tmdb::TmdbClient;
use hyper::server::Server;
use hyper::service::{make_service_fn, service_fn, Service};
use hyper::{Body, Request, Response};
use json::JsonValue;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

pub const API_KEY: &str = "test-api-key";
pub const ALLOWED_ORIGIN: &str = "http://127.0.0.1:3000";

fn fake_json(status: u16, body: JsonValue) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json;charset=utf-8")
        .body(Body::from(body.dump()))
        .unwrap()
}

/// Impersonates TMDB API v3
async fn fake_tmdb(req: Request<Body>) -> Result<Response<Body>, hyper::Error> {
    let params: HashMap<String, String> =
        url::form_urlencoded::parse(req.uri().query().unwrap_or("").as_bytes())
            .into_owned()
            .collect();
    if params.get("api_key").map(|k| k.as_str()) != Some(API_KEY) {
        return Ok(fake_json(
            401,
            json::object! {
                "success": false,
                "status_code": 7,
                "status_message": "Invalid API key: You must be granted a valid key.",
            },
        ));
    }
    if params.get("language").map(|k| k.as_str()) != Some("en-US") {
        return Ok(fake_json(400, JsonValue::Null));
    }
    Ok(match req.uri().path() {
        "/3/tv/95557" => fake_json(
            200,
            json::object! {
                "id": 95557,
                "name": "Invincible",
                "first_air_date": "2021-03-25",
                "in_production": true,
                "number_of_seasons": 2,
                "production_companies": [
                    {"id": 2, "name": "Skybound Entertainment", "logo_path": null, "origin_country": "US"}
                ],
                "next_episode_to_air": null,
            },
        ),
        "/3/movie/603" => fake_json(
            200,
            json::object! {
                "id": 603,
                "title": "The Matrix",
                "release_date": "1999-03-30",
                "runtime": 136,
                "genres": [{"id": 28, "name": "Action"}],
                "vote_average": 8.2,
            },
        ),
        "/3/person/6384" => fake_json(
            200,
            json::object! {"id": 6384, "name": "Keanu Reeves", "birthday": "1964-09-02"},
        ),
        "/3/movie/500" => Response::builder()
            .status(500)
            .body(Body::from("upstream exploded"))
            .unwrap(),
        _ => fake_json(
            404,
            json::object! {
                "success": false,
                "status_code": 34,
                "status_message": "The resource you requested could not be found.",
            },
        ),
    })
}

/// Start a fake TMDB server on a random local port
pub async fn start_fake_tmdb() -> SocketAddr {
    let make = make_service_fn(|_| async { Ok::<_, hyper::Error>(service_fn(fake_tmdb)) });
    let server = Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0))).serve(make);
    let addr = server.local_addr();
    tokio::spawn(server);
    addr
}

pub struct UnitTestContext {
    ctx: Arc<ServerContext>,
    routes: Arc<ServerRoutes>,
}

impl UnitTestContext {
    pub fn new(tmdb: SocketAddr, api_key: &str) -> Self {
        Self {
            ctx: Arc::new(ServerContext::new(
                CorsContext::new(false, vec![CorsHost::try_from(ALLOWED_ORIGIN).unwrap()]),
                TmdbClient::new(
                    api_key,
                    &format!("http://{}/3", tmdb),
                    "en-US",
                    Some(Duration::from_secs(30)),
                )
                .unwrap(),
            )),
            routes: Arc::new(ServerRoutes::new()),
        }
    }

    /// Send request through the whole service, like a real client.
    pub async fn request(&self, req: Request<Body>) -> Result<Response<Body>, MovigoError> {
        let mut svc = MovigoSvc::new(Arc::clone(&self.ctx), Arc::clone(&self.routes));
        Ok(svc.call(req).await?)
    }

    /// Returns HTTP status and parsed body.
    pub async fn request_json(
        &self,
        req: Request<Body>,
    ) -> Result<(u16, JsonValue), MovigoError> {
        let res = self.request(req).await?;
        let status = res.status().as_u16();
        let body = hyper::body::to_bytes(res.into_body()).await?;
        Ok((status, json::parse(&String::from_utf8_lossy(&body))?))
    }

    pub async fn get_json(&self, uri: &str) -> Result<(u16, JsonValue), MovigoError> {
        let req = Request::builder().uri(uri).body(Body::empty())?;
        self.request_json(req).await
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test() -> Result<(), MovigoError> {
    let tmdb = start_fake_tmdb().await;
    let ctx = UnitTestContext::new(tmdb, API_KEY);
    tokio::time::timeout(Duration::from_secs(120), async {
        version::test(&ctx).await?;
        media::test(&ctx).await?;
        media::test_cors(&ctx).await?;
        media::test_bad_api_key(tmdb).await?;
        media::test_unreachable_tmdb().await?;
        Ok::<(), MovigoError>(())
    })
    .await
    .map_err(|_| MovigoError::from("Server tests timed out."))??;
    Ok(())
}
