use super::context::ServerContext;
use super::result::{JSONError, JSONResult};
use super::route::ServerRoutes;
use crate::ext::json::ToJson2;
use hyper::server::conn::AddrIncoming;
use hyper::server::Server;
use hyper::service::Service;
use hyper::Body;
use hyper::Request;
use hyper::Response;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::task::Context;
use std::task::Poll;

fn json_response(status: u16, re: JSONResult) -> Response<Body> {
    let mut res = Response::new(Body::from(re.to_json2().to_string()));
    *res.status_mut() = hyper::StatusCode::from_u16(status)
        .unwrap_or(hyper::StatusCode::INTERNAL_SERVER_ERROR);
    res.headers_mut().insert(
        hyper::header::CONTENT_TYPE,
        hyper::header::HeaderValue::from_static("application/json; charset=utf-8"),
    );
    res
}

pub struct MovigoSvc {
    ctx: Arc<ServerContext>,
    routes: Arc<ServerRoutes>,
}

impl MovigoSvc {
    pub fn new(ctx: Arc<ServerContext>, routes: Arc<ServerRoutes>) -> Self {
        Self { ctx, routes }
    }
}

impl Service<Request<Body>> for MovigoSvc {
    type Response = Response<Body>;
    type Error = hyper::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _: &mut Context) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        log::debug!("{} {}", req.method(), req.uri().path());
        match self.routes.match_route(&req, &self.ctx) {
            Some(route) => Box::pin(async move {
                match route.response(req).await {
                    Ok(data) => Ok(data),
                    Err(e) => {
                        log::error!("Failed to handle request: {}", e);
                        let err = JSONError::from((-500, "Internal server error."));
                        Ok(json_response(500, Err(err)))
                    }
                }
            }),
            None => Box::pin(async {
                let err = JSONError::from((-404, "Not found."));
                Ok(json_response(404, Err(err)))
            }),
        }
    }
}

pub struct MovigoMakeSvc {
    ctx: Arc<ServerContext>,
    routes: Arc<ServerRoutes>,
}

impl MovigoMakeSvc {
    pub fn new(ctx: Arc<ServerContext>) -> Self {
        Self {
            ctx,
            routes: Arc::new(ServerRoutes::new()),
        }
    }
}

impl<T> Service<T> for MovigoMakeSvc {
    type Response = MovigoSvc;
    type Error = hyper::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _: &mut Context) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _: T) -> Self::Future {
        let ctx = Arc::clone(&self.ctx);
        let routes = Arc::clone(&self.routes);
        let fut = async move { Ok(MovigoSvc::new(ctx, routes)) };
        Box::pin(fut)
    }
}

/// Start the server
pub fn start_server(
    addr: &SocketAddr,
    ctx: Arc<ServerContext>,
) -> Result<Server<AddrIncoming, MovigoMakeSvc>, hyper::Error> {
    Ok(Server::try_bind(addr)?.serve(MovigoMakeSvc::new(ctx)))
}
