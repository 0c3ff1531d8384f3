//! hyper 1.x glue: one task per connection, owned request in, owned
//! response out.

use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{error, info};
use wardbook_http::{Request, Response};
use wardbook_views::App;

/// Requests larger than this are refused before the body is read.
const MAX_BODY_SIZE: u64 = 10 * 1024 * 1024;

pub struct HttpServer {
	app: Arc<App>,
}

impl HttpServer {
	pub fn new(app: App) -> Self {
		Self { app: Arc::new(app) }
	}

	/// Binds and serves until the process is stopped.
	pub async fn listen(self, addr: SocketAddr) -> std::io::Result<()> {
		let listener = TcpListener::bind(addr).await?;
		info!(%addr, "listening");

		loop {
			let (stream, peer) = listener.accept().await?;
			let app = self.app.clone();
			tokio::task::spawn(async move {
				let io = TokioIo::new(stream);
				let service = service_fn(move |req| {
					let app = app.clone();
					async move { handle(app, req).await }
				});
				if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
					error!(%peer, error = %err, "connection failed");
				}
			});
		}
	}
}

async fn handle(
	app: Arc<App>,
	req: hyper::Request<Incoming>,
) -> Result<hyper::Response<Full<Bytes>>, hyper::Error> {
	if oversized(&req) {
		let response = Response::new(hyper::StatusCode::PAYLOAD_TOO_LARGE);
		return Ok(into_hyper(response));
	}
	let request = match read_request(req).await {
		Ok(request) => request,
		Err(err) => return Err(err),
	};
	Ok(into_hyper(app.handle(request).await))
}

fn oversized(req: &hyper::Request<Incoming>) -> bool {
	req.headers()
		.get(hyper::header::CONTENT_LENGTH)
		.and_then(|v| v.to_str().ok())
		.and_then(|v| v.parse::<u64>().ok())
		.is_some_and(|len| len > MAX_BODY_SIZE)
}

async fn read_request(req: hyper::Request<Incoming>) -> Result<Request, hyper::Error> {
	let (parts, body) = req.into_parts();
	let bytes = body.collect().await?.to_bytes();
	let mut request = Request::new(parts.method, parts.uri.path())
		.with_headers(parts.headers)
		.with_body(bytes);
	if let Some(query) = parts.uri.query() {
		request = request.with_raw_query(query);
	}
	Ok(request)
}

fn into_hyper(response: Response) -> hyper::Response<Full<Bytes>> {
	let (status, headers, body) = response.into_parts();
	let mut out = hyper::Response::new(Full::new(body));
	*out.status_mut() = status;
	*out.headers_mut() = headers;
	out
}
