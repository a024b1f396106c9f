//! In-process stand-in for the processing endpoint.

use axum::{
    extract::{Multipart, State},
    http::{
        header::{CONTENT_TYPE, LOCATION},
        StatusCode, Uri,
    },
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use reqwest::Url;
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

pub const CSV: &[u8] = b"CLIENT,COMPANY,DESCRIPTION,INVOICE_ID,NET_AMOUNT,VAT_AMOUNT,TOTAL_AMOUNT\n\
ACME Ltd,Paper Co,\"Printer paper, Toner\",INV-0042,100.0,20.0,120.0\n";

const ROUTE: &str = "/process_image/";
const BARE_ROUTE: &str = "/process_image";

#[derive(Debug, Clone)]
pub struct ReceivedPart {
    pub name: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

type Seen = Arc<Mutex<Vec<Vec<ReceivedPart>>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Csv,
    Fail,
    /// Like a slash-redirecting framework: the bare route answers 307
    RedirectSlash,
}

#[derive(Clone)]
struct Behaviour {
    seen: Seen,
    mode: Mode,
}

/// Records every multipart request it receives.
pub struct StandIn {
    addr: std::net::SocketAddr,
    seen: Seen,
}

impl StandIn {
    /// Answers every request with [`CSV`].
    pub async fn start() -> Self {
        Self::spawn(Mode::Csv).await
    }

    /// Answers every request with a 500.
    pub async fn start_failing() -> Self {
        Self::spawn(Mode::Fail).await
    }

    /// Answers the slashless route with a 307 to the slashed one, which
    /// serves [`CSV`].
    pub async fn start_redirecting() -> Self {
        Self::spawn(Mode::RedirectSlash).await
    }

    async fn spawn(mode: Mode) -> Self {
        let seen = Seen::default();
        let app = Router::new()
            .route(ROUTE, post(process_image))
            .route(BARE_ROUTE, post(process_image))
            .with_state(Behaviour {
                seen: seen.clone(),
                mode,
            });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, seen }
    }

    /// The route as the backend declares it, trailing slash included
    pub fn endpoint(&self) -> Url {
        Url::parse(&format!("http://{}{ROUTE}", self.addr)).unwrap()
    }

    /// The same route without its trailing slash
    pub fn bare_endpoint(&self) -> Url {
        Url::parse(&format!("http://{}{BARE_ROUTE}", self.addr)).unwrap()
    }

    /// Parts of each request received so far, in arrival order.
    pub async fn requests(&self) -> Vec<Vec<ReceivedPart>> {
        self.seen.lock().await.clone()
    }
}

async fn process_image(
    State(behaviour): State<Behaviour>,
    uri: Uri,
    mut multipart: Multipart,
) -> Response {
    let mut parts = Vec::new();
    // An empty form may read as an error; either way it has no parts
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().map(str::to_owned);
        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let data = field.bytes().await.unwrap().to_vec();
        parts.push(ReceivedPart {
            name,
            file_name,
            content_type,
            data,
        });
    }
    behaviour.seen.lock().await.push(parts);

    match behaviour.mode {
        Mode::Fail => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "text/plain")],
            b"Internal Server Error".to_vec(),
        )
            .into_response(),
        Mode::RedirectSlash if uri.path() == BARE_ROUTE => {
            (StatusCode::TEMPORARY_REDIRECT, [(LOCATION, ROUTE)]).into_response()
        }
        Mode::Csv | Mode::RedirectSlash => {
            (StatusCode::OK, [(CONTENT_TYPE, "text/csv")], CSV.to_vec()).into_response()
        }
    }
}

/// An endpoint nothing listens on.
pub async fn refused_endpoint() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}{ROUTE}")).unwrap()
}
