use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use futures::FutureExt;
use futures::future::BoxFuture;
use linkdepth::error::FetchError;
use linkdepth::fetcher::PageFetcher;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Path -> HTML body
pub type Site = HashMap<String, String>;

#[allow(dead_code)]
pub const PROXY_API_KEY: &str = "test-proxy-key";

#[allow(dead_code)]
pub fn site(pages: &[(&str, &str)]) -> Site {
    pages
        .iter()
        .map(|(path, html)| (path.to_string(), html.to_string()))
        .collect()
}

#[allow(dead_code)]
pub fn page_with_links(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!("<a href=\"{}\">link</a>\n", href))
        .collect();
    format!("<html><body>{}</body></html>", anchors)
}

fn lookup(pages: &Site, path: &str) -> HttpResponse {
    let key = if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    };

    match pages.get(key) {
        Some(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html.clone()),
        None => HttpResponse::NotFound().body("Not Found"),
    }
}

async fn serve_page(req: HttpRequest, pages: web::Data<Site>) -> HttpResponse {
    lookup(&pages, req.path())
}

/// Starts a server for `pages` on a random port and returns its base URL
#[allow(dead_code)]
pub async fn start_site_server(pages: Site) -> String {
    let pages = web::Data::new(pages);

    let http_server = HttpServer::new(move || {
        App::new()
            .app_data(pages.clone())
            .default_service(web::to(serve_page))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind test server");

    let addr = http_server
        .addrs()
        .first()
        .cloned()
        .expect("No address bound");
    let url = format!("http://{}", addr);

    let app_server = http_server.run();

    tokio::spawn(async move {
        if let Err(e) = app_server.await {
            eprintln!("Test server error: {}", e);
        }
    });

    url
}

async fn serve_proxy(
    query: web::Query<HashMap<String, String>>,
    pages: web::Data<Site>,
) -> HttpResponse {
    if query.get("api_key").map(String::as_str) != Some(PROXY_API_KEY) {
        return HttpResponse::Unauthorized().body("Invalid API key");
    }

    let Some(target) = query.get("url") else {
        return HttpResponse::BadRequest().body("Missing url");
    };

    match url::Url::parse(target) {
        Ok(target) => lookup(&pages, target.path()),
        Err(_) => HttpResponse::BadRequest().body("Invalid url"),
    }
}

/// Starts a fake scraping proxy that serves `pages` for whatever host is
/// asked for, and returns its endpoint URL
#[allow(dead_code)]
pub async fn start_proxy_server(pages: Site) -> String {
    let pages = web::Data::new(pages);

    let http_server = HttpServer::new(move || {
        App::new()
            .app_data(pages.clone())
            .route("/", web::get().to(serve_proxy))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind proxy server");

    let addr = http_server
        .addrs()
        .first()
        .cloned()
        .expect("No address bound");
    let url = format!("http://{}", addr);

    let app_server = http_server.run();

    tokio::spawn(async move {
        if let Err(e) = app_server.await {
            eprintln!("Test server error: {}", e);
        }
    });

    format!("{}/", url)
}

/// In-memory fetcher keyed by absolute URL. Records every fetch.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct SiteFetcher {
    pages: Arc<HashMap<String, String>>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl SiteFetcher {
    pub fn new(pages: &[(&str, String)]) -> Self {
        Self {
            pages: Arc::new(
                pages
                    .iter()
                    .map(|(url, html)| (url.to_string(), html.clone()))
                    .collect(),
            ),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl PageFetcher for SiteFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>> {
        async move {
            self.calls.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or(FetchError::Status(404))
        }
        .boxed()
    }
}
