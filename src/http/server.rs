use std::sync::{Arc, Mutex};

use log::{debug, error, info};
use rouille::{Request, Response};

use crate::{
    config::HttpConfig,
    http::error::ApiError,
    query,
    storage::operations::LocationStore,
};

static INDEX_TEMPLATE: &str = include_str!("../../html/index.html");

pub struct HttpServer {
    store: Arc<Mutex<LocationStore>>,
    /// Albums shown on the map; `None` shows everything. Fixed at
    /// server construction, no global mutable state.
    albums: Option<Vec<String>>,
    pub config: HttpConfig,
}

impl HttpServer {
    pub fn new(store: LocationStore, config: HttpConfig, albums: Option<Vec<String>>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            albums,
            config,
        }
    }

    pub fn run(self) -> ! {
        let addr = format!("{}:{}", self.config.bind_addr, self.config.port);
        rouille::start_server(addr, move |request| self.handle_request(request))
    }

    fn handle_request(&self, request: &Request) -> Response {
        info!("{} {}", request.method(), request.url());

        let response = rouille::router!(request,
            (GET) (/) => {
                self.handle_index()
            },

            (GET) (/image/{id: String}) => {
                self.handle_image(&id)
            },

            _ => Response::empty_404()
        );

        info!("response: {} {}", request.method(), response.status_code);
        response
    }

    fn handle_index(&self) -> Response {
        match self.render_index() {
            Ok(response) => response,
            Err(e) => e.into_response(),
        }
    }

    /// Map page with the centroid and all visible records embedded as
    /// JSON.
    fn render_index(&self) -> Result<Response, ApiError> {
        let records = {
            let store = self.lock_store()?;
            store.select_all(self.albums.as_deref()).map_err(|e| {
                error!("selecting locations failed: {e}");
                ApiError::from(e)
            })?
        };

        let (latitude, longitude) = query::centroid(&records);
        let rows: Vec<_> = records.iter().map(query::project).collect();

        let centroid_json = serde_json::to_string(&[latitude, longitude])
            .map_err(|e| ApiError::Internal(format!("centroid serialization failed: {e}")))?;
        let rows_json = serde_json::to_string(&rows)
            .map_err(|e| ApiError::Internal(format!("row serialization failed: {e}")))?;

        let page = INDEX_TEMPLATE
            .replace("{{centroid}}", &centroid_json)
            .replace("{{rows}}", &rows_json);
        Ok(Response::html(page))
    }

    fn handle_image(&self, id: &str) -> Response {
        match self.image_response(id) {
            Ok(response) => response,
            Err(e) => e.into_response(),
        }
    }

    /// Serves the picture bytes for a stored location. A malformed id
    /// is a caller error, distinct from an unknown id or a picture file
    /// that no longer exists on disk.
    fn image_response(&self, id: &str) -> Result<Response, ApiError> {
        let id: i64 = id
            .parse()
            .map_err(|_| ApiError::BadRequest("invalid location id".into()))?;

        let record = {
            let store = self.lock_store()?;
            store.get_by_id(id).map_err(|e| {
                error!("lookup of location {id} failed: {e}");
                ApiError::from(e)
            })?
        };
        let record = record.ok_or_else(|| ApiError::NotFound(format!("location {id} not found")))?;

        let file = std::fs::File::open(&record.filepath).map_err(|_| {
            ApiError::NotFound(format!(
                "picture file missing for location {id}: {}",
                record.filepath
            ))
        })?;

        let mime = mime_guess::from_path(&record.filepath)
            .first_or_octet_stream()
            .to_string();
        debug!("serving {} as {mime}", record.filepath);

        Ok(Response::from_file(mime, file))
    }

    fn lock_store(&self) -> Result<std::sync::MutexGuard<'_, LocationStore>, ApiError> {
        self.store
            .lock()
            .map_err(|_| ApiError::Internal("storage lock poisoned".into()))
    }
}
