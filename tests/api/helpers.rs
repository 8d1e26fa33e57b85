use std::sync::Arc;

use reqwest::Response;
use serde_json::Value;

use site_backend::app::{
    load_configuration,
    setup_tracing,
    Settings,
    SiteApp,
    StorageBackend,
};
use site_backend::auth::TokenService;
use site_backend::store::{
    MemoryStore,
    Store,
};

// ensure the `tracing` is instantiated only once; set `TEST_LOG` to see the logs
lazy_static::lazy_static! {
    static ref TRACING: () = if std::env::var("TEST_LOG").is_ok() {
        setup_tracing("test".into(), "debug".into(), std::io::stdout)
            .expect("error setting up tracing");
    } else {
        setup_tracing("test".into(), "debug".into(), std::io::sink)
            .expect("error setting up tracing");
    };
}

pub struct TestApp {
    pub address: String,
    pub store: Arc<dyn Store>,
    pub settings: Settings,
}

/// When a `tokio` runtime is shut down all tasks spawned on it are dropped.
///
/// `actix_rt::test` spins up a new runtime at the beginning of each test case
/// and they shut down at the end of each test case.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(customize: impl FnOnce(&mut Settings)) -> TestApp {
    launch(Arc::new(MemoryStore::new()), customize)
}

/// Serve the routes on top of the given store instead of a fresh `MemoryStore`.
pub async fn spawn_app_with_store(store: Arc<dyn Store>) -> TestApp {
    launch(store, |_| {})
}

fn launch(store: Arc<dyn Store>, customize: impl FnOnce(&mut Settings)) -> TestApp {
    lazy_static::initialize(&TRACING);

    let settings = {
        let mut c = load_configuration().expect("error loading configuration");
        c.application.port = 0;
        c.storage.backend = StorageBackend::Memory;
        customize(&mut c);
        c
    };

    let app = SiteApp::with_store(settings.clone(), store.clone()).expect("error building app");

    tokio::spawn(app.server);

    TestApp {
        // the request is done with the protocol:ip:port
        address: format!("http://127.0.0.1:{}", app.port),
        store,
        settings,
    }
}

impl TestApp {
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn token_service(&self) -> TokenService {
        TokenService::from(&self.settings.auth)
    }

    /// Log in with the configured admin credentials and return the token.
    pub async fn admin_token(&self) -> String {
        let body = serde_json::json!({
            "email": self.settings.auth.admin_email,
            "password": self.settings.auth.admin_password,
        });
        let response = send_json_post_request(&self.endpoint("/api/auth/login"), &body).await;
        assert_eq!(200, response.status().as_u16());
        let body: Value = response.json().await.unwrap();
        body["token"].as_str().unwrap().to_owned()
    }

    pub async fn submit_contact(&self, name: &str) -> Value {
        let body = serde_json::json!({"name": name, "phone": "555-1234"});
        let response = send_json_post_request(&self.endpoint("/api/contact"), &body).await;
        assert_eq!(201, response.status().as_u16());
        response.json().await.unwrap()
    }

    pub async fn subscribe(&self, email: &str) -> Response {
        let body = serde_json::json!({ "email": email });
        send_json_post_request(&self.endpoint("/api/newsletter/subscribe"), &body).await
    }

    pub async fn unsubscribe(&self, email: &str) -> Response {
        let body = serde_json::json!({ "email": email });
        send_json_post_request(&self.endpoint("/api/newsletter/unsubscribe"), &body).await
    }
}

pub async fn send_json_post_request(endpoint: &str, body: &Value) -> Response {
    reqwest::Client::new()
        .post(endpoint)
        .json(&body)
        .send()
        .await
        .expect("Fail to execute post request")
}

pub async fn send_raw_post_request(endpoint: &str, content_type: &str, body: String) -> Response {
    reqwest::Client::new()
        .post(endpoint)
        .header("Content-Type", content_type)
        .body(body)
        .send()
        .await
        .expect("Fail to execute post request")
}

pub async fn send_get_request(endpoint: &str) -> Response {
    reqwest::Client::new()
        .get(endpoint)
        .send()
        .await
        .expect("Fail to execute get request")
}

pub async fn send_authenticated_get_request(endpoint: &str, token: &str) -> Response {
    reqwest::Client::new()
        .get(endpoint)
        .bearer_auth(token)
        .send()
        .await
        .expect("Fail to execute get request")
}

pub async fn send_authenticated_json_patch_request(
    endpoint: &str,
    body: &Value,
    token: &str,
) -> Response {
    reqwest::Client::new()
        .patch(endpoint)
        .json(&body)
        .bearer_auth(token)
        .send()
        .await
        .expect("Fail to execute patch request")
}

pub async fn json_body(response: Response) -> Value {
    response.json().await.expect("response body is not json")
}
