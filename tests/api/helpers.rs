use dotenv::dotenv;
use once_cell::sync::Lazy;
use secrecy::Secret;
use std::sync::Arc;

use userauth::authentication::CredentialService;
use userauth::configuration::get_configuration;
use userauth::startup::Application;
use userauth::telemetry::{
    get_line_subscriber, get_subscriber, init_subscriber,
};
use userauth::user_store::{InMemoryUserStore, UserStore};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    // We cannot assign the output of `get_subscriber` to a variable based on the value of `TEST_LOG`
    // because the sink is part of the type returned by `get_subscriber`, therefore they are not the
    // same type.
    match std::env::var("TEST_LOG") {
        Ok(v) => {
            if v == "json" {
                init_subscriber(get_subscriber(
                    subscriber_name,
                    default_filter_level,
                    std::io::stdout,
                ));
            } else {
                init_subscriber(get_line_subscriber(
                    default_filter_level,
                    std::io::stdout,
                ));
            }
        }
        _ => {
            let subscriber = get_subscriber(
                subscriber_name,
                default_filter_level,
                std::io::sink,
            );
            init_subscriber(subscriber);
        }
    };
});

const TEST_SIGNING_SECRET: &str = "integration-test-signing-secret";

pub struct TestApp<S = InMemoryUserStore> {
    pub address: String,
    pub store: Arc<S>,
    pub credentials: CredentialService,
    pub api_client: reqwest::Client,
}

impl<S> TestApp<S> {
    pub async fn post_register(
        &self,
        body: &serde_json::Value,
    ) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/users/register", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_login(
        &self,
        body: &serde_json::Value,
    ) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/users/login", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Register Jane through the public API.
    pub async fn register_jane(&self) -> reqwest::Response {
        self.post_register(&jane_registration()).await
    }
}

pub fn jane_registration() -> serde_json::Value {
    serde_json::json!({
        "fullname": { "firstname": "Jane" },
        "email": "jane@x.com",
        "password": "secret123"
    })
}

pub async fn spawn_app() -> TestApp {
    // Every test gets its own empty store
    spawn_app_with_store(Arc::new(InMemoryUserStore::new())).await
}

pub async fn spawn_app_with_store<S>(store: Arc<S>) -> TestApp<S>
where
    S: UserStore + 'static,
{
    dotenv().ok();
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    // Randomize configuration to ensure test isolation
    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        // Use random port
        c.application.port = 0;
        c.application.host = "127.0.0.1".to_string();
        c.application.jwt_secret = Secret::new(TEST_SIGNING_SECRET.to_string());
        c
    };

    let application =
        Application::build_with_store(configuration, store.clone())
            .expect("Failed to build application.");
    let application_port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{}", application_port),
        store,
        credentials: CredentialService::new(Secret::new(
            TEST_SIGNING_SECRET.to_string(),
        ))
        .expect("Failed to build credential service."),
        api_client: reqwest::Client::new(),
    }
}
