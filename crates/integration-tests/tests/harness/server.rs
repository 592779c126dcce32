//! The inference service under test, served on a random port

use infer_config::Config;
use infer_server::Server;
use serde_json::Value;

use super::Served;

/// A running service instance plus a client to drive it
pub struct TestServer {
    served: Served,
    client: reqwest::Client,
}

impl TestServer {
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        let router = Server::new(&config)?.into_router();

        Ok(Self {
            served: Served::start(router).await?,
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.served.addr)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("request reaches test server")
    }

    /// POST a JSON body to `path`
    pub async fn post(&self, path: &str, body: Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("request reaches test server")
    }
}
