use crate::api::ApiServer;
use crate::config::Config;
use anyhow::Result;
use tracing::info;

/// Host/port overrides from the command line.
#[derive(Debug, Clone, Default)]
pub struct ServeOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl ServeOverrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

pub async fn run_service(mut config: Config, overrides: ServeOverrides) -> Result<()> {
    info!("Starting meetscribe service");

    overrides.apply(&mut config);
    let address = config.server.bind_address();

    info!("meetscribe is ready!");
    info!(
        "Try it: curl -X POST http://{}/process-qa -H 'Content-Type: application/json' -d '{{\"qa_list\":[{{\"question\":\"Q?\",\"answer\":\"A.\"}}]}}'",
        address
    );

    ApiServer::new(config).start().await
}
