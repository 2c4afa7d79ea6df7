#![deny(missing_docs)]
//! Standardized process initialization for the notifier binaries.
//! Keeps tracing output consistent between local runs and the deployed lambda.

use notifier_env::Environment;
use tracing_subscriber::EnvFilter;

/// Defines how the process should be initialized
#[derive(Debug)]
pub struct NotifierEntrypoint {
    env: Environment,
}

impl Default for NotifierEntrypoint {
    fn default() -> Self {
        NotifierEntrypoint {
            env: Environment::new_or_prod(),
        }
    }
}

/// sentinel struct which guarantees that we called [NotifierEntrypoint::init]
#[derive(Debug)]
pub struct InitializedEntrypoint(());

impl NotifierEntrypoint {
    /// create a new instance of [Self] from an input [Environment]
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    /// consume self, initialize this binary, and return a proof that it was initialized [InitializedEntrypoint]
    pub fn init(self) -> InitializedEntrypoint {
        dotenv::dotenv().ok();
        std::panic::set_hook(Box::new(tracing_panic::panic_hook));

        match self.env {
            Environment::Local => {
                tracing_subscriber::fmt()
                    .with_ansi(true)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .init();
            }
            Environment::Production | Environment::Develop => {
                // cloudwatch does not render ansi
                tracing_subscriber::fmt()
                    .with_ansi(false)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .flatten_event(true)
                    .init();
            }
        }

        tracing::trace!(environment=%self.env, "initialized entrypoint");

        InitializedEntrypoint(())
    }
}
