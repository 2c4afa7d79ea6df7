#![recursion_limit = "256"]

use std::sync::Arc;

use anyhow::Context;
use lambda_runtime::{Error, LambdaEvent, run, service_fn, tracing};
use notifier_entrypoint::NotifierEntrypoint;
use serde_json::Value;
use upload_notification_handler::{config::Config, handler::handler, service};

#[tokio::main]
async fn main() -> Result<(), Error> {
    NotifierEntrypoint::default().init();

    tracing::trace!("initiating lambda");

    let config = Config::from_env().context("all necessary env vars should be available")?;

    tracing::trace!("initialized config");

    let sns_client = service::sns::SNS::new(aws_sdk_sns::Client::new(
        &aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await,
    ));

    tracing::trace!("initialized sns client");

    let shared_sns_client = Arc::new(sns_client);
    let shared_config = Arc::new(config);

    let func = service_fn(move |event: LambdaEvent<Value>| {
        let sns_client = shared_sns_client.clone();
        let config = shared_config.clone();

        async move { handler(sns_client, config, event).await }
    });

    run(func).await
}
