use std::sync::Arc;

use anyhow::Context;
use lambda_runtime::{
    Error, LambdaEvent,
    tracing::{self},
};
use serde_json::Value;

use crate::{
    config::Config,
    model::{InvocationResult, NotificationMessage, UploadEvent},
    service,
};

/// Handles an s3 upload event.
/// Failures are reported through the returned status code rather than the lambda error.
#[tracing::instrument(skip_all, fields(request_id = %event.context.request_id))]
pub async fn handler(
    sns_client: Arc<service::sns::SNS>,
    config: Arc<Config>,
    event: LambdaEvent<Value>,
) -> Result<InvocationResult, Error> {
    tracing::trace!(payload=?event.payload, "processing event");

    match forward(&sns_client, &config.sns_topic_arn, &event.payload).await {
        Ok(message_id) => {
            tracing::info!(message_id=?message_id, "sent upload notification");
            Ok(InvocationResult::success())
        }
        Err(e) => {
            tracing::error!(error=?e, "unable to send upload notification");
            Ok(InvocationResult::failure(&e))
        }
    }
}

/// Publishes a notification for the first record of the event
#[tracing::instrument(skip_all)]
pub async fn forward(
    sns_client: &service::sns::SNS,
    topic_arn: &str,
    event: &Value,
) -> anyhow::Result<Option<String>> {
    let upload = UploadEvent::from_value(event)?;
    tracing::trace!(bucket=%upload.bucket_name, key=%upload.object_key, "processing upload");

    let message = NotificationMessage::for_upload(&upload);

    sns_client
        .publish(topic_arn, &message.body, &message.subject)
        .await
        .with_context(|| format!("unable to notify topic {topic_arn}"))
}
