use anyhow::Context;
use aws_sdk_sns as sns;
use lambda_runtime::tracing;

#[tracing::instrument(skip(client, message))]
pub(in crate::service::sns) async fn publish(
    client: &sns::Client,
    topic_arn: &str,
    message: &str,
    subject: &str,
) -> anyhow::Result<Option<String>> {
    let output = client
        .publish()
        .topic_arn(topic_arn)
        .message(message)
        .subject(subject)
        .send()
        .await
        .context("failed to publish to sns topic")?;

    Ok(output.message_id().map(|id| id.to_string()))
}
