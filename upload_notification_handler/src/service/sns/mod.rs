mod publish;

use aws_sdk_sns as sns;
use lambda_runtime::tracing;
#[allow(unused_imports)]
use mockall::automock;

#[cfg(test)]
pub use MockSnsClient as SNS;
#[cfg(not(test))]
pub use SnsClient as SNS;

#[derive(Clone, Debug)]
pub struct SnsClient {
    /// Inner SNS client
    inner: sns::Client,
}

#[cfg_attr(test, automock)]
impl SnsClient {
    pub fn new(inner: sns::Client) -> Self {
        Self { inner }
    }

    /// Publishes a message with the given subject to the topic.
    /// Returns the message id assigned by SNS, if one was reported.
    #[tracing::instrument(skip(self, message))]
    pub async fn publish(
        &self,
        topic_arn: &str,
        message: &str,
        subject: &str,
    ) -> anyhow::Result<Option<String>> {
        publish::publish(&self.inner, topic_arn, message, subject).await
    }
}
