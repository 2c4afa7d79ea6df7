use anyhow::Context;

/// Variable naming the topic that upload notifications are published to
pub const SNS_TOPIC_ARN: &str = "SNS_TOPIC_ARN";

/// The configuration parameters for the lambda.
///
/// Read once when the lambda starts and shared by every invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// The arn of the sns topic upload notifications are published to
    pub sns_topic_arn: String,
}

impl Config {
    pub fn new(sns_topic_arn: &str) -> anyhow::Result<Self> {
        if sns_topic_arn.trim().is_empty() {
            anyhow::bail!("{SNS_TOPIC_ARN} must not be empty");
        }

        Ok(Config {
            sns_topic_arn: sns_topic_arn.to_string(),
        })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let sns_topic_arn =
            std::env::var(SNS_TOPIC_ARN).context("SNS_TOPIC_ARN must be provided")?;
        Config::new(&sns_topic_arn)
    }
}
