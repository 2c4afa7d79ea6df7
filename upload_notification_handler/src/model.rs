use anyhow::Context;
use lambda_runtime::tracing;
use serde::Deserialize;
use serde_json::Value;

/// Subject line of every upload notification
pub const NOTIFICATION_SUBJECT: &str = "New S3 Upload Notification";

/// Body returned to the caller when the notification was published
pub const SUCCESS_MESSAGE: &str = "SNS notification sent successfully.";

/// The parts of an S3 put notification we care about.
/// Every other field on the record is ignored.
#[derive(Deserialize, Debug)]
struct RawUploadEvent {
    #[serde(rename = "Records")]
    records: Vec<RawRecord>,
}

#[derive(Deserialize, Debug)]
struct RawRecord {
    s3: RawS3Entity,
}

#[derive(Deserialize, Debug)]
struct RawS3Entity {
    bucket: RawBucket,
    object: RawObject,
}

#[derive(Deserialize, Debug)]
struct RawBucket {
    name: String,
}

#[derive(Deserialize, Debug)]
struct RawObject {
    key: String,
}

/// The uploaded object described by the first record of an S3 event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEvent {
    pub bucket_name: String,
    pub object_key: String,
}

impl UploadEvent {
    /// Extracts the bucket and key of the first record in the event.
    /// Only the first record is used.
    pub fn from_value(event: &Value) -> anyhow::Result<Self> {
        let raw = RawUploadEvent::deserialize(event).context("malformed s3 event")?;

        let record_count = raw.records.len();
        let record = raw
            .records
            .into_iter()
            .next()
            .context("s3 event contains no records")?;

        if record_count > 1 {
            tracing::debug!(
                ignored = record_count - 1,
                "only the first record of the event is forwarded"
            );
        }

        if record.s3.bucket.name.is_empty() {
            anyhow::bail!("bucket name is empty");
        }
        if record.s3.object.key.is_empty() {
            anyhow::bail!("object key is empty");
        }

        Ok(Self {
            bucket_name: record.s3.bucket.name,
            object_key: record.s3.object.key,
        })
    }
}

/// The message published to the topic for an upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub subject: String,
    pub body: String,
}

impl NotificationMessage {
    pub fn for_upload(event: &UploadEvent) -> Self {
        Self {
            subject: NOTIFICATION_SUBJECT.to_string(),
            body: format!(
                "A new object has been uploaded to S3:\n\nBucket: {}\nKey: {}",
                event.bucket_name, event.object_key
            ),
        }
    }
}

/// What the lambda hands back to its caller
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResult {
    pub status_code: u16,
    /// A JSON encoded string
    pub body: String,
}

impl InvocationResult {
    pub fn success() -> Self {
        Self {
            status_code: 200,
            body: json_string(SUCCESS_MESSAGE),
        }
    }

    /// Every failure maps to a 500 carrying the error chain in the body
    pub fn failure(err: &anyhow::Error) -> Self {
        Self {
            status_code: 500,
            body: json_string(&format!("Error: {err:#}")),
        }
    }
}

fn json_string(value: &str) -> String {
    // serializing a str cannot fail
    serde_json::to_string(value).unwrap_or_else(|_| String::from("\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn put_event(bucket: &str, key: &str) -> Value {
        json!({
            "Records": [{
                "eventVersion": "2.1",
                "eventSource": "aws:s3",
                "awsRegion": "us-east-1",
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "s3SchemaVersion": "1.0",
                    "bucket": { "name": bucket, "arn": format!("arn:aws:s3:::{bucket}") },
                    "object": { "key": key, "size": 1024, "eTag": "d41d8cd98f00b204e9800998ecf8427e" }
                }
            }]
        })
    }

    #[test]
    fn test_from_value() {
        let event = UploadEvent::from_value(&put_event("my-bucket", "file.txt")).unwrap();
        assert_eq!(
            event,
            UploadEvent {
                bucket_name: "my-bucket".to_string(),
                object_key: "file.txt".to_string(),
            }
        );
    }

    #[test]
    fn test_from_value_uses_first_record() {
        let mut event = put_event("first-bucket", "first.txt");
        let second = put_event("second-bucket", "second.txt")["Records"][0].clone();
        event["Records"].as_array_mut().unwrap().push(second);

        let event = UploadEvent::from_value(&event).unwrap();
        assert_eq!(event.bucket_name, "first-bucket");
        assert_eq!(event.object_key, "first.txt");
    }

    #[test]
    fn test_from_value_keeps_key_encoding() {
        let event = UploadEvent::from_value(&put_event("my-bucket", "reports/q1+summary%282%29.pdf"))
            .unwrap();
        assert_eq!(event.object_key, "reports/q1+summary%282%29.pdf");
    }

    #[test]
    fn test_from_value_missing_records() {
        let err = UploadEvent::from_value(&json!({ "detail": {} })).unwrap_err();
        assert!(err.to_string().contains("malformed s3 event"));
    }

    #[test]
    fn test_from_value_empty_records() {
        let err = UploadEvent::from_value(&json!({ "Records": [] })).unwrap_err();
        assert_eq!(err.to_string(), "s3 event contains no records");
    }

    #[test]
    fn test_from_value_missing_key() {
        let event = json!({
            "Records": [{ "s3": { "bucket": { "name": "my-bucket" }, "object": {} } }]
        });
        assert!(UploadEvent::from_value(&event).is_err());
    }

    #[test]
    fn test_from_value_empty_fields() {
        let err = UploadEvent::from_value(&put_event("", "file.txt")).unwrap_err();
        assert_eq!(err.to_string(), "bucket name is empty");

        let err = UploadEvent::from_value(&put_event("my-bucket", "")).unwrap_err();
        assert_eq!(err.to_string(), "object key is empty");
    }

    #[test]
    fn test_for_upload() {
        let message = NotificationMessage::for_upload(&UploadEvent {
            bucket_name: "my-bucket".to_string(),
            object_key: "file.txt".to_string(),
        });

        assert_eq!(message.subject, "New S3 Upload Notification");
        assert_eq!(
            message.body,
            "A new object has been uploaded to S3:\n\nBucket: my-bucket\nKey: file.txt"
        );
    }

    #[test]
    fn test_invocation_result_serialization() {
        let value = serde_json::to_value(InvocationResult::success()).unwrap();
        assert_eq!(
            value,
            json!({
                "statusCode": 200,
                "body": "\"SNS notification sent successfully.\""
            })
        );
    }

    #[test]
    fn test_failure_body_is_json() {
        let err = anyhow::anyhow!("topic \"uploads\" does not exist");
        let result = InvocationResult::failure(&err);

        assert_eq!(result.status_code, 500);
        let decoded: String = serde_json::from_str(&result.body).unwrap();
        assert_eq!(decoded, "Error: topic \"uploads\" does not exist");
    }
}
