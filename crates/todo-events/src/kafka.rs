use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use std::time::Duration;
use todo_core::TodoEvent;

use crate::{encode, Error, EventPublisher, Result};

pub const DEFAULT_TOPIC: &str = "todo-events";

#[derive(Debug, Clone)]
pub struct KafkaConfig {
    /// Comma-separated bootstrap servers
    pub brokers: String,
    pub topic: String,
    /// Bounds both the startup metadata probe and each delivery
    pub timeout: Duration,
}

impl KafkaConfig {
    pub fn new(brokers: impl Into<String>) -> Self {
        Self {
            brokers: brokers.into(),
            topic: DEFAULT_TOPIC.to_string(),
            timeout: Duration::from_secs(2),
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Publishes todo events to a single Kafka topic, keyed by todo id.
///
/// `publish` only enqueues; the delivery report is awaited on a spawned task
/// and logged, so callers never wait on the broker.
pub struct KafkaPublisher {
    producer: FutureProducer,
    topic: String,
}

impl KafkaPublisher {
    /// Create the producer and check that the cluster answers a metadata request.
    pub async fn connect(config: KafkaConfig) -> Result<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("message.timeout.ms", config.timeout.as_millis().to_string())
            .set("acks", "1")
            .create()
            .map_err(|e| Error::ConnectionFailed(format!("Failed to create producer: {}", e)))?;

        // fetch_metadata blocks the calling thread
        let probe = producer.clone();
        let timeout = config.timeout;
        let broker_count = tokio::task::spawn_blocking(move || {
            probe
                .client()
                .fetch_metadata(None, Timeout::After(timeout))
                .map(|metadata| metadata.brokers().len())
        })
        .await
        .map_err(|e| Error::ConnectionFailed(format!("Metadata probe aborted: {}", e)))?
        .map_err(|e| {
            Error::ConnectionFailed(format!("Brokers {} unreachable: {}", config.brokers, e))
        })?;

        tracing::info!(
            brokers = %config.brokers,
            topic = %config.topic,
            broker_count,
            "Connected to event bus"
        );

        Ok(Self {
            producer,
            topic: config.topic,
        })
    }
}

#[async_trait]
impl EventPublisher for KafkaPublisher {
    async fn publish(&self, event: &TodoEvent) -> Result<()> {
        let payload = encode(event)?;
        let key = event.key();

        let record = FutureRecord::to(&self.topic).payload(&payload).key(&key);

        // Fails immediately when the local queue is full
        let delivery = self
            .producer
            .send_result(record)
            .map_err(|(kafka_error, _)| Error::PublishFailed {
                topic: self.topic.clone(),
                reason: kafka_error.to_string(),
            })?;

        let topic = self.topic.clone();
        let event_type = event.event_type.as_str();
        let todo_id = event.todo.id;

        tokio::spawn(async move {
            match delivery.await {
                Ok(Ok((partition, offset))) => tracing::debug!(
                    topic = %topic,
                    partition,
                    offset,
                    event_type,
                    todo_id,
                    "Event published"
                ),
                Ok(Err((kafka_error, _))) => tracing::debug!(
                    topic = %topic,
                    error = %kafka_error,
                    event_type,
                    todo_id,
                    "Event dropped"
                ),
                Err(_) => tracing::debug!(topic = %topic, todo_id, "Delivery report canceled"),
            }
        });

        Ok(())
    }
}
