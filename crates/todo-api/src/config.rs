use clap::Parser;
use std::time::Duration;
use todo_db::DbConfig;
use todo_events::{KafkaConfig, DEFAULT_TOPIC};

#[derive(Parser, Debug, Clone)]
#[command(name = "todo-api")]
#[command(about = "Todo REST service", long_about = None)]
#[command(version)]
pub struct Config {
    /// Database host
    #[arg(long, env = "DB_HOST")]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database user
    #[arg(long, env = "DB_USER")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: String,

    /// Database name
    #[arg(long, env = "DB_NAME")]
    pub db_name: String,

    /// Maximum pooled connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 5)]
    pub db_max_connections: u32,

    /// Seconds to wait for a pooled connection
    #[arg(long, env = "DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
    pub db_acquire_timeout_secs: u64,

    /// Server-side statement timeout in milliseconds
    #[arg(long, env = "DB_STATEMENT_TIMEOUT_MS", default_value_t = 5000)]
    pub db_statement_timeout_ms: u64,

    /// Kafka bootstrap servers; eventing is disabled when unset
    #[arg(long, env = "KAFKA_BROKERS")]
    pub kafka_brokers: Option<String>,

    /// Topic that receives todo events
    #[arg(long, env = "EVENT_TOPIC", default_value = DEFAULT_TOPIC)]
    pub event_topic: String,

    /// Delivery timeout for a single event in milliseconds
    #[arg(long, env = "EVENT_PUBLISH_TIMEOUT_MS", default_value_t = 2000)]
    pub event_publish_timeout_ms: u64,

    /// HTTP listen port
    #[arg(long, env = "API_PORT", default_value_t = 3000)]
    pub port: u16,
}

impl Config {
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            host: self.db_host.clone(),
            port: self.db_port,
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            database: self.db_name.clone(),
            max_connections: self.db_max_connections,
            acquire_timeout: Duration::from_secs(self.db_acquire_timeout_secs),
            statement_timeout: Duration::from_millis(self.db_statement_timeout_ms),
        }
    }

    pub fn kafka_config(&self) -> Option<KafkaConfig> {
        self.kafka_brokers
            .as_deref()
            .map(str::trim)
            .filter(|brokers| !brokers.is_empty())
            .map(|brokers| {
                KafkaConfig::new(brokers)
                    .with_topic(self.event_topic.clone())
                    .with_timeout(Duration::from_millis(self.event_publish_timeout_ms))
            })
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 9] = [
        "todo-api",
        "--db-host",
        "localhost",
        "--db-user",
        "todo",
        "--db-password",
        "secret",
        "--db-name",
        "todos",
    ];

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(REQUIRED).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.listen_addr(), "0.0.0.0:3000");

        let db = config.db_config();
        assert_eq!(db.host, "localhost");
        assert_eq!(db.port, 5432);
        assert_eq!(db.database, "todos");
        assert_eq!(db.acquire_timeout, Duration::from_secs(5));
        assert_eq!(db.statement_timeout, Duration::from_millis(5000));
    }

    #[test]
    fn test_kafka_config() {
        let mut args = REQUIRED.to_vec();
        args.extend(["--kafka-brokers", "bus:9092", "--event-topic", "todos.v1"]);
        let config = Config::try_parse_from(args).unwrap();

        let kafka = config.kafka_config().unwrap();
        assert_eq!(kafka.brokers, "bus:9092");
        assert_eq!(kafka.topic, "todos.v1");
        assert_eq!(kafka.timeout, Duration::from_millis(2000));
    }

    #[test]
    fn test_blank_brokers_disable_eventing() {
        let mut args = REQUIRED.to_vec();
        args.extend(["--kafka-brokers", "  "]);
        let config = Config::try_parse_from(args).unwrap();
        assert!(config.kafka_config().is_none());
    }

    #[test]
    fn test_missing_database_settings_is_an_error() {
        let result = Config::try_parse_from(["todo-api", "--db-host", "localhost"]);
        assert!(result.is_err());
    }
}
