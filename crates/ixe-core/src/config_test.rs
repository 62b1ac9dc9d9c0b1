use super::*;
use tempfile::TempDir;

const FULL_CONFIG: &str = r#"
parameters:
  db:
    host: informix.example.com
    port: 9088
    database: stores
    server: ol_informix
    user: extractor
    password: secret
    locale: cs_CZ.8859-2
    retries: 3
  queries:
    - query: "SELECT * FROM customer"
      outputTable: in.c-main.customer
      incremental: true
      primaryKey: customer_num
    - query: "SELECT * FROM orders"
      outputTable: in.c-main.orders
      primaryKey: [order_num, customer_num]
    - query: "SELECT * FROM items"
      outputTable: in.c-main.items
"#;

#[test]
fn test_parse_full_config() {
    let config = JobConfig::from_yaml(FULL_CONFIG).unwrap();
    let db = &config.parameters.db;

    assert_eq!(db.driver, Driver::Informix);
    assert_eq!(db.host.as_deref(), Some("informix.example.com"));
    assert_eq!(db.port, "9088");
    assert_eq!(db.server.as_deref(), Some("ol_informix"));
    assert_eq!(db.locale, "cs_CZ.8859-2");
    assert_eq!(db.retries().unwrap(), 3);

    let queries = &config.parameters.queries;
    assert_eq!(queries.len(), 3);
    assert_eq!(queries[0].output_table, "in.c-main.customer");
    assert!(queries[0].incremental);
    assert_eq!(
        queries[0].primary_key,
        Some(PrimaryKey::Column("customer_num".to_string()))
    );
    assert_eq!(
        queries[1].primary_key.as_ref().unwrap().columns(),
        vec!["order_num", "customer_num"]
    );
}

#[test]
fn test_query_order_is_preserved() {
    let config = JobConfig::from_yaml(FULL_CONFIG).unwrap();
    let tables: Vec<&str> = config
        .parameters
        .queries
        .iter()
        .map(|q| q.output_table.as_str())
        .collect();
    assert_eq!(
        tables,
        vec!["in.c-main.customer", "in.c-main.orders", "in.c-main.items"]
    );
}

#[test]
fn test_defaults() {
    let yaml = r#"
parameters:
  db:
    host: localhost
  queries:
    - query: "SELECT 1"
      outputTable: one
"#;
    let config = JobConfig::from_yaml(yaml).unwrap();
    let db = &config.parameters.db;
    assert_eq!(db.port, DEFAULT_PORT);
    assert_eq!(db.port, "3306");
    assert_eq!(db.locale, "en_US.819");
    assert_eq!(db.retries().unwrap(), 0);
    assert!(db.password.is_none());

    let q = &config.parameters.queries[0];
    assert!(!q.incremental);
    assert!(q.primary_key.is_none());
}

#[test]
fn test_port_as_string() {
    let yaml = r#"
parameters:
  db:
    port: "9088"
"#;
    let config = JobConfig::from_yaml(yaml).unwrap();
    assert_eq!(config.parameters.db.port, "9088");
}

#[test]
fn test_encrypted_password_alias() {
    let yaml = r##"
parameters:
  db:
    "#password": hunter2
"##;
    let config = JobConfig::from_yaml(yaml).unwrap();
    assert_eq!(config.parameters.db.password.as_deref(), Some("hunter2"));
}

#[test]
fn test_debug_redacts_password() {
    let params = ConnectionParameters {
        password: Some("hunter2".to_string()),
        ..Default::default()
    };
    let rendered = format!("{:?}", params);
    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("***"));
}

#[test]
fn test_duckdb_driver() {
    let yaml = r#"
parameters:
  db:
    driver: duckdb
    database: ":memory:"
"#;
    let config = JobConfig::from_yaml(yaml).unwrap();
    assert_eq!(config.parameters.db.driver, Driver::DuckDb);
    assert_eq!(config.parameters.db.driver.to_string(), "duckdb");
}

#[test]
fn test_retries_numeric_string() {
    let params = ConnectionParameters {
        retries: Some(serde_yaml::Value::String("2".to_string())),
        ..Default::default()
    };
    assert_eq!(params.retries().unwrap(), 2);
}

#[test]
fn test_retries_non_numeric_is_rejected() {
    for raw in ["abc", "-1", "1.5", "[1, 2]", "true", "\"\""] {
        let yaml = format!("parameters:\n  db:\n    retries: {raw}\n");
        let config = JobConfig::from_yaml(&yaml).unwrap();
        let err = config.parameters.db.retries().unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidRetries { .. }),
            "retries {raw} should be rejected, got {err:?}"
        );
        assert!(err.to_string().contains("E004"));
    }
}

#[test]
fn test_empty_query_is_invalid() {
    let yaml = r#"
parameters:
  db: {}
  queries:
    - query: "  "
      outputTable: blank
"#;
    let err = JobConfig::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_invalid_output_table_is_parse_error() {
    let yaml = r#"
parameters:
  db: {}
  queries:
    - query: "SELECT 1"
      outputTable: "../escape"
"#;
    let err = JobConfig::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, CoreError::ConfigParseError { .. }));
}

#[test]
fn test_load_from_dir() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join(CONFIG_FILE_NAME), FULL_CONFIG).unwrap();

    let config = JobConfig::load_from_dir(temp.path()).unwrap();
    assert_eq!(config.parameters.queries.len(), 3);
}

#[test]
fn test_load_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = JobConfig::load_from_dir(temp.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
    assert!(err.to_string().contains("config.yml"));
}
