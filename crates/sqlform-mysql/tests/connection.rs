use sqlform_core::{FieldSet, Operand, Query, RunError, Table};
use sqlform_mysql::{MySqlConfig, MySqlConnection, MySqlError};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Lazy pool pointed at a port nothing listens on.
fn unreachable() -> MySqlConnection {
    MySqlConfig::from_url("mysql://root@127.0.0.1:1/test")
        .max_connections(1)
        .acquire_timeout_secs(1)
        .connect_lazy()
        .unwrap()
}

#[tokio::test]
async fn test_unreachable_server_is_connection_error() {
    init_tracing();
    let connection = unreachable();

    let mut table = Table::new("T");
    let a = table.integer("A");
    let err = table
        .select_where(a.equals(1))
        .run(&connection)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RunError::Connection(MySqlError::Database(_))
    ));
    connection.close().await;
}

#[tokio::test]
async fn test_invalid_query_fails_before_connecting() {
    init_tracing();
    let connection = unreachable();

    let mut table = Table::new("T");
    table.integer("A");
    let err = table
        .select()
        .offset(5)
        .run(&connection)
        .await
        .unwrap_err();

    assert!(matches!(err, RunError::Build(_)));
    assert!(err.connection().is_none());
}
