// 端到端测试：真实路由 + 临时端口

use records_client::{
    ClientConfig, ClientError, HttpClient, RecordView, SpreadsheetFormat, SubmissionState,
    SubmitMode, UploadSession,
};
use records_server::services::build_router;
use records_server::{Config, DbService, ServerState};
use rust_xlsxwriter::Workbook;
use sqlx::SqlitePool;

async fn spawn_server() -> (HttpClient, SqlitePool) {
    let pool = DbService::in_memory().await.unwrap().pool;
    let state = ServerState::new(Config::default(), pool.clone());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = HttpClient::new(&ClientConfig::new(format!("http://{addr}"))).unwrap();
    (client, pool)
}

fn staff_workbook(rows: &[[&str; 3]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    for (col, header) in ["name", "position", "level"].iter().enumerate() {
        ws.write_string(0, col as u16, *header).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            ws.write_string(r as u32 + 1, col as u16, *cell).unwrap();
        }
    }
    workbook.save_to_buffer().unwrap()
}

async fn install_failing_trigger(pool: &SqlitePool) {
    sqlx::query(
        "CREATE TRIGGER reject_boom BEFORE INSERT ON employee WHEN NEW.name = 'Boom'
         BEGIN SELECT RAISE(ABORT, 'simulated store failure'); END",
    )
    .execute(pool)
    .await
    .unwrap();
}

#[tokio::test]
async fn decode_upload_and_list() {
    let (client, _pool) = spawn_server().await;
    let bytes = staff_workbook(&[
        ["Alice", "Engineer", "Senior"],
        ["Bob", "Designer", "Junior"],
    ]);

    let mut session = UploadSession::new();
    assert_eq!(session.load_bytes(&bytes, SpreadsheetFormat::Xlsx).unwrap(), 2);
    assert_eq!(session.preview().rows.len(), 2);

    let outcome = session.submit(&client).await.unwrap();

    assert_eq!(outcome.inserted, 2);
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.records[0].name, "Alice");
    assert!(!outcome.records[0].id.is_empty());
    assert!(session.is_empty());
    assert!(session.preview().is_empty());
    assert_eq!(session.state(), &SubmissionState::Succeeded { inserted: 2 });
}

#[tokio::test]
async fn failed_bulk_upload_keeps_rows_for_retry() {
    let (client, pool) = spawn_server().await;
    install_failing_trigger(&pool).await;
    let bytes = staff_workbook(&[
        ["Alice", "Engineer", "Senior"],
        ["Boom", "Engineer", "Junior"],
    ]);

    let mut session = UploadSession::new();
    session.load_bytes(&bytes, SpreadsheetFormat::Xlsx).unwrap();

    let err = session.submit(&client).await.unwrap_err();

    assert!(matches!(err, ClientError::Server(ref msg) if msg == "Failed to insert records"));
    assert_eq!(session.rows().len(), 2);
    assert!(matches!(session.state(), SubmissionState::Failed { .. }));
    assert!(client.list_records().await.unwrap().is_empty());

    // Same rows, store fixed
    sqlx::query("DROP TRIGGER reject_boom").execute(&pool).await.unwrap();
    let outcome = session.submit(&client).await.unwrap();
    assert_eq!(outcome.records.len(), 2);
}

#[tokio::test]
async fn schema_violations_are_reported() {
    let (client, _pool) = spawn_server().await;
    let bytes = staff_workbook(&[["Alice", "Engineer", "Senior"], ["Bob", "", "Junior"]]);

    let mut session = UploadSession::new();
    session.load_bytes(&bytes, SpreadsheetFormat::Xlsx).unwrap();

    match session.submit(&client).await {
        Err(ClientError::Validation {
            message,
            violations,
        }) => {
            assert_eq!(message, "Invalid data");
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].row, 1);
            assert_eq!(violations[0].field, "position");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(session.rows().len(), 2);
}

#[tokio::test]
async fn per_record_mode_keeps_only_failed_rows() {
    let (client, pool) = spawn_server().await;
    install_failing_trigger(&pool).await;
    let bytes = staff_workbook(&[
        ["Alice", "Engineer", "Senior"],
        ["Boom", "Engineer", "Junior"],
        ["Carol", "Analyst", "Intern"],
    ]);

    let mut session = UploadSession::new();
    session.load_bytes(&bytes, SpreadsheetFormat::Xlsx).unwrap();

    let (report, outcome) = session.submit_per_record(&client).await.unwrap();

    assert!(outcome.is_none());
    assert_eq!(report.created.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, 1);
    assert_eq!(session.rows().len(), 1);
    assert_eq!(session.rows()[0]["name"], "Boom");
    assert_eq!(client.list_records().await.unwrap().len(), 2);
}

#[tokio::test]
async fn submit_with_per_record_reports_store_failures() {
    let (client, pool) = spawn_server().await;
    install_failing_trigger(&pool).await;
    let bytes = staff_workbook(&[
        ["Alice", "Engineer", "Senior"],
        ["Boom", "Engineer", "Junior"],
    ]);

    let mut session = UploadSession::new();
    session.load_bytes(&bytes, SpreadsheetFormat::Xlsx).unwrap();

    match session.submit_with(&client, SubmitMode::PerRecord).await {
        Err(ClientError::PartialUpload { report }) => {
            assert_eq!(report.created.len(), 1);
            assert_eq!(report.failed.len(), 1);
            assert_eq!(report.failed[0].0, 1);
        }
        other => panic!("expected partial upload, got {other:?}"),
    }
    assert_eq!(session.rows().len(), 1);
}

#[tokio::test]
async fn submit_with_per_record_succeeds() {
    let (client, _pool) = spawn_server().await;
    let bytes = staff_workbook(&[["Alice", "Engineer", "Senior"]]);

    let mut session = UploadSession::new();
    session.load_bytes(&bytes, SpreadsheetFormat::Xlsx).unwrap();

    let outcome = session.submit_with(&client, SubmitMode::PerRecord).await.unwrap();
    assert_eq!(outcome.inserted, 1);
    assert!(session.is_empty());
}

#[tokio::test]
async fn delete_selected_removes_confirmed_ids() {
    let (client, _pool) = spawn_server().await;
    let mut session = UploadSession::new();
    session
        .load_bytes(
            &staff_workbook(&[
                ["Alice", "Engineer", "Senior"],
                ["Bob", "Designer", "Junior"],
            ]),
            SpreadsheetFormat::Xlsx,
        )
        .unwrap();
    let outcome = session.submit(&client).await.unwrap();

    let mut view = RecordView::new(outcome.records);
    let alice = view.records()[0].id.clone();
    view.toggle_selection(&alice);
    view.toggle_selection("missing-id");

    let report = view.delete_selected(&client).await;

    assert_eq!(report.deleted, vec![alice.clone()]);
    assert_eq!(report.failed.len(), 1);
    assert!(matches!(report.failed[0].1, ClientError::NotFound(_)));
    assert_eq!(view.records().len(), 1);
    assert!(view.selected().contains("missing-id"));
    assert!(matches!(
        client.get_record(&alice).await,
        Err(ClientError::NotFound(_))
    ));
}
