//! End-to-end tests that drive the app through its HTTP surface.

use axum::http::StatusCode;
use axum_test::TestServer;
use scraper::{Html, Selector};
use tempfile::TempDir;

use pocketbook::{AppState, TransactionStore, build_router};

fn new_test_server(data_dir: &TempDir) -> TestServer {
    let store = TransactionStore::open(data_dir.path().join("transactions.json"));
    let state = AppState::new(store, "Etc/UTC");

    TestServer::new(build_router(state))
}

fn transaction_form(
    kind: &str,
    amount: &str,
    date: &str,
    category: &str,
    frequency: &str,
) -> Vec<(&'static str, String)> {
    vec![
        ("kind", kind.to_owned()),
        ("amount", amount.to_owned()),
        ("date", date.to_owned()),
        ("description", "e2e test".to_owned()),
        ("category", category.to_owned()),
        ("frequency", frequency.to_owned()),
    ]
}

#[tokio::test]
async fn create_list_and_delete_a_transaction() {
    let data_dir = TempDir::new().unwrap();
    let server = new_test_server(&data_dir);

    let response = server
        .post("/api/transactions")
        .form(&transaction_form(
            "expense",
            "12.50",
            "2024-01-15",
            "Food",
            "once",
        ))
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(
        response.header("hx-redirect"),
        "/transactions",
        "create should redirect to the transactions page"
    );

    let page = server
        .get("/transactions")
        .add_query_param("month", "2024-01-15")
        .await;
    page.assert_status_ok();

    let html = Html::parse_document(&page.text());
    let rows: Vec<_> = html
        .select(&Selector::parse("li[data-transaction-row='true']").unwrap())
        .collect();
    assert_eq!(rows.len(), 1, "want the created transaction listed");
    let row_text = rows[0].text().collect::<String>();
    assert!(row_text.contains("$12.50"), "row should show the amount");
    assert!(row_text.contains("Food"), "row should show the category");

    let response = server.delete("/api/transactions/1").await;
    response.assert_status_ok();

    let page = server
        .get("/transactions")
        .add_query_param("month", "2024-01-15")
        .await;
    let html = Html::parse_document(&page.text());
    assert_eq!(
        html.select(&Selector::parse("li[data-transaction-row='true']").unwrap())
            .count(),
        0,
        "deleted transaction should no longer be listed"
    );
}

#[tokio::test]
async fn transactions_survive_a_server_restart() {
    let data_dir = TempDir::new().unwrap();

    {
        let server = new_test_server(&data_dir);
        let response = server
            .post("/api/transactions")
            .form(&transaction_form(
                "income",
                "1000",
                "2024-01-01",
                "Salary",
                "monthly",
            ))
            .await;
        response.assert_status(StatusCode::SEE_OTHER);
    }

    // A fresh server over the same data path reads the persisted collection.
    let server = new_test_server(&data_dir);
    let page = server
        .get("/transactions")
        .add_query_param("month", "2024-06-15")
        .await;
    page.assert_status_ok();

    let html = Html::parse_document(&page.text());
    // The income is monthly-recurring, so it shows up in June as well.
    assert_eq!(
        html.select(&Selector::parse("li[data-transaction-row='true']").unwrap())
            .count(),
        1
    );
}

#[tokio::test]
async fn invalid_form_input_creates_nothing() {
    let data_dir = TempDir::new().unwrap();
    let server = new_test_server(&data_dir);

    // An income category on an expense must be rejected.
    let response = server
        .post("/api/transactions")
        .form(&transaction_form(
            "expense",
            "12.50",
            "2024-01-15",
            "Salary",
            "once",
        ))
        .await;
    response.assert_status_bad_request();

    let page = server
        .get("/transactions")
        .add_query_param("month", "2024-01-15")
        .await;
    let html = Html::parse_document(&page.text());
    assert_eq!(
        html.select(&Selector::parse("li[data-transaction-row='true']").unwrap())
            .count(),
        0
    );
}

#[tokio::test]
async fn deleting_a_missing_transaction_returns_not_found() {
    let data_dir = TempDir::new().unwrap();
    let server = new_test_server(&data_dir);

    let response = server.delete("/api/transactions/42").await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn corrupt_data_file_starts_with_an_empty_collection() {
    let data_dir = TempDir::new().unwrap();
    std::fs::write(data_dir.path().join("transactions.json"), "not json {").unwrap();

    let server = new_test_server(&data_dir);

    let page = server.get("/dashboard").await;
    page.assert_status_ok();
    assert!(
        page.text().contains("Nothing here yet"),
        "a corrupt store should behave like an empty one"
    );
}

#[tokio::test]
async fn root_redirects_to_the_dashboard() {
    let data_dir = TempDir::new().unwrap();
    let server = new_test_server(&data_dir);

    let response = server.get("/").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/dashboard");
}

#[tokio::test]
async fn unknown_routes_render_the_not_found_page() {
    let data_dir = TempDir::new().unwrap();
    let server = new_test_server(&data_dir);

    let response = server.get("/no/such/page").await;
    response.assert_status_not_found();
    assert!(response.text().contains("404"));
}
