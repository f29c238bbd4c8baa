use crate::e2e::helpers::TestContext;
use hyper::StatusCode;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn it_should_respond_to_health_check() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);
}

#[tokio::test]
#[serial]
async fn it_should_report_ready_when_the_database_is_reachable() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["database"], "connected");
}
