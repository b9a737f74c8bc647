//! Contact form validation and theme persistence over HTTP.

use smartcart_integration_tests::TestContext;

#[tokio::test]
async fn contact_page_carries_badge_and_theme() {
    let ctx = TestContext::new().await;
    ctx.post_form("/cart/add", &[("product_id", "1")]).await;
    ctx.post_form("/theme/toggle", &[]).await;

    let page = ctx.get_json("/contact").await;
    assert_eq!(page["cart_count"], 1);
    assert_eq!(page["theme"], "dark");
}

#[tokio::test]
async fn valid_contact_submission_succeeds() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post_form(
            "/contact",
            &[
                ("name", "Ada Lovelace"),
                ("email", "ada@example.com"),
                ("message", "Do you ship analytical engines?"),
            ],
        )
        .await;

    assert_eq!(resp["success"], true);
    assert!(resp.get("errors").is_none());
    let toasts = resp["toasts"].as_array().expect("toasts");
    assert_eq!(toasts[0]["message"], "Message sent successfully!");
}

#[tokio::test]
async fn invalid_contact_submission_reports_field_errors() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(format!("{}/contact", ctx.base_url))
        .form(&[("name", ""), ("email", "not-an-email"), ("message", "")])
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), 422);
    let body: serde_json::Value = resp.json().await.expect("json");
    assert_eq!(body["success"], false);
    assert_eq!(body["errors"]["name"], "Name is required.");
    assert_eq!(body["errors"]["email"], "Please enter a valid email address.");
    assert_eq!(body["errors"]["message"], "Message cannot be empty.");

    let toasts = body["toasts"].as_array().expect("toasts");
    assert_eq!(toasts[0]["message"], "Please correct the errors in the form.");
    assert_eq!(toasts[0]["severity"], "error");
}

#[tokio::test]
async fn blocked_submission_changes_nothing_and_then_passes_when_fixed() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(format!("{}/contact", ctx.base_url))
        .form(&[
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("message", "   "),
        ])
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), 422);

    let fixed = ctx
        .post_form(
            "/contact",
            &[
                ("name", "Ada"),
                ("email", "ada@example.com"),
                ("message", "Hello"),
            ],
        )
        .await;
    assert_eq!(fixed["success"], true);
}

#[tokio::test]
async fn theme_toggles_and_persists_across_restart() {
    let ctx = TestContext::new().await;

    let toggled = ctx.post_form("/theme/toggle", &[]).await;
    assert_eq!(toggled["theme"], "dark");

    let toggled_back = ctx.post_form("/theme/toggle", &[]).await;
    assert_eq!(toggled_back["theme"], "light");

    // Leave it dark, then restart on the same storage file.
    ctx.post_form("/theme/toggle", &[]).await;
    let new_base = ctx.restart().await;

    let home: serde_json::Value = ctx
        .client
        .get(format!("{new_base}/"))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("json");
    assert_eq!(home["theme"], "dark");
}
