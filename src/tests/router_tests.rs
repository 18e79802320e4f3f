//! Core routing behavior: static matching, normalization, extraction

use crate::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn tag(tag: &'static str) -> Arc<dyn Handler> {
    from_fn(move |_req: Request| async move {
        Ok(Response::ok().with_body(json!({ "tag": tag })))
    })
}

async fn dispatched_tag(router: &Router, method: &str, path: &str) -> String {
    let response = router
        .dispatch(Request::new(method, path))
        .await
        .expect("dispatch should succeed");
    response.body["tag"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn static_route_dispatches_to_its_handler() {
    let mut router = Router::new();
    router.add("GET", "/users", tag("users")).unwrap();
    router.add("GET", "/posts", tag("posts")).unwrap();

    assert_eq!(dispatched_tag(&router, "GET", "/users").await, "users");
    assert_eq!(dispatched_tag(&router, "GET", "/posts").await, "posts");
}

#[tokio::test]
async fn percent_encoded_paths_match_their_decoded_registration() {
    let mut router = Router::new();
    router.add("GET", "/café", tag("utf8")).unwrap();
    router.add("GET", "/users list", tag("space")).unwrap();

    assert_eq!(dispatched_tag(&router, "GET", "/caf%C3%A9").await, "utf8");
    assert_eq!(dispatched_tag(&router, "GET", "/users%20list").await, "space");
    // The already-decoded form matches too.
    assert_eq!(dispatched_tag(&router, "GET", "/café").await, "utf8");
}

#[tokio::test]
async fn method_tokens_are_case_insensitive_both_ways() {
    let mut router = Router::new();
    router.add("get", "/a", tag("a")).unwrap();
    router.add("GET", "/b", tag("b")).unwrap();

    assert_eq!(dispatched_tag(&router, "GET", "/a").await, "a");
    assert_eq!(dispatched_tag(&router, "get", "/b").await, "b");
}

#[tokio::test]
async fn delimited_and_list_registrations_are_equivalent() {
    let mut delimited = Router::new();
    delimited.add("PUT|PATCH", "/users/7", tag("update")).unwrap();

    let mut listed = Router::new();
    listed.add(["PUT", "PATCH"], "/users/7", tag("update")).unwrap();

    for router in [&delimited, &listed] {
        assert_eq!(dispatched_tag(router, "PUT", "/users/7").await, "update");
        assert_eq!(dispatched_tag(router, "PATCH", "/users/7").await, "update");
    }
}

#[tokio::test]
async fn re_registration_replaces_the_earlier_handler() {
    let mut router = Router::new();
    router.add("GET", "/users", tag("first")).unwrap();
    router.add("GET", "/users", tag("second")).unwrap();

    assert_eq!(dispatched_tag(&router, "GET", "/users").await, "second");
}

#[tokio::test]
async fn empty_method_sets_are_rejected_and_leave_the_table_alone() {
    let mut router = Router::new();
    router.add("GET", "/users", tag("users")).unwrap();

    assert!(matches!(
        router.add("", "/broken", tag("broken")),
        Err(RouterError::InvalidMethodSet)
    ));
    assert!(matches!(
        router.add(" | ", "/broken", tag("broken")),
        Err(RouterError::InvalidMethodSet)
    ));
    assert!(matches!(
        router.add(Vec::<String>::new(), "/broken", tag("broken")),
        Err(RouterError::InvalidMethodSet)
    ));

    // The rejected calls registered nothing.
    assert_eq!(dispatched_tag(&router, "GET", "/users").await, "users");
    let err = router
        .dispatch(Request::new("GET", "/broken"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn duplicate_method_tokens_collapse() {
    let mut router = Router::new();
    router.add("GET|get|GET", "/users", tag("users")).unwrap();

    assert_eq!(dispatched_tag(&router, "GET", "/users").await, "users");
    let err = router
        .dispatch(Request::new("POST", "/users"))
        .await
        .unwrap_err();
    match err {
        RouterError::MethodNotAllowed { allowed, .. } => assert_eq!(allowed, ["GET"]),
        other => panic!("expected method-not-allowed, got {other}"),
    }
}

#[tokio::test]
async fn params_reach_the_handler_in_template_order() {
    let mut router = Router::new();
    router
        .add(
            "GET",
            "/users/{userId:\\d+}/posts/{slug}",
            |req: Request| async move {
                let pairs: Vec<_> = req
                    .params()
                    .unwrap()
                    .iter()
                    .map(|(n, v)| json!([n, v]))
                    .collect();
                Ok(Response::ok().with_body(json!(pairs)))
            },
        )
        .unwrap();

    let response = router
        .dispatch(Request::new("GET", "/users/7/posts/hello-world"))
        .await
        .unwrap();
    assert_eq!(
        response.body,
        json!([["userId", "7"], ["slug", "hello-world"]])
    );
}

#[tokio::test]
async fn static_matches_carry_no_params() {
    let mut router = Router::new();
    router
        .add("GET", "/users", |req: Request| async move {
            assert!(req.params().is_none());
            Ok(Response::ok())
        })
        .unwrap();

    let response = router.dispatch(Request::new("GET", "/users")).await.unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn handlers_see_the_original_request_path_and_body() {
    let mut router = Router::new();
    router.add("GET", "/café", |req: Request| async move {
        Ok(Response::ok().with_body(json!({ "path": req.path(), "echo": req.body() })))
    })
    .unwrap();

    let request = Request::new("GET", "/caf%C3%A9").with_body(json!({ "n": 1 }));
    let response = router.dispatch(request).await.unwrap();
    // The raw path travels untouched; only matching sees the decoded form.
    assert_eq!(response.body["path"], json!("/caf%C3%A9"));
    assert_eq!(response.body["echo"], json!({ "n": 1 }));
}
