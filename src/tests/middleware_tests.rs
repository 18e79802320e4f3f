//! Match-before-dispatch pipeline composition

use crate::middleware::{self, Middleware, Next};
use crate::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn tag(tag: &'static str) -> Arc<dyn Handler> {
    from_fn(move |_req: Request| async move {
        Ok(Response::ok().with_body(json!({ "tag": tag })))
    })
}

/// Terminal `next` that fails if a stage unexpectedly falls through.
fn dead_end() -> Next {
    Arc::new(|_req| {
        Box::pin(async { Err(RouterError::handler("pipeline fell through")) })
    })
}

fn user_router() -> Arc<Router> {
    let mut router = Router::new();
    router.add("GET", "/users/{id:\\d+}", tag("user")).unwrap();
    router.add("GET", "/health", tag("health")).unwrap();
    Arc::new(router)
}

#[tokio::test]
async fn match_stage_attaches_params_and_handler_for_the_next_stage() {
    let match_stage = RouterMatchMiddleware::new(user_router());

    let next: Next = Arc::new(|req| {
        Box::pin(async move {
            assert_eq!(req.params().unwrap().get("id"), Some("7"));
            assert!(req.matched_handler().is_some());
            Ok(Response::new(204))
        })
    });

    let response = match_stage
        .process(Request::new("GET", "/users/7"), next)
        .await
        .unwrap();
    assert_eq!(response.status, 204);
}

#[tokio::test]
async fn match_then_dispatch_pipeline_invokes_the_matched_handler() {
    let match_stage = RouterMatchMiddleware::new(user_router());

    let next: Next = Arc::new(|req| {
        Box::pin(async move { RouteDispatchMiddleware.process(req, dead_end()).await })
    });

    let response = match_stage
        .process(Request::new("GET", "/users/7"), next)
        .await
        .unwrap();
    assert_eq!(response.body["tag"], json!("user"));
}

#[tokio::test]
async fn dispatch_stage_without_a_match_stage_fails() {
    let err = RouteDispatchMiddleware
        .process(Request::new("GET", "/users/7"), dead_end())
        .await
        .unwrap_err();
    assert!(matches!(err, RouterError::MissingMatchedHandler));
}

#[tokio::test]
async fn match_stage_propagates_routing_errors() {
    let match_stage = RouterMatchMiddleware::new(user_router());

    let err = match_stage
        .process(Request::new("GET", "/missing"), dead_end())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn closure_stages_compose_with_the_router_stages() {
    let router = user_router();
    let match_stage = Arc::new(RouterMatchMiddleware::new(router));
    let guard = middleware::from_fn(|req: Request, next: Next| async move {
        if req.path() == "/health" {
            return Ok(Response::new(503));
        }
        next(req).await
    });

    // guard -> match -> dispatch
    let tail: Next = Arc::new(move |req| {
        let match_stage = Arc::clone(&match_stage);
        Box::pin(async move {
            let next: Next = Arc::new(|req| {
                Box::pin(async move { RouteDispatchMiddleware.process(req, dead_end()).await })
            });
            match_stage.process(req, next).await
        })
    });

    let response = guard
        .process(Request::new("GET", "/health"), Arc::clone(&tail))
        .await
        .unwrap();
    assert_eq!(response.status, 503);

    let response = guard
        .process(Request::new("GET", "/users/9"), tail)
        .await
        .unwrap();
    assert_eq!(response.body["tag"], json!("user"));
}
